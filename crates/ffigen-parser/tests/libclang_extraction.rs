//! Extraction through libclang. These need a libclang shared library at
//! runtime and are ignored by default; run with `--ignored`.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use ffigen_core::{DeclarationRecord, MacroValue, TypeNode};
use ffigen_parser::{ExtractRequest, Extraction, ParserError, Session, extract_header};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Held by every test that opens a libclang session.
static LIBCLANG: Mutex<()> = Mutex::new(());

/// libclang allows one session per process, so the fixture is parsed once
/// and shared by every test here.
fn extract_fixture() -> &'static Extraction {
    static FIXTURE: OnceLock<Extraction> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let _guard = LIBCLANG.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.h");
        let request = ExtractRequest {
            prelude: false,
            ..ExtractRequest::new(fixture.display().to_string())
        };
        extract_header(&request).expect("libclang extraction should succeed")
    })
}

fn macro_value(extraction: &Extraction, name: &str) -> Option<MacroValue> {
    match extraction.document.find_by_name(name) {
        Some((_, DeclarationRecord::Macro(record))) => record.value.clone(),
        other => panic!("macro {name} not found: {other:?}"),
    }
}

#[test]
#[ignore = "requires libclang"]
#[allow(clippy::approx_constant)]
fn fixture_macros() {
    let extraction = extract_fixture();
    assert_eq!(macro_value(extraction, "N"), Some(MacroValue::Integer(42)));
    assert_eq!(macro_value(extraction, "PI"), Some(MacroValue::Real(3.14)));
    assert_eq!(
        macro_value(extraction, "LBL"),
        Some(MacroValue::String("\"hi\"".to_string()))
    );
    assert_eq!(macro_value(extraction, "BIG"), Some(MacroValue::Integer(10)));
    assert_eq!(macro_value(extraction, "SAMPLE_H"), None);
}

#[test]
#[ignore = "requires libclang"]
fn fixture_self_referential_struct() {
    let extraction = extract_fixture();
    let value = serde_json::to_value(extraction.document.get("c:@S@node")).expect("serialize");
    assert_eq!(
        value["fields"][1]["type"],
        json!({"kind": "pointer", "pointee": {"kind": "ref", "id": "c:@S@node"}})
    );
}

#[test]
#[ignore = "requires libclang"]
fn fixture_functions_and_variables() {
    let extraction = extract_fixture();
    let Some(DeclarationRecord::Function(add)) = extraction.document.get("c:@F@add") else {
        panic!("add not extracted");
    };
    assert_eq!(
        add.argument_names,
        vec![Some("a".to_string()), Some("b".to_string())]
    );
    let Some((_, DeclarationRecord::Variable(samples))) = extraction.document.find_by_name("samples")
    else {
        panic!("samples not extracted");
    };
    assert_eq!(samples.ty, TypeNode::array(TypeNode::primitive("double"), 16));
    assert!(extraction.diagnostics.is_empty(), "{:?}", extraction.diagnostics);
}

#[test]
#[ignore = "requires libclang"]
fn overlapping_session_is_refused() {
    let _guard = LIBCLANG.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let first = Session::open().expect("first session opens");
    assert!(matches!(Session::open(), Err(ParserError::SessionActive)));
    drop(first);
    Session::open().expect("session reopens once the first is dropped");
}
