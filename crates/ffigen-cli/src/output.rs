use std::io::Write as _;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable value to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable value in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    emit(&rendered, None)
}

/// Write rendered text plus a trailing newline to `path`, or stdout.
pub fn emit(rendered: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write to stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ffigen_core::{DeclarationRecord, MacroRecord, MacroValue, ProgramDocument};
    use pretty_assertions::assert_eq;

    use super::*;

    fn document() -> ProgramDocument {
        let mut document = ProgramDocument::new();
        document.insert(
            "c:@macro@N".into(),
            DeclarationRecord::Macro(MacroRecord {
                name: "N".to_string(),
                value: Some(MacroValue::Integer(42)),
            }),
        );
        document
    }

    #[test]
    fn raw_is_single_line() {
        let rendered = render(&document(), OutputFormat::Raw).expect("render");
        assert_eq!(
            rendered,
            r#"{"":[],"c:@macro@N":{"kind":"macro","name":"N","value":42}}"#
        );
    }

    #[test]
    fn json_is_pretty_and_matches_document_encoder() {
        let document = document();
        let rendered = render(&document, OutputFormat::Json).expect("render");
        assert!(rendered.contains('\n'));
        assert_eq!(rendered, document.to_json(true).expect("encode"));
    }

    #[test]
    fn emit_writes_file_with_trailing_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        emit("{}", Some(&path)).expect("emit");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{}\n");
    }
}
