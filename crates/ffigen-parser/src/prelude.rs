//! Header extraction through a scratch translation unit.
//!
//! A header is normally not parsed on its own. A temporary C file is
//! written that defines `size_t` and `ptrdiff_t` from the compiler's
//! builtin types (and sets the guards libc headers check before defining
//! them again), then includes the header. libclang parses that file.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use ffigen_core::ProgramDocument;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ParserError;
use crate::extractor::extract;
use crate::libclang::{Diagnostic, Session};

/// What to parse and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    /// Header as written inside `#include <...>`, or a file path when the
    /// prelude is disabled.
    pub header: String,
    /// Value passed to clang's `-x`.
    pub language: String,
    /// Arguments forwarded to clang after `-x <language>`.
    pub arguments: Vec<String>,
    /// Parse through the scratch translation unit.
    pub prelude: bool,
}

impl ExtractRequest {
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            language: "c".to_string(),
            arguments: Vec::new(),
            prelude: true,
        }
    }

    /// Full clang argument list: `-x <language>` then the forwarded args.
    #[must_use]
    pub fn clang_arguments(&self) -> Vec<String> {
        let mut arguments = vec!["-x".to_string(), self.language.clone()];
        arguments.extend(self.arguments.iter().cloned());
        arguments
    }
}

/// The document extracted from one header plus the compiler's diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub document: ProgramDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Source text of the scratch translation unit for `header`.
#[must_use]
pub fn scratch_source(header: &str) -> String {
    format!(
        "#define _SIZE_T\n\
         #define _PTRDIFF_T\n\
         typedef __SIZE_TYPE__ size_t;\n\
         typedef __PTRDIFF_TYPE__ ptrdiff_t;\n\
         #include <{header}>\n"
    )
}

/// A scratch translation unit on disk, removed when dropped.
#[derive(Debug)]
pub struct ScratchUnit {
    file: NamedTempFile,
}

impl ScratchUnit {
    /// Write the scratch unit for `header` to a fresh temporary `.c` file.
    ///
    /// # Errors
    /// Returns `ParserError::Io` if the file cannot be created or written.
    pub fn create(header: &str) -> Result<Self, ParserError> {
        let mut file = tempfile::Builder::new()
            .prefix("ffigen-")
            .suffix(".c")
            .tempfile()?;
        file.write_all(scratch_source(header).as_bytes())?;
        file.flush()?;
        debug!(path = %file.path().display(), header, "wrote scratch translation unit");
        Ok(Self { file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Parse a header with libclang and extract its declarations.
///
/// Opens a [`Session`] for the duration of the call, so calls must not
/// overlap within one process.
///
/// # Errors
/// Returns `ParserError::SessionActive` if another session is open, and
/// otherwise `ParserError` if libclang cannot be loaded, the scratch unit
/// cannot be written, or no translation unit is produced.
pub fn extract_header(request: &ExtractRequest) -> Result<Extraction, ParserError> {
    let session = Session::open()?;
    let scratch = if request.prelude {
        Some(ScratchUnit::create(&request.header)?)
    } else {
        None
    };
    let source: PathBuf = scratch
        .as_ref()
        .map_or_else(|| PathBuf::from(&request.header), |unit| unit.path().to_path_buf());

    let extraction = session.with_unit(&source, &request.clang_arguments(), |oracle, diagnostics| {
        Extraction {
            document: extract(oracle),
            diagnostics,
        }
    })?;
    debug!(
        records = extraction.document.record_count(),
        diagnostics = extraction.diagnostics.len(),
        "header extracted"
    );
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scratch_source_defines_size_types_before_include() {
        let text = scratch_source("stdio.h");
        assert_eq!(
            text,
            "#define _SIZE_T\n#define _PTRDIFF_T\ntypedef __SIZE_TYPE__ size_t;\n\
             typedef __PTRDIFF_TYPE__ ptrdiff_t;\n#include <stdio.h>\n"
        );
    }

    #[test]
    fn scratch_unit_is_written_and_removed() {
        let unit = ScratchUnit::create("zlib.h").expect("create scratch unit");
        let path = unit.path().to_path_buf();
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("c"));
        let text = std::fs::read_to_string(&path).expect("read scratch unit");
        assert!(text.ends_with("#include <zlib.h>\n"));
        drop(unit);
        assert!(!path.exists());
    }

    #[test]
    fn clang_arguments_start_with_language() {
        let request = ExtractRequest {
            arguments: vec!["-I/opt/include".to_string(), "-DNDEBUG".to_string()],
            ..ExtractRequest::new("foo.h")
        };
        assert_eq!(
            request.clang_arguments(),
            vec!["-x", "c", "-I/opt/include", "-DNDEBUG"]
        );
    }
}
