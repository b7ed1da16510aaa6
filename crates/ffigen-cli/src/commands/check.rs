use std::path::Path;

use anyhow::Context;
use ffigen_config::FfigenConfig;
use ffigen_schema::{SchemaError, SchemaRegistry, check_document};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::output;

/// Summary printed for a valid document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub named: usize,
    pub anonymous: usize,
}

/// Handle `ffigen check`.
pub fn handle(args: &CheckArgs, config: &FfigenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = check_file(&args.file)?;
    output::output(&report, flags.format_or(config.output.pretty))
}

/// Validate the document stored at `path`.
pub fn check_file(path: &Path) -> anyhow::Result<CheckReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let registry = SchemaRegistry::new();
    match check_document(&registry, &text) {
        Ok(document) => Ok(CheckReport {
            valid: true,
            named: document.len(),
            anonymous: document.anonymous().len(),
        }),
        Err(SchemaError::ValidationFailed { errors }) => {
            anyhow::bail!(
                "{} does not match the document schema:\n  {}",
                path.display(),
                errors.join("\n  ")
            )
        }
        Err(error) => Err(error).with_context(|| format!("failed to check {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use ffigen_core::{DeclarationRecord, ProgramDocument, SymbolIdentity, TypeNode, TypedefRecord};
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).expect("write fixture");
        path
    }

    #[test]
    fn valid_document_reports_counts() {
        let mut document = ProgramDocument::new();
        document.insert(
            "c:@T@u8".into(),
            DeclarationRecord::Typedef(TypedefRecord {
                name: "u8".to_string(),
                ty: TypeNode::primitive("unsigned char"),
            }),
        );
        document.insert(
            SymbolIdentity::anonymous(),
            DeclarationRecord::Typedef(TypedefRecord {
                name: String::new(),
                ty: TypeNode::primitive("int"),
            }),
        );
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "doc.json", &document.to_json(true).expect("encode"));

        let report = check_file(&path).expect("document is valid");
        assert_eq!(
            report,
            CheckReport {
                valid: true,
                named: 1,
                anonymous: 1,
            }
        );
    }

    #[test]
    fn schema_violation_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "bad.json",
            r#"{"": [], "c:@T@x": {"kind": "typedef", "name": "x"}}"#,
        );

        let error = check_file(&path).expect_err("missing type rejected");
        assert!(error.to_string().contains("does not match the document schema"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = check_file(&dir.path().join("absent.json")).expect_err("no file");
        assert!(format!("{error:#}").contains("failed to read"));
    }
}
