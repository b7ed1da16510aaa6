use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract the declarations of a C header as JSON.
    Extract(ExtractArgs),
    /// Print the JSON Schema of the output document.
    Schema(SchemaArgs),
    /// Validate a previously written document against the schema.
    Check(CheckArgs),
}

/// Arguments for `ffigen extract`.
#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Parse the header directly instead of through a scratch unit that
    /// includes it.
    #[arg(long)]
    pub no_prelude: bool,

    /// Header name as written in `#include <...>`, or a file path with
    /// `--no-prelude`.
    pub header: String,

    /// Arguments forwarded verbatim to clang (`-I`, `-D`, `--target`, ...).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub clang_args: Vec<String>,
}

/// Arguments for `ffigen schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema to print: document, declaration_record, type_node.
    #[arg(default_value = ffigen_schema::DOCUMENT)]
    pub type_name: String,
}

/// Arguments for `ffigen check`.
#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Document to validate.
    pub file: PathBuf,
}
