use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ffigen` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ffigen",
    version,
    about = "Dump the declarations of a C header as JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json (pretty) or raw (compact). Defaults to the
    /// `output.pretty` setting.
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only, no diagnostics)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
