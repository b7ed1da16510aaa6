use clap::ValueEnum;

/// How a JSON document is written.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub verbose: bool,
}

impl GlobalFlags {
    /// The explicit `--format`, or the configured default.
    #[must_use]
    pub fn format_or(&self, pretty: bool) -> OutputFormat {
        self.format.unwrap_or(if pretty {
            OutputFormat::Json
        } else {
            OutputFormat::Raw
        })
    }
}
