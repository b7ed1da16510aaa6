use anyhow::Context;
use ffigen_config::{ClangConfig, FfigenConfig};
use ffigen_parser::{Diagnostic, ExtractRequest, extract_header};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::output;

/// Handle `ffigen extract`.
pub fn handle(args: &ExtractArgs, config: &FfigenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = build_request(args, &config.clang);
    let extraction = extract_header(&request)
        .with_context(|| format!("failed to extract declarations from '{}'", args.header))?;

    let rendered = output::render(&extraction.document, flags.format_or(config.output.pretty))?;
    output::emit(&rendered, args.output.as_deref())?;

    if config.output.diagnostics && !flags.quiet {
        report_diagnostics(&extraction.diagnostics);
    }
    Ok(())
}

/// Combine CLI arguments with the `[clang]` configuration. Configured
/// arguments come first so command-line flags can override them.
pub fn build_request(args: &ExtractArgs, clang: &ClangConfig) -> ExtractRequest {
    let mut arguments = clang.extra_args.clone();
    arguments.extend(args.clang_args.iter().cloned());
    ExtractRequest {
        header: args.header.clone(),
        language: clang.language.clone(),
        arguments,
        prelude: clang.prelude && !args.no_prelude,
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.message);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(header: &str, clang_args: &[&str], no_prelude: bool) -> ExtractArgs {
        ExtractArgs {
            output: None,
            no_prelude,
            header: header.to_string(),
            clang_args: clang_args.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn configured_arguments_precede_command_line() {
        let clang = ClangConfig {
            extra_args: vec!["-I/opt/include".to_string()],
            ..ClangConfig::default()
        };
        let request = build_request(&args("api.h", &["-DDEBUG"], false), &clang);
        assert_eq!(request.arguments, vec!["-I/opt/include", "-DDEBUG"]);
        assert_eq!(
            request.clang_arguments(),
            vec!["-x", "c", "-I/opt/include", "-DDEBUG"]
        );
        assert!(request.prelude);
    }

    #[test]
    fn no_prelude_flag_overrides_config() {
        let request = build_request(&args("api.h", &[], true), &ClangConfig::default());
        assert!(!request.prelude);
    }

    #[test]
    fn disabled_prelude_in_config_stays_disabled() {
        let clang = ClangConfig {
            prelude: false,
            language: "c-header".to_string(),
            ..ClangConfig::default()
        };
        let request = build_request(&args("api.h", &[], false), &clang);
        assert!(!request.prelude);
        assert_eq!(request.language, "c-header");
    }
}
