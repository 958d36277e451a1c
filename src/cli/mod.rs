//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - verify: Verify command arguments
//! - format: Format command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod format;
pub mod verify;

pub use completions::CompletionsArgs;
pub use format::FormatArgs;
pub use verify::VerifyArgs;

/// charmbundle - check and normalize charm bundles
#[derive(Parser, Debug)]
#[command(
    name = "charmbundle",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Verify and normalize charm bundles",
    long_about = "charmbundle parses bundle descriptors (applications, machines, placement, \
                  relations), reports every structural defect at once and, given charm metadata, \
                  checks relations, bindings and options against the charms.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  charmbundle verify bundle.yaml                   \x1b[90m# Structural checks\x1b[0m\n   \
                  charmbundle verify bundle.yaml --charms-dir ./c  \x1b[90m# Also check against charm metadata\x1b[0m\n   \
                  charmbundle verify bundle.yaml --local           \x1b[90m# Resolve ./local charm paths\x1b[0m\n   \
                  charmbundle format bundle.yaml --json            \x1b[90m# Print normalized JSON\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a bundle file
    Verify(VerifyArgs),

    /// Print a bundle in normalized form
    Format(FormatArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_verify() {
        let cli = Cli::try_parse_from(["charmbundle", "verify", "bundle.yaml"]).unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.file, PathBuf::from("bundle.yaml"));
                assert!(!args.local);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_cli_parsing_verify_options() {
        let cli = Cli::try_parse_from([
            "charmbundle",
            "verify",
            "bundle.yaml",
            "--charms-dir",
            "/tmp/charms",
            "--local",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.charms_dir, Some(PathBuf::from("/tmp/charms")));
                assert!(args.local);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_cli_parsing_format() {
        let cli =
            Cli::try_parse_from(["charmbundle", "format", "bundle.yaml", "--json"]).unwrap();
        match cli.command {
            Commands::Format(args) => {
                assert!(args.json);
                assert!(!args.write);
            }
            _ => panic!("Expected Format command"),
        }
    }

    #[test]
    fn test_cli_format_requires_file() {
        assert!(Cli::try_parse_from(["charmbundle", "format"]).is_err());
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["charmbundle", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_verbose() {
        let cli = Cli::try_parse_from(["charmbundle", "verify", "b.yaml", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["charmbundle", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
