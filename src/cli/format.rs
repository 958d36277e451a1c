use clap::Parser;
use std::path::PathBuf;

/// Arguments for the format command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print the normalized bundle:\n    charmbundle format bundle.yaml\n\n\
                  Convert to JSON:\n    charmbundle format bundle.yaml --json\n\n\
                  Rewrite the file in place:\n    charmbundle format bundle.yaml --write")]
pub struct FormatArgs {
    /// Bundle file (YAML or JSON)
    pub file: PathBuf,

    /// Emit JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Replace the file instead of printing
    #[arg(long)]
    pub write: bool,
}
