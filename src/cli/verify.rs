use clap::Parser;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check bundle structure only:\n    charmbundle verify bundle.yaml\n\n\
                  Check against charm metadata (<dir>/<charm>/metadata.yaml):\n    charmbundle verify bundle.yaml --charms-dir ./charms\n\n\
                  Accept local charm paths relative to the bundle:\n    charmbundle verify bundle.yaml --local")]
pub struct VerifyArgs {
    /// Bundle file (YAML or JSON)
    pub file: PathBuf,

    /// Directory holding one charm directory per charm name
    #[arg(long, env = "CHARMBUNDLE_CHARMS_DIR")]
    pub charms_dir: Option<PathBuf>,

    /// Resolve local charm paths against the bundle's directory
    #[arg(long)]
    pub local: bool,
}
