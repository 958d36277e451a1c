//! Format command

use std::io::Write;
use std::path::Path;

use crate::cli::FormatArgs;
use crate::commands::helpers::{bundle_dir, load_bundle};
use charmbundle::BundleData;
use charmbundle::error::{self, Result};

/// Run format command
pub fn run(args: FormatArgs) -> Result<()> {
    let bundle = load_bundle(&args.file)?;
    let rendered = render(&bundle, args.json)?;

    if args.write {
        write_atomic(&args.file, &rendered)?;
        tracing::debug!(path = %args.file.display(), "rewrote bundle");
    } else {
        print!("{rendered}");
    }
    Ok(())
}

fn render(bundle: &BundleData, json: bool) -> Result<String> {
    if json {
        let mut out = bundle.to_json()?;
        out.push('\n');
        Ok(out)
    } else {
        bundle.to_yaml()
    }
}

/// Replace `path` through a temporary file in the same directory
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_failed = |e: &dyn std::fmt::Display| {
        error::file_write_failed(path.display().to_string(), e.to_string())
    };
    let mut tmp = tempfile::NamedTempFile::new_in(bundle_dir(path)).map_err(|e| write_failed(&e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| write_failed(&e))?;
    tmp.as_file().sync_all().map_err(|e| write_failed(&e))?;
    tmp.persist(path).map_err(|e| write_failed(&e.error))?;
    Ok(())
}
