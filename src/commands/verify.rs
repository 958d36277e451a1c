//! Verify command
//!
//! Loads a bundle, optionally loads charm metadata, and prints every defect
//! the verifier finds.

use std::collections::BTreeMap;
use std::path::Path;

use console::Style;

use crate::cli::VerifyArgs;
use crate::commands::helpers::{bundle_dir, load_bundle};
use charmbundle::charm::url::{CharmUrl, is_local_path};
use charmbundle::error::{CharmError, Result};
use charmbundle::{BundleData, CharmLookup, CharmMeta, Validators, Warnings};

/// Run verify command
pub fn run(args: VerifyArgs) -> Result<()> {
    let bundle = load_bundle(&args.file)?;
    let base = bundle_dir(&args.file);
    let validators = Validators::basic();

    let charms = match &args.charms_dir {
        Some(dir) => Some(load_charms(&bundle, dir, args.local.then_some(base.as_path()))?),
        None => None,
    };
    let lookup = charms.as_ref().map(|c| c as &dyn CharmLookup);

    let outcome = if args.local {
        bundle.verify_local(&base, &validators, lookup)
    } else if let Some(lookup) = lookup {
        bundle.verify_with_charms(&validators, lookup)
    } else {
        bundle.verify(&validators)
    };

    match outcome {
        Ok(warnings) => {
            print_warnings(&warnings);
            let green = Style::new().green().bold();
            println!("{} {}", green.apply_to("OK"), args.file.display());
            Ok(())
        }
        Err(err) => {
            let red = Style::new().red().bold();
            println!(
                "{} {} has {} defect(s):",
                red.apply_to("FAILED"),
                args.file.display(),
                err.len()
            );
            for defect in err.sorted_errors() {
                println!("  - {defect}");
            }
            Err(CharmError::Verification(err))
        }
    }
}

fn print_warnings(warnings: &Warnings) {
    let yellow = Style::new().yellow();
    for warning in warnings {
        eprintln!("{} {warning}", yellow.apply_to("warning:"));
    }
}

/// Charm metadata for every application whose charm can be found.
///
/// Store charms are looked up as `<charms_dir>/<name>/`; local charm paths
/// are resolved against `local_base` when verifying locally. Applications
/// whose charm directory does not exist are left out and reported by the
/// verifier.
fn load_charms(
    bundle: &BundleData,
    charms_dir: &Path,
    local_base: Option<&Path>,
) -> Result<BTreeMap<String, CharmMeta>> {
    let mut charms = BTreeMap::new();
    for (name, app) in &bundle.applications {
        let dir = match (local_base, is_local_path(&app.charm)) {
            (Some(base), true) => base.join(&app.charm),
            (None, true) => continue,
            (_, false) => match CharmUrl::parse(&app.charm) {
                Ok(url) => charms_dir.join(&url.name),
                Err(_) => continue,
            },
        };
        if !dir.join("metadata.yaml").is_file() {
            tracing::debug!(application = %name, dir = %dir.display(), "no charm metadata found");
            continue;
        }
        charms.insert(name.clone(), CharmMeta::from_dir(&dir)?);
    }
    Ok(charms)
}
