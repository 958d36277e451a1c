//! Bundle verification
//!
//! Verification runs every check over the whole bundle and reports all
//! defects together instead of stopping at the first one. Each check is a
//! pure function from the bundle and its collaborators to a list of defect
//! messages; the lists are concatenated once, at the end.
//!
//! Three entry points differ in what they can see:
//! - [`BundleData::verify`]: structure only
//! - [`BundleData::verify_with_charms`]: also charm metadata (relations,
//!   subordinates, config options, endpoint bindings)
//! - [`BundleData::verify_local`]: also resolves local charm paths against a
//!   bundle directory
//!
//! The order of the returned messages follows map iteration order and is not
//! part of the contract; compare sorted.

mod applications;
mod bindings;
pub mod inference;
mod machines;
mod placement;
mod relations;
mod series;
pub mod validators;

use std::path::Path;

use crate::bundle::BundleData;
use crate::charm::CharmLookup;
use crate::error::VerificationError;

pub use inference::{Resolution, infer_relation};
pub use validators::{BoxError, Validators};

/// Non-fatal advisories returned alongside a successful verification
pub type Warnings = Vec<String>;

/// Everything a check may look at
pub(crate) struct Context<'a> {
    pub bundle: &'a BundleData,
    pub validators: &'a Validators,
    pub charms: Option<&'a dyn CharmLookup>,
    pub local_base: Option<&'a Path>,
}

type Check = fn(&Context<'_>) -> Vec<String>;

const CHECKS: &[(&str, Check)] = &[
    ("series", series::check),
    ("machines", machines::check),
    ("applications", applications::check),
    ("placement", placement::check),
    ("relations", relations::check),
    ("bindings", bindings::check),
];

fn run(ctx: &Context<'_>) -> std::result::Result<Warnings, VerificationError> {
    let mut defects = Vec::new();
    for (name, check) in CHECKS {
        let found = check(ctx);
        tracing::debug!(check = name, defects = found.len(), "ran bundle check");
        defects.extend(found);
    }

    match VerificationError::from_defects(defects) {
        Some(err) => Err(err),
        None => {
            let warnings = collect_warnings(ctx);
            for warning in &warnings {
                tracing::debug!("{warning}");
            }
            Ok(warnings)
        }
    }
}

fn collect_warnings(ctx: &Context<'_>) -> Warnings {
    let mut warnings = Vec::new();
    if ctx.bundle.unmarshaled_with_services() {
        warnings.push(
            "bundle uses the deprecated \"services\" section; rename it to \"applications\""
                .to_string(),
        );
    }
    warnings.extend(placement::deprecation_warnings(ctx));
    warnings
}

impl BundleData {
    /// Check the bundle's internal consistency.
    ///
    /// Returns warnings on success, or every defect found.
    pub fn verify(&self, validators: &Validators) -> std::result::Result<Warnings, VerificationError> {
        run(&Context {
            bundle: self,
            validators,
            charms: None,
            local_base: None,
        })
    }

    /// Like [`verify`](Self::verify), also checking the bundle against the
    /// charms its applications deploy
    pub fn verify_with_charms(
        &self,
        validators: &Validators,
        charms: &dyn CharmLookup,
    ) -> std::result::Result<Warnings, VerificationError> {
        run(&Context {
            bundle: self,
            validators,
            charms: Some(charms),
            local_base: None,
        })
    }

    /// Like [`verify_with_charms`](Self::verify_with_charms), accepting local
    /// charm paths resolved relative to `bundle_dir`
    pub fn verify_local(
        &self,
        bundle_dir: &Path,
        validators: &Validators,
        charms: Option<&dyn CharmLookup>,
    ) -> std::result::Result<Warnings, VerificationError> {
        run(&Context {
            bundle: self,
            validators,
            charms,
            local_base: Some(bundle_dir),
        })
    }
}
