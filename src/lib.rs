//! charmbundle - bundle model and verifier for charm deployments
//!
//! A bundle describes a multi-application deployment: applications and the
//! charms they run, machines, unit placement and the relations between
//! applications. This crate parses bundles from YAML or JSON, writes them
//! back out, and verifies them, reporting every defect it finds at once.
//!
//! ```no_run
//! use charmbundle::{BundleData, Validators};
//!
//! # fn main() -> charmbundle::Result<()> {
//! let bundle = BundleData::from_yaml("applications:\n  mysql:\n    charm: mysql\n    num_units: 1\n")?;
//! let warnings = bundle.verify(&Validators::basic())?;
//! assert!(warnings.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod charm;
pub mod common;
pub mod error;
pub mod verify;

pub use bundle::{ApplicationSpec, BundleData, Endpoint, MachineSpec, UnitPlacement};
pub use charm::{CharmCapabilities, CharmLookup, CharmMeta};
pub use error::{CharmError, Result, VerificationError};
pub use verify::{Resolution, Validators, Warnings, infer_relation};
