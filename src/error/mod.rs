//! Error types and handling for charmbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Bundle parsing errors
//! - [`charm`]: Charm identifier and metadata errors
//! - [`fs`]: File system errors
//! - [`verification`]: The aggregate returned by bundle verification

pub mod bundle;
pub mod charm;
pub mod fs;
pub mod verification;

pub use bundle::{
    conflicting_sections, invalid as bundle_invalid, invalid_endpoint, invalid_placement,
    parse_failed as bundle_parse_failed,
};
pub use charm::{
    config_invalid as charm_config_invalid, invalid_url as invalid_charm_url,
    metadata_invalid as charm_metadata_invalid,
};
pub use fs::{
    io_error, not_found as file_not_found, read_failed as file_read_failed,
    write_failed as file_write_failed,
};
pub use verification::VerificationError;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for charmbundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum CharmError {
    // Bundle errors
    #[error("Failed to parse bundle: {reason}")]
    #[diagnostic(
        code(charmbundle::bundle::parse_failed),
        help("Check that the bundle is a YAML mapping with applications, machines and relations")
    )]
    BundleParseFailed { reason: String },

    #[error("Bundle cannot contain both \"applications\" and \"services\" sections")]
    #[diagnostic(
        code(charmbundle::bundle::conflicting_sections),
        help("\"services\" is the legacy name of \"applications\"; merge them into \"applications\"")
    )]
    ConflictingSections,

    #[error("Invalid bundle: {message}")]
    #[diagnostic(code(charmbundle::bundle::invalid))]
    InvalidBundle { message: String },

    #[error("invalid placement syntax {placement:?}")]
    #[diagnostic(
        code(charmbundle::bundle::invalid_placement),
        help("Valid forms: new, 3, lxd:3, lxd:new, app, app/1, lxd:app/1")
    )]
    InvalidPlacement { placement: String },

    #[error("invalid relation syntax {endpoint:?}")]
    #[diagnostic(
        code(charmbundle::bundle::invalid_endpoint),
        help("Relation endpoints are written as application or application:relation")
    )]
    InvalidEndpoint { endpoint: String },

    // Charm errors
    #[error("Invalid charm URL {url:?}: {reason}")]
    #[diagnostic(
        code(charmbundle::charm::invalid_url),
        help("Valid formats: name, ch:name, cs:~user/series/name-3, local:series/name")
    )]
    InvalidCharmUrl { url: String, reason: String },

    #[error("Invalid charm metadata: {message}")]
    #[diagnostic(code(charmbundle::charm::metadata_invalid))]
    CharmMetadataInvalid { message: String },

    #[error("Invalid charm config: {message}")]
    #[diagnostic(code(charmbundle::charm::config_invalid))]
    CharmConfigInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(charmbundle::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(charmbundle::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(charmbundle::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(charmbundle::fs::io_error))]
    IoError { message: String },

    // Verification errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    Verification(#[from] VerificationError),
}

impl From<std::io::Error> for CharmError {
    fn from(err: std::io::Error) -> Self {
        CharmError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CharmError {
    fn from(err: serde_yaml::Error) -> Self {
        CharmError::BundleParseFailed {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CharmError {
    fn from(err: serde_json::Error) -> Self {
        CharmError::BundleParseFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CharmError>;
