//! Charm identifier and metadata errors

use super::CharmError;

/// Creates an invalid charm URL error
pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> CharmError {
    CharmError::InvalidCharmUrl {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid charm metadata error
pub fn metadata_invalid(message: impl Into<String>) -> CharmError {
    CharmError::CharmMetadataInvalid {
        message: message.into(),
    }
}

/// Creates an invalid charm config error
pub fn config_invalid(message: impl Into<String>) -> CharmError {
    CharmError::CharmConfigInvalid {
        message: message.into(),
    }
}
