//! Bundle parsing errors

use super::CharmError;

/// Creates a bundle parse failed error
pub fn parse_failed(reason: impl Into<String>) -> CharmError {
    CharmError::BundleParseFailed {
        reason: reason.into(),
    }
}

/// Creates the error for a bundle using both `applications` and `services`
pub fn conflicting_sections() -> CharmError {
    CharmError::ConflictingSections
}

/// Creates an invalid bundle error
pub fn invalid(message: impl Into<String>) -> CharmError {
    CharmError::InvalidBundle {
        message: message.into(),
    }
}

/// Creates an invalid placement directive error
pub fn invalid_placement(placement: impl Into<String>) -> CharmError {
    CharmError::InvalidPlacement {
        placement: placement.into(),
    }
}

/// Creates an invalid relation endpoint error
pub fn invalid_endpoint(endpoint: impl Into<String>) -> CharmError {
    CharmError::InvalidEndpoint {
        endpoint: endpoint.into(),
    }
}
