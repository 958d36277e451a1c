//! Aggregate error returned by bundle verification
//!
//! Verification never stops at the first defect: every check runs to
//! completion and all collected messages are returned together in one
//! [`VerificationError`].

use miette::Diagnostic;
use thiserror::Error;

/// Every defect found by one verification pass, in collection order
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{}", summarize(.errors))]
#[diagnostic(code(charmbundle::verify::failed))]
pub struct VerificationError {
    errors: Vec<String>,
}

impl VerificationError {
    /// Wrap a list of defect messages
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Returns `None` when no defects were collected
    pub fn from_defects(errors: Vec<String>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Every individual defect message
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Defect messages sorted, for order-insensitive comparison
    pub fn sorted_errors(&self) -> Vec<String> {
        let mut errors = self.errors.clone();
        errors.sort();
        errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn summarize(errors: &[String]) -> String {
    match errors {
        [] => "bundle verification failed".to_string(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{first} (and {} more errors)", rest.len()),
    }
}
