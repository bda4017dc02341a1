use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Raw, untrusted registration form values, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationSubmission {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub bio: String,
}

/// A registration that passed every rule.
///
/// The password is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedRegistration {
    /// Trimmed username.
    pub username: String,
    /// Trimmed email address.
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Bio reduced to the allowed markup subset.
    pub bio: String,
}

/// Outcome of validating one submission. Exactly one variant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationResult {
    Accepted(AcceptedRegistration),
    Rejected {
        /// Errors in rule evaluation order.
        errors: Vec<ValidationError>,
    },
}

impl ValidationResult {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Errors of a rejection; empty for an accepted registration.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Accepted(_) => &[],
            Self::Rejected { errors } => errors,
        }
    }
}
