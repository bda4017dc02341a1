//! Validation and sanitization of account registration submissions.
//!
//! A [`RegistrationSubmission`] carries five untrusted strings. The
//! pipeline checks the username, the email, the password (against the
//! username and email too) and the confirmation, caps the bio length, and
//! on full success cleans the bio markup. The outcome is a
//! [`ValidationResult`]: an accepted record or the ordered list of field
//! errors.
//!
//! All reference tables live in [`tables`] and are read-only, so
//! validation is a pure function safe to call from any number of threads.

pub mod email;
pub mod error;
pub mod password;
pub mod pipeline;
pub mod rules;
pub mod sanitize;
pub mod tables;
pub mod types;
pub mod username;

pub use error::{ErrorKind, Field, ValidationError};
pub use pipeline::{PipelineConfig, Stage, validate_registration, validate_with};
pub use rules::ErrorReporting;
pub use types::{AcceptedRegistration, RegistrationSubmission, ValidationResult};
