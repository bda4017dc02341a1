//! Registration orchestrator.
//!
//! One pass per submission through
//! `Start -> UsernameChecked -> EmailChecked -> PasswordChecked -> ConfirmChecked`,
//! ending in `BioSanitized -> Accepted` or in `Rejected`. Every field is
//! checked even after an earlier one failed, so a rejection carries the
//! complete error set. The bio is sanitized only once nothing failed.

use crate::email::validate_email;
use crate::error::{ErrorKind, Field, ValidationError};
use crate::password::{PasswordCheck, check_confirmation, evaluate_password};
use crate::rules::ErrorReporting;
use crate::sanitize::{check_bio_length, sanitize_bio};
use crate::types::{AcceptedRegistration, RegistrationSubmission, ValidationResult};
use crate::username::validate_username;
use std::fmt;
use tracing::debug;

/// Pipeline states, in the order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    UsernameChecked,
    EmailChecked,
    PasswordChecked,
    ConfirmChecked,
    BioSanitized,
    Accepted,
    Rejected,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::UsernameChecked => "username_checked",
            Self::EmailChecked => "email_checked",
            Self::PasswordChecked => "password_checked",
            Self::ConfirmChecked => "confirm_checked",
            Self::BioSanitized => "bio_sanitized",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub reporting: ErrorReporting,
}

impl PipelineConfig {
    #[must_use]
    pub const fn new(reporting: ErrorReporting) -> Self {
        Self { reporting }
    }
}

/// Accumulates field errors while the pipeline advances.
struct Run {
    stage: Stage,
    errors: Vec<ValidationError>,
}

impl Run {
    const fn new() -> Self {
        Self {
            stage: Stage::Start,
            errors: Vec::new(),
        }
    }

    fn record(&mut self, field: Field, kinds: impl IntoIterator<Item = ErrorKind>) {
        self.errors
            .extend(kinds.into_iter().map(|kind| ValidationError::new(field, kind)));
    }

    fn advance(&mut self, next: Stage) {
        debug!(
            from = self.stage.as_str(),
            to = next.as_str(),
            errors = self.errors.len(),
            "registration pipeline transition"
        );
        self.stage = next;
    }
}

/// Validates a submission with the default configuration.
///
/// # Examples
///
/// ```
/// use registration::{RegistrationSubmission, validate_registration};
///
/// let submission = RegistrationSubmission {
///     username: "alice_w".into(),
///     email: "alice@uni.edu".into(),
///     password: "Str0ng!Passw0rd".into(),
///     confirm_password: "Str0ng!Passw0rd".into(),
///     bio: "<script>alert(1)</script>Hello".into(),
/// };
/// assert!(validate_registration(&submission).is_accepted());
/// ```
#[must_use]
pub fn validate_registration(submission: &RegistrationSubmission) -> ValidationResult {
    validate_with(submission, PipelineConfig::default())
}

/// Validates a submission, reporting field errors per `config`.
#[must_use]
pub fn validate_with(
    submission: &RegistrationSubmission,
    config: PipelineConfig,
) -> ValidationResult {
    let reporting = config.reporting;
    let mut run = Run::new();

    let username = validate_username(&submission.username, reporting);
    if let Err(kinds) = &username {
        run.record(Field::Username, kinds.iter().copied());
    }
    run.advance(Stage::UsernameChecked);

    let email = validate_email(&submission.email, reporting);
    if let Err(kinds) = &email {
        run.record(Field::Email, kinds.iter().copied());
    }
    run.advance(Stage::EmailChecked);

    let check = PasswordCheck::new(&submission.password, &submission.username, &submission.email);
    run.record(Field::Password, evaluate_password(&check, reporting));
    run.advance(Stage::PasswordChecked);

    run.record(
        Field::ConfirmPassword,
        check_confirmation(&submission.password, &submission.confirm_password),
    );
    run.advance(Stage::ConfirmChecked);

    run.record(Field::Bio, check_bio_length(&submission.bio));

    match (username, email) {
        (Ok(username), Ok(email)) if run.errors.is_empty() => {
            let bio = sanitize_bio(&submission.bio);
            run.advance(Stage::BioSanitized);
            run.advance(Stage::Accepted);
            ValidationResult::Accepted(AcceptedRegistration {
                username: username.to_string(),
                email: email.to_string(),
                password: submission.password.clone(),
                bio,
            })
        }
        _ => {
            run.advance(Stage::Rejected);
            ValidationResult::Rejected { errors: run.errors }
        }
    }
}
