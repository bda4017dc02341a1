//! Validation error taxonomy for registration submissions.
//!
//! Every rejection is user-correctable. A [`ValidationError`] pairs the
//! submitted [`Field`] that caused it with the [`ErrorKind`] describing the
//! broken rule, and renders as a human-readable message.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Form fields that an error can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Bio,
}

impl Field {
    /// Form-field name as submitted by the client.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::Bio => "bio",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The individual rule a field value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Username is not 3 to 30 characters long.
    #[error("Username must be between 3 and 30 characters.")]
    Length,
    /// Username contains something other than ASCII letters and underscores.
    #[error("Username may contain only letters and underscores (no digits or spaces).")]
    Charset,
    /// Username is on the reserved list.
    #[error("This username is unavailable. Please select another.")]
    ReservedName,
    /// Email is not a syntactically valid address.
    #[error("Invalid email address.")]
    Format,
    /// Email does not end with an allowed suffix.
    #[error("Email must end with one of: .edu, .ac.uk, .org")]
    DomainNotAllowed,
    #[error("Password must be at least 12 characters long.")]
    TooShort,
    #[error("Password must include at least one uppercase letter.")]
    MissingUppercase,
    #[error("Password must include at least one lowercase letter.")]
    MissingLowercase,
    #[error("Password must include at least one number.")]
    MissingDigit,
    #[error("Password must include at least one special character.")]
    MissingSpecial,
    #[error("Password cannot contain spaces or tabs.")]
    Whitespace,
    #[error("Password cannot contain your username.")]
    ContainsUsername,
    #[error("Password cannot contain your email name part.")]
    ContainsEmail,
    #[error("Password is too common. Please choose another one.")]
    CommonPassword,
    /// Confirmation does not equal the password exactly.
    #[error("Passwords must match.")]
    Mismatch,
    /// Bio exceeds the pre-sanitization length cap.
    #[error("Bio must be 1000 characters or fewer.")]
    TooLong,
}

impl ErrorKind {
    /// Stable machine-readable code, used in JSON bodies and audit lines.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Length => "username_length",
            Self::Charset => "username_charset",
            Self::ReservedName => "username_reserved",
            Self::Format => "email_format",
            Self::DomainNotAllowed => "email_domain_not_allowed",
            Self::TooShort => "password_too_short",
            Self::MissingUppercase => "password_missing_uppercase",
            Self::MissingLowercase => "password_missing_lowercase",
            Self::MissingDigit => "password_missing_digit",
            Self::MissingSpecial => "password_missing_special",
            Self::Whitespace => "password_whitespace",
            Self::ContainsUsername => "password_contains_username",
            Self::ContainsEmail => "password_contains_email",
            Self::CommonPassword => "password_common",
            Self::Mismatch => "password_mismatch",
            Self::TooLong => "bio_too_long",
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A rule violation attributed to one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ErrorKind,
}

impl ValidationError {
    #[must_use]
    pub const fn new(field: Field, kind: ErrorKind) -> Self {
        Self { field, kind }
    }

    /// Human-readable message for display next to the field.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct as _;

        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("code", &self.kind)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(
            ErrorKind::TooShort.to_string(),
            "Password must be at least 12 characters long."
        );
        assert_eq!(ErrorKind::Mismatch.to_string(), "Passwords must match.");
        assert_eq!(
            ErrorKind::DomainNotAllowed.to_string(),
            "Email must end with one of: .edu, .ac.uk, .org"
        );
    }

    #[test]
    fn test_validation_error_display_includes_field() {
        let err = ValidationError::new(Field::ConfirmPassword, ErrorKind::Mismatch);
        assert_eq!(err.to_string(), "confirm_password: Passwords must match.");
    }

    #[test]
    fn test_validation_error_serializes_code_and_message() {
        let err = ValidationError::new(Field::Username, ErrorKind::ReservedName);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "username");
        assert_eq!(json["code"], "username_reserved");
        assert_eq!(
            json["message"],
            "This username is unavailable. Please select another."
        );
    }
}
