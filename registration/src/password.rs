//! Password strength policy.
//!
//! The password is taken as submitted, without trimming; whitespace
//! anywhere in it is itself a violation. Two rules cross-check the
//! username and the email local part, so the policy needs all three.

use crate::email::local_part;
use crate::error::ErrorKind;
use crate::rules::ErrorReporting;
use crate::tables::{PASSWORD_MIN_CHARS, PASSWORD_SPECIAL_CHARS, is_common_password};

/// Inputs a password rule may consult.
#[derive(Debug, Clone, Copy)]
pub struct PasswordCheck<'a> {
    /// Raw password.
    pub password: &'a str,
    /// Trimmed username.
    pub username: &'a str,
    /// Trimmed email address.
    pub email: &'a str,
}

impl<'a> PasswordCheck<'a> {
    #[must_use]
    pub fn new(password: &'a str, username: &'a str, email: &'a str) -> Self {
        Self {
            password,
            username: username.trim(),
            email: email.trim(),
        }
    }
}

pub type PasswordRule = fn(&PasswordCheck<'_>) -> Option<ErrorKind>;

/// Password rules, in evaluation order.
pub const PASSWORD_RULES: &[PasswordRule] = &[
    check_length,
    check_uppercase,
    check_lowercase,
    check_digit,
    check_special,
    check_whitespace,
    check_username,
    check_email,
    check_common,
];

pub fn check_length(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    (check.password.chars().count() < PASSWORD_MIN_CHARS).then_some(ErrorKind::TooShort)
}

pub fn check_uppercase(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    missing(check.password, |c| c.is_ascii_uppercase(), ErrorKind::MissingUppercase)
}

pub fn check_lowercase(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    missing(check.password, |c| c.is_ascii_lowercase(), ErrorKind::MissingLowercase)
}

pub fn check_digit(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    missing(check.password, |c| c.is_ascii_digit(), ErrorKind::MissingDigit)
}

pub fn check_special(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    missing(
        check.password,
        |c| PASSWORD_SPECIAL_CHARS.contains(c),
        ErrorKind::MissingSpecial,
    )
}

/// Any Unicode whitespace counts, not just spaces and tabs.
pub fn check_whitespace(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    check
        .password
        .chars()
        .any(char::is_whitespace)
        .then_some(ErrorKind::Whitespace)
}

/// Skipped when the username is empty.
pub fn check_username(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    contains_ignore_case(check.password, check.username).then_some(ErrorKind::ContainsUsername)
}

/// Skipped when the email local part is empty.
pub fn check_email(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    contains_ignore_case(check.password, local_part(check.email))
        .then_some(ErrorKind::ContainsEmail)
}

pub fn check_common(check: &PasswordCheck<'_>) -> Option<ErrorKind> {
    is_common_password(check.password).then_some(ErrorKind::CommonPassword)
}

/// Fails unless `confirmation` equals `password` exactly, case included.
pub fn check_confirmation(password: &str, confirmation: &str) -> Option<ErrorKind> {
    (password != confirmation).then_some(ErrorKind::Mismatch)
}

/// Runs the whole policy and collects failures per `reporting`.
///
/// # Examples
///
/// ```
/// use registration::{ErrorKind, ErrorReporting, password::{PasswordCheck, evaluate_password}};
///
/// let check = PasswordCheck::new("Alice12345!@", "alice", "a@uni.edu");
/// assert_eq!(
///     evaluate_password(&check, ErrorReporting::FirstPerField),
///     vec![ErrorKind::ContainsUsername]
/// );
/// ```
#[must_use]
pub fn evaluate_password(check: &PasswordCheck<'_>, reporting: ErrorReporting) -> Vec<ErrorKind> {
    reporting.collect(PASSWORD_RULES.iter().filter_map(|rule| rule(check)))
}

fn missing(password: &str, wanted: impl Fn(char) -> bool, kind: ErrorKind) -> Option<ErrorKind> {
    (!password.chars().any(wanted)).then_some(kind)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}
