//! Username rules.
//!
//! The value is trimmed before any rule runs. Rules are declared in the
//! order they are evaluated: length, character set, reserved name.

use crate::error::ErrorKind;
use crate::rules::{ErrorReporting, Rule, evaluate};
use crate::tables::{USERNAME_MAX_CHARS, USERNAME_MIN_CHARS, is_reserved_username};

/// Username rules, in evaluation order. Each receives the trimmed value.
pub const USERNAME_RULES: &[Rule<str>] = &[check_length, check_charset, check_reserved];

/// Fails unless the username is 3 to 30 characters long.
pub fn check_length(username: &str) -> Option<ErrorKind> {
    let len = username.chars().count();
    (!(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len)).then_some(ErrorKind::Length)
}

/// Fails unless every character is an ASCII letter or underscore.
///
/// An empty value also fails; there is nothing to match `[A-Za-z_]+`.
pub fn check_charset(username: &str) -> Option<ErrorKind> {
    let valid = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '_');
    (!valid).then_some(ErrorKind::Charset)
}

/// Fails if the username is reserved, ignoring case.
pub fn check_reserved(username: &str) -> Option<ErrorKind> {
    is_reserved_username(username).then_some(ErrorKind::ReservedName)
}

/// Validates a raw username.
///
/// # Returns
///
/// The trimmed username on success, or the failing rules per `reporting`.
///
/// # Examples
///
/// ```
/// use registration::{ErrorKind, ErrorReporting, username::validate_username};
///
/// assert_eq!(validate_username("  alice_w ", ErrorReporting::FirstPerField), Ok("alice_w"));
/// assert_eq!(
///     validate_username("Root", ErrorReporting::FirstPerField),
///     Err(vec![ErrorKind::ReservedName])
/// );
/// ```
pub fn validate_username(raw: &str, reporting: ErrorReporting) -> Result<&str, Vec<ErrorKind>> {
    let trimmed = raw.trim();
    let failures = evaluate(USERNAME_RULES, trimmed, reporting);
    if failures.is_empty() {
        Ok(trimmed)
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const FIRST: ErrorReporting = ErrorReporting::FirstPerField;
    const ALL: ErrorReporting = ErrorReporting::AllPerField;

    // === length rule ===

    #[test]
    fn test_length_boundaries() {
        assert_eq!(check_length("ab"), Some(ErrorKind::Length));
        assert_eq!(check_length("abc"), None);
        assert_eq!(check_length(&"a".repeat(30)), None);
        assert_eq!(check_length(&"a".repeat(31)), Some(ErrorKind::Length));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(check_length("äöü"), None);
    }

    #[test]
    fn test_length_applies_after_trim() {
        assert_eq!(validate_username("  ab  ", FIRST), Err(vec![ErrorKind::Length]));
        assert_eq!(validate_username("   abc   ", FIRST), Ok("abc"));
    }

    #[test]
    fn test_empty_username_fails_length_first() {
        assert_eq!(validate_username("", FIRST), Err(vec![ErrorKind::Length]));
        assert_eq!(validate_username("   ", FIRST), Err(vec![ErrorKind::Length]));
    }

    // === charset rule ===

    #[test]
    fn test_charset_accepts_letters_and_underscores() {
        assert_eq!(check_charset("alice_w"), None);
        assert_eq!(check_charset("__Bob__"), None);
    }

    #[test]
    fn test_charset_rejects_digits_spaces_and_symbols() {
        for bad in ["alice1", "alice w", "alice-w", "alice.w", "älice", "<b>bob"] {
            assert_eq!(check_charset(bad), Some(ErrorKind::Charset), "{bad}");
        }
    }

    // === reserved rule ===

    #[test]
    fn test_reserved_names_ignore_case() {
        assert_eq!(check_reserved("Admin"), Some(ErrorKind::ReservedName));
        assert_eq!(check_reserved("SUPERUSER"), Some(ErrorKind::ReservedName));
        assert_eq!(check_reserved("admins"), None);
    }

    #[test]
    fn test_reserved_name_rejected_after_trim() {
        assert_eq!(
            validate_username("  root ", FIRST),
            Err(vec![ErrorKind::ReservedName])
        );
    }

    // === reporting policy ===

    #[test]
    fn test_first_failure_only() {
        assert_eq!(validate_username("a1", FIRST), Err(vec![ErrorKind::Length]));
    }

    #[test]
    fn test_all_failures_in_declared_order() {
        assert_eq!(
            validate_username("a1", ALL),
            Err(vec![ErrorKind::Length, ErrorKind::Charset])
        );
        assert_matches!(validate_username("alice", ALL), Ok("alice"));
    }
}
