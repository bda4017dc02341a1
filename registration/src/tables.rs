//! Process-wide reference data for the registration pipeline.
//!
//! These tables are compile-time constants; nothing writes to them after
//! startup, so any number of threads may validate concurrently.

/// Usernames that can never be registered, compared case-insensitively.
pub const RESERVED_USERNAMES: &[&str] = &["admin", "root", "superuser"];

/// Passwords rejected outright, compared case-insensitively.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password123",
    "admin",
    "123456",
    "qwerty",
    "letmein",
    "welcome",
    "iloveyou",
    "abc123",
    "monkey",
    "football",
];

/// Suffixes an email address must end with (literal suffix match).
pub const ALLOWED_EMAIL_SUFFIXES: &[&str] = &[".edu", ".ac.uk", ".org"];

/// Characters that satisfy the password special-character rule.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Markup tags kept by the bio sanitizer.
pub const ALLOWED_TAGS: &[&str] = &["b", "i", "u", "em", "strong", "a", "p", "ul", "ol", "li"];

/// Per-tag attributes kept by the bio sanitizer. Tags not listed keep none.
pub const ALLOWED_TAG_ATTRIBUTES: &[(&str, &[&str])] = &[("a", &["href", "title"])];

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 30;
pub const PASSWORD_MIN_CHARS: usize = 12;
pub const BIO_MAX_CHARS: usize = 1000;

/// Returns true if `username` is reserved, ignoring case.
#[must_use]
pub fn is_reserved_username(username: &str) -> bool {
    contains_ignore_case(RESERVED_USERNAMES, username)
}

/// Returns true if `password` is on the common-password list, ignoring case.
#[must_use]
pub fn is_common_password(password: &str) -> bool {
    contains_ignore_case(COMMON_PASSWORDS, password)
}

/// Returns true if `email` ends with an allowed suffix, ignoring case.
#[must_use]
pub fn has_allowed_email_suffix(email: &str) -> bool {
    let lowered = email.to_lowercase();
    ALLOWED_EMAIL_SUFFIXES
        .iter()
        .any(|suffix| lowered.ends_with(suffix))
}

fn contains_ignore_case(table: &[&str], value: &str) -> bool {
    let lowered = value.to_lowercase();
    table.iter().any(|entry| *entry == lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_usernames_ignore_case() {
        assert!(is_reserved_username("admin"));
        assert!(is_reserved_username("ROOT"));
        assert!(is_reserved_username("SuperUser"));
        assert!(!is_reserved_username("administrator"));
        assert!(!is_reserved_username(""));
    }

    #[test]
    fn test_common_passwords_require_exact_match() {
        assert!(is_common_password("Password123"));
        assert!(is_common_password("FOOTBALL"));
        assert!(!is_common_password("football1"));
        assert!(!is_common_password("my-qwerty"));
    }

    #[test]
    fn test_email_suffix_is_literal() {
        assert!(has_allowed_email_suffix("alice@uni.edu"));
        assert!(has_allowed_email_suffix("bob@ox.AC.UK"));
        assert!(has_allowed_email_suffix("carol@wiki.org"));
        assert!(!has_allowed_email_suffix("dave@corp.com"));
        assert!(!has_allowed_email_suffix("eve@uni.edu.evil.com"));
        assert!(!has_allowed_email_suffix("frank@uni.edu "));
    }

    #[test]
    fn test_tables_are_lowercase() {
        for entry in RESERVED_USERNAMES.iter().chain(COMMON_PASSWORDS) {
            assert_eq!(*entry, entry.to_lowercase());
        }
    }
}
