//! Email rules: address syntax, then the domain-suffix allowlist.
//!
//! The suffix rule is a literal `ends_with` on the lowercased address. It
//! does not parse the domain, so any host under an allowed suffix passes.

use crate::error::ErrorKind;
use crate::rules::{ErrorReporting, Rule, evaluate};
use crate::tables::has_allowed_email_suffix;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// Email rules, in evaluation order. Each receives the trimmed value.
pub const EMAIL_RULES: &[Rule<str>] = &[check_format, check_domain];

/// Fails unless `email` is a plausible `local@domain` address.
///
/// Checks:
/// - exactly one `@`, at most 254 characters overall
/// - local part of 1-64 characters from `[A-Za-z0-9._%+-]`, no leading,
///   trailing or doubled dots
/// - a dotted domain of `[A-Za-z0-9-]` labels, none empty or hyphen-edged,
///   with a TLD of at least two characters
pub fn check_format(email: &str) -> Option<ErrorKind> {
    (!is_well_formed(email)).then_some(ErrorKind::Format)
}

/// Fails unless the lowercased address ends with an allowed suffix.
pub fn check_domain(email: &str) -> Option<ErrorKind> {
    (!has_allowed_email_suffix(email)).then_some(ErrorKind::DomainNotAllowed)
}

fn is_well_formed(email: &str) -> bool {
    if email.is_empty() || email.chars().count() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    let local_ok = !local.is_empty()
        && local.len() <= MAX_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    labels_ok && labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// The part of an address before the first `@`, or the whole value if
/// there is none.
#[must_use]
pub fn local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

/// Validates a raw email address.
///
/// # Returns
///
/// The trimmed address on success, or the failing rules per `reporting`.
///
/// # Examples
///
/// ```
/// use registration::{ErrorKind, ErrorReporting, email::validate_email};
///
/// assert_eq!(validate_email(" alice@uni.edu ", ErrorReporting::FirstPerField), Ok("alice@uni.edu"));
/// assert_eq!(
///     validate_email("bob@corp.com", ErrorReporting::FirstPerField),
///     Err(vec![ErrorKind::DomainNotAllowed])
/// );
/// ```
pub fn validate_email(raw: &str, reporting: ErrorReporting) -> Result<&str, Vec<ErrorKind>> {
    let trimmed = raw.trim();
    let failures = evaluate(EMAIL_RULES, trimmed, reporting);
    if failures.is_empty() {
        Ok(trimmed)
    } else {
        Err(failures)
    }
}
