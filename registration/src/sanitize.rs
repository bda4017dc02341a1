//! Allowlist-based markup cleaning for the free-text bio.
//!
//! Disallowed tags are unwrapped (their text is kept) rather than escaped.
//! `script` and `style` are the exception: their content is dropped as
//! well. Only `href` and `title` survive on links, and absolute link
//! targets must use `http`, `https` or `mailto`.

use crate::error::ErrorKind;
use crate::tables::{ALLOWED_TAGS, ALLOWED_TAG_ATTRIBUTES, BIO_MAX_CHARS};
use ammonia::Builder;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static BIO_CLEANER: Lazy<Builder<'static>> = Lazy::new(|| {
    let tag_attributes: HashMap<&str, HashSet<&str>> = ALLOWED_TAG_ATTRIBUTES
        .iter()
        .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
        .collect();

    let mut builder = Builder::empty();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::new())
        .clean_content_tags(HashSet::from(["script", "style"]))
        .url_schemes(HashSet::from(["http", "https", "mailto"]))
        .link_rel(None)
        .strip_comments(true);
    builder
});

/// Fails if the raw bio is longer than 1000 characters.
pub fn check_bio_length(bio: &str) -> Option<ErrorKind> {
    (bio.chars().count() > BIO_MAX_CHARS).then_some(ErrorKind::TooLong)
}

/// Reduces untrusted markup to the allowed subset. Never fails.
///
/// # Examples
///
/// ```
/// use registration::sanitize::sanitize_bio;
///
/// assert_eq!(sanitize_bio("<script>alert(1)</script>Hello"), "Hello");
/// assert_eq!(sanitize_bio("<div><b>Hi</b></div>"), "<b>Hi</b>");
/// ```
#[must_use]
pub fn sanitize_bio(bio: &str) -> String {
    BIO_CLEANER.clean(bio).to_string()
}
