//! Append-only audit trail of registration attempts.
//!
//! Each attempt becomes one `tracing` event under [`AUDIT_TARGET`]; a
//! dedicated layer routes only that target into the audit file. Writing is
//! best-effort and never influences the HTTP response.

use axum::http::HeaderMap;
use registration::ValidationResult;
use std::fs::{File, OpenOptions};
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Level, Subscriber, info};
use tracing_subscriber::Layer as _;
use tracing_subscriber::filter::{Filtered, Targets};
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::registry::LookupSpan;

pub const AUDIT_TARGET: &str = "registration::audit";

pub type AuditLayer<S> =
    Filtered<tracing_subscriber::fmt::Layer<S, DefaultFields, Format, Mutex<File>>, Targets, S>;

/// Builds a layer that appends audit events, and nothing else, to `path`.
pub fn audit_layer<S>(path: &Path) -> io::Result<AuditLayer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(Targets::new().with_target(AUDIT_TARGET, Level::INFO)))
}

/// Network origin of a request: the first `X-Forwarded-For` hop if present,
/// otherwise the TCP peer address.
pub fn client_origin(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map_or_else(|| peer.ip().to_string(), str::to_owned)
}

/// `field:code` pairs of a rejection, comma separated.
pub fn error_summary(result: &ValidationResult) -> String {
    result
        .errors()
        .iter()
        .map(|err| format!("{}:{}", err.field, err.kind.code()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes the audit line for one attempt.
pub fn record_attempt(result: &ValidationResult, client: &str) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match result {
        ValidationResult::Accepted(accepted) => info!(
            target: AUDIT_TARGET,
            %timestamp,
            outcome = "accepted",
            username = %accepted.username,
            %client,
            "registration attempt"
        ),
        ValidationResult::Rejected { .. } => info!(
            target: AUDIT_TARGET,
            %timestamp,
            outcome = "rejected",
            errors = %error_summary(result),
            %client,
            "registration attempt"
        ),
    }
}
