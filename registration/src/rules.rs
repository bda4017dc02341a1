//! Ordered rule lists and the per-field reporting policy.

use crate::error::ErrorKind;
use std::str::FromStr;

/// A single pure check over a field input. `None` means the rule passed.
pub type Rule<I> = fn(&I) -> Option<ErrorKind>;

/// How many failures a field reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorReporting {
    /// Stop at the first failing rule of each field.
    FirstPerField,
    /// Report every failing rule of each field, in declared order.
    #[default]
    AllPerField,
}

impl ErrorReporting {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstPerField => "first_per_field",
            Self::AllPerField => "all_per_field",
        }
    }

    /// Keeps the failures this policy reports, preserving their order.
    pub fn collect(self, failures: impl Iterator<Item = ErrorKind>) -> Vec<ErrorKind> {
        match self {
            Self::FirstPerField => failures.take(1).collect(),
            Self::AllPerField => failures.collect(),
        }
    }
}

impl FromStr for ErrorReporting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_per_field" => Ok(Self::FirstPerField),
            "all" | "all_per_field" => Ok(Self::AllPerField),
            other => Err(format!("unknown error reporting mode `{other}`")),
        }
    }
}

/// Runs `rules` over `input` in order and collects failures per `reporting`.
pub fn evaluate<I: ?Sized>(
    rules: &[Rule<I>],
    input: &I,
    reporting: ErrorReporting,
) -> Vec<ErrorKind> {
    reporting.collect(rules.iter().filter_map(|rule| rule(input)))
}
