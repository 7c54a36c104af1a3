//! Result and error types for render matchers.

use serde_json::Value;
use thiserror::Error;

/// Result type for matcher calls
pub type AssertionResult<T> = Result<T, AssertionError>;

/// Errors produced by a failed matcher.
///
/// Every variant is an assertion failure from the test's point of view; the
/// variants only tell apart *why* the assertion could not pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionError {
    /// The check ran and did not hold
    #[error("{message}")]
    Failed {
        /// Human-readable message
        message: String,
        /// Expected value, for diff display
        expected: Option<Value>,
        /// Actual value, for diff display
        actual: Option<Value>,
    },

    /// The matcher was called with arguments of the wrong shape
    #[error("Invalid argument to {matcher}: {message}")]
    InvalidArgument {
        /// Matcher name
        matcher: &'static str,
        /// Error message
        message: String,
    },

    /// The subject is not a wrapper and no fallback matcher handles it
    #[error("{found} is not a supported wrapper for {matcher}")]
    UnsupportedSubject {
        /// Matcher name
        matcher: &'static str,
        /// Short description of the subject
        found: String,
    },
}

impl AssertionError {
    /// Build a failure without diff payloads
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Build an invalid-argument error
    #[must_use]
    pub fn invalid_argument(matcher: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            matcher,
            message: message.into(),
        }
    }

    /// Full message text
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Expected value attached to a failed check
    #[must_use]
    pub fn expected(&self) -> Option<&Value> {
        match self {
            Self::Failed { expected, .. } => expected.as_ref(),
            _ => None,
        }
    }

    /// Actual value attached to a failed check
    #[must_use]
    pub fn actual(&self) -> Option<&Value> {
        match self {
            Self::Failed { actual, .. } => actual.as_ref(),
            _ => None,
        }
    }

    /// Whether the check ran and did not hold
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the matcher rejected its arguments
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Whether the subject could not be handled at all
    #[must_use]
    pub const fn is_unsupported_subject(&self) -> bool {
        matches!(self, Self::UnsupportedSubject { .. })
    }
}
