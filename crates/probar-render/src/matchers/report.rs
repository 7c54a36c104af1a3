//! Failure message construction shared by all matchers.

use serde_json::Value;

use crate::config::MatcherConfig;
use crate::result::{AssertionError, AssertionResult};
use crate::wrapper::Subject;

/// Polarity-aware failure builder for one matcher call
pub(crate) struct Report<'a> {
    subject: Subject<'a>,
    negated: bool,
    config: &'a MatcherConfig,
}

impl<'a> Report<'a> {
    pub(crate) const fn new(subject: Subject<'a>, negated: bool, config: &'a MatcherConfig) -> Self {
        Self {
            subject,
            negated,
            config,
        }
    }

    pub(crate) const fn negated(&self) -> bool {
        self.negated
    }

    pub(crate) const fn config(&self) -> &MatcherConfig {
        self.config
    }

    /// `"not "` when negated
    pub(crate) const fn not(&self) -> &'static str {
        if self.negated {
            "not "
        } else {
            ""
        }
    }

    /// Pass iff `holds` differs from the negation state.
    ///
    /// `phrase` completes "Expected <subject> to [not ]..." and is only
    /// built on failure.
    pub(crate) fn check(
        &self,
        holds: bool,
        phrase: impl FnOnce() -> String,
        expected: Option<Value>,
        actual: Option<Value>,
    ) -> AssertionResult<()> {
        if holds != self.negated {
            return Ok(());
        }
        let message = format!(
            "Expected {} to {}{}",
            self.subject.label(self.config),
            self.not(),
            phrase()
        );
        Err(self.fail(message, expected, actual))
    }

    /// Build a failure from a complete message
    pub(crate) fn fail(
        &self,
        mut message: String,
        expected: Option<Value>,
        actual: Option<Value>,
    ) -> AssertionError {
        if self.config.include_tree_in_messages {
            if let Some(wrapper) = self.subject.as_wrapper() {
                message.push('\n');
                message.push_str(&wrapper.debug());
            }
        }
        AssertionError::Failed {
            message,
            expected,
            actual,
        }
    }

    /// Render a value for a message
    pub(crate) fn show(&self, value: &Value) -> String {
        crate::inspect::stringify(value, self.config.max_inspect_len)
    }

    pub(crate) fn label(&self) -> String {
        self.subject.label(self.config)
    }
}
