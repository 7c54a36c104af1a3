//! Matcher configuration.
//!
//! Controls how failure messages are rendered. Has no effect on whether a
//! matcher passes.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default maximum length of a stringified value in a message
pub const DEFAULT_MAX_INSPECT_LEN: usize = 120;

/// Environment variable overriding [`MatcherConfig::max_inspect_len`]
pub const ENV_MAX_INSPECT_LEN: &str = "PROBAR_RENDER_MAX_INSPECT_LEN";

/// Environment variable overriding [`MatcherConfig::include_tree_in_messages`]
pub const ENV_SHOW_TREE: &str = "PROBAR_RENDER_SHOW_TREE";

/// Configuration for matcher failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Values longer than this are truncated in messages
    pub max_inspect_len: usize,
    /// Append the wrapper's debug tree to failure messages
    pub include_tree_in_messages: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl MatcherConfig {
    /// Default configuration, usable in const contexts
    pub const DEFAULT: Self = Self {
        max_inspect_len: DEFAULT_MAX_INSPECT_LEN,
        include_tree_in_messages: false,
    };

    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum stringified value length (minimum 8)
    #[must_use]
    pub fn with_max_inspect_len(mut self, len: usize) -> Self {
        self.max_inspect_len = len.max(8);
        self
    }

    /// Append the wrapper's debug tree to failure messages
    #[must_use]
    pub const fn with_tree_in_messages(mut self, enabled: bool) -> Self {
        self.include_tree_in_messages = enabled;
        self
    }

    /// Build a config from the default, overridden by environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_INSPECT_LEN) {
            match raw.trim().parse::<usize>() {
                Ok(len) => config = config.with_max_inspect_len(len),
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_MAX_INSPECT_LEN, raw, e),
            }
        }
        if let Some(raw) = lookup(ENV_SHOW_TREE) {
            match parse_flag(&raw) {
                Some(flag) => config.include_tree_in_messages = flag,
                None => warn!("Ignoring {}={:?}: expected a boolean", ENV_SHOW_TREE, raw),
            }
        }
        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
