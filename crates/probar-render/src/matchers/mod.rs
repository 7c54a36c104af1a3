//! Matcher sets and the wrapper overlay.
//!
//! A [`MatcherSet`] answers a [`Call`] for a [`Subject`], or returns `None`
//! when it has no matcher for that call. [`overlay`] wraps a base set so
//! that wrapper subjects are handled by the render predicates and every
//! other subject still reaches the base set unchanged.
//!
//! Negation is an argument, not state: the positive and negated form of a
//! matcher run the same predicate with `negated` set to `false` or `true`.

mod generic;
mod predicates;
mod report;

pub use generic::GenericMatchers;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::MatcherConfig;
use crate::result::{AssertionError, AssertionResult};
use crate::selector::Selector;
use crate::tree::Node;
use crate::wrapper::{Subject, TypeRef};

/// Grammatical article used by `is_a` / `is_an` messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Article {
    /// "a"
    A,
    /// "an"
    An,
}

impl Article {
    /// The article as text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::An => "an",
        }
    }
}

/// Argument of `has_style`
#[derive(Debug, Clone, PartialEq)]
pub enum StyleQuery {
    /// One property, optionally with its expected value
    Property {
        /// CSS property name
        name: String,
        /// Expected value; `None` checks presence only
        value: Option<Value>,
    },
    /// Several properties given as a JSON object
    Map(Value),
}

/// One matcher invocation with its arguments
#[derive(Debug, Clone, Copy)]
pub enum Call<'a> {
    /// Prop presence, optionally with deep value equality
    HasProp {
        /// Prop name
        name: &'a str,
        /// Expected value
        value: Option<&'a Value>,
    },
    /// Subset of props, given as a JSON object
    HasProps(&'a Value),
    /// CSS class membership
    HasClass(&'a str),
    /// Subset of state, given as a JSON object
    HasState(&'a Value),
    /// Context presence, optionally with deep value equality
    HasContext {
        /// Context key
        name: &'a str,
        /// Expected value
        value: Option<&'a Value>,
    },
    /// Inline style check
    HasStyle(&'a StyleQuery),
    /// Rendered output existence or equality
    HasRendered(Option<&'a Node>),
    /// Exact text content
    HasText(&'a str),
    /// Type check
    IsA {
        /// Expected type
        ty: &'a TypeRef,
        /// Article used in the message
        article: Article,
    },
    /// Non-empty wrapper, or truthy value
    Exists,
    /// At least one match for a selector
    Contains(&'a Selector),
    /// Exactly `count` matches for a selector
    ContainsExactly {
        /// Selector to query with
        selector: &'a Selector,
        /// Expected number of matches
        count: usize,
    },
}

impl Call<'_> {
    /// Public matcher name, used in error messages
    #[must_use]
    pub const fn matcher_name(&self) -> &'static str {
        match self {
            Self::HasProp { .. } => "has_prop",
            Self::HasProps(_) => "has_props",
            Self::HasClass(_) => "has_class",
            Self::HasState(_) => "has_state",
            Self::HasContext { .. } => "has_context",
            Self::HasStyle(_) => "has_style",
            Self::HasRendered(_) => "has_rendered",
            Self::HasText(_) => "has_text",
            Self::IsA {
                article: Article::A,
                ..
            } => "is_a",
            Self::IsA {
                article: Article::An,
                ..
            } => "is_an",
            Self::Exists => "exists",
            Self::Contains(_) => "contains",
            Self::ContainsExactly { .. } => "contains_exactly",
        }
    }
}

/// A set of matchers
pub trait MatcherSet {
    /// Run the matcher for `call` against `subject`.
    ///
    /// Returns `None` when this set has no matcher for the call/subject
    /// combination.
    fn apply(
        &self,
        subject: Subject<'_>,
        call: &Call<'_>,
        negated: bool,
        config: &MatcherConfig,
    ) -> Option<AssertionResult<()>>;
}

/// Base set with no matchers at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl MatcherSet for NoFallback {
    fn apply(
        &self,
        _subject: Subject<'_>,
        _call: &Call<'_>,
        _negated: bool,
        _config: &MatcherConfig,
    ) -> Option<AssertionResult<()>> {
        None
    }
}

/// Base set extended with render predicates for wrapper subjects
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapperMatchers<B> {
    base: B,
}

/// The default set: render predicates over the generic matchers
pub const DEFAULT_MATCHERS: WrapperMatchers<GenericMatchers> = WrapperMatchers {
    base: GenericMatchers,
};

/// Augment `base` so that every matcher also handles rendered wrappers.
///
/// Subjects that are not wrappers are delegated to `base`; if `base` has no
/// matcher for the call, the call fails with
/// [`AssertionError::UnsupportedSubject`].
pub const fn overlay<B: MatcherSet>(base: B) -> WrapperMatchers<B> {
    WrapperMatchers { base }
}

impl<B: MatcherSet> MatcherSet for WrapperMatchers<B> {
    fn apply(
        &self,
        subject: Subject<'_>,
        call: &Call<'_>,
        negated: bool,
        config: &MatcherConfig,
    ) -> Option<AssertionResult<()>> {
        if let Some(wrapper) = subject.as_wrapper() {
            trace!(
                "{}{} on wrapper {}",
                if negated { "not." } else { "" },
                call.matcher_name(),
                wrapper.name()
            );
            return Some(predicates::evaluate(subject, wrapper, call, negated, config));
        }

        if let Some(result) = self.base.apply(subject, call, negated, config) {
            debug!("{} delegated to base matchers", call.matcher_name());
            return Some(result);
        }

        debug!("{} has no matcher for {:?}", call.matcher_name(), subject);
        Some(Err(AssertionError::UnsupportedSubject {
            matcher: call.matcher_name(),
            found: subject.describe(config),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tree::Element;
    use crate::wrapper::TreeWrapper;
    use serde_json::json;

    fn run(
        set: &impl MatcherSet,
        subject: Subject<'_>,
        call: &Call<'_>,
        negated: bool,
    ) -> Option<AssertionResult<()>> {
        set.apply(subject, call, negated, &MatcherConfig::default())
    }

    #[test]
    fn test_matcher_names() {
        let ty = TypeRef::from("div");
        assert_eq!(Call::Exists.matcher_name(), "exists");
        assert_eq!(
            Call::IsA {
                ty: &ty,
                article: Article::An
            }
            .matcher_name(),
            "is_an"
        );
        assert_eq!(Call::HasClass("a").matcher_name(), "has_class");
    }

    #[test]
    fn test_no_fallback_answers_nothing() {
        let value = json!(1);
        assert!(run(&NoFallback, Subject::value(&value), &Call::Exists, false).is_none());
    }

    #[test]
    fn test_overlay_routes_wrappers_to_predicates() {
        let wrapper = TreeWrapper::new(Element::host("div").class_name("a"));
        let set = overlay(NoFallback);
        let result = run(&set, Subject::wrapper(&wrapper), &Call::HasClass("a"), false);
        assert_eq!(result, Some(Ok(())));
    }

    #[test]
    fn test_overlay_without_fallback_rejects_values() {
        let value = json!("plain");
        let set = overlay(NoFallback);
        let err = run(&set, Subject::value(&value), &Call::Exists, false)
            .unwrap()
            .unwrap_err();
        assert_eq!(
            err,
            AssertionError::UnsupportedSubject {
                matcher: "exists",
                found: r#"string "plain""#.into(),
            }
        );
    }

    #[test]
    fn test_overlay_delegates_to_base() {
        let value = json!("plain");
        let overlaid = run(&DEFAULT_MATCHERS, Subject::value(&value), &Call::Exists, false);
        let direct = run(&GenericMatchers, Subject::value(&value), &Call::Exists, false);
        assert_eq!(overlaid, direct);
        assert_eq!(overlaid, Some(Ok(())));
    }

    #[test]
    fn test_overlay_rejects_calls_the_base_lacks() {
        let value = json!({"className": "a"});
        let err = run(&DEFAULT_MATCHERS, Subject::value(&value), &Call::HasClass("a"), false)
            .unwrap()
            .unwrap_err();
        assert!(err.is_unsupported_subject());
        assert!(err.to_string().contains("has_class"));
    }

    #[test]
    fn test_overlays_nest() {
        let value = json!(0);
        let set = overlay(overlay(GenericMatchers));
        let err = run(&set, Subject::value(&value), &Call::Exists, false)
            .unwrap()
            .unwrap_err();
        assert!(err.is_mismatch());
    }
}
