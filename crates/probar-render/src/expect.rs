//! Fluent assertion entry point.
//!
//! ```ignore
//! let wrapper = TreeWrapper::new(Element::host("div").class_name("open"));
//! expect(&wrapper).has_class("open")?.exists()?;
//! expect(&wrapper).not().has_class("closed")?;
//! ```
//!
//! `not()` returns a new `Expect` with the polarity flipped. Nothing is set
//! and later restored, so a failing negated assertion cannot leave state
//! behind for the next one.

use serde_json::Value;

use crate::config::MatcherConfig;
use crate::matchers::{
    Article, Call, GenericMatchers, MatcherSet, StyleQuery, WrapperMatchers, DEFAULT_MATCHERS,
};
use crate::result::{AssertionError, AssertionResult};
use crate::selector::Selector;
use crate::tree::Node;
use crate::wrapper::{RenderedWrapper, Subject, TypeRef};

/// Start an assertion about a rendered wrapper
#[must_use]
pub fn expect(wrapper: &dyn RenderedWrapper) -> Expect<'_> {
    Expect::new(Subject::wrapper(wrapper))
}

/// Start an assertion about a plain value
#[must_use]
pub fn expect_value(value: &Value) -> Expect<'_> {
    Expect::new(Subject::value(value))
}

/// Assertion context for one subject.
///
/// Cheap to copy; every matcher returns `&Self` on success so calls chain.
#[derive(Debug, Clone, Copy)]
pub struct Expect<'a, M = WrapperMatchers<GenericMatchers>> {
    subject: Subject<'a>,
    matchers: M,
    config: MatcherConfig,
    negated: bool,
}

impl<'a> Expect<'a> {
    /// Assertion context using the default matcher set
    #[must_use]
    pub fn new(subject: Subject<'a>) -> Self {
        Self::with_matchers(subject, DEFAULT_MATCHERS)
    }
}

impl<'a, M: MatcherSet> Expect<'a, M> {
    /// Assertion context using a custom matcher set
    #[must_use]
    pub fn with_matchers(subject: Subject<'a>, matchers: M) -> Self {
        Self {
            subject,
            matchers,
            config: MatcherConfig::default(),
            negated: false,
        }
    }

    /// Replace the message configuration
    #[must_use]
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// The same assertion with the polarity flipped
    #[must_use]
    pub fn not(&self) -> Self
    where
        M: Clone,
    {
        Self {
            subject: self.subject,
            matchers: self.matchers.clone(),
            config: self.config,
            negated: !self.negated,
        }
    }

    /// Whether matchers on this context are negated
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// The subject under test
    #[must_use]
    pub const fn subject(&self) -> Subject<'a> {
        self.subject
    }

    fn run(&self, call: &Call<'_>) -> AssertionResult<&Self> {
        match self.matchers.apply(self.subject, call, self.negated, &self.config) {
            Some(result) => result.map(|()| self),
            None => Err(AssertionError::UnsupportedSubject {
                matcher: call.matcher_name(),
                found: self.subject.describe(&self.config),
            }),
        }
    }

    /// Assert a prop is present
    pub fn has_prop(&self, name: &str) -> AssertionResult<&Self> {
        self.run(&Call::HasProp { name, value: None })
    }

    /// Assert a prop deep-equals `value`
    pub fn has_prop_value(&self, name: &str, value: impl Into<Value>) -> AssertionResult<&Self> {
        let value = value.into();
        self.run(&Call::HasProp {
            name,
            value: Some(&value),
        })
    }

    /// Assert the props include every pair of a JSON object
    pub fn has_props(&self, expected: Value) -> AssertionResult<&Self> {
        self.run(&Call::HasProps(&expected))
    }

    /// Assert a CSS class is present
    pub fn has_class(&self, class: &str) -> AssertionResult<&Self> {
        self.run(&Call::HasClass(class))
    }

    /// Assert the state includes every pair of a JSON object
    pub fn has_state(&self, expected: Value) -> AssertionResult<&Self> {
        self.run(&Call::HasState(&expected))
    }

    /// Assert a context value is present
    pub fn has_context(&self, name: &str) -> AssertionResult<&Self> {
        self.run(&Call::HasContext { name, value: None })
    }

    /// Assert a context value deep-equals `value`
    pub fn has_context_value(
        &self,
        name: &str,
        value: impl Into<Value>,
    ) -> AssertionResult<&Self> {
        let value = value.into();
        self.run(&Call::HasContext {
            name,
            value: Some(&value),
        })
    }

    /// Assert an inline style property is present
    pub fn has_style(&self, name: &str) -> AssertionResult<&Self> {
        self.has_style_query(&StyleQuery::Property {
            name: name.to_string(),
            value: None,
        })
    }

    /// Assert an inline style property equals `value`
    pub fn has_style_value(&self, name: &str, value: impl Into<Value>) -> AssertionResult<&Self> {
        self.has_style_query(&StyleQuery::Property {
            name: name.to_string(),
            value: Some(value.into()),
        })
    }

    /// Assert the inline styles include every pair of a JSON object
    pub fn has_styles(&self, expected: Value) -> AssertionResult<&Self> {
        self.has_style_query(&StyleQuery::Map(expected))
    }

    /// Assert an inline style query
    pub fn has_style_query(&self, query: &StyleQuery) -> AssertionResult<&Self> {
        self.run(&Call::HasStyle(query))
    }

    /// Assert something other than `null` was rendered
    pub fn has_rendered(&self) -> AssertionResult<&Self> {
        self.run(&Call::HasRendered(None))
    }

    /// Assert the rendered tree structurally equals `expected`
    pub fn has_rendered_node(&self, expected: &Node) -> AssertionResult<&Self> {
        self.run(&Call::HasRendered(Some(expected)))
    }

    /// Assert the rendered text equals `text`
    pub fn has_text(&self, text: &str) -> AssertionResult<&Self> {
        self.run(&Call::HasText(text))
    }

    /// Assert the subject is of a type ("a" in messages)
    pub fn is_a(&self, ty: impl Into<TypeRef>) -> AssertionResult<&Self> {
        let ty = ty.into();
        self.run(&Call::IsA {
            ty: &ty,
            article: Article::A,
        })
    }

    /// Assert the subject is of a type ("an" in messages)
    pub fn is_an(&self, ty: impl Into<TypeRef>) -> AssertionResult<&Self> {
        let ty = ty.into();
        self.run(&Call::IsA {
            ty: &ty,
            article: Article::An,
        })
    }

    /// Assert the subject exists
    pub fn exists(&self) -> AssertionResult<&Self> {
        self.run(&Call::Exists)
    }

    /// Assert at least one descendant matches `selector`
    pub fn contains(&self, selector: impl Into<Selector>) -> AssertionResult<&Self> {
        let selector = selector.into();
        self.run(&Call::Contains(&selector))
    }

    /// Assert exactly `count` descendants match `selector`
    pub fn contains_exactly(
        &self,
        selector: impl Into<Selector>,
        count: usize,
    ) -> AssertionResult<&Self> {
        let selector = selector.into();
        self.run(&Call::ContainsExactly {
            selector: &selector,
            count,
        })
    }
}
