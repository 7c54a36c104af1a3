//! Selectors for querying rendered trees.
//!
//! Three forms are supported:
//!
//! - **Pattern**: a compound CSS-like pattern (`div`, `.item`, `#main`,
//!   `button.primary[type="submit"]`, `*`). Combinators are not supported.
//! - **Component**: matches elements of a component type
//! - **Attributes**: matches elements whose props include every pair given

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

use crate::tree::{ComponentType, Element, ElementKind};

/// Selector parse/shape errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Pattern is empty or whitespace
    #[error("selector pattern is empty")]
    Empty,

    /// Pattern could not be parsed
    #[error("invalid selector {pattern:?}: {reason}")]
    Invalid {
        /// The offending pattern
        pattern: String,
        /// What went wrong
        reason: String,
    },

    /// Attribute selector was not an object
    #[error("attribute selector must be an object, got {found}")]
    NotAnObject {
        /// JSON type that was given
        found: &'static str,
    },
}

/// Selector for locating descendants of a wrapper
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Compound pattern (e.g., "button.primary")
    Pattern(String),
    /// Component type
    Component(ComponentType),
    /// Prop subset, given as a JSON object
    Attributes(Value),
}

impl Selector {
    /// Create a pattern selector
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Create a component selector
    #[must_use]
    pub fn component(component: ComponentType) -> Self {
        Self::Component(component)
    }

    /// Create an attribute selector from a JSON object
    #[must_use]
    pub fn attributes(attributes: Value) -> Self {
        Self::Attributes(attributes)
    }

    /// Validate and prepare the selector for matching
    pub fn compile(&self) -> Result<CompiledSelector<'_>, SelectorError> {
        let inner = match self {
            Self::Pattern(pattern) => Compiled::Pattern(CompoundPattern::parse(pattern)?),
            Self::Component(component) => Compiled::Component(component),
            Self::Attributes(Value::Object(map)) => Compiled::Attributes(map),
            Self::Attributes(other) => {
                return Err(SelectorError::NotAnObject {
                    found: crate::inspect::type_name(other),
                })
            }
        };
        Ok(CompiledSelector { inner })
    }
}

impl From<&str> for Selector {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<String> for Selector {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<ComponentType> for Selector {
    fn from(component: ComponentType) -> Self {
        Self::Component(component)
    }
}

impl From<&ComponentType> for Selector {
    fn from(component: &ComponentType) -> Self {
        Self::Component(component.clone())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => write!(f, "{pattern:?}"),
            Self::Component(component) => write!(f, "<{}>", component.display_name()),
            Self::Attributes(attributes) => write!(f, "{attributes}"),
        }
    }
}

/// A validated selector
#[derive(Debug, Clone)]
pub struct CompiledSelector<'a> {
    inner: Compiled<'a>,
}

#[derive(Debug, Clone)]
enum Compiled<'a> {
    Pattern(CompoundPattern),
    Component(&'a ComponentType),
    Attributes(&'a Map<String, Value>),
}

impl CompiledSelector<'_> {
    /// Whether an element matches
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        match &self.inner {
            Compiled::Pattern(pattern) => pattern.matches(element),
            Compiled::Component(component) => {
                matches!(&element.kind, ElementKind::Component(c) if c == *component)
            }
            Compiled::Attributes(attributes) => attributes
                .iter()
                .all(|(name, value)| element.props.get(name) == Some(value)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CompoundPattern {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl CompoundPattern {
    fn parse(pattern: &str) -> Result<Self, SelectorError> {
        let source = pattern.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let invalid = |reason: String| SelectorError::Invalid {
            pattern: pattern.to_string(),
            reason,
        };
        let grammar =
            grammar().map_err(|e| invalid(format!("selector grammar failed to compile: {e}")))?;

        let mut parsed = Self::default();
        let head = grammar.head.find(source).map_or("", |m| m.as_str());
        if !head.is_empty() && head != "*" {
            parsed.tag = Some(head.to_string());
        }

        // Tokens must tile the rest of the pattern; any gap is rejected
        let rest = &source[head.len()..];
        let mut cursor = 0;
        for caps in grammar.token.captures_iter(rest) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() != cursor {
                return Err(invalid(leftover_reason(&rest[cursor..])));
            }
            cursor = whole.end();
            parsed
                .push_token(&caps)
                .map_err(|reason| invalid(reason.to_string()))?;
        }
        if cursor != rest.len() {
            return Err(invalid(leftover_reason(&rest[cursor..])));
        }
        Ok(parsed)
    }

    fn push_token(&mut self, caps: &Captures<'_>) -> Result<(), &'static str> {
        if let Some(class) = caps.name("class") {
            if class.as_str().is_empty() {
                return Err("expected a class name after '.'");
            }
            self.classes.push(class.as_str().to_string());
        } else if let Some(id) = caps.name("id") {
            if id.as_str().is_empty() {
                return Err("expected an id after '#'");
            }
            if self.id.replace(id.as_str().to_string()).is_some() {
                return Err("more than one id");
            }
        } else if let Some(name) = caps.name("attr") {
            if name.as_str().is_empty() {
                return Err("expected an attribute name after '['");
            }
            let value = caps
                .name("double")
                .or_else(|| caps.name("single"))
                .or_else(|| caps.name("bare"))
                .map(|m| m.as_str().to_string());
            self.attributes.push((name.as_str().to_string(), value));
        }
        Ok(())
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.name() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let classes = element.classes();
            if !self.classes.iter().all(|c| classes.contains(c)) {
                return false;
            }
        }
        self.attributes.iter().all(|(name, expected)| {
            match (element.props.get(name), expected) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(Value::String(actual)), Some(expected)) => actual == expected,
                (Some(actual), Some(expected)) => actual.to_string() == *expected,
            }
        })
    }
}

/// Tag or `*` at the start of a compound pattern
const HEAD_PATTERN: &str = r"^(?:\*|[\w-]+)?";

/// One `.class`, `#id` or `[attr]` / `[attr=value]` token
const TOKEN_PATTERN: &str = r#"\.(?P<class>[\w-]*)|#(?P<id>[\w-]*)|\[(?P<attr>[\w-]*)(?:=(?:"(?P<double>[^"]*)"|'(?P<single>[^']*)'|(?P<bare>[\w-]*)))?\]"#;

#[derive(Debug)]
struct Grammar {
    head: Regex,
    token: Regex,
}

fn grammar() -> Result<&'static Grammar, &'static regex::Error> {
    static GRAMMAR: OnceLock<Result<Grammar, regex::Error>> = OnceLock::new();
    GRAMMAR
        .get_or_init(|| {
            Ok(Grammar {
                head: Regex::new(HEAD_PATTERN)?,
                token: Regex::new(TOKEN_PATTERN)?,
            })
        })
        .as_ref()
}

fn leftover_reason(leftover: &str) -> String {
    match leftover.chars().next() {
        Some(c) if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
            "combinators are not supported".to_string()
        }
        Some('[') => "malformed attribute selector".to_string(),
        Some(c) => format!("unexpected character {c:?}"),
        None => "unexpected end of pattern".to_string(),
    }
}
