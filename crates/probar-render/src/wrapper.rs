//! The wrapper capability contract and its in-memory implementation.
//!
//! Matchers never look at a concrete wrapper type. Anything implementing
//! [`RenderedWrapper`] is accepted, which lets several inspection backends
//! (or several versions of one) coexist in the same test binary.

use serde_json::{Map, Value};
use std::fmt;

use crate::config::MatcherConfig;
use crate::inspect;
use crate::selector::Selector;
use crate::tree::{ComponentType, ElementKind, Node};

/// Operations a rendered-tree wrapper exposes to matchers.
///
/// Single-node reads (`props`, `classes`, `styles`, `is`) look at the first
/// wrapped node. Implementations are not required to be `Send` or `Sync`;
/// a wrapper is inspected by one assertion at a time.
pub trait RenderedWrapper {
    /// Number of wrapped nodes
    fn len(&self) -> usize;

    /// Whether no node is wrapped
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Props of the first node
    fn props(&self) -> Map<String, Value>;

    /// A named state value of the root component instance
    fn state(&self, key: &str) -> Option<Value>;

    /// A named context value of the root component instance
    fn context(&self, key: &str) -> Option<Value>;

    /// Inline styles of the first node
    fn styles(&self) -> Map<String, Value>;

    /// CSS classes of the first node
    fn classes(&self) -> Vec<String>;

    /// Number of descendants matching a selector
    fn count(&self, selector: &Selector) -> usize;

    /// Structural equality of the wrapped tree against `expected`
    fn equals(&self, expected: &Node) -> bool;

    /// Human-readable name of the wrapped node
    fn name(&self) -> String;

    /// Whether the first node is of the given type
    fn is(&self, ty: &TypeRef) -> bool;

    /// Rendered text content
    fn text(&self) -> String;

    /// Multi-line dump of the wrapped tree
    fn debug(&self) -> String;
}

/// Type reference for `is_a` / `is_an`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Host tag for wrappers, JSON type name for plain values
    Named(String),
    /// Component type
    Component(ComponentType),
}

impl TypeRef {
    /// Name shown in messages
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Component(component) => component.display_name(),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<ComponentType> for TypeRef {
    fn from(component: ComponentType) -> Self {
        Self::Component(component)
    }
}

impl From<&ComponentType> for TypeRef {
    fn from(component: &ComponentType) -> Self {
        Self::Component(component.clone())
    }
}

/// The value an assertion is made about
#[derive(Clone, Copy)]
pub enum Subject<'a> {
    /// A rendered-tree wrapper
    Wrapper(&'a dyn RenderedWrapper),
    /// Any other value
    Value(&'a Value),
}

impl<'a> Subject<'a> {
    /// Wrap a rendered-tree wrapper
    #[must_use]
    pub fn wrapper(wrapper: &'a dyn RenderedWrapper) -> Self {
        Self::Wrapper(wrapper)
    }

    /// Wrap a plain value
    #[must_use]
    pub const fn value(value: &'a Value) -> Self {
        Self::Value(value)
    }

    /// The wrapper, when the subject is one
    #[must_use]
    pub fn as_wrapper(&self) -> Option<&'a dyn RenderedWrapper> {
        match *self {
            Self::Wrapper(wrapper) => Some(wrapper),
            Self::Value(_) => None,
        }
    }

    /// The plain value, when the subject is one
    #[must_use]
    pub const fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Self::Value(value) => Some(value),
            Self::Wrapper(_) => None,
        }
    }

    /// Name used as the grammatical subject of failure messages
    #[must_use]
    pub fn label(&self, config: &MatcherConfig) -> String {
        match self {
            Self::Wrapper(wrapper) => wrapper.name(),
            Self::Value(value) => inspect::stringify(value, config.max_inspect_len),
        }
    }

    /// Short description used when a matcher rejects the subject
    #[must_use]
    pub fn describe(&self, config: &MatcherConfig) -> String {
        match self {
            Self::Wrapper(wrapper) => format!("wrapper {}", wrapper.name()),
            Self::Value(value) => inspect::describe(value, config.max_inspect_len),
        }
    }
}

impl fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapper(wrapper) => f.debug_tuple("Wrapper").field(&wrapper.name()).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// In-memory wrapper over rendered nodes.
///
/// Holds the nodes a render (or a `find`) produced, plus the state and
/// context of the root component instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeWrapper {
    nodes: Vec<Node>,
    state: Map<String, Value>,
    context: Map<String, Value>,
}

impl TreeWrapper {
    /// Wrap a single rendered root
    #[must_use]
    pub fn new(root: impl Into<Node>) -> Self {
        Self::from_nodes(vec![root.into()])
    }

    /// Wrap several nodes
    #[must_use]
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    /// A wrapper around nothing
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set one state value
    #[must_use]
    pub fn with_state(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state.insert(key.into(), value.into());
        self
    }

    /// Set one context value
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Replace a state value in place
    pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.insert(key.into(), value.into());
    }

    /// Wrapped nodes
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Descendants matching `selector`, in pre-order.
    ///
    /// An invalid selector yields an empty wrapper. The result carries no
    /// state or context.
    #[must_use]
    pub fn find(&self, selector: &Selector) -> Self {
        let Ok(compiled) = selector.compile() else {
            return Self::empty();
        };
        let nodes = self
            .nodes
            .iter()
            .filter_map(Node::as_element)
            .flat_map(|root| root.descendants())
            .filter(|element| compiled.matches(element))
            .map(|element| Node::Element(element.clone()))
            .collect();
        Self::from_nodes(nodes)
    }

    fn first_element(&self) -> Option<&crate::tree::Element> {
        self.nodes.first().and_then(Node::as_element)
    }
}

impl RenderedWrapper for TreeWrapper {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn props(&self) -> Map<String, Value> {
        self.first_element()
            .map(|element| element.props.clone())
            .unwrap_or_default()
    }

    fn state(&self, key: &str) -> Option<Value> {
        self.state.get(key).cloned()
    }

    fn context(&self, key: &str) -> Option<Value> {
        self.context.get(key).cloned()
    }

    fn styles(&self) -> Map<String, Value> {
        self.first_element()
            .map(crate::tree::Element::styles)
            .unwrap_or_default()
    }

    fn classes(&self) -> Vec<String> {
        self.first_element()
            .map(crate::tree::Element::classes)
            .unwrap_or_default()
    }

    fn count(&self, selector: &Selector) -> usize {
        self.find(selector).len()
    }

    fn equals(&self, expected: &Node) -> bool {
        matches!(self.nodes.as_slice(), [only] if only == expected)
    }

    fn name(&self) -> String {
        match self.nodes.first() {
            None => "[empty wrapper]".to_string(),
            Some(Node::Element(element)) => element.name().to_string(),
            Some(Node::Text(_)) => "#text".to_string(),
            Some(Node::Null) => "null".to_string(),
        }
    }

    fn is(&self, ty: &TypeRef) -> bool {
        let Some(element) = self.first_element() else {
            return false;
        };
        match (ty, &element.kind) {
            (TypeRef::Named(name), ElementKind::Host(tag)) => name == tag,
            (TypeRef::Component(expected), ElementKind::Component(actual)) => expected == actual,
            _ => false,
        }
    }

    fn text(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    fn debug(&self) -> String {
        self.nodes
            .iter()
            .map(Node::pretty)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
