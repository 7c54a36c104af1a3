//! Rendered element trees.
//!
//! A [`Node`] is what a component renders: a host element (`div`, `span`),
//! a child component, a text run, or an explicit `null`. Trees are plain
//! data so they can be built by hand as expected values and compared
//! structurally against what a wrapper holds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Prop holding the space-separated class list
pub const CLASS_NAME_PROP: &str = "className";

/// Prop holding the inline style object
pub const STYLE_PROP: &str = "style";

/// Reference to a component type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentType {
    name: String,
    display_name: Option<String>,
}

impl ComponentType {
    /// Create a component type
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }

    /// Override the name shown in messages
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable name, falling back to the type name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// What kind of element a node is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Host element identified by tag
    Host(String),
    /// Composite component
    Component(ComponentType),
}

/// A rendered element with props and children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element kind
    pub kind: ElementKind,
    /// Props, excluding children
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Create a host element
    #[must_use]
    pub fn host(tag: impl Into<String>) -> Self {
        Self::of_kind(ElementKind::Host(tag.into()))
    }

    /// Create a component element
    #[must_use]
    pub fn component(component: ComponentType) -> Self {
        Self::of_kind(ElementKind::Component(component))
    }

    fn of_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            props: Map::new(),
            children: Vec::new(),
        }
    }

    /// Set a prop
    #[must_use]
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Set the `className` prop
    #[must_use]
    pub fn class_name(self, classes: impl Into<String>) -> Self {
        self.prop(CLASS_NAME_PROP, classes.into())
    }

    /// Set the `style` prop
    #[must_use]
    pub fn style(self, style: Value) -> Self {
        self.prop(STYLE_PROP, style)
    }

    /// Append a child
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Tag of a host element
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Host(tag) => Some(tag),
            ElementKind::Component(_) => None,
        }
    }

    /// Tag for host elements, display name for components
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            ElementKind::Host(tag) => tag,
            ElementKind::Component(component) => component.display_name(),
        }
    }

    /// `id` prop when it is a string
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.props.get("id").and_then(Value::as_str)
    }

    /// Classes from the `className` prop
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.props
            .get(CLASS_NAME_PROP)
            .and_then(Value::as_str)
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Inline styles from the `style` prop
    #[must_use]
    pub fn styles(&self) -> Map<String, Value> {
        match self.props.get(STYLE_PROP) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Descendant elements in pre-order, excluding `self`
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_elements(&mut out);
        }
        out
    }
}

/// A node in a rendered tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Element
    Element(Element),
    /// Text run
    Text(String),
    /// Explicit empty render
    Null,
}

impl Node {
    /// Element behind this node, if any
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Whether this is an explicit `null` render
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Concatenated text of this node and all descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.push_text(out);
                }
            }
            Self::Null => {}
        }
    }

    /// This node and its descendant elements, in pre-order
    pub(crate) fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
        if let Self::Element(element) = self {
            out.push(element);
            for child in &element.children {
                child.collect_elements(out);
            }
        }
    }

    /// Indented multi-line markup
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Element(element) if !element.children.is_empty() => {
                out.push_str(&indent);
                out.push_str(&open_tag(element));
                for child in &element.children {
                    out.push('\n');
                    child.write_pretty(out, depth + 1);
                }
                out.push('\n');
                out.push_str(&indent);
                out.push_str(&format!("</{}>", element.name()));
            }
            other => {
                out.push_str(&indent);
                out.push_str(&other.to_string());
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

fn open_tag(element: &Element) -> String {
    let mut out = format!("<{}", element.name());
    for (name, value) in &element.props {
        match value {
            Value::String(s) => out.push_str(&format!(" {name}={s:?}")),
            other => out.push_str(&format!(" {name}={{{other}}}")),
        }
    }
    out.push('>');
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Null => write!(f, "null"),
            Self::Element(element) if element.children.is_empty() => {
                let open = open_tag(element);
                write!(f, "{} />", &open[..open.len() - 1])
            }
            Self::Element(element) => {
                write!(f, "{}", open_tag(element))?;
                for child in &element.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", element.name())
            }
        }
    }
}
