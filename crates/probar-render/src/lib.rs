//! Probar Render: matchers for rendered component trees
//!
//! Extends a generic assertion layer with matchers that understand wrappers
//! around rendered UI components: props, CSS classes, inline styles, state,
//! context, rendered output, text, type and descendant queries. Every
//! matcher has a negated form through [`Expect::not`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Call    ┌──────────────────┐  wrapper?  ┌──────────────┐
//! │ Expect       │──────────►│ WrapperMatchers  │───────────►│ predicates   │
//! │ (negated)    │           │ (overlay)        │            │ (wrapper)    │
//! └──────────────┘           └────────┬─────────┘            └──────────────┘
//!                                     │ other subject
//!                                     ▼
//!                            ┌──────────────────┐
//!                            │ base MatcherSet  │──► None ──► UnsupportedSubject
//!                            │ (GenericMatchers)│
//!                            └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use probar_render::{expect, Element, TreeWrapper};
//! use serde_json::json;
//!
//! let wrapper = TreeWrapper::new(
//!     Element::host("div")
//!         .prop("id", "x")
//!         .prop("open", true)
//!         .class_name("a b"),
//! );
//!
//! expect(&wrapper).has_prop_value("open", true).unwrap();
//! expect(&wrapper).not().has_prop("missing").unwrap();
//!
//! let err = expect(&wrapper).not().has_class("a").unwrap_err();
//! assert_eq!(err.expected(), Some(&json!(["b"])));
//! ```
//!
//! Assertions are synchronous and keep no state between calls. A wrapper is
//! expected to be inspected by one assertion at a time; the crate does not
//! require or provide thread-safety for wrappers.

#![warn(missing_docs)]

mod config;
mod expect;
mod inspect;
mod matchers;
mod result;
mod selector;
mod tree;
mod wrapper;

pub use config::{MatcherConfig, DEFAULT_MAX_INSPECT_LEN, ENV_MAX_INSPECT_LEN, ENV_SHOW_TREE};
pub use expect::{expect, expect_value, Expect};
pub use inspect::{stringify, type_name};
pub use matchers::{
    overlay, Article, Call, GenericMatchers, MatcherSet, NoFallback, StyleQuery, WrapperMatchers,
    DEFAULT_MATCHERS,
};
pub use result::{AssertionError, AssertionResult};
pub use selector::{CompiledSelector, Selector, SelectorError};
pub use tree::{ComponentType, Element, ElementKind, Node, CLASS_NAME_PROP, STYLE_PROP};
pub use wrapper::{RenderedWrapper, Subject, TreeWrapper, TypeRef};

/// Prelude for test modules
pub mod prelude {
    pub use crate::{
        expect, expect_value, AssertionError, AssertionResult, ComponentType, Element, Expect,
        MatcherConfig, Node, RenderedWrapper, Selector, TreeWrapper, TypeRef,
    };
}
