//! Render predicates for wrapper subjects.
//!
//! Each predicate validates its arguments, reads the actual value from the
//! wrapper, builds the expected value and lets [`Report::check`] decide pass
//! or fail for the current polarity.

use serde_json::{Map, Value};

use super::report::Report;
use super::{Call, StyleQuery};
use crate::config::MatcherConfig;
use crate::inspect::{keyed, quote, truncate, type_name};
use crate::result::{AssertionError, AssertionResult};
use crate::selector::Selector;
use crate::tree::Node;
use crate::wrapper::{RenderedWrapper, Subject, TypeRef};

pub(super) fn evaluate(
    subject: Subject<'_>,
    wrapper: &dyn RenderedWrapper,
    call: &Call<'_>,
    negated: bool,
    config: &MatcherConfig,
) -> AssertionResult<()> {
    let report = Report::new(subject, negated, config);
    match *call {
        Call::HasProp { name, value } => {
            let props = wrapper.props();
            keyed_value(&report, "prop", name, props.get(name), value)
        }
        Call::HasProps(expected) => {
            let props = wrapper.props();
            subset(&report, "has_props", "props", expected, |key| props.get(key).cloned())
        }
        Call::HasClass(class) => has_class(&report, wrapper, class),
        Call::HasState(expected) => {
            subset(&report, "has_state", "state", expected, |key| wrapper.state(key))
        }
        Call::HasContext { name, value } => {
            let actual = wrapper.context(name);
            keyed_value(&report, "context", name, actual.as_ref(), value)
        }
        Call::HasStyle(query) => has_style(&report, wrapper, query),
        Call::HasRendered(expected) => has_rendered(&report, wrapper, expected),
        Call::HasText(text) => {
            let actual = wrapper.text();
            report.check(
                actual == text,
                || format!("have text {}", quote(text)),
                Some(Value::String(text.to_string())),
                Some(Value::String(actual)),
            )
        }
        Call::IsA { ty, article } => is_a(&report, wrapper, ty, article.as_str()),
        Call::Exists => report.check(!wrapper.is_empty(), || "exist".to_string(), None, None),
        Call::Contains(selector) => {
            let count = count(wrapper, selector, "contains")?;
            report.check(
                count > 0,
                || format!("contain {selector}"),
                None,
                Some(Value::from(count)),
            )
        }
        Call::ContainsExactly { selector, count: expected } => {
            let actual = count(wrapper, selector, "contains_exactly")?;
            report.check(
                actual == expected,
                || format!("contain exactly {expected} of {selector}"),
                Some(Value::from(expected)),
                Some(Value::from(actual)),
            )
        }
    }
}

/// Presence and optional deep equality of one named value.
///
/// Presence is only asserted when not negated or when no value is given,
/// so `not has_prop("x", v)` passes for a missing `x`.
fn keyed_value(
    report: &Report<'_>,
    kind: &str,
    name: &str,
    actual: Option<&Value>,
    expected: Option<&Value>,
) -> AssertionResult<()> {
    if !report.negated() || expected.is_none() {
        report.check(
            actual.is_some(),
            || format!("have {kind} {}", quote(name)),
            None,
            None,
        )?;
    }
    if let Some(expected) = expected {
        report.check(
            actual == Some(expected),
            || {
                format!(
                    "have {kind} {} equal to {}",
                    quote(name),
                    report.show(expected)
                )
            },
            Some(keyed(name, Some(expected))),
            Some(keyed(name, actual)),
        )?;
    }
    Ok(())
}

/// Deep equality of the wrapper's values for the keys of `expected`
fn subset(
    report: &Report<'_>,
    matcher: &'static str,
    kind: &str,
    expected: &Value,
    lookup: impl Fn(&str) -> Option<Value>,
) -> AssertionResult<()> {
    let Value::Object(expected) = expected else {
        return Err(AssertionError::invalid_argument(
            matcher,
            format!("expected an object of {kind}, got {}", type_name(expected)),
        ));
    };
    let actual: Map<String, Value> = expected
        .keys()
        .filter_map(|key| lookup(key).map(|value| (key.clone(), value)))
        .collect();
    report.check(
        actual == *expected,
        || {
            format!(
                "have {kind} {}",
                report.show(&Value::Object(expected.clone()))
            )
        },
        Some(Value::Object(expected.clone())),
        Some(Value::Object(actual)),
    )
}

fn has_class(report: &Report<'_>, wrapper: &dyn RenderedWrapper, class: &str) -> AssertionResult<()> {
    let classes = wrapper.classes();
    let present = classes.iter().any(|c| c == class);
    let expected: Vec<String> = if report.negated() {
        classes.iter().filter(|c| *c != class).cloned().collect()
    } else if present {
        classes.clone()
    } else {
        classes.iter().cloned().chain([class.to_string()]).collect()
    };
    report.check(
        present,
        || format!("have class {}", quote(class)),
        Some(Value::from(expected)),
        Some(Value::from(classes)),
    )
}

fn has_style(
    report: &Report<'_>,
    wrapper: &dyn RenderedWrapper,
    query: &StyleQuery,
) -> AssertionResult<()> {
    let styles = wrapper.styles();
    match query {
        StyleQuery::Property { name, value } => {
            keyed_value(report, "style", name, styles.get(name), value.as_ref())
        }
        StyleQuery::Map(expected) => subset(report, "has_style", "styles", expected, |key| {
            styles.get(key).cloned()
        }),
    }
}

/// Rules are applied in order; the first one that applies decides.
fn has_rendered(
    report: &Report<'_>,
    wrapper: &dyn RenderedWrapper,
    expected: Option<&Node>,
) -> AssertionResult<()> {
    if report.negated() && wrapper.is_empty() {
        if let Some(node) = expected {
            return Err(report.fail(
                format!(
                    "Expected {} to not have rendered {}, but nothing was rendered",
                    report.label(),
                    node
                ),
                None,
                None,
            ));
        }
    }

    let Some(node) = expected else {
        let rendered = !wrapper.is_empty() && !wrapper.equals(&Node::Null);
        return report.check(rendered, || "have rendered".to_string(), None, None);
    };

    let actual = if wrapper.is_empty() {
        Value::Null
    } else {
        Value::String(wrapper.debug())
    };
    report.check(
        !wrapper.is_empty() && wrapper.equals(node),
        || {
            format!(
                "have rendered {}",
                truncate(node.to_string(), report.config().max_inspect_len)
            )
        },
        Some(Value::String(node.pretty())),
        Some(actual),
    )
}

fn is_a(
    report: &Report<'_>,
    wrapper: &dyn RenderedWrapper,
    ty: &TypeRef,
    article: &str,
) -> AssertionResult<()> {
    report.check(
        wrapper.is(ty),
        || format!("be {article} {}", ty.display_name()),
        Some(Value::String(ty.display_name().to_string())),
        Some(Value::String(wrapper.name())),
    )
}

fn count(
    wrapper: &dyn RenderedWrapper,
    selector: &Selector,
    matcher: &'static str,
) -> AssertionResult<usize> {
    selector
        .compile()
        .map_err(|e| AssertionError::invalid_argument(matcher, e.to_string()))?;
    Ok(wrapper.count(selector))
}
