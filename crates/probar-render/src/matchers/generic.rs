//! Generic matchers for plain JSON values.
//!
//! This is the base set the overlay falls back to. It only knows `is_a`,
//! `exists` and `contains`; every render-specific call is answered with
//! `None`.

use serde_json::Value;

use super::report::Report;
use super::{Call, MatcherSet};
use crate::config::MatcherConfig;
use crate::inspect::type_name;
use crate::result::{AssertionError, AssertionResult};
use crate::selector::Selector;
use crate::wrapper::{Subject, TypeRef};

/// Matchers over plain `serde_json::Value` subjects
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericMatchers;

impl MatcherSet for GenericMatchers {
    fn apply(
        &self,
        subject: Subject<'_>,
        call: &Call<'_>,
        negated: bool,
        config: &MatcherConfig,
    ) -> Option<AssertionResult<()>> {
        let value = subject.as_value()?;
        let report = Report::new(subject, negated, config);
        match *call {
            Call::IsA { ty, article } => Some(is_a(
                &report,
                value,
                ty,
                call.matcher_name(),
                article.as_str(),
            )),
            Call::Exists => Some(report.check(truthy(value), || "exist".to_string(), None, None)),
            Call::Contains(selector) => Some(contains(&report, value, selector)),
            _ => None,
        }
    }
}

/// JS-style truthiness
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_a(
    report: &Report<'_>,
    value: &Value,
    ty: &TypeRef,
    matcher: &'static str,
    article: &str,
) -> AssertionResult<()> {
    let TypeRef::Named(expected) = ty else {
        return Err(AssertionError::invalid_argument(
            matcher,
            format!(
                "component type {} can only be checked on a wrapper",
                ty.display_name()
            ),
        ));
    };
    let actual = type_name(value);
    report.check(
        actual == expected,
        || format!("be {article} {expected}"),
        Some(Value::String(expected.clone())),
        Some(Value::String(actual.to_string())),
    )
}

fn contains(report: &Report<'_>, value: &Value, selector: &Selector) -> AssertionResult<()> {
    let needle = match selector {
        Selector::Pattern(text) => Value::String(text.clone()),
        Selector::Attributes(attributes) => attributes.clone(),
        Selector::Component(component) => {
            return Err(AssertionError::invalid_argument(
                "contains",
                format!(
                    "component selector <{}> can only be used on a wrapper",
                    component.display_name()
                ),
            ))
        }
    };

    let found = match (value, &needle) {
        (Value::String(haystack), Value::String(text)) => haystack.contains(text.as_str()),
        (Value::Array(items), needle) => items.contains(needle),
        (Value::Object(map), Value::Object(subset)) => subset
            .iter()
            .all(|(key, expected)| map.get(key) == Some(expected)),
        (other, _) => {
            return Err(AssertionError::invalid_argument(
                "contains",
                format!(
                    "cannot look for {} inside a value of type {}",
                    report.show(&needle),
                    type_name(other)
                ),
            ))
        }
    };

    report.check(
        found,
        || format!("contain {}", report.show(&needle)),
        None,
        None,
    )
}
