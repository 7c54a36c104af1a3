//! End-to-end matcher tests through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use probar_render::prelude::*;
use probar_render::{overlay, GenericMatchers, MatcherSet, NoFallback, StyleQuery, Subject};
use serde_json::{json, Map, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn todo_list() -> TreeWrapper {
    let item = ComponentType::new("TodoItem");
    TreeWrapper::new(
        Element::component(ComponentType::new("TodoList"))
            .prop("title", "Chores")
            .prop("filter", json!({"done": false}))
            .class_name("todo-list compact")
            .style(json!({"display": "grid", "gap": 4}))
            .child(Element::host("h2").class_name("title").text("Chores"))
            .child(
                Element::host("ul")
                    .child(
                        Element::component(item.clone())
                            .prop("id", 1)
                            .prop("done", false)
                            .text("Dishes"),
                    )
                    .child(
                        Element::component(item)
                            .prop("id", 2)
                            .prop("done", true)
                            .text("Laundry"),
                    ),
            )
            .child(Element::host("button").prop("type", "submit").text("Add")),
    )
    .with_state("draft", "")
    .with_state("items", json!([1, 2]))
    .with_context("user", json!({"name": "ada"}))
}

// ============================================================================
// Props
// ============================================================================

#[test]
fn props_presence_and_value() {
    init_tracing();
    let w = todo_list();
    expect(&w).has_prop("title").unwrap();
    expect(&w).has_prop_value("filter", json!({"done": false})).unwrap();
    expect(&w).not().has_prop_value("filter", json!({"done": true})).unwrap();
    expect(&w).not().has_prop("hidden").unwrap();

    let err = expect(&w).has_prop("hidden").unwrap_err();
    assert_eq!(err.to_string(), r#"Expected TodoList to have prop "hidden""#);
}

#[test]
fn props_subset() {
    let w = todo_list();
    expect(&w)
        .has_props(json!({"title": "Chores", "filter": {"done": false}}))
        .unwrap();
    let err = expect(&w).has_props(json!({"title": "Errands"})).unwrap_err();
    assert_eq!(err.expected(), Some(&json!({"title": "Errands"})));
    assert_eq!(err.actual(), Some(&json!({"title": "Chores"})));
}

#[test]
fn props_subset_rejects_non_objects_even_when_negated() {
    let w = todo_list();
    assert!(expect(&w).has_props(json!(["title"])).unwrap_err().is_invalid_argument());
    assert!(expect(&w)
        .not()
        .has_props(json!(["title"]))
        .unwrap_err()
        .is_invalid_argument());
}

// ============================================================================
// Classes, styles, state, context
// ============================================================================

#[test]
fn classes() {
    let w = todo_list();
    expect(&w).has_class("compact").unwrap();
    let err = expect(&w).not().has_class("compact").unwrap_err();
    assert_eq!(err.expected(), Some(&json!(["todo-list"])));
    assert_eq!(err.actual(), Some(&json!(["todo-list", "compact"])));
}

#[test]
fn styles() {
    let w = todo_list();
    expect(&w).has_style("gap").unwrap();
    expect(&w).has_style_value("display", "grid").unwrap();
    expect(&w).has_styles(json!({"display": "grid", "gap": 4})).unwrap();
    expect(&w).not().has_style_value("gap", 8).unwrap();
    expect(&w)
        .has_style_query(&StyleQuery::Property {
            name: "display".into(),
            value: None,
        })
        .unwrap();
    assert!(expect(&w).has_styles(json!("display: grid")).unwrap_err().is_invalid_argument());
}

#[test]
fn state_and_context() {
    let mut w = todo_list();
    expect(&w).has_state(json!({"draft": ""})).unwrap();
    w.set_state("draft", "Groceries");
    expect(&w).not().has_state(json!({"draft": ""})).unwrap();
    expect(&w).has_context_value("user", json!({"name": "ada"})).unwrap();
    expect(&w).not().has_context("locale").unwrap();
}

// ============================================================================
// Rendering, type, existence, containment
// ============================================================================

#[test]
fn rendered_output() {
    let w = todo_list();
    expect(&w).has_rendered().unwrap();

    let nothing = TreeWrapper::new(Node::Null);
    expect(&nothing).not().has_rendered().unwrap();
    expect(&nothing).has_rendered_node(&Node::Null).unwrap();

    let button = w.find(&Selector::pattern("button"));
    let expected: Node = Element::host("button").prop("type", "submit").text("Add").into();
    expect(&button).has_rendered_node(&expected).unwrap();
    let other: Node = Element::host("button").text("Add").into();
    expect(&button).not().has_rendered_node(&other).unwrap();
}

#[test]
fn rendered_output_on_empty_wrapper() {
    let empty = TreeWrapper::empty();
    let node: Node = Element::host("p").into();
    expect(&empty).not().has_rendered().unwrap();
    assert!(expect(&empty).has_rendered_node(&node).is_err());
    let err = expect(&empty).not().has_rendered_node(&node).unwrap_err();
    assert!(err.to_string().contains("nothing was rendered"));
}

#[test]
fn type_checks() {
    let w = todo_list();
    expect(&w).is_a(ComponentType::new("TodoList")).unwrap();
    expect(&w).not().is_a("div").unwrap();
    let err = expect(&w).is_an("input").unwrap_err();
    assert_eq!(err.to_string(), "Expected TodoList to be an input");
}

#[test]
fn existence() {
    let w = todo_list();
    expect(&w).exists().unwrap();
    expect(&w.find(&Selector::pattern(".missing"))).not().exists().unwrap();
}

#[test]
fn containment() {
    let w = todo_list();
    expect(&w).contains("h2.title").unwrap();
    expect(&w).contains(ComponentType::new("TodoItem")).unwrap();
    expect(&w)
        .contains(Selector::attributes(json!({"id": 2, "done": true})))
        .unwrap();
    expect(&w).contains(r#"button[type="submit"]"#).unwrap();
    expect(&w).not().contains("li").unwrap();
    expect(&w).contains_exactly(ComponentType::new("TodoItem"), 2).unwrap();
    expect(&w).has_text("ChoresDishesLaundryAdd").unwrap();

    let err = expect(&w).contains("ul li").unwrap_err();
    assert!(err.is_invalid_argument());
}

// ============================================================================
// Fallback behavior
// ============================================================================

#[test]
fn plain_values_match_generic_set() {
    let values = [
        json!("abc"),
        json!(""),
        json!([1, 2, "b"]),
        json!(0),
        json!(null),
        json!({"a": 1, "b": {"c": true}}),
    ];
    let needles = [
        Selector::pattern("b"),
        Selector::attributes(json!({"a": 1})),
        Selector::attributes(json!(1)),
        Selector::component(ComponentType::new("Item")),
    ];
    for value in &values {
        let via_overlay = expect_value(value);
        let direct = Expect::with_matchers(Subject::value(value), GenericMatchers);
        for negated in [false, true] {
            let (a, b) = if negated {
                (via_overlay.not(), direct.not())
            } else {
                (via_overlay, direct)
            };
            let label = format!("{}{value}", if negated { "not " } else { "" });
            assert_eq!(a.exists().map(|_| ()), b.exists().map(|_| ()), "exists {label}");
            for ty in ["string", "array", "object", "number", "null", "boolean"] {
                assert_eq!(a.is_a(ty).map(|_| ()), b.is_a(ty).map(|_| ()), "is_a {ty} {label}");
                assert_eq!(a.is_an(ty).map(|_| ()), b.is_an(ty).map(|_| ()), "is_an {ty} {label}");
            }
            for needle in &needles {
                assert_eq!(
                    a.contains(needle.clone()).map(|_| ()),
                    b.contains(needle.clone()).map(|_| ()),
                    "contains {needle} {label}"
                );
            }
        }
    }
}

#[test]
fn plain_value_contains_cases() {
    expect_value(&json!("abc")).contains("b").unwrap();
    expect_value(&json!([1, "b"])).contains("b").unwrap();
    expect_value(&json!([{"a": 1}])).contains(Selector::attributes(json!({"a": 1}))).unwrap();
    expect_value(&json!({"a": 1, "b": 2}))
        .contains(Selector::attributes(json!({"a": 1})))
        .unwrap();
    expect_value(&json!({"a": 1})).not().contains(Selector::attributes(json!({"a": 2}))).unwrap();
    assert!(expect_value(&json!(0)).contains("0").unwrap_err().is_invalid_argument());
    assert!(expect_value(&json!(0)).not().contains("0").unwrap_err().is_invalid_argument());
}

#[test]
fn plain_values_without_fallback_are_unsupported() {
    let value = json!("abc");
    let e = Expect::with_matchers(Subject::value(&value), overlay(NoFallback));
    for result in [
        e.exists().map(|_| ()),
        e.not().exists().map(|_| ()),
        e.contains("a").map(|_| ()),
        e.has_class("a").map(|_| ()),
    ] {
        let err = result.unwrap_err();
        assert!(err.is_unsupported_subject());
        assert!(err.to_string().contains("is not a supported wrapper"));
    }
}

// ============================================================================
// Other wrapper implementations
// ============================================================================

/// Minimal wrapper backed by a JSON snapshot, unrelated to `TreeWrapper`
struct SnapshotWrapper {
    snapshot: Value,
}

impl SnapshotWrapper {
    fn field(&self, name: &str) -> Map<String, Value> {
        self.snapshot
            .get(name)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

impl RenderedWrapper for SnapshotWrapper {
    fn len(&self) -> usize {
        usize::from(!self.snapshot.is_null())
    }

    fn props(&self) -> Map<String, Value> {
        self.field("props")
    }

    fn state(&self, key: &str) -> Option<Value> {
        self.field("state").get(key).cloned()
    }

    fn context(&self, _key: &str) -> Option<Value> {
        None
    }

    fn styles(&self) -> Map<String, Value> {
        Map::new()
    }

    fn classes(&self) -> Vec<String> {
        vec!["snapshot".to_string()]
    }

    fn count(&self, _selector: &Selector) -> usize {
        0
    }

    fn equals(&self, _expected: &Node) -> bool {
        false
    }

    fn name(&self) -> String {
        "Snapshot".to_string()
    }

    fn is(&self, ty: &TypeRef) -> bool {
        ty.display_name() == "Snapshot"
    }

    fn text(&self) -> String {
        String::new()
    }

    fn debug(&self) -> String {
        self.snapshot.to_string()
    }
}

#[test]
fn any_wrapper_implementation_is_accepted() {
    let w = SnapshotWrapper {
        snapshot: json!({"props": {"size": 3}, "state": {"ready": true}}),
    };
    expect(&w).has_prop_value("size", 3).unwrap();
    expect(&w).has_state(json!({"ready": true})).unwrap();
    expect(&w).has_class("snapshot").unwrap();
    expect(&w).is_a("Snapshot").unwrap();
    expect(&w).not().contains("anything").unwrap();
}

#[test]
fn custom_base_set_is_consulted_for_plain_values() {
    #[derive(Debug, Clone, Copy)]
    struct AlwaysPass;

    impl MatcherSet for AlwaysPass {
        fn apply(
            &self,
            _subject: Subject<'_>,
            _call: &probar_render::Call<'_>,
            _negated: bool,
            _config: &MatcherConfig,
        ) -> Option<AssertionResult<()>> {
            Some(Ok(()))
        }
    }

    let value = json!(null);
    let e = Expect::with_matchers(Subject::value(&value), overlay(AlwaysPass));
    e.has_class("anything").unwrap();
    e.not().has_class("anything").unwrap();

    let w = todo_list();
    let e = Expect::with_matchers(Subject::wrapper(&w), overlay(AlwaysPass));
    assert!(e.has_class("anything").is_err());
}
