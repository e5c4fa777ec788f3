//! Write-side tests for the path engine.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::json;
use treepath::container::ContainerError;
use treepath::tree::TreeError;
use treepath::{ErrorKind, Key, Kind, List, Map, Tree, TreeOptions, Value};

use crate::helpers::*;

#[test]
fn test_set_root_keys_and_children() {
    let mut tree = Tree::new(Map::new());

    tree.set("foo", "bar").unwrap();
    assert_eq!(tree.get("foo"), Some(Value::from("bar")));

    let err = tree.set("bar.baz", 234).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParentNotFound);
    assert!(err.is_not_found());

    let mut bar = Map::new();
    bar.insert("baz", 234i64).unwrap();
    tree.set("bar", bar).unwrap();
    tree.set("bar.zoing", 345).unwrap();

    let root = tree.into_inner();
    let bar = root.as_map().unwrap().get(&Key::from("bar")).unwrap();
    assert_eq!(bar.to_json(), json!({"baz": 234, "zoing": 345}));
}

#[test]
fn test_set_appends_to_typed_list() {
    let mut root = Map::new();
    root.insert("strs", List::of(Kind::Text)).unwrap();
    let mut tree = Tree::new(root);

    tree.set("strs.-1", "foo").unwrap();
    assert_eq!(tree.get("strs"), Some(Value::from(vec!["foo"])));
}

#[test]
fn test_set_inside_nested_lists() {
    let mut tree = tree_from_json(json!({"iii": [[["foo"]]]}));
    tree.set("iii.0.0.-1", "bar").unwrap();
    assert_eq!(
        tree.get("iii").map(|v| v.to_json()),
        Some(json!([[["foo", "bar"]]]))
    );
    assert_eq!(tree.root().to_json(), json!({"iii": [[["foo", "bar"]]]}));
}

#[test]
fn test_root_list_rules() {
    let mut shared = Tree::new(List::of(Kind::Text).into_shared());
    shared.set("-1", "bar").unwrap();
    assert_eq!(shared.root(), &Value::from(vec!["bar"]));

    let err = shared.set("key", "bar").unwrap_err();
    assert!(matches!(
        err,
        treepath::Error::Tree(TreeError::InvalidIndexKey { .. })
    ));

    let mut owned = Tree::new(List::of(Kind::Text));
    let err = owned.set("-1", "bar").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnaddressableRoot);
    assert!(owned.root().as_list().unwrap().is_empty());

    let mut scalar = Tree::new("string");
    let err = scalar.set("key", "bar").unwrap_err();
    assert_eq!(
        err,
        treepath::Error::Container(ContainerError::NotAContainer { found: Kind::Text })
    );
}

#[test]
fn test_leading_delimiter_is_a_root_key() {
    let mut tree = Tree::new(Map::new());
    tree.set(".abc", 1).unwrap();
    assert_eq!(tree.get(".abc"), Some(Value::Int(1)));

    // A fresh walk splits on the leading delimiter and misses.
    tree.clear_cache();
    assert_eq!(tree.get(".abc"), None);
    let root = tree.into_inner();
    assert_eq!(
        root.as_map().unwrap().get(&Key::from(".abc")),
        Some(Value::Int(1))
    );
}

#[test]
fn test_by_value_list_chain_from_root_is_unaddressable() {
    let mut tree = tree_from_json(json!([[1]]));
    let err = tree.set("0.-1", 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnaddressableRoot);
    assert_eq!(tree.root().to_json(), json!([[1]]));

    // A map in between makes the list addressable.
    let mut tree = tree_from_json(json!([{"a": [1]}]));
    tree.set("0.b", 2).unwrap();
    tree.set("0.a.-1", 3).unwrap();
    assert_eq!(tree.root().to_json(), json!([{"a": [1, 3], "b": 2}]));
}

#[test]
fn test_shared_root_list_accepts_nested_writes() {
    let root = Value::from(json!([[1]])).into_shared();
    let mut tree = Tree::new(root);
    tree.set("0.-1", 2).unwrap();
    assert_eq!(tree.get("0").map(|v| v.to_json()), Some(json!([1, 2])));
}

#[test]
fn test_scenario_from_walkthrough() {
    let mut tree = tree_from_json(json!({"a": {"b": [1, 2, 3]}}));

    assert_eq!(tree.get("a.b.1"), Some(Value::Int(2)));

    tree.set("a.b.1", 99).unwrap();
    assert_eq!(tree.get("a.b.1"), Some(Value::Int(99)));
    assert_eq!(tree.get("a.b").map(|v| v.to_json()), Some(json!([1, 99, 3])));

    let err = tree.set("a.c.d", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParentNotFound);

    tree.set("a.b.-1", 4).unwrap();
    assert_eq!(
        tree.get("a.b").map(|v| v.to_json()),
        Some(json!([1, 99, 3, 4]))
    );
}

#[test]
fn test_round_trip() {
    let mut tree = fixture_tree();
    let writes: Vec<(&str, Value)> = vec![
        ("string", Value::from("baz")),
        ("new", Value::Null),
        ("ints.0", Value::Int(7)),
        ("ints.3", Value::Int(8)),
        ("complex.inner.1", Value::from(vec![true, false])),
        ("complex.added", Value::from(json!({"deep": [1]}))),
        ("complex.added.deep.0", Value::Float(0.5)),
    ];
    for (path, value) in writes {
        tree.set(path, value.clone()).unwrap();
        assert_eq!(tree.get(path), Some(value), "round trip of {path}");
    }
    assert!(tree.has("new"));
}

#[test]
fn test_append_always_grows() {
    let mut tree = tree_from_json(json!({"arr": []}));
    tree.set("arr.-1", "x").unwrap();
    assert_eq!(tree.get("arr").map(|v| v.to_json()), Some(json!(["x"])));
    tree.set("arr.-1", "x").unwrap();
    assert_eq!(tree.get("arr").map(|v| v.to_json()), Some(json!(["x", "x"])));
    tree.set("arr.2", "y").unwrap();
    assert_eq!(tree.get("arr.2"), Some(Value::from("y")));
}

#[test]
fn test_index_out_of_bounds() {
    let mut tree = fixture_tree();
    let err = tree.set("ints.5", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
    assert!(err.is_out_of_bounds());

    let err = tree.set("ints.99999999999999999999", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);

    let err = tree.set("ints.x", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIndexKey);
    assert_eq!(tree.get("ints"), Some(Value::from(vec![3i64, 4, 5])));
}

#[test]
fn test_coercion_gating() {
    let mut strict = Tree::with_options(fixture(), TreeOptions::default().coerce(false));
    let err = strict.set("ints.0", "123").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueKindMismatch);
    assert!(err.is_type_error());
    assert_eq!(strict.get("ints.0"), Some(Value::Int(3)));

    let mut loose = fixture_tree();
    loose.set("ints.0", "123").unwrap();
    assert_eq!(loose.get("ints.0"), Some(Value::Int(123)));
    loose.set("strings.-1", 12.5).unwrap();
    assert_eq!(loose.get("strings.3"), Some(Value::from("12.5")));
}

#[test]
fn test_not_coercible_leaves_list_untouched() {
    let mut tree = fixture_tree();
    let err = tree.set("ints.-1", "abc").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueNotCoercible);
    assert_eq!(tree.get("ints"), Some(Value::from(vec![3i64, 4, 5])));

    let err = tree.set("floats.0", Value::from(vec![1i64])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueNotCoercible);
}

#[test]
fn test_map_key_coercion() {
    let mut root = Map::new();
    root.insert("m", Map::of(Kind::Int, Kind::Text)).unwrap();

    let mut tree = Tree::new(root.clone());
    tree.set("m.7", 1).unwrap();
    let map = tree.get_map("m").unwrap();
    assert_eq!(map.get(&Key::Int(7)), Some(&Value::from("1")));

    let err = tree.set("m.seven", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotCoercible);

    let mut strict = Tree::with_options(root, TreeOptions::default().coerce(false));
    let err = strict.set("m.7", "1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyKindMismatch);
}

#[test]
fn test_set_under_scalar_parent() {
    let mut tree = fixture_tree();
    let err = tree.set("string.x", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAContainer);
}

#[test]
fn test_write_through_shared_parent_is_seen_by_aliases() {
    let shared = List::from(vec![1i64]).into_shared();
    let alias = Value::List(shared.clone());
    let mut root = Map::new();
    root.insert("s", shared).unwrap();
    let mut tree = Tree::new(root);

    tree.set("s.-1", 2).unwrap();
    tree.set("s.0", "10").unwrap();
    assert_eq!(alias, Value::from(vec![10i64, 2]));
}

#[test]
fn test_write_below_shared_ancestor_reaches_aliases() {
    let shared = Value::from(json!({"inner": [1]})).into_shared();
    let alias = shared.clone();
    let mut root = Map::new();
    root.insert("s", shared).unwrap();
    let mut tree = Tree::new(root);

    tree.set("s.inner.-1", 2).unwrap();
    assert_eq!(alias.to_json(), json!({"inner": [1, 2]}));
}

#[test]
fn test_error_messages() {
    let mut tree = fixture_tree();
    let err = tree.set("nope.x", 1).unwrap_err();
    assert_eq!(err.to_string(), "parent nope of nope.x not found");
    assert_eq!(err.module(), "tree");

    let err = tree.set("ints.9", 1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "index 9 out of bounds for list of length 3"
    );
    assert_eq!(err.module(), "container");
}

/// Shared map `{"m": []}` with an int list, mounted under "s" of a by-value root.
fn self_referencing() -> (Tree, Value) {
    let mut inner = Map::new();
    inner.insert("m", List::of(Kind::Int)).unwrap();
    let shared = Value::Map(inner).into_shared();
    let mut root = Map::new();
    root.insert("s", shared.clone()).unwrap();
    (Tree::new(root), shared)
}

#[test]
fn test_value_enclosing_its_own_slot_is_rejected() {
    let (mut tree, alias) = self_referencing();

    let err = tree.set("s.m.-1", alias.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicWrite);
    assert!(err.is_path_error());

    let err = tree.set("s.x", alias.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicWrite);

    let wrapped = Value::from(vec![alias.clone()]);
    let err = tree.set("s.y", wrapped).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot write s.y: value contains one of its own ancestors"
    );

    let mut root = Tree::new(alias.clone());
    assert_eq!(
        root.set("k", alias.clone()).unwrap_err().kind(),
        ErrorKind::CyclicWrite
    );

    assert_eq!(alias.to_json(), json!({"m": []}));
    tree.set("s.z", Value::from(vec![1i64]).into_shared()).unwrap();
    assert_eq!(alias.to_json(), json!({"m": [], "z": [1]}));
}

#[test]
fn test_rejected_alias_of_ancestor_returns() {
    let (mut tree, alias) = self_referencing();
    let (done, finished) = mpsc::channel();

    thread::spawn(move || {
        let kind = tree.set("s.m.-1", alias).map_err(|err| err.kind());
        let _ = done.send(kind);
    });

    let outcome = finished
        .recv_timeout(Duration::from_secs(5))
        .expect("set returned");
    assert_eq!(outcome, Err(ErrorKind::CyclicWrite));
}
