//! Read-side tests for the path engine.

use serde_json::json;
use treepath::{Kind, List, Map, Tree, Value};

use crate::helpers::*;

#[test]
fn test_has() {
    let tree = fixture_tree();
    let present = [
        "string",
        "strings",
        "int",
        "ints",
        "float",
        "floats",
        "mixed-ok",
        "mixed-ok.0",
        "mixed-ok.1",
        "mixed-ok.2",
        "mixed-nok",
        "mixed-nok.0",
        "complex",
        "complex.inner",
        "complex.inner.0",
        "complex.inner.2",
    ];
    for path in present {
        assert!(tree.has(path), "path {path} should resolve");
    }
    for path in MISSING {
        assert!(!tree.has(path), "path {path} should not resolve");
    }
}

#[test]
fn test_get() {
    let tree = fixture_tree();

    assert_eq!(tree.get("string"), Some(Value::from("bar")));
    assert_eq!(tree.get("int"), Some(Value::Int(123)));
    assert_eq!(tree.get("float"), Some(Value::Float(12.5)));
    assert_eq!(tree.get("strings"), Some(Value::from(vec!["a", "b", "c"])));
    assert_eq!(tree.get("ints"), Some(Value::from(vec![3i64, 4, 5])));
    assert_eq!(tree.get("mixed-ok.0"), Some(Value::from("1.5")));
    assert_eq!(tree.get("mixed-ok.1"), Some(Value::Uint(2)));
    assert_eq!(tree.get("floats.1"), Some(Value::Float(4.5)));
    assert_eq!(tree.get("complex.inner.0"), Some(Value::from("str")));
    assert_eq!(tree.get("complex.inner.1"), Some(Value::Int(123)));
    assert_eq!(
        tree.get("complex.inner").map(|inner| inner.to_json()),
        Some(json!(["str", 123, 12.5]))
    );

    for path in MISSING {
        assert_eq!(tree.get(path), None, "path {path} should not resolve");
    }
}

#[test]
fn test_lookup_distinguishes_null_from_missing() {
    let tree = tree_from_json(json!({"n": null}));
    assert_eq!(tree.lookup("n"), (Value::Null, true));
    assert_eq!(tree.lookup("m"), (Value::Null, false));
    assert!(tree.has("n"));
    assert!(!tree.has("m"));
}

#[test]
fn test_list_and_map_queries_are_exclusive() {
    let tree = fixture_tree();
    let lists = [
        "strings",
        "ints",
        "floats",
        "mixed-ok",
        "mixed-nok",
        "complex.inner",
    ];
    for path in lists {
        assert!(tree.is_slice(path), "{path} is a list");
        assert!(!tree.is_map(path), "{path} is not a map");
    }

    assert!(tree.is_map("complex"));
    assert!(!tree.is_list("complex"));

    for path in ["string", "int", "float", "mixed-ok.0", "complex.inner.1"] {
        assert!(!tree.is_list(path), "{path} is a scalar");
        assert!(!tree.is_map(path), "{path} is a scalar");
    }
    for path in MISSING {
        assert!(!tree.is_list(path));
        assert!(!tree.is_map(path));
    }
}

#[test]
fn test_digit_segment_against_map_is_a_key() {
    let tree = tree_from_json(json!({"3": "three", "l": [{"0": "zero"}]}));
    assert_eq!(tree.get("3"), Some(Value::from("three")));
    assert_eq!(tree.get("l.0.0"), Some(Value::from("zero")));
}

#[test]
fn test_empty_segments_match_empty_keys() {
    let tree = tree_from_json(json!({"": {"x": 1}, "a": {"": {"b": 2}}}));
    assert_eq!(tree.get(".x"), Some(Value::Int(1)));
    assert_eq!(tree.get("a..b"), Some(Value::Int(2)));
    assert_eq!(tree.get("a.b"), None);
}

#[test]
fn test_typed_keys_are_not_read_with_text() {
    let mut ints = Map::of(Kind::Int, Kind::Any);
    ints.insert(1i64, "one").unwrap();
    let mut root = Map::new();
    root.insert("ints", ints).unwrap();

    let tree = Tree::new(root);
    assert!(tree.is_map("ints"));
    assert_eq!(tree.get("ints.1"), None);
}

#[test]
fn test_get_child() {
    let tree = fixture_tree();

    for path in ["string", "int", "mixed-ok.0", "complex.inner.1"] {
        assert!(tree.get_child(path).is_none(), "{path} is a scalar");
    }
    for path in MISSING {
        assert!(tree.get_child(path).is_none());
    }

    let strings = tree.get_child("strings").expect("list child");
    assert_eq!(strings.root(), &Value::from(vec!["a", "b", "c"]));
    assert!(strings.root().is_shared());
    assert_eq!(strings.get("1"), Some(Value::from("b")));

    let complex = tree.get_child("complex").expect("map child");
    assert_eq!(complex.get("inner.2"), Some(Value::Float(12.5)));
}

#[test]
fn test_child_of_by_value_container_is_detached() {
    let tree = fixture_tree();
    let mut child = tree.get_child("strings").unwrap();

    child.set("-1", "d").unwrap();
    assert_eq!(child.root().as_list().map(List::len), Some(4));
    assert_eq!(tree.get("strings").unwrap().as_list().map(List::len), Some(3));
}

#[test]
fn test_child_of_shared_container_aliases_parent() {
    let mut root = Map::new();
    root.insert("shared", List::from(vec!["xxx"]).into_shared())
        .unwrap();
    root.insert("maps", Value::from(json!({"foo": "bar"})).into_shared())
        .unwrap();
    let tree = Tree::new(root);

    let mut list = tree.get_child("shared").unwrap();
    list.set("-1", "yyy").unwrap();
    assert_eq!(tree.get("shared"), Some(Value::from(vec!["xxx", "yyy"])));

    let mut map = tree.get_child("maps").unwrap();
    map.set("baz", 1).unwrap();
    assert_eq!(tree.get("maps.baz"), Some(Value::Int(1)));
}

#[test]
fn test_child_inherits_options() {
    let tree = Tree::with_options(fixture(), treepath::TreeOptions::default().coerce(false));
    let child = tree.get_child("ints").unwrap();
    assert!(!child.options().coerce);
}
