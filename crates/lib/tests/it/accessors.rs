//! Typed convenience reads.

use std::collections::BTreeMap;

use serde_json::json;
use treepath::{Key, Value};

use crate::helpers::*;

#[test]
fn test_get_int() {
    let tree = fixture_tree();
    let expects: &[(&str, Option<i64>)] = &[
        ("string", None),
        ("strings", None),
        ("int", Some(123)),
        ("ints", None),
        ("float", Some(12)),
        ("mixed-ok.0", Some(1)),
        ("mixed-ok.1", Some(2)),
        ("mixed-ok.2", Some(3)),
        ("mixed-nok.0", None),
        ("mixed-nok.1", Some(2)),
        ("complex", None),
        ("complex.inner.0", None),
        ("complex.inner.1", Some(123)),
        ("complex.inner.2", Some(12)),
        ("other", None),
    ];
    for (path, expect) in expects {
        assert_eq!(tree.get_int(path), *expect, "get_int({path})");
        assert_eq!(tree.is_int(path), expect.is_some(), "is_int({path})");
        assert_eq!(
            tree.get_int_or(path, 9999),
            expect.unwrap_or(9999),
            "get_int_or({path})"
        );
    }
}

#[test]
fn test_get_ints() {
    let tree = fixture_tree();
    let expects: &[(&str, Option<Vec<i64>>, Option<Vec<i64>>)] = &[
        ("string", None, None),
        ("strings", None, None),
        ("int", None, Some(vec![123])),
        ("ints", Some(vec![3, 4, 5]), Some(vec![3, 4, 5])),
        ("float", None, Some(vec![12])),
        ("floats", Some(vec![3, 4, 5]), Some(vec![3, 4, 5])),
        ("mixed-ok", Some(vec![1, 2, 3]), Some(vec![1, 2, 3])),
        ("mixed-ok.0", None, Some(vec![1])),
        ("mixed-nok", None, None),
        ("mixed-nok.0", None, None),
        ("mixed-nok.2", None, Some(vec![3])),
        ("complex", None, None),
        ("complex.inner", None, None),
        ("other", None, None),
    ];
    for (path, strict, loose) in expects {
        assert_eq!(&tree.get_ints(path, false), strict, "strict get_ints({path})");
        assert_eq!(&tree.get_ints(path, true), loose, "loose get_ints({path})");
    }
}

#[test]
fn test_get_text() {
    let tree = fixture_tree();
    assert_eq!(tree.get_text("string").as_deref(), Some("bar"));
    assert_eq!(tree.get_text("int").as_deref(), Some("123"));
    assert_eq!(tree.get_text("float").as_deref(), Some("12.5"));
    assert_eq!(tree.get_text("mixed-ok.1").as_deref(), Some("2"));
    assert_eq!(tree.get_text("strings"), None);
    assert_eq!(tree.get_text_or("other", "fallback"), "fallback");
    assert!(tree.is_text("float"));
    assert!(!tree.is_text("complex"));

    assert_eq!(
        tree.get_texts("mixed-nok", false),
        Some(vec!["aaa".to_string(), "2".to_string(), "3.5".to_string()])
    );
    assert_eq!(tree.get_texts("string", false), None);
    assert_eq!(tree.get_texts("string", true), Some(vec!["bar".to_string()]));
}

#[test]
fn test_get_float() {
    let tree = fixture_tree();
    assert_eq!(tree.get_float("float"), Some(12.5));
    assert_eq!(tree.get_float("int"), Some(123.0));
    assert_eq!(tree.get_float("mixed-ok.0"), Some(1.5));
    assert_eq!(tree.get_float("string"), None);
    assert_eq!(tree.get_float_or("string", 9999.5), 9999.5);
    assert!(tree.is_float("mixed-nok.2"));

    assert_eq!(tree.get_floats("floats", false), Some(vec![3.5, 4.5, 5.5]));
    assert_eq!(tree.get_floats("mixed-ok", false), Some(vec![1.5, 2.0, 3.5]));
    assert_eq!(tree.get_floats("mixed-nok", true), None);
}

#[test]
fn test_get_bool() {
    let tree = tree_from_json(json!({
        "t": true,
        "s": "false",
        "n": 0,
        "f": 0.5,
        "word": "yes",
        "list": [1, "true", 0.0],
    }));
    assert_eq!(tree.get_bool("t"), Some(true));
    assert_eq!(tree.get_bool("s"), Some(false));
    assert_eq!(tree.get_bool("n"), Some(false));
    assert_eq!(tree.get_bool("f"), Some(true));
    assert_eq!(tree.get_bool("word"), None);
    assert!(!tree.is_bool("word"));
    assert!(tree.get_bool_or("word", true));
    assert_eq!(tree.get_bools("list", false), Some(vec![true, true, false]));
    assert_eq!(tree.get_bools("t", true), Some(vec![true]));
}

#[test]
fn test_get_uint() {
    let tree = tree_from_json(json!({"neg": -1, "pos": "42"}));
    assert_eq!(tree.get_uint("neg"), None);
    assert_eq!(tree.get_uint("pos"), Some(42));
    assert_eq!(tree.get_uint_or("neg", 7), 7);
}

#[test]
fn test_get_maps() {
    let tree = tree_from_json(json!({
        "m": {"a": "1", "b": 2.5},
        "bad": {"a": "x"},
        "l": [1],
    }));

    let map = tree.get_map("m").unwrap();
    assert_eq!(map.get(&Key::from("b")), Some(&Value::Float(2.5)));
    assert_eq!(tree.get_map("l"), None);

    let text = tree.get_map_text("m").unwrap();
    assert_eq!(text.get("a"), Some(&Value::from("1")));

    let expected: BTreeMap<String, String> = [("a", "1"), ("b", "2.5")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(tree.get_map_text_text("m"), Some(expected));

    let ints = tree.get_map_text_int("m").unwrap();
    assert_eq!(ints.get("a"), Some(&1));
    assert_eq!(ints.get("b"), Some(&2));
    assert_eq!(tree.get_map_text_int("bad"), None);

    let floats = tree.get_map_text_float("m").unwrap();
    assert_eq!(floats.get("b"), Some(&2.5));
}
