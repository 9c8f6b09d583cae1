//! Termination and reporting over aliased and self-referential graphs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use valuediff_core::{deep_diff_values, Value};

fn self_referential_map(tag: &str) -> Value {
    let node = Value::map([("tag", Value::from(tag))]);
    node.map_insert("self", node.clone());
    node
}

#[test]
fn test_equal_self_referential_maps() {
    let a = self_referential_map("x");
    let b = self_referential_map("x");
    assert!(deep_diff_values(&a, &b).is_empty());
}

#[test]
fn test_divergent_self_referential_maps_report_once() {
    let a = self_referential_map("x");
    let b = self_referential_map("y");
    let diffs = deep_diff_values(&a, &b);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["tag"]);
}

#[test]
fn test_mutually_recursive_lists() {
    let a1 = Value::list([Value::from(1_i64)]);
    let a2 = Value::list([Value::from(2_i64), a1.clone()]);
    a1.list_push(a2.clone());

    let b1 = Value::list([Value::from(1_i64)]);
    let b2 = Value::list([Value::from(2_i64), b1.clone()]);
    b1.list_push(b2.clone());

    assert!(deep_diff_values(&a1, &b1).is_empty());
    assert!(deep_diff_values(&a2, &b2).is_empty());
}

#[test]
fn test_reference_cycle() {
    let a = Value::reference(Value::Invalid);
    a.set_target(Value::list([Value::from("n"), a.clone()]));
    let b = Value::reference(Value::Invalid);
    b.set_target(Value::list([Value::from("n"), b.clone()]));
    assert!(deep_diff_values(&a, &b).is_empty());
}

#[test]
fn test_same_graph_on_both_sides() {
    let a = self_referential_map("x");
    assert!(deep_diff_values(&a, &a).is_empty());
}

#[test]
fn test_shared_pair_is_explored_under_first_path_only() {
    let x = Value::map([("n", Value::from(1_i64))]);
    let y = Value::map([("n", Value::from(2_i64))]);
    let left = Value::map([("p", x.clone()), ("q", x)]);
    let right = Value::map([("p", y.clone()), ("q", y)]);

    let diffs = deep_diff_values(&left, &right);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["p", "n"]);
}

#[test]
fn test_unshared_equal_content_is_explored_everywhere() {
    let left = Value::map([
        ("p", Value::map([("n", Value::from(1_i64))])),
        ("q", Value::map([("n", Value::from(1_i64))])),
    ]);
    let right = Value::map([
        ("p", Value::map([("n", Value::from(2_i64))])),
        ("q", Value::map([("n", Value::from(2_i64))])),
    ]);
    let paths: Vec<String> = deep_diff_values(&left, &right)
        .iter()
        .map(|d| d.path_string())
        .collect();
    assert_eq!(paths, vec!["p.n", "q.n"]);
}
