//! Diffs over native Rust values lowered through serde.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use valuediff_core::{deep_diff, to_value, try_deep_diff, ExError, ExErrorKind, Record, Value};

#[derive(Serialize, Clone)]
struct Tls {
    cert: String,
}

#[derive(Serialize, Clone)]
struct Server {
    host: String,
    port: u16,
    tags: Vec<String>,
    limits: BTreeMap<String, u32>,
    tls: Option<Tls>,
}

#[derive(Serialize)]
enum Status {
    Idle,
    Busy { jobs: u32 },
}

fn server() -> Server {
    Server {
        host: "db.internal".to_string(),
        port: 8080,
        tags: vec!["primary".to_string()],
        limits: BTreeMap::from([("rate".to_string(), 100)]),
        tls: Some(Tls {
            cert: "a.pem".to_string(),
        }),
    }
}

#[test]
fn test_identical_structs() {
    assert!(deep_diff(&server(), &server()).is_empty());
}

#[test]
fn test_field_change_is_labelled_by_field_name() {
    let mut other = server();
    other.port = 9090;
    let diffs = deep_diff(&server(), &other);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["port"]);
    assert_eq!(diffs[0].left, Some(Value::from(8080_u16)));
    assert_eq!(diffs[0].right, Some(Value::from(9090_u16)));
}

#[test]
fn test_vec_length_change_reports_whole_sequence() {
    let mut other = server();
    other.tags.push("replica".to_string());
    let diffs = deep_diff(&server(), &other);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["tags"]);
    assert_eq!(diffs[0].left, Some(to_value(&server().tags).unwrap()));
    assert_eq!(diffs[0].right, Some(to_value(&other.tags).unwrap()));
}

#[test]
fn test_map_entry_added() {
    let mut other = server();
    other.limits.insert("burst".to_string(), 10);
    let diffs = deep_diff(&server(), &other);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["limits", "burst"]);
    assert!(diffs[0].is_addition());
    assert_eq!(diffs[0].right, Some(Value::from(10_u32)));
}

#[test]
fn test_option_none_against_some_is_a_nil_mismatch() {
    let mut other = server();
    other.tls = None;
    let diffs = deep_diff(&server(), &other);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["tls"]);
    assert_eq!(diffs[0].left, Some(to_value(&server().tls).unwrap()));
    assert_eq!(diffs[0].right, Some(Value::nil_boxed()));
}

#[test]
fn test_option_contents_compared_without_extra_segment() {
    let mut other = server();
    other.tls = Some(Tls {
        cert: "b.pem".to_string(),
    });
    let diffs = deep_diff(&server(), &other);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["tls", "cert"]);
}

#[test]
fn test_several_fields_in_declaration_order() {
    let mut other = server();
    other.host = "db2.internal".to_string();
    other.port = 1;
    let diffs = deep_diff(&server(), &other);
    let paths: Vec<String> = diffs.iter().map(|d| d.path_string()).collect();
    assert_eq!(paths, vec!["host", "port"]);
}

#[test]
fn test_different_record_types_are_one_mismatch() {
    let tls = Tls {
        cert: "a.pem".to_string(),
    };
    let diffs = deep_diff(&server(), &tls);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].path.is_empty());
}

#[test]
fn test_enum_variants() {
    let diffs = deep_diff(&Status::Idle, &Status::Busy { jobs: 1 });
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].path.is_empty());

    let diffs = deep_diff(&Status::Busy { jobs: 1 }, &Status::Busy { jobs: 2 });
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["jobs"]);
}

#[test]
fn test_fixed_arrays_compare_per_index() {
    let diffs = deep_diff(&[1, 2, 3], &[1, 5, 3]);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["1"]);

    // Different lengths are different declared types.
    let diffs = deep_diff(&[1, 2], &[1, 2, 3]);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].path.is_empty());
}

#[test]
fn test_integer_widths_share_a_kind() {
    assert!(deep_diff(&5_i8, &5_i64).is_empty());
    assert_eq!(deep_diff(&5_i64, &5_u64).len(), 1);
}

#[test]
fn test_hash_map_diffs_are_deterministic() {
    let a: HashMap<u32, &str> = (0..20).map(|i| (i, "x")).collect();
    let b: HashMap<u32, &str> = (5..25).map(|i| (i, "x")).collect();
    let first = deep_diff(&a, &b);
    let second = deep_diff(&a, &b);
    assert_eq!(first, second);
    let paths: Vec<String> = first.iter().map(|d| d.path_string()).collect();
    assert_eq!(
        paths,
        vec!["0", "1", "2", "3", "4", "20", "21", "22", "23", "24"]
    );
}

/// A value whose `Serialize` impl always fails with the given message.
struct Unlowerable(&'static str);

impl Serialize for Unlowerable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom(self.0))
    }
}

#[derive(Serialize, PartialEq, Eq, PartialOrd, Ord)]
struct Slot {
    id: u8,
}

/// Serializes as a map with float keys.
struct ByWeight(Vec<(f64, &'static str)>);

impl Serialize for ByWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

#[test]
fn test_tuple_keyed_maps() {
    let a = BTreeMap::from([((1_u8, 2_u8), 3_u8)]);
    let b = BTreeMap::from([((1_u8, 2_u8), 4_u8), ((5, 6), 7)]);
    let diffs = deep_diff(&a, &b);
    let paths: Vec<String> = diffs.iter().map(|d| d.path_string()).collect();
    assert_eq!(paths, vec!["[5, 6]", "[1, 2]"]);
    assert!(diffs[0].is_addition());
    assert_eq!(diffs[1].left, Some(Value::from(3_u8)));
    assert_eq!(diffs[1].right, Some(Value::from(4_u8)));

    assert!(deep_diff(&a, &a.clone()).is_empty());
}

#[test]
fn test_struct_keyed_maps() {
    let a = BTreeMap::from([(Slot { id: 1 }, "a")]);
    let b = BTreeMap::from([(Slot { id: 1 }, "b"), (Slot { id: 2 }, "c")]);
    let paths: Vec<String> = deep_diff(&a, &b).iter().map(|d| d.path_string()).collect();
    assert_eq!(paths, vec!["Slot { id: 2 }", "Slot { id: 1 }"]);
}

#[test]
fn test_float_keyed_maps() {
    let a = ByWeight(vec![(0.5, "light"), (2.0, "heavy")]);
    let b = ByWeight(vec![(0.5, "light"), (2.0, "heavier")]);
    let diffs = deep_diff(&a, &b);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["2"]);
}

#[test]
fn test_lowering_failure_surfaces_through_try_deep_diff() {
    let err = try_deep_diff(&Unlowerable("no"), &0_u8).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert_eq!(err.op(), Some("try_deep_diff"));
    let inner = err.source_error().expect("lowering error is chained");
    assert_eq!(inner.op(), Some("to_value"));
    assert_eq!(inner.message(), "no");

    let err = try_deep_diff(&0_u8, &u128::MAX).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::IntegerOverflow);
    assert!(err.message().contains("right"));
}

#[test]
fn test_failed_side_is_an_opaque_error() {
    let diffs = deep_diff(&Unlowerable("broken"), &0_u8);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].path.is_empty());
    let Some(Value::Opaque(Some(handle))) = &diffs[0].left else {
        panic!("expected an opaque stand-in, got {:?}", diffs[0].left);
    };
    let err = handle.downcast_ref::<ExError>().expect("stand-in holds the error");
    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert!(handle.label().contains("ERR_SERIALIZATION"));
}

#[test]
fn test_failed_sides_never_compare_equal() {
    assert_eq!(deep_diff(&Unlowerable("same"), &Unlowerable("same")).len(), 1);

    let a = vec![Unlowerable("x")];
    let b = vec![Unlowerable("y"), Unlowerable("z")];
    assert_eq!(deep_diff(&a, &b).len(), 1);

    assert_eq!(deep_diff(&u128::MAX, &(u128::MAX - 1)).len(), 1);
}

#[test]
fn test_restricted_fields_are_reported_textually() {
    let left = Value::from(
        Record::new("Account")
            .field("id", Value::from(1_i64))
            .private_field("secret", Value::from("alpha")),
    );
    let right = Value::from(
        Record::new("Account")
            .field("id", Value::from(1_i64))
            .private_field("secret", Value::from("beta")),
    );
    let diffs = valuediff_core::deep_diff_values(&left, &right);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, vec!["secret"]);
    assert_eq!(diffs[0].left, Some(Value::from("alpha")));
    assert_eq!(diffs[0].right, Some(Value::from("beta")));
}
