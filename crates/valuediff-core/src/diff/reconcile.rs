//! Key reconciliation for unordered mappings.

use crate::value::{Key, MapStorage};

/// The key sets of two mappings, partitioned.
///
/// Each list is sorted by the key's string rendering (ties broken by the
/// key itself), so traversal order does not depend on hash iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPartition {
    /// Keys only in the left mapping
    pub left_only: Vec<Key>,
    /// Keys in both mappings
    pub common: Vec<Key>,
    /// Keys only in the right mapping
    pub right_only: Vec<Key>,
}

pub fn reconcile(left: &MapStorage, right: &MapStorage) -> KeyPartition {
    let mut partition = KeyPartition::default();
    for key in left.keys() {
        if right.contains_key(key) {
            partition.common.push(key.clone());
        } else {
            partition.left_only.push(key.clone());
        }
    }
    partition.right_only = right
        .keys()
        .filter(|key| !left.contains_key(key))
        .cloned()
        .collect();

    sort_by_rendering(&mut partition.left_only);
    sort_by_rendering(&mut partition.common);
    sort_by_rendering(&mut partition.right_only);
    partition
}

fn sort_by_rendering(keys: &mut [Key]) {
    keys.sort_by_cached_key(|key| (key.to_string(), key.clone()));
}
