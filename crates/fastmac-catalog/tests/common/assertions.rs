//! Ordering assertions for resolved install lists

#![allow(dead_code)]

use fastmac_catalog::Resolution;
use std::collections::HashSet;

/// Assert that no tool id appears twice
pub fn assert_no_duplicates(ids: &[&str]) {
    let mut seen = HashSet::new();
    for id in ids {
        assert!(seen.insert(*id), "'{}' appears more than once in {:?}", id, ids);
    }
}

/// Assert that `first` is installed before `second`
pub fn assert_precedes(resolution: &Resolution<'_>, first: &str, second: &str) {
    let a = resolution
        .position(first)
        .unwrap_or_else(|| panic!("'{}' missing from {:?}", first, resolution.ids()));
    let b = resolution
        .position(second)
        .unwrap_or_else(|| panic!("'{}' missing from {:?}", second, resolution.ids()));
    assert!(
        a < b,
        "expected '{}' before '{}' in {:?}",
        first,
        second,
        resolution.ids()
    );
}

/// Assert that every tool's prerequisites come before it
pub fn assert_dependencies_first(resolution: &Resolution<'_>) {
    for (index, tool) in resolution.order.iter().enumerate() {
        for dep in &tool.requires {
            if let Some(dep_index) = resolution.position(dep) {
                assert!(
                    dep_index < index,
                    "'{}' requires '{}' but is installed first",
                    tool.id,
                    dep
                );
            }
        }
    }
}
