//! Fuzz target for entry name helpers with arbitrary string input.
//!
//! Run with: cargo +nightly fuzz run archive_path
//!
//! Properties being tested:
//! - Directory normalization is idempotent
//! - A prefix matcher matches its own normalized prefix
//! - Unique names never collide with taken names

#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use zipedit::PrefixMatcher;
use zipedit::archive_path::{normalize_directory_name, parent_directory, unique_name};

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    let normalized = normalize_directory_name(path);
    assert_eq!(normalize_directory_name(&normalized), normalized);

    let mut matcher = PrefixMatcher::new();
    matcher.add(path);
    assert!(matcher.matches(&normalized));

    // parent_directory must return a prefix of its input
    assert!(path.starts_with(parent_directory(path)));

    let taken: HashSet<String> = [path.to_string(), format!("{path}.1")].into_iter().collect();
    let picked = unique_name(&taken, path);
    assert!(!taken.contains(&picked), "collision for {:?}", path);
});
