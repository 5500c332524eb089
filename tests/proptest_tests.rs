//! Property-based tests using proptest.
//!
//! These tests verify invariants of the zipedit library using randomly
//! generated entry names and edit batches.

use std::collections::{BTreeSet, HashSet};
use std::fs;

use proptest::prelude::*;
use zipedit::archive_path::{normalize_directory_name, unique_name};
use zipedit::{PrefixMatcher, ZipEditor};

mod common;

/// Strategy for entry names: 1-3 short lowercase segments.
fn name_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-d]{1,3}", 1..4).prop_map(|parts| parts.join("/"))
}

/// Strategy for a batch of puts (`false`) and mkdirs (`true`).
fn batch_strategy() -> impl Strategy<Value = Vec<(String, bool)>> {
    proptest::collection::vec((name_strategy(), any::<bool>()), 1..12)
}

proptest! {
    /// Normalizing a directory name twice changes nothing.
    #[test]
    fn normalize_is_idempotent(path in ".{0,12}") {
        let once = normalize_directory_name(&path);
        prop_assert_eq!(normalize_directory_name(&once), once.clone());
        if !path.is_empty() {
            prop_assert!(once.ends_with('/'));
        }
    }

    /// A prefix matches exactly the names under its directory form.
    #[test]
    fn prefix_matches_literal_directory(prefix in name_strategy(), name in name_strategy()) {
        let mut matcher = PrefixMatcher::new();
        matcher.add(&prefix);
        let dir = normalize_directory_name(&prefix);
        prop_assert_eq!(matcher.matches(&name), name.starts_with(&dir));
    }

    /// A unique name is never one that is taken.
    #[test]
    fn unique_name_is_free(
        taken in proptest::collection::hash_set(name_strategy(), 0..10),
        wanted in name_strategy()
    ) {
        let picked = unique_name(&taken, &wanted);
        prop_assert!(!taken.contains(&picked));
        if !taken.contains(&wanted) {
            prop_assert_eq!(picked, wanted);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Adds and mkdirs on a fresh archive produce sorted, de-duplicated
    /// entries and keep nothing.
    #[test]
    fn fresh_batch_is_sorted(batch in batch_strategy()) {
        let (_dir, path) = common::temp_archive();
        let mut editor = ZipEditor::new(&path);
        let mut expected = BTreeSet::new();
        for (name, is_dir) in &batch {
            if *is_dir {
                editor.mkdir(name);
                expected.insert(normalize_directory_name(name));
            } else {
                editor.add_bytes(name, name.as_bytes().to_vec());
                expected.insert(name.clone());
            }
        }
        let result = editor.commit().unwrap();

        prop_assert_eq!(result.kept, 0);
        prop_assert_eq!(result.deleted, 0);
        prop_assert_eq!(result.added, expected.len());
        let names = common::names(&path);
        prop_assert_eq!(names, expected.into_iter().collect::<Vec<_>>());
    }

    /// After rmdir, nothing under the prefix survives and every removed
    /// entry is counted.
    #[test]
    fn rmdir_removes_exactly_the_subtree(
        files in proptest::collection::btree_set(name_strategy(), 1..12),
        prefix in "[a-d]{1,3}"
    ) {
        let (_dir, path) = common::temp_archive();
        let mut editor = ZipEditor::new(&path);
        for name in &files {
            editor.add_bytes(name, "x");
        }
        let _ = editor.commit().unwrap();

        let dir = normalize_directory_name(&prefix);
        let present: HashSet<String> = editor.entry_set();
        let doomed = present.iter().filter(|n| n.starts_with(&dir)).count();

        editor.rmdir(&prefix);
        let result = editor.commit().unwrap();

        prop_assert_eq!(result.deleted, doomed);
        prop_assert_eq!(result.added, 0);
        prop_assert_eq!(result.kept, present.len() - doomed);
        prop_assert!(editor.entries().iter().all(|e| !e.name.starts_with(&dir)));
    }

    /// Deleting names that are not present leaves the archive bytes as they were.
    #[test]
    fn deleting_absent_names_is_noop(
        files in proptest::collection::btree_set("[a-d]{1,3}", 1..8),
        absent in proptest::collection::vec("[e-h]{1,3}", 1..4)
    ) {
        let (_dir, path) = common::temp_archive();
        let mut editor = ZipEditor::new(&path);
        for name in &files {
            editor.add_bytes(name, "x");
        }
        let _ = editor.commit().unwrap();
        let before = fs::read(&path).unwrap();

        for name in &absent {
            editor.delete(name).rmdir(name);
        }
        let result = editor.commit().unwrap();

        prop_assert!(result.is_noop());
        prop_assert_eq!(result.kept, files.len());
        prop_assert_eq!(fs::read(&path).unwrap(), before);
    }
}
