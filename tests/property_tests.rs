use std::collections::HashMap;
use std::fs;

use globhash::{hash, hash_parallel, Hasher, Options};
use proptest::prelude::*;
use tempfile::TempDir;

/// Generated file trees: up to 12 files with distinct single-segment names
/// and arbitrary byte content.
fn file_tree_strategy() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::btree_map(
        "[a-z][a-z0-9]{0,8}\\.(txt|bin|json)",
        prop::collection::vec(any::<u8>(), 0..512),
        0..12,
    )
    .prop_map(|m| m.into_iter().collect())
}

fn materialize(files: &[(String, Vec<u8>)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

proptest! {
    #[test]
    fn serial_equals_parallel(files in file_tree_strategy()) {
        let dir = materialize(&files);
        let options = Options::new(dir.path());

        let serial = hash(&[], &options).unwrap();
        let parallel = hash_parallel(&[], &options).unwrap();

        prop_assert_eq!(serial, parallel);
    }

    #[test]
    fn every_file_appears_exactly_once(files in file_tree_strategy()) {
        let dir = materialize(&files);
        let map = hash_parallel(&[], &Options::new(dir.path())).unwrap();

        prop_assert_eq!(map.len(), files.len());
        for (name, _) in &files {
            prop_assert!(map.contains_key(name.as_str()));
        }
    }

    #[test]
    fn concurrency_does_not_change_results(
        files in file_tree_strategy(),
        concurrency in 1usize..8,
    ) {
        let dir = materialize(&files);

        let bounded = hash_parallel(
            &[],
            &Options::new(dir.path()).with_concurrency(concurrency),
        )
        .unwrap();
        let single = hash_parallel(
            &[],
            &Options::new(dir.path()).with_concurrency(1),
        )
        .unwrap();

        prop_assert_eq!(bounded, single);
    }

    #[test]
    fn map_values_are_content_hashes(files in file_tree_strategy()) {
        let dir = materialize(&files);
        let map = hash(&[], &Options::new(dir.path())).unwrap();

        let hasher = Hasher::new();
        let expected: HashMap<String, u64> = files
            .iter()
            .map(|(name, content)| (name.clone(), hasher.hash_bytes(content)))
            .collect();

        prop_assert_eq!(map, expected);
    }

    #[test]
    fn hash_repeats_on_unchanged_content(content in prop::collection::vec(any::<u8>(), 0..4096)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.bin");
        fs::write(&path, &content).unwrap();

        let hasher = Hasher::new();
        let first = hasher.hash_file(&path).unwrap();
        let second = hasher.hash_file(&path).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first, hasher.hash_bytes(&content));
    }
}
