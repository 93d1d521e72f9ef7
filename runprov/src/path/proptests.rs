//! Property-based tests for path handling.

use super::normalize::normalize_from;
use super::relationship::PathRelationship;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

fn relative_with_dots_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(".".to_string()),
            Just("..".to_string()),
            path_component_strategy(),
        ],
        1..8,
    )
    .prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn normalize_from_idempotent(path in absolute_path_strategy()) {
        let base = Path::new("/base");
        if let Ok(once) = normalize_from(&path, base) {
            let twice = normalize_from(&once, base).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalized_relative_paths_have_no_dot_components(rel in relative_with_dots_strategy()) {
        if let Ok(normalized) = normalize_from(Path::new(&rel), Path::new("/base/deep/dir")) {
            for component in normalized.components() {
                prop_assert_ne!(component, std::path::Component::CurDir);
                prop_assert_ne!(component, std::path::Component::ParentDir);
            }
        }
    }

    #[test]
    fn child_is_within_parent(path in absolute_path_strategy(), child in path_component_strategy()) {
        let nested = path.join(child);
        prop_assert!(PathRelationship::is_strictly_within(&nested, &path));
        prop_assert!(!PathRelationship::is_within(&path, &nested));
    }

    #[test]
    fn relationship_is_antisymmetric(a in absolute_path_strategy(), b in absolute_path_strategy()) {
        let forward = PathRelationship::between(&a, &b);
        let backward = PathRelationship::between(&b, &a);
        let expected = match forward {
            PathRelationship::Ancestor => PathRelationship::Descendant,
            PathRelationship::Descendant => PathRelationship::Ancestor,
            other => other,
        };
        prop_assert_eq!(backward, expected);
    }
}
