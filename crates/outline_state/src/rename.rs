//! Sibling-scoped name validation.
//!
//! Renames are checked only against the record's siblings; new objects from
//! [`TreeStore::add`](crate::TreeStore::add) are checked against every name.
//! The two scopes are intentionally different.

use crate::{ObjectId, RenameError, TreeStore};

/// Checks whether `id` may take `proposed` as its name.
pub fn validate_rename(
    store: &TreeStore,
    id: ObjectId,
    proposed: &str,
) -> std::result::Result<(), RenameError> {
    if proposed.trim().is_empty() {
        return Err(RenameError::Empty);
    }

    if !store.contains(id) {
        return Err(RenameError::NotFound);
    }

    let clash = store
        .siblings(id)
        .into_iter()
        .filter_map(|sibling| store.get(sibling))
        .any(|sibling| sibling.name() == proposed);

    if clash {
        return Err(RenameError::DuplicateSibling {
            name: proposed.to_string(),
        });
    }

    Ok(())
}

pub fn can_rename(store: &TreeStore, id: ObjectId, proposed: &str) -> bool {
    validate_rename(store, id, proposed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectType;

    fn siblings() -> (TreeStore, ObjectId, ObjectId, ObjectId) {
        let mut store = TreeStore::new();
        let parent = store.insert("Parent".into(), ObjectType::Group, None);
        let a = store.insert("A".into(), ObjectType::Mesh, Some(parent));
        let b = store.insert("B".into(), ObjectType::Mesh, Some(parent));
        (store, parent, a, b)
    }

    #[test]
    fn test_rejects_sibling_duplicate() {
        let (store, _, a, _) = siblings();
        assert_eq!(
            validate_rename(&store, a, "B"),
            Err(RenameError::DuplicateSibling { name: "B".into() })
        );
        assert!(!can_rename(&store, a, "B"));
    }

    #[test]
    fn test_rejects_blank_names() {
        let (store, _, a, _) = siblings();
        assert_eq!(validate_rename(&store, a, ""), Err(RenameError::Empty));
        assert_eq!(validate_rename(&store, a, "  \t"), Err(RenameError::Empty));
    }

    #[test]
    fn test_own_name_is_not_a_conflict() {
        let (store, _, a, _) = siblings();
        assert!(can_rename(&store, a, "A"));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let (store, _, a, _) = siblings();
        assert!(can_rename(&store, a, "b"));
    }

    #[test]
    fn test_names_elsewhere_in_tree_are_allowed() {
        let (store, parent, a, _) = siblings();
        // "Parent" is the parent's name, not a sibling's.
        assert!(can_rename(&store, a, "Parent"));
        // Roots only compare against other roots.
        assert!(can_rename(&store, parent, "A"));
    }

    #[test]
    fn test_root_rename_checks_other_roots() {
        let (mut store, parent, _, _) = siblings();
        store.add("Camera", ObjectType::Camera);
        assert!(!can_rename(&store, parent, "Camera"));
    }

    #[test]
    fn test_unknown_id() {
        let (mut store, _, a, _) = siblings();
        store.detach_and_remove(a);
        assert_eq!(validate_rename(&store, a, "Z"), Err(RenameError::NotFound));
    }
}
