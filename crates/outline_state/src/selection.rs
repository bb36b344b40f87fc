//! Selection state and its cascading rules.
//!
//! Selecting is exclusive and does not pull in children. Deselecting removes
//! the record together with its whole subtree. Every change is reported to
//! the properties sink.

use std::collections::HashSet;

use crate::{ObjectId, PropertiesKind, PropertiesSink, TreeStore};

#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in a stable (handle) order
    pub fn selected(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.selected.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Click behaviour: deselect (with subtree) if selected, otherwise select exclusively.
    pub fn toggle(&mut self, store: &TreeStore, id: ObjectId, sink: &mut dyn PropertiesSink) {
        if !store.contains(id) {
            tracing::debug!(%id, "Ignoring toggle on missing object");
            return;
        }

        if self.selected.contains(&id) {
            let mut cleared = store.descendants(id);
            cleared.insert(id);
            self.selected.retain(|selected| !cleared.contains(selected));
            tracing::debug!(%id, cleared = cleared.len(), "Deselected object");
            sink.select(PropertiesKind::None, "");
        } else {
            self.select_only(store, id, sink);
        }
    }

    /// Replaces the whole selection with `id` alone.
    pub fn select_only(&mut self, store: &TreeStore, id: ObjectId, sink: &mut dyn PropertiesSink) {
        let Some(record) = store.get(id) else {
            return;
        };

        self.selected.clear();
        self.selected.insert(id);
        tracing::debug!(%id, name = %record.name(), "Selected object");
        sink.select(record.object_type().properties_kind(), record.name());
    }

    pub fn clear(&mut self, sink: &mut dyn PropertiesSink) {
        self.selected.clear();
        sink.select(PropertiesKind::None, "");
    }

    /// Drops every id in `removed` without notifying anyone.
    pub fn remove_all(&mut self, removed: &HashSet<ObjectId>) {
        self.selected.retain(|id| !removed.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectType;

    #[derive(Default)]
    struct Recorder(Vec<(PropertiesKind, String)>);

    impl PropertiesSink for Recorder {
        fn select(&mut self, kind: PropertiesKind, name: &str) {
            self.0.push((kind, name.to_string()));
        }
    }

    fn tree() -> (TreeStore, ObjectId, ObjectId, ObjectId) {
        let mut store = TreeStore::new();
        let group = store.insert("Group".into(), ObjectType::Group, None);
        let child = store.insert("Child".into(), ObjectType::Light, Some(group));
        let cam = store.insert("Cam".into(), ObjectType::Camera, None);
        (store, group, child, cam)
    }

    #[test]
    fn test_select_is_exclusive() {
        let (store, group, child, cam) = tree();
        let mut selection = Selection::new();
        let mut sink = Recorder::default();

        selection.toggle(&store, group, &mut sink);
        selection.toggle(&store, child, &mut sink);
        assert_eq!(selection.selected(), vec![child]);

        selection.toggle(&store, cam, &mut sink);
        assert_eq!(selection.selected(), vec![cam]);
        assert_eq!(
            sink.0,
            vec![
                (PropertiesKind::Mesh, "Group".to_string()),
                (PropertiesKind::Light, "Child".to_string()),
                (PropertiesKind::Camera, "Cam".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_does_not_cascade() {
        let (store, group, child, _) = tree();
        let mut selection = Selection::new();
        selection.toggle(&store, group, &mut crate::NullSink);
        assert!(selection.is_selected(group));
        assert!(!selection.is_selected(child));
    }

    #[test]
    fn test_deselect_cascades_and_notifies_none() {
        let (store, group, child, _) = tree();
        let mut selection = Selection::new();
        let mut sink = Recorder::default();

        // Force a state where both parent and child are selected.
        selection.selected.insert(group);
        selection.selected.insert(child);

        selection.toggle(&store, group, &mut sink);
        assert!(selection.is_empty());
        assert_eq!(sink.0, vec![(PropertiesKind::None, String::new())]);
    }

    #[test]
    fn test_deselect_leaf_with_no_descendants() {
        let (store, _, _, cam) = tree();
        let mut selection = Selection::new();
        selection.toggle(&store, cam, &mut crate::NullSink);
        selection.toggle(&store, cam, &mut crate::NullSink);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_missing_id_is_noop() {
        let (mut store, _, _, cam) = tree();
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        store.detach_and_remove(cam);
        selection.toggle(&store, cam, &mut sink);
        assert!(selection.is_empty());
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_clear_notifies_none() {
        let (store, group, _, _) = tree();
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        selection.toggle(&store, group, &mut sink);
        selection.clear(&mut sink);
        assert!(selection.is_empty());
        assert_eq!(sink.0.last(), Some(&(PropertiesKind::None, String::new())));
    }
}
