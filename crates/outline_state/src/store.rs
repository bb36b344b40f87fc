//! Arena-backed object storage and parent/child topology.
//!
//! Records live in a slot table addressed by [`ObjectId`] handles. Parent and
//! child links are handles into the same table, so the tree never owns itself
//! through pointers. Root order is kept in a separate list; a record's
//! `children` vector is the display order of its subtree.

use std::collections::HashSet;

use crate::{validate_rename, ObjectId, ObjectRecord, ObjectType, Result};

/// Zero-padded width of the numeric suffix appended by [`TreeStore::add`].
pub const DEFAULT_SUFFIX_WIDTH: usize = 2;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    record: Option<ObjectRecord>,
}

/// Owns every record and the forest topology.
#[derive(Debug, Clone)]
pub struct TreeStore {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    roots: Vec<ObjectId>,
    len: usize,
    suffix_width: usize,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            len: 0,
            suffix_width: DEFAULT_SUFFIX_WIDTH,
        }
    }

    pub fn with_suffix_width(mut self, width: usize) -> Self {
        self.suffix_width = width;
        self
    }

    pub fn suffix_width(&self) -> usize {
        self.suffix_width
    }

    pub fn set_suffix_width(&mut self, width: usize) {
        self.suffix_width = width;
    }

    // -- Allocation --

    fn alloc(&mut self, record: ObjectRecord) -> ObjectId {
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.record = Some(record);
            ObjectId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            ObjectId { idx, generation: 0 }
        };
        self.len += 1;
        id
    }

    /// Creates a record and links it as the last child of `parent` (or the last root).
    ///
    /// No name checks happen here; callers validate before inserting.
    pub(crate) fn insert(
        &mut self,
        name: String,
        object_type: ObjectType,
        parent: Option<ObjectId>,
    ) -> ObjectId {
        let parent = parent.filter(|p| self.contains(*p));
        let id = self.alloc(ObjectRecord::new(name, object_type, parent));
        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.get_mut(parent_id) {
                    parent.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    // -- Queries --

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.slots
            .get(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut ObjectRecord> {
        self.slots
            .get_mut(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_mut())
    }

    /// Root ids in display order
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Every live id in display pre-order (roots first, each followed by its subtree).
    pub fn preorder(&self) -> Vec<ObjectId> {
        let mut order = Vec::with_capacity(self.len);
        let mut visited = HashSet::new();
        let mut stack: Vec<ObjectId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(record) = self.get(id) else { continue };
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            stack.extend(record.children.iter().rev().copied());
        }

        order
    }

    /// Records in display pre-order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ObjectRecord)> + '_ {
        self.preorder()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|record| (id, record)))
    }

    /// All ids below `id`, excluding `id` itself.
    ///
    /// Unknown ids yield an empty set. Child ids that no longer resolve are skipped.
    pub fn descendants(&self, id: ObjectId) -> HashSet<ObjectId> {
        let mut found = HashSet::new();
        let Some(record) = self.get(id) else {
            return found;
        };

        let mut stack: Vec<ObjectId> = record.children.clone();
        while let Some(child_id) = stack.pop() {
            if child_id == id || !found.insert(child_id) {
                continue;
            }
            match self.get(child_id) {
                Some(child) => stack.extend(child.children.iter().copied()),
                None => {
                    found.remove(&child_id);
                }
            }
        }

        found
    }

    /// Records sharing `id`'s parent, or all other roots when `id` is a root.
    pub fn siblings(&self, id: ObjectId) -> Vec<ObjectId> {
        let Some(record) = self.get(id) else {
            return Vec::new();
        };

        let group: &[ObjectId] = match record.parent.and_then(|p| self.get(p)) {
            Some(parent) => &parent.children,
            None if record.parent.is_none() => &self.roots,
            None => &[],
        };

        group
            .iter()
            .copied()
            .filter(|other| *other != id && self.contains(*other))
            .collect()
    }

    pub fn name_exists(&self, name: &str) -> bool {
        self.slots
            .iter()
            .filter_map(|slot| slot.record.as_ref())
            .any(|record| record.name == name)
    }

    /// `name_hint` if no record anywhere uses it, otherwise the first free
    /// `name_hint_NN` with a zero-padded counter starting at 1.
    pub fn unique_name(&self, name_hint: &str) -> String {
        if !self.name_exists(name_hint) {
            return name_hint.to_string();
        }

        let width = self.suffix_width;
        (1u64..)
            .map(|counter| format!("{}_{:0width$}", name_hint, counter, width = width))
            .find(|candidate| !self.name_exists(candidate))
            .unwrap_or_else(|| name_hint.to_string())
    }

    // -- Mutations --

    /// Adds a new root record, disambiguating `name_hint` against every name in the store.
    ///
    /// A blank hint falls back to the type name.
    pub fn add(&mut self, name_hint: &str, object_type: ObjectType) -> ObjectId {
        let name_hint = if name_hint.trim().is_empty() {
            object_type.as_str()
        } else {
            name_hint
        };
        let name = self.unique_name(name_hint);
        let id = self.insert(name, object_type, None);
        tracing::debug!(%id, object_type = %object_type, "Added outline object");
        id
    }

    /// Commits a new name after checking it against the record's siblings.
    pub fn rename(&mut self, id: ObjectId, name: &str) -> Result<()> {
        validate_rename(self, id, name)?;
        if let Some(record) = self.get_mut(id) {
            tracing::debug!(%id, from = %record.name, to = %name, "Renamed outline object");
            record.name = name.to_string();
        }
        Ok(())
    }

    /// Unlinks `id` from its parent (or the root list) and frees its slot.
    ///
    /// Does not recurse: callers remove descendants themselves, computing the
    /// full removal set before the first call.
    pub fn detach_and_remove(&mut self, id: ObjectId) -> Option<ObjectRecord> {
        let parent = self.get(id)?.parent;

        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.get_mut(parent_id) {
                    parent.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        let slot = &mut self.slots[id.idx as usize];
        let record = slot.record.take();
        self.free_list.push(id.idx);
        self.len -= 1;
        record
    }

    // -- Transient flags --

    pub fn set_expanded(&mut self, id: ObjectId, expanded: bool) {
        if let Some(record) = self.get_mut(id) {
            record.expanded = expanded;
        }
    }

    pub fn toggle_expanded(&mut self, id: ObjectId) {
        if let Some(record) = self.get_mut(id) {
            record.expanded = !record.expanded;
        }
    }

    pub fn set_visible(&mut self, id: ObjectId, visible: bool) {
        if let Some(record) = self.get_mut(id) {
            record.visible = visible;
        }
    }

    pub fn expand_all(&mut self) {
        self.set_all_expanded(true);
    }

    pub fn collapse_all(&mut self) {
        self.set_all_expanded(false);
    }

    fn set_all_expanded(&mut self, expanded: bool) {
        for record in self.slots.iter_mut().filter_map(|slot| slot.record.as_mut()) {
            record.expanded = expanded;
        }
    }

    // -- Diagnostics --

    /// Describes every broken structural invariant. Empty for a healthy store.
    pub fn integrity_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let live: Vec<(ObjectId, &ObjectRecord)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.record.as_ref().map(|record| {
                    (
                        ObjectId {
                            idx: idx as u32,
                            generation: slot.generation,
                        },
                        record,
                    )
                })
            })
            .collect();

        if live.len() != self.len {
            problems.push(format!(
                "len is {} but {} records are live",
                self.len,
                live.len()
            ));
        }

        for (id, record) in &live {
            match record.parent {
                Some(parent_id) => match self.get(parent_id) {
                    Some(parent) => {
                        let links = parent.children.iter().filter(|c| **c == *id).count();
                        if links != 1 {
                            problems.push(format!(
                                "{} is listed {} times under its parent {}",
                                id, links, parent_id
                            ));
                        }
                    }
                    None => problems.push(format!("{} has dangling parent {}", id, parent_id)),
                },
                None => {
                    let links = self.roots.iter().filter(|r| **r == *id).count();
                    if links != 1 {
                        problems.push(format!("root {} is listed {} times", id, links));
                    }
                }
            }

            for child_id in &record.children {
                match self.get(*child_id) {
                    Some(child) if child.parent == Some(*id) => {}
                    Some(_) => problems.push(format!(
                        "{} lists {} which points at another parent",
                        id, child_id
                    )),
                    None => problems.push(format!("{} lists dead child {}", id, child_id)),
                }
            }

            let mut names = HashSet::new();
            for child_id in &record.children {
                if let Some(child) = self.get(*child_id) {
                    if !names.insert(child.name.as_str()) {
                        problems.push(format!("duplicate name '{}' under {}", child.name, id));
                    }
                }
            }
        }

        let mut root_names = HashSet::new();
        for root in &self.roots {
            if let Some(record) = self.get(*root) {
                if !root_names.insert(record.name.as_str()) {
                    problems.push(format!("duplicate root name '{}'", record.name));
                }
            }
        }

        if self.preorder().len() != live.len() {
            problems.push("some records are unreachable from the roots".to_string());
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> (TreeStore, ObjectId, ObjectId, ObjectId) {
        let mut store = TreeStore::new();
        let group = store.insert("Group".into(), ObjectType::Group, None);
        let a = store.insert("A".into(), ObjectType::Mesh, Some(group));
        let b = store.insert("B".into(), ObjectType::Mesh, Some(a));
        (store, group, a, b)
    }

    #[test]
    fn test_insert_and_get() {
        let (store, group, a, b) = small_tree();
        assert_eq!(store.len(), 3);
        assert_eq!(store.roots(), &[group]);
        assert_eq!(store.get(a).unwrap().parent(), Some(group));
        assert_eq!(store.get(group).unwrap().children(), &[a]);
        assert_eq!(store.get(b).unwrap().name(), "B");
        assert!(store.integrity_violations().is_empty());
    }

    #[test]
    fn test_descendants_recurses() {
        let (store, group, a, b) = small_tree();
        let found = store.descendants(group);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&a));
        assert!(found.contains(&b));
        assert!(store.descendants(b).is_empty());
    }

    #[test]
    fn test_descendants_skips_dead_children() {
        let (mut store, group, a, b) = small_tree();
        // Leave `a` listed under `group` but free its slot.
        let slot = &mut store.slots[a.idx as usize];
        slot.record = None;
        let found = store.descendants(group);
        assert!(found.is_empty(), "dead child and its subtree are unreachable");
        assert!(!found.contains(&b));
    }

    #[test]
    fn test_descendants_of_unknown_id_is_empty() {
        let (mut store, _, _, b) = small_tree();
        store.detach_and_remove(b);
        assert!(store.descendants(b).is_empty());
    }

    #[test]
    fn test_detach_and_remove_does_not_recurse() {
        let (mut store, group, a, b) = small_tree();
        let removed = store.detach_and_remove(b).unwrap();
        assert_eq!(removed.name(), "B");
        assert!(store.get(a).unwrap().children().is_empty());
        assert_eq!(store.len(), 2);

        assert!(store.detach_and_remove(b).is_none());
        assert!(store.contains(group));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let (mut store, _, _, b) = small_tree();
        store.detach_and_remove(b);
        let fresh = store.add("Fresh", ObjectType::Light);
        assert_eq!(fresh.index(), b.index());
        assert_ne!(fresh, b);
        assert!(store.get(b).is_none());
        assert_eq!(store.get(fresh).unwrap().name(), "Fresh");
    }

    #[test]
    fn test_add_disambiguates_globally() {
        let (mut store, _, _, _) = small_tree();
        // "B" exists only as a nested record, but add still avoids it.
        let id = store.add("B", ObjectType::Mesh);
        assert_eq!(store.get(id).unwrap().name(), "B_01");
        let id = store.add("B", ObjectType::Mesh);
        assert_eq!(store.get(id).unwrap().name(), "B_02");
        let id = store.add("C", ObjectType::Camera);
        assert_eq!(store.get(id).unwrap().name(), "C");
        assert!(store.get(id).unwrap().is_root());
    }

    #[test]
    fn test_add_blank_hint_uses_type_name() {
        let mut store = TreeStore::new();
        let first = store.add("   ", ObjectType::Mesh);
        let second = store.add("", ObjectType::Mesh);
        assert_eq!(store.get(first).unwrap().name(), "mesh");
        assert_eq!(store.get(second).unwrap().name(), "mesh_01");

        let json = serde_json::to_string(&store.to_serialized()).unwrap();
        let reloaded = TreeStore::load(&json).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.to_serialized(), store.to_serialized());
    }

    #[test]
    fn test_suffix_width_is_configurable() {
        let mut store = TreeStore::new().with_suffix_width(3);
        store.add("Mesh", ObjectType::Mesh);
        let id = store.add("Mesh", ObjectType::Mesh);
        assert_eq!(store.get(id).unwrap().name(), "Mesh_001");
    }

    #[test]
    fn test_siblings_of_root_are_other_roots() {
        let (mut store, group, a, _) = small_tree();
        let other = store.add("Other", ObjectType::Light);
        assert_eq!(store.siblings(group), vec![other]);
        assert!(store.siblings(a).is_empty());
    }

    #[test]
    fn test_preorder() {
        let (mut store, group, a, b) = small_tree();
        let other = store.add("Other", ObjectType::Camera);
        assert_eq!(store.preorder(), vec![group, a, b, other]);
    }

    #[test]
    fn test_expand_collapse_all() {
        let (mut store, group, a, _) = small_tree();
        store.collapse_all();
        assert!(!store.get(group).unwrap().expanded);
        store.toggle_expanded(a);
        assert!(store.get(a).unwrap().expanded);
        store.expand_all();
        assert!(store.get(group).unwrap().expanded);
    }
}
