//! Serialized outline format and bulk loading.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{ObjectId, ObjectType, OutlineError, Result, TreeStore};

/// Scene shown by a fresh editor session.
pub const SAMPLE_OUTLINE_JSON: &str = r#"
{
    "objects": [
        {
            "name": "House_01_Structure",
            "type": "group",
            "children": [
                { "name": "Foundation_01", "type": "mesh" },
                { "name": "Walls_01", "type": "mesh" },
                { "name": "Roof_01", "type": "mesh" }
            ]
        },
        {
            "name": "LivingRoom_Furniture_00000",
            "type": "group",
            "children": [
                { "name": "Sofa_01", "type": "mesh" },
                { "name": "CoffeeTable_01", "type": "mesh" }
            ]
        },
        { "name": "House_01_Landscape", "type": "mesh" },
        { "name": "Main Camera", "type": "camera" },
        { "name": "Sun Light", "type": "light" }
    ]
}
"#;

/// Top-level document: `{ "objects": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedOutline {
    #[serde(default)]
    pub objects: Vec<SerializedObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedObject {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SerializedObject>,
}

impl SerializedObject {
    pub fn new(name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            name: name.into(),
            object_type,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SerializedObject) -> Self {
        self.children.push(child);
        self
    }
}

impl TreeStore {
    /// Parses a serialized outline into a fresh store.
    ///
    /// Ids are handed out in pre-order, so the same input always yields the
    /// same ids. Input that would break sibling uniqueness is rejected whole.
    pub fn load(json: &str) -> Result<Self> {
        let document: SerializedOutline = serde_json::from_str(json)?;
        Self::from_serialized(&document)
    }

    /// Like [`load`](Self::load), but falls back to an empty store.
    pub fn load_or_empty(json: &str) -> (Self, Option<OutlineError>) {
        match Self::load(json) {
            Ok(store) => (store, None),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load outline, starting empty");
                (Self::new(), Some(err))
            }
        }
    }

    pub fn sample() -> Self {
        Self::load(SAMPLE_OUTLINE_JSON).unwrap_or_default()
    }

    pub fn from_serialized(document: &SerializedOutline) -> Result<Self> {
        let mut store = Self::new();
        store.insert_level(&document.objects, None)?;
        tracing::info!(records = store.len(), roots = store.roots().len(), "Loaded outline");
        Ok(store)
    }

    fn insert_level(
        &mut self,
        objects: &[SerializedObject],
        parent: Option<ObjectId>,
    ) -> Result<()> {
        let mut names = HashSet::new();
        for object in objects {
            if object.name.trim().is_empty() {
                return Err(OutlineError::EmptyName);
            }
            if !names.insert(object.name.as_str()) {
                return Err(OutlineError::DuplicateSiblingName {
                    name: object.name.clone(),
                });
            }

            let id = self.insert(object.name.clone(), object.object_type, parent);
            self.insert_level(&object.children, Some(id))?;
        }
        Ok(())
    }

    /// Snapshot of the current tree in the serialized format.
    pub fn to_serialized(&self) -> SerializedOutline {
        SerializedOutline {
            objects: self
                .roots()
                .iter()
                .filter_map(|id| self.serialize_subtree(*id))
                .collect(),
        }
    }

    fn serialize_subtree(&self, id: ObjectId) -> Option<SerializedObject> {
        let record = self.get(id)?;
        Some(SerializedObject {
            name: record.name().to_string(),
            object_type: record.object_type(),
            children: record
                .children()
                .iter()
                .filter_map(|child| self.serialize_subtree(*child))
                .collect(),
        })
    }
}
