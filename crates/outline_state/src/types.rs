use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PropertiesKind, RenameError};

/// A handle to a record in a [`TreeStore`](crate::TreeStore).
///
/// Holds a slot index and a generation counter. Freed slots are reused, but
/// reuse bumps the generation, so a handle to a deleted record never resolves
/// to whatever lives in that slot afterwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ObjectId {
    /// Raw slot index, for diagnostics only.
    pub fn index(self) -> u32 {
        self.idx
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}@gen{})", self.idx, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.idx, self.generation)
    }
}

/// Kind of outline object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Mesh,
    Camera,
    Light,
    Group,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Mesh,
        ObjectType::Camera,
        ObjectType::Light,
        ObjectType::Group,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Mesh => "mesh",
            ObjectType::Camera => "camera",
            ObjectType::Light => "light",
            ObjectType::Group => "group",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ObjectType::Mesh => "📦",
            ObjectType::Camera => "📷",
            ObjectType::Light => "💡",
            ObjectType::Group => "📁",
        }
    }

    /// Which properties view shows this object. Groups reuse the mesh view.
    pub fn properties_kind(&self) -> PropertiesKind {
        match self {
            ObjectType::Mesh | ObjectType::Group => PropertiesKind::Mesh,
            ObjectType::Camera => PropertiesKind::Camera,
            ObjectType::Light => PropertiesKind::Light,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ObjectType::Group)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-progress rename: the text being typed and the last validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub text: String,
    pub error: Option<RenameError>,
}

impl RenameDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }
}

/// A single named, typed node in the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    pub(crate) name: String,
    pub(crate) object_type: ObjectType,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    /// Whether the tree view shows this record's children
    pub expanded: bool,
    pub visible: bool,
    pub(crate) rename: Option<RenameDraft>,
}

impl ObjectRecord {
    pub(crate) fn new(name: String, object_type: ObjectType, parent: Option<ObjectId>) -> Self {
        Self {
            name,
            object_type,
            parent,
            children: Vec::new(),
            expanded: true,
            visible: true,
            rename: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn rename_draft(&self) -> Option<&RenameDraft> {
        self.rename.as_ref()
    }

    pub fn is_renaming(&self) -> bool {
        self.rename.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_maps_to_mesh_properties() {
        assert_eq!(ObjectType::Group.properties_kind(), PropertiesKind::Mesh);
        assert_eq!(ObjectType::Mesh.properties_kind(), PropertiesKind::Mesh);
        assert_eq!(ObjectType::Camera.properties_kind(), PropertiesKind::Camera);
        assert_eq!(ObjectType::Light.properties_kind(), PropertiesKind::Light);
    }

    #[test]
    fn test_object_type_serde_is_lowercase() {
        let json = serde_json::to_string(&ObjectType::Camera).unwrap();
        assert_eq!(json, "\"camera\"");
        let parsed: ObjectType = serde_json::from_str("\"group\"").unwrap();
        assert_eq!(parsed, ObjectType::Group);
        assert!(serde_json::from_str::<ObjectType>("\"material\"").is_err());
    }

    #[test]
    fn test_id_display() {
        let id = ObjectId { idx: 3, generation: 1 };
        assert_eq!(id.to_string(), "#3v1");
        assert_eq!(format!("{:?}", id), "ObjectId(3@gen1)");
    }
}
