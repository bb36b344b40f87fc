use serde::{Deserialize, Serialize};

use outline_state::PropertiesKind;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    pub rotation: [f32; 3], // Euler angles in degrees
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshProperties {
    pub visible: bool,
    pub transform: Transform,
    pub material: String,
}

impl Default for MeshProperties {
    fn default() -> Self {
        Self {
            visible: true,
            transform: Transform::default(),
            material: "default".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraProperties {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    /// Horizontal field of view in degrees
    pub fov_x: f32,
    pub fov_y: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for CameraProperties {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            rotation: [0.0, 0.0, 0.0],
            fov_x: 60.0,
            fov_y: 45.0,
            near_clip: 0.1,
            far_clip: 100.0,
        }
    }
}

/// HDRI environment light
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightProperties {
    pub hdri_file: String,
    pub intensity: f32,
    pub rotation: f32,
}

impl Default for LightProperties {
    fn default() -> Self {
        Self {
            hdri_file: String::new(),
            intensity: 1.0,
            rotation: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectProperties {
    Mesh(MeshProperties),
    Camera(CameraProperties),
    Light(LightProperties),
}

impl ObjectProperties {
    /// Fresh defaults for `kind`; `None` has no property set.
    pub fn defaults_for(kind: PropertiesKind) -> Option<Self> {
        match kind {
            PropertiesKind::Mesh => Some(ObjectProperties::Mesh(MeshProperties::default())),
            PropertiesKind::Camera => Some(ObjectProperties::Camera(CameraProperties::default())),
            PropertiesKind::Light => Some(ObjectProperties::Light(LightProperties::default())),
            PropertiesKind::None => None,
        }
    }

    pub fn kind(&self) -> PropertiesKind {
        match self {
            ObjectProperties::Mesh(_) => PropertiesKind::Mesh,
            ObjectProperties::Camera(_) => PropertiesKind::Camera,
            ObjectProperties::Light(_) => PropertiesKind::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_kind() {
        match ObjectProperties::defaults_for(PropertiesKind::Camera) {
            Some(ObjectProperties::Camera(camera)) => {
                assert_eq!(camera.position, [0.0, 0.0, 5.0]);
                assert_eq!(camera.fov_x, 60.0);
                assert_eq!(camera.far_clip, 100.0);
            }
            other => panic!("expected camera defaults, got {:?}", other),
        }

        match ObjectProperties::defaults_for(PropertiesKind::Mesh) {
            Some(ObjectProperties::Mesh(mesh)) => {
                assert!(mesh.visible);
                assert_eq!(mesh.material, "default");
                assert_eq!(mesh.transform.scale, [1.0, 1.0, 1.0]);
            }
            other => panic!("expected mesh defaults, got {:?}", other),
        }

        assert!(ObjectProperties::defaults_for(PropertiesKind::None).is_none());
    }

    #[test]
    fn test_transform_builder() {
        let transform = Transform::new()
            .with_position([1.0, 2.0, 3.0])
            .with_scale([2.0, 2.0, 2.0]);
        assert_eq!(transform.position, [1.0, 2.0, 3.0]);
        assert_eq!(transform.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(transform.scale, [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_kind_roundtrip() {
        let props = ObjectProperties::defaults_for(PropertiesKind::Light).unwrap();
        assert_eq!(props.kind(), PropertiesKind::Light);
    }
}
