//! Properties panel state
//!
//! Holds the object currently shown in the properties panel and its default
//! property set. Plugs into the outline as a [`outline_state::PropertiesSink`].

mod panel;
mod properties;

pub use panel::{PropertiesPanel, SelectedObject, SharedPanel};
pub use properties::{
    CameraProperties, LightProperties, MeshProperties, ObjectProperties, Transform,
};
