use parking_lot::Mutex;
use std::sync::Arc;

use outline_state::{PropertiesKind, PropertiesSink};

use crate::ObjectProperties;

/// What the properties panel currently shows
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedObject {
    pub kind: PropertiesKind,
    pub name: String,
    pub properties: Option<ObjectProperties>,
}

impl Default for SelectedObject {
    fn default() -> Self {
        Self {
            kind: PropertiesKind::None,
            name: String::new(),
            properties: None,
        }
    }
}

impl SelectedObject {
    pub fn is_none(&self) -> bool {
        self.kind == PropertiesKind::None
    }
}

/// Properties panel state, driven by outline selection changes
#[derive(Clone, Debug, Default)]
pub struct PropertiesPanel {
    selected: SelectedObject,
}

impl PropertiesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &SelectedObject {
        &self.selected
    }

    /// Editable property set of the shown object
    pub fn properties_mut(&mut self) -> Option<&mut ObjectProperties> {
        self.selected.properties.as_mut()
    }

    /// Shows `name` with fresh defaults for `kind`, or clears the panel for `None`.
    pub fn select_object(&mut self, kind: PropertiesKind, name: &str) {
        self.selected = match ObjectProperties::defaults_for(kind) {
            Some(properties) => SelectedObject {
                kind,
                name: name.to_string(),
                properties: Some(properties),
            },
            None => SelectedObject::default(),
        };
        tracing::debug!(kind = %kind, name, "Properties panel selection changed");
    }

    /// Replaces the shown object's property set, e.g. with values loaded elsewhere.
    ///
    /// Ignored when nothing is shown or when `properties` is for a different kind.
    pub fn set_properties(&mut self, properties: ObjectProperties) -> bool {
        if self.selected.is_none() || properties.kind() != self.selected.kind {
            return false;
        }
        self.selected.properties = Some(properties);
        true
    }
}

impl PropertiesSink for PropertiesPanel {
    fn select(&mut self, kind: PropertiesKind, name: &str) {
        self.select_object(kind, name);
    }
}

/// A panel shared between the outline's observer slot and whoever draws it
#[derive(Clone, Debug, Default)]
pub struct SharedPanel {
    inner: Arc<Mutex<PropertiesPanel>>,
}

impl SharedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> SelectedObject {
        self.inner.lock().selected().clone()
    }

    pub fn with_panel<R>(&self, f: impl FnOnce(&mut PropertiesPanel) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl PropertiesSink for SharedPanel {
    fn select(&mut self, kind: PropertiesKind, name: &str) {
        self.inner.lock().select_object(kind, name);
    }
}
