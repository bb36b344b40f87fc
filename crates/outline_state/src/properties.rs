//! Properties collaborator interface
//!
//! The outline tells whoever displays object properties what became selected.
//! It only knows this trait; the panel itself lives in another crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which properties view should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertiesKind {
    Mesh,
    Camera,
    Light,
    None,
}

impl PropertiesKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertiesKind::Mesh => "mesh",
            PropertiesKind::Camera => "camera",
            PropertiesKind::Light => "light",
            PropertiesKind::None => "none",
        }
    }
}

impl fmt::Display for PropertiesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives selection-changed notifications from the outline.
pub trait PropertiesSink {
    /// `kind` is [`PropertiesKind::None`] with an empty name when nothing is selected.
    fn select(&mut self, kind: PropertiesKind, name: &str);
}

/// Sink used when no properties panel is registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PropertiesSink for NullSink {
    fn select(&mut self, _kind: PropertiesKind, _name: &str) {}
}

impl<F> PropertiesSink for F
where
    F: FnMut(PropertiesKind, &str),
{
    fn select(&mut self, kind: PropertiesKind, name: &str) {
        self(kind, name)
    }
}
