//! Thread-safe handle to an outline session.
//!
//! Mutations are serialized behind a single write lock; concurrent readers
//! share the read lock and never observe a command half-applied.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::{OutlineConfig, OutlineState};

#[derive(Clone)]
pub struct SharedOutline {
    inner: Arc<RwLock<OutlineState>>,
}

impl SharedOutline {
    pub fn new(outline: OutlineState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(outline)),
        }
    }

    pub fn with_config(config: OutlineConfig) -> Self {
        Self::new(OutlineState::new(config))
    }

    /// Runs `f` with shared access
    pub fn read<R>(&self, f: impl FnOnce(&OutlineState) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access; the whole closure is one atomic command.
    pub fn write<R>(&self, f: impl FnOnce(&mut OutlineState) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl Default for SharedOutline {
    fn default() -> Self {
        Self::new(OutlineState::default())
    }
}
