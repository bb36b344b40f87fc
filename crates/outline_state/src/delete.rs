//! Two-phase delete: propose, then confirm or cancel.
//!
//! Proposing only records the targets and builds the confirmation text.
//! Confirming computes the full cascade (targets plus every descendant)
//! before the first mutation, so the store never sees a half-done delete.

use std::collections::HashSet;
use std::fmt;

use crate::{ObjectId, OutlineError, Result, Selection, TreeStore};

/// Human-readable description of what a pending delete will remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteSummary {
    Object { name: String },
    Group { name: String },
    /// Several targets, some of them groups
    Mixed { groups: usize },
    Groups { count: usize },
    Objects { count: usize },
}

impl DeleteSummary {
    fn describe(store: &TreeStore, targets: &[ObjectId]) -> Self {
        if let [only] = targets {
            if let Some(record) = store.get(*only) {
                let name = record.name().to_string();
                return if record.object_type().is_group() {
                    DeleteSummary::Group { name }
                } else {
                    DeleteSummary::Object { name }
                };
            }
        }

        let groups = targets
            .iter()
            .filter_map(|id| store.get(*id))
            .filter(|record| record.object_type().is_group())
            .count();
        let others = targets.len() - groups;

        match (groups, others) {
            (0, count) => DeleteSummary::Objects { count },
            (groups, 0) => DeleteSummary::Groups { count: groups },
            (groups, _) => DeleteSummary::Mixed { groups },
        }
    }
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteSummary::Object { name } => write!(f, "object {}", name),
            DeleteSummary::Group { name } => write!(f, "group {}", name),
            DeleteSummary::Mixed { groups } => {
                write!(f, "all selected items and {} groups", groups)
            }
            DeleteSummary::Groups { count } => write!(f, "{} groups", count),
            DeleteSummary::Objects { count } => write!(f, "{} objects", count),
        }
    }
}

/// A delete waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub targets: Vec<ObjectId>,
    pub summary: DeleteSummary,
}

impl PendingDelete {
    /// Text for the confirmation dialog
    pub fn prompt(&self) -> String {
        format!("Delete {}? This action cannot be undone.", self.summary)
    }
}

/// Outcome of a confirmed delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Removed ids in the display order they had before removal
    pub removed: Vec<ObjectId>,
}

impl DeleteReport {
    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteWorkflow {
    pending: Option<PendingDelete>,
}

impl DeleteWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// "idle" or "proposed"
    pub fn state(&self) -> &'static str {
        if self.pending.is_some() {
            "proposed"
        } else {
            "idle"
        }
    }

    pub fn is_proposed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    /// Opens (or re-opens) the confirmation for `targets`. Stale ids are dropped.
    pub fn propose(&mut self, store: &TreeStore, targets: &[ObjectId]) -> &PendingDelete {
        let mut seen = HashSet::new();
        let targets: Vec<ObjectId> = targets
            .iter()
            .copied()
            .filter(|id| store.contains(*id) && seen.insert(*id))
            .collect();

        let summary = DeleteSummary::describe(store, &targets);
        tracing::debug!(targets = targets.len(), summary = %summary, "Delete proposed");

        self.pending.insert(PendingDelete { targets, summary })
    }

    /// Removes the pending targets and all their descendants.
    pub fn confirm(
        &mut self,
        store: &mut TreeStore,
        selection: &mut Selection,
    ) -> Result<DeleteReport> {
        let Some(pending) = self.pending.take() else {
            return Err(self.invalid("confirm"));
        };

        let mut removal: HashSet<ObjectId> = HashSet::new();
        for id in &pending.targets {
            if store.contains(*id) {
                removal.insert(*id);
                removal.extend(store.descendants(*id));
            }
        }

        let removed: Vec<ObjectId> = store
            .preorder()
            .into_iter()
            .filter(|id| removal.contains(id))
            .collect();

        for id in &removed {
            store.detach_and_remove(*id);
        }
        selection.remove_all(&removal);

        tracing::debug!(removed = removed.len(), "Delete confirmed");
        Ok(DeleteReport { removed })
    }

    pub fn cancel(&mut self) -> Result<()> {
        if self.pending.take().is_none() {
            return Err(self.invalid("cancel"));
        }
        tracing::debug!("Delete cancelled");
        Ok(())
    }

    fn invalid(&self, operation: &'static str) -> OutlineError {
        tracing::warn!(
            operation,
            state = self.state(),
            "Delete action fired without a pending request"
        );
        OutlineError::InvalidState {
            operation,
            state: self.state(),
        }
    }
}
