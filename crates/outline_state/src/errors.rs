use thiserror::Error;

use crate::ObjectId;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Malformed outline input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Malformed outline input: duplicate sibling name '{name}'")]
    DuplicateSiblingName { name: String },

    #[error("Malformed outline input: object names must not be empty")]
    EmptyName,

    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("Rename rejected: {0}")]
    Rename(#[from] RenameError),

    #[error("Cannot {operation} while the delete workflow is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

impl OutlineError {
    /// True for every error that stems from the serialized tree rather than a command.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            OutlineError::MalformedInput(_)
                | OutlineError::DuplicateSiblingName { .. }
                | OutlineError::EmptyName
        )
    }
}

/// Why a proposed name cannot be committed. Shown inline next to the edit box.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("A sibling named '{name}' already exists")]
    DuplicateSibling { name: String },

    #[error("Object no longer exists")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, OutlineError>;
