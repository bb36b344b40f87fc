//! Outline State
//!
//! In-memory scene outline for the editor's object browser.
//! Provides:
//! - An arena-backed forest of named, typed objects
//! - Case-insensitive search that flattens the tree
//! - Exclusive selection with cascading deselect
//! - Sibling-scoped rename validation
//! - A propose/confirm/cancel delete workflow with cascading removal
//!
//! Selection changes are reported through [`PropertiesSink`]; this crate has
//! no knowledge of how properties are displayed.

pub mod config;
pub mod delete;
pub mod errors;
pub mod logging;
pub mod outline;
pub mod properties;
pub mod rename;
pub mod search;
pub mod selection;
pub mod serialized;
pub mod shared;
pub mod store;
pub mod types;

pub use config::*;
pub use delete::*;
pub use errors::*;
pub use outline::*;
pub use properties::*;
pub use rename::*;
pub use search::*;
pub use selection::*;
pub use serialized::*;
pub use shared::*;
pub use store::*;
pub use types::*;
