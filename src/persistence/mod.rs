//! Storage seams for flows and for the site-wide chatbot switch.
//!
//! The engine only talks to these traits. `MemoryStore` and `FileStore` are
//! provided for tests, previews and single-host deployments; an HTTP or
//! database backend implements the same traits.

use crate::error::PersistenceError;
use crate::flow::WireFlow;
use crate::validator::CleanedGraph;
use async_trait::async_trait;

mod file;
mod memory;

pub use file::{FileStore, StoreFormat};
pub use memory::MemoryStore;

/// Loads and saves the dialogue graph.
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Fetches the stored flow. `Ok(None)` means nothing has been saved yet.
    async fn load_flow(&self) -> Result<Option<WireFlow>, PersistenceError>;

    /// Persists a flow. Only validator output can be passed in.
    async fn save_flow(&self, flow: &CleanedGraph) -> Result<(), PersistenceError>;
}

/// Reads and writes the chatbot enablement flag, independent of the flow.
#[async_trait]
pub trait EnablementStore: Send + Sync {
    async fn is_enabled(&self) -> Result<bool, PersistenceError>;

    async fn set_enabled(&self, enabled: bool) -> Result<(), PersistenceError>;
}
