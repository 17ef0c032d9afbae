use super::{EnablementStore, FlowStore};
use crate::error::PersistenceError;
use crate::flow::WireFlow;
use crate::validator::CleanedGraph;
use async_trait::async_trait;
use std::sync::Mutex;

/// An in-process store. Each save replaces the previous flow.
#[derive(Debug, Default)]
pub struct MemoryStore {
    flow: Mutex<Option<WireFlow>>,
    enabled: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `flow`, as if it had been saved earlier.
    pub fn with_flow(flow: WireFlow) -> Self {
        Self {
            flow: Mutex::new(Some(flow)),
            enabled: Mutex::new(false),
        }
    }

    /// The last saved payload, if any.
    pub fn snapshot(&self) -> Result<Option<WireFlow>, PersistenceError> {
        self.flow
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| poisoned())
    }
}

#[async_trait]
impl FlowStore for MemoryStore {
    async fn load_flow(&self) -> Result<Option<WireFlow>, PersistenceError> {
        self.snapshot()
    }

    async fn save_flow(&self, flow: &CleanedGraph) -> Result<(), PersistenceError> {
        let mut guard = self.flow.lock().map_err(|_| poisoned())?;
        *guard = Some(WireFlow::from(flow.graph()));
        Ok(())
    }
}

#[async_trait]
impl EnablementStore for MemoryStore {
    async fn is_enabled(&self) -> Result<bool, PersistenceError> {
        self.enabled.lock().map(|g| *g).map_err(|_| poisoned())
    }

    async fn set_enabled(&self, enabled: bool) -> Result<(), PersistenceError> {
        *self.enabled.lock().map_err(|_| poisoned())? = enabled;
        Ok(())
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Rejected("memory store lock was poisoned".to_string())
}
