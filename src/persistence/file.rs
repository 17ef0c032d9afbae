use super::{EnablementStore, FlowStore};
use crate::error::PersistenceError;
use crate::flow::{Enablement, WireFlow};
use crate::validator::CleanedGraph;
use async_trait::async_trait;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk encoding for the flow file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFormat {
    /// The camelCase JSON wire payload, with steps written in sorted key order.
    #[default]
    Json,
    /// A compact bincode snapshot of the same payload.
    Binary,
}

impl StoreFormat {
    pub fn encode(&self, flow: &WireFlow) -> Result<Vec<u8>, PersistenceError> {
        match self {
            StoreFormat::Json => serde_json::to_vec_pretty(flow)
                .map_err(|e| PersistenceError::Encode(e.to_string())),
            StoreFormat::Binary => encode_to_vec(flow, standard())
                .map_err(|e| PersistenceError::Encode(e.to_string())),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<WireFlow, PersistenceError> {
        match self {
            StoreFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| PersistenceError::Decode(e.to_string()))
            }
            StoreFormat::Binary => decode_from_slice(bytes, standard())
                .map(|(flow, _)| flow) // bincode 2 returns (data, bytes_read)
                .map_err(|e| PersistenceError::Decode(e.to_string())),
        }
    }
}

/// Keeps the flow and the enablement flag in two files.
///
/// File access uses blocking `std::fs` calls inside the async methods. That
/// is fine under `block_on` or a current-thread executor; on a multi-task
/// runtime, call it from a blocking task.
#[derive(Debug, Clone)]
pub struct FileStore {
    flow_path: PathBuf,
    enablement_path: PathBuf,
    format: StoreFormat,
}

impl FileStore {
    pub fn new(flow_path: impl Into<PathBuf>, enablement_path: impl Into<PathBuf>) -> Self {
        Self {
            flow_path: flow_path.into(),
            enablement_path: enablement_path.into(),
            format: StoreFormat::default(),
        }
    }

    pub fn with_format(mut self, format: StoreFormat) -> Self {
        self.format = format;
        self
    }

    pub fn flow_path(&self) -> &Path {
        &self.flow_path
    }
}

#[async_trait]
impl FlowStore for FileStore {
    async fn load_flow(&self) -> Result<Option<WireFlow>, PersistenceError> {
        let Some(bytes) = read_optional(&self.flow_path)? else {
            return Ok(None);
        };
        let flow = self.format.decode(&bytes)?;
        info!("Loaded flow from {}", self.flow_path.display());
        Ok(Some(flow))
    }

    async fn save_flow(&self, flow: &CleanedGraph) -> Result<(), PersistenceError> {
        let bytes = self.format.encode(&WireFlow::from(flow.graph()))?;
        write_file(&self.flow_path, &bytes)?;
        info!("Saved flow to {}", self.flow_path.display());
        Ok(())
    }
}

#[async_trait]
impl EnablementStore for FileStore {
    async fn is_enabled(&self) -> Result<bool, PersistenceError> {
        let Some(bytes) = read_optional(&self.enablement_path)? else {
            return Ok(false);
        };
        let flag: Enablement =
            serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Decode(e.to_string()))?;
        Ok(flag.is_enabled)
    }

    async fn set_enabled(&self, enabled: bool) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(&Enablement {
            is_enabled: enabled,
        })
        .map_err(|e| PersistenceError::Encode(e.to_string()))?;
        write_file(&self.enablement_path, &bytes)
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, PersistenceError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, e)),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
