use thiserror::Error;

/// Message shown to an editing user whenever a flow is rejected at save time.
pub const REMEDIATION: &str =
    "every step needs text and at least one option, and root must exist";

/// Errors raised by the validator when a flow cannot be saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("root missing: {}", REMEDIATION)]
    RootMissing,

    #[error("root step is invalid: {}", REMEDIATION)]
    RootInvalid,
}

/// Errors raised by a `FlowStore` or `EnablementStore`.
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    #[error("I/O failure on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to encode flow: {0}")]
    Encode(String),

    #[error("Failed to decode flow: {0}")]
    Decode(String),

    #[error("Store rejected the request: {0}")]
    Rejected(String),
}

/// Errors raised by the runtime navigator. None of them change traversal state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Step '{target}' not found (selected from step '{from}')")]
    StepNotFound { from: String, target: String },

    #[error("Step '{node_id}' has no option at index {index}")]
    OptionOutOfRange { node_id: String, index: usize },

    #[error("Step '{node_id}' has no option labelled '{label}'")]
    LabelNotFound { node_id: String, label: String },
}

/// Errors that can occur when converting a custom format into a `FlowGraph`.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Invalid flow data: {0}")]
    InvalidData(String),
}

/// Errors surfaced to the caller by `FlowEngine::save`.
#[derive(Error, Debug, Clone)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Saving the flow failed: {0}")]
    Persistence(#[from] PersistenceError),
}
