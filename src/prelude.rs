//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the parley crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use parley::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut editor = FlowEditor::new(FlowGraph::starter(), EngineConfig::default());
//! let step = editor.add_step();
//! editor.update_step_text(&step, "Which semester are you in?");
//!
//! let cleaned = validate(editor.graph())?;
//! let navigator = Navigator::new(&cleaned);
//! println!("{:?}", navigator.view());
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::flow::{
    Enablement, FlowGraph, FlowOption, IntoFlow, Node, ROOT_ID, Target, WireFlow, WireNode,
    WireOption,
};

// Validation, editing and runtime
pub use crate::editor::{FlowEditor, MoveDirection, OptionPatch};
pub use crate::navigator::{Effect, NavState, Navigator, StepView, Transition};
pub use crate::validator::{CleanReport, CleanedGraph, Diagnostic, lint, validate, validate_with_report};

// Sessions and storage
pub use crate::config::EngineConfig;
pub use crate::engine::{FlowEngine, LoadOutcome};
pub use crate::persistence::{EnablementStore, FileStore, FlowStore, MemoryStore, StoreFormat};

// Error types
pub use crate::error::{
    FlowConversionError, NavigationError, PersistenceError, SaveError, ValidationError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
