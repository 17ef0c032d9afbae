//! # Parley - Dialogue Graph Engine
//!
//! **Parley** runs button-driven chatbot conversations. A conversation is a
//! directed graph of steps: each step shows a message and a set of options,
//! and each option leads to another step or triggers a host-side effect
//! (opening WhatsApp, navigating to a page).
//!
//! ## Core Workflow
//!
//! 1.  **Edit**: A `FlowEditor` owns the admin's working copy. Its operations never
//!     fail; half-finished steps are allowed while editing.
//! 2.  **Validate**: `validate` turns a working copy into a `CleanedGraph`, dropping
//!     malformed options and steps. A flow whose `root` step does not survive is rejected.
//! 3.  **Persist**: A `FlowStore` saves the cleaned graph. `FlowEngine` ties the
//!     editor, the validator and the store together for one session.
//! 4.  **Walk**: A `Navigator` walks a cleaned graph for a visitor or a preview,
//!     with `select`, `back` and `reset`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parley::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("path/to/flow.json")?;
//!     let graph = WireFlow::from_json(&json)?.into_flow()?;
//!
//!     // Reject flows without a usable root and strip anything malformed.
//!     let cleaned = validate(&graph)?;
//!
//!     let mut navigator = Navigator::new(&cleaned);
//!     match navigator.select(0)? {
//!         Transition::Moved { to, .. } => println!("-> now at '{}'", to),
//!         Transition::Effect(Effect::OpenWhatsApp) => println!("-> open WhatsApp"),
//!         Transition::Effect(Effect::Navigate { path }) => println!("-> go to {}", path),
//!     }
//!
//!     navigator.back();
//!     assert_eq!(navigator.current_id(), "root");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod flow;
pub mod navigator;
pub mod persistence;
pub mod prelude;
pub mod validator;
