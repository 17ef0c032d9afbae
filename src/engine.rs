use crate::config::EngineConfig;
use crate::editor::FlowEditor;
use crate::error::{SaveError, ValidationError};
use crate::flow::{FlowGraph, IntoFlow};
use crate::persistence::FlowStore;
use crate::validator::{CleanedGraph, validate, validate_with_report};
use tracing::{info, warn};

/// How `FlowEngine::load` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored flow replaced the working copy.
    Remote,
    /// The stored flow was loaded for editing but failed validation, so the
    /// previously published graph is still the one served.
    Unpublishable,
    /// Nothing usable was stored; the engine kept the graph it already had.
    Fallback,
}

/// One editing or visitor session over a flow.
///
/// Owns the working copy (through its editor), the store it persists to, and
/// the last cleaned graph that was saved or loaded. Sessions are independent
/// values, so a preview and a live session can run side by side.
pub struct FlowEngine<S: FlowStore> {
    config: EngineConfig,
    editor: FlowEditor,
    store: S,
    published: Option<CleanedGraph>,
}

pub struct FlowEngineBuilder<S: FlowStore> {
    store: S,
    config: EngineConfig,
    graph: Option<FlowGraph>,
}

impl<S: FlowStore> FlowEngineBuilder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            graph: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Starts from `graph` instead of the built-in starter flow.
    pub fn with_graph(mut self, graph: FlowGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn build(self) -> FlowEngine<S> {
        let graph = self.graph.unwrap_or_else(FlowGraph::starter);
        let published = validate(&graph).ok();
        FlowEngine {
            editor: FlowEditor::new(graph, self.config.clone()),
            config: self.config,
            store: self.store,
            published,
        }
    }
}

impl<S: FlowStore> FlowEngine<S> {
    pub fn builder(store: S) -> FlowEngineBuilder<S> {
        FlowEngineBuilder::new(store)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn editor(&self) -> &FlowEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut FlowEditor {
        &mut self.editor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The last graph that was saved, loaded, or built in, if it was valid.
    pub fn published(&self) -> Option<&CleanedGraph> {
        self.published.as_ref()
    }

    /// The graph visitors should be served, or `None` when the flow is inactive.
    pub fn live(&self) -> Option<&CleanedGraph> {
        self.published.as_ref().filter(|g| g.is_active)
    }

    /// A cleaned copy of the working copy for driving a preview navigator.
    pub fn preview(&self) -> Result<CleanedGraph, ValidationError> {
        validate(self.editor.graph())
    }

    /// Replaces the working copy with the stored flow.
    ///
    /// A missing flow, a store failure or an unreadable payload is not an
    /// error: the engine keeps whatever graph it already holds. A stored flow
    /// that fails validation still lands in the working copy so it can be
    /// repaired, but never replaces the published graph.
    pub async fn load(&mut self) -> LoadOutcome {
        let wire = match self.store.load_flow().await {
            Ok(Some(wire)) => wire,
            Ok(None) => {
                info!("no stored flow, keeping current graph");
                return LoadOutcome::Fallback;
            }
            Err(e) => {
                warn!(error = %e, "loading flow failed, keeping current graph");
                return LoadOutcome::Fallback;
            }
        };

        let graph = match wire.into_flow() {
            Ok(graph) => graph,
            Err(e) => {
                warn!(error = %e, "stored flow is unreadable, keeping current graph");
                return LoadOutcome::Fallback;
            }
        };

        let outcome = match validate(&graph) {
            Ok(cleaned) => {
                self.published = Some(cleaned);
                LoadOutcome::Remote
            }
            Err(e) => {
                warn!(error = %e, "stored flow is invalid, keeping published graph");
                LoadOutcome::Unpublishable
            }
        };
        self.editor.replace_graph(graph);
        info!(steps = self.editor.graph().len(), "flow loaded");
        outcome
    }

    /// Validates the working copy and persists the cleaned result.
    ///
    /// The working copy is never modified, so after any failure the user can
    /// fix the flow and call `save` again. Concurrent sessions are not
    /// coordinated: the last successful save wins.
    pub async fn save(&mut self) -> Result<&CleanedGraph, SaveError> {
        let (cleaned, report) = validate_with_report(self.editor.graph())?;
        self.store.save_flow(&cleaned).await.map_err(|e| {
            warn!(error = %e, "saving flow failed");
            SaveError::from(e)
        })?;
        info!(
            steps = cleaned.len(),
            dropped_steps = report.dropped_nodes.len(),
            "flow saved"
        );
        Ok(&*self.published.insert(cleaned))
    }
}
