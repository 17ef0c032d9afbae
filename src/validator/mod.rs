use crate::error::ValidationError;
use crate::flow::{FlowGraph, FlowOption, Node, ROOT_ID};
use std::ops::Deref;
use tracing::{debug, warn};

mod lint;

pub use lint::{Diagnostic, lint};

/// A graph that passed validation: root exists and comes first in `order`,
/// every step has text and at least one well-formed option, and all targets
/// are resolved against the surviving steps.
///
/// Only the validator constructs this type, so holding one is proof that the
/// graph may be persisted or served to visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedGraph(FlowGraph);

impl CleanedGraph {
    pub fn graph(&self) -> &FlowGraph {
        &self.0
    }

    pub fn into_inner(self) -> FlowGraph {
        self.0
    }
}

impl Deref for CleanedGraph {
    type Target = FlowGraph;

    fn deref(&self) -> &FlowGraph {
        &self.0
    }
}

/// What the cleaner removed from its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Steps dropped for missing text or usable options, in display order.
    pub dropped_nodes: Vec<String>,
    /// Options dropped for a blank label or blank target, across all steps.
    pub dropped_options: usize,
}

impl CleanReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_nodes.is_empty() && self.dropped_options == 0
    }
}

/// Cleans a graph for persistence. See `validate_with_report`.
pub fn validate(graph: &FlowGraph) -> Result<CleanedGraph, ValidationError> {
    validate_with_report(graph).map(|(cleaned, _)| cleaned)
}

/// Produces a cleaned copy of `graph` and a report of what was removed.
///
/// Malformed options are dropped first; a step is then kept only if its text
/// is non-blank and at least one option survived. Dangling step references
/// are kept, they are a runtime concern rather than a structural one.
///
/// Fails when root is absent, or when root itself did not survive cleaning.
pub fn validate_with_report(
    graph: &FlowGraph,
) -> Result<(CleanedGraph, CleanReport), ValidationError> {
    let mut source = graph.clone();
    source.normalize_order();

    let mut report = CleanReport::default();
    let mut kept: Vec<Node> = Vec::with_capacity(source.len());

    for node in source.steps() {
        let options: Vec<FlowOption> = node
            .options
            .iter()
            .filter(|o| o.is_well_formed())
            .cloned()
            .collect();
        report.dropped_options += node.options.len() - options.len();

        if !node.has_text() || options.is_empty() {
            report.dropped_nodes.push(node.id.clone());
            continue;
        }
        kept.push(Node::new(node.id.clone(), node.text.clone(), options));
    }

    if !kept.iter().any(|n| n.id == ROOT_ID) {
        let err = if graph.contains(ROOT_ID) {
            ValidationError::RootInvalid
        } else {
            ValidationError::RootMissing
        };
        warn!(error = %err, "flow rejected by validator");
        return Err(err);
    }

    let order = kept.iter().map(|n| n.id.clone()).collect();
    let cleaned = FlowGraph::from_parts(kept, order, graph.is_active);

    if !report.is_clean() {
        debug!(
            dropped_nodes = ?report.dropped_nodes,
            dropped_options = report.dropped_options,
            "flow cleaned"
        );
    }

    Ok((CleanedGraph(cleaned), report))
}
