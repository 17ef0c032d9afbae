use crate::flow::{FlowGraph, ROOT_ID, Target};
use ahash::AHashSet;
use std::collections::VecDeque;
use std::fmt;

/// A warning about a working copy. Diagnostics never block editing; the ones
/// for which `blocks_save` is true mirror what the validator will reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MissingRoot,
    EmptyText { node_id: String },
    MalformedOption { node_id: String, index: usize },
    NoUsableOptions { node_id: String },
    DanglingTarget { node_id: String, index: usize, raw: String },
    Unreachable { node_id: String },
}

impl Diagnostic {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Diagnostic::MissingRoot => None,
            Diagnostic::EmptyText { node_id }
            | Diagnostic::MalformedOption { node_id, .. }
            | Diagnostic::NoUsableOptions { node_id }
            | Diagnostic::DanglingTarget { node_id, .. }
            | Diagnostic::Unreachable { node_id } => Some(node_id),
        }
    }

    /// True when saving would fail because of this problem.
    pub fn blocks_save(&self) -> bool {
        match self {
            Diagnostic::MissingRoot => true,
            Diagnostic::EmptyText { node_id } | Diagnostic::NoUsableOptions { node_id } => {
                node_id == ROOT_ID
            }
            _ => false,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingRoot => write!(f, "the flow has no '{}' step", ROOT_ID),
            Diagnostic::EmptyText { node_id } => {
                write!(f, "step '{}' has no text and will be dropped on save", node_id)
            }
            Diagnostic::MalformedOption { node_id, index } => write!(
                f,
                "option {} of step '{}' needs a label and a target",
                index + 1,
                node_id
            ),
            Diagnostic::NoUsableOptions { node_id } => write!(
                f,
                "step '{}' has no usable option and will be dropped on save",
                node_id
            ),
            Diagnostic::DanglingTarget {
                node_id,
                index,
                raw,
            } => write!(
                f,
                "option {} of step '{}' points to missing step '{}'",
                index + 1,
                node_id,
                raw
            ),
            Diagnostic::Unreachable { node_id } => {
                write!(f, "step '{}' cannot be reached from '{}'", node_id, ROOT_ID)
            }
        }
    }
}

/// Lists every problem in `graph`, in editor display order.
pub fn lint(graph: &FlowGraph) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if !graph.contains(ROOT_ID) {
        diagnostics.push(Diagnostic::MissingRoot);
    }

    let reachable = reachable_from_root(graph);

    for node in graph.steps() {
        if !node.has_text() {
            diagnostics.push(Diagnostic::EmptyText {
                node_id: node.id.clone(),
            });
        }
        for (index, option) in node.options.iter().enumerate() {
            if !option.is_well_formed() {
                diagnostics.push(Diagnostic::MalformedOption {
                    node_id: node.id.clone(),
                    index,
                });
            } else if let Target::Dangling(raw) = &option.target {
                diagnostics.push(Diagnostic::DanglingTarget {
                    node_id: node.id.clone(),
                    index,
                    raw: raw.clone(),
                });
            }
        }
        if node.usable_options() == 0 {
            diagnostics.push(Diagnostic::NoUsableOptions {
                node_id: node.id.clone(),
            });
        }
        if !reachable.contains(node.id.as_str()) {
            diagnostics.push(Diagnostic::Unreachable {
                node_id: node.id.clone(),
            });
        }
    }

    diagnostics
}

fn reachable_from_root(graph: &FlowGraph) -> AHashSet<&str> {
    let mut seen = AHashSet::new();
    let mut queue = VecDeque::new();
    if let Some(root) = graph.root() {
        seen.insert(root.id.as_str());
        queue.push_back(root);
    }
    while let Some(node) = queue.pop_front() {
        for option in &node.options {
            let Target::Step(id) = &option.target else {
                continue;
            };
            if let Some(next) = graph.get(id) {
                if seen.insert(next.id.as_str()) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}
