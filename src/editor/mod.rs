use crate::config::EngineConfig;
use crate::flow::{FlowGraph, FlowOption, Node, ROOT_ID, Target};
use crate::validator::{Diagnostic, lint};
use tracing::debug;

/// Direction for `FlowEditor::move_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// One position towards the front of `order` (-1).
    Up,
    /// One position towards the back of `order` (+1).
    Down,
}

impl MoveDirection {
    /// Maps the `-1` / `+1` convention used by editor UIs.
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -1 => Some(MoveDirection::Up),
            1 => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

/// A partial update to an option. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    pub label: Option<String>,
    pub next_id: Option<String>,
}

impl OptionPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            next_id: None,
        }
    }

    pub fn next_id(next_id: impl Into<String>) -> Self {
        Self {
            label: None,
            next_id: Some(next_id.into()),
        }
    }
}

/// The editing session's working copy of a flow and its current selection.
///
/// Every operation is an infallible in-memory mutation. Unknown ids and
/// out-of-range indices are ignored, and half-finished steps are allowed to
/// exist until the validator rejects them at save time.
#[derive(Debug, Clone)]
pub struct FlowEditor {
    graph: FlowGraph,
    selected: String,
    config: EngineConfig,
    next_step: u64,
}

impl FlowEditor {
    pub fn new(graph: FlowGraph, config: EngineConfig) -> Self {
        Self {
            graph,
            selected: ROOT_ID.to_string(),
            config,
            next_step: 0,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FlowGraph {
        self.graph
    }

    /// Swaps in a new working copy (e.g. after loading) and selects root.
    pub fn replace_graph(&mut self, graph: FlowGraph) {
        self.graph = graph;
        self.selected = ROOT_ID.to_string();
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Selects a step. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        if self.graph.contains(id) {
            self.selected = id.to_string();
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.graph.is_active = active;
    }

    /// Warnings for the current working copy.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        lint(&self.graph)
    }

    /// Appends a new placeholder step that links back to root, selects it,
    /// and returns its id.
    pub fn add_step(&mut self) -> String {
        let id = self.fresh_id();
        let node = Node::new(
            id.clone(),
            self.config.placeholder_text.clone(),
            vec![FlowOption::new(
                self.config.placeholder_option_label.clone(),
                ROOT_ID,
            )],
        );
        self.graph.insert(node);
        self.selected = id.clone();
        debug!(step = %id, "step added");
        id
    }

    /// Removes a step. Root can never be deleted.
    pub fn delete_step(&mut self, id: &str) {
        if id == ROOT_ID || self.graph.nodes.remove(id).is_none() {
            return;
        }
        self.graph.order.retain(|o| o != id);
        self.graph.resolve_targets();
        if self.selected == id {
            self.selected = ROOT_ID.to_string();
        }
        debug!(step = %id, "step deleted");
    }

    pub fn update_step_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(node) = self.graph.get_mut(id) {
            node.text = text.into();
        }
    }

    /// Appends a placeholder option that links back to root.
    pub fn add_option(&mut self, id: &str) {
        let label = self.config.placeholder_option_label.clone();
        if let Some(node) = self.graph.get_mut(id) {
            node.options.push(FlowOption {
                label,
                target: Target::Step(ROOT_ID.to_string()),
            });
        }
        self.graph.resolve_targets();
    }

    pub fn update_option(&mut self, id: &str, index: usize, patch: OptionPatch) {
        let Some(option) = self
            .graph
            .get_mut(id)
            .and_then(|node| node.options.get_mut(index))
        else {
            return;
        };
        if let Some(label) = patch.label {
            option.label = label;
        }
        if let Some(next_id) = patch.next_id {
            option.target = Target::Dangling(next_id);
            self.graph.resolve_targets();
        }
    }

    pub fn remove_option(&mut self, id: &str, index: usize) {
        if let Some(node) = self.graph.get_mut(id) {
            if index < node.options.len() {
                node.options.remove(index);
            }
        }
    }

    /// Swaps a step with its neighbour in display order. Traversal is unaffected.
    pub fn move_step(&mut self, id: &str, direction: MoveDirection) {
        let Some(pos) = self.graph.order.iter().position(|o| o == id) else {
            return;
        };
        let target = match direction {
            MoveDirection::Up => pos.checked_sub(1),
            MoveDirection::Down => Some(pos + 1).filter(|t| *t < self.graph.order.len()),
        };
        if let Some(target) = target {
            self.graph.order.swap(pos, target);
        }
    }

    fn fresh_id(&mut self) -> String {
        loop {
            self.next_step += 1;
            let id = format!("{}{}", self.config.step_id_prefix, self.next_step);
            if !self.graph.contains(&id) {
                return id;
            }
        }
    }
}
