use crate::error::NavigationError;
use crate::flow::{FlowOption, Node, ROOT_ID, Target};
use crate::validator::CleanedGraph;
use tracing::{debug, warn};

mod view;

pub use view::{OptionKind, OptionView, StepView};

/// A side effect the host must perform. Emitting one never moves the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the WhatsApp deep link.
    OpenWhatsApp,
    /// Navigate the host site to a path such as `/blog`.
    Navigate { path: String },
}

/// The outcome of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The navigator moved to another step.
    Moved { from: String, to: String },
    /// The navigator stayed put and the host should perform an effect.
    Effect(Effect),
}

/// Traversal state: the current step and the path walked to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub current: String,
    pub history: Vec<String>,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            current: ROOT_ID.to_string(),
            history: Vec::new(),
        }
    }
}

/// Walks a cleaned graph for a visitor or an admin preview.
///
/// This is a pushdown machine: every move pushes the step being left, and
/// `back` pops it again. The graph is borrowed read-only; only the
/// traversal state belongs to the navigator. Cycles are fine since nothing
/// ever terminates a walk.
#[derive(Debug, Clone)]
pub struct Navigator<'g> {
    graph: &'g CleanedGraph,
    state: NavState,
}

impl<'g> Navigator<'g> {
    pub fn new(graph: &'g CleanedGraph) -> Self {
        Self {
            graph,
            state: NavState::default(),
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn current_id(&self) -> &str {
        &self.state.current
    }

    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    /// The step currently shown. Always present for a cleaned graph.
    pub fn current(&self) -> Option<&'g Node> {
        let graph: &'g CleanedGraph = self.graph;
        graph.get(&self.state.current)
    }

    /// Selects the option at `index` on the current step.
    pub fn select(&mut self, index: usize) -> Result<Transition, NavigationError> {
        let option = self
            .current()
            .and_then(|node| node.options.get(index))
            .ok_or_else(|| NavigationError::OptionOutOfRange {
                node_id: self.state.current.clone(),
                index,
            })?;
        self.follow(option)
    }

    /// Selects the first option on the current step whose label matches.
    pub fn select_label(&mut self, label: &str) -> Result<Transition, NavigationError> {
        let option = self
            .current()
            .and_then(|node| node.options.iter().find(|o| o.label == label))
            .ok_or_else(|| NavigationError::LabelNotFound {
                node_id: self.state.current.clone(),
                label: label.to_string(),
            })?;
        self.follow(option)
    }

    /// Applies an option's transition.
    ///
    /// Sentinels return an effect and leave the state alone. A reference to a
    /// step present in this graph pushes the current step and moves, whether
    /// or not the option was resolved against it. Anything else is refused
    /// with `StepNotFound` and the state is unchanged.
    pub fn follow(&mut self, option: &FlowOption) -> Result<Transition, NavigationError> {
        match &option.target {
            Target::WhatsApp => Ok(Transition::Effect(Effect::OpenWhatsApp)),
            Target::OpenPath(path) => Ok(Transition::Effect(Effect::Navigate {
                path: path.clone(),
            })),
            Target::Step(id) | Target::Dangling(id) if self.graph.contains(id) => {
                let from = std::mem::replace(&mut self.state.current, id.clone());
                self.state.history.push(from.clone());
                debug!(from = %from, to = %id, "navigator moved");
                Ok(Transition::Moved {
                    from,
                    to: id.clone(),
                })
            }
            Target::Step(raw) | Target::Dangling(raw) => {
                warn!(from = %self.state.current, target = %raw, "option leads to a missing step");
                Err(NavigationError::StepNotFound {
                    from: self.state.current.clone(),
                    target: raw.clone(),
                })
            }
        }
    }

    /// Returns to the previously visited step. Returns `false` when there is
    /// no history to go back to.
    pub fn back(&mut self) -> bool {
        match self.state.history.pop() {
            Some(previous) => {
                self.state.current = previous;
                true
            }
            None => false,
        }
    }

    /// Restarts the walk at root with an empty history.
    pub fn reset(&mut self) {
        self.state = NavState::default();
    }

    /// A render-ready description of the current step.
    pub fn view(&self) -> Option<StepView> {
        self.current()
            .map(|node| StepView::new(node, !self.state.history.is_empty()))
    }
}
