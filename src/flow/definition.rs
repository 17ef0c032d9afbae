use super::target::Target;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Id of the mandatory entry step.
pub const ROOT_ID: &str = "root";

/// A selectable choice inside a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOption {
    pub label: String,
    pub target: Target,
}

impl FlowOption {
    /// Creates an option from a raw `nextId`.
    ///
    /// Step references stay `Dangling` until the option is placed into a
    /// `FlowGraph`, which resolves them against its own step ids.
    pub fn new(label: impl Into<String>, next_id: &str) -> Self {
        Self {
            label: label.into(),
            target: Target::resolve(next_id, |_| false),
        }
    }

    /// True when both the label and the raw target are non-blank.
    pub fn is_well_formed(&self) -> bool {
        !self.label.trim().is_empty() && !self.target.raw().trim().is_empty()
    }
}

/// One dialogue step: a message followed by a set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub text: String,
    pub options: Vec<FlowOption>,
}

impl Node {
    pub fn new(id: impl Into<String>, text: impl Into<String>, options: Vec<FlowOption>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Number of options that would survive cleaning.
    pub fn usable_options(&self) -> usize {
        self.options.iter().filter(|o| o.is_well_formed()).count()
    }
}

/// The dialogue graph: steps keyed by id, an editor display order, and the
/// per-flow active flag.
///
/// Steps reference each other only by id, so cycles are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowGraph {
    pub nodes: AHashMap<String, Node>,
    /// Display order for the editor. Never affects traversal.
    pub order: Vec<String>,
    pub is_active: bool,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from loose parts, normalising `order` and resolving
    /// every option target against the supplied steps.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node>,
        order: Vec<String>,
        is_active: bool,
    ) -> Self {
        let mut graph = Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            order,
            is_active,
        };
        graph.normalize_order();
        graph.resolve_targets();
        graph
    }

    /// The flow a fresh engine serves before anything has been loaded.
    pub fn starter() -> Self {
        let nodes = vec![
            Node::new(
                ROOT_ID,
                "Hi! How can we help you with your IGNOU studies today?",
                vec![
                    FlowOption::new("Browse study material", "materials"),
                    FlowOption::new("Read the blog", "open:/blog"),
                    FlowOption::new("Chat on WhatsApp", "whatsapp_action"),
                ],
            ),
            Node::new(
                "materials",
                "We have solved assignments, guess papers and handwritten notes.",
                vec![
                    FlowOption::new("Open the store", "open:/products"),
                    FlowOption::new("Ask us on WhatsApp", "whatsapp_action"),
                    FlowOption::new("Back to start", ROOT_ID),
                ],
            ),
        ];
        Self::from_parts(nodes, vec![ROOT_ID.to_string(), "materials".to_string()], true)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(ROOT_ID)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Steps in editor display order.
    pub fn steps(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Inserts or replaces a step. New ids are appended to `order`.
    pub fn insert(&mut self, node: Node) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
        self.resolve_targets();
    }

    /// Re-resolves every option target against the current step ids.
    pub fn resolve_targets(&mut self) {
        let known: AHashSet<String> = self.nodes.keys().cloned().collect();
        for node in self.nodes.values_mut() {
            for option in &mut node.options {
                option.target = option.target.refresh(|id| known.contains(id));
            }
        }
    }

    /// Makes `order` a permutation of the step ids with root first.
    ///
    /// Unknown and duplicate ids are dropped; steps missing from `order` are
    /// appended in sorted order.
    pub fn normalize_order(&mut self) {
        let mut order: Vec<String> = self
            .order
            .iter()
            .filter(|id| self.nodes.contains_key(id.as_str()))
            .unique()
            .cloned()
            .collect();
        let missing: Vec<String> = self
            .nodes
            .keys()
            .filter(|id| !order.contains(id))
            .sorted()
            .cloned()
            .collect();
        order.extend(missing);
        if let Some(pos) = order.iter().position(|id| id == ROOT_ID) {
            let root = order.remove(pos);
            order.insert(0, root);
        }
        self.order = order;
    }
}
