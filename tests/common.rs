//! Common test utilities for building flows and stores.
use async_trait::async_trait;
use parley::prelude::{CleanedGraph, FlowGraph, FlowOption, FlowStore, Node, PersistenceError, WireFlow};

/// Two steps that link to each other.
///
/// `root --Start--> faq --Home--> root`
#[allow(dead_code)]
pub fn create_scenario_flow() -> FlowGraph {
    FlowGraph::from_parts(
        vec![
            Node::new("root", "Hi", vec![FlowOption::new("Start", "faq")]),
            Node::new("faq", "FAQ", vec![FlowOption::new("Home", "root")]),
        ],
        vec!["root".to_string(), "faq".to_string()],
        true,
    )
}

/// A flow that exercises every kind of target.
///
/// `root` offers courses, WhatsApp, the blog and a broken link.
/// `courses` leads to `fees`, which loops back to `courses`.
#[allow(dead_code)]
pub fn create_rich_flow() -> FlowGraph {
    FlowGraph::from_parts(
        vec![
            Node::new(
                "root",
                "Welcome! What are you looking for?",
                vec![
                    FlowOption::new("Courses", "courses"),
                    FlowOption::new("Talk to us", "whatsapp_action"),
                    FlowOption::new("Blog", "open:/blog"),
                    FlowOption::new("Old page", "archived"),
                ],
            ),
            Node::new(
                "courses",
                "Pick a programme.",
                vec![
                    FlowOption::new("Fees", "fees"),
                    FlowOption::new("Home", "root"),
                ],
            ),
            Node::new(
                "fees",
                "Fees depend on the programme.",
                vec![FlowOption::new("Back to courses", "courses")],
            ),
        ],
        vec!["root".to_string(), "courses".to_string(), "fees".to_string()],
        true,
    )
}

/// A flow with one broken step (`draft`) and one malformed option on root.
#[allow(dead_code)]
pub fn create_flow_with_drafts() -> FlowGraph {
    FlowGraph::from_parts(
        vec![
            Node::new(
                "root",
                "Hello",
                vec![
                    FlowOption::new("Help", "help"),
                    FlowOption::new("", "help"),
                ],
            ),
            Node::new("help", "How can we help?", vec![FlowOption::new("Home", "root")]),
            Node::new("draft", "", vec![FlowOption::new("Home", "root")]),
        ],
        vec!["root".to_string(), "help".to_string(), "draft".to_string()],
        false,
    )
}

#[allow(dead_code)]
pub const WIRE_FLOW_JSON: &str = r#"{
    "isActive": true,
    "order": ["root", "faq"],
    "nodes": {
        "root": {
            "text": "Hi",
            "options": [
                { "label": "Start", "nextId": "faq" },
                { "label": "WhatsApp", "nextId": "whatsapp_action" },
                { "label": "Blog", "nextId": "open:/blog" }
            ]
        },
        "faq": {
            "text": "FAQ",
            "options": [{ "label": "Home", "nextId": "root" }]
        }
    }
}"#;

/// A store whose every call fails, like an unreachable backend.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl FlowStore for FailingStore {
    async fn load_flow(&self) -> Result<Option<WireFlow>, PersistenceError> {
        Err(PersistenceError::Rejected("backend offline".to_string()))
    }

    async fn save_flow(&self, _flow: &CleanedGraph) -> Result<(), PersistenceError> {
        Err(PersistenceError::Rejected("backend offline".to_string()))
    }
}
