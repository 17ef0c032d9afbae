use super::conversion::IntoFlow;
use super::definition::{FlowGraph, FlowOption, Node};
use crate::error::FlowConversionError;
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};

/// The load/save payload exchanged with a persistence backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFlow {
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub order: Vec<String>,
    /// Written with keys sorted so the same flow always encodes the same way.
    #[serde(default, serialize_with = "serialize_sorted")]
    pub nodes: AHashMap<String, WireNode>,
}

fn serialize_sorted<S: Serializer>(
    nodes: &AHashMap<String, WireNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(nodes.iter().sorted_by(|a, b| a.0.cmp(b.0)))
}

/// A step as it appears on the wire; the id is the key in `WireFlow::nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<WireOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub next_id: String,
}

/// The site-wide chatbot switch, stored apart from the flow itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enablement {
    pub is_enabled: bool,
}

impl WireFlow {
    pub fn from_json(json: &str) -> Result<Self, FlowConversionError> {
        serde_json::from_str(json).map_err(|e| FlowConversionError::InvalidData(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, FlowConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FlowConversionError::InvalidData(e.to_string()))
    }
}

impl IntoFlow for WireFlow {
    fn into_flow(self) -> Result<FlowGraph, FlowConversionError> {
        if let Some(blank) = self.nodes.keys().find(|id| id.trim().is_empty()) {
            return Err(FlowConversionError::InvalidData(format!(
                "step id '{}' is blank",
                blank
            )));
        }

        let nodes = self.nodes.into_iter().map(|(id, node)| {
            let options = node
                .options
                .into_iter()
                .map(|o| FlowOption::new(o.label, &o.next_id))
                .collect();
            Node::new(id, node.text, options)
        });

        Ok(FlowGraph::from_parts(nodes, self.order, self.is_active))
    }
}

impl From<&FlowGraph> for WireFlow {
    fn from(graph: &FlowGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|(id, node)| {
                let options = node
                    .options
                    .iter()
                    .map(|o| WireOption {
                        label: o.label.clone(),
                        next_id: o.target.raw(),
                    })
                    .collect();
                (
                    id.clone(),
                    WireNode {
                        text: node.text.clone(),
                        options,
                    },
                )
            })
            .collect();

        Self {
            is_active: graph.is_active,
            order: graph.order.clone(),
            nodes,
        }
    }
}
