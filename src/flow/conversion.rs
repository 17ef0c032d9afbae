use super::definition::FlowGraph;
use crate::error::FlowConversionError;

/// A trait for custom data models that can be converted into a `FlowGraph`.
///
/// `WireFlow` implements it for the standard JSON payload. Implement it on your
/// own structs when flows come from another storage layout.
///
/// # Example
///
/// ```rust,no_run
/// use parley::flow::{FlowGraph, FlowOption, IntoFlow, Node};
/// use parley::error::FlowConversionError;
///
/// // A legacy format that stored steps as a flat list.
/// struct LegacyStep { key: String, message: String, buttons: Vec<(String, String)> }
/// struct LegacyFlow { steps: Vec<LegacyStep> }
///
/// impl IntoFlow for LegacyFlow {
///     fn into_flow(self) -> Result<FlowGraph, FlowConversionError> {
///         let order = self.steps.iter().map(|s| s.key.clone()).collect();
///         let nodes = self.steps.into_iter().map(|s| {
///             let options = s
///                 .buttons
///                 .iter()
///                 .map(|(label, next)| FlowOption::new(label.clone(), next))
///                 .collect();
///             Node::new(s.key, s.message, options)
///         });
///         Ok(FlowGraph::from_parts(nodes, order, true))
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a dialogue graph.
    fn into_flow(self) -> Result<FlowGraph, FlowConversionError>;
}
