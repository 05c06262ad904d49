use super::node::FlowNode;
use itertools::Itertools;

/// A directed link between two consecutive nodes in display order.
///
/// Edges are never authored independently: they are fully derived from the
/// node list, so rebuilding after any mutation keeps the chain
/// Parameter -> Actions -> Output by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Rebuilds the edge chain from the node list's current order.
pub fn rebuild_edges(nodes: &[FlowNode]) -> Vec<FlowEdge> {
    nodes
        .iter()
        .tuple_windows()
        .map(|(source, target)| FlowEdge {
            id: format!("{}->{}", source.rf_id, target.rf_id),
            source: source.rf_id.clone(),
            target: target.rf_id.clone(),
        })
        .collect()
}
