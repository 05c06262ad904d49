//! Projection between the domain model and the node graph.
//!
//! [`project`] is the inbound direction (model to graph); [`derive_model`]
//! is the outbound inverse used by the emit scheduler. Projecting a model
//! and immediately deriving it back yields a deep-equal model, modulo JSON
//! key ordering.

use crate::catalog::ActionCatalog;
use crate::graph::{FlowNode, action_node_id};
use crate::model::{OutputDescriptor, Step, normalize_parameters, sections_to_value};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// The domain model as re-derived from the live graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedModel {
    pub steps: Vec<Step>,
    pub parameters: Value,
    pub output: Value,
}

/// Projects a domain model into a fresh node list.
///
/// Builds exactly one Parameter node (normalizing the raw parameter value),
/// one Action node per step in order, and one Output node. Step and output
/// payloads are deep-cloned so the graph never aliases caller-owned memory.
/// Positions are left at the origin; the layout engine assigns them.
pub fn project(
    steps: &[Step],
    parameters: Option<&Value>,
    output: Option<&Value>,
    catalog: &Arc<ActionCatalog>,
) -> Vec<FlowNode> {
    let mut nodes = Vec::with_capacity(steps.len() + 2);
    nodes.push(FlowNode::parameter(
        normalize_parameters(parameters),
        Arc::clone(catalog),
    ));
    for (index, step) in steps.iter().enumerate() {
        nodes.push(FlowNode::action(
            action_node_id(&step.id, index),
            step.clone(),
            Arc::clone(catalog),
        ));
    }
    nodes.push(FlowNode::output(
        OutputDescriptor::from_value(output),
        Arc::clone(catalog),
    ));
    nodes
}

/// Re-derives the domain model from the live node list.
///
/// Total over any node list: a missing Parameter node derives an empty
/// section array and a missing Output node derives an empty descriptor.
pub fn derive_model(nodes: &[FlowNode]) -> DerivedModel {
    let steps: Vec<Step> = nodes.iter().filter_map(|n| n.step()).cloned().collect();
    let parameters = sections_to_value(
        nodes
            .iter()
            .find_map(|n| n.data.as_parameter())
            .map(|data| data.sections.as_slice())
            .unwrap_or(&[]),
    );
    let output = nodes
        .iter()
        .find_map(|n| n.data.as_output())
        .map(|data| data.output.to_value())
        .unwrap_or_else(|| OutputDescriptor::default().to_value());
    DerivedModel {
        steps,
        parameters,
        output,
    }
}
