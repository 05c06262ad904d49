//! Discrete, composable operations on the node list.
//!
//! Every handler takes and returns a full node list; nothing is mutated in
//! place, so readers mid-render always see a consistent snapshot and the
//! handlers compose uniformly with layout and edge rebuilding. All handlers
//! are defensive no-ops on unknown ids: the graph and pending UI events can
//! race (remove-then-edit), and a stale id must not crash the session.

use crate::catalog::ActionCatalog;
use crate::graph::{FlowNode, NodeData, NodeKind, mint_action_node_id};
use crate::model::{OutputDescriptor, ParameterSection, Step};
use serde_json::Value;
use std::sync::Arc;

/// The directly editable scalar fields of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepField {
    Id,
    Name,
    Action,
}

/// Inserts a new Action node with a freshly minted id and an empty step
/// template, immediately after the node `after` refers to.
///
/// With no anchor (or a stale one) the node lands at the end of the action
/// run; anchors outside the action run are clamped so the Parameter node
/// stays first and the Output node stays last.
pub fn add_action_after(
    nodes: &[FlowNode],
    after: Option<&str>,
    catalog: &Arc<ActionCatalog>,
) -> Vec<FlowNode> {
    insert_action(
        nodes,
        FlowNode::action(mint_action_node_id(), Step::template(), Arc::clone(catalog)),
        after,
    )
}

/// Inserts an already-built Action node after the anchor, under the same
/// clamping rules as [`add_action_after`].
pub fn insert_action(nodes: &[FlowNode], node: FlowNode, after: Option<&str>) -> Vec<FlowNode> {
    let mut out = nodes.to_vec();
    let index = insertion_index(&out, after);
    out.insert(index, node);
    out
}

/// Creates the singleton Parameter node if the list has none. A second add
/// request is a no-op that returns the list unchanged.
pub fn ensure_parameter_node(nodes: &[FlowNode], catalog: &Arc<ActionCatalog>) -> Vec<FlowNode> {
    let mut out = nodes.to_vec();
    if !out.iter().any(|n| n.kind() == NodeKind::Parameter) {
        out.insert(0, FlowNode::parameter(Vec::new(), Arc::clone(catalog)));
    }
    out
}

/// Creates the singleton Output node if the list has none. A second add
/// request is a no-op that returns the list unchanged.
pub fn ensure_output_node(nodes: &[FlowNode], catalog: &Arc<ActionCatalog>) -> Vec<FlowNode> {
    let mut out = nodes.to_vec();
    if !out.iter().any(|n| n.kind() == NodeKind::Output) {
        out.push(FlowNode::output(
            OutputDescriptor::default(),
            Arc::clone(catalog),
        ));
    }
    out
}

/// Deletes an Action node by graph-local id. Parameter and Output nodes are
/// not removable through this path.
pub fn remove_action(nodes: &[FlowNode], rf_id: &str) -> Vec<FlowNode> {
    nodes
        .iter()
        .filter(|n| !(n.kind() == NodeKind::Action && n.rf_id == rf_id))
        .cloned()
        .collect()
}

/// Splices a just-released Action node into the ordinal slot its vertical
/// coordinate puts it at, relative to its Action siblings.
///
/// Parameter and Output nodes are exempt from reordering and are forced
/// back to the extremes regardless of where they sit in the input list.
pub fn reorder_on_release(nodes: &[FlowNode], rf_id: &str) -> Vec<FlowNode> {
    let Some(target_index) = nodes
        .iter()
        .position(|n| n.rf_id == rf_id && n.kind() == NodeKind::Action)
    else {
        return nodes.to_vec();
    };
    let released_y = nodes[target_index].position.y;

    let mut parameters = Vec::new();
    let mut actions = Vec::new();
    let mut outputs = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        if index == target_index {
            continue;
        }
        match node.kind() {
            NodeKind::Parameter => parameters.push(node.clone()),
            NodeKind::Action => actions.push(node.clone()),
            NodeKind::Output => outputs.push(node.clone()),
        }
    }

    let slot = actions.iter().filter(|n| n.position.y < released_y).count();
    actions.insert(slot, nodes[target_index].clone());

    parameters
        .into_iter()
        .chain(actions)
        .chain(outputs)
        .collect()
}

/// Replaces one node's data payload through an updater, immutably. The
/// returned list shares nothing mutable with the input.
pub fn update_node_data(
    nodes: &[FlowNode],
    rf_id: &str,
    update: impl FnOnce(&mut NodeData),
) -> Vec<FlowNode> {
    let mut out = nodes.to_vec();
    if let Some(node) = out.iter_mut().find(|n| n.rf_id == rf_id) {
        update(&mut node.data);
    }
    out
}

/// Sets one scalar field of an Action node's step to a literal value.
pub fn set_step_field(
    nodes: &[FlowNode],
    rf_id: &str,
    field: StepField,
    value: &str,
) -> Vec<FlowNode> {
    update_node_data(nodes, rf_id, |data| {
        if let Some(action) = data.as_action_mut() {
            match field {
                StepField::Id => action.step.id = value.to_string(),
                StepField::Name => action.step.name = value.to_string(),
                StepField::Action => action.step.action = value.to_string(),
            }
        }
    })
}

/// Sets one input key of an Action node's step.
pub fn set_step_input(nodes: &[FlowNode], rf_id: &str, key: &str, value: Value) -> Vec<FlowNode> {
    update_node_data(nodes, rf_id, |data| {
        if let Some(action) = data.as_action_mut() {
            action.step.input.insert(key.to_string(), value);
        }
    })
}

/// Removes one input key of an Action node's step. Unknown keys are a
/// no-op.
pub fn remove_step_input(nodes: &[FlowNode], rf_id: &str, key: &str) -> Vec<FlowNode> {
    update_node_data(nodes, rf_id, |data| {
        if let Some(action) = data.as_action_mut() {
            action.step.input.remove(key);
        }
    })
}

/// Applies an updater to the Parameter node's section list.
pub fn update_sections(
    nodes: &[FlowNode],
    rf_id: &str,
    update: impl FnOnce(&mut Vec<ParameterSection>),
) -> Vec<FlowNode> {
    update_node_data(nodes, rf_id, |data| {
        if let Some(parameter) = data.as_parameter_mut() {
            update(&mut parameter.sections);
        }
    })
}

/// Applies an updater to the Output node's descriptor.
pub fn update_output(
    nodes: &[FlowNode],
    rf_id: &str,
    update: impl FnOnce(&mut OutputDescriptor),
) -> Vec<FlowNode> {
    update_node_data(nodes, rf_id, |data| {
        if let Some(output) = data.as_output_mut() {
            update(&mut output.output);
        }
    })
}

fn insertion_index(nodes: &[FlowNode], after: Option<&str>) -> usize {
    let first_slot = nodes
        .iter()
        .position(|n| n.kind() != NodeKind::Parameter)
        .unwrap_or(nodes.len());
    let last_slot = nodes
        .iter()
        .position(|n| n.kind() == NodeKind::Output)
        .unwrap_or(nodes.len());

    match after.and_then(|id| nodes.iter().position(|n| n.rf_id == id)) {
        Some(anchor) => (anchor + 1).clamp(first_slot, last_slot),
        None => last_slot,
    }
}
