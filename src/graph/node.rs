use crate::catalog::ActionCatalog;
use crate::model::parameter::random_suffix;
use crate::model::{OutputDescriptor, ParameterSection, Step};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Graph-local id of the singleton Parameter node.
pub const PARAMETER_NODE_ID: &str = "parameters";
/// Graph-local id of the singleton Output node.
pub const OUTPUT_NODE_ID: &str = "output";

/// A 2D canvas position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The role of a node in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Parameter,
    Action,
    Output,
}

/// Payload of the singleton Parameter node: the editable section list.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNodeData {
    pub sections: Vec<ParameterSection>,
    pub catalog: Arc<ActionCatalog>,
}

/// Payload of an Action node: one step, deep-cloned from the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionNodeData {
    pub step: Step,
    pub catalog: Arc<ActionCatalog>,
}

/// Payload of the singleton Output node.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNodeData {
    pub output: OutputDescriptor,
    pub catalog: Arc<ActionCatalog>,
}

/// The tagged union over the three node roles. Every variant carries a
/// shared read-only catalog snapshot so editors can render schemas and
/// required-key flags without an extra round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Parameter(ParameterNodeData),
    Action(ActionNodeData),
    Output(OutputNodeData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Parameter(_) => NodeKind::Parameter,
            NodeData::Action(_) => NodeKind::Action,
            NodeData::Output(_) => NodeKind::Output,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterNodeData> {
        match self {
            NodeData::Parameter(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_parameter_mut(&mut self) -> Option<&mut ParameterNodeData> {
        match self {
            NodeData::Parameter(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionNodeData> {
        match self {
            NodeData::Action(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_action_mut(&mut self) -> Option<&mut ActionNodeData> {
        match self {
            NodeData::Action(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_output(&self) -> Option<&OutputNodeData> {
        match self {
            NodeData::Output(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_output_mut(&mut self) -> Option<&mut OutputNodeData> {
        match self {
            NodeData::Output(data) => Some(data),
            _ => None,
        }
    }
}

/// One positioned node of the flow graph.
///
/// `rf_id` is the graph-local identity and is intentionally decoupled from
/// the step's own user-editable `id`: editing the visible id must not tear
/// down the node. `measured_height` is the host-reported render height, fed
/// back asynchronously; `None` until the first measurement arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub rf_id: String,
    pub position: Position,
    pub measured_height: Option<f64>,
    pub data: NodeData,
}

impl FlowNode {
    pub fn parameter(sections: Vec<ParameterSection>, catalog: Arc<ActionCatalog>) -> Self {
        Self {
            rf_id: PARAMETER_NODE_ID.to_string(),
            position: Position::default(),
            measured_height: None,
            data: NodeData::Parameter(ParameterNodeData { sections, catalog }),
        }
    }

    pub fn action(rf_id: String, step: Step, catalog: Arc<ActionCatalog>) -> Self {
        Self {
            rf_id,
            position: Position::default(),
            measured_height: None,
            data: NodeData::Action(ActionNodeData { step, catalog }),
        }
    }

    pub fn output(output: OutputDescriptor, catalog: Arc<ActionCatalog>) -> Self {
        Self {
            rf_id: OUTPUT_NODE_ID.to_string(),
            position: Position::default(),
            measured_height: None,
            data: NodeData::Output(OutputNodeData { output, catalog }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// The step carried by this node, if it is an Action node.
    pub fn step(&self) -> Option<&Step> {
        self.data.as_action().map(|data| &data.step)
    }
}

/// Derives the deterministic graph-local id for the action node at `index`.
///
/// The step's own id is sanitized to a safe identifier alphabet and suffixed
/// with the position index, so re-projection keeps ids stable for unchanged
/// steps while staying unique even for duplicate or empty step ids.
pub fn action_node_id(step_id: &str, index: usize) -> String {
    let sanitized: String = step_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if sanitized.is_empty() {
        format!("step-{}", index)
    } else {
        format!("step-{}-{}", sanitized, index)
    }
}

/// Mints a fresh graph-local id for a user-added action node.
pub fn mint_action_node_id() -> String {
    format!("step-{}", random_suffix(8))
}
