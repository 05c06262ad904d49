//! Vertical layout of the node chain.
//!
//! [`align`] is a pure, total, idempotent function: it walks the nodes in
//! their current order and stacks them at a fixed horizontal coordinate,
//! each node's y being the running sum of prior heights plus spacing.
//!
//! Node height is only knowable precisely once the host has rendered and
//! measured it, but a usable number must exist before first render to avoid
//! a degenerate zero-height layout. Resolution is therefore three-tiered:
//! measured height (positive and finite), then a structural estimate from
//! the node's content, then a hard default. Layout improves monotonically
//! as measurements arrive and never regresses to overlap.

use crate::graph::{FlowNode, NodeData, Position};

/// Default horizontal coordinate of the chain.
pub const FIXED_X: f64 = 0.0;
/// Default vertical gap between consecutive nodes.
pub const VERTICAL_SPACING: f64 = 40.0;
/// Last-resort node height when no measurement or estimate is usable.
pub const DEFAULT_NODE_HEIGHT: f64 = 120.0;

const PARAMETER_BASE_HEIGHT: f64 = 80.0;
const SECTION_HEADER_HEIGHT: f64 = 48.0;
const FIELD_ROW_HEIGHT: f64 = 32.0;
const ACTION_BASE_HEIGHT: f64 = 72.0;
const INPUT_ROW_HEIGHT: f64 = 28.0;
const OUTPUT_BASE_HEIGHT: f64 = 80.0;
const OUTPUT_ENTRY_HEIGHT: f64 = 36.0;

/// Stacks the nodes vertically in their current order.
pub fn align(nodes: Vec<FlowNode>, fixed_x: f64, vertical_spacing: f64) -> Vec<FlowNode> {
    let mut y = 0.0;
    nodes
        .into_iter()
        .map(|mut node| {
            let height = resolve_height(&node);
            node.position = Position { x: fixed_x, y };
            y += height + vertical_spacing;
            node
        })
        .collect()
}

/// Resolves the height used for layout: measured, estimated, or default.
/// Zero, negative, and non-finite measurements are filtered out.
pub fn resolve_height(node: &FlowNode) -> f64 {
    match node.measured_height {
        Some(measured) if measured.is_finite() && measured > 0.0 => measured,
        _ => estimate_height(&node.data),
    }
}

/// Structural height estimate from node content: parameter nodes scale with
/// section and field counts, action nodes with input-row count, output
/// nodes with link/text entry count.
pub fn estimate_height(data: &NodeData) -> f64 {
    let estimate = match data {
        NodeData::Parameter(data) => {
            let field_count: usize = data.sections.iter().map(|s| s.fields.len()).sum();
            PARAMETER_BASE_HEIGHT
                + data.sections.len() as f64 * SECTION_HEADER_HEIGHT
                + field_count as f64 * FIELD_ROW_HEIGHT
        }
        NodeData::Action(data) => {
            ACTION_BASE_HEIGHT + data.step.input.len() as f64 * INPUT_ROW_HEIGHT
        }
        NodeData::Output(data) => {
            let entry_count = data.output.links.len() + data.output.text.len();
            OUTPUT_BASE_HEIGHT + entry_count as f64 * OUTPUT_ENTRY_HEIGHT
        }
    };
    if estimate.is_finite() && estimate > 0.0 {
        estimate
    } else {
        DEFAULT_NODE_HEIGHT
    }
}
