//! Interpolation-reference lists for editor autocompletion.
//!
//! For every Action and Output node, computes the references the user may
//! interpolate into that node's inputs. The lists are not authoritative
//! data, but their precedence encodes the execution-order contract of the
//! task runner: a node must never see output references from nodes that
//! appear after it in display order.

use crate::graph::{FlowNode, NodeData};
use ahash::AHashMap;

/// Builds the per-node reference lists, keyed by graph-local node id.
///
/// An Action node sees every parameter field reference, plus the aggregate
/// output and the id of each preceding Action node with a non-empty step
/// id. The Output node sees the output references of all steps before it
/// plus the parameter references. Positional order is authoritative;
/// duplicate step ids each contribute their own references.
pub fn collect_references(nodes: &[FlowNode]) -> AHashMap<String, Vec<String>> {
    let parameter_refs = parameter_references(nodes);

    let mut references = AHashMap::new();
    let mut preceding_step_ids: Vec<String> = Vec::new();
    for node in nodes {
        match &node.data {
            NodeData::Parameter(_) => {}
            NodeData::Action(data) => {
                let mut refs = parameter_refs.clone();
                for step_id in &preceding_step_ids {
                    refs.push(step_output_reference(step_id));
                    refs.push(step_id_reference(step_id));
                }
                references.insert(node.rf_id.clone(), refs);
                if !data.step.id.is_empty() {
                    preceding_step_ids.push(data.step.id.clone());
                }
            }
            NodeData::Output(_) => {
                let mut refs: Vec<String> = preceding_step_ids
                    .iter()
                    .map(|step_id| step_output_reference(step_id))
                    .collect();
                refs.extend(parameter_refs.iter().cloned());
                references.insert(node.rf_id.clone(), refs);
            }
        }
    }
    references
}

/// The parameter field references visible to every downstream node.
pub fn parameter_references(nodes: &[FlowNode]) -> Vec<String> {
    nodes
        .iter()
        .find_map(|n| n.data.as_parameter())
        .map(|data| {
            data.sections
                .iter()
                .flat_map(|section| &section.fields)
                .map(|field| format!("${{{{ parameters.{} }}}}", field.field_name))
                .collect()
        })
        .unwrap_or_default()
}

fn step_output_reference(step_id: &str) -> String {
    format!("${{{{ steps.{}.output }}}}", step_id)
}

fn step_id_reference(step_id: &str) -> String {
    format!("${{{{ steps.{}.id }}}}", step_id)
}
