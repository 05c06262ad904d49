use crate::catalog::ActionCatalog;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of orchestrated work: an action identifier plus keyed inputs.
///
/// The `id` is user-editable and only used for display and back-references
/// from later steps; it is not guaranteed unique and is deliberately
/// decoupled from the graph-local identity of the node that renders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub input: Map<String, Value>,
}

impl Step {
    /// Creates an empty step template, as seeded by the "add node" operation.
    pub fn template() -> Self {
        Self::default()
    }

    /// Returns the required input keys of this step's action that the step
    /// does not set. A key bound to JSON `null` counts as missing.
    ///
    /// Actions unknown to the catalog have no required keys to miss.
    pub fn missing_required_inputs(&self, catalog: &ActionCatalog) -> Vec<String> {
        catalog
            .required_for(&self.action)
            .iter()
            .filter(|key| matches!(self.input.get(key.as_str()), None | Some(Value::Null)))
            .cloned()
            .collect()
    }
}
