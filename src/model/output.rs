use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A link shown to the end user once the task has run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputLink {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_ref: String,
}

/// A text snippet shown to the end user once the task has run. At most one
/// snippet per descriptor may be the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputText {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

/// Post-run summary data: recognized `links` and `text` arrays plus
/// arbitrary passthrough keys.
///
/// Absent and empty arrays are the same model; empty arrays are dropped on
/// serialization so a sparse inbound value round-trips without gaining keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<OutputLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<OutputText>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutputDescriptor {
    /// Coerces a raw inbound output value. Anything that does not parse as
    /// a descriptor (including `null` and absence) becomes the empty
    /// descriptor rather than an error.
    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// The outbound serialization of this descriptor.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Marks the text snippet at `index` as the default and clears the flag
    /// on every other snippet. Out-of-range indices are a no-op.
    pub fn set_default_text(&mut self, index: usize) {
        if index >= self.text.len() {
            return;
        }
        for (i, entry) in self.text.iter_mut().enumerate() {
            entry.default = i == index;
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}
