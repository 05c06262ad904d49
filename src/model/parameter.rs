use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A display record for one editable input field of a parameter section.
///
/// Fields are the editable source of truth: the owning section's flat
/// `properties`/`required` schema is re-derived from them after every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterField {
    pub id: String,
    pub field_name: String,
    pub section_id: String,
    pub required: bool,
    pub schema: Value,
}

/// A named, orderable group of input-field declarations collected from the
/// user before any step runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required: Vec<String>,
    pub properties: Map<String, Value>,
    /// Opaque JSON-Schema `dependencies` passthrough.
    pub dependencies: Option<Value>,
    pub fields: Vec<ParameterField>,
    /// Unrecognized top-level schema keys, carried through untouched.
    pub extra: Map<String, Value>,
}

impl ParameterSection {
    /// Creates an empty user-authored section with a freshly minted id.
    pub fn new(title: &str) -> Self {
        Self {
            id: format!("section-{}", random_suffix(6)),
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Parses one JSON-Schema-like object into a section. The positional
    /// `index` seeds deterministic section/field ids so re-parsing an
    /// unchanged schema yields unchanged ids.
    ///
    /// Non-object input yields an empty section rather than an error.
    pub fn from_schema(value: &Value, index: usize) -> Self {
        let id = format!("section-{}", index);
        let Some(obj) = value.as_object() else {
            return Self {
                id,
                ..Self::default()
            };
        };

        let required: Vec<String> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let properties = obj
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let fields = properties
            .iter()
            .enumerate()
            .map(|(i, (field_name, schema))| ParameterField {
                id: format!("{}-field-{}", id, i),
                field_name: field_name.clone(),
                section_id: id.clone(),
                required: required.iter().any(|r| r == field_name),
                schema: schema.clone(),
            })
            .collect();

        let extra = obj
            .iter()
            .filter(|(key, _)| !is_recognized_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            id,
            title: string_at(obj, "title"),
            description: string_at(obj, "description"),
            required,
            properties,
            dependencies: obj.get("dependencies").cloned(),
            fields,
            extra,
        }
    }

    /// Re-derives the flat JSON-Schema object for this section. Empty
    /// strings and empty collections are omitted, so a sparse inbound
    /// schema round-trips without gaining keys.
    pub fn to_schema(&self) -> Value {
        let mut obj = Map::new();
        if !self.title.is_empty() {
            obj.insert("title".to_string(), Value::String(self.title.clone()));
        }
        if !self.description.is_empty() {
            obj.insert(
                "description".to_string(),
                Value::String(self.description.clone()),
            );
        }
        if !self.properties.is_empty() {
            obj.insert(
                "properties".to_string(),
                Value::Object(self.properties.clone()),
            );
        }
        if !self.required.is_empty() {
            obj.insert(
                "required".to_string(),
                Value::Array(
                    self.required
                        .iter()
                        .map(|r| Value::String(r.clone()))
                        .collect(),
                ),
            );
        }
        if let Some(dependencies) = &self.dependencies {
            obj.insert("dependencies".to_string(), dependencies.clone());
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        Value::Object(obj)
    }

    /// Rebuilds `properties` and `required` from `fields`, in field order.
    /// Call after any field-level edit.
    pub fn sync_schema_from_fields(&mut self) {
        self.properties = self
            .fields
            .iter()
            .map(|f| (f.field_name.clone(), f.schema.clone()))
            .collect();
        self.required = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.field_name.clone())
            .collect();
    }

    /// Appends a user-authored field with a freshly minted id and keeps the
    /// flat schema in sync.
    pub fn add_field(&mut self, field_name: &str, schema: Value, required: bool) {
        self.fields.push(ParameterField {
            id: format!("{}-field-{}", self.id, random_suffix(6)),
            field_name: field_name.to_string(),
            section_id: self.id.clone(),
            required,
            schema,
        });
        self.sync_schema_from_fields();
    }

    /// Removes a field by id and keeps the flat schema in sync. Unknown ids
    /// are a no-op.
    pub fn remove_field(&mut self, field_id: &str) {
        self.fields.retain(|f| f.id != field_id);
        self.sync_schema_from_fields();
    }
}

/// Normalizes a raw inbound parameter value into section form.
///
/// Accepts a single schema object, an array of schema objects, or nothing;
/// any other shape is treated as empty. Non-object array entries are
/// dropped.
pub fn normalize_parameters(value: Option<&Value>) -> Vec<ParameterSection> {
    match value {
        Some(single @ Value::Object(_)) => vec![ParameterSection::from_schema(single, 0)],
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| entry.is_object())
            .enumerate()
            .map(|(i, entry)| ParameterSection::from_schema(entry, i))
            .collect(),
        _ => Vec::new(),
    }
}

/// The outbound serialization of a section list: an array of flat schemas.
pub fn sections_to_value(sections: &[ParameterSection]) -> Value {
    Value::Array(sections.iter().map(ParameterSection::to_schema).collect())
}

fn is_recognized_key(key: &str) -> bool {
    matches!(
        key,
        "title" | "description" | "required" | "properties" | "dependencies"
    )
}

fn string_at(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn random_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
