//! Read-only view of the external action catalog.
//!
//! The catalog is constructed explicitly and passed into the projector, so
//! the engine stays testable in isolation. When the external action listing
//! has not arrived (or failed), [`ActionCatalog::builtin`] provides a static
//! fallback so rendering never blocks on the fetch.

use crate::error::CatalogError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A snapshot of the actions a step may invoke: ids, per-action input and
/// output schemas, and the required input keys per action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionCatalog {
    pub ids: Vec<String>,
    pub input_schema_by_id: AHashMap<String, Value>,
    pub output_schema_by_id: AHashMap<String, Value>,
    pub required_input_keys_by_id: AHashMap<String, Vec<String>>,
}

impl ActionCatalog {
    /// Registers an action. Required input keys are read from the input
    /// schema's top-level `required` array.
    pub fn insert_action(&mut self, id: &str, input_schema: Value, output_schema: Value) {
        let required = input_schema
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

        if !self.ids.iter().any(|existing| existing == id) {
            self.ids.push(id.to_string());
        }
        self.input_schema_by_id.insert(id.to_string(), input_schema);
        self.output_schema_by_id
            .insert(id.to_string(), output_schema);
        self.required_input_keys_by_id
            .insert(id.to_string(), required);
    }

    /// Parses an external action listing: a JSON array of entries shaped
    /// like `{ "id": ..., "schema": { "input": ..., "output": ... } }`.
    pub fn from_listing(listing: &Value) -> Result<Self, CatalogError> {
        let entries = listing.as_array().ok_or(CatalogError::NotAnArray)?;
        let mut catalog = Self::default();
        for (index, entry) in entries.iter().enumerate() {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .ok_or(CatalogError::EntryWithoutId { index })?;
            let input = entry
                .pointer("/schema/input")
                .cloned()
                .unwrap_or_else(|| json!({}));
            let output = entry
                .pointer("/schema/output")
                .cloned()
                .unwrap_or_else(|| json!({}));
            catalog.insert_action(id, input, output);
        }
        Ok(catalog)
    }

    /// The static fallback catalog used when no external listing is
    /// available. Covers the well-known built-in actions so editors can
    /// render schemas and required-key flags without a round trip.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.insert_action(
            "fetch:plain",
            json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "title": "Fetch URL" },
                    "targetPath": { "type": "string", "title": "Target Path" }
                },
                "required": ["url"]
            }),
            json!({}),
        );
        catalog.insert_action(
            "fetch:template",
            json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "title": "Fetch URL" },
                    "targetPath": { "type": "string", "title": "Target Path" },
                    "values": { "type": "object", "title": "Template Values" }
                },
                "required": ["url", "values"]
            }),
            json!({}),
        );
        catalog.insert_action(
            "publish:github",
            json!({
                "type": "object",
                "properties": {
                    "repoUrl": { "type": "string", "title": "Repository Location" },
                    "description": { "type": "string", "title": "Repository Description" },
                    "defaultBranch": { "type": "string", "title": "Default Branch" }
                },
                "required": ["repoUrl"]
            }),
            json!({
                "type": "object",
                "properties": {
                    "remoteUrl": { "type": "string" },
                    "repoContentsUrl": { "type": "string" }
                }
            }),
        );
        catalog.insert_action(
            "catalog:register",
            json!({
                "type": "object",
                "properties": {
                    "catalogInfoUrl": { "type": "string", "title": "Catalog Info URL" },
                    "optional": { "type": "boolean", "title": "Optional" }
                },
                "required": ["catalogInfoUrl"]
            }),
            json!({
                "type": "object",
                "properties": {
                    "entityRef": { "type": "string" }
                }
            }),
        );
        catalog.insert_action(
            "fs:rename",
            json!({
                "type": "object",
                "properties": {
                    "files": { "type": "array", "title": "Files to rename" }
                },
                "required": ["files"]
            }),
            json!({}),
        );
        catalog.insert_action(
            "debug:log",
            json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string", "title": "Message" }
                }
            }),
            json!({}),
        );
        catalog
    }

    pub fn input_schema(&self, action: &str) -> Option<&Value> {
        self.input_schema_by_id.get(action)
    }

    pub fn output_schema(&self, action: &str) -> Option<&Value> {
        self.output_schema_by_id.get(action)
    }

    /// Required input keys for an action; unknown actions require nothing.
    pub fn required_for(&self, action: &str) -> &[String] {
        self.required_input_keys_by_id
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, action: &str) -> bool {
        self.input_schema_by_id.contains_key(action)
    }
}
