//! Stable, order-independent model fingerprinting.
//!
//! Two model snapshots that differ only in JSON object key order must hash
//! identically: object keys are walked in sorted order, arrays in element
//! order. Fingerprints are compared in-memory only and never persisted, so
//! the hasher does not need to be stable across processes.

use crate::catalog::ActionCatalog;
use crate::model::Step;
use crate::projector::DerivedModel;
use ahash::AHasher;
use itertools::Itertools;
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// Hashes a JSON value canonically: key order independent, element order
/// preserving.
pub fn value_fingerprint(value: &Value) -> u64 {
    let mut hasher = AHasher::default();
    hash_canonical(value, &mut hasher);
    hasher.finish()
}

/// Fingerprint of a re-derived domain model, compared against the last
/// outward push to decide whether an emission is warranted.
pub fn model_fingerprint(model: &DerivedModel) -> u64 {
    value_fingerprint(&serde_json::to_value(model).unwrap_or(Value::Null))
}

/// Fingerprint of an inbound model plus the catalog snapshot. The catalog
/// participates so that a catalog refresh re-projects the graph even when
/// the model itself is unchanged.
pub fn inbound_fingerprint(
    steps: &[Step],
    parameters: Option<&Value>,
    output: Option<&Value>,
    catalog: &ActionCatalog,
) -> u64 {
    let snapshot = serde_json::json!({
        "steps": steps,
        "parameters": parameters,
        "output": output,
        "catalog": catalog,
    });
    value_fingerprint(&snapshot)
}

fn hash_canonical<H: Hasher>(value: &Value, hasher: &mut H) {
    match value {
        Value::Null => 0u8.hash(hasher),
        Value::Bool(flag) => {
            1u8.hash(hasher);
            flag.hash(hasher);
        }
        Value::Number(number) => {
            2u8.hash(hasher);
            number.to_string().hash(hasher);
        }
        Value::String(text) => {
            3u8.hash(hasher);
            text.hash(hasher);
        }
        Value::Array(entries) => {
            4u8.hash(hasher);
            entries.len().hash(hasher);
            for entry in entries {
                hash_canonical(entry, hasher);
            }
        }
        Value::Object(object) => {
            5u8.hash(hasher);
            object.len().hash(hasher);
            for (key, entry) in object.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
                key.hash(hasher);
                hash_canonical(entry, hasher);
            }
        }
    }
}
