//! Unit tests for fingerprinting, id derivation, the catalog, and the
//! schema round-trips of the model types.
mod common;
use common::*;
use douki::error::CatalogError;
use douki::prelude::*;
use serde_json::json;

#[test]
fn test_fingerprint_ignores_object_key_order() {
    let a = json!({ "alpha": 1, "beta": { "x": true, "y": null } });
    let b = json!({ "beta": { "y": null, "x": true }, "alpha": 1 });
    assert_eq!(value_fingerprint(&a), value_fingerprint(&b));
}

#[test]
fn test_fingerprint_distinguishes_values() {
    assert_ne!(
        value_fingerprint(&json!({ "a": 1 })),
        value_fingerprint(&json!({ "a": 2 }))
    );
    assert_ne!(
        value_fingerprint(&json!(["a", "b"])),
        value_fingerprint(&json!(["b", "a"]))
    );
    assert_ne!(value_fingerprint(&json!(null)), value_fingerprint(&json!(0)));
    assert_ne!(value_fingerprint(&json!("1")), value_fingerprint(&json!(1)));
}

#[test]
fn test_inbound_fingerprint_tracks_the_catalog() {
    let steps = sample_steps();
    let builtin = ActionCatalog::builtin();
    let empty = ActionCatalog::default();

    assert_ne!(
        inbound_fingerprint(&steps, None, None, &builtin),
        inbound_fingerprint(&steps, None, None, &empty)
    );
    // Two equal catalogs fingerprint identically even though their maps
    // iterate in different orders.
    assert_eq!(
        inbound_fingerprint(&steps, None, None, &builtin),
        inbound_fingerprint(&steps, None, None, &ActionCatalog::builtin())
    );
}

#[test]
fn test_action_node_id_sanitizes_step_ids() {
    assert_eq!(action_node_id("fetch", 0), "step-fetch-0");
    assert_eq!(action_node_id("fetch repo!", 1), "step-fetchrepo-1");
    assert_eq!(action_node_id("with_under-score", 2), "step-with_under-score-2");
    // Ids with nothing usable fall back to the pure positional form.
    assert_eq!(action_node_id("", 3), "step-3");
    assert_eq!(action_node_id("!!!", 4), "step-4");
}

#[test]
fn test_builtin_catalog_reports_required_keys() {
    let catalog = ActionCatalog::builtin();

    assert!(catalog.contains("fetch:template"));
    assert_eq!(catalog.required_for("fetch:template"), ["url", "values"]);
    assert_eq!(catalog.required_for("publish:github"), ["repoUrl"]);
    assert!(catalog.required_for("debug:log").is_empty());
    assert!(catalog.required_for("unknown:action").is_empty());
}

#[test]
fn test_catalog_from_listing() {
    let listing = json!([
        {
            "id": "custom:scan",
            "schema": {
                "input": {
                    "properties": { "path": { "type": "string" } },
                    "required": ["path"]
                },
                "output": { "properties": { "report": { "type": "string" } } }
            }
        },
        { "id": "custom:bare" }
    ]);

    let catalog = ActionCatalog::from_listing(&listing).unwrap();
    assert_eq!(catalog.ids, ["custom:scan", "custom:bare"]);
    assert_eq!(catalog.required_for("custom:scan"), ["path"]);
    assert!(catalog.required_for("custom:bare").is_empty());
    assert!(catalog.output_schema("custom:scan").is_some());
}

#[test]
fn test_catalog_listing_errors() {
    assert!(matches!(
        ActionCatalog::from_listing(&json!({})),
        Err(CatalogError::NotAnArray)
    ));
    assert!(matches!(
        ActionCatalog::from_listing(&json!([{ "id": "ok" }, { "schema": {} }])),
        Err(CatalogError::EntryWithoutId { index: 1 })
    ));
}

#[test]
fn test_missing_required_inputs() {
    let catalog = ActionCatalog::builtin();
    let mut step = step("fetch", "fetch:template");

    assert_eq!(step.missing_required_inputs(&catalog), ["url", "values"]);

    step.input.insert("url".to_string(), json!("./skeleton"));
    assert_eq!(step.missing_required_inputs(&catalog), ["values"]);

    // A key bound to null still counts as missing.
    step.input.insert("values".to_string(), json!(null));
    assert_eq!(step.missing_required_inputs(&catalog), ["values"]);

    step.input.insert("values".to_string(), json!({}));
    assert!(step.missing_required_inputs(&catalog).is_empty());
}

#[test]
fn test_parameter_section_schema_round_trip() {
    let schema = json!({
        "title": "Details",
        "description": "Project details",
        "properties": {
            "name": { "type": "string" },
            "size": { "type": "number" }
        },
        "required": ["name"],
        "dependencies": { "size": ["name"] },
        "x-vendor-extension": { "keep": "me" }
    });

    let section = ParameterSection::from_schema(&schema, 0);
    assert_eq!(section.title, "Details");
    assert_eq!(section.fields.len(), 2);
    assert!(section.fields[0].required);
    assert!(!section.fields[1].required);

    assert_eq!(section.to_schema(), schema);
}

#[test]
fn test_sparse_section_schema_round_trips_without_gaining_keys() {
    let schema = json!({ "title": "Sparse" });
    let section = ParameterSection::from_schema(&schema, 0);
    assert_eq!(section.to_schema(), schema);
}

#[test]
fn test_field_edits_keep_flat_schema_in_sync() {
    let mut section = ParameterSection::new("Edited");
    section.add_field("name", json!({ "type": "string" }), true);
    section.add_field("owner", json!({ "type": "string" }), false);

    assert_eq!(section.properties.len(), 2);
    assert_eq!(section.required, ["name"]);

    let owner_id = section.fields[1].id.clone();
    section.remove_field(&owner_id);
    assert_eq!(section.properties.len(), 1);

    section.fields[0].required = false;
    section.sync_schema_from_fields();
    assert!(section.required.is_empty());
}

#[test]
fn test_output_descriptor_single_default_text() {
    let mut output = OutputDescriptor::from_value(Some(&json!({
        "text": [
            { "title": "one", "content": "1", "default": true },
            { "title": "two", "content": "2" },
            { "title": "three", "content": "3" }
        ]
    })));

    output.set_default_text(2);
    let defaults: Vec<bool> = output.text.iter().map(|t| t.default).collect();
    assert_eq!(defaults, [false, false, true]);

    // Out-of-range requests change nothing.
    output.set_default_text(99);
    assert_eq!(
        output.text.iter().filter(|t| t.default).count(),
        1
    );
}

#[test]
fn test_output_descriptor_passthrough_keys_survive() {
    let value = json!({
        "links": [{ "title": "Repo", "url": "https://example.com" }],
        "custom": { "nested": [1, 2, 3] }
    });
    let output = OutputDescriptor::from_value(Some(&value));
    assert_eq!(output.to_value(), value);
}
