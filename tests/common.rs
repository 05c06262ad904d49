//! Common test utilities for building task specifications and graphs.
use douki::prelude::*;
use serde_json::{Map, Value, json};

/// The builtin catalog, shared the way the engine shares it into nodes.
#[allow(dead_code)]
pub fn catalog() -> Arc<ActionCatalog> {
    Arc::new(ActionCatalog::builtin())
}

/// A bare step with a generated name and empty input.
#[allow(dead_code)]
pub fn step(id: &str, action: &str) -> Step {
    Step {
        id: id.to_string(),
        name: format!("Step {}", id),
        action: action.to_string(),
        input: Map::new(),
    }
}

/// Two realistic steps: a templated fetch followed by a publish.
#[allow(dead_code)]
pub fn sample_steps() -> Vec<Step> {
    let fetch_input = json!({
        "url": "./skeleton",
        "values": { "name": "${{ parameters.name }}" }
    });
    let publish_input = json!({
        "repoUrl": "github.com?owner=acme&repo=demo"
    });
    vec![
        Step {
            id: "fetch".to_string(),
            name: "Fetch skeleton".to_string(),
            action: "fetch:template".to_string(),
            input: fetch_input.as_object().cloned().unwrap(),
        },
        Step {
            id: "publish".to_string(),
            name: "Publish".to_string(),
            action: "publish:github".to_string(),
            input: publish_input.as_object().cloned().unwrap(),
        },
    ]
}

/// Two parameter sections in the array-of-schemas form.
#[allow(dead_code)]
pub fn sample_parameters() -> Value {
    json!([
        {
            "title": "Project details",
            "description": "Basic information about the project",
            "properties": {
                "name": { "type": "string", "title": "Name" },
                "owner": { "type": "string", "title": "Owner" }
            },
            "required": ["name"]
        },
        {
            "title": "Repository",
            "properties": {
                "repoUrl": { "type": "string", "title": "Repository Location" }
            },
            "required": ["repoUrl"]
        }
    ])
}

/// An output descriptor with links and a default text snippet.
#[allow(dead_code)]
pub fn sample_output() -> Value {
    json!({
        "links": [
            { "title": "Repository", "url": "https://example.com/repo" },
            { "title": "Open in catalog", "icon": "catalog", "entityRef": "component:default/demo" }
        ],
        "text": [
            { "title": "Getting started", "content": "Read the README", "default": true }
        ]
    })
}

/// A fully configured engine with the sample model installed.
#[allow(dead_code)]
pub fn sample_sync() -> FlowSync {
    let mut sync = FlowSync::new(ActionCatalog::builtin());
    let parameters = sample_parameters();
    let output = sample_output();
    sync.set_model(&sample_steps(), Some(&parameters), Some(&output));
    sync
}

/// The graph-local id of the action node at `index` within the action run.
#[allow(dead_code)]
pub fn action_id_at(sync: &FlowSync, index: usize) -> String {
    sync.nodes()
        .iter()
        .filter(|n| n.kind() == NodeKind::Action)
        .nth(index)
        .map(|n| n.rf_id.clone())
        .expect("no action node at index")
}

/// A sink that records every emission for later assertions.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSink {
    pub steps: Vec<Vec<Step>>,
    pub parameters: Vec<Value>,
    pub output: Vec<Value>,
}

impl ModelSink for RecordingSink {
    fn on_steps_change(&mut self, steps: &[Step]) {
        self.steps.push(steps.to_vec());
    }
    fn on_parameters_change(&mut self, parameters: &Value) {
        self.parameters.push(parameters.clone());
    }
    fn on_output_change(&mut self, output: &Value) {
        self.output.push(output.clone());
    }
}

impl RecordingSink {
    #[allow(dead_code)]
    pub fn emissions(&self) -> usize {
        self.steps.len()
    }
}
