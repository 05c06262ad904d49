//! # Douki - Flow-Model Synchronization Engine
//!
//! **Douki** keeps a declarative, ordered task specification (named steps, a
//! parameter-input schema, and an output description) bidirectionally
//! synchronized with a directed, linearly-chained node graph that a visual
//! editor renders and mutates. The engine owns the hard invariants of that
//! pairing: stable node identity across two non-isomorphic representations,
//! strict top-to-bottom ordering, and idempotent convergence without
//! feedback loops.
//!
//! ## Core Workflow
//!
//! 1.  **Project**: an inbound domain model (steps + parameters + output) is
//!     projected into a typed node list and laid out vertically from
//!     measured or estimated node heights.
//! 2.  **Mutate**: user interactions flow through discrete, composable
//!     handlers (add/remove/reorder nodes, edit per-node fields), each
//!     taking and returning a full node list.
//! 3.  **Derive**: after every mutation the domain model is re-derived from
//!     the graph and fingerprinted with an order-independent hash.
//! 4.  **Emit**: once a short quiet window passes without further changes,
//!     the model is pushed outward through the [`sync::ModelSink`]
//!     callbacks - at most once per window, and never when the fingerprint
//!     matches the last push, so the engine's own echo never tears down
//!     in-progress UI state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use douki::prelude::*;
//! use serde_json::json;
//!
//! struct Host;
//!
//! impl ModelSink for Host {
//!     fn on_steps_change(&mut self, steps: &[Step]) {
//!         println!("steps changed: {}", steps.len());
//!     }
//!     fn on_parameters_change(&mut self, parameters: &serde_json::Value) {
//!         println!("parameters changed: {parameters}");
//!     }
//!     fn on_output_change(&mut self, output: &serde_json::Value) {
//!         println!("output changed: {output}");
//!     }
//! }
//!
//! fn main() {
//!     // The catalog is passed in explicitly; builtin() is the static
//!     // fallback used until the external action listing arrives.
//!     let mut sync = FlowSync::new(ActionCatalog::builtin());
//!
//!     // Inbound: the host hands over the current task specification.
//!     let steps = vec![Step {
//!         id: "fetch".to_string(),
//!         name: "Fetch skeleton".to_string(),
//!         action: "fetch:template".to_string(),
//!         input: serde_json::Map::new(),
//!     }];
//!     let parameters = json!([{
//!         "title": "Project",
//!         "properties": { "name": { "type": "string" } },
//!         "required": ["name"]
//!     }]);
//!     sync.set_model(&steps, Some(&parameters), None);
//!
//!     // User edits flow through the mutation handlers.
//!     let added = sync.add_action_after(None, Instant::now());
//!     sync.set_step_field(&added, StepField::Action, "publish:github", Instant::now());
//!
//!     // The host drives the scheduler from its timer source; the push
//!     // fires once the quiet window has elapsed.
//!     let mut host = Host;
//!     sync.poll(Instant::now() + Duration::from_millis(100), &mut host);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod mutation;
pub mod prelude;
pub mod projector;
pub mod references;
pub mod sync;
