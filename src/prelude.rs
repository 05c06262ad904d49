//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from
//! the douki crate. Import this module to get access to the core
//! functionality without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use douki::prelude::*;
//!
//! let catalog = ActionCatalog::builtin();
//! let mut sync = FlowSync::new(catalog);
//! sync.set_model(&[], None, None);
//! assert_eq!(sync.nodes().len(), 2);
//! ```

// The synchronization engine and its outbound capability interface
pub use crate::sync::{
    EmitScheduler, FlowSync, ModelSink, QUIET_WINDOW, inbound_fingerprint, model_fingerprint,
    value_fingerprint,
};

// Domain model types
pub use crate::model::{
    OutputDescriptor, OutputLink, OutputText, ParameterField, ParameterSection, Step,
    normalize_parameters, sections_to_value,
};

// Graph types and projection
pub use crate::graph::{
    FlowEdge, FlowNode, NodeData, NodeKind, OUTPUT_NODE_ID, PARAMETER_NODE_ID, Position,
    action_node_id, rebuild_edges,
};
pub use crate::projector::{DerivedModel, derive_model, project};

// Layout and references
pub use crate::layout::{DEFAULT_NODE_HEIGHT, FIXED_X, VERTICAL_SPACING, align};
pub use crate::references::collect_references;

// Mutation handlers
pub use crate::mutation::StepField;

// Catalog and error types
pub use crate::catalog::ActionCatalog;
pub use crate::error::{CatalogError, SpecLoadError};

// Standard library re-exports commonly used with this crate
pub use std::sync::Arc;
pub use std::time::{Duration, Instant};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
