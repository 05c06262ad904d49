//! The synchronization facade over projector, layout, mutations, and the
//! emit scheduler.
//!
//! [`FlowSync`] owns the live node list and keeps both directions honest:
//! inbound model updates re-project the graph only when their fingerprint
//! actually changes, and outbound pushes fire only after the debounce quiet
//! window, only when the re-derived model differs from the last push. This
//! breaks the feedback loop between consuming and producing the same model:
//! when an outward push echoes back inbound, it fingerprints as
//! already-known and does not tear down in-progress UI state.
//!
//! Drag-in-progress suppresses outward pushes and re-alignment so the
//! engine never fights the user's pointer; release runs one reorder +
//! realign + emit cycle. Host-reported size measurements are coalesced
//! behind a single pending flag and applied in one realign pass.

pub mod fingerprint;
pub mod scheduler;

pub use fingerprint::*;
pub use scheduler::*;

use crate::catalog::ActionCatalog;
use crate::graph::{
    FlowEdge, FlowNode, OUTPUT_NODE_ID, PARAMETER_NODE_ID, Position, mint_action_node_id,
    rebuild_edges,
};
use crate::layout::{FIXED_X, VERTICAL_SPACING, align};
use crate::model::{OutputDescriptor, ParameterSection, Step};
use crate::mutation::{self, StepField};
use crate::projector::{DerivedModel, derive_model, project};
use crate::references::collect_references;
use ahash::AHashMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The outbound capability interface: the host's reaction to model changes.
///
/// The three callbacks fire together, at most once per quiet window, and
/// only when the derived model's fingerprint differs from the last push.
/// Handlers live here, beside the node data, never inside it, so the node
/// payloads stay plain serializable data.
pub trait ModelSink {
    fn on_steps_change(&mut self, steps: &[Step]);
    fn on_parameters_change(&mut self, parameters: &Value);
    fn on_output_change(&mut self, output: &Value);
}

/// The flow-model synchronization engine.
pub struct FlowSync {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    catalog: Arc<ActionCatalog>,
    scheduler: EmitScheduler,
    last_inbound: Option<u64>,
    dragging: Option<String>,
    realign_pending: bool,
    fixed_x: f64,
    vertical_spacing: f64,
}

impl FlowSync {
    pub fn new(catalog: ActionCatalog) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            catalog: Arc::new(catalog),
            scheduler: EmitScheduler::default(),
            last_inbound: None,
            dragging: None,
            realign_pending: false,
            fixed_x: FIXED_X,
            vertical_spacing: VERTICAL_SPACING,
        }
    }

    /// Overrides the layout coordinates used on every alignment pass.
    pub fn with_layout(mut self, fixed_x: f64, vertical_spacing: f64) -> Self {
        self.fixed_x = fixed_x;
        self.vertical_spacing = vertical_spacing;
        self
    }

    /// Overrides the debounce quiet window.
    pub fn with_quiet_window(mut self, window: Duration) -> Self {
        self.scheduler = EmitScheduler::new(window);
        self
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn catalog(&self) -> &Arc<ActionCatalog> {
        &self.catalog
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// The model as currently derivable from the live graph.
    pub fn derived_model(&self) -> DerivedModel {
        derive_model(&self.nodes)
    }

    /// Per-node autocompletion references for the current graph.
    pub fn references(&self) -> AHashMap<String, Vec<String>> {
        collect_references(&self.nodes)
    }

    pub fn has_pending_emit(&self) -> bool {
        self.scheduler.has_pending()
    }

    pub fn has_pending_realign(&self) -> bool {
        self.realign_pending
    }

    // --- Inbound direction -------------------------------------------------

    /// Accepts an external domain-model update.
    ///
    /// The graph is rebuilt from scratch only when the inbound fingerprint
    /// (model plus catalog) actually changed; an echo of the engine's own
    /// last push is recognized and ignored, which is what keeps outward
    /// pushes from destroying in-progress UI state. Returns whether a
    /// re-projection happened.
    pub fn set_model(
        &mut self,
        steps: &[Step],
        parameters: Option<&Value>,
        output: Option<&Value>,
    ) -> bool {
        let fingerprint = inbound_fingerprint(steps, parameters, output, &self.catalog);
        if self.last_inbound == Some(fingerprint) {
            return false;
        }
        self.last_inbound = Some(fingerprint);
        let projected = project(steps, parameters, output, &self.catalog);
        self.install(projected);
        true
    }

    /// Swaps in a refreshed action catalog and re-projects the current
    /// model against it. Returns whether anything changed.
    pub fn set_catalog(&mut self, catalog: ActionCatalog) -> bool {
        let model = derive_model(&self.nodes);
        let fingerprint = inbound_fingerprint(
            &model.steps,
            Some(&model.parameters),
            Some(&model.output),
            &catalog,
        );
        if self.last_inbound == Some(fingerprint) {
            return false;
        }
        self.catalog = Arc::new(catalog);
        self.last_inbound = Some(fingerprint);
        let projected = project(
            &model.steps,
            Some(&model.parameters),
            Some(&model.output),
            &self.catalog,
        );
        self.install(projected);
        true
    }

    // --- Graph mutations ---------------------------------------------------

    /// Adds a new Action node after `after` (or at the end of the action
    /// run) and returns its graph-local id.
    pub fn add_action_after(&mut self, after: Option<&str>, now: Instant) -> String {
        let rf_id = mint_action_node_id();
        let node = FlowNode::action(rf_id.clone(), Step::template(), Arc::clone(&self.catalog));
        let next = mutation::insert_action(&self.nodes, node, after);
        self.commit(next, now);
        rf_id
    }

    /// Creates the singleton Parameter node if missing; otherwise only
    /// re-aligns.
    pub fn ensure_parameter_node(&mut self, now: Instant) {
        let next = mutation::ensure_parameter_node(&self.nodes, &self.catalog);
        self.commit(next, now);
    }

    /// Creates the singleton Output node if missing; otherwise only
    /// re-aligns.
    pub fn ensure_output_node(&mut self, now: Instant) {
        let next = mutation::ensure_output_node(&self.nodes, &self.catalog);
        self.commit(next, now);
    }

    /// Removes an Action node. Unknown ids and non-action ids are no-ops.
    pub fn remove_action(&mut self, rf_id: &str, now: Instant) {
        let next = mutation::remove_action(&self.nodes, rf_id);
        self.commit(next, now);
    }

    pub fn set_step_field(&mut self, rf_id: &str, field: StepField, value: &str, now: Instant) {
        let next = mutation::set_step_field(&self.nodes, rf_id, field, value);
        self.commit(next, now);
    }

    pub fn set_step_input(&mut self, rf_id: &str, key: &str, value: Value, now: Instant) {
        let next = mutation::set_step_input(&self.nodes, rf_id, key, value);
        self.commit(next, now);
    }

    pub fn remove_step_input(&mut self, rf_id: &str, key: &str, now: Instant) {
        let next = mutation::remove_step_input(&self.nodes, rf_id, key);
        self.commit(next, now);
    }

    /// Edits the Parameter node's section list through an updater.
    pub fn update_sections(
        &mut self,
        update: impl FnOnce(&mut Vec<ParameterSection>),
        now: Instant,
    ) {
        let next = mutation::update_sections(&self.nodes, PARAMETER_NODE_ID, update);
        self.commit(next, now);
    }

    /// Edits the Output node's descriptor through an updater.
    pub fn update_output(&mut self, update: impl FnOnce(&mut OutputDescriptor), now: Instant) {
        let next = mutation::update_output(&self.nodes, OUTPUT_NODE_ID, update);
        self.commit(next, now);
    }

    // --- Drag lifecycle ----------------------------------------------------

    /// Marks a node as being dragged. While a drag is in progress, outward
    /// pushes and re-alignment are suppressed so programmatic positioning
    /// never fights the pointer.
    pub fn begin_drag(&mut self, rf_id: &str) {
        if self.nodes.iter().any(|n| n.rf_id == rf_id) {
            self.dragging = Some(rf_id.to_string());
        }
    }

    /// Tracks the dragged node's live position. Ignored for nodes other
    /// than the one being dragged.
    pub fn drag_to(&mut self, rf_id: &str, position: Position) {
        if self.dragging.as_deref() != Some(rf_id) {
            return;
        }
        if let Some(node) = self.nodes.iter_mut().find(|n| n.rf_id == rf_id) {
            node.position = position;
        }
    }

    /// Lifts the drag suppression and runs the release cycle once: reorder
    /// by released position, realign, schedule an emission.
    pub fn end_drag(&mut self, rf_id: &str, now: Instant) {
        if self.dragging.take().is_none() {
            return;
        }
        let next = mutation::reorder_on_release(&self.nodes, rf_id);
        self.commit(next, now);
        self.realign_pending = false;
    }

    // --- Measurement feedback ----------------------------------------------

    /// Records a host-measured node height. Zero, negative, and non-finite
    /// values are dropped; unchanged values do not schedule work. The
    /// realign itself is deferred to [`FlowSync::apply_pending_measurements`]
    /// so a burst of sub-pixel size reports coalesces into one pass.
    pub fn report_measured_height(&mut self, rf_id: &str, height: f64) {
        if !height.is_finite() || height <= 0.0 {
            return;
        }
        if let Some(node) = self.nodes.iter_mut().find(|n| n.rf_id == rf_id)
            && node.measured_height != Some(height)
        {
            node.measured_height = Some(height);
            self.realign_pending = true;
        }
    }

    /// The host's animation-frame-equivalent callback: applies all pending
    /// measurements in a single realign pass. Suppressed while dragging.
    /// Returns whether a realign ran.
    pub fn apply_pending_measurements(&mut self) -> bool {
        if !self.realign_pending || self.dragging.is_some() {
            return false;
        }
        self.realign_pending = false;
        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = align(nodes, self.fixed_x, self.vertical_spacing);
        true
    }

    // --- Outbound direction ------------------------------------------------

    /// Emits the derived model if the quiet window has elapsed. Suppressed
    /// while dragging. Returns whether an emission fired.
    pub fn poll(&mut self, now: Instant, sink: &mut impl ModelSink) -> bool {
        if self.dragging.is_some() {
            return false;
        }
        if !self.scheduler.take_due(now) {
            return false;
        }
        self.emit(sink);
        true
    }

    /// Executes any pending emission immediately. Called on unmount or an
    /// explicit flush request so pending pushes are never dropped.
    pub fn flush(&mut self, sink: &mut impl ModelSink) -> bool {
        if !self.scheduler.take_now() {
            return false;
        }
        self.emit(sink);
        true
    }

    fn emit(&mut self, sink: &mut impl ModelSink) {
        let model = derive_model(&self.nodes);
        self.last_inbound = Some(inbound_fingerprint(
            &model.steps,
            Some(&model.parameters),
            Some(&model.output),
            &self.catalog,
        ));
        sink.on_steps_change(&model.steps);
        sink.on_parameters_change(&model.parameters);
        sink.on_output_change(&model.output);
    }

    fn commit(&mut self, nodes: Vec<FlowNode>, now: Instant) {
        self.nodes = align(nodes, self.fixed_x, self.vertical_spacing);
        self.edges = rebuild_edges(&self.nodes);
        self.scheduler
            .note_change(model_fingerprint(&derive_model(&self.nodes)), now);
    }

    fn install(&mut self, mut nodes: Vec<FlowNode>) {
        let measured: AHashMap<String, f64> = self
            .nodes
            .iter()
            .filter_map(|n| n.measured_height.map(|h| (n.rf_id.clone(), h)))
            .collect();
        for node in &mut nodes {
            node.measured_height = measured.get(&node.rf_id).copied();
        }
        self.nodes = align(nodes, self.fixed_x, self.vertical_spacing);
        self.edges = rebuild_edges(&self.nodes);
        self.scheduler
            .sync_to(model_fingerprint(&derive_model(&self.nodes)));
    }
}
