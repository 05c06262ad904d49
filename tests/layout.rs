//! Tests for the vertical layout engine.
mod common;
use common::*;
use douki::layout::{estimate_height, resolve_height};
use douki::prelude::*;

fn aligned_sample() -> Vec<FlowNode> {
    let steps = sample_steps();
    let parameters = sample_parameters();
    let output = sample_output();
    align(
        project(&steps, Some(&parameters), Some(&output), &catalog()),
        FIXED_X,
        VERTICAL_SPACING,
    )
}

#[test]
fn test_align_is_idempotent() {
    let once = aligned_sample();
    let twice = align(once.clone(), FIXED_X, VERTICAL_SPACING);
    assert_eq!(once, twice);
}

#[test]
fn test_align_pins_horizontal_coordinate() {
    for node in aligned_sample() {
        assert_eq!(node.position.x, FIXED_X);
    }
}

#[test]
fn test_nodes_never_overlap() {
    let nodes = aligned_sample();
    for pair in nodes.windows(2) {
        let bottom = pair[0].position.y + resolve_height(&pair[0]);
        assert!(
            pair[1].position.y >= bottom,
            "node {} starts above the previous node's bottom edge",
            pair[1].rf_id
        );
    }
}

#[test]
fn test_measured_height_overrides_estimate() {
    let mut nodes = aligned_sample();
    nodes[0].measured_height = Some(500.0);
    let aligned = align(nodes, FIXED_X, VERTICAL_SPACING);

    assert_eq!(aligned[1].position.y, 500.0 + VERTICAL_SPACING);
}

#[test]
fn test_bad_measurements_fall_back_to_estimate() {
    let nodes = aligned_sample();
    let estimated_y = nodes[1].position.y;

    for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let mut tainted = nodes.clone();
        tainted[0].measured_height = Some(bad);
        let aligned = align(tainted, FIXED_X, VERTICAL_SPACING);
        assert_eq!(aligned[1].position.y, estimated_y);
    }
}

#[test]
fn test_estimates_scale_with_content() {
    let empty = project(&[], None, None, &catalog());
    let parameters = sample_parameters();
    let full = project(&sample_steps(), Some(&parameters), None, &catalog());

    // More sections and fields make the parameter node taller.
    assert!(estimate_height(&full[0].data) > estimate_height(&empty[0].data));

    // An action node with inputs is taller than a bare template.
    let bare = project(&[step("x", "debug:log")], None, None, &catalog());
    assert!(estimate_height(&full[1].data) > estimate_height(&bare[1].data));
}

#[test]
fn test_estimates_are_always_positive() {
    for node in project(&[], None, None, &catalog()) {
        assert!(estimate_height(&node.data) > 0.0);
    }
}
