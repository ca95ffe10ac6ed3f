//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use rock_surface::graph::{AUX, OUTPUT};
use rock_surface::{NodeRole, RockSurface};

/// The four auxiliary links that never change: `(target, source)`.
pub const FIXED_AUX_LINKS: [(NodeRole, NodeRole); 4] = [
    (NodeRole::SourceSelector, NodeRole::NoiseSource),
    (NodeRole::Multiply, NodeRole::ColorProvider),
    (NodeRole::Compositor, NodeRole::OpacityModulator),
    (NodeRole::BlendMode, NodeRole::DifferenceOfGaussians),
];

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Assert every fixed aux link is in place
pub fn assert_aux_links(surface: &RockSurface) {
    let nodes = surface.nodes();
    for (target, source) in FIXED_AUX_LINKS {
        assert_eq!(
            surface.graph().source_of(nodes.get(target), AUX),
            Some((nodes.get(source), OUTPUT)),
            "{:?}.aux should be fed by {:?}",
            target,
            source
        );
    }
}
