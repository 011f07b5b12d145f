// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use yantra_core::constants as core;

#[test]
#[allow(clippy::assertions_on_constants)]
fn object_uniforms_fit_dynamic_offsets() {
    // dynamic uniform offsets need 256-byte alignment on WebGPU
    assert_eq!(OBJECT_UNIFORM_STRIDE % 256, 0);
    // model + color + uv rect + params
    assert!(OBJECT_UNIFORM_STRIDE >= 64 + 3 * 16);
    // headline, every box and every label must fit
    assert!(MAX_OBJECTS >= 1 + 2 * core::NAV_ITEMS.len());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn colors_are_normalized() {
    for c in [HEADLINE_RGBA, LABEL_RGBA, NAV_BOX_RGBA, BACKDROP_RGBA] {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
    assert!(CLEAR_RGB.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn glow_and_bloom_are_positive() {
    assert!(BLOOM_STRENGTH > 0.0);
    assert!(BLOOM_THRESHOLD > 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(HOVER_BRIGHTEN > 1.0);
    assert!(GLYPH_SCALE >= 1);
    // glow never dips below zero at its trough
    assert!(core::GLOW_BASE - core::GLOW_AMPLITUDE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_defaults_match_the_page() {
    assert_eq!(core::CAMERA_Z, 15.0);
    assert_eq!(core::CAMERA_FOVY_DEG, 75.0);
    assert_eq!(core::AMBIENT_INTENSITY, 0.5);
    assert_eq!(core::POINT_LIGHT_POSITION, [10.0, 10.0, 10.0]);
    assert!(core::SMOOTHING_BLEND > 0.0 && core::SMOOTHING_BLEND <= 1.0);
    // labels appear before the aim point reaches the neighbouring box
    assert!(core::LABEL_RADIUS < core::NAV_SPACING_X);
}
