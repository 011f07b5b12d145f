// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;
use yantra_core::constants::SMOOTHING_BLEND;
use yantra_core::{Behavior, Preset, SecondaryCameraConfig, TextMotion};

#[test]
fn client_to_canvas_scales_by_backing_store() {
    // CSS 400x300 at (10, 20), backing store at 2x DPR
    let rect = [10.0, 20.0, 400.0, 300.0];
    assert_eq!(client_to_canvas_px(10.0, 20.0, rect, 800, 600), [0.0, 0.0]);
    assert_eq!(client_to_canvas_px(210.0, 170.0, rect, 800, 600), [400.0, 300.0]);
    assert_eq!(client_to_canvas_px(410.0, 320.0, rect, 800, 600), [800.0, 600.0]);
}

#[test]
fn collapsed_rect_maps_to_center() {
    let rect = [0.0, 0.0, 0.0, 300.0];
    assert_eq!(client_to_canvas_px(50.0, 50.0, rect, 800, 600), [400.0, 300.0]);
}

#[test]
fn keys_map_to_actions() {
    assert_eq!(action_for_key("m"), Some(KeyAction::ToggleMotion));
    assert_eq!(action_for_key("M"), Some(KeyAction::ToggleMotion));
    assert_eq!(action_for_key("s"), Some(KeyAction::ToggleSmoothing));
    assert_eq!(action_for_key("v"), Some(KeyAction::ToggleSecondary));
    assert_eq!(action_for_key("1"), Some(KeyAction::Preset(0)));
    assert_eq!(action_for_key("3"), Some(KeyAction::Preset(2)));
    assert_eq!(action_for_key("4"), None);
    assert_eq!(action_for_key("Enter"), None);
}

#[test]
fn log_level_parsing() {
    assert_eq!(log_level_from_query(None), log::Level::Info);
    assert_eq!(log_level_from_query(Some("debug")), log::Level::Debug);
    assert_eq!(log_level_from_query(Some(" WARN ")), log::Level::Warn);
    assert_eq!(log_level_from_query(Some("loud")), log::Level::Info);
}

#[test]
fn mouse_state_starts_released() {
    let ms = MouseState::default();
    assert!(!ms.down);
    assert!(ms.pressed_box.is_none());
}

#[test]
fn motion_key_swaps_spin_and_follow() {
    let classic = Behavior::preset(Preset::Classic);
    let followed = next_behavior(&classic, KeyAction::ToggleMotion);
    assert_eq!(followed.motion, TextMotion::default_follow());
    assert_eq!(followed.light, classic.light);
    let back = next_behavior(&followed, KeyAction::ToggleMotion);
    assert_eq!(back, classic);
}

#[test]
fn smoothing_key_toggles_blend() {
    let classic = Behavior::preset(Preset::Classic);
    let smoothed = next_behavior(&classic, KeyAction::ToggleSmoothing);
    assert_eq!(smoothed.light.smoothing, Some(SMOOTHING_BLEND));
    assert_eq!(
        next_behavior(&smoothed, KeyAction::ToggleSmoothing)
            .light
            .smoothing,
        None
    );
}

#[test]
fn secondary_key_twice_restores_none() {
    let classic = Behavior::preset(Preset::Classic);
    let on = next_behavior(&classic, KeyAction::ToggleSecondary);
    assert_eq!(on.secondary, Some(SecondaryCameraConfig::default()));
    let off = next_behavior(&on, KeyAction::ToggleSecondary);
    assert_eq!(off.secondary, None);
    assert_eq!(off, classic);
}

#[test]
fn preset_keys_replace_behavior() {
    let classic = Behavior::preset(Preset::Classic);
    for (i, p) in Preset::ALL.iter().enumerate() {
        let next = next_behavior(&classic, KeyAction::Preset(i));
        assert_eq!(next, Behavior::preset(*p));
        assert_eq!(next.validate(), Ok(()));
    }
    // out of range is a no-op
    let torch = Behavior::preset(Preset::Torch);
    assert_eq!(next_behavior(&torch, KeyAction::Preset(7)), torch);
}
