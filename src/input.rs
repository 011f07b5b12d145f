// Pure input helpers shared by the event listeners and the host tests.

use yantra_core::constants::SMOOTHING_BLEND;
use yantra_core::{Behavior, Preset, SecondaryCameraConfig, TextMotion};

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub down: bool,
    /// Box under the pointer when the button went down.
    pub pressed_box: Option<usize>,
}

/// Map a client-space position to canvas backing-store pixels.
///
/// `rect` is the canvas bounding rect as `[left, top, width, height]` in CSS
/// pixels; a collapsed rect maps to the canvas center.
#[inline]
pub fn client_to_canvas_px(
    client_x: f32,
    client_y: f32,
    rect: [f32; 4],
    canvas_w: u32,
    canvas_h: u32,
) -> [f32; 2] {
    let [left, top, w, h] = rect;
    if w <= 0.0 || h <= 0.0 {
        return [canvas_w as f32 * 0.5, canvas_h as f32 * 0.5];
    }
    let sx = ((client_x - left) / w) * canvas_w as f32;
    let sy = ((client_y - top) / h) * canvas_h as f32;
    [sx, sy]
}

/// Runtime toggles bound to single keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMotion,
    ToggleSmoothing,
    ToggleSecondary,
    Preset(usize),
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "m" | "M" => Some(KeyAction::ToggleMotion),
        "s" | "S" => Some(KeyAction::ToggleSmoothing),
        "v" | "V" => Some(KeyAction::ToggleSecondary),
        "1" => Some(KeyAction::Preset(0)),
        "2" => Some(KeyAction::Preset(1)),
        "3" => Some(KeyAction::Preset(2)),
        _ => None,
    }
}

/// Apply a key action to the current behavior, returning the new one.
pub fn next_behavior(current: &Behavior, action: KeyAction) -> Behavior {
    let mut next = *current;
    match action {
        KeyAction::ToggleMotion => {
            next.motion = match current.motion {
                TextMotion::Spin { .. } => TextMotion::default_follow(),
                TextMotion::PointerFollow { .. } => TextMotion::default_spin(),
            };
        }
        KeyAction::ToggleSmoothing => {
            next.light.smoothing = match current.light.smoothing {
                Some(_) => None,
                None => Some(SMOOTHING_BLEND),
            };
        }
        KeyAction::ToggleSecondary => {
            next.secondary = match current.secondary {
                Some(_) => None,
                None => Some(SecondaryCameraConfig::default()),
            };
        }
        KeyAction::Preset(i) => {
            if let Some(p) = Preset::ALL.get(i) {
                next = Behavior::preset(*p);
            }
        }
    }
    next
}

/// Parse a `?log=` value into a level filter; unknown values keep the default.
#[inline]
pub fn log_level_from_query(value: Option<&str>) -> log::Level {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => log::Level::Trace,
        Some("debug") => log::Level::Debug,
        Some("warn") => log::Level::Warn,
        Some("error") => log::Level::Error,
        _ => log::Level::Info,
    }
}
