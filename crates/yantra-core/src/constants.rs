use glam::Vec3;

// Shared scene defaults used by the core and the web frontend.

// Headline block
pub const HEADLINE: &str = "Yantra Inc,\nSoftware Company of\nBirtamode, Jhapa, NP";
pub const HEADLINE_FONT_SIZE: f32 = 1.0; // world units per text line
pub const LABEL_FONT_SIZE: f32 = 0.45;

// Primary camera
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const POINT_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const SPOTLIGHT_POSITION: [f32; 3] = [0.0, 0.0, 10.0];
pub const SPOTLIGHT_CONE_RADIANS: f32 = 0.35;
pub const SPOTLIGHT_INTENSITY: f32 = 2.5;

// Frame update defaults
pub const SPIN_RADIANS_PER_FRAME: f32 = 0.01;
pub const FOLLOW_MAX_YAW: f32 = 0.6; // radians at pointer.x == 1
pub const FOLLOW_MAX_PITCH: f32 = 0.35; // radians at pointer.y == 1
pub const AIM_SENSITIVITY: f32 = 10.0; // world units at pointer == 1
pub const SMOOTHING_BLEND: f32 = 0.05; // fraction of the remaining distance per frame

// Secondary (mini-map) camera
pub const SECONDARY_SENSITIVITY: f32 = 6.0;
pub const SECONDARY_HEIGHT: f32 = 9.0;
pub const SECONDARY_VIEWPORT_FRACTION: f32 = 0.25;
pub const SECONDARY_VIEWPORT_MARGIN_PX: u32 = 16;

// Glow pulse applied to the headline emissive term
pub const GLOW_BASE: f32 = 0.9;
pub const GLOW_AMPLITUDE: f32 = 0.25;
pub const GLOW_HZ: f32 = 0.4;

// Navigation boxes and their labels
pub const NAV_BOX_HALF_EXTENT: f32 = 0.6;
pub const NAV_ROW_Y: f32 = -5.5;
pub const NAV_SPACING_X: f32 = 4.5;
pub const LABEL_OFFSET_Y: f32 = 1.3; // label anchor above its box
pub const LABEL_RADIUS: f32 = 2.5;

pub const NAV_ITEMS: [(&str, &str); 3] = [
    ("About", "#about"),
    ("Services", "#services"),
    ("Contact", "#contact"),
];

#[inline]
pub fn nav_box_center(index: usize) -> Vec3 {
    let mid = (NAV_ITEMS.len() as f32 - 1.0) * 0.5;
    Vec3::new((index as f32 - mid) * NAV_SPACING_X, NAV_ROW_Y, 0.0)
}
