// Rendering and page-wiring constants for the web frontend.
// Scene layout and frame-update defaults live in `yantra_core::constants`;
// these only concern how the page draws and listens.

// Canvas element the renderer attaches to
pub const CANVAS_ID: &str = "app-canvas";

// Clear color of the main pass (pure black page)
pub const CLEAR_RGB: [f32; 3] = [0.0, 0.0, 0.0];

// Secondary viewport backdrop, slightly lifted so the inset reads as a panel
pub const BACKDROP_RGBA: [f32; 4] = [0.02, 0.03, 0.06, 1.0];

// Object colors
pub const HEADLINE_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const LABEL_RGBA: [f32; 4] = [0.85, 0.92, 1.0, 1.0];
pub const NAV_BOX_RGBA: [f32; 4] = [0.25, 0.45, 0.9, 1.0];

// Emissive weights (multiplied by the frame glow level)
pub const HEADLINE_EMISSIVE: f32 = 0.6;
pub const LABEL_EMISSIVE: f32 = 0.4;
pub const NAV_BOX_EMISSIVE: f32 = 0.05;

// Color adjustments
pub const HOVER_BRIGHTEN: f32 = 1.6;

// Point light intensity (ambient and spotlight come from the core config)
pub const POINT_LIGHT_INTENSITY: f32 = 0.8;

// Glyph atlas: pixels per font pixel
pub const GLYPH_SCALE: u32 = 4;

// Upper bound on drawn objects (headline + boxes + labels)
pub const MAX_OBJECTS: usize = 32;
// Dynamic uniform offsets must honor this alignment
pub const OBJECT_UNIFORM_STRIDE: u64 = 256;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;
