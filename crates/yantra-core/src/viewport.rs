use crate::config::{Placement, ViewportConfig};
use crate::pointer::PointerState;

/// Backing-store size of the canvas in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Pixel rectangle with a top-left origin, as used for scissor/viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    pub fn is_within(&self, canvas: CanvasSize) -> bool {
        self.x as u64 + self.width as u64 <= canvas.width as u64
            && self.y as u64 + self.height as u64 <= canvas.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Sub-viewport for the secondary camera. Always inside `canvas`.
pub fn secondary_viewport(
    pointer: PointerState,
    canvas: CanvasSize,
    config: &ViewportConfig,
) -> ViewportRect {
    if canvas.is_empty() {
        return ViewportRect::default();
    }
    let fraction = config.fraction.clamp(0.0, 1.0);
    let width = ((canvas.width as f32 * fraction) as u32).clamp(1, canvas.width);
    let height = ((canvas.height as f32 * fraction) as u32).clamp(1, canvas.height);
    let max_x = canvas.width - width;
    let max_y = canvas.height - height;

    let (x, y) = match config.placement {
        Placement::Corner { margin_px } => {
            // margin shrinks when the canvas is too small to honor it
            (max_x.saturating_sub(margin_px), max_y.saturating_sub(margin_px))
        }
        Placement::FollowPointer => {
            let (px, py) = pointer.to_canvas_px(canvas.width, canvas.height);
            let left = (px - width as f32 * 0.5).round().clamp(0.0, max_x as f32);
            let top = (py - height as f32 * 0.5).round().clamp(0.0, max_y as f32);
            (left as u32, top as u32)
        }
    };
    ViewportRect {
        x,
        y,
        width,
        height,
    }
}
