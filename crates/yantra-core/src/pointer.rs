//! Normalized pointer sampling.
//!
//! The pointer is kept in normalized device-style coordinates: `[-1, 1]` on
//! each axis, origin at the canvas center and +y pointing up. Listeners that
//! fire between frames write the latest sample into a [`PointerCell`]; the
//! frame callback reads whatever was written last.

use std::cell::Cell;

/// Normalized pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Build a pointer, clamping each axis into `[-1, 1]`.
    ///
    /// Non-finite inputs collapse to the center of that axis.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Convert a pixel position (origin top-left, +y down) into a pointer.
    pub fn from_canvas_px(px: f32, py: f32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::CENTER;
        }
        let x = (px / width as f32) * 2.0 - 1.0;
        let y = 1.0 - (py / height as f32) * 2.0;
        Self::new(x, y)
    }

    /// Inverse of [`PointerState::from_canvas_px`].
    pub fn to_canvas_px(self, width: u32, height: u32) -> (f32, f32) {
        let px = (self.x + 1.0) * 0.5 * width as f32;
        let py = (1.0 - self.y) * 0.5 * height as f32;
        (px, py)
    }
}

#[inline]
fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Last-write-wins pointer slot shared by event listeners and the frame loop.
#[derive(Debug, Default)]
pub struct PointerCell {
    latest: Cell<PointerState>,
}

impl PointerCell {
    pub fn new(initial: PointerState) -> Self {
        Self {
            latest: Cell::new(initial),
        }
    }

    #[inline]
    pub fn record(&self, sample: PointerState) {
        self.latest.set(sample);
    }

    #[inline]
    pub fn latest(&self) -> PointerState {
        self.latest.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_center_maps_to_origin() {
        let p = PointerState::from_canvas_px(400.0, 300.0, 800, 600);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }

    #[test]
    fn out_of_range_is_clamped() {
        let p = PointerState::new(3.0, -7.5);
        assert_eq!(p, PointerState::new(1.0, -1.0));
        assert_eq!(PointerState::new(f32::NAN, 0.5).x, 0.0);
    }
}
