//! Pan/zoom viewport: the affine mapping between pointer space and buffer
//! space. Pure coordinate math, no raster access.

/// Zoom factor lower bound.
pub const MIN_ZOOM: f32 = 0.1;
/// Zoom factor upper bound.
pub const MAX_ZOOM: f32 = 10.0;
/// Multiplicative zoom step per wheel notch.
const ZOOM_STEP: f32 = 1.1;

/// Viewport state: `screen = buffer * zoom + pan`.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// Map a pointer-space position to integer buffer coordinates.
    /// Truncates toward zero, matching an integer cast, not rounding.
    pub fn to_buffer(&self, pointer_x: f32, pointer_y: f32) -> (i32, i32) {
        (
            ((pointer_x - self.pan_x) / self.zoom) as i32,
            ((pointer_y - self.pan_y) / self.zoom) as i32,
        )
    }

    /// Map buffer coordinates back to pointer space (inverse of `to_buffer`).
    pub fn to_screen(&self, buffer_x: f32, buffer_y: f32) -> (f32, f32) {
        (
            buffer_x * self.zoom + self.pan_x,
            buffer_y * self.zoom + self.pan_y,
        )
    }

    /// Zoom one wheel notch while keeping the pointer-space `anchor` point
    /// visually fixed. `direction > 0` zooms in, otherwise out.
    ///
    /// The pan is re-solved from the anchor: the buffer point under the
    /// cursor maps to the same screen position before and after the zoom.
    pub fn zoom_around(&mut self, anchor_x: f32, anchor_y: f32, direction: i32) {
        let factor = if direction > 0 {
            ZOOM_STEP
        } else {
            1.0 / ZOOM_STEP
        };
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let actual = self.zoom / old_zoom;
        self.pan_x = anchor_x - (anchor_x - self.pan_x) * actual;
        self.pan_y = anchor_y - (anchor_y - self.pan_y) * actual;
    }

    /// Pan by a pointer-space delta. Unclamped: the canvas may be dragged
    /// arbitrarily far off-view.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_passes_through() {
        let vp = Viewport::new();
        assert_eq!(vp.to_buffer(12.7, 5.2), (12, 5));
        assert_eq!(vp.to_screen(12.0, 5.0), (12.0, 5.0));
    }

    #[test]
    fn round_trip_within_truncation_tolerance() {
        let mut vp = Viewport::new();
        vp.pan_by(37.5, -12.25);
        for _ in 0..8 {
            vp.zoom_around(100.0, 80.0, 1);
        }
        for (bx, by) in [(0, 0), (13, 7), (255, 101)] {
            let (sx, sy) = vp.to_screen(bx as f32, by as f32);
            // Probe the center of the on-screen pixel to stay clear of the
            // truncation boundary.
            let half = vp.zoom() / 2.0;
            assert_eq!(vp.to_buffer(sx + half, sy + half), (bx, by));
        }
    }

    #[test]
    fn truncation_is_toward_zero() {
        let mut vp = Viewport::new();
        vp.pan_by(10.0, 10.0);
        // (9.0 - 10.0) / 1.0 = -1.0 → -1; (9.5 - 10.0) → -0.5 → 0
        assert_eq!(vp.to_buffer(9.0, 9.5), (-1, 0));
    }

    #[test]
    fn zoom_clamps_to_range() {
        let mut vp = Viewport::new();
        for _ in 0..200 {
            vp.zoom_around(0.0, 0.0, 1);
        }
        assert!((vp.zoom() - MAX_ZOOM).abs() < 1e-4);
        for _ in 0..400 {
            vp.zoom_around(0.0, 0.0, -1);
        }
        assert!((vp.zoom() - MIN_ZOOM).abs() < 1e-4);
    }

    #[test]
    fn zoom_anchor_point_does_not_drift() {
        // Fractional pan keeps the anchor's continuous buffer coordinate off
        // an integer boundary, so truncation is stable under float rounding.
        let mut vp = Viewport::new();
        vp.pan_by(-40.5, 25.25);
        let anchor = (123.0f32, 88.0f32);
        let before = vp.to_buffer(anchor.0, anchor.1);
        vp.zoom_around(anchor.0, anchor.1, 1);
        assert_eq!(vp.to_buffer(anchor.0, anchor.1), before);
        vp.zoom_around(anchor.0, anchor.1, -1);
        assert_eq!(vp.to_buffer(anchor.0, anchor.1), before);
    }

    #[test]
    fn pan_is_unclamped() {
        let mut vp = Viewport::new();
        vp.pan_by(1e6, -1e6);
        assert_eq!(vp.pan(), (1e6, -1e6));
    }
}
