//! Circular brush rasterization: disc stamps and Bresenham-interpolated
//! line strokes over a [`PixelBuffer`], with per-pixel delta recording.

use crate::canvas::{CLEAR_COLOR, DEFAULT_DRAW_COLOR, PixelBuffer};
use crate::history::PixelDelta;

/// Smallest accepted brush size (a single pixel).
pub const MIN_BRUSH_SIZE: u32 = 1;
/// Largest accepted brush size.
pub const MAX_BRUSH_SIZE: u32 = 64;

/// Current tool settings: brush diameter, eraser toggle, draw color.
#[derive(Clone, Copy, Debug)]
pub struct BrushState {
    size: u32,
    pub eraser: bool,
    pub color: u32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            size: 4,
            eraser: false,
            color: DEFAULT_DRAW_COLOR,
        }
    }
}

impl BrushState {
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Set the brush diameter, clamped to `[1, 64]`. Never rejects.
    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Nudge the diameter by a signed step (shift+wheel), with clamping.
    pub fn adjust_size(&mut self, step: i32) {
        let size = (self.size as i32 + step).max(MIN_BRUSH_SIZE as i32);
        self.set_size(size as u32);
    }

    /// Disc radius in pixels. Integer floor division, so even and odd
    /// diameters produce slightly different footprints; that footprint is
    /// contractual and must not be "fixed" to rounding.
    pub fn radius(&self) -> i32 {
        (self.size / 2) as i32
    }

    /// The color the next stamp writes: the clear color while erasing.
    pub fn paint_color(&self) -> u32 {
        if self.eraser { CLEAR_COLOR } else { self.color }
    }
}

// ============================================================================
// DISC / LINE RASTERIZATION
// ============================================================================

/// Stamp a hard-edged disc of `color` centered at `(cx, cy)`.
///
/// Covers exactly the in-bounds cells with `dx² + dy² <= radius²`
/// (inclusive mask; radius 0 degenerates to a single pixel). Cells already
/// holding `color` are skipped, every actual write appends one delta to
/// `out` carrying the pre-write value.
pub fn paint_disc(
    buffer: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    color: u32,
    out: &mut Vec<PixelDelta>,
) {
    let min_x = (cx - radius).max(0);
    let max_x = (cx + radius).min(buffer.width() as i32 - 1);
    let min_y = (cy - radius).max(0);
    let max_y = (cy + radius).min(buffer.height() as i32 - 1);
    let rr = radius * radius;

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let dx = px - cx;
            let dy = py - cy;
            if dx * dx + dy * dy > rr {
                continue;
            }
            // Bounding box is pre-clamped, so the read always succeeds.
            let Some(old) = buffer.get(px, py) else {
                continue;
            };
            if old == color {
                continue;
            }
            buffer.set(px, py, color);
            out.push(PixelDelta {
                x: px,
                y: py,
                old_color: old,
                new_color: color,
            });
        }
    }
}

/// Stamp discs along the integer Bresenham walk from `(x0, y0)` to
/// `(x1, y1)`, both endpoints included.
///
/// This closes the gaps between sampled pointer positions: the final raster
/// is the same whether the pointer reported one long jump or many short
/// steps along the same segment. Deltas are appended in traversal order; a
/// later delta for a cell legitimately overrides an earlier one within the
/// same stroke.
pub fn paint_line(
    buffer: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    color: u32,
    out: &mut Vec<PixelDelta>,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        paint_disc(buffer, x, y, radius, color, out);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
