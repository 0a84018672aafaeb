//! Flat raster storage: a single 32-bit-per-pixel buffer plus the color
//! packing helpers shared by the brush, history, and codec layers.

/// Canvas background / eraser color (opaque white).
pub const CLEAR_COLOR: u32 = 0xFFFF_FFFF;

/// Default draw color (opaque black).
pub const DEFAULT_DRAW_COLOR: u32 = 0xFF00_0000;

/// Pack ARGB channels into the engine's `0xAARRGGBB` pixel format.
pub fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Unpack an `0xAARRGGBB` pixel into `[r, g, b, a]` channel bytes.
pub fn unpack_argb(color: u32) -> [u8; 4] {
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
        ((color >> 24) & 0xFF) as u8,
    ]
}

// ============================================================================
// PIXEL BUFFER
// ============================================================================

/// Row-major packed-ARGB raster. `index = y * width + x`.
///
/// All access is bounds-checked: reads outside the raster return `None`,
/// writes outside it are silently dropped. Callers clip against the buffer,
/// they never index the pixel array directly.
#[derive(Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a `width` × `height` buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read the pixel at `(x, y)`, or `None` outside the raster.
    /// Signed coordinates so brush bounding boxes can probe past the edges.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    /// Write the pixel at `(x, y)`. Out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    /// Fill the whole raster with one color.
    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Atomically swap in a whole new raster (used by image load).
    ///
    /// The replacement is all-or-nothing: `pixels` must already hold exactly
    /// `width * height` entries, otherwise the current buffer is left
    /// untouched and `false` is returned.
    pub fn replace(&mut self, width: u32, height: u32, pixels: Vec<u32>) -> bool {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        true
    }

    /// Borrow the raw pixel array (row-major ARGB), for export and encoding.
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }
}
