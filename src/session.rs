//! Drawing session: the engine facade the UI shell talks to.
//!
//! Pointer events arrive in raw pointer space, get mapped through the
//! viewport, and drive a three-state machine (idle / drawing / panning).
//! While the primary button is held, every painted delta accumulates into
//! one stroke; the stroke seals into history on release. The shell never
//! sees buffer-space coordinates.

use crate::brush::{self, BrushState};
use crate::canvas::{CLEAR_COLOR, PixelBuffer, pack_argb};
use crate::history::{EditHistory, PixelDelta, Stroke};
use crate::io::{self, CodecError};
use crate::log_info;
use crate::viewport::Viewport;
use std::path::Path;

/// Default canvas size on construction without an explicit size.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Which pointer button an event refers to. Primary draws, secondary pans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// A resolved input event, decoupled from any particular UI event source.
#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton },
    /// `delta_y > 0` is wheel-up. With shift held the wheel resizes the
    /// brush instead of zooming.
    Wheel { delta_y: f32, shift: bool },
}

#[derive(Clone, Copy, Debug)]
enum SessionState {
    Idle,
    /// Mid-stroke; holds the last stamped buffer coordinate.
    Drawing { last_x: i32, last_y: i32 },
    /// Mid-pan; holds the previous pointer position.
    Panning { last_x: f32, last_y: f32 },
}

// ============================================================================
// DRAWING SESSION
// ============================================================================

/// Exclusive owner of one canvas: pixel buffer, history, brush, viewport.
pub struct DrawingSession {
    buffer: PixelBuffer,
    history: EditHistory,
    brush: BrushState,
    viewport: Viewport,
    state: SessionState,
    /// Deltas of the stroke currently being drawn, chronological order.
    pending: Vec<PixelDelta>,
    /// Last known pointer position, for wheel zoom and the brush preview.
    cursor: Option<(f32, f32)>,
    dirty: bool,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl DrawingSession {
    /// Create a session over a fresh canvas filled with the clear color.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height, CLEAR_COLOR),
            history: EditHistory::new(),
            brush: BrushState::default(),
            viewport: Viewport::new(),
            state: SessionState::Idle,
            pending: Vec::new(),
            cursor: None,
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    // ------------------------------------------------------------------
    // Event entry points
    // ------------------------------------------------------------------

    /// Single dispatch entry point for hosts that route a unified event
    /// stream. Equivalent to calling the per-kind methods directly.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { button, x, y } => self.pointer_pressed(button, x, y),
            InputEvent::PointerMove { x, y } => self.pointer_moved(x, y),
            InputEvent::PointerUp { button } => self.pointer_released(button),
            InputEvent::Wheel { delta_y, shift } => self.wheel(delta_y, shift),
        }
    }

    /// Primary button starts a stroke (stamping the initial disc),
    /// secondary button starts a pan. Presses in a non-idle state are
    /// ignored.
    pub fn pointer_pressed(&mut self, button: PointerButton, x: f32, y: f32) {
        self.cursor = Some((x, y));
        if !matches!(self.state, SessionState::Idle) {
            return;
        }
        match button {
            PointerButton::Primary => {
                let (bx, by) = self.viewport.to_buffer(x, y);
                self.pending.clear();
                self.stamp_disc(bx, by);
                self.state = SessionState::Drawing {
                    last_x: bx,
                    last_y: by,
                };
            }
            PointerButton::Secondary => {
                self.state = SessionState::Panning {
                    last_x: x,
                    last_y: y,
                };
            }
        }
    }

    /// While drawing, paint an interpolated line from the previous sample;
    /// while panning, shift the viewport by the pointer delta.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
        match self.state {
            SessionState::Idle => {}
            SessionState::Drawing { last_x, last_y } => {
                let (bx, by) = self.viewport.to_buffer(x, y);
                let before = self.pending.len();
                brush::paint_line(
                    &mut self.buffer,
                    last_x,
                    last_y,
                    bx,
                    by,
                    self.brush.radius(),
                    self.brush.paint_color(),
                    &mut self.pending,
                );
                if self.pending.len() != before {
                    self.dirty = true;
                }
                self.state = SessionState::Drawing {
                    last_x: bx,
                    last_y: by,
                };
            }
            SessionState::Panning { last_x, last_y } => {
                self.viewport.pan_by(x - last_x, y - last_y);
                self.state = SessionState::Panning {
                    last_x: x,
                    last_y: y,
                };
                self.dirty = true;
            }
        }
    }

    /// Releasing the primary button seals the in-progress stroke into
    /// history; releasing the secondary button ends the pan. A release that
    /// does not match the active gesture is ignored.
    pub fn pointer_released(&mut self, button: PointerButton) {
        match (self.state, button) {
            (SessionState::Drawing { .. }, PointerButton::Primary) => {
                let deltas = std::mem::take(&mut self.pending);
                self.history.commit(Stroke::from_deltas(deltas));
                self.state = SessionState::Idle;
            }
            (SessionState::Panning { .. }, PointerButton::Secondary) => {
                self.state = SessionState::Idle;
            }
            _ => {}
        }
    }

    /// Wheel with shift nudges the brush size by the wheel sign; without
    /// shift it zooms, anchored at the last known pointer position so the
    /// point under the cursor does not drift.
    pub fn wheel(&mut self, delta_y: f32, shift: bool) {
        let direction = if delta_y > 0.0 {
            1
        } else if delta_y < 0.0 {
            -1
        } else {
            return;
        };
        if shift {
            self.brush.adjust_size(direction);
        } else {
            let (ax, ay) = self.cursor.unwrap_or((0.0, 0.0));
            self.viewport.zoom_around(ax, ay, direction);
            self.dirty = true;
        }
    }

    // ------------------------------------------------------------------
    // Brush state
    // ------------------------------------------------------------------

    /// Set the brush diameter (clamped to `[1, 64]`). Takes effect on the
    /// next stamp, even mid-stroke.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush.set_size(size);
    }

    pub fn set_eraser(&mut self, eraser: bool) {
        self.brush.eraser = eraser;
    }

    /// Set the draw color from RGBA channels.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.brush.color = pack_argb(r, g, b, a);
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    // ------------------------------------------------------------------
    // History commands
    // ------------------------------------------------------------------

    /// Revert the last committed stroke. Rejected while a gesture is in
    /// progress: an uncommitted stroke is not undoable.
    pub fn undo(&mut self) -> bool {
        if !matches!(self.state, SessionState::Idle) {
            return false;
        }
        let applied = self.history.undo(&mut self.buffer);
        if applied {
            self.dirty = true;
        }
        applied
    }

    /// Re-apply the last undone stroke. Rejected while a gesture is in
    /// progress, no-op on an empty redo stack.
    pub fn redo(&mut self) -> bool {
        if !matches!(self.state, SessionState::Idle) {
            return false;
        }
        let applied = self.history.redo(&mut self.buffer);
        if applied {
            self.dirty = true;
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Fill the canvas with the clear color and drop all history. Clear is
    /// a hard reset of editable state and is itself not undoable; any
    /// gesture in progress is discarded.
    pub fn clear(&mut self) {
        self.buffer.fill(CLEAR_COLOR);
        self.history.clear();
        self.pending.clear();
        self.state = SessionState::Idle;
        self.dirty = true;
        log_info!("canvas cleared ({}x{})", self.width(), self.height());
    }

    // ------------------------------------------------------------------
    // Codec boundary
    // ------------------------------------------------------------------

    /// Snapshot the raster as `(width, height, RGBA bytes)`. The copy is
    /// the hand-off point for encoding: an in-flight save can never race
    /// with further drawing.
    pub fn export_pixels(&self) -> (u32, u32, Vec<u8>) {
        (
            self.buffer.width(),
            self.buffer.height(),
            io::argb_to_rgba_bytes(self.buffer.as_slice()),
        )
    }

    /// Replace the canvas with decoded image data. All-or-nothing: on any
    /// validation failure the current buffer and history are untouched.
    /// On success the history and any in-progress gesture are reset.
    pub fn import_pixels(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<(), CodecError> {
        if width == 0 || height == 0 || rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(CodecError::Dimensions {
                width,
                height,
                len: rgba.len() / 4,
            });
        }
        let pixels = io::rgba_bytes_to_argb(rgba);
        self.buffer.replace(width, height, pixels);
        self.history.clear();
        self.pending.clear();
        self.state = SessionState::Idle;
        self.dirty = true;
        log_info!("canvas replaced ({}x{})", width, height);
        Ok(())
    }

    /// Load an image file and swap it in via [`import_pixels`] semantics.
    pub fn load_from(&mut self, path: &Path) -> Result<(), CodecError> {
        let (width, height, pixels) = io::load_image(path)?;
        self.buffer.replace(width, height, pixels);
        self.history.clear();
        self.pending.clear();
        self.state = SessionState::Idle;
        self.dirty = true;
        Ok(())
    }

    /// Save the raster to a lossless image file. Read-only over the buffer.
    pub fn save_to(&self, path: &Path) -> Result<(), CodecError> {
        io::save_image(path, self.buffer.width(), self.buffer.height(), self.buffer.as_slice())
    }

    // ------------------------------------------------------------------
    // Render-layer queries
    // ------------------------------------------------------------------

    /// Consume the redraw-needed flag. Set by buffer mutations and by
    /// viewport changes.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// `(zoom, pan_x, pan_y)` for positioning the canvas image on screen.
    pub fn viewport_params(&self) -> (f32, f32, f32) {
        let (pan_x, pan_y) = self.viewport.pan();
        (self.viewport.zoom(), pan_x, pan_y)
    }

    /// Brush-preview cursor circle: `(pointer_x, pointer_y, radius)` in
    /// pointer space, or `None` before the first pointer event. Purely
    /// advisory for the presentation layer.
    pub fn brush_preview(&self) -> Option<(f32, f32, f32)> {
        let (x, y) = self.cursor?;
        let radius = self.brush.size() as f32 / 2.0 * self.viewport.zoom();
        Some((x, y, radius))
    }

    /// Read a single pixel (buffer space). Mostly for tests and tools.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.buffer.get(x, y)
    }

    fn stamp_disc(&mut self, bx: i32, by: i32) {
        let before = self.pending.len();
        brush::paint_disc(
            &mut self.buffer,
            bx,
            by,
            self.brush.radius(),
            self.brush.paint_color(),
            &mut self.pending,
        );
        if self.pending.len() != before {
            self.dirty = true;
        }
    }
}
