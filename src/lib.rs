//! rasterbrush — a raster drawing engine.
//!
//! An in-memory packed-ARGB pixel buffer with hard-edged circular brush
//! painting, Bresenham-interpolated strokes, a pan/zoom viewport, stroke-
//! granular undo/redo, and lossless PNG import/export. The engine consumes
//! already-resolved pointer coordinates and colors; window chrome, input
//! device handling, and dialogs belong to the embedding shell.
//!
//! [`DrawingSession`] is the facade: feed it pointer events, query the
//! dirty flag and viewport for rendering, and use [`io`] at the file
//! boundary.

pub mod logger;

pub mod brush;
pub mod canvas;
pub mod history;
pub mod io;
pub mod session;
pub mod viewport;

pub use brush::BrushState;
pub use canvas::{CLEAR_COLOR, DEFAULT_DRAW_COLOR, PixelBuffer};
pub use history::{EditHistory, PixelDelta, Stroke};
pub use io::CodecError;
pub use session::{DrawingSession, InputEvent, PointerButton};
pub use viewport::Viewport;
