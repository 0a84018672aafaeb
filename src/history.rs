//! Stroke-granular undo/redo history.
//!
//! Every paint gesture records the per-pixel before/after values it touched.
//! A gesture's deltas stay in chronological order and duplicates are kept:
//! replaying them in reverse while writing the old value reconstructs the
//! pre-stroke raster even when one cell was touched several times, because
//! the earliest delta for a cell carries the true original pixel.

use crate::canvas::PixelBuffer;

/// One cell's before/after color pair, recorded during a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelDelta {
    pub x: i32,
    pub y: i32,
    pub old_color: u32,
    pub new_color: u32,
}

/// One continuous paint/erase gesture, pointer-down to pointer-up.
/// The atomic undo/redo unit.
#[derive(Clone, Debug, Default)]
pub struct Stroke {
    deltas: Vec<PixelDelta>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-ordered delta list (the session's in-progress
    /// recording) as a sealed stroke.
    pub fn from_deltas(deltas: Vec<PixelDelta>) -> Self {
        Self { deltas }
    }

    /// Append a delta in chronological order. No dedup.
    pub fn push(&mut self, delta: PixelDelta) {
        self.deltas.push(delta);
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn deltas(&self) -> &[PixelDelta] {
        &self.deltas
    }
}

// ============================================================================
// HISTORY STACKS
// ============================================================================

/// Undo/redo stacks of committed strokes, most-recent-last.
///
/// Unbounded on purpose: undoing every committed stroke must restore the
/// exact pre-first-stroke raster, so no entry is ever pruned.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seal a finished stroke. Empty strokes are discarded; anything else
    /// lands on the undo stack and invalidates the redo future.
    pub fn commit(&mut self, stroke: Stroke) {
        if stroke.is_empty() {
            return;
        }
        self.undo_stack.push(stroke);
        self.redo_stack.clear();
    }

    /// Revert the most recent stroke: replay its deltas in reverse order,
    /// writing each recorded `old_color`. Returns `false` on an empty stack.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> bool {
        let Some(stroke) = self.undo_stack.pop() else {
            return false;
        };
        for delta in stroke.deltas().iter().rev() {
            buffer.set(delta.x, delta.y, delta.old_color);
        }
        self.redo_stack.push(stroke);
        true
    }

    /// Re-apply the most recently undone stroke: replay its deltas in
    /// forward order, writing each `new_color`. Returns `false` if empty.
    pub fn redo(&mut self, buffer: &mut PixelBuffer) -> bool {
        let Some(stroke) = self.redo_stack.pop() else {
            return false;
        };
        for delta in stroke.deltas() {
            buffer.set(delta.x, delta.y, delta.new_color);
        }
        self.undo_stack.push(stroke);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history. Used by Clear and by image load, both of which are
    /// hard resets of editable state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CLEAR_COLOR;

    fn delta(x: i32, y: i32, old: u32, new: u32) -> PixelDelta {
        PixelDelta {
            x,
            y,
            old_color: old,
            new_color: new,
        }
    }

    #[test]
    fn empty_stroke_is_discarded() {
        let mut history = EditHistory::new();
        history.commit(Stroke::new());
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_redo_on_empty_stacks_are_noops() {
        let mut history = EditHistory::new();
        let mut buf = PixelBuffer::new(4, 4, CLEAR_COLOR);
        assert!(!history.undo(&mut buf));
        assert!(!history.redo(&mut buf));
        assert!(buf.as_slice().iter().all(|&p| p == CLEAR_COLOR));
    }

    #[test]
    fn undo_restores_and_redo_reapplies() {
        let mut history = EditHistory::new();
        let mut buf = PixelBuffer::new(4, 4, CLEAR_COLOR);

        let black = 0xFF00_0000;
        buf.set(1, 1, black);
        buf.set(2, 1, black);
        let mut stroke = Stroke::new();
        stroke.push(delta(1, 1, CLEAR_COLOR, black));
        stroke.push(delta(2, 1, CLEAR_COLOR, black));
        history.commit(stroke);

        assert!(history.undo(&mut buf));
        assert_eq!(buf.get(1, 1), Some(CLEAR_COLOR));
        assert_eq!(buf.get(2, 1), Some(CLEAR_COLOR));

        assert!(history.redo(&mut buf));
        assert_eq!(buf.get(1, 1), Some(black));
        assert_eq!(buf.get(2, 1), Some(black));
    }

    #[test]
    fn duplicate_touches_restore_original_value() {
        // One stroke paints the same cell twice with different colors; the
        // reverse replay must land on the value before the first touch.
        let mut history = EditHistory::new();
        let mut buf = PixelBuffer::new(4, 4, CLEAR_COLOR);

        let red = 0xFFFF_0000;
        let blue = 0xFF00_00FF;
        let mut stroke = Stroke::new();
        buf.set(2, 2, red);
        stroke.push(delta(2, 2, CLEAR_COLOR, red));
        buf.set(2, 2, blue);
        stroke.push(delta(2, 2, red, blue));
        history.commit(stroke);

        history.undo(&mut buf);
        assert_eq!(buf.get(2, 2), Some(CLEAR_COLOR));
        history.redo(&mut buf);
        assert_eq!(buf.get(2, 2), Some(blue));
    }

    #[test]
    fn commit_clears_redo_future() {
        let mut history = EditHistory::new();
        let mut buf = PixelBuffer::new(4, 4, CLEAR_COLOR);

        let mut first = Stroke::new();
        first.push(delta(0, 0, CLEAR_COLOR, 0xFF00_0000));
        history.commit(first);
        history.undo(&mut buf);
        assert!(history.can_redo());

        let mut second = Stroke::new();
        second.push(delta(1, 0, CLEAR_COLOR, 0xFF00_0000));
        history.commit(second);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut buf));
    }
}
