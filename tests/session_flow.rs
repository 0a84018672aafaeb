//! End-to-end scenarios over the public session API: the 800×600 disc
//! scenario, multi-stroke undo/redo round-trips, and the lossless
//! export → encode → decode → import cycle.

use rasterbrush::{CLEAR_COLOR, DrawingSession, PointerButton, io};

const BLACK: u32 = 0xFF00_0000;

/// Cells of the inclusive radius-2 disc around a center.
fn disc_cells(cx: i32, cy: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for dy in -2..=2 {
        for dx in -2..=2 {
            if dx * dx + dy * dy <= 4 {
                cells.push((cx + dx, cy + dy));
            }
        }
    }
    cells
}

#[test]
fn disc_paint_undo_redo_scenario() {
    let mut session = DrawingSession::new(800, 600);
    session.set_brush_size(4); // radius 2 via floor division

    session.pointer_pressed(PointerButton::Primary, 100.0, 100.0);
    session.pointer_released(PointerButton::Primary);

    let cells = disc_cells(100, 100);
    assert_eq!(cells.len(), 13);
    for &(x, y) in &cells {
        assert_eq!(session.pixel(x, y), Some(BLACK), "cell ({x},{y})");
    }
    // A ring sample just outside the mask stays white.
    for &(x, y) in &[(102, 101), (98, 99), (100, 103)] {
        assert_eq!(session.pixel(x, y), Some(CLEAR_COLOR));
    }

    assert!(session.undo());
    for &(x, y) in &cells {
        assert_eq!(session.pixel(x, y), Some(CLEAR_COLOR));
    }
    assert!(session.redo());
    for &(x, y) in &cells {
        assert_eq!(session.pixel(x, y), Some(BLACK));
    }
}

#[test]
fn undo_all_restores_the_initial_raster() {
    let mut session = DrawingSession::new(200, 150);
    let initial = session.export_pixels();

    // Three overlapping strokes in different colors.
    let colors: [(u8, u8, u8); 3] = [(255, 0, 0), (0, 255, 0), (0, 0, 255)];
    for (i, (r, g, b)) in colors.into_iter().enumerate() {
        session.set_color(r, g, b, 255);
        let offset = i as f32 * 3.0;
        session.pointer_pressed(PointerButton::Primary, 50.0 + offset, 50.0);
        session.pointer_moved(90.0 + offset, 70.0);
        session.pointer_moved(60.0 + offset, 90.0);
        session.pointer_released(PointerButton::Primary);
    }
    let painted = session.export_pixels();
    assert_ne!(initial.2, painted.2);

    assert!(session.undo());
    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.export_pixels().2, initial.2);

    assert!(session.redo());
    assert!(session.redo());
    assert!(session.redo());
    assert!(!session.redo());
    assert_eq!(session.export_pixels().2, painted.2);
}

#[test]
fn eraser_restores_background_and_is_undoable() {
    let mut session = DrawingSession::new(100, 100);
    session.pointer_pressed(PointerButton::Primary, 40.0, 40.0);
    session.pointer_moved(60.0, 40.0);
    session.pointer_released(PointerButton::Primary);
    assert_eq!(session.pixel(50, 40), Some(BLACK));

    session.set_eraser(true);
    session.pointer_pressed(PointerButton::Primary, 50.0, 40.0);
    session.pointer_released(PointerButton::Primary);
    assert_eq!(session.pixel(50, 40), Some(CLEAR_COLOR));

    assert!(session.undo());
    assert_eq!(session.pixel(50, 40), Some(BLACK));
}

#[test]
fn export_encode_decode_import_is_pixel_identical() {
    let mut session = DrawingSession::new(50, 50);
    session.set_color(200, 30, 120, 255);
    session.pointer_pressed(PointerButton::Primary, 10.0, 10.0);
    session.pointer_moved(40.0, 35.0);
    session.pointer_released(PointerButton::Primary);

    let (w, h, rgba) = session.export_pixels();
    let pixels = io::rgba_bytes_to_argb(&rgba);
    let png = io::encode_png(w, h, &pixels).unwrap();
    let (dw, dh, decoded) = io::decode_image(&png).unwrap();
    assert_eq!((dw, dh), (w, h));
    assert_eq!(decoded, pixels);

    // Feed the decoded raster into a differently-sized session.
    let mut restored = DrawingSession::new(800, 600);
    restored
        .import_pixels(dw, dh, &io::argb_to_rgba_bytes(&decoded))
        .unwrap();
    assert_eq!((restored.width(), restored.height()), (50, 50));
    assert!(!restored.can_undo());
    assert_eq!(restored.export_pixels().2, rgba);
}

#[test]
fn sampling_rate_does_not_change_the_raster() {
    // One long pointer jump vs. many short samples along the same segment.
    let mut coarse = DrawingSession::new(120, 40);
    coarse.pointer_pressed(PointerButton::Primary, 5.0, 20.0);
    coarse.pointer_moved(105.0, 20.0);
    coarse.pointer_released(PointerButton::Primary);

    let mut fine = DrawingSession::new(120, 40);
    fine.pointer_pressed(PointerButton::Primary, 5.0, 20.0);
    for step in 1..=50 {
        fine.pointer_moved(5.0 + step as f32 * 2.0, 20.0);
    }
    fine.pointer_released(PointerButton::Primary);

    assert_eq!(coarse.export_pixels().2, fine.export_pixels().2);
}
