use super::*;
use crate::draw::{Background, OverlayError, Point};
use crate::export::{ExportError, ExportManager, ExportRequest};
use image::{ColorType, ImageFormat, Rgba, RgbaImage};
use std::cell::RefCell;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

fn create_test_pad() -> SignaturePad {
    SignaturePad::new(PadSettings::default()).unwrap()
}

fn red_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn read_png(path: &Path) -> RgbaImage {
    image::open(path).unwrap().to_rgba8()
}

/// Ink coverage of a pixel on a white background, 0.0 (white) to 1.0 (black).
fn darkness(img: &RgbaImage, x: u32, y: u32) -> f64 {
    1.0 - img.get_pixel(x, y)[0] as f64 / 255.0
}

fn is_white(img: &RgbaImage, x: u32, y: u32) -> bool {
    img.get_pixel(x, y).0 == [255, 255, 255, 255]
}

fn is_red(img: &RgbaImage, x: u32, y: u32) -> bool {
    let [r, g, b, a] = img.get_pixel(x, y).0;
    r > 200 && g < 50 && b < 50 && a == 255
}

fn record_events(pad: &mut SignaturePad) -> (ListenerId, Rc<RefCell<Vec<ContentEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let id = pad.on_content_changed(move |event| sink.borrow_mut().push(*event));
    (id, events)
}

fn draw_horizontal(pad: &mut SignaturePad) {
    pad.begin(20.0, 100.0);
    pad.extend(70.0, 100.0);
    pad.extend(120.0, 100.0);
    pad.end();
}

#[test]
fn test_fresh_pad_has_no_content() {
    let pad = create_test_pad();
    assert!(!pad.has_content());
    assert!(!pad.is_capturing());
    assert_eq!(pad.stroke_count(), 0);
}

#[test]
fn test_has_content_after_end_and_not_after_clear() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.extend(20.0, 20.0);
    assert!(!pad.has_content(), "in-progress stroke must not count");

    pad.end();
    assert!(pad.has_content());

    pad.clear();
    assert!(!pad.has_content());
    assert_eq!(pad.stroke_count(), 0);
}

#[test]
fn test_clear_drops_stroke_in_progress() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.clear();
    assert!(!pad.is_capturing());

    pad.end();
    assert!(!pad.has_content());
}

#[test]
fn test_extend_and_end_while_idle_are_noops() {
    let mut pad = create_test_pad();
    let (_, events) = record_events(&mut pad);

    pad.extend(10.0, 10.0);
    pad.end();

    assert!(!pad.has_content());
    assert!(!pad.is_capturing());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_points_are_clamped_to_canvas() {
    let mut pad = create_test_pad();
    pad.begin(-20.0, 500.0);
    pad.extend(1000.0, f64::NAN);
    pad.end();

    let stroke = &pad.model().strokes()[0];
    assert_eq!(
        stroke.points(),
        &[Point::new(0.0, 200.0), Point::new(400.0, 0.0)]
    );
}

#[test]
fn test_begin_while_capturing_finalizes_previous_stroke() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.extend(30.0, 30.0);
    pad.begin(100.0, 100.0);
    pad.end();

    assert_eq!(pad.stroke_count(), 2);
    assert_eq!(pad.model().strokes()[0].len(), 2);
    assert!(pad.model().strokes()[1].is_dot());
}

#[test]
fn test_cancel_discards_stroke_in_progress() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.extend(40.0, 40.0);
    pad.cancel();

    assert!(!pad.is_capturing());
    assert!(!pad.has_content());

    // Idle cancel is harmless
    pad.cancel();
    assert!(!pad.has_content());
}

#[test]
fn test_pen_changes_apply_to_new_strokes() {
    let mut pad = create_test_pad();
    let mut pen = pad.settings().pen;
    pen.width = 6.0;
    pen.color = crate::draw::INK_BLUE;
    pad.set_pen(pen);

    pad.begin(10.0, 10.0);
    pad.end();

    assert_eq!(*pad.model().strokes()[0].pen(), pen);
}

#[test]
fn test_pointer_adapter_draws_with_primary_button_only() {
    let mut pad = create_test_pad();

    pad.handle_pointer(PointerEvent::Down {
        button: PointerButton::Secondary,
        x: 10.0,
        y: 10.0,
    });
    pad.handle_pointer(PointerEvent::Motion { x: 20.0, y: 20.0 });
    pad.handle_pointer(PointerEvent::Up {
        button: PointerButton::Secondary,
        x: 20.0,
        y: 20.0,
    });
    assert!(!pad.has_content());

    pad.handle_pointer(PointerEvent::Down {
        button: PointerButton::Primary,
        x: 10.0,
        y: 10.0,
    });
    pad.handle_pointer(PointerEvent::Motion { x: 20.0, y: 15.0 });
    pad.handle_pointer(PointerEvent::Up {
        button: PointerButton::Primary,
        x: 30.0,
        y: 20.0,
    });

    assert!(!pad.is_capturing());
    assert_eq!(pad.stroke_count(), 1);
    assert_eq!(pad.model().strokes()[0].len(), 3);
    assert_eq!(pad.model().strokes()[0].last(), Point::new(30.0, 20.0));
}

#[test]
fn test_release_at_last_motion_adds_no_duplicate_point() {
    let mut pad = create_test_pad();
    pad.handle_pointer(PointerEvent::Down {
        button: PointerButton::Primary,
        x: 10.0,
        y: 10.0,
    });
    pad.handle_pointer(PointerEvent::Motion { x: 40.0, y: 25.0 });
    pad.handle_pointer(PointerEvent::Up {
        button: PointerButton::Primary,
        x: 40.0,
        y: 25.0,
    });

    let stroke = &pad.model().strokes()[0];
    assert_eq!(
        stroke.points(),
        &[Point::new(10.0, 10.0), Point::new(40.0, 25.0)]
    );
}

#[test]
fn test_release_outside_canvas_compares_clamped_position() {
    let mut pad = create_test_pad();
    pad.handle_pointer(PointerEvent::Down {
        button: PointerButton::Primary,
        x: 390.0,
        y: 100.0,
    });
    pad.handle_pointer(PointerEvent::Motion { x: 450.0, y: 100.0 });
    pad.handle_pointer(PointerEvent::Up {
        button: PointerButton::Primary,
        x: 460.0,
        y: 100.0,
    });

    assert_eq!(pad.model().strokes()[0].len(), 2);
}

#[test]
fn test_pointer_cancel_discards_stroke() {
    let mut pad = create_test_pad();
    pad.handle_pointer(PointerEvent::Down {
        button: PointerButton::Primary,
        x: 10.0,
        y: 10.0,
    });
    pad.handle_pointer(PointerEvent::Motion { x: 50.0, y: 10.0 });
    pad.handle_pointer(PointerEvent::Cancel);
    pad.handle_pointer(PointerEvent::Up {
        button: PointerButton::Primary,
        x: 60.0,
        y: 10.0,
    });

    assert!(!pad.has_content());
}

#[test]
fn test_listeners_receive_content_events() {
    let mut pad = create_test_pad();
    let (id, events) = record_events(&mut pad);

    pad.begin(10.0, 10.0);
    pad.end();
    pad.clear();

    assert_eq!(
        *events.borrow(),
        vec![
            ContentEvent {
                change: ContentChange::StrokeAdded,
                has_content: true,
            },
            ContentEvent {
                change: ContentChange::Cleared,
                has_content: false,
            },
        ]
    );

    assert!(pad.remove_listener(id));
    assert!(!pad.remove_listener(id));

    pad.begin(5.0, 5.0);
    pad.end();
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_damage_tracks_live_segments() {
    let mut pad = create_test_pad();

    let initial = pad.take_damage();
    assert_eq!(initial.len(), 1);
    assert_eq!((initial[0].width, initial[0].height), (400, 200));
    assert!(pad.take_damage().is_empty());

    pad.begin(100.0, 50.0);
    pad.extend(120.0, 60.0);
    let damage = pad.take_damage();
    assert!(!damage.is_empty());
    for rect in &damage {
        assert!(rect.x >= 90 && rect.x + rect.width <= 130);
        assert!(rect.y >= 40 && rect.y + rect.height <= 70);
    }
}

#[test]
fn test_finalized_stroke_marks_its_bounds_dirty() {
    let mut pad = create_test_pad();
    pad.take_damage();
    assert!(!pad.needs_redraw());

    pad.begin(200.0, 100.0);
    pad.extend(240.0, 120.0);
    pad.take_damage();

    pad.end();
    assert!(pad.needs_redraw());
    let damage = pad.take_damage();
    let expected = pad.model().strokes()[0].bounding_box(1.0).unwrap();
    assert!(damage.contains(&expected), "damage {damage:?}");
    assert!(!pad.needs_redraw());
}

#[test]
fn test_live_preview_shows_stroke_before_end() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 50.0);
    pad.extend(60.0, 50.0);
    pad.extend(110.0, 50.0);

    let mut png = Vec::new();
    pad.preview().surface().write_to_png(&mut png).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();

    assert!(darkness(&img, 30, 50) > 0.5);
    assert!(is_white(&img, 30, 150));
}

#[test]
fn test_single_point_stroke_exports_dot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dot.png");

    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.end();
    assert!(pad.has_content());

    pad.export_png(&path, 1.0, Background::WHITE).unwrap();
    let img = read_png(&path);

    let ink: f64 = (7..14)
        .flat_map(|y| (7..14).map(move |x| (x, y)))
        .map(|(x, y)| darkness(&img, x, y))
        .sum();
    assert!(ink > 1.0, "dot should cover some area, got {ink}");
    assert!(is_white(&img, 30, 30));
}

#[test]
fn test_diagonal_stroke_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signature.png");

    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.extend(50.0, 50.0);
    pad.end();

    let written = pad.export_png(&path, 1.0, Background::WHITE).unwrap();
    assert_eq!(written, path);

    let img = read_png(&path);
    assert_eq!(img.dimensions(), (400, 200));

    for i in [12, 20, 30, 40, 48] {
        assert!(darkness(&img, i, i) > 0.5, "pixel ({i},{i}) should be inked");
    }
    for (x, y) in [(100, 20), (20, 100), (50, 10), (10, 50), (300, 150)] {
        assert!(is_white(&img, x, y), "pixel ({x},{y}) should be white");
    }
}

#[test]
fn test_export_scale_is_linear() {
    let dir = tempfile::tempdir().unwrap();
    let mut pad = create_test_pad();
    draw_horizontal(&mut pad);

    let small = read_png(
        &pad.export_png(&dir.path().join("x1.png"), 1.0, Background::WHITE)
            .unwrap(),
    );
    let large = read_png(
        &pad.export_png(&dir.path().join("x2.png"), 2.0, Background::WHITE)
            .unwrap(),
    );
    assert_eq!(small.dimensions(), (400, 200));
    assert_eq!(large.dimensions(), (800, 400));

    let thickness = |img: &RgbaImage, x: u32| -> f64 {
        (0..img.height()).map(|y| darkness(img, x, y)).sum()
    };
    let extent = |img: &RgbaImage, y: u32| -> f64 {
        (0..img.width()).map(|x| darkness(img, x, y)).sum()
    };

    let width_ratio = thickness(&large, 140) / thickness(&small, 70);
    assert!(
        (width_ratio - 2.0).abs() < 0.1,
        "stroke width ratio {width_ratio}"
    );

    let extent_ratio = extent(&large, 200) / extent(&small, 100);
    assert!(
        (extent_ratio - 2.0).abs() < 0.1,
        "stroke extent ratio {extent_ratio}"
    );
}

#[test]
fn test_exports_are_rgba8_for_every_background() {
    let dir = tempfile::tempdir().unwrap();
    let mut pad = create_test_pad();
    draw_horizontal(&mut pad);

    for (name, background) in [
        ("white.png", Background::WHITE),
        ("clear.png", Background::Transparent),
    ] {
        let path = pad
            .export_png(&dir.path().join(name), 1.0, background)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[12..16], b"IHDR");
        assert_eq!(bytes[24], 8, "{name}: bit depth");
        assert_eq!(bytes[25], 6, "{name}: colour type must be RGBA");
        assert_eq!(image::open(&path).unwrap().color(), ColorType::Rgba8);
    }
}

#[test]
fn test_transparent_export_keeps_straight_ink_color() {
    let dir = tempfile::tempdir().unwrap();
    let mut pad = create_test_pad();
    draw_horizontal(&mut pad);

    let img = read_png(
        &pad.export_png(&dir.path().join("ink.png"), 2.0, Background::Transparent)
            .unwrap(),
    );
    assert_eq!(img.get_pixel(140, 200).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 0]);
}

#[test]
fn test_export_to_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();

    let mut pad = create_test_pad();
    draw_horizontal(&mut pad);

    let err = pad
        .export_png(&blocker.join("sig.png"), 1.0, Background::WHITE)
        .unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
    assert!(pad.has_content());
}

#[test]
fn test_export_empty_pad_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.png");
    let pad = create_test_pad();

    let err = pad.export_png(&path, 2.0, Background::WHITE).unwrap_err();
    assert!(matches!(err, ExportError::EmptyCanvas));
    assert!(!path.exists());
}

#[test]
fn test_export_rejects_invalid_scale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.png");
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.end();

    for scale in [0.0, -1.0, f64::NAN] {
        let err = pad.export_png(&path, scale, Background::WHITE).unwrap_err();
        assert!(matches!(err, ExportError::Render(_)), "scale {scale}");
    }
    assert!(!path.exists());
}

#[test]
fn test_overlay_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.png");
    let mut pad = create_test_pad();
    let (_, events) = record_events(&mut pad);

    pad.load_overlay(&red_png(40, 20)).unwrap();
    assert!(pad.has_content());
    assert_eq!(
        events.borrow().last().map(|e| e.change),
        Some(ContentChange::OverlayLoaded)
    );

    // 40x20 fits 384x184 at 9.2 → 368x184 at (16, 8)
    let img = read_png(&pad.export_png(&path, 1.0, Background::WHITE).unwrap());
    assert!(is_red(&img, 200, 100));
    assert!(is_red(&img, 30, 20));
    assert!(is_red(&img, 370, 180));
    assert!(is_white(&img, 5, 100));
    assert!(is_white(&img, 200, 3));
    assert!(is_white(&img, 395, 196));
}

#[test]
fn test_stroke_discards_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("after.png");
    let mut pad = create_test_pad();
    pad.load_overlay(&red_png(10, 10)).unwrap();
    let (_, events) = record_events(&mut pad);

    pad.begin(10.0, 10.0);
    assert!(pad.model().overlay().is_none());
    pad.extend(50.0, 50.0);
    pad.end();

    let changes: Vec<_> = events.borrow().iter().map(|e| e.change).collect();
    assert_eq!(
        changes,
        vec![ContentChange::OverlayDiscarded, ContentChange::StrokeAdded]
    );

    let img = read_png(&pad.export_png(&path, 1.0, Background::WHITE).unwrap());
    assert!(is_white(&img, 200, 100));
    assert!(darkness(&img, 30, 30) > 0.5);
}

#[test]
fn test_overlay_replaces_strokes() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.end();
    pad.begin(20.0, 20.0);

    pad.load_overlay(&red_png(4, 4)).unwrap();

    assert!(!pad.is_capturing());
    assert_eq!(pad.stroke_count(), 0);
    assert!(pad.model().overlay().is_some());
}

#[test]
fn test_invalid_overlay_leaves_model_unchanged() {
    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.end();
    let (_, events) = record_events(&mut pad);

    let err = pad.load_overlay(b"definitely not an image").unwrap_err();
    assert!(matches!(err, OverlayError::InvalidImage(_)));
    assert_eq!(pad.stroke_count(), 1);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_overlay_path_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut pad = create_test_pad();

    let err = pad
        .load_overlay_path(&dir.path().join("missing.png"))
        .unwrap_err();
    assert!(matches!(err, OverlayError::Io(_)));

    let path = dir.path().join("stamp.png");
    std::fs::write(&path, red_png(8, 8)).unwrap();
    pad.load_overlay_path(&path).unwrap();
    assert!(pad.has_content());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_background_export_uses_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.png");
    let manager = ExportManager::new(&tokio::runtime::Handle::current());

    let mut pad = create_test_pad();
    pad.begin(10.0, 10.0);
    pad.extend(50.0, 50.0);
    pad.end();

    let ticket = pad
        .request_export(
            &manager,
            ExportRequest::new(&path, 1.0, Background::WHITE),
        )
        .unwrap();
    pad.clear();
    assert!(!pad.has_content());

    let written = ticket.wait().await.unwrap();
    assert_eq!(written, path);

    let img = read_png(&written);
    assert!(darkness(&img, 30, 30) > 0.5);
}

#[tokio::test]
async fn test_request_export_of_empty_pad_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ExportManager::new(&tokio::runtime::Handle::current());
    let pad = create_test_pad();

    let err = pad
        .request_export(
            &manager,
            ExportRequest::new(dir.path().join("x.png"), 2.0, Background::WHITE),
        )
        .unwrap_err();
    assert!(matches!(err, ExportError::EmptyCanvas));
}
