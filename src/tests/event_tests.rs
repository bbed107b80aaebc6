//! Tests for host events: navigation keys, drag-and-drop, hover, auto-scroll and painting.

use std::path::PathBuf;
use std::time::Duration;

use image::{DynamicImage, Rgba, RgbaImage};
use pixview_ui::{Color, DrawCommand, DrawList, Event, KeyCode, Modifiers, Point};

use super::{count, move_to, press, record, release, view_with_image};
use crate::{Damage, ImageView, PixelPoint, Signal};

#[test]
fn test_navigation_keys_emit_signals() {
    let mut view = view_with_image(800, 600);
    let log = record(&mut view);

    for key in [KeyCode::PageDown, KeyCode::PageUp, KeyCode::Home, KeyCode::End] {
        assert!(view.handle_event(&Event::KeyPressed {
            key,
            modifiers: Modifiers::NONE,
        }));
    }
    assert_eq!(
        *log.borrow(),
        vec![
            Signal::NeedNextImage,
            Signal::NeedPrevImage,
            Signal::NeedFirstImage,
            Signal::NeedLastImage,
        ]
    );

    assert!(!view.handle_event(&Event::KeyPressed {
        key: KeyCode::Tab,
        modifiers: Modifiers::NONE,
    }));
}

#[test]
fn test_drop_single_image_emits_signal() {
    let mut view = ImageView::default();
    let log = record(&mut view);
    let path = PathBuf::from("/tmp/photo.png");

    assert!(view.handle_event(&Event::FileHoverStarted {
        paths: vec![path.clone()],
    }));
    assert!(view.accepts_drop());
    assert!(view.handle_event(&Event::FilesDropped {
        paths: vec![path.clone()],
    }));

    assert_eq!(*log.borrow(), vec![Signal::ImageDropped(path)]);
    assert!(!view.accepts_drop());
}

#[test]
fn test_drop_rejects_multiple_or_unknown_files() {
    let mut view = ImageView::default();
    let log = record(&mut view);

    let two = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
    assert!(!view.handle_event(&Event::FileHoverStarted {
        paths: two.clone()
    }));
    assert!(!view.handle_event(&Event::FilesDropped { paths: two }));
    assert!(!view.handle_event(&Event::FilesDropped {
        paths: vec![PathBuf::from("notes.txt")],
    }));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_hover_reports_pixel_info() {
    let mut pixels = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    pixels.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

    let mut view = view_with_image(4, 4);
    view.new_image(DynamicImage::ImageRgba8(pixels));
    let log = record(&mut view);

    // The 4x4 image is centered in the 400x300 view at (198, 148)
    move_to(&mut view, 199.5, 149.5);
    assert_eq!(view.pixel_info_pos(), Some(PixelPoint::new(1, 1)));
    assert_eq!(view.pixel_info_color(), Some(Rgba([255, 0, 0, 255])));
    assert!(view.pixel_info_has_alpha());

    move_to(&mut view, 199.7, 149.9);
    assert_eq!(count(&log, &Signal::PixelInfo), 1);

    view.handle_event(&Event::MouseLeft);
    assert_eq!(view.pixel_info(), None);
    assert_eq!(count(&log, &Signal::PixelInfo), 2);
}

#[test]
fn test_autoscroll_stops_on_release() {
    let mut view = view_with_image(800, 600);

    press(&mut view, 100.0, 100.0);
    move_to(&mut view, 395.0, 150.0);
    assert!(view.needs_tick());

    assert!(view.tick(Duration::from_millis(20)));
    assert_eq!(view.scroll(), Point::new(20.0, 0.0));

    release(&mut view, 395.0, 150.0);
    assert!(!view.needs_tick());
    assert!(!view.tick(Duration::from_millis(200)));
    assert_eq!(view.scroll(), Point::new(20.0, 0.0));
}

#[test]
fn test_no_autoscroll_before_viewport_is_sized() {
    let mut view = ImageView::default();
    view.new_image(DynamicImage::new_rgba8(800, 600));

    press(&mut view, 10.0, 10.0);
    move_to(&mut view, 60.0, 40.0);
    assert!(!view.needs_tick());
    release(&mut view, 60.0, 40.0);
    assert!(view.get_selection().is_some());
}

#[test]
fn test_tick_at_measures_elapsed_time() {
    let mut view = view_with_image(800, 600);
    let start = web_time::Instant::now();

    assert!(!view.tick_at(start));

    press(&mut view, 100.0, 100.0);
    move_to(&mut view, 100.0, 295.0);
    assert!(!view.tick_at(start));
    assert!(view.tick_at(start + Duration::from_millis(40)));
    assert_eq!(view.scroll(), Point::new(0.0, 40.0));
}

#[test]
fn test_paint_background_then_image() {
    let mut view = view_with_image(100, 50);
    view.set_background_shade(40);
    assert_eq!(view.take_damage(), Damage::Full);
    assert_eq!(view.take_damage(), Damage::None);

    let mut list = DrawList::new();
    view.paint(&mut list);

    assert_eq!(
        list.commands()[0],
        DrawCommand::FillRect {
            rect: pixview_ui::Bounds::new(0.0, 0.0, 400.0, 300.0),
            color: Color::gray(40),
        }
    );
    assert!(matches!(
        list.commands()[1],
        DrawCommand::DrawImage {
            source_size: (100, 50),
            dest,
            ..
        } if dest == pixview_ui::Bounds::new(150.0, 125.0, 100.0, 50.0)
    ));
}
