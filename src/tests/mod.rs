//! Widget-level scenario tests.
//!
//! These drive [`crate::ImageView`] through host events the way an embedding
//! application would, and check the resulting state and signals.

mod event_tests;

use std::cell::RefCell;
use std::rc::Rc;

use image::DynamicImage;
use pixview_ui::{Event, Modifiers, MouseButton, Point, Size};

use crate::{ImageView, Signal};

/// A view of 400x300 pixels showing a blank `width x height` image at zoom 1.
fn view_with_image(width: u32, height: u32) -> ImageView {
    let mut view = ImageView::default();
    view.set_viewport_size(Size::new(400.0, 300.0));
    view.new_image(DynamicImage::new_rgba8(width, height));
    view
}

/// Collect every signal the view emits from now on.
fn record(view: &mut ImageView) -> Rc<RefCell<Vec<Signal>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    view.connect(move |signal: &Signal| sink.borrow_mut().push(signal.clone()));
    log
}

fn count(log: &Rc<RefCell<Vec<Signal>>>, signal: &Signal) -> usize {
    log.borrow().iter().filter(|s| *s == signal).count()
}

fn press(view: &mut ImageView, x: f32, y: f32) -> bool {
    view.handle_event(&Event::MousePressed {
        button: MouseButton::Left,
        position: Point::new(x, y),
        modifiers: Modifiers::NONE,
    })
}

fn move_to(view: &mut ImageView, x: f32, y: f32) {
    view.handle_event(&Event::MouseMoved {
        position: Point::new(x, y),
        modifiers: Modifiers::NONE,
    });
}

fn release(view: &mut ImageView, x: f32, y: f32) {
    view.handle_event(&Event::MouseReleased {
        button: MouseButton::Left,
        position: Point::new(x, y),
        modifiers: Modifiers::NONE,
    });
}
