//! pixview_ui - toolkit seam for the pixview display widget
//!
//! The widget never talks to a windowing toolkit directly. Input arrives as
//! [`Event`] values, drawing goes through the [`Painter`] trait, and
//! notifications leave through [`Listeners`].

mod callback;
mod cursor;
mod event;
mod layout;
mod renderer;
mod widget;

pub use callback::{ListenerId, Listeners};
pub use cursor::CursorShape;
pub use event::{Event, KeyCode, Modifiers, MouseButton};
pub use layout::{Bounds, Point, Size};
pub use renderer::{Color, DrawCommand, DrawList, Interpolation, Paint, Painter, Translate};
pub use widget::{InputHandler, PointerInput};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::Listeners;
    pub use crate::cursor::CursorShape;
    pub use crate::event::{Event, KeyCode, Modifiers, MouseButton};
    pub use crate::layout::{Bounds, Point, Size};
    pub use crate::renderer::{Color, Interpolation, Paint, Painter};
    pub use crate::widget::{InputHandler, PointerInput};
}
