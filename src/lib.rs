//! pixview - zoomable image display widget with rectangular selection
//!
//! A toolkit-agnostic image view for desktop image viewers: a scrollable,
//! zoomable canvas with mouse-driven selection (create, move, resize via
//! edge and corner handles), drag-and-drop and pixel hover inspection.
//!
//! The host toolkit talks to [`ImageView`] through the types in
//! [`pixview_ui`]: it forwards [`pixview_ui::Event`]s, paints through a
//! [`pixview_ui::Painter`], drives auto-scroll with [`ImageView::tick`] and
//! subscribes to [`Signal`]s with [`ImageView::connect`].

mod canvas;
mod config;
mod constants;
mod error;
mod fast_selector;
mod geometry;
mod keybindings;
mod signal;
mod surface;
mod viewport;
mod widget;
mod zoom_math;

#[cfg(test)]
mod tests;

pub use canvas::Canvas;
pub use config::{
    AutoScrollConfig, CONFIG_VERSION, DisplayConfig, LogLevel, SelectionConfig, ZoomConfig,
};
pub use error::{DisplayError, Result};
pub use fast_selector::FastSelector;
pub use geometry::{AspectDriver, Corner, PixelPoint, PixelRect, conform_aspect, matches_aspect};
pub use keybindings::{KeyAction, KeyBindings, KeyChord};
pub use signal::{PixelInfo, Signal};
pub use surface::{
    Damage, MouseInteraction, ResizeDirection, ScrollTimer, SensorHit, Sensors, Surface,
};
pub use viewport::Viewport;
pub use widget::ImageView;

pub use pixview_ui;

/// Install `env_logger` at the given level.
///
/// `RUST_LOG` still overrides the level. Calling this twice is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already installed");
    }
}
