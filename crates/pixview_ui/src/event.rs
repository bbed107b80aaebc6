//! Input events delivered by the host toolkit.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::Point;

/// Events that widgets can respond to.
///
/// Positions are in widget-local (viewport) pixels, with the origin at the
/// top-left corner of the visible area.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    MousePressed {
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    },
    /// Mouse button released.
    MouseReleased {
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    },
    /// Mouse moved.
    MouseMoved { position: Point, modifiers: Modifiers },
    /// Pointer left the widget.
    MouseLeft,
    /// Mouse wheel scrolled. `delta` is in notches, positive away from the user.
    MouseWheel {
        delta: f32,
        position: Point,
        modifiers: Modifiers,
    },
    /// Keyboard key pressed.
    KeyPressed { key: KeyCode, modifiers: Modifiers },
    /// Keyboard key released.
    KeyReleased { key: KeyCode, modifiers: Modifiers },
    /// Files are being dragged over the widget.
    FileHoverStarted { paths: Vec<PathBuf> },
    /// The drag left the widget without dropping.
    FileHoverEnded,
    /// Files were dropped on the widget.
    FilesDropped { paths: Vec<PathBuf> },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard keys (simplified set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    C,
    F,
    N,
    P,
    Key0,
    Key1,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Plus,
    Minus,
    Equal,
}

impl KeyCode {
    /// Display name used by settings screens and conflict messages.
    pub fn name(&self) -> &'static str {
        match self {
            KeyCode::A => "A",
            KeyCode::C => "C",
            KeyCode::F => "F",
            KeyCode::N => "N",
            KeyCode::P => "P",
            KeyCode::Key0 => "0",
            KeyCode::Key1 => "1",
            KeyCode::Enter => "Enter",
            KeyCode::Escape => "Esc",
            KeyCode::Backspace => "Backspace",
            KeyCode::Delete => "Delete",
            KeyCode::Tab => "Tab",
            KeyCode::Space => "Space",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PgUp",
            KeyCode::PageDown => "PgDn",
            KeyCode::Plus => "+",
            KeyCode::Minus => "-",
            KeyCode::Equal => "=",
        }
    }

    /// Arrow keys as a unit step `(dx, dy)`.
    pub fn arrow_delta(&self) -> Option<(i32, i32)> {
        match self {
            KeyCode::Up => Some((0, -1)),
            KeyCode::Down => Some((0, 1)),
            KeyCode::Left => Some((-1, 0)),
            KeyCode::Right => Some((1, 0)),
            _ => None,
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only ctrl held.
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}
