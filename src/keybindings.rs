//! Customizable keybindings for the display widget.
//!
//! Each [`KeyAction`] is bound to one [`KeyChord`]. Arrow keys are not
//! configurable: they always nudge the selection (shift resizes it, the
//! command modifier takes larger steps).

use pixview_ui::{KeyCode, Modifiers};
use serde::{Deserialize, Serialize};

/// Something a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    NextImage,
    PrevImage,
    FirstImage,
    LastImage,
    SelectAll,
    ClearSelection,
    ZoomIn,
    ZoomOut,
    ZoomOneToOne,
    ZoomToFit,
}

impl KeyAction {
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::NextImage,
            KeyAction::PrevImage,
            KeyAction::FirstImage,
            KeyAction::LastImage,
            KeyAction::SelectAll,
            KeyAction::ClearSelection,
            KeyAction::ZoomIn,
            KeyAction::ZoomOut,
            KeyAction::ZoomOneToOne,
            KeyAction::ZoomToFit,
        ]
    }

    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::NextImage => "Next image",
            KeyAction::PrevImage => "Previous image",
            KeyAction::FirstImage => "First image",
            KeyAction::LastImage => "Last image",
            KeyAction::SelectAll => "Select all",
            KeyAction::ClearSelection => "Clear selection",
            KeyAction::ZoomIn => "Zoom in",
            KeyAction::ZoomOut => "Zoom out",
            KeyAction::ZoomOneToOne => "Actual size",
            KeyAction::ZoomToFit => "Zoom to fit",
        }
    }
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: KeyCode,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Key without modifiers.
    pub fn plain(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Key with the command modifier (Ctrl, or Cmd on macOS).
    pub fn command(key: KeyCode) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Check if a key press triggers this chord.
    ///
    /// Shift is only checked when the chord asks for it, since some layouts
    /// need shift to type keys like `+`. Ctrl and Cmd are interchangeable.
    pub fn matches(&self, key: KeyCode, modifiers: Modifiers) -> bool {
        key == self.key
            && modifiers.command() == self.modifiers.command()
            && modifiers.alt == self.modifiers.alt
            && (!self.modifiers.shift || modifiers.shift)
    }

    /// Human-readable form, e.g. `Ctrl+A`.
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.command() {
            parts.push("Ctrl");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }
        parts.push(self.key.name());
        parts.join("+")
    }
}

/// Keybinding configuration for the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub next_image: KeyChord,
    pub prev_image: KeyChord,
    pub first_image: KeyChord,
    pub last_image: KeyChord,
    pub select_all: KeyChord,
    pub clear_selection: KeyChord,
    pub zoom_in: KeyChord,
    pub zoom_out: KeyChord,
    /// Zoom to 1:1
    pub zoom_one_to_one: KeyChord,
    pub zoom_to_fit: KeyChord,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            next_image: KeyChord::plain(KeyCode::PageDown),
            prev_image: KeyChord::plain(KeyCode::PageUp),
            first_image: KeyChord::plain(KeyCode::Home),
            last_image: KeyChord::plain(KeyCode::End),
            select_all: KeyChord::command(KeyCode::A),
            clear_selection: KeyChord::plain(KeyCode::Escape),
            zoom_in: KeyChord::plain(KeyCode::Plus),
            zoom_out: KeyChord::plain(KeyCode::Minus),
            zoom_one_to_one: KeyChord::plain(KeyCode::Key1),
            zoom_to_fit: KeyChord::plain(KeyCode::F),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for(&self, key: KeyCode, modifiers: Modifiers) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .find(|action| self.chord_for(*action).matches(key, modifiers))
    }

    /// Get the chord bound to an action.
    pub fn chord_for(&self, action: KeyAction) -> KeyChord {
        match action {
            KeyAction::NextImage => self.next_image,
            KeyAction::PrevImage => self.prev_image,
            KeyAction::FirstImage => self.first_image,
            KeyAction::LastImage => self.last_image,
            KeyAction::SelectAll => self.select_all,
            KeyAction::ClearSelection => self.clear_selection,
            KeyAction::ZoomIn => self.zoom_in,
            KeyAction::ZoomOut => self.zoom_out,
            KeyAction::ZoomOneToOne => self.zoom_one_to_one,
            KeyAction::ZoomToFit => self.zoom_to_fit,
        }
    }

    /// Rebind an action.
    pub fn set(&mut self, action: KeyAction, chord: KeyChord) {
        let slot = match action {
            KeyAction::NextImage => &mut self.next_image,
            KeyAction::PrevImage => &mut self.prev_image,
            KeyAction::FirstImage => &mut self.first_image,
            KeyAction::LastImage => &mut self.last_image,
            KeyAction::SelectAll => &mut self.select_all,
            KeyAction::ClearSelection => &mut self.clear_selection,
            KeyAction::ZoomIn => &mut self.zoom_in,
            KeyAction::ZoomOut => &mut self.zoom_out,
            KeyAction::ZoomOneToOne => &mut self.zoom_one_to_one,
            KeyAction::ZoomToFit => &mut self.zoom_to_fit,
        };
        *slot = chord;
    }

    /// Check if a chord is already bound to another action.
    pub fn conflict(&self, chord: KeyChord, exclude: Option<KeyAction>) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .filter(|action| Some(*action) != exclude)
            .find(|action| self.chord_for(*action) == chord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_navigation_keys() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.action_for(KeyCode::PageDown, Modifiers::NONE),
            Some(KeyAction::NextImage)
        );
        assert_eq!(
            kb.action_for(KeyCode::Home, Modifiers::NONE),
            Some(KeyAction::FirstImage)
        );
        assert_eq!(kb.action_for(KeyCode::Tab, Modifiers::NONE), None);
    }

    #[test]
    fn test_command_modifier_required() {
        let kb = KeyBindings::default();
        assert_eq!(kb.action_for(KeyCode::A, Modifiers::NONE), None);
        assert_eq!(
            kb.action_for(KeyCode::A, Modifiers::CTRL),
            Some(KeyAction::SelectAll)
        );
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(kb.action_for(KeyCode::A, cmd), Some(KeyAction::SelectAll));
    }

    #[test]
    fn test_shift_ignored_unless_required() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.action_for(KeyCode::Plus, Modifiers::SHIFT),
            Some(KeyAction::ZoomIn)
        );

        let chord = KeyChord::new(KeyCode::N, Modifiers::SHIFT);
        assert!(!chord.matches(KeyCode::N, Modifiers::NONE));
        assert!(chord.matches(KeyCode::N, Modifiers::SHIFT));
    }

    #[test]
    fn test_rebind_and_conflict() {
        let mut kb = KeyBindings::default();
        let chord = KeyChord::plain(KeyCode::Space);
        assert_eq!(kb.conflict(chord, None), None);

        kb.set(KeyAction::NextImage, chord);
        assert_eq!(
            kb.action_for(KeyCode::Space, Modifiers::NONE),
            Some(KeyAction::NextImage)
        );
        assert_eq!(kb.conflict(chord, None), Some(KeyAction::NextImage));
        assert_eq!(kb.conflict(chord, Some(KeyAction::NextImage)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyChord::command(KeyCode::A).display(), "Ctrl+A");
        assert_eq!(KeyChord::plain(KeyCode::PageUp).display(), "PgUp");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut kb = KeyBindings::default();
        kb.set(KeyAction::ZoomToFit, KeyChord::plain(KeyCode::Key0));
        let json = serde_json::to_string(&kb).unwrap();
        let parsed: KeyBindings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kb);
    }
}
