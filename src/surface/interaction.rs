//! Mouse interaction state machine for the surface.

use pixview_ui::{CursorShape, InputHandler, MouseButton, Point, PointerInput};

use super::sensors::{ResizeDirection, SensorHit};
use super::{Damage, Surface};
use crate::geometry::{AspectDriver, Corner, PixelPoint, PixelRect, conform_aspect};
use crate::viewport::Viewport;

/// What the mouse is currently doing, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseInteraction {
    #[default]
    None,
    /// Panning the view
    Drag,
    /// Drawing a new selection
    Select,
    /// Dragging an edge or corner of the selection
    Resize(ResizeDirection),
    /// Dragging the whole selection
    Move,
}

/// Internal gesture state, carrying what each gesture needs between moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) enum Interaction {
    #[default]
    None,
    Drag {
        last_local: Point,
        button: MouseButton,
    },
    Select {
        anchor: PixelPoint,
    },
    Resize {
        direction: ResizeDirection,
        origin: PixelRect,
    },
    Move {
        grab: PixelPoint,
        origin: PixelRect,
    },
}

impl Interaction {
    pub(super) fn mode(&self) -> MouseInteraction {
        match self {
            Interaction::None => MouseInteraction::None,
            Interaction::Drag { .. } => MouseInteraction::Drag,
            Interaction::Select { .. } => MouseInteraction::Select,
            Interaction::Resize { direction, .. } => MouseInteraction::Resize(*direction),
            Interaction::Move { .. } => MouseInteraction::Move,
        }
    }

    /// Gestures that edit the selection (and may auto-scroll).
    pub(super) fn edits_selection(&self) -> bool {
        matches!(
            self,
            Interaction::Select { .. } | Interaction::Resize { .. } | Interaction::Move { .. }
        )
    }

    /// The button that started the gesture.
    pub(super) fn button(&self) -> Option<MouseButton> {
        match self {
            Interaction::None => None,
            Interaction::Drag { button, .. } => Some(*button),
            _ => Some(MouseButton::Left),
        }
    }

    pub(super) fn cursor(&self) -> Option<CursorShape> {
        match self {
            Interaction::None => None,
            Interaction::Drag { .. } => Some(CursorShape::ClosedHand),
            Interaction::Select { .. } => Some(CursorShape::Crosshair),
            Interaction::Resize { direction, .. } => Some(direction.cursor()),
            Interaction::Move { .. } => Some(CursorShape::SizeAll),
        }
    }
}

/// Rect spanned from `anchor` to `pointer`, forced to `aspect` if set.
pub(super) fn select_rect(
    anchor: PixelPoint,
    pointer: PixelPoint,
    aspect: Option<f32>,
    bounds: &PixelRect,
) -> PixelRect {
    let rect = PixelRect::from_points(anchor, pointer);
    match aspect {
        Some(ratio) => conform_aspect(
            rect,
            ratio,
            Corner::from_growth(pointer.x >= anchor.x, pointer.y >= anchor.y),
            AspectDriver::Dominant,
            bounds,
        ),
        None => rect,
    }
}

/// `origin` with the edges named by `direction` moved to `pointer`.
///
/// The opposite edge or corner stays fixed. Dragging past it flips the rect.
pub(super) fn resize_rect(
    direction: ResizeDirection,
    origin: PixelRect,
    pointer: PixelPoint,
    aspect: Option<f32>,
    bounds: &PixelRect,
) -> PixelRect {
    let o = origin;
    let p = pointer;
    let (fixed, moving, driver) = match direction {
        ResizeDirection::TopLeft => (
            PixelPoint::new(o.right(), o.bottom()),
            p,
            AspectDriver::Dominant,
        ),
        ResizeDirection::TopRight => (
            PixelPoint::new(o.left(), o.bottom()),
            p,
            AspectDriver::Dominant,
        ),
        ResizeDirection::BottomRight => (o.top_left(), p, AspectDriver::Dominant),
        ResizeDirection::BottomLeft => (
            PixelPoint::new(o.right(), o.top()),
            p,
            AspectDriver::Dominant,
        ),
        ResizeDirection::Top => (
            PixelPoint::new(o.left(), o.bottom()),
            PixelPoint::new(o.right(), p.y),
            AspectDriver::Height,
        ),
        ResizeDirection::Bottom => (
            o.top_left(),
            PixelPoint::new(o.right(), p.y),
            AspectDriver::Height,
        ),
        ResizeDirection::Left => (
            PixelPoint::new(o.right(), o.top()),
            PixelPoint::new(p.x, o.bottom()),
            AspectDriver::Width,
        ),
        ResizeDirection::Right => (
            o.top_left(),
            PixelPoint::new(p.x, o.bottom()),
            AspectDriver::Width,
        ),
    };

    let rect = PixelRect::from_points(fixed, moving);
    match aspect {
        Some(ratio) => conform_aspect(
            rect,
            ratio,
            Corner::from_growth(moving.x >= fixed.x, moving.y >= fixed.y),
            driver,
            bounds,
        ),
        None => rect,
    }
}

impl Surface {
    /// Feed a scene position into the active selection gesture.
    pub(super) fn apply_pointer(&mut self, scene: Point) {
        let rect = match self.interaction {
            Interaction::Select { anchor } => {
                let p = self.pixel_at(scene, true);
                select_rect(anchor, p, self.aspect_ratio, &self.image_rect)
            }
            Interaction::Resize { direction, origin } => {
                let p = self.pixel_at(scene, true);
                resize_rect(direction, origin, p, self.aspect_ratio, &self.image_rect)
            }
            Interaction::Move { grab, origin } => {
                let p = self.pixel_at(scene, false);
                origin
                    .translated(p.x.saturating_sub(grab.x), p.y.saturating_sub(grab.y))
                    .shifted_within(&self.image_rect)
            }
            Interaction::None | Interaction::Drag { .. } => return,
        };
        self.change_selection(rect);
    }

    fn update_autoscroll(&mut self, local: Point, viewport: &Viewport) {
        let direction = viewport.edge_direction(local, self.autoscroll_margin);
        if direction == (0, 0) {
            self.scroll_timer.stop();
        } else if !self.scroll_timer.is_running() || self.scroll_timer.direction() != direction {
            self.scroll_timer.start(direction);
        }
    }

    fn begin(&mut self, interaction: Interaction) {
        log::debug!("Surface: {:?} -> {:?}", self.interaction.mode(), interaction.mode());
        self.interaction = interaction;
        if let Some(cursor) = interaction.cursor() {
            self.cursor = cursor;
        }
    }
}

impl InputHandler<Viewport> for Surface {
    fn mouse_press(&mut self, input: PointerInput, viewport: &mut Viewport) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let local = viewport.to_local(input.position);

        let interaction = match input.button {
            MouseButton::Middle => Interaction::Drag {
                last_local: local,
                button: MouseButton::Middle,
            },
            MouseButton::Left => {
                let hit = if self.selection_enabled {
                    self.sensors.as_ref().and_then(|s| s.hit(input.position))
                } else {
                    None
                };
                match hit {
                    Some(SensorHit::Resize(direction)) => Interaction::Resize {
                        direction,
                        origin: self.selection,
                    },
                    Some(SensorHit::Move) => Interaction::Move {
                        grab: self.pixel_at(input.position, false),
                        origin: self.selection,
                    },
                    None if self.selection_enabled => {
                        self.change_selection(PixelRect::default());
                        Interaction::Select {
                            anchor: self.pixel_at(input.position, true),
                        }
                    }
                    None => Interaction::Drag {
                        last_local: local,
                        button: MouseButton::Left,
                    },
                }
            }
            _ => return false,
        };

        self.begin(interaction);
        self.last_local = Some(local);
        true
    }

    fn mouse_move(&mut self, input: PointerInput, viewport: &mut Viewport) {
        let local = viewport.to_local(input.position);

        match self.interaction {
            Interaction::None => {
                self.cursor = self.hover_cursor(input.position);
            }
            Interaction::Drag { last_local, button } => {
                let delta = local - last_local;
                if viewport.scroll_by(-delta.x, -delta.y) {
                    self.add_damage(Damage::Full);
                }
                self.interaction = Interaction::Drag {
                    last_local: local,
                    button,
                };
            }
            _ => {
                self.apply_pointer(input.position);
                self.update_autoscroll(local, viewport);
            }
        }

        if self.interaction.edits_selection() {
            self.last_local = Some(local);
        }
        self.hover_action(viewport.to_scene(local));
    }

    fn mouse_release(&mut self, input: PointerInput, _viewport: &mut Viewport) {
        if self
            .interaction
            .button()
            .is_some_and(|button| button != input.button)
        {
            return;
        }
        self.scroll_timer.stop();
        let finished = std::mem::take(&mut self.interaction);
        self.last_local = None;

        if finished.edits_selection() {
            let min = i32::try_from(self.min_selection_size).unwrap_or(i32::MAX);
            let sel = self.selection;
            if !sel.is_empty() && (sel.width < min || sel.height < min) {
                log::debug!("Surface: dropping undersized selection {:?}", sel);
                self.change_selection(PixelRect::default());
            }
        }
        if finished != Interaction::None {
            log::debug!("Surface: {:?} -> None", finished.mode());
        }
        self.cursor = self.hover_cursor(input.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> PixelRect {
        PixelRect::from_size(800, 600)
    }

    fn origin() -> PixelRect {
        PixelRect::new(100, 100, 200, 100)
    }

    #[test]
    fn test_select_rect_any_direction() {
        let r = select_rect(
            PixelPoint::new(50, 60),
            PixelPoint::new(10, 20),
            None,
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(10, 20, 40, 40));
    }

    #[test]
    fn test_select_rect_with_aspect_keeps_anchor() {
        let r = select_rect(
            PixelPoint::new(100, 100),
            PixelPoint::new(40, 80),
            Some(1.0),
            &bounds(),
        );
        // Dragged up-left, so the anchor is the bottom-right corner
        assert_eq!(r.right(), 100);
        assert_eq!(r.bottom(), 100);
        assert_eq!(r.width, r.height);
        assert_eq!(r.width, 60);
    }

    #[test]
    fn test_resize_corner() {
        let r = resize_rect(
            ResizeDirection::BottomRight,
            origin(),
            PixelPoint::new(350, 260),
            None,
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(100, 100, 250, 160));

        let r = resize_rect(
            ResizeDirection::TopLeft,
            origin(),
            PixelPoint::new(90, 80),
            None,
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(90, 80, 210, 120));
    }

    #[test]
    fn test_resize_edge_only_moves_one_side() {
        let r = resize_rect(
            ResizeDirection::Top,
            origin(),
            PixelPoint::new(999, 150),
            None,
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(100, 150, 200, 50));

        let r = resize_rect(
            ResizeDirection::Left,
            origin(),
            PixelPoint::new(50, 999),
            None,
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(50, 100, 250, 100));
    }

    #[test]
    fn test_resize_past_opposite_edge_flips() {
        let r = resize_rect(
            ResizeDirection::Right,
            origin(),
            PixelPoint::new(40, 0),
            None,
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(40, 100, 60, 100));
    }

    #[test]
    fn test_resize_edge_with_aspect() {
        let r = resize_rect(
            ResizeDirection::Right,
            origin(),
            PixelPoint::new(400, 0),
            Some(2.0),
            &bounds(),
        );
        assert_eq!(r, PixelRect::new(100, 100, 300, 150));
    }

    #[test]
    fn test_interaction_modes() {
        let i = Interaction::Resize {
            direction: ResizeDirection::Left,
            origin: origin(),
        };
        assert_eq!(i.mode(), MouseInteraction::Resize(ResizeDirection::Left));
        assert!(i.edits_selection());
        let drag = Interaction::Drag {
            last_local: Point::zero(),
            button: MouseButton::Middle,
        };
        assert!(!drag.edits_selection());
        assert_eq!(drag.button(), Some(MouseButton::Middle));
        assert_eq!(i.button(), Some(MouseButton::Left));
        assert_eq!(Interaction::None.button(), None);
        assert_eq!(Interaction::None.cursor(), None);
    }
}
