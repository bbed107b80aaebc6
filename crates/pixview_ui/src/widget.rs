//! Input handling seam

use crate::event::{Modifiers, MouseButton};
use crate::layout::Point;

/// Pointer input in scene coordinates, as forwarded by a view to its scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub button: MouseButton,
    /// Position in scene pixels
    pub position: Point,
    pub modifiers: Modifiers,
}

/// Something that reacts to pointer input forwarded by its owning view.
///
/// `C` is the context the owner lends for the duration of the call (for
/// example the view's scroll state).
pub trait InputHandler<C> {
    /// Returns `true` if the press was consumed.
    fn mouse_press(&mut self, input: PointerInput, ctx: &mut C) -> bool;

    fn mouse_move(&mut self, input: PointerInput, ctx: &mut C);

    fn mouse_release(&mut self, input: PointerInput, ctx: &mut C);
}
