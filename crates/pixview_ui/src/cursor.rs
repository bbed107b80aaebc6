/// Pointer shape requested by a widget.
///
/// The host maps these onto its native cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    /// Drawing a new rectangle.
    Crosshair,
    /// Hovering something that can be panned.
    OpenHand,
    /// Panning in progress.
    ClosedHand,
    /// Moving an existing rectangle.
    SizeAll,
    /// Vertical edge resize (top or bottom).
    SizeVertical,
    /// Horizontal edge resize (left or right).
    SizeHorizontal,
    /// Top-left / bottom-right corner resize.
    SizeForwardDiagonal,
    /// Top-right / bottom-left corner resize.
    SizeBackwardDiagonal,
}
