//! Default values for the display widget.
//!
//! Everything here can be overridden through [`crate::DisplayConfig`];
//! these are the values used when a config field is missing.

// =============================================================================
// Zoom
// =============================================================================

/// Zoom applied when a new image is loaded (1.0 = one image pixel per view pixel)
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Smallest allowed zoom. Zoom is always clamped to a positive value.
pub const ZOOM_MIN: f32 = 0.01;

/// Largest allowed zoom
pub const ZOOM_MAX: f32 = 64.0;

/// Zoom factor per wheel notch / zoom key press
pub const ZOOM_STEP: f32 = 1.25;

// =============================================================================
// Selection
// =============================================================================

/// Side length of a resize handle sensor, in view pixels
pub const SENSOR_SIZE: f32 = 8.0;

/// Selections smaller than this (in image pixels, either dimension) are
/// dropped when the mouse is released
pub const MIN_SELECTION_SIZE: u32 = 1;

/// Arrow-key nudge with the command modifier held
pub const NUDGE_STEP_LARGE: i32 = 10;

/// Opacity of the mask drawn outside the selection
pub const MASK_ALPHA: f32 = 0.5;

/// Line width of the selection frame, in view pixels
pub const FRAME_LINE_WIDTH: f32 = 1.0;

/// Thickest the frame gets when zoomed in
pub const FRAME_LINE_WIDTH_MAX: f32 = 4.0;

// =============================================================================
// Auto-scroll
// =============================================================================

/// Interval between auto-scroll steps while dragging near a viewport edge
pub const AUTOSCROLL_INTERVAL_MS: u64 = 20;

/// Distance scrolled per auto-scroll step, in view pixels
pub const AUTOSCROLL_STEP: f32 = 20.0;

/// Width of the band along each viewport edge that triggers auto-scroll
pub const AUTOSCROLL_MARGIN: f32 = 16.0;

// =============================================================================
// Appearance
// =============================================================================

/// Gray level of the area around the image (0 = black, 255 = white)
pub const DEFAULT_BACKGROUND_SHADE: u8 = 128;
