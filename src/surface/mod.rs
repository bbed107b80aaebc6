//! The scene the widget shows: canvas, selection overlay and mouse gestures.
//!
//! The surface works in scene coordinates (view pixels over the zoomed image)
//! and never owns the scroll state. The widget lends it the [`Viewport`] for
//! input handling and auto-scroll ticks.

mod autoscroll;
mod interaction;
mod sensors;

pub use autoscroll::ScrollTimer;
pub use interaction::MouseInteraction;
pub use sensors::{ResizeDirection, SensorHit, Sensors};

use std::time::Duration;

use image::RgbaImage;
use pixview_ui::{CursorShape, Paint, Painter, Point, Size};

use crate::canvas::Canvas;
use crate::config::DisplayConfig;
use crate::fast_selector::FastSelector;
use crate::geometry::{AspectDriver, Corner, PixelPoint, PixelRect, conform_aspect};
use crate::signal::Signal;
use crate::viewport::Viewport;
use crate::zoom_math;
use interaction::Interaction;

/// Repaint work the host owes the widget, ordered by cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Damage {
    #[default]
    None,
    /// Only the selection overlay changed
    Overlay,
    /// Everything must be repainted
    Full,
}

/// Canvas plus selection, driven by mouse gestures.
#[derive(Debug)]
pub struct Surface {
    canvas: Option<Canvas>,
    image_rect: PixelRect,
    fast_selector: FastSelector,
    use_fast_selector: bool,

    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,

    selection_enabled: bool,
    aspect_ratio: Option<f32>,
    min_selection_size: u32,
    selection: PixelRect,
    sensors: Option<Sensors>,
    sensor_size: f32,

    interaction: Interaction,
    /// Last pointer position in viewport-local pixels during a selection gesture
    last_local: Option<Point>,
    scroll_timer: ScrollTimer,
    autoscroll_step: f32,
    autoscroll_margin: f32,

    pixel_info_pos: Option<PixelPoint>,
    cursor: CursorShape,
    damage: Damage,
    signals: Vec<Signal>,
}

impl Surface {
    pub fn new(config: &DisplayConfig) -> Self {
        let zoom = zoom_math::clamp_zoom(
            config.zoom.default_zoom,
            config.zoom.min_zoom,
            config.zoom.max_zoom,
        )
        .unwrap_or(crate::constants::DEFAULT_ZOOM);

        Self {
            canvas: None,
            image_rect: PixelRect::default(),
            fast_selector: FastSelector::new(),
            use_fast_selector: config.selection.use_fast_selector,
            zoom,
            min_zoom: config.zoom.min_zoom,
            max_zoom: config.zoom.max_zoom,
            selection_enabled: config.selection.enabled,
            aspect_ratio: config
                .selection
                .aspect_ratio
                .filter(|r| r.is_finite() && *r > 0.0),
            min_selection_size: config.selection.min_selection_size,
            selection: PixelRect::default(),
            sensors: None,
            sensor_size: config.selection.sensor_size,
            interaction: Interaction::None,
            last_local: None,
            scroll_timer: ScrollTimer::new(Duration::from_millis(config.autoscroll.interval_ms)),
            autoscroll_step: config.autoscroll.step,
            autoscroll_margin: config.autoscroll.margin,
            pixel_info_pos: None,
            cursor: CursorShape::default(),
            damage: Damage::None,
            signals: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Image
    // -------------------------------------------------------------------------

    /// Show a new bitmap. Clears the selection and cancels any gesture.
    pub fn set_image(&mut self, pixmap: RgbaImage) {
        let (w, h) = pixmap.dimensions();
        log::info!("Surface: new image {}x{}", w, h);

        match &mut self.canvas {
            Some(canvas) => canvas.set_canvas_pixmap(pixmap),
            None => self.canvas = Some(Canvas::new(pixmap, self.zoom)),
        }
        self.image_rect = PixelRect::from_size(w, h);
        self.interaction = Interaction::None;
        self.last_local = None;
        self.scroll_timer.stop();
        self.pixel_info_pos = None;

        if !self.selection.is_empty() {
            self.selection = PixelRect::default();
            self.signals.push(Signal::SelectionChanged);
        }
        self.refresh_selection_overlay();
        self.add_damage(Damage::Full);
    }

    /// Replace the pixels of the current bitmap, keeping the selection.
    ///
    /// Returns `false` (and does nothing) if there is no bitmap or the size differs.
    pub fn update_pixels(&mut self, pixmap: RgbaImage) -> bool {
        let Some(canvas) = &mut self.canvas else {
            return false;
        };
        if canvas.pixmap().dimensions() != pixmap.dimensions() {
            log::debug!(
                "Surface: update_pixels size mismatch {:?} vs {:?}",
                canvas.pixmap().dimensions(),
                pixmap.dimensions()
            );
            return false;
        }
        canvas.set_canvas_pixmap(pixmap);
        self.add_damage(Damage::Full);
        true
    }

    pub fn has_image(&self) -> bool {
        self.canvas.is_some()
    }

    /// The rendered bitmap.
    pub fn pixmap(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref().map(|c| c.pixmap())
    }

    /// Image bounds in pixels (empty without an image).
    pub fn image_rect(&self) -> PixelRect {
        self.image_rect
    }

    /// Size of the zoomed image in scene pixels.
    pub fn scene_size(&self) -> Size {
        self.canvas
            .as_ref()
            .map(|c| c.scene_bounds().size())
            .unwrap_or_else(Size::zero)
    }

    /// Throw away cached rendering and repaint everything.
    pub fn redraw(&mut self) {
        if let Some(canvas) = &mut self.canvas {
            canvas.invalidate();
        }
        self.refresh_selection_overlay();
        self.add_damage(Damage::Full);
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    /// Set the zoom (clamped). Returns `true` and queues `ZoomChanged` if it changed.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let Some(zoom) = zoom_math::clamp_zoom(zoom, self.min_zoom, self.max_zoom) else {
            log::debug!("Surface: ignoring invalid zoom {}", zoom);
            return false;
        };
        if zoom == self.zoom {
            return false;
        }
        log::debug!("Surface: zoom {} -> {}", self.zoom, zoom);
        self.zoom = zoom;
        if let Some(canvas) = &mut self.canvas {
            canvas.set_zoom(zoom);
        }
        self.refresh_selection_overlay();
        self.add_damage(Damage::Full);
        self.signals.push(Signal::ZoomChanged);
        true
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_limits(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Store a new selection after clipping it to the image and forcing the
    /// aspect ratio. Returns `true` and queues `SelectionChanged` if the
    /// stored value changed.
    pub fn change_selection(&mut self, rect: PixelRect) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let mut clipped = rect.normalized().intersect(&self.image_rect);
        if let Some(ratio) = self.aspect_ratio {
            clipped = conform_aspect(
                clipped,
                ratio,
                Corner::TopLeft,
                AspectDriver::Width,
                &self.image_rect,
            );
        }
        if clipped.is_empty() {
            clipped = PixelRect::default();
        }
        if clipped == self.selection {
            return false;
        }

        log::trace!("Surface: selection {:?} -> {:?}", self.selection, clipped);
        self.selection = clipped;
        self.refresh_selection_overlay();
        self.signals.push(Signal::SelectionChanged);
        true
    }

    pub fn set_selection(&mut self, rect: PixelRect) -> bool {
        self.change_selection(rect)
    }

    /// Current selection, or `None` if nothing is selected.
    pub fn selection(&self) -> Option<PixelRect> {
        (!self.selection.is_empty()).then_some(self.selection)
    }

    /// Select the whole image, or clear the selection if it already is.
    pub fn toggle_selection_all(&mut self) -> bool {
        let full = match self.aspect_ratio {
            Some(ratio) => conform_aspect(
                self.image_rect,
                ratio,
                Corner::TopLeft,
                AspectDriver::Dominant,
                &self.image_rect,
            ),
            None => self.image_rect,
        };
        if self.selection == full {
            self.change_selection(PixelRect::default())
        } else {
            self.change_selection(full)
        }
    }

    /// Move each edge of the selection by the given number of pixels.
    pub fn adjust_selection(&mut self, top: i32, left: i32, bottom: i32, right: i32) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let s = self.selection;
        let image = self.image_rect;
        let x = |edge: i32, delta: i32| {
            edge.saturating_add(delta)
                .clamp(image.left(), image.right())
        };
        let y = |edge: i32, delta: i32| {
            edge.saturating_add(delta)
                .clamp(image.top(), image.bottom())
        };
        self.change_selection(PixelRect::from_edges(
            x(s.left(), left),
            y(s.top(), top),
            x(s.right(), right),
            y(s.bottom(), bottom),
        ))
    }

    /// Translate the selection, keeping its size and staying inside the image.
    pub fn move_selection(&mut self, dx: i32, dy: i32) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let moved = self
            .selection
            .translated(dx, dy)
            .shifted_within(&self.image_rect);
        self.change_selection(moved)
    }

    /// Turn selecting on or off. Turning it off cancels any gesture and clears the selection.
    pub fn enable_selection(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
        if !enabled {
            self.interaction = Interaction::None;
            self.last_local = None;
            self.scroll_timer.stop();
            self.change_selection(PixelRect::default());
        }
        self.cursor = if self.canvas.is_none() {
            CursorShape::Arrow
        } else if enabled {
            CursorShape::Crosshair
        } else {
            CursorShape::OpenHand
        };
    }

    pub fn is_selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        self.aspect_ratio
    }

    pub fn sensors(&self) -> Option<&Sensors> {
        self.sensors.as_ref()
    }

    fn refresh_selection_overlay(&mut self) {
        self.sensors = Sensors::new(self.selection, self.zoom, self.sensor_size);
        self.fast_selector
            .draw_selection(self.image_rect, self.selection, self.zoom);
        self.fast_selector.set_visible(!self.selection.is_empty());
        self.add_damage(if self.use_fast_selector {
            Damage::Overlay
        } else {
            Damage::Full
        });
    }

    // -------------------------------------------------------------------------
    // Hover and gestures
    // -------------------------------------------------------------------------

    /// Track the pixel under `scene`. Queues `PixelInfo` when it changes.
    pub fn hover_action(&mut self, scene: Point) {
        let pos = self.canvas.as_ref().and_then(|c| {
            if self.pixel_info_pos.is_some() {
                c.hover_move(scene)
            } else {
                c.hover_enter(scene)
            }
        });
        if pos != self.pixel_info_pos {
            self.pixel_info_pos = pos;
            self.signals.push(Signal::PixelInfo);
        }
    }

    /// The pointer left the widget.
    pub fn hover_leave_action(&mut self) {
        if self.pixel_info_pos.take().is_some() {
            self.signals.push(Signal::PixelInfo);
        }
        if self.interaction == Interaction::None {
            self.cursor = CursorShape::Arrow;
        }
    }

    pub fn pixel_info_pos(&self) -> Option<PixelPoint> {
        self.pixel_info_pos
    }

    pub fn mouse_interaction(&self) -> MouseInteraction {
        self.interaction.mode()
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.scroll_timer.is_running()
    }

    /// Advance the auto-scroll timer. Returns `true` if the view scrolled.
    pub fn tick(&mut self, dt: Duration, viewport: &mut Viewport) -> bool {
        let fires = self.scroll_timer.tick(dt);
        if fires == 0 {
            return false;
        }
        let (dx, dy) = self.scroll_timer.direction();
        let step = self.autoscroll_step * fires as f32;
        if !viewport.scroll_by(dx as f32 * step, dy as f32 * step) {
            return false;
        }
        self.add_damage(Damage::Full);

        if let Some(local) = self.last_local {
            let scene = viewport.to_scene(local);
            self.apply_pointer(scene);
            self.hover_action(scene);
        }
        true
    }

    /// Nearest pixel boundary to a scene position, optionally clamped to the image.
    fn pixel_at(&self, scene: Point, clamp: bool) -> PixelPoint {
        let x = (scene.x / self.zoom).round() as i32;
        let y = (scene.y / self.zoom).round() as i32;
        if clamp {
            PixelPoint::new(
                x.clamp(0, self.image_rect.width),
                y.clamp(0, self.image_rect.height),
            )
        } else {
            PixelPoint::new(x, y)
        }
    }

    fn hover_cursor(&self, scene: Point) -> CursorShape {
        if self.canvas.is_none() {
            return CursorShape::Arrow;
        }
        let hit = if self.selection_enabled {
            self.sensors.as_ref().and_then(|s| s.hit(scene))
        } else {
            None
        };
        match hit {
            Some(hit) => hit.cursor(),
            None if self.selection_enabled => CursorShape::Crosshair,
            None => CursorShape::OpenHand,
        }
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    fn add_damage(&mut self, damage: Damage) {
        self.damage = self.damage.max(damage);
    }

    /// Take the accumulated damage, resetting it to `None`.
    pub fn take_damage(&mut self) -> Damage {
        std::mem::take(&mut self.damage)
    }

    /// Take the queued signals in the order they were raised.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}

impl Paint for Surface {
    fn paint(&mut self, painter: &mut dyn Painter) {
        if let Some(canvas) = &mut self.canvas {
            canvas.paint(painter);
        }
        self.fast_selector.paint(painter);
    }
}
