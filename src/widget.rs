//! The image display widget.
//!
//! [`ImageView`] owns the image, the scroll state and the [`Surface`], routes
//! host events to them and forwards queued notifications to listeners.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, Rgba};
use pixview_ui::{
    Bounds, Color, CursorShape, Event, InputHandler, KeyCode, ListenerId, Listeners, Modifiers,
    MouseButton, Paint, Painter, Point, PointerInput, Size, Translate,
};
use web_time::Instant;

use crate::config::DisplayConfig;
use crate::constants::NUDGE_STEP_LARGE;
use crate::geometry::{PixelPoint, PixelRect};
use crate::keybindings::{KeyAction, KeyBindings};
use crate::signal::{PixelInfo, Signal};
use crate::surface::{Damage, MouseInteraction, Surface};
use crate::viewport::Viewport;
use crate::zoom_math;

/// A zoomable, scrollable image view with rectangular selection.
///
/// The host feeds it [`Event`]s, calls [`ImageView::tick`] while
/// [`ImageView::needs_tick`] is true, repaints according to
/// [`ImageView::take_damage`] and listens for [`Signal`]s.
pub struct ImageView {
    image: Option<DynamicImage>,
    surface: Surface,
    viewport: Viewport,
    default_zoom: f32,
    zoom_step: f32,
    background_shade: u8,
    bindings: KeyBindings,
    listeners: Listeners<Signal>,
    drop_candidate: Option<PathBuf>,
    last_tick: Option<Instant>,
    damage: Damage,
}

impl Default for ImageView {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl ImageView {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            image: None,
            surface: Surface::new(&config),
            viewport: Viewport::default(),
            default_zoom: config.zoom.default_zoom,
            zoom_step: config.zoom.zoom_step,
            background_shade: config.background_shade,
            bindings: config.keybindings,
            listeners: Listeners::new(),
            drop_candidate: None,
            last_tick: None,
            damage: Damage::None,
        }
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a signal handler. Signals are delivered in the order they were raised.
    pub fn connect<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Signal) + 'static,
    {
        self.listeners.connect(listener)
    }

    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        self.listeners.disconnect(id)
    }

    fn flush_signals(&mut self) {
        for signal in self.surface.take_signals() {
            self.listeners.emit(&signal);
        }
    }

    fn emit(&mut self, signal: Signal) {
        self.flush_signals();
        log::debug!("ImageView: emit {:?}", signal);
        self.listeners.emit(&signal);
    }

    fn sync_scene(&mut self) {
        self.viewport.set_scene_size(self.surface.scene_size());
    }

    // -------------------------------------------------------------------------
    // Image
    // -------------------------------------------------------------------------

    /// Show a new image at the default zoom, scrolled to the origin, without selection.
    pub fn new_image(&mut self, image: DynamicImage) {
        self.surface.set_image(image.to_rgba8());
        self.surface.set_zoom(self.default_zoom);
        self.image = Some(image);
        self.sync_scene();
        self.viewport.set_scroll(Point::zero());
        self.damage = Damage::Full;
        self.flush_signals();
    }

    /// Replace the image.
    ///
    /// An image of the same size keeps the selection. A different size keeps
    /// the zoom but clears the selection.
    pub fn update_image(&mut self, image: DynamicImage) {
        let same_size = self
            .image
            .as_ref()
            .is_some_and(|current| current.dimensions() == image.dimensions());

        if same_size {
            self.surface.update_pixels(image.to_rgba8());
        } else if self.image.is_some() {
            self.surface.set_image(image.to_rgba8());
        } else {
            self.new_image(image);
            return;
        }
        self.image = Some(image);
        self.sync_scene();
        self.damage = Damage::Full;
        self.flush_signals();
    }

    /// Scale `patch` to the selection and composite it over the selected region.
    /// The image keeps its color type.
    ///
    /// Returns `false` if there is no image or no selection.
    pub fn insert_into_selection(&mut self, patch: &DynamicImage) -> bool {
        let (Some(image), Some(sel)) = (&self.image, self.surface.selection()) else {
            return false;
        };
        let scaled = patch.resize_exact(sel.width as u32, sel.height as u32, FilterType::Triangle);
        let (x, y) = (i64::from(sel.x), i64::from(sel.y));

        // Composite at the image's own depth, then restore its color type
        let color = image.color();
        let composed = match color {
            ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => {
                let mut buf = image.to_rgba16();
                imageops::overlay(&mut buf, &scaled.to_rgba16(), x, y);
                DynamicImage::ImageRgba16(buf)
            }
            ColorType::Rgb32F | ColorType::Rgba32F => {
                let mut buf = image.to_rgba32f();
                imageops::overlay(&mut buf, &scaled.to_rgba32f(), x, y);
                DynamicImage::ImageRgba32F(buf)
            }
            _ => {
                let mut buf = image.to_rgba8();
                imageops::overlay(&mut buf, &scaled.to_rgba8(), x, y);
                DynamicImage::ImageRgba8(buf)
            }
        };
        let updated = convert_to(composed, color);
        self.surface.update_pixels(updated.to_rgba8());
        self.image = Some(updated);
        self.flush_signals();
        true
    }

    /// The selected region, or the whole image if nothing is selected.
    pub fn get_from_selection(&self) -> Option<DynamicImage> {
        let image = self.image.as_ref()?;
        Some(match self.surface.selection() {
            Some(sel) => image.crop_imm(
                sel.x as u32,
                sel.y as u32,
                sel.width as u32,
                sel.height as u32,
            ),
            None => image.clone(),
        })
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|image| image.dimensions())
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    pub fn viewport_size(&self) -> Size {
        self.viewport.size()
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport.set_size(size);
        self.damage = Damage::Full;
    }

    pub fn scroll(&self) -> Point {
        self.viewport.scroll()
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        if self.viewport.set_scroll(scroll) {
            self.damage = Damage::Full;
        }
    }

    /// Offset of the image inside the view when it is smaller than the view.
    pub fn mouse_position_correction(&self) -> Point {
        self.viewport.centering_offset()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn get_selection(&self) -> Option<PixelRect> {
        self.surface.selection()
    }

    /// Set the selection (clipped to the image). An empty rect clears it.
    pub fn set_selection(&mut self, rect: PixelRect) {
        self.surface.set_selection(rect);
        self.flush_signals();
    }

    pub fn enable_selection(&mut self, enabled: bool) {
        self.surface.enable_selection(enabled);
        self.flush_signals();
    }

    pub fn is_selection_enabled(&self) -> bool {
        self.surface.is_selection_enabled()
    }

    pub fn toggle_selection_all(&mut self) {
        self.surface.toggle_selection_all();
        self.flush_signals();
    }

    /// Move each selection edge by the given number of pixels.
    pub fn adjust_selection(&mut self, top: i32, left: i32, bottom: i32, right: i32) {
        self.surface.adjust_selection(top, left, bottom, right);
        self.flush_signals();
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    /// Set the zoom, keeping the image point at the center of the view fixed.
    pub fn set_zoom(&mut self, zoom: f32) {
        let center = Bounds::from_size(self.viewport.size()).center();
        self.zoom_to(zoom, center);
    }

    pub fn zoom(&self) -> f32 {
        self.surface.zoom()
    }

    /// Multiply the zoom by `factor`, keeping the image point under `anchor`
    /// (in view pixels) fixed.
    pub fn zoom_at(&mut self, factor: f32, anchor: Point) {
        self.zoom_to(self.surface.zoom() * factor, anchor);
    }

    /// Zoom so the whole image fits the view.
    pub fn zoom_to_fit(&mut self) {
        let Some((w, h)) = self.image_size() else {
            return;
        };
        if let Some(zoom) =
            zoom_math::fit_zoom(Size::new(w as f32, h as f32), self.viewport.size())
        {
            self.set_zoom(zoom);
        }
    }

    fn zoom_to(&mut self, zoom: f32, anchor: Point) {
        let old_zoom = self.surface.zoom();
        let image_point = zoom_math::scene_to_image(self.viewport.to_scene(anchor), old_zoom);
        if self.surface.set_zoom(zoom) {
            self.sync_scene();
            let scroll = zoom_math::anchored_scroll(
                anchor,
                image_point,
                self.surface.zoom(),
                self.viewport.centering_offset(),
            );
            self.viewport.set_scroll(scroll);
        }
        self.flush_signals();
    }

    // -------------------------------------------------------------------------
    // Pixel info
    // -------------------------------------------------------------------------

    /// The pixel under the pointer, if it is over the image.
    pub fn pixel_info(&self) -> Option<PixelInfo> {
        let image = self.image.as_ref()?;
        let position = self.surface.pixel_info_pos()?;
        let (w, h) = image.dimensions();
        let (x, y) = (position.x as u32, position.y as u32);
        if x >= w || y >= h {
            return None;
        }
        Some(PixelInfo {
            position,
            color: image.get_pixel(x, y),
            has_alpha: image.color().has_alpha(),
        })
    }

    pub fn pixel_info_pos(&self) -> Option<PixelPoint> {
        self.surface.pixel_info_pos()
    }

    pub fn pixel_info_color(&self) -> Option<Rgba<u8>> {
        self.pixel_info().map(|info| info.color)
    }

    pub fn pixel_info_has_alpha(&self) -> bool {
        self.pixel_info().is_some_and(|info| info.has_alpha)
    }

    // -------------------------------------------------------------------------
    // Appearance and state
    // -------------------------------------------------------------------------

    pub fn background_shade(&self) -> u8 {
        self.background_shade
    }

    pub fn set_background_shade(&mut self, shade: u8) {
        if shade != self.background_shade {
            self.background_shade = shade;
            self.damage = Damage::Full;
        }
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_keybindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    pub fn cursor(&self) -> CursorShape {
        self.surface.cursor()
    }

    pub fn mouse_interaction(&self) -> MouseInteraction {
        self.surface.mouse_interaction()
    }

    /// Discard cached rendering and repaint everything.
    pub fn redraw(&mut self) {
        self.surface.redraw();
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle a host event. Returns `true` if the widget consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let consumed = match event {
            Event::MousePressed {
                button,
                position,
                modifiers,
            } => {
                let input = self.pointer(*button, *position, *modifiers);
                self.surface.mouse_press(input, &mut self.viewport)
            }
            Event::MouseMoved {
                position,
                modifiers,
            } => {
                let input = self.pointer(MouseButton::Left, *position, *modifiers);
                self.surface.mouse_move(input, &mut self.viewport);
                true
            }
            Event::MouseReleased {
                button,
                position,
                modifiers,
            } => {
                let input = self.pointer(*button, *position, *modifiers);
                self.surface.mouse_release(input, &mut self.viewport);
                true
            }
            Event::MouseLeft => {
                self.surface.hover_leave_action();
                true
            }
            Event::MouseWheel {
                delta, position, ..
            } => {
                let factor = zoom_math::step_zoom(1.0, self.zoom_step, *delta);
                self.zoom_at(factor, *position);
                true
            }
            Event::KeyPressed { key, modifiers } => self.handle_key(*key, *modifiers),
            Event::KeyReleased { .. } => false,
            Event::FileHoverStarted { paths } => {
                self.drop_candidate = droppable_image(paths).map(Path::to_path_buf);
                self.drop_candidate.is_some()
            }
            Event::FileHoverEnded => self.drop_candidate.take().is_some(),
            Event::FilesDropped { paths } => {
                self.drop_candidate = None;
                match droppable_image(paths) {
                    Some(path) => {
                        log::info!("ImageView: image dropped {:?}", path);
                        self.emit(Signal::ImageDropped(path.to_path_buf()));
                        true
                    }
                    None => {
                        log::debug!("ImageView: ignoring drop of {} path(s)", paths.len());
                        false
                    }
                }
            }
        };
        self.flush_signals();
        consumed
    }

    /// Whether a dragged file would be accepted if dropped now.
    pub fn accepts_drop(&self) -> bool {
        self.drop_candidate.is_some()
    }

    fn pointer(
        &self,
        button: MouseButton,
        local: Point,
        modifiers: Modifiers,
    ) -> PointerInput {
        PointerInput {
            button,
            position: self.viewport.to_scene(local),
            modifiers,
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> bool {
        if let Some((dx, dy)) = key.arrow_delta() {
            let step = if modifiers.command() {
                NUDGE_STEP_LARGE
            } else {
                1
            };
            let (dx, dy) = (dx * step, dy * step);
            if modifiers.shift {
                self.surface.adjust_selection(0, 0, dy, dx);
            } else {
                self.surface.move_selection(dx, dy);
            }
            return self.surface.selection().is_some();
        }

        let Some(action) = self.bindings.action_for(key, modifiers) else {
            return false;
        };
        log::debug!("ImageView: key {:?} -> {:?}", key, action);
        let center = Bounds::from_size(self.viewport.size()).center();
        match action {
            KeyAction::NextImage => self.emit(Signal::NeedNextImage),
            KeyAction::PrevImage => self.emit(Signal::NeedPrevImage),
            KeyAction::FirstImage => self.emit(Signal::NeedFirstImage),
            KeyAction::LastImage => self.emit(Signal::NeedLastImage),
            KeyAction::SelectAll => self.toggle_selection_all(),
            KeyAction::ClearSelection => self.set_selection(PixelRect::default()),
            KeyAction::ZoomIn => self.zoom_at(self.zoom_step, center),
            KeyAction::ZoomOut => self.zoom_at(1.0 / self.zoom_step, center),
            KeyAction::ZoomOneToOne => self.set_zoom(1.0),
            KeyAction::ZoomToFit => self.zoom_to_fit(),
        }
        true
    }

    // -------------------------------------------------------------------------
    // Timer and painting
    // -------------------------------------------------------------------------

    /// Whether the host should keep calling [`Self::tick`].
    pub fn needs_tick(&self) -> bool {
        self.surface.is_autoscrolling()
    }

    /// Advance the auto-scroll timer by `dt`. Returns `true` if the view scrolled.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let scrolled = self.surface.tick(dt, &mut self.viewport);
        self.flush_signals();
        scrolled
    }

    /// Like [`Self::tick`], measuring the elapsed time from the previous call.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if !self.surface.is_autoscrolling() {
            self.last_tick = None;
            return false;
        }
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.tick(dt)
    }

    /// Take the accumulated repaint request, resetting it.
    pub fn take_damage(&mut self) -> Damage {
        let damage = self.damage.max(self.surface.take_damage());
        self.damage = Damage::None;
        damage
    }

    /// Paint the background, the image and the selection overlay in view coordinates.
    pub fn paint(&mut self, painter: &mut dyn Painter) {
        painter.fill_rect(
            Bounds::from_size(self.viewport.size()),
            Color::gray(self.background_shade),
        );
        let offset = self.viewport.centering_offset() - self.viewport.scroll();
        let mut scene = Translate::new(painter, offset);
        self.surface.paint(&mut scene);
    }
}

/// Convert `image` to the pixel layout `color`.
fn convert_to(image: DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        _ => image,
    }
}

/// The single image path in a drag, if there is exactly one.
fn droppable_image(paths: &[PathBuf]) -> Option<&Path> {
    match paths {
        [path] if ImageFormat::from_path(path).is_ok() => Some(path.as_path()),
        _ => None,
    }
}

impl std::fmt::Debug for ImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView")
            .field("image_size", &self.image_size())
            .field("zoom", &self.zoom())
            .field("selection", &self.get_selection())
            .field("viewport", &self.viewport)
            .field("listeners", &self.listeners)
            .finish()
    }
}
