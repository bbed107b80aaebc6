//! The bitmap layer of the scene.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use pixview_ui::{Bounds, Interpolation, Paint, Painter, Point};

use crate::geometry::PixelPoint;

/// Renders the current bitmap at the current zoom.
///
/// When zoomed out the bitmap is downscaled once into a paint cache so the
/// painter doesn't resample the full image every frame. The cache is rebuilt
/// lazily on the next paint after the pixmap or zoom changes.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: RgbaImage,
    paint_cache: Option<RgbaImage>,
    zoom: f32,
}

impl Canvas {
    pub fn new(pixmap: RgbaImage, zoom: f32) -> Self {
        Self {
            pixmap,
            paint_cache: None,
            zoom: if zoom > 0.0 { zoom } else { 1.0 },
        }
    }

    /// Replace the rendered bitmap.
    pub fn set_canvas_pixmap(&mut self, pixmap: RgbaImage) {
        self.pixmap = pixmap;
        self.paint_cache = None;
    }

    pub fn pixmap(&self) -> &RgbaImage {
        &self.pixmap
    }

    /// Update the scale factor. Non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !(zoom.is_finite() && zoom > 0.0) {
            log::debug!("Canvas: ignoring invalid zoom {}", zoom);
            return;
        }
        if zoom != self.zoom {
            self.zoom = zoom;
            self.paint_cache = None;
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Drop the paint cache so the next paint resamples the pixmap.
    pub fn invalidate(&mut self) {
        self.paint_cache = None;
    }

    pub fn has_valid_cache(&self) -> bool {
        self.paint_cache.is_some()
    }

    /// Scene-space bounds of the bitmap.
    pub fn scene_bounds(&self) -> Bounds {
        let (w, h) = self.pixmap.dimensions();
        Bounds::new(0.0, 0.0, w as f32 * self.zoom, h as f32 * self.zoom)
    }

    /// Image pixel under a scene position, or `None` outside the bitmap.
    pub fn hover_move(&self, scene: Point) -> Option<PixelPoint> {
        let x = (scene.x / self.zoom).floor();
        let y = (scene.y / self.zoom).floor();
        let (w, h) = self.pixmap.dimensions();
        if x < 0.0 || y < 0.0 || x >= w as f32 || y >= h as f32 {
            return None;
        }
        Some(PixelPoint::new(x as i32, y as i32))
    }

    pub fn hover_enter(&self, scene: Point) -> Option<PixelPoint> {
        self.hover_move(scene)
    }

    fn rebuild_cache(&mut self) {
        let (w, h) = self.pixmap.dimensions();
        let cw = ((w as f32 * self.zoom).round() as u32).max(1);
        let ch = ((h as f32 * self.zoom).round() as u32).max(1);
        log::trace!("Canvas: rebuilding paint cache {}x{} -> {}x{}", w, h, cw, ch);
        self.paint_cache = Some(imageops::resize(&self.pixmap, cw, ch, FilterType::Triangle));
    }
}

impl Paint for Canvas {
    fn paint(&mut self, painter: &mut dyn Painter) {
        let dest = self.scene_bounds();
        if dest.is_empty() {
            return;
        }
        if self.zoom >= 1.0 {
            painter.draw_image(&self.pixmap, dest, Interpolation::Nearest);
            return;
        }
        if self.paint_cache.is_none() {
            self.rebuild_cache();
        }
        if let Some(cache) = &self.paint_cache {
            painter.draw_image(cache, dest, Interpolation::Nearest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixview_ui::{DrawCommand, DrawList};

    fn canvas(zoom: f32) -> Canvas {
        Canvas::new(RgbaImage::new(100, 50), zoom)
    }

    #[test]
    fn test_hover_translates_to_pixels() {
        let c = canvas(2.0);
        assert_eq!(c.hover_move(Point::new(5.0, 9.9)), Some(PixelPoint::new(2, 4)));
        assert_eq!(c.hover_move(Point::new(199.9, 99.9)), Some(PixelPoint::new(99, 49)));
        assert_eq!(c.hover_move(Point::new(200.0, 10.0)), None);
        assert_eq!(c.hover_move(Point::new(-0.5, 10.0)), None);
    }

    #[test]
    fn test_magnified_paint_uses_source() {
        let mut c = canvas(4.0);
        let mut list = DrawList::new();
        c.paint(&mut list);

        assert_eq!(
            list.commands(),
            &[DrawCommand::DrawImage {
                source_size: (100, 50),
                dest: Bounds::new(0.0, 0.0, 400.0, 200.0),
                interpolation: Interpolation::Nearest,
            }]
        );
        assert!(!c.has_valid_cache());
    }

    #[test]
    fn test_reduced_paint_builds_cache_lazily() {
        let mut c = canvas(0.5);
        assert!(!c.has_valid_cache());

        let mut list = DrawList::new();
        c.paint(&mut list);
        assert!(c.has_valid_cache());
        assert!(matches!(
            list.commands()[0],
            DrawCommand::DrawImage {
                source_size: (50, 25),
                ..
            }
        ));

        c.set_zoom(0.25);
        assert!(!c.has_valid_cache());
        c.set_canvas_pixmap(RgbaImage::new(10, 10));
        assert!(!c.has_valid_cache());
    }

    #[test]
    fn test_invalid_zoom_ignored() {
        let mut c = canvas(0.5);
        c.set_zoom(0.0);
        c.set_zoom(f32::NAN);
        assert_eq!(c.zoom(), 0.5);
    }
}
