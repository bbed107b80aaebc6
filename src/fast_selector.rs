//! Lightweight selection overlay: a dimming mask outside the selection plus a frame.

use pixview_ui::{Bounds, Color, Paint, Painter};

use crate::constants::{FRAME_LINE_WIDTH, FRAME_LINE_WIDTH_MAX, MASK_ALPHA};
use crate::geometry::PixelRect;

/// Selection overlay geometry in scene coordinates.
///
/// Only holds what it was last given; the surface owns the actual selection.
#[derive(Debug, Clone, Default)]
pub struct FastSelector {
    visible: bool,
    mask: Vec<Bounds>,
    frame: Option<Bounds>,
    line_width: f32,
}

impl FastSelector {
    pub fn new() -> Self {
        Self {
            line_width: FRAME_LINE_WIDTH,
            ..Self::default()
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Recompute mask and frame for `selection` over `image_rect`.
    ///
    /// `scale` maps image pixels to scene pixels.
    pub fn draw_selection(&mut self, image_rect: PixelRect, selection: PixelRect, scale: f32) {
        self.mask.clear();
        self.frame = None;
        if selection.is_empty() || image_rect.is_empty() {
            return;
        }

        let img = image_rect.to_scene(scale);
        let sel = selection.intersect(&image_rect).to_scene(scale);

        let bands = [
            Bounds::new(img.x, img.y, img.width, sel.y - img.y),
            Bounds::new(img.x, sel.bottom(), img.width, img.bottom() - sel.bottom()),
            Bounds::new(img.x, sel.y, sel.x - img.x, sel.height),
            Bounds::new(sel.right(), sel.y, img.right() - sel.right(), sel.height),
        ];
        self.mask.extend(bands.into_iter().filter(|b| !b.is_empty()));

        // Frame thickens a little when zoomed in so it stays visible over large pixels
        self.line_width = (FRAME_LINE_WIDTH * scale).clamp(FRAME_LINE_WIDTH, FRAME_LINE_WIDTH_MAX);
        self.frame = Some(sel);
    }

    /// Dim rectangles covering the image outside the selection.
    pub fn mask(&self) -> &[Bounds] {
        &self.mask
    }

    pub fn frame(&self) -> Option<Bounds> {
        self.frame
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }
}

impl Paint for FastSelector {
    fn paint(&mut self, painter: &mut dyn Painter) {
        if !self.visible {
            return;
        }
        let Some(frame) = self.frame else {
            return;
        };

        let mask_color = Color::BLACK.with_alpha(MASK_ALPHA);
        for band in &self.mask {
            painter.fill_rect(*band, mask_color);
        }
        painter.stroke_rect(frame, Color::BLACK, self.line_width);
        let decor = frame.with_padding(self.line_width);
        if !decor.is_empty() {
            painter.stroke_rect(decor, Color::WHITE, self.line_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixview_ui::{DrawCommand, DrawList};

    #[test]
    fn test_mask_surrounds_selection() {
        let mut fs = FastSelector::new();
        fs.draw_selection(PixelRect::from_size(100, 100), PixelRect::new(10, 20, 30, 40), 2.0);

        assert_eq!(fs.frame(), Some(Bounds::new(20.0, 40.0, 60.0, 80.0)));
        assert_eq!(
            fs.mask(),
            &[
                Bounds::new(0.0, 0.0, 200.0, 40.0),
                Bounds::new(0.0, 120.0, 200.0, 80.0),
                Bounds::new(0.0, 40.0, 20.0, 80.0),
                Bounds::new(80.0, 40.0, 120.0, 80.0),
            ]
        );
    }

    #[test]
    fn test_full_selection_has_no_mask() {
        let mut fs = FastSelector::new();
        let image = PixelRect::from_size(50, 50);
        fs.draw_selection(image, image, 1.0);
        assert!(fs.mask().is_empty());
        assert!(fs.frame().is_some());
        assert_eq!(fs.line_width(), FRAME_LINE_WIDTH);
    }

    #[test]
    fn test_line_width_follows_zoom_within_limits() {
        let mut fs = FastSelector::new();
        let image = PixelRect::from_size(50, 50);
        let sel = PixelRect::new(5, 5, 10, 10);
        fs.draw_selection(image, sel, 2.0);
        assert_eq!(fs.line_width(), 2.0 * FRAME_LINE_WIDTH);
        fs.draw_selection(image, sel, 64.0);
        assert_eq!(fs.line_width(), FRAME_LINE_WIDTH_MAX);
        fs.draw_selection(image, sel, 0.25);
        assert_eq!(fs.line_width(), FRAME_LINE_WIDTH);
    }

    #[test]
    fn test_empty_selection_clears() {
        let mut fs = FastSelector::new();
        fs.draw_selection(PixelRect::from_size(50, 50), PixelRect::new(1, 1, 5, 5), 1.0);
        fs.draw_selection(PixelRect::from_size(50, 50), PixelRect::default(), 1.0);
        assert!(fs.mask().is_empty());
        assert_eq!(fs.frame(), None);
    }

    #[test]
    fn test_hidden_selector_paints_nothing() {
        let mut fs = FastSelector::new();
        fs.draw_selection(PixelRect::from_size(50, 50), PixelRect::new(1, 1, 5, 5), 1.0);

        let mut list = DrawList::new();
        fs.paint(&mut list);
        assert!(list.is_empty());

        fs.set_visible(true);
        fs.paint(&mut list);
        let strokes = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(strokes, 2);
    }
}
