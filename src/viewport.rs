//! The visible window onto the zoomed image (the "scene").
//!
//! Scene coordinates are view pixels over the whole zoomed image, with the
//! image's top-left corner at the origin. Local coordinates are relative to
//! the widget's visible area. When the scene is smaller than the viewport it
//! is centered, and the centering offset is applied between the two.

use pixview_ui::{Point, Size};

/// Scroll state of the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    size: Size,
    scene_size: Size,
    scroll: Point,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Visible area size.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width.max(0.0), size.height.max(0.0));
        self.clamp_scroll();
    }

    pub fn scene_size(&self) -> Size {
        self.scene_size
    }

    pub fn set_scene_size(&mut self, size: Size) {
        self.scene_size = size;
        self.clamp_scroll();
    }

    /// Current scroll offset in scene pixels.
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Largest scroll offset on each axis.
    pub fn max_scroll(&self) -> Point {
        Point::new(
            (self.scene_size.width - self.size.width).max(0.0),
            (self.scene_size.height - self.size.height).max(0.0),
        )
    }

    /// Set the scroll offset (clamped). Returns `true` if it changed.
    pub fn set_scroll(&mut self, scroll: Point) -> bool {
        let max = self.max_scroll();
        let clamped = Point::new(scroll.x.clamp(0.0, max.x), scroll.y.clamp(0.0, max.y));
        let changed = clamped != self.scroll;
        self.scroll = clamped;
        changed
    }

    /// Scroll by a delta (clamped). Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) -> bool {
        self.set_scroll(Point::new(self.scroll.x + dx, self.scroll.y + dy))
    }

    fn clamp_scroll(&mut self) {
        let scroll = self.scroll;
        self.set_scroll(scroll);
    }

    /// Offset of the scene inside the viewport when the scene is smaller.
    pub fn centering_offset(&self) -> Point {
        Point::new(
            ((self.size.width - self.scene_size.width) / 2.0).max(0.0),
            ((self.size.height - self.scene_size.height) / 2.0).max(0.0),
        )
    }

    /// Convert a viewport-local position to scene coordinates.
    pub fn to_scene(&self, local: Point) -> Point {
        local - self.centering_offset() + self.scroll
    }

    /// Convert a scene position to viewport-local coordinates.
    pub fn to_local(&self, scene: Point) -> Point {
        scene - self.scroll + self.centering_offset()
    }

    /// Auto-scroll direction for a pointer at `local`: -1, 0 or 1 per axis.
    ///
    /// A pointer within `margin` of an edge (or outside the viewport) points
    /// towards that edge. An unsized viewport has no edges.
    pub fn edge_direction(&self, local: Point, margin: f32) -> (i32, i32) {
        if self.size.is_empty() {
            return (0, 0);
        }
        let axis = |pos: f32, extent: f32| {
            if pos < margin {
                -1
            } else if pos > extent - margin {
                1
            } else {
                0
            }
        };
        (axis(local.x, self.size.width), axis(local.y, self.size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        let mut vp = Viewport::new(Size::new(200.0, 100.0));
        vp.set_scene_size(Size::new(800.0, 600.0));
        vp
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = viewport();
        assert!(vp.set_scroll(Point::new(10_000.0, -50.0)));
        assert_eq!(vp.scroll(), Point::new(600.0, 0.0));
        assert!(!vp.scroll_by(100.0, 0.0));
    }

    #[test]
    fn test_scene_round_trip() {
        let mut vp = viewport();
        vp.set_scroll(Point::new(120.0, 30.0));
        let local = Point::new(15.0, 25.0);
        let scene = vp.to_scene(local);
        assert_eq!(scene, Point::new(135.0, 55.0));
        assert_eq!(vp.to_local(scene), local);
    }

    #[test]
    fn test_small_scene_is_centered() {
        let mut vp = Viewport::new(Size::new(200.0, 100.0));
        vp.set_scene_size(Size::new(100.0, 50.0));
        assert_eq!(vp.centering_offset(), Point::new(50.0, 25.0));
        assert_eq!(vp.to_scene(Point::new(50.0, 25.0)), Point::zero());
        assert_eq!(vp.max_scroll(), Point::zero());
    }

    #[test]
    fn test_shrinking_scene_reclamps_scroll() {
        let mut vp = viewport();
        vp.set_scroll(Point::new(600.0, 500.0));
        vp.set_scene_size(Size::new(300.0, 150.0));
        assert_eq!(vp.scroll(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_edge_direction() {
        let vp = viewport();
        assert_eq!(vp.edge_direction(Point::new(100.0, 50.0), 16.0), (0, 0));
        assert_eq!(vp.edge_direction(Point::new(5.0, 50.0), 16.0), (-1, 0));
        assert_eq!(vp.edge_direction(Point::new(195.0, 95.0), 16.0), (1, 1));
        assert_eq!(vp.edge_direction(Point::new(100.0, -20.0), 16.0), (0, -1));
    }

    #[test]
    fn test_unsized_viewport_never_autoscrolls() {
        let mut vp = Viewport::default();
        vp.set_scene_size(Size::new(800.0, 600.0));
        assert_eq!(vp.edge_direction(Point::new(5.0, 5.0), 16.0), (0, 0));
        assert_eq!(vp.edge_direction(Point::new(-50.0, 900.0), 16.0), (0, 0));
    }
}
