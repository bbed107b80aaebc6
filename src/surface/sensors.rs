//! Hit-test zones around the selection.

use pixview_ui::{Bounds, CursorShape, Point};

use crate::geometry::PixelRect;

/// Edge or corner of the selection being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeDirection {
    pub fn all() -> &'static [ResizeDirection] {
        &[
            ResizeDirection::TopLeft,
            ResizeDirection::Top,
            ResizeDirection::TopRight,
            ResizeDirection::Right,
            ResizeDirection::BottomRight,
            ResizeDirection::Bottom,
            ResizeDirection::BottomLeft,
            ResizeDirection::Left,
        ]
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            ResizeDirection::TopLeft
                | ResizeDirection::TopRight
                | ResizeDirection::BottomRight
                | ResizeDirection::BottomLeft
        )
    }

    pub fn cursor(&self) -> CursorShape {
        match self {
            ResizeDirection::TopLeft | ResizeDirection::BottomRight => {
                CursorShape::SizeForwardDiagonal
            }
            ResizeDirection::TopRight | ResizeDirection::BottomLeft => {
                CursorShape::SizeBackwardDiagonal
            }
            ResizeDirection::Top | ResizeDirection::Bottom => CursorShape::SizeVertical,
            ResizeDirection::Left | ResizeDirection::Right => CursorShape::SizeHorizontal,
        }
    }
}

/// What a press at a point would grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorHit {
    Resize(ResizeDirection),
    Move,
}

impl SensorHit {
    pub fn cursor(&self) -> CursorShape {
        match self {
            SensorHit::Resize(direction) => direction.cursor(),
            SensorHit::Move => CursorShape::SizeAll,
        }
    }
}

/// Hit-test rectangles in scene coordinates, rebuilt whenever the selection or zoom changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensors {
    center: Bounds,
    handles: Vec<(ResizeDirection, Bounds)>,
}

impl Sensors {
    /// Build sensors for `selection` at `zoom`. Returns `None` for an empty selection.
    ///
    /// `size` is the handle side length in scene pixels.
    pub fn new(selection: PixelRect, zoom: f32, size: f32) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }
        let r = selection.to_scene(zoom);
        let s = size.max(1.0);
        let half = s / 2.0;
        let inner_w = (r.width - s).max(0.0);
        let inner_h = (r.height - s).max(0.0);

        let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());

        // Corners first so they win where handles overlap on small selections
        let handles = vec![
            (ResizeDirection::BottomRight, Bounds::new(x1 - half, y1 - half, s, s)),
            (ResizeDirection::TopLeft, Bounds::new(x0 - half, y0 - half, s, s)),
            (ResizeDirection::TopRight, Bounds::new(x1 - half, y0 - half, s, s)),
            (ResizeDirection::BottomLeft, Bounds::new(x0 - half, y1 - half, s, s)),
            (ResizeDirection::Top, Bounds::new(x0 + half, y0 - half, inner_w, s)),
            (ResizeDirection::Right, Bounds::new(x1 - half, y0 + half, s, inner_h)),
            (ResizeDirection::Bottom, Bounds::new(x0 + half, y1 - half, inner_w, s)),
            (ResizeDirection::Left, Bounds::new(x0 - half, y0 + half, s, inner_h)),
        ];

        Some(Self { center: r, handles })
    }

    /// What a press at `scene` would grab, if anything.
    pub fn hit(&self, scene: Point) -> Option<SensorHit> {
        self.handles
            .iter()
            .find(|(_, zone)| !zone.is_empty() && zone.contains(scene))
            .map(|(direction, _)| SensorHit::Resize(*direction))
            .or_else(|| self.center.contains(scene).then_some(SensorHit::Move))
    }

    pub fn center(&self) -> Bounds {
        self.center
    }

    pub fn handle(&self, direction: ResizeDirection) -> Option<Bounds> {
        self.handles
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, zone)| *zone)
    }
}
