//! Image-space geometry.
//!
//! Selections live in integer image pixels. A [`PixelRect`] has exclusive
//! right/bottom edges, so a rect covering a whole 800x600 image is
//! `(0, 0, 800, 600)` and its right edge is 800.

use pixview_ui::Bounds;

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in image pixel coordinates.
///
/// An empty rect (zero width or height) means "no selection".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin with the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(width), clamp(height))
    }

    /// Build a rect from its four edges. Crossed edges are swapped.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (l, r) = (left.min(right), left.max(right));
        let (t, b) = (top.min(bottom), top.max(bottom));
        Self::new(l, t, r.saturating_sub(l), b.saturating_sub(t))
    }

    /// Rect spanned by two opposite corners, in any order.
    pub fn from_points(a: PixelPoint, b: PixelPoint) -> Self {
        Self::from_edges(a.x, a.y, b.x, b.y)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn top_left(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Same rect with non-negative width and height.
    pub fn normalized(&self) -> Self {
        Self::from_edges(self.left(), self.top(), self.right(), self.bottom())
    }

    /// Check if a pixel lies inside the rect.
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rect.
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap of two rects. Returns an empty default rect when they don't overlap.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let a = self.normalized();
        let b = other.normalized();
        let left = a.left().max(b.left());
        let top = a.top().max(b.top());
        let right = a.right().min(b.right());
        let bottom = a.bottom().min(b.bottom());

        if right <= left || bottom <= top {
            PixelRect::default()
        } else {
            PixelRect::new(
                left,
                top,
                right.saturating_sub(left),
                bottom.saturating_sub(top),
            )
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> PixelRect {
        PixelRect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Shift the rect (without resizing) so it lies inside `bounds`.
    ///
    /// A rect larger than `bounds` is clipped instead.
    pub fn shifted_within(&self, bounds: &PixelRect) -> PixelRect {
        if self.width > bounds.width || self.height > bounds.height {
            return self.intersect(bounds);
        }
        let x = self
            .x
            .clamp(bounds.left(), bounds.right().saturating_sub(self.width));
        let y = self
            .y
            .clamp(bounds.top(), bounds.bottom().saturating_sub(self.height));
        PixelRect::new(x, y, self.width, self.height)
    }

    /// Scale into scene (view pixel) coordinates.
    pub fn to_scene(&self, scale: f32) -> Bounds {
        Bounds::new(
            self.x as f32 * scale,
            self.y as f32 * scale,
            self.width as f32 * scale,
            self.height as f32 * scale,
        )
    }
}

/// The corner of a rect that stays fixed while its size is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Corner a rect grows away from, given which side of the anchor the moving point is on.
    pub fn from_growth(grows_right: bool, grows_down: bool) -> Self {
        match (grows_right, grows_down) {
            (true, true) => Corner::TopLeft,
            (false, true) => Corner::TopRight,
            (false, false) => Corner::BottomRight,
            (true, false) => Corner::BottomLeft,
        }
    }

    fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Which dimension is kept when a rect is forced to an aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectDriver {
    /// Keep the width, derive the height
    Width,
    /// Keep the height, derive the width
    Height,
    /// Keep whichever dimension gives the larger rect
    Dominant,
}

/// Check if a `width x height` rect has `ratio` (width / height) up to one pixel of rounding.
pub fn matches_aspect(width: i32, height: i32, ratio: f32) -> bool {
    (width as f32 - height as f32 * ratio).abs() <= ratio.max(1.0)
}

/// Force `rect` to the aspect ratio `ratio` (width / height), keeping `anchor`
/// fixed and staying inside `bounds`.
///
/// Empty rects, non-positive ratios and rects that already match are returned unchanged.
pub fn conform_aspect(
    rect: PixelRect,
    ratio: f32,
    anchor: Corner,
    driver: AspectDriver,
    bounds: &PixelRect,
) -> PixelRect {
    if rect.is_empty() || !(ratio.is_finite() && ratio > 0.0) {
        return rect;
    }
    if matches_aspect(rect.width, rect.height, ratio) && bounds.contains_rect(&rect) {
        return rect;
    }

    let ax = if anchor.is_left() { rect.left() } else { rect.right() };
    let ay = if anchor.is_top() { rect.top() } else { rect.bottom() };
    let avail_w = if anchor.is_left() {
        bounds.right().saturating_sub(ax)
    } else {
        ax.saturating_sub(bounds.left())
    }
    .max(0);
    let avail_h = if anchor.is_top() {
        bounds.bottom().saturating_sub(ay)
    } else {
        ay.saturating_sub(bounds.top())
    }
    .max(0);

    let height_from = |w: i32| (w as f32 / ratio).round() as i32;
    let width_from = |h: i32| (h as f32 * ratio).round() as i32;

    let keep_width = match driver {
        AspectDriver::Width => true,
        AspectDriver::Height => false,
        AspectDriver::Dominant => rect.width as f32 >= rect.height as f32 * ratio,
    };
    let (mut w, mut h) = if keep_width {
        (rect.width, height_from(rect.width))
    } else {
        (width_from(rect.height), rect.height)
    };

    if w > avail_w {
        w = avail_w;
        h = height_from(w);
    }
    if h > avail_h {
        h = avail_h;
        w = width_from(h).min(avail_w);
    }

    let x = if anchor.is_left() { ax } else { ax.saturating_sub(w) };
    let y = if anchor.is_top() { ay } else { ay.saturating_sub(h) };
    PixelRect::new(x, y, w, h)
}
