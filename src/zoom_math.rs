//! Zoom-to-cursor mathematics.
//!
//! Pure functions for zoom clamping, stepping and keeping an image point
//! fixed under the cursor, kept separate from the widget for testability.

use pixview_ui::{Point, Size};

/// Clamp a requested zoom into `[min, max]`.
///
/// Returns `None` for NaN or infinite input so callers can keep their
/// previous (valid) zoom.
pub fn clamp_zoom(zoom: f32, min: f32, max: f32) -> Option<f32> {
    if !zoom.is_finite() {
        return None;
    }
    let min = if min.is_finite() && min > 0.0 {
        min
    } else {
        crate::constants::ZOOM_MIN
    };
    let max = max.max(min);
    Some(zoom.clamp(min, max))
}

/// Zoom after `notches` wheel steps of `step` each (negative notches zoom out).
pub fn step_zoom(zoom: f32, step: f32, notches: f32) -> f32 {
    zoom * step.powf(notches)
}

/// Zoom that fits the whole image inside the view.
///
/// Returns `None` if either size is empty.
pub fn fit_zoom(image: Size, view: Size) -> Option<f32> {
    if image.is_empty() || view.is_empty() {
        return None;
    }
    let image_aspect = image.width / image.height;
    let view_aspect = view.width / view.height;

    if image_aspect > view_aspect {
        Some(view.width / image.width)
    } else {
        Some(view.height / image.height)
    }
}

/// Image-space point under a scene position.
pub fn scene_to_image(scene: Point, zoom: f32) -> Point {
    Point::new(scene.x / zoom, scene.y / zoom)
}

/// Scroll offset that puts `image_point` under the viewport position `anchor`
/// after zooming to `new_zoom`.
///
/// `centering` is the offset of the scene inside the viewport (non-zero only
/// when the scene is smaller than the viewport).
pub fn anchored_scroll(anchor: Point, image_point: Point, new_zoom: f32, centering: Point) -> Point {
    Point::new(
        image_point.x * new_zoom - (anchor.x - centering.x),
        image_point.y * new_zoom - (anchor.y - centering.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_clamp_zoom_bounds() {
        assert_eq!(clamp_zoom(100.0, 0.1, 10.0), Some(10.0));
        assert_eq!(clamp_zoom(0.01, 0.1, 10.0), Some(0.1));
        assert_eq!(clamp_zoom(2.0, 0.1, 10.0), Some(2.0));
    }

    #[test]
    fn test_clamp_zoom_never_non_positive() {
        assert_eq!(clamp_zoom(0.0, 0.1, 10.0), Some(0.1));
        assert_eq!(clamp_zoom(-5.0, 0.1, 10.0), Some(0.1));
        // A broken minimum still yields a positive zoom
        let z = clamp_zoom(-1.0, 0.0, 10.0).unwrap();
        assert!(z > 0.0);
    }

    #[test]
    fn test_clamp_zoom_rejects_nan() {
        assert_eq!(clamp_zoom(f32::NAN, 0.1, 10.0), None);
        assert_eq!(clamp_zoom(f32::INFINITY, 0.1, 10.0), None);
    }

    #[test]
    fn test_step_zoom_round_trip() {
        let z = step_zoom(1.0, 1.25, 1.0);
        assert!(approx_eq(z, 1.25));
        assert!(approx_eq(step_zoom(z, 1.25, -1.0), 1.0));
    }

    #[test]
    fn test_fit_zoom_wide_image() {
        let z = fit_zoom(Size::new(800.0, 200.0), Size::new(400.0, 400.0)).unwrap();
        assert!(approx_eq(z, 0.5));
    }

    #[test]
    fn test_fit_zoom_tall_image() {
        let z = fit_zoom(Size::new(100.0, 800.0), Size::new(400.0, 400.0)).unwrap();
        assert!(approx_eq(z, 0.5));
    }

    #[test]
    fn test_fit_zoom_empty() {
        assert_eq!(fit_zoom(Size::zero(), Size::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_anchored_scroll_preserves_cursor_point() {
        let zoom = 1.0;
        let scroll = Point::new(30.0, 40.0);
        let anchor = Point::new(100.0, 50.0);

        let image_point = scene_to_image(anchor + scroll, zoom);
        let new_zoom = 2.0;
        let new_scroll = anchored_scroll(anchor, image_point, new_zoom, Point::zero());

        let after = scene_to_image(anchor + new_scroll, new_zoom);
        assert!(approx_eq(after.x, image_point.x));
        assert!(approx_eq(after.y, image_point.y));
    }
}
