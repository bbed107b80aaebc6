//! Notifications sent to the embedding application.

use std::path::PathBuf;

use image::Rgba;

use crate::geometry::PixelPoint;

/// A notification emitted by the widget.
///
/// Subscribe with [`crate::ImageView::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The user asked for the next image in the collection.
    NeedNextImage,
    /// The user asked for the previous image in the collection.
    NeedPrevImage,
    /// The user asked for the first image in the collection.
    NeedFirstImage,
    /// The user asked for the last image in the collection.
    NeedLastImage,
    /// The zoom factor changed.
    ZoomChanged,
    /// The selection rectangle changed.
    SelectionChanged,
    /// The hovered pixel changed (or the pointer left the image).
    PixelInfo,
    /// A single image file was dropped on the widget. Decoding is up to the application.
    ImageDropped(PathBuf),
}

/// The pixel under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelInfo {
    pub position: PixelPoint,
    pub color: Rgba<u8>,
    /// Whether the image has an alpha channel at all
    pub has_alpha: bool,
}
