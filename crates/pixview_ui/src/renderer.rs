//! Painting seam between widgets and the host renderer.
//!
//! Widgets describe what to draw through the [`Painter`] trait. The host
//! implements it on top of whatever backend it uses (GPU, software, toolkit
//! painter). [`DrawList`] is a recording painter, useful for hosts that
//! batch commands and for tests.

use image::RgbaImage;

use crate::layout::{Bounds, Point};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque gray from an 8-bit shade (0 = black, 255 = white).
    pub fn gray(shade: u8) -> Self {
        let v = shade as f32 / 255.0;
        Self::rgb(v, v, v)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// How an image is resampled when the destination size differs from its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Hard pixel edges, used when magnifying.
    #[default]
    Nearest,
    /// Smooth resampling.
    Linear,
}

/// A draw command recorded by [`DrawList`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Bounds,
        color: Color,
    },
    StrokeRect {
        rect: Bounds,
        color: Color,
        width: f32,
    },
    DrawImage {
        /// Source image dimensions
        source_size: (u32, u32),
        dest: Bounds,
        interpolation: Interpolation,
    },
}

/// Drawing primitives a widget needs from its host.
pub trait Painter {
    fn fill_rect(&mut self, rect: Bounds, color: Color);

    fn stroke_rect(&mut self, rect: Bounds, color: Color, width: f32);

    /// Draw `image` scaled into `dest`.
    fn draw_image(&mut self, image: &RgbaImage, dest: Bounds, interpolation: Interpolation);
}

/// Something that can paint itself (a render target in the scene).
pub trait Paint {
    fn paint(&mut self, painter: &mut dyn Painter);
}

/// A painter that records commands instead of executing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Painter for DrawList {
    fn fill_rect(&mut self, rect: Bounds, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Bounds, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Bounds, interpolation: Interpolation) {
        self.commands.push(DrawCommand::DrawImage {
            source_size: image.dimensions(),
            dest,
            interpolation,
        });
    }
}

/// Painter adapter that shifts everything by a fixed offset.
///
/// Lets a scene paint in its own coordinates while the host painter works in
/// widget-local ones.
pub struct Translate<'a> {
    inner: &'a mut dyn Painter,
    offset: Point,
}

impl<'a> Translate<'a> {
    pub fn new(inner: &'a mut dyn Painter, offset: Point) -> Self {
        Self { inner, offset }
    }
}

impl Painter for Translate<'_> {
    fn fill_rect(&mut self, rect: Bounds, color: Color) {
        self.inner.fill_rect(rect.translate(self.offset), color);
    }

    fn stroke_rect(&mut self, rect: Bounds, color: Color, width: f32) {
        self.inner
            .stroke_rect(rect.translate(self.offset), color, width);
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Bounds, interpolation: Interpolation) {
        self.inner
            .draw_image(image, dest.translate(self.offset), interpolation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.fill_rect(Bounds::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        list.draw_image(
            &RgbaImage::new(4, 2),
            Bounds::new(0.0, 0.0, 8.0, 4.0),
            Interpolation::Nearest,
        );

        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(
            list.commands()[1],
            DrawCommand::DrawImage {
                source_size: (4, 2),
                ..
            }
        ));

        let taken = list.take();
        assert_eq!(taken.len(), 2);
        assert!(list.is_empty());
    }

    #[test]
    fn test_gray_shade() {
        assert_eq!(Color::gray(255), Color::WHITE);
        assert_eq!(Color::gray(0), Color::BLACK);
    }

    #[test]
    fn test_translate_offsets_commands() {
        let mut list = DrawList::new();
        {
            let mut painter = Translate::new(&mut list, Point::new(10.0, -5.0));
            painter.fill_rect(Bounds::new(1.0, 2.0, 3.0, 4.0), Color::WHITE);
        }
        assert_eq!(
            list.commands(),
            &[DrawCommand::FillRect {
                rect: Bounds::new(11.0, -3.0, 3.0, 4.0),
                color: Color::WHITE,
            }]
        );
    }
}
