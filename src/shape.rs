//! Shape model: geometry + color bundles that know how to rasterize
//! themselves.
//!
//! A [`Shape`] is a visibility flag around a [`ShapeKind`] — a tagged enum
//! covering every drawable primitive plus textured images. Keeping the
//! variants in one enum (rather than a trait-object hierarchy) lets the
//! scene dispatch with an exhaustive `match` and lets callbacks mutate
//! geometry through plain pattern matching.

use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::geometry::{Rect, Vec2};
use crate::render::{primitives, Renderer, TextureId};
use crate::scene::ShapeId;

/// Side length of the rectangle an image creates for itself when drawn
/// without explicit bounds.
pub(crate) const DEFAULT_IMAGE_SIZE: i32 = 100;

/// A drawable shape: a primitive (or image) plus a visibility flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    hidden: bool,
}

/// Every primitive the scene can draw, each owning its geometry and color.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// A single pixel.
    Point {
        /// Position.
        pos: Vec2,
        /// Draw color.
        color: Color,
    },
    /// A line segment; endpoint order is irrelevant.
    Line {
        /// First endpoint.
        start: Vec2,
        /// Second endpoint.
        end: Vec2,
        /// Draw color.
        color: Color,
    },
    /// A filled triangle.
    Triangle {
        /// First vertex.
        first: Vec2,
        /// Second vertex.
        second: Vec2,
        /// Third vertex.
        third: Vec2,
        /// Fill color.
        color: Color,
    },
    /// A triangle outline.
    OutlineTriangle {
        /// First vertex.
        first: Vec2,
        /// Second vertex.
        second: Vec2,
        /// Third vertex.
        third: Vec2,
        /// Stroke color.
        color: Color,
    },
    /// A filled axis-aligned rectangle.
    Rectangle {
        /// Top-left corner.
        pos: Vec2,
        /// Width and height.
        dim: Vec2,
        /// Fill color.
        color: Color,
    },
    /// An axis-aligned rectangle outline.
    OutlineRectangle {
        /// Top-left corner.
        pos: Vec2,
        /// Width and height.
        dim: Vec2,
        /// Stroke color.
        color: Color,
    },
    /// A filled circle.
    Circle {
        /// Center.
        pos: Vec2,
        /// Radius in pixels; zero draws nothing.
        radius: i32,
        /// Fill color.
        color: Color,
    },
    /// A circle outline.
    OutlineCircle {
        /// Center.
        pos: Vec2,
        /// Radius in pixels; zero draws nothing.
        radius: i32,
        /// Stroke color.
        color: Color,
    },
    /// A textured rectangle; see [`Image`].
    Image(Image),
}

impl Shape {
    fn from_kind(kind: ShapeKind) -> Self {
        Self {
            kind,
            hidden: false,
        }
    }

    /// A single pixel, default color (opaque white).
    pub fn point(pos: impl Into<Vec2>) -> Self {
        Self::from_kind(ShapeKind::Point {
            pos: pos.into(),
            color: Color::default(),
        })
    }

    /// A line segment, default color.
    pub fn line(start: impl Into<Vec2>, end: impl Into<Vec2>) -> Self {
        Self::from_kind(ShapeKind::Line {
            start: start.into(),
            end: end.into(),
            color: Color::default(),
        })
    }

    /// A filled triangle, default color.
    pub fn triangle(
        first: impl Into<Vec2>,
        second: impl Into<Vec2>,
        third: impl Into<Vec2>,
    ) -> Self {
        Self::from_kind(ShapeKind::Triangle {
            first: first.into(),
            second: second.into(),
            third: third.into(),
            color: Color::default(),
        })
    }

    /// A triangle outline, default color.
    pub fn outline_triangle(
        first: impl Into<Vec2>,
        second: impl Into<Vec2>,
        third: impl Into<Vec2>,
    ) -> Self {
        Self::from_kind(ShapeKind::OutlineTriangle {
            first: first.into(),
            second: second.into(),
            third: third.into(),
            color: Color::default(),
        })
    }

    /// A filled rectangle, default color.
    pub fn rectangle(pos: impl Into<Vec2>, width: i32, height: i32) -> Self {
        Self::from_kind(ShapeKind::Rectangle {
            pos: pos.into(),
            dim: Vec2::new(width, height),
            color: Color::default(),
        })
    }

    /// A rectangle outline, default color.
    pub fn outline_rectangle(pos: impl Into<Vec2>, width: i32, height: i32) -> Self {
        Self::from_kind(ShapeKind::OutlineRectangle {
            pos: pos.into(),
            dim: Vec2::new(width, height),
            color: Color::default(),
        })
    }

    /// A filled circle, default color.
    pub fn circle(pos: impl Into<Vec2>, radius: i32) -> Self {
        Self::from_kind(ShapeKind::Circle {
            pos: pos.into(),
            radius,
            color: Color::default(),
        })
    }

    /// A circle outline, default color.
    pub fn outline_circle(pos: impl Into<Vec2>, radius: i32) -> Self {
        Self::from_kind(ShapeKind::OutlineCircle {
            pos: pos.into(),
            radius,
            color: Color::default(),
        })
    }

    /// An image with no bounds yet: the first draw creates an owned
    /// 100×100 rectangle centered in the viewport.
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::from_kind(ShapeKind::Image(Image::new(path.into())))
    }

    /// An image with explicit owned bounds.
    pub fn image_with_rect(path: impl Into<PathBuf>, pos: impl Into<Vec2>, width: i32, height: i32) -> Self {
        let pos = pos.into();
        Self::from_kind(ShapeKind::Image(Image::with_rect(
            path.into(),
            Rect::new(pos.x, pos.y, width, height),
        )))
    }

    /// An image that follows a rectangle shape living in the scene: its
    /// drawn bounds track that rectangle every frame.
    pub fn image_following(path: impl Into<PathBuf>, rect: ShapeId) -> Self {
        Self::from_kind(ShapeKind::Image(Image::following(path.into(), rect)))
    }

    /// Set the color, builder-style. Has no effect on images (they have no
    /// fill color; use [`Image::set_color_key`] for transparency).
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        if let Some(c) = self.color_mut() {
            *c = color;
        }
        self
    }

    /// The shape kind.
    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Mutable access to the kind, for matching on geometry fields.
    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    /// Stop drawing this shape. It keeps its place in the scene.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Resume drawing this shape.
    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// Whether the shape is currently hidden.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// The shape's color, or `None` for images.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match &self.kind {
            ShapeKind::Point { color, .. }
            | ShapeKind::Line { color, .. }
            | ShapeKind::Triangle { color, .. }
            | ShapeKind::OutlineTriangle { color, .. }
            | ShapeKind::Rectangle { color, .. }
            | ShapeKind::OutlineRectangle { color, .. }
            | ShapeKind::Circle { color, .. }
            | ShapeKind::OutlineCircle { color, .. } => Some(*color),
            ShapeKind::Image(_) => None,
        }
    }

    /// Mutable access to the shape's color, or `None` for images.
    pub fn color_mut(&mut self) -> Option<&mut Color> {
        match &mut self.kind {
            ShapeKind::Point { color, .. }
            | ShapeKind::Line { color, .. }
            | ShapeKind::Triangle { color, .. }
            | ShapeKind::OutlineTriangle { color, .. }
            | ShapeKind::Rectangle { color, .. }
            | ShapeKind::OutlineRectangle { color, .. }
            | ShapeKind::Circle { color, .. }
            | ShapeKind::OutlineCircle { color, .. } => Some(color),
            ShapeKind::Image(_) => None,
        }
    }

    /// Move the shape by a delta. Every stored point shifts; images only
    /// move when they own their rectangle.
    pub fn translate(&mut self, delta: Vec2) {
        match &mut self.kind {
            ShapeKind::Point { pos, .. }
            | ShapeKind::Rectangle { pos, .. }
            | ShapeKind::OutlineRectangle { pos, .. }
            | ShapeKind::Circle { pos, .. }
            | ShapeKind::OutlineCircle { pos, .. } => *pos += delta,
            ShapeKind::Line { start, end, .. } => {
                *start += delta;
                *end += delta;
            }
            ShapeKind::Triangle {
                first,
                second,
                third,
                ..
            }
            | ShapeKind::OutlineTriangle {
                first,
                second,
                third,
                ..
            } => {
                *first += delta;
                *second += delta;
                *third += delta;
            }
            ShapeKind::Image(image) => {
                if let RectBinding::Owned(rect) = &mut image.binding {
                    rect.x += delta.x;
                    rect.y += delta.y;
                }
            }
        }
    }

    /// The image payload, if this shape is one.
    #[must_use]
    pub fn as_image(&self) -> Option<&Image> {
        match &self.kind {
            ShapeKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Mutable image payload, if this shape is one.
    pub fn as_image_mut(&mut self) -> Option<&mut Image> {
        match &mut self.kind {
            ShapeKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Rasterize a non-image shape. Images need scene context (rect
    /// resolution and load state) and are drawn by `Scene::draw_all`.
    pub(crate) fn draw_primitive<R: Renderer>(&self, out: &mut R) {
        match &self.kind {
            ShapeKind::Point { pos, color } => primitives::draw_point(out, *pos, *color),
            ShapeKind::Line { start, end, color } => {
                primitives::draw_line(out, *start, *end, *color);
            }
            ShapeKind::Triangle {
                first,
                second,
                third,
                color,
            } => primitives::draw_triangle(out, *first, *second, *third, *color),
            ShapeKind::OutlineTriangle {
                first,
                second,
                third,
                color,
            } => primitives::draw_triangle_outline(out, *first, *second, *third, *color),
            ShapeKind::Rectangle { pos, dim, color } => {
                primitives::draw_rect(out, *pos, dim.x, dim.y, *color);
            }
            ShapeKind::OutlineRectangle { pos, dim, color } => {
                primitives::draw_rect_outline(out, *pos, dim.x, dim.y, *color);
            }
            ShapeKind::Circle { pos, radius, color } => {
                primitives::draw_circle(out, *pos, *radius, *color);
            }
            ShapeKind::OutlineCircle { pos, radius, color } => {
                primitives::draw_circle_outline(out, *pos, *radius, *color);
            }
            ShapeKind::Image(_) => {}
        }
    }
}

/// How an [`Image`] obtains its destination rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RectBinding {
    /// No bounds yet; the first draw creates an owned centered rectangle.
    Unset,
    /// The image owns its rectangle; it is dropped with the image.
    Owned(Rect),
    /// The image follows a rectangle shape in the scene, without owning it.
    Borrowed(ShapeId),
}

/// Load progress of an [`Image`]'s pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not loaded yet; the first draw triggers the load.
    Unloaded,
    /// Loaded and memoized — later draws only blit.
    Loaded(TextureId),
    /// The load failed; it is not retried. Holds the failure reason.
    Failed(String),
}

/// A textured rectangle.
///
/// Pixel data is loaded lazily on the first draw and memoized: a successful
/// load is never repeated, a failed load is never retried. The destination
/// rectangle is either owned or borrowed from the scene (see
/// [`RectBinding`]); following a scene rectangle makes the image track its
/// position and size every frame at no extra cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    path: PathBuf,
    color_key: Option<Color>,
    binding: RectBinding,
    state: LoadState,
}

impl Image {
    fn base(path: PathBuf, binding: RectBinding) -> Self {
        Self {
            path,
            color_key: None,
            binding,
            state: LoadState::Unloaded,
        }
    }

    pub(crate) fn new(path: PathBuf) -> Self {
        Self::base(path, RectBinding::Unset)
    }

    pub(crate) fn with_rect(path: PathBuf, rect: Rect) -> Self {
        Self::base(path, RectBinding::Owned(rect))
    }

    pub(crate) fn following(path: PathBuf, rect: ShapeId) -> Self {
        Self::base(path, RectBinding::Borrowed(rect))
    }

    /// The file the pixel data is (or will be) loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change the source path. Only effective before the first successful
    /// load; once loaded the texture is never reloaded.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// The chroma-key color treated as transparent, if any.
    #[must_use]
    pub fn color_key(&self) -> Option<Color> {
        self.color_key
    }

    /// Set or clear the chroma-key color. Only effective before the first
    /// successful load.
    pub fn set_color_key(&mut self, key: Option<Color>) {
        self.color_key = key;
    }

    /// Follow a rectangle shape in the scene. Any owned rectangle is
    /// released immediately; repeated calls retarget.
    pub fn follow(&mut self, rect: ShapeId) {
        self.binding = RectBinding::Borrowed(rect);
    }

    /// The current rectangle binding.
    #[must_use]
    pub fn binding(&self) -> &RectBinding {
        &self.binding
    }

    /// The current load state.
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub(crate) fn bind_owned(&mut self, rect: Rect) {
        self.binding = RectBinding::Owned(rect);
    }

    pub(crate) fn mark_loaded(&mut self, texture: TextureId) {
        self.state = LoadState::Loaded(texture);
    }

    pub(crate) fn mark_failed(&mut self, reason: String) {
        self.state = LoadState::Failed(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_is_white() {
        let shape = Shape::circle((10, 10), 5);
        assert_eq!(shape.color(), Some(Color::WHITE));
    }

    #[test]
    fn test_with_color_builder() {
        let shape = Shape::rectangle((0, 0), 10, 10).with_color(Color::RED);
        assert_eq!(shape.color(), Some(Color::RED));
    }

    #[test]
    fn test_color_round_trip_after_mutation() {
        let mut shape = Shape::triangle((0, 0), (5, 0), (0, 5));
        *shape.color_mut().unwrap() = Color::new(1, 2, 3, 4);
        assert_eq!(shape.color(), Some(Color::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_hide_show_idempotent() {
        let mut shape = Shape::point((1, 1));
        assert!(!shape.hidden());
        shape.hide();
        shape.hide();
        assert!(shape.hidden());
        shape.show();
        shape.show();
        assert!(!shape.hidden());
    }

    #[test]
    fn test_translate_moves_every_vertex() {
        let mut shape = Shape::triangle((0, 0), (10, 0), (5, 8));
        shape.translate(Vec2::new(3, -2));
        match shape.kind() {
            ShapeKind::Triangle {
                first,
                second,
                third,
                ..
            } => {
                assert_eq!(*first, Vec2::new(3, -2));
                assert_eq!(*second, Vec2::new(13, -2));
                assert_eq!(*third, Vec2::new(8, 6));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_geometry_mutation_through_kind() {
        let mut shape = Shape::circle((50, 50), 10);
        if let ShapeKind::Circle { radius, .. } = shape.kind_mut() {
            *radius -= 4;
        }
        match shape.kind() {
            ShapeKind::Circle { radius, .. } => assert_eq!(*radius, 6),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_image_has_no_color() {
        let mut shape = Shape::image("media/sprite.png");
        assert_eq!(shape.color(), None);
        assert!(shape.color_mut().is_none());
    }

    #[test]
    fn test_image_starts_unloaded_and_unbound() {
        let shape = Shape::image("media/sprite.png");
        let image = shape.as_image().unwrap();
        assert_eq!(*image.binding(), RectBinding::Unset);
        assert_eq!(*image.load_state(), LoadState::Unloaded);
        assert_eq!(image.color_key(), None);
    }

    #[test]
    fn test_image_follow_releases_owned_rect() {
        let mut shape = Shape::image_with_rect("media/sprite.png", (10, 10), 64, 64);
        let image = shape.as_image_mut().unwrap();
        assert!(matches!(image.binding(), RectBinding::Owned(_)));

        let target = ShapeId::from_index(3);
        image.follow(target);
        assert_eq!(*image.binding(), RectBinding::Borrowed(target));
    }

    #[test]
    fn test_image_translate_only_moves_owned_rect() {
        let mut owned = Shape::image_with_rect("a.png", (10, 10), 64, 64);
        owned.translate(Vec2::new(5, 5));
        match owned.as_image().unwrap().binding() {
            RectBinding::Owned(rect) => assert_eq!(rect.pos(), Vec2::new(15, 15)),
            other => panic!("unexpected binding {other:?}"),
        }

        let mut borrowed = Shape::image_following("a.png", ShapeId::from_index(0));
        borrowed.translate(Vec2::new(5, 5));
        assert_eq!(
            *borrowed.as_image().unwrap().binding(),
            RectBinding::Borrowed(ShapeId::from_index(0))
        );
    }
}
