//! Shape registry and redraw ordering.
//!
//! A [`Scene`] owns every live shape in one ordered arena. Insertion order
//! is redraw order; ids are stable for the life of the scene (removal
//! tombstones the slot instead of shifting). The scene is plain data passed
//! explicitly to the frame driver — there are no process-wide registries.

use crate::color::Color;
use crate::geometry::{Rect, Vec2};
use crate::render::Renderer;
use crate::shape::{LoadState, RectBinding, Shape, ShapeKind, DEFAULT_IMAGE_SIZE};

/// Stable handle to a shape in a [`Scene`].
///
/// Returned by [`Scene::insert`]; stays valid (or dangles detectably as
/// `None`) no matter what is inserted or removed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

impl ShapeId {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    const fn index(self) -> usize {
        self.0
    }
}

/// Destination bounds resolution for an image draw.
enum ImageDest {
    Bounds(Rect),
    CreateDefault,
    Missing,
}

/// Ordered collection of live shapes, redrawn front-to-back every frame.
#[derive(Debug, Default)]
pub struct Scene {
    slots: Vec<Option<Shape>>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named shape. The returned id allows later mutation through
    /// [`Scene::get_mut`] (or indexing); insertion order fixes the redraw
    /// order.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        self.slots.push(Some(shape));
        ShapeId::from_index(self.slots.len() - 1)
    }

    /// Add an anonymous one-shot shape: it is owned by the scene and never
    /// exposed for mutation.
    fn insert_anonymous(&mut self, shape: Shape) {
        self.slots.push(Some(shape));
    }

    /// Remove a shape. Every other id stays valid.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    /// Borrow a shape by id. `None` when the shape was removed.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutably borrow a shape by id. `None` when the shape was removed.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the scene holds no live shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register an anonymous point.
    pub fn point(&mut self, pos: impl Into<Vec2>, color: Color) {
        self.insert_anonymous(Shape::point(pos).with_color(color));
    }

    /// Register an anonymous line.
    pub fn line(&mut self, start: impl Into<Vec2>, end: impl Into<Vec2>, color: Color) {
        self.insert_anonymous(Shape::line(start, end).with_color(color));
    }

    /// Register an anonymous filled triangle.
    pub fn triangle(
        &mut self,
        first: impl Into<Vec2>,
        second: impl Into<Vec2>,
        third: impl Into<Vec2>,
        color: Color,
    ) {
        self.insert_anonymous(Shape::triangle(first, second, third).with_color(color));
    }

    /// Register an anonymous triangle outline.
    pub fn outline_triangle(
        &mut self,
        first: impl Into<Vec2>,
        second: impl Into<Vec2>,
        third: impl Into<Vec2>,
        color: Color,
    ) {
        self.insert_anonymous(Shape::outline_triangle(first, second, third).with_color(color));
    }

    /// Register an anonymous filled rectangle.
    pub fn rectangle(&mut self, pos: impl Into<Vec2>, width: i32, height: i32, color: Color) {
        self.insert_anonymous(Shape::rectangle(pos, width, height).with_color(color));
    }

    /// Register an anonymous rectangle outline.
    pub fn outline_rectangle(
        &mut self,
        pos: impl Into<Vec2>,
        width: i32,
        height: i32,
        color: Color,
    ) {
        self.insert_anonymous(Shape::outline_rectangle(pos, width, height).with_color(color));
    }

    /// Register an anonymous filled circle.
    pub fn circle(&mut self, pos: impl Into<Vec2>, radius: i32, color: Color) {
        self.insert_anonymous(Shape::circle(pos, radius).with_color(color));
    }

    /// Register an anonymous circle outline.
    pub fn outline_circle(&mut self, pos: impl Into<Vec2>, radius: i32, color: Color) {
        self.insert_anonymous(Shape::outline_circle(pos, radius).with_color(color));
    }

    /// Draw every visible shape in insertion order.
    ///
    /// Hidden shapes are skipped without losing their place. Image load
    /// failures are logged and the image marked failed; they never abort
    /// the pass. `viewport` sizes the default rectangle an unbound image
    /// creates on its first draw.
    pub fn draw_all<R: Renderer>(&mut self, out: &mut R, viewport: Vec2) {
        for index in 0..self.slots.len() {
            let is_image = match &self.slots[index] {
                Some(shape) if !shape.hidden() => {
                    matches!(shape.kind(), ShapeKind::Image(_))
                }
                _ => continue,
            };

            if is_image {
                self.draw_image_at(index, out, viewport);
            } else if let Some(shape) = &self.slots[index] {
                shape.draw_primitive(out);
            }
        }
    }

    /// Bounds of the rectangle shape behind `id`, if it still exists.
    ///
    /// A hidden rectangle still reports bounds: hiding suppresses only its
    /// own outline, not shapes that follow it.
    fn rect_bounds(&self, id: ShapeId) -> Option<Rect> {
        match self.get(id)?.kind() {
            ShapeKind::Rectangle { pos, dim, .. } | ShapeKind::OutlineRectangle { pos, dim, .. } => {
                Some(Rect::from_pos_dim(*pos, *dim))
            }
            _ => None,
        }
    }

    fn draw_image_at<R: Renderer>(&mut self, index: usize, out: &mut R, viewport: Vec2) {
        // Resolve destination bounds first: a borrowed rect lives in
        // another slot, so this needs the scene immutably.
        let dest = {
            let Some(shape) = &self.slots[index] else {
                return;
            };
            let ShapeKind::Image(image) = shape.kind() else {
                return;
            };
            match image.binding() {
                RectBinding::Owned(rect) => ImageDest::Bounds(*rect),
                RectBinding::Unset => ImageDest::CreateDefault,
                RectBinding::Borrowed(id) => match self.rect_bounds(*id) {
                    Some(rect) => ImageDest::Bounds(rect),
                    None => ImageDest::Missing,
                },
            }
        };

        let Some(shape) = self.slots[index].as_mut() else {
            return;
        };
        let Some(image) = shape.as_image_mut() else {
            return;
        };

        let dest = match dest {
            ImageDest::Bounds(rect) => rect,
            ImageDest::CreateDefault => {
                let rect = Rect::centered_in(viewport, DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE);
                image.bind_owned(rect);
                rect
            }
            ImageDest::Missing => {
                log::warn!(
                    "image {:?} follows a rectangle that is no longer in the scene; skipping",
                    image.path()
                );
                return;
            }
        };

        if *image.load_state() == LoadState::Unloaded {
            match out.load_texture(image.path(), image.color_key()) {
                Ok(texture) => image.mark_loaded(texture),
                Err(err) => {
                    log::warn!("image load failed: {err}");
                    image.mark_failed(err.to_string());
                }
            }
        }

        if let LoadState::Loaded(texture) = *image.load_state() {
            out.blit(texture, dest);
        }
    }
}

impl std::ops::Index<ShapeId> for Scene {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        self.get(id).expect("shape was removed from the scene")
    }
}

impl std::ops::IndexMut<ShapeId> for Scene {
    fn index_mut(&mut self, id: ShapeId) -> &mut Shape {
        self.get_mut(id).expect("shape was removed from the scene")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::render::TextureId;
    use std::path::{Path, PathBuf};

    const VIEWPORT: Vec2 = Vec2::new(640, 480);

    /// Records which shape draws reach the renderer, in order.
    #[derive(Default)]
    struct Recorder {
        color_sets: Vec<Color>,
        loads: Vec<PathBuf>,
        blits: Vec<(TextureId, Rect)>,
        fail_loads: bool,
    }

    impl Renderer for Recorder {
        fn set_draw_color(&mut self, color: Color) {
            self.color_sets.push(color);
        }

        fn draw_point(&mut self, _x: i32, _y: i32) {}
        fn draw_line(&mut self, _x1: i32, _y1: i32, _x2: i32, _y2: i32) {}
        fn fill_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32) {}
        fn draw_rect_outline(&mut self, _x: i32, _y: i32, _w: i32, _h: i32) {}

        fn load_texture(&mut self, path: &Path, _key: Option<Color>) -> Result<TextureId> {
            if self.fail_loads {
                return Err(Error::TextureLoad {
                    path: path.to_path_buf(),
                    reason: "scripted failure".into(),
                });
            }
            self.loads.push(path.to_path_buf());
            Ok(TextureId(self.loads.len() as u32 - 1))
        }

        fn blit(&mut self, texture: TextureId, dest: Rect) {
            self.blits.push((texture, dest));
        }
    }

    #[test]
    fn test_insertion_order_is_redraw_order() {
        let mut scene = Scene::new();
        scene.insert(Shape::rectangle((0, 0), 1, 1).with_color(Color::RED));
        scene.circle((5, 5), 2, Color::GREEN);
        scene.insert(Shape::point((9, 9)).with_color(Color::BLUE));

        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);

        assert_eq!(out.color_sets, vec![Color::RED, Color::GREEN, Color::BLUE]);
    }

    #[test]
    fn test_ids_stay_valid_after_removal() {
        let mut scene = Scene::new();
        let a = scene.insert(Shape::point((0, 0)));
        let b = scene.insert(Shape::point((1, 1)));
        let c = scene.insert(Shape::point((2, 2)));

        assert!(scene.remove(b).is_some());
        assert!(scene.remove(b).is_none());

        assert!(scene.get(a).is_some());
        assert!(scene.get(b).is_none());
        assert!(scene.get(c).is_some());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_hidden_shape_skipped_but_keeps_position() {
        let mut scene = Scene::new();
        let a = scene.insert(Shape::point((0, 0)).with_color(Color::RED));
        let b = scene.insert(Shape::point((1, 1)).with_color(Color::GREEN));
        let _ = a;

        scene[b].hide();
        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);
        assert_eq!(out.color_sets, vec![Color::RED]);

        scene[b].show();
        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);
        assert_eq!(out.color_sets, vec![Color::RED, Color::GREEN]);
    }

    #[test]
    fn test_anonymous_shapes_are_not_addressable() {
        let mut scene = Scene::new();
        scene.line((0, 0), (5, 5), Color::WHITE);
        assert_eq!(scene.len(), 1);
        // The only handle-producing entry point is `insert`.
    }

    #[test]
    fn test_unbound_image_creates_centered_default_rect() {
        let mut scene = Scene::new();
        let img = scene.insert(Shape::image("sprite.png"));

        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);

        let expected = Rect::new(270, 190, 100, 100);
        assert_eq!(out.blits, vec![(TextureId(0), expected)]);
        assert_eq!(
            *scene[img].as_image().unwrap().binding(),
            RectBinding::Owned(expected)
        );
    }

    #[test]
    fn test_followed_rect_drives_image_bounds() {
        let mut scene = Scene::new();
        let rect = scene.insert(Shape::outline_rectangle((100, 100), 200, 300));
        let img = scene.insert(Shape::image_following("sprite.png", rect));

        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);
        assert_eq!(out.blits.last().unwrap().1, Rect::new(100, 100, 200, 300));

        // Move the rectangle; the image tracks it with no further load.
        scene[rect].translate(Vec2::new(0, -10));
        scene.draw_all(&mut out, VIEWPORT);
        assert_eq!(out.blits.last().unwrap().1, Rect::new(100, 90, 200, 300));
        assert_eq!(out.loads.len(), 1);
        let _ = img;
    }

    #[test]
    fn test_hidden_followed_rect_still_positions_image() {
        let mut scene = Scene::new();
        let rect = scene.insert(Shape::outline_rectangle((10, 10), 50, 50));
        scene.insert(Shape::image_following("sprite.png", rect));
        scene[rect].hide();

        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);

        // The rectangle outline is suppressed, the image is not.
        assert!(out.color_sets.is_empty());
        assert_eq!(out.blits.len(), 1);
        assert_eq!(out.blits[0].1, Rect::new(10, 10, 50, 50));
    }

    #[test]
    fn test_dangling_follow_skips_draw() {
        let mut scene = Scene::new();
        let rect = scene.insert(Shape::outline_rectangle((0, 0), 10, 10));
        let img = scene.insert(Shape::image_following("sprite.png", rect));
        scene.remove(rect);

        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);

        assert!(out.blits.is_empty());
        // Not a load failure: the image never even attempted one.
        assert_eq!(*scene[img].as_image().unwrap().load_state(), LoadState::Unloaded);
    }

    #[test]
    fn test_failed_load_marks_image_and_never_retries() {
        let mut scene = Scene::new();
        let img = scene.insert(Shape::image_with_rect("missing.png", (0, 0), 10, 10));

        let mut out = Recorder::default();
        out.fail_loads = true;
        scene.draw_all(&mut out, VIEWPORT);
        scene.draw_all(&mut out, VIEWPORT);

        assert!(out.blits.is_empty());
        match scene[img].as_image().unwrap().load_state() {
            LoadState::Failed(reason) => assert!(reason.contains("scripted failure")),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_loaded_image_blits_every_frame_without_reload() {
        let mut scene = Scene::new();
        scene.insert(Shape::image_with_rect("sprite.png", (5, 5), 20, 20));

        let mut out = Recorder::default();
        scene.draw_all(&mut out, VIEWPORT);
        scene.draw_all(&mut out, VIEWPORT);
        scene.draw_all(&mut out, VIEWPORT);

        assert_eq!(out.loads.len(), 1);
        assert_eq!(out.blits.len(), 3);
    }

    #[test]
    #[should_panic(expected = "removed")]
    fn test_indexing_removed_shape_panics() {
        let mut scene = Scene::new();
        let id = scene.insert(Shape::point((0, 0)));
        scene.remove(id);
        let _ = &scene[id];
    }
}
