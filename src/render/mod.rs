//! Rendering collaborators and rasterization.
//!
//! The crate draws through the [`Renderer`] trait rather than a concrete
//! backend: the rasterizer in [`primitives`] converts shapes into trait
//! calls, and [`software::SoftwareRenderer`] is the bundled headless
//! implementation. Hardware backends (SDL, wgpu, ...) plug in by
//! implementing the same trait.
//!
//! # Algorithms
//!
//! - **Bresenham's line** (software backend)
//! - **Dual-edge scanline fill** for triangles
//! - **Midpoint circle**, filled via horizontal spans or outlined via 8-way
//!   symmetric points
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital
//!   plotter."

pub mod primitives;
pub mod software;

use std::path::Path;

use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;

/// Opaque handle to a texture owned by a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(
    /// Backend-assigned texture index.
    pub u32,
);

/// Drawing capabilities the crate consumes from a backend.
///
/// The contract mirrors a classic immediate-mode 2D renderer: a current
/// draw color plus point/line/rect primitives, and texture load + blit for
/// images. Implementations decide what "present to screen" means; this
/// trait is only about issuing draws.
pub trait Renderer {
    /// Set the color used by subsequent point/line/rect calls.
    fn set_draw_color(&mut self, color: Color);

    /// Plot a single pixel in the current draw color.
    fn draw_point(&mut self, x: i32, y: i32);

    /// Draw a line segment in the current draw color.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Fill an axis-aligned rectangle in the current draw color.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draw a one-pixel rectangle outline in the current draw color.
    fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Load a texture from disk, treating pixels matching `color_key` (if
    /// any) as fully transparent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TextureLoad`] when the file is missing or
    /// cannot be decoded.
    fn load_texture(&mut self, path: &Path, color_key: Option<Color>) -> Result<TextureId>;

    /// Copy a previously loaded texture into `dest`, scaling as needed.
    fn blit(&mut self, texture: TextureId, dest: Rect);
}
