//! # Dabble
//!
//! A small 2D drawing library for beginners: construct shapes, mutate them
//! frame-by-frame, and let the frame loop redraw everything for you.
//!
//! Everything draws through two backend-agnostic traits —
//! [`render::Renderer`] for draw calls and [`app::Window`] for events — so
//! the same program runs against a hardware backend or the bundled
//! headless [`render::software::SoftwareRenderer`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dabble::prelude::*;
//!
//! let mut scene = Scene::new();
//! let ball = scene.insert(Shape::circle((320, 240), 40).with_color(Color::AMBER));
//!
//! // `backend` is anything implementing Window + Renderer.
//! app::run(&Config::new(), &mut backend, &mut scene, move |ctx, elapsed| {
//!     if ctx.key_down(Key::Right) {
//!         ctx.scene()[ball].translate(Vec2::new((elapsed * 120.0) as i32, 0));
//!     }
//! })?;
//! ```
//!
//! ## Model
//!
//! - **Named shapes** are inserted into a [`scene::Scene`] and mutated later
//!   through their [`scene::ShapeId`]; insertion order is redraw order.
//! - **Anonymous shapes** come from the lowercase scene methods
//!   (`scene.circle(...)`) — one-shot registrations that are never exposed
//!   for mutation.
//! - **Immediate draws** happen inside the frame callback through
//!   [`app::FrameCtx`], bypassing the scene entirely.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// ============================================================================
// Core Modules
// ============================================================================

/// Frame-loop driver, configuration, and windowing collaborators.
pub mod app;

/// RGBA color value type and named palette.
pub mod color;

/// Pixel buffer backing the software renderer.
pub mod framebuffer;

/// Integer points and rectangles.
pub mod geometry;

/// Rendering collaborators and rasterization algorithms.
pub mod render;

/// Shape registry and redraw ordering.
pub mod scene;

/// Shape model: primitives and images.
pub mod shape;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for dabble operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use dabble::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{
        self, Clock, Config, FrameCtx, FrameStats, Key, MouseButton, WallClock, Window,
    };
    pub use crate::color::Color;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Rect, Vec2};
    pub use crate::render::software::SoftwareRenderer;
    pub use crate::render::{Renderer, TextureId};
    pub use crate::scene::{Scene, ShapeId};
    pub use crate::shape::{Image, LoadState, RectBinding, Shape, ShapeKind};
}
