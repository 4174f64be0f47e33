//! The frame loop.
//!
//! Per iteration: poll events, check the exit conditions (window close or
//! escape), clear the backbuffer, hand the callback a [`FrameCtx`] with the
//! elapsed time, redraw the scene in insertion order, present. An
//! exponentially smoothed average FPS is kept purely as an exit diagnostic.

use crate::app::clock::{Clock, WallClock};
use crate::app::window::{Key, MouseButton, Window};
use crate::app::Config;
use crate::color::Color;
use crate::error::Result;
use crate::geometry::Vec2;
use crate::render::{primitives, Renderer};
use crate::scene::Scene;

/// Elapsed values at or below this are treated as a timer glitch when
/// computing the FPS diagnostic.
const MIN_MEASURABLE_ELAPSED: f64 = 1e-7;

/// Summary returned when the frame loop exits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Number of frames that ran to completion.
    pub frames: u64,
    /// Exponentially smoothed average FPS (`avg = (avg + inst) / 2` per
    /// frame). Diagnostic only.
    pub avg_fps: f64,
}

/// Per-frame context handed to the loop callback.
///
/// Bundles the elapsed time, the scene (for mutating named shapes), input
/// queries, and immediate-mode drawing that bypasses the scene entirely —
/// the draws land on the current frame only and register nothing.
pub struct FrameCtx<'a, B: Window + Renderer> {
    backend: &'a mut B,
    scene: &'a mut Scene,
    elapsed: f64,
}

impl<B: Window + Renderer> FrameCtx<'_, B> {
    /// Seconds since the previous frame started.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The scene, for mutating named shapes in place.
    pub fn scene(&mut self) -> &mut Scene {
        self.scene
    }

    /// Current drawable size.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.backend.size()
    }

    /// Whether a key is currently held down.
    #[must_use]
    pub fn key_down(&self, key: Key) -> bool {
        self.backend.is_key_down(key)
    }

    /// Current mouse position.
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.backend.mouse_position()
    }

    /// Whether a mouse button is currently held down.
    #[must_use]
    pub fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.backend.is_mouse_button_down(button)
    }

    /// Draw a point this frame only.
    pub fn point(&mut self, pos: impl Into<Vec2>, color: Color) {
        primitives::draw_point(self.backend, pos.into(), color);
    }

    /// Draw a line this frame only.
    pub fn line(&mut self, start: impl Into<Vec2>, end: impl Into<Vec2>, color: Color) {
        primitives::draw_line(self.backend, start.into(), end.into(), color);
    }

    /// Draw a filled triangle this frame only.
    pub fn triangle(
        &mut self,
        first: impl Into<Vec2>,
        second: impl Into<Vec2>,
        third: impl Into<Vec2>,
        color: Color,
    ) {
        primitives::draw_triangle(self.backend, first.into(), second.into(), third.into(), color);
    }

    /// Draw a triangle outline this frame only.
    pub fn outline_triangle(
        &mut self,
        first: impl Into<Vec2>,
        second: impl Into<Vec2>,
        third: impl Into<Vec2>,
        color: Color,
    ) {
        primitives::draw_triangle_outline(
            self.backend,
            first.into(),
            second.into(),
            third.into(),
            color,
        );
    }

    /// Draw a filled rectangle this frame only.
    pub fn rectangle(&mut self, pos: impl Into<Vec2>, width: i32, height: i32, color: Color) {
        primitives::draw_rect(self.backend, pos.into(), width, height, color);
    }

    /// Draw a rectangle outline this frame only.
    pub fn outline_rectangle(
        &mut self,
        pos: impl Into<Vec2>,
        width: i32,
        height: i32,
        color: Color,
    ) {
        primitives::draw_rect_outline(self.backend, pos.into(), width, height, color);
    }

    /// Draw a filled circle this frame only.
    pub fn circle(&mut self, pos: impl Into<Vec2>, radius: i32, color: Color) {
        primitives::draw_circle(self.backend, pos.into(), radius, color);
    }

    /// Draw a circle outline this frame only.
    pub fn outline_circle(&mut self, pos: impl Into<Vec2>, radius: i32, color: Color) {
        primitives::draw_circle_outline(self.backend, pos.into(), radius, color);
    }
}

/// Run the frame loop until the window closes or escape is pressed.
///
/// The callback runs after the clear and before the scene redraw, so
/// immediate draws appear under the registered shapes. Its second argument
/// is the elapsed seconds since the previous frame (also available as
/// [`FrameCtx::elapsed`]).
///
/// # Errors
///
/// Currently infallible at the loop level; backend construction failures
/// surface before this is called.
pub fn run<B, F>(config: &Config, backend: &mut B, scene: &mut Scene, callback: F) -> Result<FrameStats>
where
    B: Window + Renderer,
    F: FnMut(&mut FrameCtx<'_, B>, f64),
{
    run_with_clock(config, backend, scene, &mut WallClock::new(), callback)
}

/// [`run`] with an injected elapsed-time source, for deterministic tests.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_clock<B, C, F>(
    config: &Config,
    backend: &mut B,
    scene: &mut Scene,
    clock: &mut C,
    mut callback: F,
) -> Result<FrameStats>
where
    B: Window + Renderer,
    C: Clock,
    F: FnMut(&mut FrameCtx<'_, B>, f64),
{
    let viewport = backend.size();
    let mut avg_fps = 0.0_f64;
    let mut frames = 0_u64;

    loop {
        backend.poll_events();
        if backend.close_requested() || backend.is_key_down(Key::Escape) {
            break;
        }

        let elapsed = clock.elapsed_since_last_call();
        let instantaneous = if elapsed <= MIN_MEASURABLE_ELAPSED {
            999.0
        } else {
            1.0 / elapsed
        };
        avg_fps = (avg_fps + instantaneous) / 2.0;

        backend.clear(config.background());

        let mut ctx = FrameCtx {
            backend: &mut *backend,
            scene: &mut *scene,
            elapsed,
        };
        callback(&mut ctx, elapsed);

        scene.draw_all(backend, viewport);
        backend.present();
        frames += 1;
    }

    log::info!("frame loop exited after {frames} frames, average fps {avg_fps:.1}");

    Ok(FrameStats { frames, avg_fps })
}
