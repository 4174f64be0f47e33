//! Window and input collaborator.
//!
//! The frame driver consumes windowing through this trait so it can run
//! against a real backend (SDL, winit, ...) or a scripted stand-in in
//! tests. The crate itself never creates windows; constructing a backend —
//! and failing with [`crate::Error::WindowInit`] when that is impossible —
//! is the implementor's job.

use crate::color::Color;
use crate::geometry::Vec2;

/// Keys the frame loop and callbacks can query.
///
/// Letters and digits go through [`Key::Char`] (lowercase by convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The escape key; pressing it ends the frame loop.
    Escape,
    /// The return/enter key.
    Return,
    /// The space bar.
    Space,
    /// The tab key.
    Tab,
    /// Backspace.
    Backspace,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// A character key, e.g. `Key::Char('h')`.
    Char(char),
}

/// Mouse buttons the callbacks can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Right button.
    Right,
    /// Middle button (wheel click).
    Middle,
}

/// Windowing capabilities the frame driver consumes.
///
/// One backend type usually implements both this and
/// [`crate::render::Renderer`].
pub trait Window {
    /// Current drawable size in pixels.
    fn size(&self) -> Vec2;

    /// Drain pending window events. Called once at the top of every frame.
    fn poll_events(&mut self);

    /// Whether the user asked to close the window.
    fn close_requested(&self) -> bool;

    /// Whether a key is currently held down.
    fn is_key_down(&self, key: Key) -> bool;

    /// Current mouse position in window coordinates.
    fn mouse_position(&self) -> Vec2;

    /// Whether a mouse button is currently held down.
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Clear the backbuffer to a solid color.
    fn clear(&mut self, color: Color);

    /// Present the backbuffer to the screen.
    fn present(&mut self);
}
