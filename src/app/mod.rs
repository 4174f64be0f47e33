//! Frame-loop driver and its collaborators.
//!
//! [`run`] owns the per-frame contract: what gets cleared, when the user
//! callback fires, what gets redrawn and in which order, and when the loop
//! ends. Window creation itself is a backend concern — anything
//! implementing [`Window`] + [`crate::render::Renderer`] can drive it.

mod clock;
mod driver;
mod window;

pub use clock::{Clock, WallClock};
pub use driver::{run, run_with_clock, FrameCtx, FrameStats};
pub use window::{Key, MouseButton, Window};

use crate::color::Color;
use crate::geometry::Vec2;

/// Settings read before the frame loop starts.
///
/// ```
/// use dabble::app::Config;
/// use dabble::color::Color;
///
/// let config = Config::new().with_size(800, 600).with_background(Color::TEAL);
/// assert_eq!(config.width(), 800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    width: i32,
    height: i32,
    background: Color,
}

impl Config {
    /// Defaults: 640×480 with a black background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 640,
            height: 480,
            background: Color::BLACK,
        }
    }

    /// Set the window size used when constructing the backend.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the backbuffer clear color.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Configured width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Configured height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Configured size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Configured background color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
