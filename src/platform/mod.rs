//! Platform abstraction layer
//!
//! Everything the game needs from its host:
//! - Time (monotonic clock)
//! - Pointer and keyboard input
//! - Sprite drawing and sound playback
//! - Close requests

pub mod headless;

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::renderer::Sprite;
use crate::sim::DirectionKeys;

pub use headless::HeadlessPlatform;

/// Host capabilities polled and driven once per frame
pub trait Platform {
    /// Pointer position in screen coordinates
    fn pointer_position(&self) -> Vec2;
    /// Primary button went down this frame
    fn pointer_pressed(&self) -> bool;
    /// Primary button is held
    fn pointer_down(&self) -> bool;
    /// Primary button went up this frame
    fn pointer_released(&self) -> bool;
    /// W/A/S/D state
    fn direction_keys(&self) -> DirectionKeys;
    /// Visible area; `None` when the host cannot tell
    fn screen_size(&self) -> Option<Vec2>;

    fn draw_sprite(&mut self, sprite: Sprite);
    /// Overlay text; hosts without a font may ignore it
    fn draw_text(&mut self, _text: &str, _pos: Vec2, _size: f32) {}

    fn play_sound(&mut self, sound: SoundEffect);
    fn stop_sound(&mut self, sound: SoundEffect);
    fn is_sound_playing(&self, sound: SoundEffect) -> bool;

    /// Host asked to quit
    fn should_close(&self) -> bool;

    fn begin_frame(&mut self) {}
    fn end_frame(&mut self) {}
}

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Fixed-step clock advanced by the caller, for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    now: Duration,
    step: Duration,
}

impl FrameClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }

    /// Move forward one step and return the new time
    pub fn advance(&mut self) -> Duration {
        self.now += self.step;
        self.now
    }

    pub fn advance_by(&mut self, by: Duration) -> Duration {
        self.now += by;
        self.now
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(crate::consts::FRAME_DURATION)
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Duration {
        self.now
    }
}
