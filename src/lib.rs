//! The Cold Killer - a top-down arcade shooter core
//!
//! Core modules:
//! - `sim`: Simulation (entities, enemy planner, swept collisions, stages)
//! - `session`: Screen flow around the simulation (start, countdown, game over, win)
//! - `renderer`: Turns game state into sprite draw commands
//! - `platform`: Capability surface of the host (input, drawing, sound, clock)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod autopilot;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::{Screen, Session};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Target frame rate; one simulation tick per rendered frame
    pub const TARGET_FPS: u32 = 60;
    /// Duration of one frame at the target rate
    pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TARGET_FPS as u64);

    /// Player id is fixed; the registry hands out ids from 1 onward
    pub const PLAYER_ID: u32 = 0;
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Size the spawn point is centered for (the hero sprite)
    pub const PLAYER_SPRITE_SIZE: f32 = 100.0;

    pub const ENEMY_SIZE: f32 = 100.0;
    pub const BULLET_SIZE: f32 = 10.0;
    pub const CORPSE_SIZE: f32 = 100.0;

    /// Button sprite frame
    pub const BUTTON_WIDTH: f32 = 220.0;
    pub const BUTTON_HEIGHT: f32 = 100.0;
    /// Vertical distance between button frames in the sprite sheet
    pub const BUTTON_FRAME_STRIDE: f32 = 110.0;

    /// Speed at or above which a rushing enemy is drawn enraged
    pub const ENRAGED_SPEED: f32 = 30.0;
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Vec2 {
    safe_normalize(to - from)
}

/// Normalize by Euclidean length; zero (or non-finite) input yields zero
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    if !v.is_finite() {
        return Vec2::ZERO;
    }
    v.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Angle of `v` in degrees, in [0, 360), measured with screen y pointing down
#[inline]
pub fn screen_angle_degrees(v: Vec2) -> f32 {
    let angle = v.y.atan2(v.x).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}
