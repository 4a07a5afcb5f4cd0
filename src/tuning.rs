//! Data-driven game balance
//!
//! Defaults reproduce the shipped balance. A JSON file can override any subset
//! of fields; missing fields fall back to the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Half-open integer range `[min, max)` for uniform rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: u32,
    pub max: u32,
}

impl RollRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }
}

/// Balance knobs for the whole game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Number of stages to clear for a win
    pub stage_count: u32,
    /// Countdown shown before each stage (ms)
    pub countdown_ms: u64,
    /// Play area used when the host cannot report one
    pub fallback_screen: (f32, f32),

    // === Player ===
    /// Units per frame, split across pressed direction keys
    pub player_speed: f32,
    /// Minimum time between accepted shots (ms)
    pub fire_cooldown_ms: u64,

    // === Bullets ===
    /// Units per frame
    pub bullet_speed: f32,
    /// Bullets whose top-left leaves [0, bound] on either axis are culled
    pub bullet_cull_bound: f32,

    // === Spawning ===
    /// Minimum distance between an enemy center and the player spawn point
    pub min_spawn_distance: f32,
    /// Rejection sampling attempts before keeping the farthest candidate
    pub spawn_attempts: u32,

    // === Enemy planner ===
    /// Plan duration for a freshly spawned enemy (ms)
    pub initial_plan_ms: u64,
    /// Idle and Seek plan duration (ms)
    pub short_plan_ms: u64,
    /// Patrol dash duration (ms)
    pub patrol_plan_ms: u64,
    /// Rush plan duration when rolled normally (ms)
    pub rush_plan_ms: u64,
    /// Duration assigned when the same plan was rolled twice (ms)
    pub repeat_plan_ms: u64,
    /// Speed roll for regular plans
    pub plan_speed: RollRange,
    /// Added to the speed roll for a regular Rush
    pub rush_bonus: f32,
    /// Speed roll for a forced Rush
    pub forced_rush_speed: RollRange,
    /// Added to the forced Rush speed roll
    pub forced_rush_bonus: f32,
    /// Forced Rush duration roll, in whole seconds
    pub forced_rush_secs: RollRange,
    /// Only force a new Rush when the previous forced Rush has expired
    pub rush_reentry_guard: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            stage_count: 15,
            countdown_ms: 1000,
            fallback_screen: (1920.0, 1080.0),

            player_speed: 15.0,
            fire_cooldown_ms: 200,

            bullet_speed: 100.0,
            bullet_cull_bound: 5000.0,

            min_spawn_distance: 1000.0,
            spawn_attempts: 10_000,

            initial_plan_ms: 100,
            short_plan_ms: 50,
            patrol_plan_ms: 500,
            rush_plan_ms: 500,
            repeat_plan_ms: 1000,
            plan_speed: RollRange::new(5, 20),
            rush_bonus: 5.0,
            forced_rush_speed: RollRange::new(5, 10),
            forced_rush_bonus: 25.0,
            forced_rush_secs: RollRange::new(1, 4),
            rush_reentry_guard: true,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.stage_count == 0 {
            return Err(invalid("stage_count", "must be at least 1"));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(invalid("player_speed", "must be finite and non-negative"));
        }
        if !(self.bullet_speed.is_finite() && self.bullet_speed > 0.0) {
            return Err(invalid("bullet_speed", "must be finite and positive"));
        }
        if !(self.bullet_cull_bound.is_finite() && self.bullet_cull_bound > 0.0) {
            return Err(invalid("bullet_cull_bound", "must be finite and positive"));
        }
        if self.spawn_attempts == 0 {
            return Err(invalid("spawn_attempts", "must be at least 1"));
        }
        let (w, h) = self.fallback_screen;
        if !(w > 0.0 && h > 0.0) {
            return Err(invalid("fallback_screen", "both dimensions must be positive"));
        }
        for (field, range) in [
            ("plan_speed", self.plan_speed),
            ("forced_rush_speed", self.forced_rush_speed),
            ("forced_rush_secs", self.forced_rush_secs),
        ] {
            if range.is_empty() {
                return Err(invalid(
                    field,
                    format!("empty range {}..{}", range.min, range.max),
                ));
            }
        }
        Ok(())
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }
}
