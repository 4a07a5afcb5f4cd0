//! Enemy behavior planner
//!
//! Each enemy runs a small timed state machine. A plan holds for its duration,
//! then a new one is rolled. Enemies that wander off the play area are forced
//! into a Rush back toward the player.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::{RollRange, Tuning};
use crate::unit_toward;

/// Categorical enemy behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Plan {
    /// Stand still
    #[default]
    Idle,
    /// Walk toward the player
    Seek,
    /// Short dash along a compass direction
    Patrol,
    /// Charge the player with a speed bonus
    Rush,
}

impl Plan {
    pub const ALL: [Plan; 4] = [Plan::Idle, Plan::Seek, Plan::Patrol, Plan::Rush];

    /// Seek and Rush chase a moving target and need a fresh velocity every frame
    pub fn tracks_target(self) -> bool {
        matches!(self, Plan::Seek | Plan::Rush)
    }
}

/// Patrol heading, clockwise from up (screen y points down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compass {
    #[default]
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::Up,
        Compass::UpRight,
        Compass::Right,
        Compass::DownRight,
        Compass::Down,
        Compass::DownLeft,
        Compass::Left,
        Compass::UpLeft,
    ];

    /// Unit direction vector
    pub fn unit(self) -> Vec2 {
        let raw = match self {
            Compass::Up => Vec2::new(0.0, -1.0),
            Compass::UpRight => Vec2::new(1.0, -1.0),
            Compass::Right => Vec2::new(1.0, 0.0),
            Compass::DownRight => Vec2::new(1.0, 1.0),
            Compass::Down => Vec2::new(0.0, 1.0),
            Compass::DownLeft => Vec2::new(-1.0, 1.0),
            Compass::Left => Vec2::new(-1.0, 0.0),
            Compass::UpLeft => Vec2::new(-1.0, -1.0),
        };
        raw.normalize()
    }
}

/// Per-enemy planner state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planner {
    pub plan: Plan,
    /// Only meaningful while `plan == Patrol`
    pub direction: Compass,
    /// Units per frame
    pub speed: f32,
    /// Velocity applied by generic movement
    pub velocity: Vec2,
    /// Sim time at which the current plan started
    pub started: Duration,
    pub duration: Duration,
    /// Velocity already computed for the current plan assignment
    pub plan_set: bool,
    /// Current plan was forced by leaving the play area
    pub forced_rush: bool,
}

impl Planner {
    pub fn new(now: Duration, tuning: &Tuning) -> Self {
        Self {
            plan: Plan::Idle,
            direction: Compass::Up,
            speed: 0.0,
            velocity: Vec2::ZERO,
            started: now,
            duration: Duration::from_millis(tuning.initial_plan_ms),
            plan_set: false,
            forced_rush: false,
        }
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.started) > self.duration
    }

    /// Roll a fresh plan, biased against repeating the current one
    pub fn reroll(&mut self, now: Duration, rng: &mut Pcg32, tuning: &Tuning) {
        let mut next = roll_plan(rng);
        let repeated = next == self.plan;
        if repeated {
            next = roll_plan(rng);
        }
        self.plan = next;

        if self.plan == Plan::Patrol {
            self.direction = Compass::ALL[rng.random_range(0..Compass::ALL.len())];
            self.duration = Duration::from_millis(tuning.patrol_plan_ms);
        } else {
            self.direction = Compass::Up;
            self.duration = Duration::from_millis(tuning.short_plan_ms);
        }

        self.speed = roll(rng, tuning.plan_speed) as f32;
        if self.plan == Plan::Rush {
            self.speed += tuning.rush_bonus;
            self.duration = Duration::from_millis(tuning.rush_plan_ms);
        }
        if repeated {
            self.duration = self.duration.max(Duration::from_millis(tuning.repeat_plan_ms));
        }

        self.started = now;
        self.plan_set = false;
        self.forced_rush = false;
        log::debug!(
            "plan rolled: {:?} dir={:?} speed={} for {:?}",
            self.plan,
            self.direction,
            self.speed,
            self.duration
        );
    }

    /// Force a fast Rush back toward the player
    pub fn force_rush(&mut self, now: Duration, rng: &mut Pcg32, tuning: &Tuning) {
        self.plan = Plan::Rush;
        self.speed = roll(rng, tuning.forced_rush_speed) as f32 + tuning.forced_rush_bonus;
        self.started = now;
        self.duration = Duration::from_secs(roll(rng, tuning.forced_rush_secs) as u64);
        self.plan_set = false;
        self.forced_rush = true;
    }

    /// Evaluate plan transitions, then refresh velocity
    ///
    /// `hitbox` is the enemy's current hitbox, `target` the player position and
    /// `screen` the visible play area.
    pub fn update(
        &mut self,
        hitbox: &Rect,
        target: Vec2,
        screen: Vec2,
        now: Duration,
        rng: &mut Pcg32,
        tuning: &Tuning,
    ) {
        if hitbox.is_outside_area(screen.x, screen.y) {
            let rushing = self.forced_rush && !self.is_expired(now);
            if !(tuning.rush_reentry_guard && rushing) {
                self.force_rush(now, rng, tuning);
            }
        } else if self.is_expired(now) {
            self.reroll(now, rng, tuning);
        }

        if self.plan_set && !self.plan.tracks_target() {
            return;
        }
        self.velocity = self.compute_velocity(hitbox.pos, target);
        self.plan_set = true;
    }

    fn compute_velocity(&self, pos: Vec2, target: Vec2) -> Vec2 {
        match self.plan {
            Plan::Idle => Vec2::ZERO,
            Plan::Seek | Plan::Rush => unit_toward(pos, target) * self.speed,
            Plan::Patrol => self.direction.unit() * self.speed,
        }
    }
}

fn roll_plan(rng: &mut Pcg32) -> Plan {
    Plan::ALL[rng.random_range(0..Plan::ALL.len())]
}

fn roll(rng: &mut Pcg32, range: RollRange) -> u32 {
    if range.is_empty() {
        return range.min;
    }
    rng.random_range(range.min..range.max)
}
