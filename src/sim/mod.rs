//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of host concerns:
//! - Time arrives as an input value, never read from the system
//! - Seeded RNG only
//! - Stable iteration order (ascending entity id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod planner;
pub mod registry;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{Rect, bullet_hits, segment_intersects_rect, segments_cross};
pub use planner::{Compass, Plan, Planner};
pub use registry::{Identified, Registry};
pub use stage::{has_won_stage, restart, start_stage, try_fire};
pub use state::{
    Bullet, Corpse, DeathCause, DirectionKeys, Enemy, Entity, Facing, GameEvent, GamePhase,
    GameState, Player,
};
pub use tick::{TickInput, tick};
