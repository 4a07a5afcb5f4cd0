//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], passed by
//! reference into each tick. Several states can coexist (tests rely on it).

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::planner::Planner;
use super::registry::{Identified, Registry};
use crate::consts::*;
use crate::tuning::Tuning;

/// Simulation phase within a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities move and collide
    Playing,
    /// No enemies left in the registry
    StageClear,
    /// Player touched an enemy or left the play area
    PlayerDead,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Enemy { enemy_id: u32 },
    OutOfBounds,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot { bullet_id: u32 },
    EnemyKilled { enemy_id: u32, bullet_id: u32, corpse_id: u32, at: Vec2 },
    BulletCulled { bullet_id: u32 },
    PlayerDied { cause: DeathCause },
    StageCleared { stage: u32 },
}

/// Which way the hero sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Front,
    Right,
    Back,
    Left,
}

impl Facing {
    /// Facing toward a screen angle in degrees, [0, 360)
    ///
    /// 45..135 is below the player, 135..225 left, 225..315 above, else right.
    pub fn from_degrees(angle: f32) -> Self {
        if (45.0..135.0).contains(&angle) {
            Facing::Front
        } else if (135.0..225.0).contains(&angle) {
            Facing::Left
        } else if (225.0..315.0).contains(&angle) {
            Facing::Back
        } else {
            Facing::Right
        }
    }
}

/// Directional movement keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
}

impl DirectionKeys {
    pub fn pressed_count(&self) -> u32 {
        [self.up, self.left, self.down, self.right]
            .iter()
            .filter(|&&k| k)
            .count() as u32
    }
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    /// Units per frame, split evenly across pressed keys
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            id: PLAYER_ID,
            pos,
            speed,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Apply one frame of keyboard movement
    ///
    /// Each pressed key moves `speed / pressed` along its axis. With no keys
    /// held nothing moves.
    pub fn apply_keys(&mut self, keys: DirectionKeys) {
        let pressed = keys.pressed_count();
        if pressed == 0 {
            return;
        }
        let step = self.speed / pressed as f32;

        if keys.up {
            self.pos.y -= step;
        }
        if keys.left {
            self.pos.x -= step;
        }
        if keys.down {
            self.pos.y += step;
        }
        if keys.right {
            self.pos.x += step;
        }
    }
}

/// A hostile actor driven by its planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub planner: Planner,
}

impl Enemy {
    pub fn new(pos: Vec2, now: Duration, tuning: &Tuning) -> Self {
        Self {
            id: 0,
            pos,
            planner: Planner::new(now, tuning),
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(ENEMY_SIZE))
    }
}

/// A projectile with a velocity fixed at spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    velocity: Vec2,
}

impl Bullet {
    /// Aim from `origin` toward `target`; `None` when they coincide
    pub fn aimed(origin: Vec2, target: Vec2, speed: f32) -> Option<Self> {
        let dir = crate::unit_toward(origin, target);
        if dir == Vec2::ZERO {
            return None;
        }
        Some(Self {
            id: 0,
            pos: origin,
            velocity: dir * speed,
        })
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(BULLET_SIZE))
    }

    /// Where the bullet was one frame ago
    pub fn prev_position(&self) -> Vec2 {
        self.pos - self.velocity
    }
}

/// Decoration left where an enemy died
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpse {
    pub id: u32,
    pub pos: Vec2,
}

impl Corpse {
    pub fn new(pos: Vec2) -> Self {
        Self { id: 0, pos }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(CORPSE_SIZE))
    }
}

impl Identified for Corpse {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Every actor the main registry can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Enemy(Enemy),
    Bullet(Bullet),
}

impl Entity {
    pub fn position(&self) -> Vec2 {
        match self {
            Entity::Player(p) => p.pos,
            Entity::Enemy(e) => e.pos,
            Entity::Bullet(b) => b.pos,
        }
    }

    pub fn hitbox(&self) -> Rect {
        match self {
            Entity::Player(p) => p.hitbox(),
            Entity::Enemy(e) => e.hitbox(),
            Entity::Bullet(b) => b.hitbox(),
        }
    }

    /// Velocity applied by generic movement
    pub fn velocity(&self) -> Vec2 {
        match self {
            // Player moves from key input, not from a velocity
            Entity::Player(_) => Vec2::ZERO,
            Entity::Enemy(e) => e.planner.velocity,
            Entity::Bullet(b) => b.velocity,
        }
    }

    /// Position before the last generic move
    pub fn prev_position(&self) -> Vec2 {
        match self {
            Entity::Bullet(b) => b.prev_position(),
            Entity::Player(_) | Entity::Enemy(_) => self.position(),
        }
    }

    /// Generic per-frame movement
    pub fn advance(&mut self) {
        match self {
            Entity::Player(_) => {}
            Entity::Enemy(e) => e.pos += e.planner.velocity,
            Entity::Bullet(b) => b.pos += b.velocity,
        }
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, Entity::Enemy(_))
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Entity::Bullet(_))
    }
}

impl Identified for Entity {
    fn id(&self) -> u32 {
        match self {
            Entity::Player(p) => p.id,
            Entity::Enemy(e) => e.id,
            Entity::Bullet(b) => b.id,
        }
    }

    fn set_id(&mut self, id: u32) {
        match self {
            Entity::Player(p) => p.id = id,
            Entity::Enemy(e) => e.id = id,
            Entity::Bullet(b) => b.id = id,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Visible play area (width, height)
    pub screen: Vec2,
    /// Current stage index (0-based)
    pub stage: u32,
    pub phase: GamePhase,
    /// Sim time of the last tick
    pub now: Duration,
    /// Ticks processed since creation
    pub frame: u64,
    /// Player, enemies and bullets
    pub entities: Registry<Entity>,
    /// Passive decorations, cleared every stage
    pub corpses: Registry<Corpse>,
    /// Time of the last accepted shot
    pub last_shot: Option<Duration>,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state with the player at its spawn point and no enemies yet
    pub fn new(seed: u64, tuning: Tuning, screen: Vec2) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            screen,
            stage: 0,
            phase: GamePhase::Playing,
            now: Duration::ZERO,
            frame: 0,
            entities: Registry::starting_at(PLAYER_ID + 1),
            corpses: Registry::new(),
            last_shot: None,
            events: Vec::new(),
        };

        let player = Player::new(state.player_spawn(), state.tuning.player_speed);
        state.entities.insert_with_id(Entity::Player(player));
        state
    }

    /// Top-left of the player at stage start: the hero sprite centered on screen
    pub fn player_spawn(&self) -> Vec2 {
        self.screen / 2.0 - Vec2::splat(PLAYER_SPRITE_SIZE / 2.0)
    }

    pub fn player(&self) -> Option<&Player> {
        match self.entities.get(PLAYER_ID) {
            Some(Entity::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match self.entities.get_mut(PLAYER_ID) {
            Some(Entity::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Enemy(enemy) => Some(enemy),
            _ => None,
        })
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Bullet(bullet) => Some(bullet),
            _ => None,
        })
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies().count()
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets().count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
