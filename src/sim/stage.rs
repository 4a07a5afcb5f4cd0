//! Stage bookkeeping: spawning, restarts, win checks and the fire cooldown

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Enemy, Entity, GameEvent, GamePhase, GameState};
use crate::consts::ENEMY_SIZE;

/// True when no enemy is left in the registry
pub fn has_won_stage(state: &GameState) -> bool {
    !state.entities.iter().any(Entity::is_enemy)
}

/// Enemies spawned for a 0-based stage index
pub fn enemy_count_for_stage(stage: u32) -> u32 {
    stage + 1
}

/// Pick a top-left position whose enemy center is at least `min_distance`
/// from `anchor`.
///
/// Rejection sampling over the whole play area. After `attempts` misses the
/// farthest candidate seen is used instead, so small screens cannot hang.
pub fn generate_enemy_position(
    rng: &mut impl Rng,
    screen: Vec2,
    anchor: Vec2,
    min_distance: f32,
    attempts: u32,
) -> Vec2 {
    let size = Vec2::splat(ENEMY_SIZE);
    let span = (screen - size).max(Vec2::ZERO);
    let mut best = Vec2::ZERO;
    let mut best_distance = f32::NEG_INFINITY;

    for _ in 0..attempts.max(1) {
        let pos = Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);
        let distance = (pos + size / 2.0).distance(anchor);
        if distance >= min_distance {
            return pos;
        }
        if distance > best_distance {
            best = pos;
            best_distance = distance;
        }
    }

    log::warn!(
        "no spawn point {} away from {:?} after {} attempts, using {:?} ({:.0} away)",
        min_distance,
        anchor,
        attempts,
        best,
        best_distance
    );
    best
}

/// Add one enemy at `pos`, returning its id
pub fn spawn_enemy(state: &mut GameState, pos: Vec2) -> u32 {
    let enemy = Enemy::new(pos, state.now, &state.tuning);
    state.entities.insert(Entity::Enemy(enemy))
}

/// Reset the player, clear corpses and populate stage `stage`
pub fn start_stage(state: &mut GameState, stage: u32) {
    state.stage = stage;
    state.phase = GamePhase::Playing;

    let spawn = state.player_spawn();
    let speed = state.tuning.player_speed;
    if let Some(player) = state.player_mut() {
        player.pos = spawn;
        player.speed = speed;
    }
    state.corpses.clear(0);

    let anchor = spawn;
    for _ in 0..enemy_count_for_stage(stage) {
        let pos = generate_enemy_position(
            &mut state.rng,
            state.screen,
            anchor,
            state.tuning.min_spawn_distance,
            state.tuning.spawn_attempts,
        );
        spawn_enemy(state, pos);
    }

    log::info!(
        "Stage {}/{} started with {} enemies",
        stage + 1,
        state.tuning.stage_count,
        state.enemy_count()
    );
}

/// Wipe enemies, bullets and corpses, put the player back on its spawn point
/// and rewind to the first stage
///
/// Enemies for stage 0 are spawned by the following `start_stage`, once the
/// countdown has run.
pub fn restart(state: &mut GameState) {
    state
        .entities
        .retain(|e| !(e.is_enemy() || e.is_bullet()));
    state.corpses.clear(0);
    state.last_shot = None;
    state.stage = 0;
    state.phase = GamePhase::Playing;

    let spawn = state.player_spawn();
    if let Some(player) = state.player_mut() {
        player.pos = spawn;
    }
    log::info!("Restarting from stage 1");
}

/// Fire from the player toward `target` if the cooldown allows
///
/// A shot is accepted only when strictly more than the cooldown has elapsed
/// since the last accepted shot. Returns the new bullet id.
pub fn try_fire(state: &mut GameState, target: Vec2, now: Duration) -> Option<u32> {
    let cooldown = state.tuning.fire_cooldown();
    if let Some(last) = state.last_shot {
        if now.saturating_sub(last) <= cooldown {
            return None;
        }
    }

    let origin = state.player()?.pos;
    let bullet = Bullet::aimed(origin, target, state.tuning.bullet_speed)?;
    let bullet_id = state.entities.insert(Entity::Bullet(bullet));
    state.last_shot = Some(now);
    state.push_event(GameEvent::Shot { bullet_id });
    log::debug!("shot {} toward {:?}", bullet_id, target);
    Some(bullet_id)
}
