//! Per-frame simulation tick
//!
//! One tick is one rendered frame. Order within a tick:
//! player input, firing, enemy planning, movement, then the collision and
//! lifecycle pass.

use std::time::Duration;

use glam::Vec2;

use super::collision::bullet_hits;
use super::stage::{has_won_stage, try_fire};
use super::state::{Corpse, DeathCause, DirectionKeys, Entity, GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic time of this frame
    pub now: Duration,
    /// Visible play area
    pub screen: Vec2,
    pub keys: DirectionKeys,
    /// Pointer position, also the aim target
    pub pointer: Vec2,
    /// Fire button went down this frame
    pub fire: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.now = input.now;
    state.screen = input.screen;
    state.frame += 1;

    if let Some(player) = state.player_mut() {
        player.apply_keys(input.keys);
    }

    if input.fire {
        try_fire(state, input.pointer, input.now);
    }

    plan_enemies(state);
    move_entities(state);
    resolve_collisions(state);
}

/// Run every enemy's planner against the current player position
pub fn plan_enemies(state: &mut GameState) {
    let Some(target) = state.player().map(|p| p.pos) else {
        return;
    };
    let GameState {
        entities,
        rng,
        tuning,
        screen,
        now,
        ..
    } = state;

    for entity in entities.iter_mut() {
        if let Entity::Enemy(enemy) = entity {
            let hitbox = enemy.hitbox();
            enemy.planner.update(&hitbox, target, *screen, *now, rng, tuning);
        }
    }
}

/// Generic movement for every entity
pub fn move_entities(state: &mut GameState) {
    for entity in state.entities.iter_mut() {
        entity.advance();
    }
}

/// Collision and lifecycle pass, run after movement
///
/// 1. Cull bullets that left the generous bound.
/// 2. Bullet vs enemy, both in ascending id order. A bullet removes at most
///    one enemy per frame, and a removed enemy cannot be hit again.
/// 3. Player vs enemy overlap is lethal.
/// 4. Player fully outside the play area is lethal.
pub fn resolve_collisions(state: &mut GameState) {
    cull_bullets(state);
    bullets_vs_enemies(state);

    if let Some(cause) = player_death_cause(state) {
        state.phase = GamePhase::PlayerDead;
        state.push_event(GameEvent::PlayerDied { cause });
        log::info!("Player died on stage {}: {:?}", state.stage + 1, cause);
        return;
    }

    if has_won_stage(state) {
        state.phase = GamePhase::StageClear;
        state.push_event(GameEvent::StageCleared { stage: state.stage });
        log::info!("Stage {} cleared", state.stage + 1);
    }
}

fn cull_bullets(state: &mut GameState) {
    let bound = state.tuning.bullet_cull_bound;
    let culled: Vec<u32> = state
        .bullets()
        .filter(|b| {
            let p = b.hitbox().pos;
            p.x < 0.0 || p.y < 0.0 || p.x > bound || p.y > bound
        })
        .map(|b| b.id)
        .collect();

    for bullet_id in culled {
        state.entities.remove(bullet_id);
        state.push_event(GameEvent::BulletCulled { bullet_id });
    }
}

fn bullets_vs_enemies(state: &mut GameState) {
    let bullet_ids: Vec<u32> = state.bullets().map(|b| b.id).collect();

    for bullet_id in bullet_ids {
        let Some(Entity::Bullet(bullet)) = state.entities.get(bullet_id) else {
            continue;
        };
        let bullet_box = bullet.hitbox();
        let bullet_prev = bullet.prev_position();

        let victim = state
            .enemies()
            .find(|enemy| bullet_hits(&bullet_box, bullet_prev, &enemy.hitbox()))
            .map(|enemy| (enemy.id, enemy.pos));

        let Some((enemy_id, at)) = victim else {
            continue;
        };

        state.entities.remove(bullet_id);
        state.entities.remove(enemy_id);
        let corpse_id = state.corpses.insert(Corpse::new(at));
        state.push_event(GameEvent::EnemyKilled {
            enemy_id,
            bullet_id,
            corpse_id,
            at,
        });
        log::debug!("bullet {} killed enemy {} at {:?}", bullet_id, enemy_id, at);
    }
}

/// Why the player is dead this frame, if they are
pub fn player_death_cause(state: &GameState) -> Option<DeathCause> {
    let player_box = state.player()?.hitbox();

    if let Some(enemy) = state.enemies().find(|e| e.hitbox().overlaps(&player_box)) {
        return Some(DeathCause::Enemy { enemy_id: enemy.id });
    }

    if player_box.is_outside_area(state.screen.x, state.screen.y) {
        return Some(DeathCause::OutOfBounds);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DURATION;
    use crate::sim::planner::Plan;
    use crate::sim::stage::{spawn_enemy, start_stage};
    use crate::sim::state::Bullet;
    use crate::tuning::Tuning;

    const SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);

    fn state() -> GameState {
        GameState::new(2024, Tuning::default(), SCREEN)
    }

    fn input(frame: u32) -> TickInput {
        TickInput {
            now: FRAME_DURATION * frame,
            screen: SCREEN,
            ..Default::default()
        }
    }

    /// Keep an enemy parked where it was spawned
    fn pin_enemy(state: &mut GameState, id: u32) {
        if let Some(Entity::Enemy(enemy)) = state.entities.get_mut(id) {
            enemy.planner.plan = Plan::Idle;
            enemy.planner.duration = Duration::from_secs(3600);
        }
    }

    fn add_bullet(state: &mut GameState, origin: Vec2, target: Vec2, speed: f32) -> u32 {
        let bullet = Bullet::aimed(origin, target, speed).unwrap();
        state.entities.insert(Entity::Bullet(bullet))
    }

    #[test]
    fn test_no_keys_no_movement() {
        let mut state = state();
        let enemy = spawn_enemy(&mut state, Vec2::new(1700.0, 50.0));
        pin_enemy(&mut state, enemy);
        let before = state.player().unwrap().pos;

        tick(&mut state, &input(1));
        assert_eq!(state.player().unwrap().pos, before);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_at_most_one_enemy_per_bullet() {
        let mut state = state();
        // Two overlapping enemies, both under the bullet's path
        let a = spawn_enemy(&mut state, Vec2::new(1500.0, 100.0));
        let b = spawn_enemy(&mut state, Vec2::new(1520.0, 100.0));
        pin_enemy(&mut state, a);
        pin_enemy(&mut state, b);
        let bullet = add_bullet(&mut state, Vec2::new(1400.0, 150.0), Vec2::new(1600.0, 150.0), 150.0);

        move_entities(&mut state);
        resolve_collisions(&mut state);

        assert!(!state.entities.contains(bullet));
        // Ascending id wins the tie
        assert!(!state.entities.contains(a));
        assert!(state.entities.contains(b));
        assert_eq!(state.corpses.len(), 1);
    }

    #[test]
    fn test_two_bullets_cannot_share_one_enemy() {
        let mut state = state();
        let enemy = spawn_enemy(&mut state, Vec2::new(1500.0, 100.0));
        pin_enemy(&mut state, enemy);
        let first = add_bullet(&mut state, Vec2::new(1510.0, 110.0), Vec2::new(1600.0, 110.0), 1.0);
        let second = add_bullet(&mut state, Vec2::new(1520.0, 120.0), Vec2::new(1600.0, 120.0), 1.0);

        resolve_collisions(&mut state);

        assert!(!state.entities.contains(first));
        assert!(state.entities.contains(second));
        assert_eq!(state.corpses.len(), 1);
    }

    #[test]
    fn test_fast_bullet_does_not_tunnel() {
        let mut state = state();
        let enemy = spawn_enemy(&mut state, Vec2::new(1500.0, 100.0));
        pin_enemy(&mut state, enemy);
        // 400 units per frame: jumps from x=1300 to x=1700, well past the 100 wide enemy
        let bullet = add_bullet(&mut state, Vec2::new(1300.0, 150.0), Vec2::new(1800.0, 150.0), 400.0);

        move_entities(&mut state);
        let Some(Entity::Bullet(b)) = state.entities.get(bullet) else {
            panic!("bullet missing");
        };
        assert!(!b.hitbox().overlaps(&state.enemies().next().unwrap().hitbox()));

        resolve_collisions(&mut state);
        assert!(!state.entities.contains(bullet));
        assert!(!state.entities.contains(enemy));
    }

    #[test]
    fn test_bullet_culled_outside_bound() {
        let mut state = state();
        let enemy = spawn_enemy(&mut state, Vec2::new(1700.0, 50.0));
        pin_enemy(&mut state, enemy);
        let bullet = add_bullet(&mut state, Vec2::new(5.0, 500.0), Vec2::new(-100.0, 500.0), 100.0);

        move_entities(&mut state);
        resolve_collisions(&mut state);

        assert!(!state.entities.contains(bullet));
        assert!(state.entities.contains(enemy));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BulletCulled { bullet_id: bullet }));
    }

    #[test]
    fn test_player_enemy_overlap_kills() {
        let mut state = state();
        let spawn = state.player_spawn();
        let enemy = spawn_enemy(&mut state, spawn + Vec2::new(10.0, 10.0));
        pin_enemy(&mut state, enemy);

        tick(&mut state, &input(1));
        assert_eq!(state.phase, GamePhase::PlayerDead);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayerDied {
            cause: DeathCause::Enemy { enemy_id: enemy }
        }));
    }

    #[test]
    fn test_player_out_of_bounds() {
        let mut state = state();
        let enemy = spawn_enemy(&mut state, Vec2::new(1700.0, 50.0));
        pin_enemy(&mut state, enemy);

        // Partially over the left edge: alive
        state.player_mut().unwrap().pos = Vec2::new(-20.0, 300.0);
        assert_eq!(player_death_cause(&state), None);

        // Entirely past the left edge: dead
        state.player_mut().unwrap().pos = Vec2::new(-31.0, 300.0);
        assert_eq!(player_death_cause(&state), Some(DeathCause::OutOfBounds));

        // Entirely below the bottom edge: dead
        state.player_mut().unwrap().pos = Vec2::new(300.0, 1081.0);
        assert_eq!(player_death_cause(&state), Some(DeathCause::OutOfBounds));
    }

    #[test]
    fn test_stage_clear_when_last_enemy_dies() {
        let mut state = state();
        let enemy = spawn_enemy(&mut state, Vec2::new(1500.0, 100.0));
        pin_enemy(&mut state, enemy);
        add_bullet(&mut state, Vec2::new(1510.0, 110.0), Vec2::new(1600.0, 110.0), 1.0);

        resolve_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::StageClear);

        // Ticks are ignored until the controller starts the next stage
        let frame = state.frame;
        tick(&mut state, &input(5));
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_end_to_end_aimed_shot() {
        let mut state = state();
        let spawn = state.player_spawn();
        // Directly right of the player, more than 1000 units away (center to spawn)
        let enemy_pos = Vec2::new(spawn.x + 1000.0, spawn.y - 35.0);
        let enemy = spawn_enemy(&mut state, enemy_pos);
        pin_enemy(&mut state, enemy);
        assert!((enemy_pos + Vec2::splat(50.0)).distance(spawn) >= 1000.0);

        let center = enemy_pos + Vec2::splat(50.0);
        let mut frame = 1;
        tick(
            &mut state,
            &TickInput {
                now: FRAME_DURATION * frame,
                screen: SCREEN,
                pointer: center,
                fire: true,
                ..Default::default()
            },
        );
        assert_eq!(state.bullet_count(), 1);

        while state.bullet_count() > 0 && frame < 30 {
            frame += 1;
            tick(&mut state, &input(frame));
        }

        assert!(!state.entities.contains(enemy));
        assert_eq!(state.bullet_count(), 0);
        assert_eq!(state.corpses.len(), 1);
        let corpse = state.corpses.iter().next().unwrap();
        assert_eq!(corpse.pos, enemy_pos);
        assert_eq!(state.phase, GamePhase::StageClear);

        let kills = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_seeded_runs_match() {
        let run = || {
            let mut state = GameState::new(31337, Tuning::default(), SCREEN);
            start_stage(&mut state, 3);
            for frame in 1..=240 {
                tick(&mut state, &input(frame));
            }
            state
                .enemies()
                .map(|e| (e.id, e.pos.x.to_bits(), e.pos.y.to_bits(), e.planner.plan))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
