//! Sprite draw pass
//!
//! Turns game state into an ordered list of [`Sprite`]s. The host decides how
//! to put them on screen; nothing here touches a graphics API.

pub mod sprites;

use glam::Vec2;

pub use sprites::{Sprite, Texture, Tint};

use crate::consts::*;
use crate::sim::{Corpse, Entity, Facing, GameState, Plan, Rect};
use crate::ui::Button;

/// Size of the title card texture
pub const TITLE_CARD_SIZE: Vec2 = Vec2::new(1600.0, 900.0);

/// Hero texture facing the pointer
pub fn hero_facing(player_pos: Vec2, pointer: Vec2) -> Facing {
    Facing::from_degrees(crate::screen_angle_degrees(pointer - player_pos))
}

/// Tint for an enemy: enraged while rushing at or above [`ENRAGED_SPEED`]
pub fn enemy_tint(plan: Plan, speed: f32) -> Tint {
    if plan == Plan::Rush && speed >= ENRAGED_SPEED {
        Tint::ENRAGED
    } else {
        Tint::WHITE
    }
}

fn entity_sprite(entity: &Entity, pointer: Vec2) -> Sprite {
    match entity {
        Entity::Player(player) => {
            let size = Vec2::splat(PLAYER_SPRITE_SIZE);
            Sprite::new(
                Texture::Hero(hero_facing(player.pos, pointer)),
                size,
                player.pos - size / 3.0,
                Tint::WHITE,
            )
        }
        Entity::Enemy(enemy) => Sprite::new(
            Texture::Enemy,
            Vec2::splat(ENEMY_SIZE),
            enemy.pos,
            enemy_tint(enemy.planner.plan, enemy.planner.speed),
        ),
        Entity::Bullet(bullet) => Sprite::new(
            Texture::Diamond,
            Vec2::splat(BULLET_SIZE),
            bullet.pos,
            Tint::YELLOW,
        ),
    }
}

fn corpse_sprite(corpse: &Corpse) -> Sprite {
    Sprite::new(
        Texture::Enemy,
        Vec2::splat(CORPSE_SIZE),
        corpse.pos,
        Tint::CORPSE,
    )
}

/// One gameplay frame: backdrop, then corpses, then live entities by id
pub fn world_sprites(state: &GameState, pointer: Vec2) -> Vec<Sprite> {
    let mut out = Vec::with_capacity(1 + state.corpses.len() + state.entities.len());
    out.push(Sprite::new(
        Texture::Background,
        state.screen,
        Vec2::ZERO,
        Tint::BACKDROP,
    ));
    out.extend(state.corpses.iter().map(corpse_sprite));
    out.extend(state.entities.iter().map(|e| entity_sprite(e, pointer)));
    out
}

/// Dimmed title card centered on screen
pub fn title_card(screen: Vec2) -> Sprite {
    Sprite::new(
        Texture::TitleCard,
        TITLE_CARD_SIZE,
        screen / 2.0 - TITLE_CARD_SIZE / 2.0,
        Tint::GRAY,
    )
}

/// Button frame for its current status
pub fn button_sprite(button: &Button) -> Sprite {
    Sprite {
        texture: Texture::Button,
        source: Rect::new(
            0.0,
            button.status.source_y(),
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        ),
        pos: button.pos,
        tint: button.tint,
    }
}

/// Title card with a button on top, used by all menu screens
pub fn menu_sprites(screen: Vec2, button: &Button) -> Vec<Sprite> {
    vec![title_card(screen), button_sprite(button)]
}
