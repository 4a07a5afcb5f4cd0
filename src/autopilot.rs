//! Autopilot for the demo binary - plays the game without a human
//!
//! Clicks through menus, shoots at the nearest enemy and backs away from it
//! while keeping clear of the screen edges.

use glam::Vec2;

use crate::platform::HeadlessPlatform;
use crate::session::{Screen, Session};
use crate::sim::{DirectionKeys, GameState};

/// Enemies closer than this (center to center) are fled from
const DANGER_RADIUS: f32 = 300.0;
/// Distance from the edge the player tries to keep
const EDGE_MARGIN: f32 = 120.0;
/// Dead zone before a direction component turns into a key press
const KEY_THRESHOLD: f32 = 0.25;

/// Input the autopilot wants for the next frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Command {
    pub pointer: Vec2,
    pub keys: DirectionKeys,
    /// Press and release the primary button
    pub click: bool,
}

impl Command {
    /// Write the command into a headless host's input fields
    pub fn apply(self, platform: &mut HeadlessPlatform) {
        platform.keys = self.keys;
        if self.click {
            platform.click(self.pointer);
        } else {
            platform.pointer = self.pointer;
        }
    }
}

/// Key presses approximating a direction
pub fn keys_toward(dir: Vec2) -> DirectionKeys {
    let dir = crate::safe_normalize(dir);
    DirectionKeys {
        up: dir.y < -KEY_THRESHOLD,
        left: dir.x < -KEY_THRESHOLD,
        down: dir.y > KEY_THRESHOLD,
        right: dir.x > KEY_THRESHOLD,
    }
}

/// Center of the enemy closest to the player, if any
pub fn nearest_enemy(state: &GameState) -> Option<Vec2> {
    let me = state.player()?.hitbox().center();
    state
        .enemies()
        .map(|e| e.hitbox().center())
        .min_by(|a, b| {
            a.distance(me)
                .partial_cmp(&b.distance(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Push away from any edge closer than the margin
fn edge_push(center: Vec2, screen: Vec2) -> Vec2 {
    let mut push = Vec2::ZERO;
    if center.x < EDGE_MARGIN {
        push.x += 1.0;
    }
    if center.x > screen.x - EDGE_MARGIN {
        push.x -= 1.0;
    }
    if center.y < EDGE_MARGIN {
        push.y += 1.0;
    }
    if center.y > screen.y - EDGE_MARGIN {
        push.y -= 1.0;
    }
    push
}

fn play(state: &GameState) -> Command {
    let Some(player) = state.player() else {
        return Command::default();
    };
    let me = player.hitbox().center();

    let Some(target) = nearest_enemy(state) else {
        return Command {
            pointer: me + Vec2::X,
            ..Default::default()
        };
    };

    let mut dir = Vec2::ZERO;
    if target.distance(me) < DANGER_RADIUS {
        dir += crate::unit_toward(target, me);
    }
    dir += edge_push(me, state.screen) * 2.0;

    Command {
        pointer: target,
        keys: keys_toward(dir),
        click: true,
    }
}

/// Decide the next frame's input for the current screen
pub fn decide(session: &Session) -> Command {
    match session.screen() {
        Screen::Start | Screen::GameOver | Screen::Won { .. } => Command {
            pointer: session.button().bounds().center(),
            click: true,
            ..Default::default()
        },
        Screen::Playing => play(&session.state),
        Screen::Countdown { .. } | Screen::Exit => Command::default(),
    }
}
