//! Sprite draw commands handed to the host

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Facing, Rect};

/// Textures the host is expected to have loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Texture {
    /// Hero sprite for one facing
    Hero(Facing),
    Enemy,
    /// Small diamond used for bullets
    Diamond,
    Button,
    /// Full-screen snow backdrop
    Background,
    /// Title card behind the menu screens
    TitleCard,
}

impl Texture {
    /// Asset file the host should bind to this texture
    pub fn asset_name(self) -> &'static str {
        match self {
            Texture::Hero(Facing::Front) => "Hero_front.png",
            Texture::Hero(Facing::Back) => "Hero_back.png",
            Texture::Hero(Facing::Left) => "Hero_left.png",
            Texture::Hero(Facing::Right) => "Hero_right.png",
            Texture::Enemy => "enemy.png",
            Texture::Diamond => "diamond.png",
            Texture::Button => "button.png",
            Texture::Background => "snow.png",
            Texture::TitleCard => "start.png",
        }
    }
}

/// RGBA tint, 255 = full channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// No tint
    pub const WHITE: Tint = Tint::rgba(255, 255, 255, 255);
    pub const GRAY: Tint = Tint::rgba(130, 130, 130, 255);
    pub const YELLOW: Tint = Tint::rgba(253, 249, 0, 255);
    pub const RED: Tint = Tint::rgba(230, 41, 55, 255);
    pub const PURPLE: Tint = Tint::rgba(200, 122, 255, 255);
    /// Dimmed backdrop
    pub const BACKDROP: Tint = Tint::rgba(150, 150, 150, 255);
    /// Enemy rushing at full speed
    pub const ENRAGED: Tint = Tint::rgba(255, 100, 100, 255);
    /// Faint stain left by a dead enemy
    pub const CORPSE: Tint = Tint::rgba(0, 0, 0, 30);
}

/// One textured rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: Texture,
    /// Region of the texture to sample
    pub source: Rect,
    /// Screen position of the top-left corner
    pub pos: Vec2,
    pub tint: Tint,
}

impl Sprite {
    /// Whole `size` region of `texture` at `pos`
    pub fn new(texture: Texture, size: Vec2, pos: Vec2, tint: Tint) -> Self {
        Self {
            texture,
            source: Rect::from_pos_size(Vec2::ZERO, size),
            pos,
            tint,
        }
    }

    /// Screen rectangle covered by the sprite
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.source.size)
    }
}
