//! Menu button shared by the start, game over and win screens

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_FRAME_STRIDE, BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::renderer::Tint;
use crate::sim::Rect;

/// Visual state of a button, selects the texture row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonStatus {
    #[default]
    Idle,
    /// Pointer held down over the button
    Pressed,
    /// Pointer released over the button this frame
    Released,
}

impl ButtonStatus {
    /// Row offset into the button texture
    pub fn source_y(self) -> f32 {
        let row = match self {
            ButtonStatus::Idle => 0.0,
            ButtonStatus::Pressed => 1.0,
            ButtonStatus::Released => 2.0,
        };
        row * BUTTON_FRAME_STRIDE
    }
}

/// A clickable "go" button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub pos: Vec2,
    pub tint: Tint,
    pub status: ButtonStatus,
}

impl Button {
    pub fn new(pos: Vec2, tint: Tint) -> Self {
        Self {
            pos,
            tint,
            status: ButtonStatus::Idle,
        }
    }

    /// Button placed at the screen center, shifted up-left by half its width
    /// on both axes
    pub fn centered(screen: Vec2, tint: Tint) -> Self {
        Self::new(screen / 2.0 - Vec2::splat(BUTTON_WIDTH / 2.0), tint)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT))
    }

    /// Update the status from this frame's pointer state
    ///
    /// Returns true when the pointer was released over the button.
    pub fn check_input(&mut self, pointer: Vec2, down: bool, released: bool) -> bool {
        let over = self.bounds().contains_point(pointer);
        self.status = if over && down {
            ButtonStatus::Pressed
        } else {
            ButtonStatus::Idle
        };

        if over && released {
            self.status = ButtonStatus::Released;
            return true;
        }
        false
    }
}
