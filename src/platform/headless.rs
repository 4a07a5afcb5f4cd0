//! Headless host: scripted input, recorded output
//!
//! Used by tests and by the native demo binary. Nothing is shown or heard;
//! draw calls and sound cues are kept so callers can inspect them.

use std::collections::BTreeSet;

use glam::Vec2;

use super::Platform;
use crate::audio::SoundEffect;
use crate::renderer::Sprite;
use crate::sim::DirectionKeys;

/// One overlay text draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessPlatform {
    pub screen: Option<Vec2>,
    pub pointer: Vec2,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    pub keys: DirectionKeys,
    pub close_requested: bool,

    /// Sprites drawn since the last `begin_frame`
    pub sprites: Vec<Sprite>,
    /// Text drawn since the last `begin_frame`
    pub texts: Vec<TextDraw>,
    /// Every sound started, in order
    pub played: Vec<SoundEffect>,
    playing: BTreeSet<SoundEffect>,
    frames: u64,
}

impl HeadlessPlatform {
    pub fn new(screen: Vec2) -> Self {
        Self {
            screen: Some(screen),
            ..Default::default()
        }
    }

    /// Press and release the pointer at `pos` in one frame
    pub fn click(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.pressed = true;
        self.released = true;
        self.down = false;
    }

    /// Pretend a looping track ran out
    pub fn finish_sound(&mut self, sound: SoundEffect) {
        self.playing.remove(&sound);
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn count_played(&self, sound: SoundEffect) -> usize {
        self.played.iter().filter(|&&s| s == sound).count()
    }
}

impl Platform for HeadlessPlatform {
    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn pointer_pressed(&self) -> bool {
        self.pressed
    }

    fn pointer_down(&self) -> bool {
        self.down
    }

    fn pointer_released(&self) -> bool {
        self.released
    }

    fn direction_keys(&self) -> DirectionKeys {
        self.keys
    }

    fn screen_size(&self) -> Option<Vec2> {
        self.screen
    }

    fn draw_sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32) {
        self.texts.push(TextDraw {
            text: text.to_string(),
            pos,
            size,
        });
    }

    fn play_sound(&mut self, sound: SoundEffect) {
        self.played.push(sound);
        // One-shots finish instantly here
        if sound.is_looping() {
            self.playing.insert(sound);
        }
    }

    fn stop_sound(&mut self, sound: SoundEffect) {
        self.playing.remove(&sound);
    }

    fn is_sound_playing(&self, sound: SoundEffect) -> bool {
        self.playing.contains(&sound)
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn begin_frame(&mut self) {
        self.sprites.clear();
        self.texts.clear();
    }

    fn end_frame(&mut self) {
        // Edge-triggered input lasts one frame
        self.pressed = false;
        self.released = false;
        self.frames += 1;
    }
}
