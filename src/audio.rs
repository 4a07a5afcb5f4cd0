//! Audio cues
//!
//! Decides which sounds to start and stop; the host does the playback.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Background track, loops until stopped
    Music,
    /// Accepted shot
    GunShot,
    /// "3, 2, 1" voice before each stage
    Countdown,
    /// Player died
    Lose,
    /// Last stage cleared
    Win,
}

impl SoundEffect {
    pub fn is_looping(self) -> bool {
        matches!(self, SoundEffect::Music)
    }

    /// Asset file the host should bind to this cue
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Music => "spinning-head-271171.mp3",
            SoundEffect::GunShot => "shotgun-03-38220.mp3",
            SoundEffect::Countdown => "female-vocal-321-countdown-240912.mp3",
            SoundEffect::Lose => "you-lose-game-sound-230514.mp3",
            SoundEffect::Win => "game-bonus-2-294436.mp3",
        }
    }
}

/// One-shot cue raised directly by a simulation event
pub fn cue_for_event(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Shot { .. } => Some(SoundEffect::GunShot),
        GameEvent::PlayerDied { .. } => Some(SoundEffect::Lose),
        GameEvent::EnemyKilled { .. }
        | GameEvent::BulletCulled { .. }
        | GameEvent::StageCleared { .. } => None,
    }
}

/// Audio manager for the game
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioManager;

impl AudioManager {
    pub fn new() -> Self {
        Self
    }

    /// Play a sound effect
    pub fn play(&self, platform: &mut impl Platform, effect: SoundEffect) {
        platform.play_sound(effect);
    }

    /// Start the music, or restart it if the track ran out
    pub fn ensure_music(&self, platform: &mut impl Platform) {
        if !platform.is_sound_playing(SoundEffect::Music) {
            self.play(platform, SoundEffect::Music);
        }
    }

    pub fn countdown(&self, platform: &mut impl Platform) {
        self.play(platform, SoundEffect::Countdown);
    }

    /// Cue for a simulation event; death also silences the music
    pub fn on_event(&self, platform: &mut impl Platform, event: &GameEvent) {
        if let Some(effect) = cue_for_event(event) {
            self.play(platform, effect);
        }
        if matches!(event, GameEvent::PlayerDied { .. }) {
            platform.stop_sound(SoundEffect::Music);
        }
    }

    pub fn win(&self, platform: &mut impl Platform) {
        self.play(platform, SoundEffect::Win);
        platform.stop_sound(SoundEffect::Music);
    }
}
