//! Screen flow around the simulation
//!
//! `Start -> Countdown(0) -> Playing -> { Countdown(stage + 1) | GameOver | Won }`,
//! `GameOver -> Countdown(0)` on "go", `Won -> Exit` on "go". The host calls
//! [`Session::frame`] once per rendered frame.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::platform::Platform;
use crate::renderer::{self, Tint};
use crate::sim::{GamePhase, GameState, TickInput, restart, start_stage, tick};
use crate::tuning::Tuning;
use crate::ui::Button;

/// Which screen the session is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title card with a "go" button
    Start,
    /// "n / 15" card shown before stage `stage` starts
    Countdown { stage: u32, started: Duration },
    Playing,
    /// "you died." card; "go" restarts from the first stage
    GameOver,
    /// Victory card with the frozen stopwatch
    Won { record: Duration },
    /// Session finished, the host should stop calling `frame`
    Exit,
}

/// Elapsed session time since start or the last restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    started: Duration,
}

impl Stopwatch {
    pub fn reset(&mut self, now: Duration) {
        self.started = now;
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started)
    }
}

/// Whole seconds, rounded the way the stopwatch text shows them
pub fn format_seconds(d: Duration) -> String {
    format!("{:.0} s", d.as_secs_f64())
}

pub struct Session {
    pub state: GameState,
    screen: Screen,
    button: Button,
    stopwatch: Stopwatch,
    audio: AudioManager,
    screen_size: Vec2,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let (w, h) = tuning.fallback_screen;
        let screen_size = Vec2::new(w, h);
        Self {
            state: GameState::new(seed, tuning, screen_size),
            screen: Screen::Start,
            button: Button::centered(screen_size, Tint::WHITE),
            stopwatch: Stopwatch::default(),
            audio: AudioManager::new(),
            screen_size,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Time shown by the in-game stopwatch
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.stopwatch.elapsed(now)
    }

    /// Countdown card text for a 0-based stage
    pub fn stage_label(&self, stage: u32) -> String {
        format!("{} / {}", stage + 1, self.state.tuning.stage_count)
    }

    /// Run one frame. Returns false once the session has exited.
    pub fn frame(&mut self, platform: &mut impl Platform, now: Duration) -> bool {
        if self.screen == Screen::Exit {
            return false;
        }
        if platform.should_close() {
            log::info!("Close requested");
            self.screen = Screen::Exit;
            return false;
        }

        if let Some(size) = platform.screen_size() {
            if size != self.screen_size {
                self.screen_size = size;
                self.button = Button::centered(size, self.button.tint);
            }
        }

        platform.begin_frame();
        match self.screen {
            Screen::Start => self.start_screen(platform, now),
            Screen::Countdown { stage, started } => {
                self.countdown_screen(platform, now, stage, started)
            }
            Screen::Playing => self.playing_screen(platform, now),
            Screen::GameOver => self.game_over_screen(platform, now),
            Screen::Won { record } => self.won_screen(platform, record),
            Screen::Exit => {}
        }
        platform.end_frame();

        self.screen != Screen::Exit
    }

    fn enter_countdown(&mut self, platform: &mut impl Platform, stage: u32, now: Duration) {
        self.audio.ensure_music(platform);
        self.audio.countdown(platform);
        self.screen = Screen::Countdown {
            stage,
            started: now,
        };
    }

    fn enter_menu(&mut self, screen: Screen, tint: Tint) {
        self.screen = screen;
        self.button = Button::centered(self.screen_size, tint);
    }

    /// Update the button from the pointer and draw the menu backdrop
    fn menu_clicked(&mut self, platform: &mut impl Platform) -> bool {
        let clicked = self.button.check_input(
            platform.pointer_position(),
            platform.pointer_down(),
            platform.pointer_released(),
        );
        for sprite in renderer::menu_sprites(self.screen_size, &self.button) {
            platform.draw_sprite(sprite);
        }
        platform.draw_text("go", self.button.pos + Vec2::new(80.0, 25.0), 40.0);
        clicked
    }

    fn start_screen(&mut self, platform: &mut impl Platform, now: Duration) {
        let half = self.screen_size / 2.0;
        let clicked = self.menu_clicked(platform);
        platform.draw_text("The Cold Killer", half - Vec2::new(500.0, 400.0), 80.0);
        if clicked {
            log::info!("Game started (seed {})", self.state.seed);
            self.stopwatch.reset(now);
            self.enter_countdown(platform, 0, now);
        }
    }

    fn countdown_screen(
        &mut self,
        platform: &mut impl Platform,
        now: Duration,
        stage: u32,
        started: Duration,
    ) {
        let label = self.stage_label(stage);
        platform.draw_text(&label, self.screen_size / 2.0 - Vec2::new(150.0, 100.0), 100.0);

        if now.saturating_sub(started) >= self.state.tuning.countdown() {
            self.state.now = now;
            self.state.screen = self.screen_size;
            start_stage(&mut self.state, stage);
            self.screen = Screen::Playing;
        }
    }

    fn playing_screen(&mut self, platform: &mut impl Platform, now: Duration) {
        let input = TickInput {
            now,
            screen: self.screen_size,
            keys: platform.direction_keys(),
            pointer: platform.pointer_position(),
            fire: platform.pointer_pressed(),
        };
        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            self.audio.on_event(platform, &event);
        }

        for sprite in renderer::world_sprites(&self.state, input.pointer) {
            platform.draw_sprite(sprite);
        }
        let time = format!("Your Time: {}", format_seconds(self.elapsed(now)));
        platform.draw_text(&time, Vec2::new(self.screen_size.x / 2.0, 0.0), 100.0);

        match self.state.phase {
            GamePhase::Playing => {}
            GamePhase::PlayerDead => {
                self.enter_menu(Screen::GameOver, Tint::RED);
            }
            GamePhase::StageClear => {
                let stage = self.state.stage;
                if stage + 1 >= self.state.tuning.stage_count {
                    let record = self.elapsed(now);
                    log::info!("All stages cleared in {}", format_seconds(record));
                    self.audio.win(platform);
                    self.enter_menu(Screen::Won { record }, Tint::PURPLE);
                } else {
                    self.enter_countdown(platform, stage + 1, now);
                }
            }
        }
    }

    fn game_over_screen(&mut self, platform: &mut impl Platform, now: Duration) {
        let half = self.screen_size / 2.0;
        let clicked = self.menu_clicked(platform);
        platform.draw_text("you died.", half - Vec2::new(600.0, 400.0), 100.0);
        if clicked {
            self.state.screen = self.screen_size;
            restart(&mut self.state);
            self.stopwatch.reset(now);
            self.enter_countdown(platform, 0, now);
        }
    }

    fn won_screen(&mut self, platform: &mut impl Platform, record: Duration) {
        let half = self.screen_size / 2.0;
        let clicked = self.menu_clicked(platform);
        platform.draw_text("You've Won!", half - Vec2::new(500.0, 300.0), 100.0);
        let text = format!("Your Record: {}", format_seconds(record));
        platform.draw_text(&text, half + Vec2::new(150.0, -250.0), 50.0);
        if clicked {
            self.screen = Screen::Exit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::platform::{Clock, FrameClock, HeadlessPlatform};
    use crate::renderer::Texture;

    const SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);

    fn setup(tuning: Tuning) -> (Session, HeadlessPlatform, FrameClock) {
        (
            Session::new(11, tuning),
            HeadlessPlatform::new(SCREEN),
            FrameClock::default(),
        )
    }

    fn click_button(session: &Session, platform: &mut HeadlessPlatform) {
        platform.click(session.button().bounds().center());
    }

    /// Click "go" and run frames until the first stage is live
    fn start_playing(session: &mut Session, platform: &mut HeadlessPlatform, clock: &mut FrameClock) {
        click_button(session, platform);
        session.frame(platform, clock.advance());
        for _ in 0..120 {
            if session.screen() == Screen::Playing {
                return;
            }
            session.frame(platform, clock.advance());
        }
        panic!("countdown never finished");
    }

    #[test]
    fn test_start_click_begins_countdown() {
        let (mut session, mut platform, mut clock) = setup(Tuning::default());
        assert!(session.frame(&mut platform, clock.advance()));
        assert_eq!(session.screen(), Screen::Start);
        assert!(platform.sprites.iter().any(|s| s.texture == Texture::TitleCard));

        click_button(&session, &mut platform);
        session.frame(&mut platform, clock.advance());
        assert!(matches!(session.screen(), Screen::Countdown { stage: 0, .. }));
        assert!(platform.is_sound_playing(SoundEffect::Music));
        assert_eq!(platform.count_played(SoundEffect::Countdown), 1);
    }

    #[test]
    fn test_start_button_follows_host_screen() {
        let host = Vec2::new(800.0, 600.0);
        let mut session = Session::new(11, Tuning::default());
        let mut platform = HeadlessPlatform::new(host);
        let mut clock = FrameClock::default();

        session.frame(&mut platform, clock.advance());
        assert_eq!(session.screen_size(), host);
        assert_eq!(session.button().pos, Vec2::new(290.0, 190.0));

        platform.click(Button::centered(host, Tint::WHITE).bounds().center());
        session.frame(&mut platform, clock.advance());
        assert!(matches!(session.screen(), Screen::Countdown { stage: 0, .. }));
    }

    #[test]
    fn test_countdown_lasts_one_second() {
        let (mut session, mut platform, mut clock) = setup(Tuning::default());
        click_button(&session, &mut platform);
        session.frame(&mut platform, clock.advance());
        let entered = clock.now();

        session.frame(&mut platform, clock.advance());
        assert!(platform.texts.iter().any(|t| t.text == "1 / 15"));

        while session.screen() != Screen::Playing {
            session.frame(&mut platform, clock.advance());
        }
        let waited = clock.now() - entered;
        assert!(waited >= Duration::from_secs(1));
        assert!(waited < Duration::from_millis(1050));
        assert_eq!(session.state.enemy_count(), 1);
    }

    #[test]
    fn test_death_then_continue() {
        let (mut session, mut platform, mut clock) = setup(Tuning::default());
        start_playing(&mut session, &mut platform, &mut clock);

        session.state.player_mut().unwrap().pos = Vec2::new(-500.0, -500.0);
        session.frame(&mut platform, clock.advance());
        assert_eq!(session.screen(), Screen::GameOver);
        assert_eq!(platform.count_played(SoundEffect::Lose), 1);
        assert!(!platform.is_sound_playing(SoundEffect::Music));

        session.frame(&mut platform, clock.advance());
        click_button(&session, &mut platform);
        let restarted_at = clock.advance();
        session.frame(&mut platform, restarted_at);
        assert!(matches!(session.screen(), Screen::Countdown { stage: 0, .. }));
        assert_eq!(session.state.enemy_count(), 0);
        assert_eq!(session.state.bullet_count(), 0);
        assert_eq!(session.state.player().unwrap().pos, session.state.player_spawn());
        assert_eq!(session.elapsed(restarted_at), Duration::ZERO);
        assert!(platform.is_sound_playing(SoundEffect::Music));
    }

    #[test]
    fn test_clearing_a_stage_moves_to_next_countdown() {
        let (mut session, mut platform, mut clock) = setup(Tuning::default());
        start_playing(&mut session, &mut platform, &mut clock);

        session.state.entities.retain(|e| !e.is_enemy());
        session.frame(&mut platform, clock.advance());
        assert!(matches!(session.screen(), Screen::Countdown { stage: 1, .. }));

        while session.screen() != Screen::Playing {
            session.frame(&mut platform, clock.advance());
        }
        assert_eq!(session.state.stage, 1);
        assert_eq!(session.state.enemy_count(), 2);
    }

    #[test]
    fn test_clearing_last_stage_wins_and_exits() {
        let tuning = Tuning {
            stage_count: 1,
            ..Tuning::default()
        };
        let (mut session, mut platform, mut clock) = setup(tuning);
        start_playing(&mut session, &mut platform, &mut clock);

        session.state.entities.retain(|e| !e.is_enemy());
        session.frame(&mut platform, clock.advance());
        assert!(matches!(session.screen(), Screen::Won { .. }));
        assert_eq!(platform.count_played(SoundEffect::Win), 1);
        assert!(!platform.is_sound_playing(SoundEffect::Music));

        session.frame(&mut platform, clock.advance());
        assert!(platform.texts.iter().any(|t| t.text.starts_with("Your Record: ")));

        click_button(&session, &mut platform);
        assert!(!session.frame(&mut platform, clock.advance()));
        assert_eq!(session.screen(), Screen::Exit);
        assert!(!session.frame(&mut platform, clock.advance()));
    }

    #[test]
    fn test_close_request_exits() {
        let (mut session, mut platform, mut clock) = setup(Tuning::default());
        platform.close_requested = true;
        assert!(!session.frame(&mut platform, clock.advance()));
        assert_eq!(session.screen(), Screen::Exit);
    }

    #[test]
    fn test_shots_play_gun_sound() {
        let (mut session, mut platform, mut clock) = setup(Tuning::default());
        start_playing(&mut session, &mut platform, &mut clock);

        platform.pointer = Vec2::new(0.0, 0.0);
        platform.pressed = true;
        session.frame(&mut platform, clock.advance());
        assert_eq!(platform.count_played(SoundEffect::GunShot), 1);
        assert!(platform.sprites.iter().any(|s| s.texture == Texture::Diamond));
    }

    #[test]
    fn test_stopwatch_format() {
        assert_eq!(format_seconds(Duration::from_millis(12_400)), "12 s");
        assert_eq!(format_seconds(Duration::ZERO), "0 s");
    }
}
