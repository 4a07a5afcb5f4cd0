//! The Cold Killer - native entry point
//!
//! Runs a headless demo: the autopilot plays on a fixed-step clock until it
//! wins, dies too often or runs out of frames.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use cold_killer::autopilot;
use cold_killer::consts::TARGET_FPS;
use cold_killer::platform::{FrameClock, HeadlessPlatform};
use cold_killer::{Screen, Session, Tuning};

const TUNING_FILE: &str = "tuning.json";
/// Ten minutes of sim time
const MAX_FRAMES: u64 = TARGET_FPS as u64 * 600;
const MAX_DEATHS: u32 = 3;

fn load_tuning() -> Tuning {
    let path = Path::new(TUNING_FILE);
    if !path.exists() {
        return Tuning::default();
    }
    match Tuning::load(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Ignoring {}: {}", TUNING_FILE, e);
            Tuning::default()
        }
    }
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("The Cold Killer (headless demo) starting...");

    let tuning = load_tuning();
    let (w, h) = tuning.fallback_screen;
    let seed = seed_from_time();

    let mut session = Session::new(seed, tuning);
    let mut platform = HeadlessPlatform::new(Vec2::new(w, h));
    let mut clock = FrameClock::default();

    let mut deaths = 0;
    let mut last_screen = session.screen();
    let mut best_stage = 0;

    while platform.frames() < MAX_FRAMES {
        autopilot::decide(&session).apply(&mut platform);
        if !session.frame(&mut platform, clock.advance()) {
            break;
        }

        let screen = session.screen();
        best_stage = best_stage.max(session.state.stage + 1);
        if screen == Screen::GameOver && last_screen != Screen::GameOver {
            deaths += 1;
            if deaths >= MAX_DEATHS {
                platform.close_requested = true;
            }
        }
        last_screen = screen;
    }

    log::info!(
        "Demo finished after {} frames: seed {}, best stage {}, deaths {}, final screen {:?}",
        platform.frames(),
        seed,
        best_stage,
        deaths,
        session.screen()
    );
}
