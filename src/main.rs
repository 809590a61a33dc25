//! Space Defender entry point
//!
//! Headless runner: plays demo rounds on autopilot at a fixed step, drawing
//! every frame into a command list, and logs the results.

use std::time::{SystemTime, UNIX_EPOCH};

use space_defender::audio::AudioManager;
use space_defender::input::{InputState, Key};
use space_defender::perf::PerformanceMonitor;
use space_defender::renderer::{CommandList, SceneOptions, draw_game};
use space_defender::resources::TextureRegistry;
use space_defender::sim::{GamePhase, GameState, tick};
use space_defender::{Settings, Tuning};

/// Fixed simulation step
const SIM_DT: f32 = 1.0 / 60.0;
/// Length of the demo run in simulated seconds
const DEMO_SECONDS: f32 = 120.0;
const TUNING_PATH: &str = "space_defender.json";
const SETTINGS_PATH: &str = "space_defender_settings.json";

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Space Defender (headless) starting...");

    let mut settings = Settings::load(SETTINGS_PATH);
    let tuning = match Tuning::load(TUNING_PATH) {
        Ok(tuning) => tuning,
        Err(err) => {
            log::warn!("Using default tuning: {err}");
            Tuning::default()
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let textures = TextureRegistry::with_game_textures();
    let mut state = GameState::new(tuning, seed, &textures);
    let mut audio = AudioManager::from_settings(&settings);
    let mut input = InputState::new();
    let mut perf = PerformanceMonitor::new();
    let mut frame = CommandList::with_capacity(256);

    input.idle_mode = true;
    let mut rounds = 0u32;
    let mut best = 0u64;
    let frames = (DEMO_SECONDS / SIM_DT) as u64;

    for _ in 0..frames {
        // Press start or restart whenever the demo is not playing
        match state.phase {
            GamePhase::MainMenu => input.key_pressed(Key::Enter),
            GamePhase::GameOver => {
                rounds += 1;
                best = best.max(state.score);
                log::info!("Round {rounds}: score {} kills {}", state.score, state.kills);
                input.key_pressed(Key::R);
            }
            _ => {}
        }

        let mut running = true;
        for action in input.menu_actions(state.phase) {
            running &= action.apply(&mut state, &mut input, &mut audio, &mut settings, &mut perf);
        }
        if !running {
            break;
        }

        let tick_input = input.to_tick_input(state.phase);
        tick(&mut state, &tick_input, &mut audio, SIM_DT);
        input.end_frame();
        // Synthetic presses never see a release
        input.key_released(Key::Enter);
        input.key_released(Key::R);

        perf.update(SIM_DT);
        frame.clear();
        let options = SceneOptions::from_settings(&settings, Some(perf.average_fps()));
        draw_game(&state, &options, &mut frame);
    }

    best = best.max(state.score);
    let d = state.diagnostics();
    log::info!(
        "Demo finished after {frames} frames: {rounds} rounds, best score {best}, {} commands last frame",
        frame.len()
    );
    log::info!(
        "Pools: enemies peak {}/{}, bullets peak {}/{}",
        d.enemy_pool.peak_active,
        d.enemy_pool.total_allocated,
        d.bullet_pool.peak_active,
        d.bullet_pool.total_allocated
    );
}
