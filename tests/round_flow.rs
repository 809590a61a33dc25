//! Whole-round scenarios driven through the public API

use space_defender::Tuning;
use space_defender::audio::{AudioManager, NullAudio, SoundEffect};
use space_defender::resources::TextureRegistry;
use space_defender::sim::{BulletOwner, GameEvent, GamePhase, GameState, Simulated, TickInput, tick};

const DT: f32 = 1.0 / 60.0;

fn round(tuning: Tuning, seed: u64) -> GameState {
    let mut state = GameState::new(tuning, seed, &TextureRegistry::with_game_textures());
    state.start_new_game();
    state
}

/// No enemies, and none arriving
fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.enemy.initial_count = 0;
    tuning.enemy.spawn_cooldown = 1.0e6;
    tuning
}

fn fire() -> TickInput {
    TickInput {
        fire: true,
        ..Default::default()
    }
}

#[test]
fn kill_awards_the_enemy_score() {
    let mut tuning = quiet_tuning();
    tuning.enemy.initial_count = 1;
    // An enemy this large covers the whole arena, so every shot connects
    tuning.enemy.sprite_size = 5000.0;
    tuning.bullets.enemy.damage = 0.0;
    let mut state = round(tuning, 7);

    let worth = state.enemies().next().unwrap().score_value();
    let mut killed = Vec::new();
    for _ in 0..180 {
        tick(&mut state, &fire(), &mut NullAudio, DT);
        killed.extend(state.events().iter().filter_map(|e| match e {
            GameEvent::EnemyKilled { score, .. } => Some(*score),
            _ => None,
        }));
    }

    assert_eq!(killed, vec![worth]);
    assert_eq!(state.score, u64::from(worth));
    assert_eq!(state.kills, 1);
    assert_eq!(state.enemies().count(), 0);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn bullet_leaves_arena_and_returns_to_pool() {
    let mut state = round(quiet_tuning(), 8);
    tick(&mut state, &fire(), &mut NullAudio, DT);
    assert_eq!(state.bullets().count(), 1);
    assert_eq!(state.diagnostics().bullet_pool.current_active, 1);

    // Worst case is crossing half the arena plus the margin at bullet speed
    for _ in 0..150 {
        tick(&mut state, &TickInput::default(), &mut NullAudio, DT);
    }
    assert_eq!(state.bullets().count(), 0);
    let d = state.diagnostics();
    assert_eq!(d.bullet_pool.current_active, 0);
    assert_eq!(d.bullet_pool.total_released, 1);
}

#[test]
fn player_death_ends_round_once() {
    let mut tuning = Tuning::default();
    tuning.player.max_health = 10.0;
    tuning.enemy.max_concurrent = 3;
    let mut state = round(tuning, 9);
    let mut audio = AudioManager::new();

    let mut hits = 0;
    let mut deaths = 0;
    let mut ticks = 0;
    while state.phase == GamePhase::Playing && ticks < 60 * 60 {
        tick(&mut state, &TickInput::default(), &mut audio, DT);
        ticks += 1;
        for event in state.events() {
            match event {
                GameEvent::PlayerHit { remaining } => {
                    hits += 1;
                    assert_eq!(*remaining, 0.0);
                }
                GameEvent::PlayerDied { .. } => deaths += 1,
                _ => {}
            }
        }
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(hits, 1);
    assert_eq!(deaths, 1);
    assert!(!state.player().unwrap().is_alive());
    assert!(audio.played(SoundEffect::Explosion) >= 1);

    // The world is frozen until restart
    let frozen = state.time_ticks;
    tick(&mut state, &fire(), &mut audio, DT);
    assert_eq!(state.time_ticks, frozen);
    assert!(state.events().is_empty());

    state.start_new_game();
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.player().unwrap().is_alive());
    assert_eq!(state.score, 0);
}

#[test]
fn same_seed_same_round() {
    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut a = round(Tuning::default(), 1234);
    let mut b = round(Tuning::default(), 1234);

    for _ in 0..1200 {
        tick(&mut a, &autopilot, &mut NullAudio, DT);
        tick(&mut b, &autopilot, &mut NullAudio, DT);
        assert_eq!(a.events(), b.events());
    }
    assert_eq!(a.score, b.score);
    assert_eq!(a.kills, b.kills);
    assert_eq!(a.phase, b.phase);
    let positions = |s: &GameState| s.enemies().map(|e| e.position).collect::<Vec<_>>();
    assert_eq!(positions(&a), positions(&b));
}

#[test]
fn score_matches_kill_events_under_autopilot() {
    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut tuning = Tuning::default();
    tuning.player.max_health = 1.0e6;
    let mut state = round(tuning, 42);

    let (mut score, mut kills, mut player_shots) = (0u64, 0u32, 0u32);
    for _ in 0..60 * 30 {
        tick(&mut state, &autopilot, &mut NullAudio, DT);
        for event in state.events() {
            match event {
                GameEvent::EnemyKilled { kind, score: s, .. } => {
                    assert_eq!(*s, kind.score_value());
                    score += u64::from(*s);
                    kills += 1;
                }
                GameEvent::BulletFired {
                    owner: BulletOwner::Player,
                    ..
                } => player_shots += 1,
                _ => {}
            }
        }
    }

    assert_eq!(state.score, score);
    assert_eq!(state.kills, kills);
    assert!(player_shots > 0);
    assert!(state.enemies().count() <= state.tuning.enemy.max_concurrent);
    assert!(state.bullets().count() <= state.tuning.bullets.max_active);
}

#[test]
fn every_pooled_entity_is_free_or_listed_once() {
    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut state = round(Tuning::default(), 2024);

    for _ in 0..60 * 60 {
        tick(&mut state, &autopilot, &mut NullAudio, DT);
        if state.phase == GamePhase::GameOver {
            state.start_new_game();
        }

        let d = state.diagnostics();
        assert_eq!(d.active_enemies, d.enemy_pool.current_active);
        assert_eq!(d.active_bullets, d.bullet_pool.current_active);
        assert!(state.enemies().all(|e| e.is_alive()));
        assert!(state.bullets().all(|b| b.is_alive()));
        assert!(d.active_particles <= state.particles().capacity());
    }
}
