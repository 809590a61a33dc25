//! Per-frame simulation tick
//!
//! Order matters and is fixed: player, enemies, projectiles and effects,
//! collisions, cleanup, spawning. Collision runs after movement, and cleanup
//! runs after collision so a dead enemy still sitting in the active list
//! cannot be hit twice within one pass.

use glam::Vec2;

use super::collision::{self, HitTarget};
use super::enemy::EnemyKind;
use super::entity::Simulated;
use super::explosion::ExplosionKind;
use super::geometry::Color;
use super::pool::{Handle, release_dead};
use super::state::{ENEMY_DEATH_PARTICLES, GameEvent, GamePhase, GameState, PLAYER_HIT_PARTICLES};
use crate::audio::{AudioSink, SoundEffect};

/// Autopilot keeps at least this far from its target
const AUTOPILOT_STANDOFF: f32 = 180.0;
/// Autopilot ignores offsets smaller than this on an axis
const AUTOPILOT_DEADZONE: f32 = 6.0;

/// Held input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire held (keyboard or mouse)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Held directions as -1/0/1 per axis (screen coordinates, +y down)
    pub fn move_axis(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.move_left, self.move_right), axis(self.move_up, self.move_down))
    }
}

/// Advance the game by one frame of `dt` seconds (clamped to the max step)
pub fn tick(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink, dt: f32) {
    state.events.clear();

    if input.pause {
        state.toggle_pause();
        if state.phase == GamePhase::Paused {
            return;
        }
    }

    // Menu, pause and game over freeze the world
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = dt.max(0.0).min(state.tuning.arena.max_delta_time);
    state.time += f64::from(dt);
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    update_player(state, &input, audio, dt);
    update_enemies(state, audio, dt);

    for &handle in &state.active_bullets {
        state.bullet_pool[handle].update(dt);
    }
    state.particles.update(dt);
    state.explosions.update(dt);

    resolve_collisions(state, audio);

    release_dead(&mut state.active_enemies, &mut state.enemy_pool);
    release_dead(&mut state.active_bullets, &mut state.bullet_pool);
    state.explosions.cleanup();

    state.spawn_timer += dt;
    if state.spawn_timer > state.tuning.enemy.spawn_cooldown
        && state.active_enemies.len() < state.tuning.enemy.max_concurrent
    {
        state.spawn_enemy();
        state.spawn_timer = 0.0;
    }
}

/// Move and maybe fire; a player found dead (killed last tick) ends the round
fn update_player(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink, dt: f32) {
    let Some(handle) = state.player else { return };
    let player = &mut state.player_pool[handle];

    if player.is_alive() {
        player.update(dt);
        player.apply_movement(input.move_axis(), dt);
        if input.fire {
            state.player_shoot(audio);
        }
    } else {
        let position = player.position;
        state.on_player_death(position, audio);
    }
}

fn update_enemies(state: &mut GameState, audio: &mut dyn AudioSink, dt: f32) {
    let target = state.player().filter(|p| p.is_alive()).map(|p| p.position);

    for i in 0..state.active_enemies.len() {
        let handle = state.active_enemies[i];
        let enemy = &mut state.enemy_pool[handle];
        enemy.update(dt);
        enemy.update_ai(&mut state.rng);

        let Some(target) = target else { continue };
        enemy.face_target(target);
        if enemy.can_shoot() {
            state.enemy_shoot(handle, audio);
        }
    }
}

/// At most one hit per bullet, first match in active-list order
fn resolve_collisions(state: &mut GameState, audio: &mut dyn AudioSink) {
    for i in 0..state.active_bullets.len() {
        let bullet = state.active_bullets[i];
        let player = state.player.map(|h| &state.player_pool[h]);
        let target = collision::bullet_target(
            &state.bullet_pool[bullet],
            &state.active_enemies,
            &state.enemy_pool,
            player,
        );

        match target {
            Some(HitTarget::Enemy(enemy)) => hit_enemy(state, bullet, enemy, audio),
            Some(HitTarget::Player) => hit_player(state, bullet, audio),
            None => {}
        }
    }
}

fn hit_enemy(state: &mut GameState, bullet: Handle, enemy: Handle, audio: &mut dyn AudioSink) {
    let b = &mut state.bullet_pool[bullet];
    let (damage, impact) = (b.damage(), b.position);
    b.kill();

    let e = &mut state.enemy_pool[enemy];
    e.take_damage(damage);
    let (kind, position) = (e.kind(), e.position);

    state.explosions.create_explosion(impact, ExplosionKind::Small);
    audio.play(SoundEffect::Hit);

    let e = &state.enemy_pool[enemy];
    if e.is_alive() {
        state.events.push(GameEvent::EnemyHit {
            kind,
            position,
            remaining: e.health(),
        });
        return;
    }

    let score = e.score_value();
    state.score += u64::from(score);
    state.kills += 1;
    state.explosions.create_explosion(position, death_explosion(kind));
    state
        .particles
        .emit(position, kind.color(), ENEMY_DEATH_PARTICLES, &mut state.rng);
    audio.play(SoundEffect::Explosion);
    state.events.push(GameEvent::EnemyKilled { kind, position, score });
    log::debug!("{} enemy destroyed, score {}", kind.as_str(), state.score);
}

fn hit_player(state: &mut GameState, bullet: Handle, audio: &mut dyn AudioSink) {
    let Some(handle) = state.player else { return };

    let b = &mut state.bullet_pool[bullet];
    let (damage, impact) = (b.damage(), b.position);
    b.kill();

    let player = &mut state.player_pool[handle];
    player.take_damage(damage);
    let remaining = player.health();

    state.explosions.create_explosion(impact, ExplosionKind::Small);
    state
        .particles
        .emit(impact, Color::RED, PLAYER_HIT_PARTICLES, &mut state.rng);
    audio.play(SoundEffect::Hit);
    state.events.push(GameEvent::PlayerHit { remaining });
}

/// Bigger ships leave bigger wrecks; fast ones pop
pub fn death_explosion(kind: EnemyKind) -> ExplosionKind {
    match kind {
        EnemyKind::Basic => ExplosionKind::Medium,
        EnemyKind::Fast => ExplosionKind::Small,
        EnemyKind::Heavy => ExplosionKind::Large,
    }
}

/// Demo driver: hold fire and close on the nearest enemy, backing off inside
/// the standoff distance. The ship faces where it moves, so closing in aims.
fn autopilot(state: &GameState, input: &mut TickInput) {
    let Some(player) = state.player().filter(|p| p.is_alive()) else {
        return;
    };
    let nearest = state
        .enemies()
        .map(|e| e.position)
        .min_by(|a, b| {
            a.distance_squared(player.position)
                .partial_cmp(&b.distance_squared(player.position))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    input.fire = true;
    let Some(target) = nearest else { return };

    let mut offset = target - player.position;
    if offset.length() < AUTOPILOT_STANDOFF {
        offset = -offset;
    }
    input.move_left = offset.x < -AUTOPILOT_DEADZONE;
    input.move_right = offset.x > AUTOPILOT_DEADZONE;
    input.move_up = offset.y < -AUTOPILOT_DEADZONE;
    input.move_down = offset.y > AUTOPILOT_DEADZONE;
}
