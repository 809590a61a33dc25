//! Game state and composition root
//!
//! Owns every pool, active list and effect system. Nothing outside the
//! simulation holds a mutable reference across ticks; the renderer and HUD
//! read through the accessors here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::enemy::{Enemy, EnemyKind};
use super::entity::Simulated;
use super::explosion::{ExplosionKind, ExplosionManager};
use super::geometry::{Color, Rect};
use super::particles::ParticleSystem;
use super::player::Player;
use super::pool::{Handle, ObjectPool, PoolStats};
use crate::audio::{AudioSink, SoundEffect};
use crate::resources::{ResourceProvider, SpriteSet};
use crate::tuning::Tuning;

/// Per-tick event buffer starts with this much room
const EVENT_CAPACITY: usize = 64;

/// Particles thrown when an enemy dies
pub const ENEMY_DEATH_PARTICLES: usize = 20;
/// Particles thrown when the player dies
pub const PLAYER_DEATH_PARTICLES: usize = 30;
/// Particles thrown when an enemy bullet hits the player
pub const PLAYER_HIT_PARTICLES: usize = 5;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    MainMenu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player destroyed; world frozen until restart or menu
    GameOver,
}

/// Something that happened during a tick (cleared at the start of the next)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    BulletFired { owner: BulletOwner, position: Vec2 },
    EnemySpawned { kind: EnemyKind, position: Vec2 },
    EnemyHit { kind: EnemyKind, position: Vec2, remaining: f32 },
    EnemyKilled { kind: EnemyKind, position: Vec2, score: u32 },
    PlayerHit { remaining: f32 },
    PlayerDied { position: Vec2 },
}

/// Snapshot for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    pub enemy_pool: PoolStats,
    pub bullet_pool: PoolStats,
    pub enemy_usage: f32,
    pub bullet_usage: f32,
    pub active_enemies: usize,
    pub active_bullets: usize,
    pub active_particles: usize,
    pub active_explosions: usize,
    pub explosion_pool: usize,
}

/// Complete simulation state
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub(crate) arena: Rect,

    pub(crate) player_pool: ObjectPool<Player>,
    pub(crate) player: Option<Handle>,
    pub(crate) enemy_pool: ObjectPool<Enemy>,
    pub(crate) bullet_pool: ObjectPool<Bullet>,
    /// Live enemies in spawn order
    pub(crate) active_enemies: Vec<Handle>,
    /// Live bullets in firing order
    pub(crate) active_bullets: Vec<Handle>,

    pub(crate) particles: ParticleSystem,
    pub(crate) explosions: ExplosionManager,
    sprites: SpriteSet,

    pub score: u64,
    pub kills: u32,
    pub(crate) spawn_timer: f32,
    /// Seconds simulated this round
    pub time: f64,
    pub time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Build every pool and resolve textures once. Starts at the main menu.
    pub fn new(tuning: Tuning, seed: u64, resources: &dyn ResourceProvider) -> Self {
        let arena = Rect::new(Vec2::ZERO, Vec2::new(tuning.arena.width, tuning.arena.height));
        let bullet_slots = tuning.pools.bullets;

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::MainMenu,
            arena,
            player_pool: ObjectPool::with_capacity(1),
            player: None,
            enemy_pool: ObjectPool::with_capacity(tuning.pools.enemies),
            bullet_pool: ObjectPool::with_capacity(bullet_slots),
            active_enemies: Vec::with_capacity(tuning.pools.enemies),
            active_bullets: Vec::with_capacity(bullet_slots),
            particles: ParticleSystem::new(&tuning.particles),
            explosions: ExplosionManager::new(resources, tuning.pools.max_explosions),
            sprites: SpriteSet::resolve(resources),
            score: 0,
            kills: 0,
            spawn_timer: 0.0,
            time: 0.0,
            time_ticks: 0,
            events: Vec::with_capacity(EVENT_CAPACITY),
            tuning,
        }
    }

    /// Reset the round and put a fresh player and the opening enemies in
    pub fn start_new_game(&mut self) {
        self.cleanup();

        self.phase = GamePhase::Playing;
        self.score = 0;
        self.kills = 0;
        self.spawn_timer = 0.0;
        self.time = 0.0;
        self.time_ticks = 0;

        self.player = self.player_pool.acquire();
        debug_assert!(self.player.is_some(), "player pool exhausted");
        if let Some(handle) = self.player {
            let arena = self.arena;
            self.player_pool[handle].initialize(
                arena.center(),
                arena,
                &self.tuning.player,
                self.tuning.bounds.ship_tightness,
            );
        }

        for _ in 0..self.tuning.enemy.initial_count {
            self.spawn_enemy();
        }
        log::info!("New game started (seed {})", self.seed);
    }

    /// Return every pooled object and clear effects
    pub fn cleanup(&mut self) {
        if let Some(handle) = self.player.take() {
            self.player_pool.release(handle);
        }
        self.enemy_pool.release_all();
        self.active_enemies.clear();
        self.bullet_pool.release_all();
        self.active_bullets.clear();
        self.particles.clear();
        self.explosions.clear();
        self.events.clear();
    }

    /// Playing <-> Paused; other phases ignore it
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
        log::debug!("Phase now {:?}", self.phase);
    }

    pub fn return_to_menu(&mut self) {
        self.cleanup();
        self.phase = GamePhase::MainMenu;
    }

    /// Place one enemy if under the concurrent cap and the pool has room
    pub fn spawn_enemy(&mut self) -> Option<Handle> {
        if self.active_enemies.len() >= self.tuning.enemy.max_concurrent {
            return None;
        }
        let Some(handle) = self.enemy_pool.acquire() else {
            log::trace!("Enemy pool exhausted, spawn dropped");
            return None;
        };

        let player_pos = self.player().map(|p| p.position);
        let position = spawn_position(
            &mut self.rng,
            self.arena,
            player_pos,
            self.tuning.enemy.min_spawn_distance,
            self.tuning.enemy.spawn_attempts,
        );
        let kind = EnemyKind::from_roll(self.rng.random::<f32>());

        self.enemy_pool[handle].initialize(
            position,
            kind,
            self.arena,
            self.tuning.enemy.sprite_size,
            self.tuning.bounds.ship_tightness,
            &mut self.rng,
        );
        self.active_enemies.push(handle);
        self.events.push(GameEvent::EnemySpawned { kind, position });
        log::debug!("Spawned {} enemy at ({:.0}, {:.0})", kind.as_str(), position.x, position.y);
        Some(handle)
    }

    /// Fire from the player's muzzle if the cooldown and bullet cap allow
    pub fn player_shoot(&mut self, audio: &mut dyn AudioSink) -> bool {
        let Some(handle) = self.player else { return false };
        let player = &self.player_pool[handle];
        if !player.is_alive() || !player.can_shoot() {
            return false;
        }
        let (origin, direction) = (player.muzzle_position(), player.shoot_direction());

        if self.fire_bullet(origin, direction, BulletOwner::Player, false).is_none() {
            return false;
        }
        self.player_pool[handle].reset_shoot_cooldown();
        audio.play(SoundEffect::Shoot);
        true
    }

    /// Fire from an enemy toward its current facing
    pub fn enemy_shoot(&mut self, enemy: Handle, audio: &mut dyn AudioSink) -> bool {
        let e = &self.enemy_pool[enemy];
        let (origin, direction) = (e.muzzle_position(), e.shoot_direction());
        let heavy = e.kind() == EnemyKind::Heavy;

        if self.fire_bullet(origin, direction, BulletOwner::Enemy, heavy).is_none() {
            return false;
        }
        self.enemy_pool[enemy].reset_shoot_cooldown();
        audio.play(SoundEffect::Shoot);
        true
    }

    fn fire_bullet(&mut self, origin: Vec2, direction: Vec2, owner: BulletOwner, heavy: bool) -> Option<Handle> {
        if self.active_bullets.len() >= self.tuning.bullets.max_active {
            return None;
        }
        let handle = self.bullet_pool.acquire()?;
        let ballistics = match owner {
            BulletOwner::Player => self.tuning.bullets.player,
            BulletOwner::Enemy => self.tuning.bullets.enemy,
        };

        let bullet = &mut self.bullet_pool[handle];
        bullet.initialize(
            origin,
            direction,
            owner,
            &ballistics,
            self.arena,
            self.tuning.bullets.expiry_margin,
            self.tuning.bounds.bullet_tightness,
        );
        bullet.set_heavy(heavy);
        self.active_bullets.push(handle);
        self.events.push(GameEvent::BulletFired { owner, position: origin });
        Some(handle)
    }

    /// Large explosion, cyan burst and an explosion cue at the wreck
    pub(crate) fn on_player_death(&mut self, position: Vec2, audio: &mut dyn AudioSink) {
        self.explosions.create_explosion(position, ExplosionKind::Large);
        self.particles
            .emit(position, Color::CYAN, PLAYER_DEATH_PARTICLES, &mut self.rng);
        audio.play(SoundEffect::Explosion);
        self.events.push(GameEvent::PlayerDied { position });
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {} with {} kills", self.score, self.kills);
    }

    // === Read-only views ===

    pub fn arena(&self) -> Rect {
        self.arena
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.map(|h| &self.player_pool[h])
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.active_enemies.iter().map(|&h| &self.enemy_pool[h])
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.active_bullets.iter().map(|&h| &self.bullet_pool[h])
    }

    pub fn enemy(&self, handle: Handle) -> Option<&Enemy> {
        self.enemy_pool.get(handle)
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn explosions(&self) -> &ExplosionManager {
        &self.explosions
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            enemy_pool: *self.enemy_pool.stats(),
            bullet_pool: *self.bullet_pool.stats(),
            enemy_usage: self.enemy_pool.usage_ratio(),
            bullet_usage: self.bullet_pool.usage_ratio(),
            active_enemies: self.active_enemies.len(),
            active_bullets: self.active_bullets.len(),
            active_particles: self.particles.active_count(),
            active_explosions: self.explosions.active_count(),
            explosion_pool: self.explosions.pool_len(),
        }
    }

    // === Test hooks ===

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.map(|h| &mut self.player_pool[h])
    }
}

/// Pick a spawn point at least `min_distance` from the player.
///
/// Samples uniformly over the arena at most `attempts` times and keeps the
/// first sample far enough away; if none is, the last sample is used. With no
/// player the first sample is used.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Rect,
    player: Option<Vec2>,
    min_distance: f32,
    attempts: u32,
) -> Vec2 {
    let sample = |rng: &mut R| arena.min + Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * arena.size;

    let mut position = sample(rng);
    let Some(player) = player else {
        return position;
    };

    let min_sq = min_distance * min_distance;
    let mut tries = 1;
    while position.distance_squared(player) < min_sq && tries < attempts {
        position = sample(rng);
        tries += 1;
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::*;
    use crate::resources::TextureRegistry;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(Tuning::default(), seed, &TextureRegistry::with_game_textures());
        state.start_new_game();
        state
    }

    #[test]
    fn test_new_starts_at_menu_with_nothing_active() {
        let state = GameState::new(Tuning::default(), 1, &TextureRegistry::new());
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert!(state.player().is_none());
        assert_eq!(state.enemies().count(), 0);
    }

    #[test]
    fn test_start_new_game_spawns_player_and_opening_enemies() {
        let state = playing(42);
        assert_eq!(state.phase, GamePhase::Playing);
        let player = state.player().unwrap();
        assert!(player.is_alive());
        assert_eq!(player.position, state.arena().center());
        assert_eq!(state.enemies().count(), INITIAL_ENEMIES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_returns_everything_to_pools() {
        let mut state = playing(3);
        let mut audio = NullAudio;
        state.player_shoot(&mut audio);
        state.start_new_game();
        assert_eq!(state.bullets().count(), 0);
        assert_eq!(state.enemy_pool.in_use(), INITIAL_ENEMIES);
        assert_eq!(state.player_pool.in_use(), 1);
    }

    #[test]
    fn test_spawn_respects_concurrent_cap() {
        let mut state = playing(5);
        while state.spawn_enemy().is_some() {}
        assert_eq!(state.enemies().count(), MAX_ENEMIES);
    }

    #[test]
    fn test_spawn_dropped_when_pool_exhausted() {
        let mut tuning = Tuning::default();
        tuning.pools.enemies = 1;
        tuning.enemy.initial_count = 0;
        let mut state = GameState::new(tuning, 9, &TextureRegistry::new());
        state.start_new_game();
        assert!(state.spawn_enemy().is_some());
        assert!(state.spawn_enemy().is_none());
    }

    #[test]
    fn test_player_shoot_gated_by_cooldown() {
        let mut state = playing(11);
        let mut audio = NullAudio;
        assert!(state.player_shoot(&mut audio));
        assert!(!state.player_shoot(&mut audio));
        assert_eq!(state.bullets().count(), 1);
        assert!(state.bullets().all(|b| b.is_player_bullet()));
    }

    #[test]
    fn test_bullet_cap_drops_shots() {
        let mut tuning = Tuning::default();
        tuning.bullets.max_active = 2;
        let mut state = GameState::new(tuning, 12, &TextureRegistry::new());
        state.start_new_game();
        let mut audio = NullAudio;

        let handles: Vec<_> = state.active_enemies.clone();
        for &h in &handles {
            assert!(state.enemy_shoot(h, &mut audio));
        }
        assert!(!state.player_shoot(&mut audio));
        assert_eq!(state.bullets().count(), 2);
    }

    #[test]
    fn test_heavy_enemy_fires_heavy_bullet() {
        let mut state = playing(13);
        let h = state.active_enemies[0];
        let pos = state.enemy_pool[h].position;
        state.enemy_pool[h].initialize(
            pos,
            EnemyKind::Heavy,
            state.arena,
            SHIP_SPRITE_SIZE,
            SPRITE_BOUNDS_TIGHTNESS,
            &mut state.rng,
        );
        assert!(state.enemy_shoot(h, &mut NullAudio));
        let bullet = state.bullets().last().unwrap();
        assert!(bullet.is_heavy());
        assert!(!bullet.is_player_bullet());
    }

    #[test]
    fn test_pause_toggle_only_from_play() {
        let mut state = playing(14);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);

        state.return_to_menu();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert!(state.player().is_none());
    }

    #[test]
    fn test_spawn_position_keeps_distance_when_possible() {
        let mut rng = Pcg32::seed_from_u64(21);
        let arena = Rect::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT));
        let player = arena.center();
        for _ in 0..200 {
            let pos = spawn_position(&mut rng, arena, Some(player), 150.0, 10);
            assert!(arena.contains(pos));
            // Ten straight samples inside the circle is vanishingly unlikely
            assert!(pos.distance(player) >= 150.0);
        }
    }

    #[test]
    fn test_spawn_position_falls_back_to_last_sample() {
        // Unsatisfiable: every point of a tiny arena is too close
        let arena = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let mut rng = Pcg32::seed_from_u64(22);
        let mut replay = Pcg32::seed_from_u64(22);

        let pos = spawn_position(&mut rng, arena, Some(Vec2::splat(5.0)), 150.0, 10);

        let mut last = Vec2::ZERO;
        for _ in 0..10 {
            last = Vec2::new(replay.random::<f32>(), replay.random::<f32>()) * 10.0;
        }
        assert_eq!(pos, last);
    }

    #[test]
    fn test_diagnostics_track_pools() {
        let state = playing(30);
        let d = state.diagnostics();
        assert_eq!(d.active_enemies, INITIAL_ENEMIES);
        assert_eq!(d.enemy_pool.current_active, INITIAL_ENEMIES);
        assert!((d.enemy_usage - INITIAL_ENEMIES as f32 / ENEMY_POOL_SIZE as f32).abs() < 1e-6);
    }

    #[test]
    fn test_particle_capacity_comes_from_tuning() {
        let tuning = Tuning::from_json_str(r#"{ "particles": { "capacity": 50 } }"#).unwrap();
        let state = GameState::new(tuning, 31, &TextureRegistry::new());
        assert_eq!(state.particles().capacity(), 50);
    }
}
