//! Space Defender - a 2D arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, entities, collisions, effects)
//! - `renderer`: Read-only scene walk emitting draw commands
//! - `audio`: Fire-and-forget sound cue sink
//! - `resources`: Texture lookup and sprite resolution
//! - `input`: Held-key snapshot for the simulation tick
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod input;
pub mod perf;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Arena dimensions (the play field spans `0..ARENA_WIDTH` x `0..ARENA_HEIGHT`)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 960.0;

    /// Largest single integration step, prevents spiral of death
    pub const MAX_DELTA_TIME: f32 = 1.0 / 30.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.2;
    pub const PLAYER_BOUNDS_MARGIN: f32 = 20.0;
    pub const PLAYER_DAMAGE: f32 = 25.0;

    /// Enemy defaults
    pub const MAX_ENEMIES: usize = 3;
    pub const ENEMY_SPAWN_COOLDOWN: f32 = 2.0;
    pub const ENEMY_BULLET_SPEED: f32 = 350.0;
    pub const ENEMY_DAMAGE: f32 = 10.0;
    /// Enemies never spawn closer than this to the player (when satisfiable)
    pub const ENEMY_MIN_SPAWN_DISTANCE: f32 = 150.0;
    pub const ENEMY_SPAWN_ATTEMPTS: u32 = 10;
    /// Enemies placed when a round starts
    pub const INITIAL_ENEMIES: usize = 2;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 600.0;
    pub const MAX_BULLETS: usize = 100;
    pub const PLAYER_BULLET_RADIUS: f32 = 4.0;
    pub const ENEMY_BULLET_RADIUS: f32 = 3.0;
    /// Bullets die once this far outside the arena
    pub const BULLET_EXPIRY_MARGIN: f32 = 50.0;

    /// Particle defaults
    pub const MAX_PARTICLES: usize = 500;
    pub const PARTICLE_LIFETIME: f32 = 1.0;
    pub const PARTICLE_MIN_SPEED: f32 = 100.0;
    pub const PARTICLE_MAX_SPEED: f32 = 300.0;

    /// Pool sizes
    pub const BULLET_POOL_SIZE: usize = 50;
    pub const ENEMY_POOL_SIZE: usize = 10;

    /// Sprite footprint shared by the player and every enemy variant
    pub const SHIP_SPRITE_SIZE: f32 = 64.0;
    /// Bullet sprites are this many radii across
    pub const BULLET_SPRITE_RADII: f32 = 6.0;

    /// Tight collision bounds as a fraction of the visual footprint
    pub const SPRITE_BOUNDS_TIGHTNESS: f32 = 0.6;
    pub const BULLET_BOUNDS_TIGHTNESS: f32 = 0.7;

    /// Ship sprites are drawn pointing down; rotate by this to face heading (degrees)
    pub const SPRITE_ORIENTATION_OFFSET: f32 = 90.0;

    /// Gap between a ship's edge and a freshly fired bullet
    pub const MUZZLE_CLEARANCE: f32 = 5.0;

    /// Explosion pool is trimmed back to this many animations
    pub const MAX_EXPLOSION_POOL: usize = 20;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Unit vector pointing along `degrees` (0 = +x, 90 = +y, screen coordinates)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let r = deg_to_rad(degrees);
    Vec2::new(r.cos(), r.sin())
}

/// Angle of a direction vector in degrees
#[inline]
pub fn angle_of(direction: Vec2) -> f32 {
    rad_to_deg(direction.y.atan2(direction.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_axes() {
        let right = heading(0.0);
        assert!((right - Vec2::X).length() < 1e-6);
        let down = heading(90.0);
        assert!((down - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_angle_of_round_trips_heading() {
        for deg in [-135.0_f32, -45.0, 0.0, 30.0, 120.0] {
            assert!((angle_of(heading(deg)) - deg).abs() < 1e-3);
        }
    }
}
