//! Data-driven game balance
//!
//! Every number the simulation consumes lives here. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Play-field dimensions and frame clamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
    /// Largest delta time a single tick integrates
    pub max_delta_time: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            max_delta_time: MAX_DELTA_TIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    pub max_health: f32,
    pub shoot_cooldown: f32,
    /// Inset from the arena edge the ship is clamped to
    pub bounds_margin: f32,
    pub sprite_size: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            bounds_margin: PLAYER_BOUNDS_MARGIN,
            sprite_size: SHIP_SPRITE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_concurrent: usize,
    pub spawn_cooldown: f32,
    pub min_spawn_distance: f32,
    pub spawn_attempts: u32,
    pub initial_count: usize,
    pub sprite_size: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_concurrent: MAX_ENEMIES,
            spawn_cooldown: ENEMY_SPAWN_COOLDOWN,
            min_spawn_distance: ENEMY_MIN_SPAWN_DISTANCE,
            spawn_attempts: ENEMY_SPAWN_ATTEMPTS,
            initial_count: INITIAL_ENEMIES,
            sprite_size: SHIP_SPRITE_SIZE,
        }
    }
}

/// Ballistics for one bullet owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticTuning {
    pub speed: f32,
    pub damage: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub player: BallisticTuning,
    pub enemy: BallisticTuning,
    /// Cap on simultaneously live bullets (player + enemy)
    pub max_active: usize,
    pub expiry_margin: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            player: BallisticTuning {
                speed: BULLET_SPEED,
                damage: PLAYER_DAMAGE,
                radius: PLAYER_BULLET_RADIUS,
            },
            enemy: BallisticTuning {
                speed: ENEMY_BULLET_SPEED,
                damage: ENEMY_DAMAGE,
                radius: ENEMY_BULLET_RADIUS,
            },
            max_active: MAX_BULLETS,
            expiry_margin: BULLET_EXPIRY_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    pub capacity: usize,
    pub lifetime: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            capacity: MAX_PARTICLES,
            lifetime: PARTICLE_LIFETIME,
            min_speed: PARTICLE_MIN_SPEED,
            max_speed: PARTICLE_MAX_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolTuning {
    pub bullets: usize,
    pub enemies: usize,
    pub max_explosions: usize,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            bullets: BULLET_POOL_SIZE,
            enemies: ENEMY_POOL_SIZE,
            max_explosions: MAX_EXPLOSION_POOL,
        }
    }
}

/// Collision and sprite presentation ratios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsTuning {
    pub ship_tightness: f32,
    pub bullet_tightness: f32,
    pub sprite_orientation_offset: f32,
}

impl Default for BoundsTuning {
    fn default() -> Self {
        Self {
            ship_tightness: SPRITE_BOUNDS_TIGHTNESS,
            bullet_tightness: BULLET_BOUNDS_TIGHTNESS,
            sprite_orientation_offset: SPRITE_ORIENTATION_OFFSET,
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub bullets: BulletTuning,
    pub particles: ParticleTuning,
    pub pools: PoolTuning,
    pub bounds: BoundsTuning,
}

impl Tuning {
    /// Parse and validate a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }
        fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
            if value > 0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than 0".into(),
                })
            }
        }

        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("arena.max_delta_time", self.arena.max_delta_time)?;
        positive("player.max_health", self.player.max_health)?;
        positive("bullets.player.speed", self.bullets.player.speed)?;
        positive("bullets.enemy.speed", self.bullets.enemy.speed)?;
        nonzero("pools.bullets", self.pools.bullets)?;
        nonzero("pools.enemies", self.pools.enemies)?;
        nonzero("particles.capacity", self.particles.capacity)?;

        if self.particles.min_speed > self.particles.max_speed {
            return Err(ConfigError::Invalid {
                field: "particles.min_speed",
                reason: "exceeds particles.max_speed".into(),
            });
        }
        if 2.0 * self.player.bounds_margin >= self.arena.width.min(self.arena.height) {
            return Err(ConfigError::Invalid {
                field: "player.bounds_margin",
                reason: "leaves no room to move".into(),
            });
        }
        Ok(())
    }
}
