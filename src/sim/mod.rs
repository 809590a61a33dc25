//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only, threaded explicitly
//! - Stable iteration order (active lists keep spawn order)
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod explosion;
pub mod geometry;
pub mod particles;
pub mod player;
pub mod pool;
pub mod state;
pub mod tick;

pub use bullet::{Bullet, BulletOwner};
pub use collision::{HitTarget, bullet_target, first_overlap};
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Poolable, Simulated};
pub use explosion::{ExplosionAnimation, ExplosionKind, ExplosionManager, SpriteSheet};
pub use geometry::{Color, Rect};
pub use particles::{ParticleSystem, ParticleView};
pub use player::Player;
pub use pool::{Handle, ObjectPool, PoolStats};
pub use state::{Diagnostics, GameEvent, GamePhase, GameState, spawn_position};
pub use tick::{TickInput, tick};
