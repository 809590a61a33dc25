//! Straight-line projectiles
//!
//! A bullet's owner decides its speed, damage and size, and which targets
//! the collision pass tests it against.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Poolable, Simulated};
use super::geometry::Rect;
use crate::angle_of;
use crate::consts::BULLET_SPRITE_RADII;
use crate::tuning::BallisticTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletOwner {
    #[default]
    Player,
    Enemy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Travel direction in degrees
    pub rotation: f32,
    alive: bool,
    owner: BulletOwner,
    damage: f32,
    radius: f32,
    /// Leaving this region kills the bullet
    live_region: Rect,
    tightness: f32,
    /// Fired by a heavy enemy (selects the heavy sprite)
    heavy: bool,
}

impl Poolable for Bullet {}

impl Bullet {
    /// Arm a freshly acquired bullet.
    ///
    /// `direction` need not be normalized. The bullet dies once it leaves the
    /// arena grown by `expiry_margin` on every side.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        position: Vec2,
        direction: Vec2,
        owner: BulletOwner,
        ballistics: &BallisticTuning,
        arena: Rect,
        expiry_margin: f32,
        tightness: f32,
    ) {
        self.position = position;
        self.owner = owner;
        self.alive = true;
        self.damage = ballistics.damage;
        self.radius = ballistics.radius;
        self.velocity = direction.normalize_or_zero() * ballistics.speed;
        self.rotation = angle_of(direction);
        self.live_region = arena.expanded(expiry_margin);
        self.tightness = tightness;
        self.heavy = false;
    }

    pub fn set_heavy(&mut self, heavy: bool) {
        self.heavy = heavy;
    }

    pub fn is_heavy(&self) -> bool {
        self.heavy
    }

    pub fn owner(&self) -> BulletOwner {
        self.owner
    }

    pub fn is_player_bullet(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Edge length of the sprite square
    pub fn footprint(&self) -> f32 {
        self.radius * BULLET_SPRITE_RADII
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Simulated for Bullet {
    fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.position += self.velocity * dt;

        let min = self.live_region.min;
        let max = self.live_region.max();
        if self.position.x < min.x || self.position.x > max.x || self.position.y < min.y || self.position.y > max.y {
            self.alive = false;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(self.footprint())).scaled(self.tightness)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}
