//! Enemy ships
//!
//! Three variants share one state machine: wander along a heading that is
//! re-rolled every few seconds, bounce off the arena edges, and always turn
//! to face the player so shots go where the ship is looking.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Poolable, Simulated};
use super::geometry::{Color, Rect};
use crate::consts::MUZZLE_CLEARANCE;
use crate::{angle_of, heading};

/// Seconds an enemy keeps its heading before it may pick a new one
pub const WANDER_THRESHOLD: f32 = 2.0;
/// Extra random dwell on top of the threshold (uniform in `0..WANDER_JITTER`)
pub const WANDER_JITTER: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Heavy,
}

impl EnemyKind {
    pub fn max_health(self) -> f32 {
        match self {
            EnemyKind::Basic => 50.0,
            EnemyKind::Fast => 30.0,
            EnemyKind::Heavy => 100.0,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Basic => 100.0,
            EnemyKind::Fast => 200.0,
            EnemyKind::Heavy => 50.0,
        }
    }

    pub fn shoot_cooldown(self) -> f32 {
        match self {
            EnemyKind::Basic => 2.0,
            EnemyKind::Fast => 1.5,
            EnemyKind::Heavy => 3.0,
        }
    }

    /// Radius of the shape drawn when no sprite is available; also the
    /// distance kept from the arena edges
    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Basic => 15.0,
            EnemyKind::Fast => 10.0,
            EnemyKind::Heavy => 20.0,
        }
    }

    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Fast => 20,
            EnemyKind::Heavy => 30,
        }
    }

    pub fn color(self) -> Color {
        match self {
            EnemyKind::Basic => Color::MAGENTA,
            EnemyKind::Fast => Color::GREEN,
            EnemyKind::Heavy => Color::ORANGE,
        }
    }

    /// Weighted pick from a uniform roll in `[0, 1)`: 50% basic, 30% fast, 20% heavy
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.5 {
            EnemyKind::Basic
        } else if roll < 0.8 {
            EnemyKind::Fast
        } else {
            EnemyKind::Heavy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enemy {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing in degrees, toward the player
    pub rotation: f32,
    kind: EnemyKind,
    alive: bool,
    health: f32,
    max_health: f32,
    shoot_cooldown: f32,
    move_timer: f32,
    /// Unit wander heading (independent of facing)
    wander_direction: Vec2,
    arena: Rect,
    footprint: f32,
    tightness: f32,
    /// Draw alpha, recomputed every update from remaining health
    tint_alpha: u8,
}

impl Poolable for Enemy {}

impl Enemy {
    /// Arm a freshly acquired enemy with a random initial heading
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        position: Vec2,
        kind: EnemyKind,
        arena: Rect,
        footprint: f32,
        tightness: f32,
        rng: &mut R,
    ) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.rotation = 0.0;
        self.kind = kind;
        self.alive = true;
        self.max_health = kind.max_health();
        self.health = self.max_health;
        self.shoot_cooldown = kind.shoot_cooldown();
        self.move_timer = 0.0;
        self.wander_direction = random_unit(rng);
        self.arena = arena;
        self.footprint = footprint;
        self.tightness = tightness;
        self.tint_alpha = 255;
    }

    /// Maybe re-roll the wander heading.
    ///
    /// Nothing happens until the move timer passes [`WANDER_THRESHOLD`]; after
    /// that each call draws a dwell in `0..WANDER_JITTER` and turns once the
    /// timer exceeds threshold + dwell.
    pub fn update_ai<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.alive || self.move_timer <= WANDER_THRESHOLD {
            return;
        }
        let dwell = rng.random_range(0.0..WANDER_JITTER);
        if self.move_timer > WANDER_THRESHOLD + dwell {
            self.move_timer = 0.0;
            self.wander_direction = random_unit(rng);
        }
    }

    /// Turn to face `target` (leaves facing unchanged if exactly on top of it)
    pub fn face_target(&mut self, target: Vec2) {
        let to_target = target - self.position;
        if to_target != Vec2::ZERO {
            self.rotation = angle_of(to_target);
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    pub fn reset_shoot_cooldown(&mut self) {
        self.shoot_cooldown = self.kind.shoot_cooldown();
    }

    /// Unit vector the ship faces
    pub fn shoot_direction(&self) -> Vec2 {
        heading(self.rotation)
    }

    /// Bullet spawn point just outside the tight bounds along the facing
    pub fn muzzle_position(&self) -> Vec2 {
        let radius = self.footprint * self.tightness * 0.5;
        self.position + self.shoot_direction() * (radius + MUZZLE_CLEARANCE)
    }

    pub fn take_damage(&mut self, damage: f32) {
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn score_value(&self) -> u32 {
        self.kind.score_value()
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn wander_direction(&self) -> Vec2 {
        self.wander_direction
    }

    pub fn footprint(&self) -> f32 {
        self.footprint
    }

    /// Base color with the damage fade applied
    pub fn tint(&self) -> Color {
        self.kind.color().with_alpha(self.tint_alpha)
    }

    pub fn tint_alpha(&self) -> u8 {
        self.tint_alpha
    }

    #[cfg(test)]
    pub(crate) fn set_wander_direction(&mut self, direction: Vec2) {
        self.wander_direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn set_move_timer(&mut self, t: f32) {
        self.move_timer = t;
    }
}

impl Simulated for Enemy {
    fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        self.move_timer += dt;

        self.velocity = self.wander_direction * self.kind.speed();
        self.position += self.velocity * dt;

        // Bounce off the arena edges, keeping the whole shape inside
        let radius = self.kind.radius();
        let min = self.arena.min + Vec2::splat(radius);
        let max = self.arena.max() - Vec2::splat(radius);
        if self.position.x < min.x || self.position.x > max.x {
            self.wander_direction.x = -self.wander_direction.x;
            self.position.x = self.position.x.clamp(min.x, max.x);
        }
        if self.position.y < min.y || self.position.y > max.y {
            self.wander_direction.y = -self.wander_direction.y;
            self.position.y = self.position.y.clamp(min.y, max.y);
        }

        self.tint_alpha = if self.health < self.max_health {
            let pct = self.health / self.max_health;
            (128.0 + 127.0 * pct) as u8
        } else {
            255
        };
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(self.footprint)).scaled(self.tightness)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}
