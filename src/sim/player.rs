//! The player's ship
//!
//! 8-directional movement from held keys, clamped to an inset play field,
//! with a shot cooldown and health that only goes down.

use glam::Vec2;

use super::entity::{Poolable, Simulated};
use super::geometry::Rect;
use crate::tuning::PlayerTuning;
use crate::{angle_of, heading};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing in degrees (0 = +x)
    pub rotation: f32,
    alive: bool,
    health: f32,
    max_health: f32,
    shoot_cooldown: f32,
    shoot_cooldown_time: f32,
    speed: f32,
    /// Region the ship centre is clamped to
    movement_bounds: Rect,
    /// Visual footprint (edge length of the sprite square)
    footprint: f32,
    tightness: f32,
}

impl Poolable for Player {}

impl Player {
    /// Arm a freshly acquired player at `position`
    pub fn initialize(&mut self, position: Vec2, arena: Rect, tuning: &PlayerTuning, tightness: f32) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.rotation = 0.0;
        self.alive = true;
        self.max_health = tuning.max_health;
        self.health = tuning.max_health;
        self.shoot_cooldown = 0.0;
        self.shoot_cooldown_time = tuning.shoot_cooldown;
        self.speed = tuning.speed;
        self.movement_bounds = arena.inset(tuning.bounds_margin);
        self.footprint = tuning.sprite_size;
        self.tightness = tightness;
    }

    /// Move according to held directions.
    ///
    /// `axis` components are -1, 0 or 1. Diagonals are renormalized so moving
    /// diagonally is no faster than moving along one axis.
    pub fn apply_movement(&mut self, axis: Vec2, dt: f32) {
        let mut movement = axis * self.speed;
        if movement.x != 0.0 && movement.y != 0.0 {
            movement = movement.normalize() * self.speed;
        }

        self.velocity = movement;
        self.position = self.movement_bounds.clamp(self.position + movement * dt);

        if movement != Vec2::ZERO {
            self.rotation = angle_of(movement);
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    pub fn reset_shoot_cooldown(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown_time;
    }

    /// Unit vector the ship faces
    pub fn shoot_direction(&self) -> Vec2 {
        heading(self.rotation)
    }

    /// Where a new bullet appears: just past the tight bounds along the facing
    pub fn muzzle_position(&self) -> Vec2 {
        let radius = self.footprint * self.tightness * 0.5;
        self.position + self.shoot_direction() * (radius + crate::consts::MUZZLE_CLEARANCE)
    }

    /// Health never goes below zero; reaching zero kills the ship
    pub fn take_damage(&mut self, damage: f32) {
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction of maximum (0 when uninitialized)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn footprint(&self) -> f32 {
        self.footprint
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Simulated for Player {
    fn update(&mut self, dt: f32) {
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn arena() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    fn spawned() -> Player {
        let mut p = Player::default();
        p.initialize(
            Vec2::new(640.0, 480.0),
            arena(),
            &PlayerTuning::default(),
            SPRITE_BOUNDS_TIGHTNESS,
        );
        p
    }

    #[test]
    fn test_diagonal_speed_is_normalized() {
        let mut p = spawned();
        let start = p.position;
        p.apply_movement(Vec2::new(1.0, 1.0), 0.1);
        let moved = (p.position - start).length();
        assert!((moved - PLAYER_SPEED * 0.1).abs() < 1e-3);
        assert!((p.rotation - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_axis_movement() {
        let mut p = spawned();
        p.apply_movement(Vec2::new(-1.0, 0.0), 0.1);
        assert!((p.position.x - (640.0 - 30.0)).abs() < 1e-3);
        assert!((p.rotation.abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamped_to_inset_field() {
        let mut p = spawned();
        for _ in 0..200 {
            p.apply_movement(Vec2::new(1.0, -1.0), 1.0 / 30.0);
        }
        assert_eq!(p.position.x, ARENA_WIDTH - PLAYER_BOUNDS_MARGIN);
        assert_eq!(p.position.y, PLAYER_BOUNDS_MARGIN);
    }

    #[test]
    fn test_idle_keeps_rotation() {
        let mut p = spawned();
        p.apply_movement(Vec2::new(0.0, 1.0), 0.1);
        p.apply_movement(Vec2::ZERO, 0.1);
        assert!((p.rotation - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_damage_clamps_and_kills() {
        let mut p = spawned();
        p.take_damage(30.0);
        assert_eq!(p.health(), 70.0);
        assert!(p.is_alive());
        p.take_damage(500.0);
        assert_eq!(p.health(), 0.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_exact_zero_kills() {
        let mut p = spawned();
        p.take_damage(PLAYER_MAX_HEALTH);
        assert_eq!(p.health(), 0.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_shoot_cooldown_gate() {
        let mut p = spawned();
        assert!(p.can_shoot());
        p.reset_shoot_cooldown();
        assert!(!p.can_shoot());
        p.update(0.05);
        assert!(!p.can_shoot());
        p.update(0.25);
        assert!(p.can_shoot());
    }

    #[test]
    fn test_tight_bounds_centered() {
        let p = spawned();
        let b = p.bounds();
        assert!((b.center() - p.position).length() < 1e-4);
        assert!((b.width() - SHIP_SPRITE_SIZE * SPRITE_BOUNDS_TIGHTNESS).abs() < 1e-4);
    }

    #[test]
    fn test_muzzle_outside_bounds() {
        let p = spawned();
        assert!(!p.bounds().contains(p.muzzle_position()));
        assert!(p.muzzle_position().x > p.position.x);
    }

    #[test]
    fn test_reset_matches_default() {
        let mut p = spawned();
        p.take_damage(10.0);
        p.reset();
        assert_eq!(p, Player::default());
        assert!(!p.is_alive());
    }
}
