//! Cosmetic particle bursts
//!
//! Structure-of-arrays storage sized once at construction. Live particles
//! occupy `0..active_count`; anything past the cursor is stale and ignored.
//! Nothing here affects gameplay.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::geometry::Color;
use crate::tuning::ParticleTuning;

/// Draw radius of a single particle
pub const PARTICLE_RADIUS: f32 = 2.0;

/// Read-only view of one live particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: Vec2,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    colors: Vec<Color>,
    lifetimes: Vec<f32>,
    max_lifetimes: Vec<f32>,
    active_count: usize,
    lifetime: f32,
    min_speed: f32,
    max_speed: f32,
}

impl ParticleSystem {
    pub fn new(tuning: &ParticleTuning) -> Self {
        let capacity = tuning.capacity;
        Self {
            positions: vec![Vec2::ZERO; capacity],
            velocities: vec![Vec2::ZERO; capacity],
            colors: vec![Color::TRANSPARENT; capacity],
            lifetimes: vec![0.0; capacity],
            max_lifetimes: vec![0.0; capacity],
            active_count: 0,
            lifetime: tuning.lifetime,
            min_speed: tuning.min_speed,
            max_speed: tuning.max_speed,
        }
    }

    /// Emit up to `count` particles at `position`.
    ///
    /// Admits `min(count, capacity - active_count)` and returns how many were
    /// added. Each flies off at a uniformly random angle and speed.
    pub fn emit<R: Rng + ?Sized>(&mut self, position: Vec2, color: Color, count: usize, rng: &mut R) -> usize {
        let to_add = count.min(self.capacity() - self.active_count);
        if to_add < count {
            log::trace!("Particle cap reached, dropped {}", count - to_add);
        }

        for _ in 0..to_add {
            let i = self.active_count;
            let angle = rng.random_range(0.0..TAU);
            let speed = if self.max_speed > self.min_speed {
                rng.random_range(self.min_speed..self.max_speed)
            } else {
                self.min_speed
            };

            self.positions[i] = position;
            self.velocities[i] = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.colors[i] = color.with_alpha(255);
            self.lifetimes[i] = 0.0;
            self.max_lifetimes[i] = self.lifetime;
            self.active_count += 1;
        }
        to_add
    }

    /// Age, move and fade every live particle, dropping expired ones.
    ///
    /// Survivors are shifted down over the gaps in their original order so
    /// the live region stays contiguous.
    pub fn update(&mut self, dt: f32) {
        let mut write = 0;

        for read in 0..self.active_count {
            let life = self.lifetimes[read] + dt;
            let max_life = self.max_lifetimes[read];
            if life >= max_life {
                continue;
            }

            let position = self.positions[read] + self.velocities[read] * dt;
            let alpha = (255.0 * (1.0 - life / max_life)) as u8;

            self.positions[write] = position;
            self.velocities[write] = self.velocities[read];
            self.colors[write] = self.colors[read].with_alpha(alpha);
            self.lifetimes[write] = life;
            self.max_lifetimes[write] = max_life;
            write += 1;
        }

        self.active_count = write;
    }

    /// Forget every particle; storage stays allocated
    pub fn clear(&mut self) {
        self.active_count = 0;
    }

    pub fn iter_active(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.positions[..self.active_count]
            .iter()
            .zip(&self.colors[..self.active_count])
            .map(|(&position, &color)| ParticleView { position, color })
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }
}
