//! Capabilities shared by every pooled entity kind
//!
//! Player, enemy and bullet are separate concrete types. What the pipeline
//! needs from all of them is small: advance one step, report tight bounds,
//! and say whether they are still alive.

use glam::Vec2;

use super::geometry::Rect;

/// Something the tick pipeline advances and collides
pub trait Simulated {
    /// Advance physical state by `dt` seconds
    fn update(&mut self, dt: f32);
    /// Tight collision rectangle
    fn bounds(&self) -> Rect;
    fn is_alive(&self) -> bool;
    fn position(&self) -> Vec2;
}

/// An object that can live in an [`ObjectPool`](super::pool::ObjectPool)
///
/// `reset` must return the object to its canonical inert state: everything
/// a later `initialize` would overwrite is defaulted and `is_alive` is false.
pub trait Poolable: Default {
    fn reset(&mut self) {
        *self = Self::default();
    }
}
