//! Axis-aligned rectangles, colors and vector helpers
//!
//! Collision in this game is rectangle vs rectangle. Every entity reports a
//! "tight" rectangle: its visual footprint shrunk by a fixed ratio around the
//! centre, so sprite padding never registers as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Shrink (or grow) around the centre, keeping the centre fixed
    pub fn scaled(&self, ratio: f32) -> Rect {
        Rect::from_center(self.center(), self.size * ratio)
    }

    /// Shrink every edge inward by `margin`
    pub fn inset(&self, margin: f32) -> Rect {
        Rect {
            min: self.min + Vec2::splat(margin),
            size: (self.size - Vec2::splat(2.0 * margin)).max(Vec2::ZERO),
        }
    }

    /// Grow every edge outward by `margin`
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            min: self.min - Vec2::splat(margin),
            size: self.size + Vec2::splat(2.0 * margin),
        }
    }

    /// Clamp a point into the rectangle
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max())
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 128, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(5.0), Vec2::splat(10.0));
        let c = Rect::new(Vec2::new(20.0, 0.0), Vec2::splat(5.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_scaled_keeps_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::splat(64.0));
        let tight = r.scaled(0.6);
        assert!((tight.center() - r.center()).length() < 1e-4);
        assert!((tight.width() - 38.4).abs() < 1e-4);
    }

    #[test]
    fn test_inset_and_clamp() {
        let field = Rect::new(Vec2::ZERO, Vec2::new(1280.0, 960.0)).inset(20.0);
        assert_eq!(field.min, Vec2::splat(20.0));
        assert_eq!(field.max(), Vec2::new(1260.0, 940.0));
        assert_eq!(field.clamp(Vec2::new(-5.0, 2000.0)), Vec2::new(20.0, 940.0));
    }
}
