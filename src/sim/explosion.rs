//! One-shot sprite-sheet explosions
//!
//! Every explosion plays the same 4x4 sheet once. The kind picks how big it is
//! drawn and how long each frame is held. Finished animations stay in the
//! manager's pool and are reused by later explosions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::resources::{ResourceProvider, names};

/// Frames per sheet row
pub const SHEET_COLUMNS: u32 = 4;
/// Frames in a full animation
pub const TOTAL_FRAMES: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Bullet impacts and fast enemies
    Small,
    #[default]
    Medium,
    /// Player and heavy enemies
    Large,
}

impl ExplosionKind {
    pub fn scale(self) -> f32 {
        match self {
            Self::Small => 0.6,
            Self::Medium => 1.0,
            Self::Large => 1.5,
        }
    }

    /// Seconds each frame is held
    pub fn frame_time(self) -> f32 {
        match self {
            Self::Small => 0.06,
            Self::Medium => 0.08,
            Self::Large => 0.1,
        }
    }

    /// Full playback length
    pub fn duration(self) -> f32 {
        self.frame_time() * TOTAL_FRAMES as f32
    }
}

/// Layout of the explosion texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub texture: &'static str,
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    pub fn frame_size(&self) -> (u32, u32) {
        let rows = TOTAL_FRAMES / SHEET_COLUMNS;
        (self.width / SHEET_COLUMNS, self.height / rows)
    }

    /// Source rectangle of `frame` in texture pixels
    pub fn frame_rect(&self, frame: u32) -> Rect {
        let (w, h) = self.frame_size();
        let col = frame % SHEET_COLUMNS;
        let row = frame / SHEET_COLUMNS;
        Rect::new(
            Vec2::new((col * w) as f32, (row * h) as f32),
            Vec2::new(w as f32, h as f32),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplosionAnimation {
    pub position: Vec2,
    kind: ExplosionKind,
    active: bool,
    frame: u32,
    elapsed: f32,
}

impl ExplosionAnimation {
    pub fn initialize(&mut self, position: Vec2, kind: ExplosionKind) {
        self.position = position;
        self.kind = kind;
        self.active = true;
        self.frame = 0;
        self.elapsed = 0.0;
    }

    /// Step the frame once per elapsed frame time; deactivates instead of
    /// moving past the last frame
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let frame_time = self.kind.frame_time();
        self.elapsed += dt;

        while self.elapsed >= frame_time {
            self.elapsed -= frame_time;
            if self.frame + 1 >= TOTAL_FRAMES {
                self.active = false;
                return;
            }
            self.frame += 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> ExplosionKind {
        self.kind
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}

/// Owns every explosion animation
#[derive(Debug, Clone)]
pub struct ExplosionManager {
    animations: Vec<ExplosionAnimation>,
    sheet: Option<SpriteSheet>,
    max_pool: usize,
}

impl ExplosionManager {
    /// Look up the explosion sheet; without it every explosion is skipped
    pub fn new(provider: &dyn ResourceProvider, max_pool: usize) -> Self {
        let sheet = match provider.texture(names::EXPLOSION) {
            Some(info) => {
                log::debug!("Explosion sheet {}x{}", info.width, info.height);
                Some(SpriteSheet {
                    texture: names::EXPLOSION,
                    width: info.width,
                    height: info.height,
                })
            }
            None => {
                log::warn!("No explosion texture found, explosions disabled");
                None
            }
        };

        Self {
            animations: Vec::with_capacity(max_pool),
            sheet,
            max_pool,
        }
    }

    /// Start an explosion, reusing a finished animation when one exists.
    ///
    /// Returns false when no sheet is loaded.
    pub fn create_explosion(&mut self, position: Vec2, kind: ExplosionKind) -> bool {
        if self.sheet.is_none() {
            return false;
        }

        match self.animations.iter_mut().find(|a| !a.is_active()) {
            Some(anim) => anim.initialize(position, kind),
            None => {
                let mut anim = ExplosionAnimation::default();
                anim.initialize(position, kind);
                self.animations.push(anim);
            }
        }
        true
    }

    pub fn update(&mut self, dt: f32) {
        for anim in self.animations.iter_mut().filter(|a| a.is_active()) {
            anim.update(dt);
        }
    }

    /// Shrink the pool back toward `max_pool` once it has grown past it.
    ///
    /// Only finished animations are dropped, newest slots first; playing
    /// ones are never cut short.
    pub fn cleanup(&mut self) {
        let mut i = self.animations.len();
        while self.animations.len() > self.max_pool && i > 0 {
            i -= 1;
            if !self.animations[i].is_active() {
                self.animations.remove(i);
            }
        }
    }

    /// Drop every animation (new round)
    pub fn clear(&mut self) {
        self.animations.clear();
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &ExplosionAnimation> {
        self.animations.iter().filter(|a| a.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn pool_len(&self) -> usize {
        self.animations.len()
    }

    pub fn sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.sheet.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{TextureInfo, TextureRegistry};

    fn manager() -> ExplosionManager {
        ExplosionManager::new(&TextureRegistry::with_game_textures(), 20)
    }

    #[test]
    fn test_one_shot_playback() {
        let mut anim = ExplosionAnimation::default();
        anim.initialize(Vec2::ZERO, ExplosionKind::Small);

        let dt = 0.01;
        let mut steps = 0;
        while anim.is_active() {
            assert!(anim.frame() < TOTAL_FRAMES);
            anim.update(dt);
            steps += 1;
            assert!(steps < 1000, "never finished");
        }
        let played = steps as f32 * dt;
        let expected = ExplosionKind::Small.duration();
        assert!((played - expected).abs() <= 2.0 * dt, "played {played}, expected {expected}");
        assert_eq!(anim.frame(), TOTAL_FRAMES - 1);
    }

    #[test]
    fn test_large_step_skips_frames_but_stops_at_last() {
        let mut anim = ExplosionAnimation::default();
        anim.initialize(Vec2::ZERO, ExplosionKind::Medium);
        anim.update(0.25);
        assert_eq!(anim.frame(), 3);
        anim.update(10.0);
        assert!(!anim.is_active());
        assert_eq!(anim.frame(), TOTAL_FRAMES - 1);
    }

    #[test]
    fn test_kind_timings_order() {
        assert!(ExplosionKind::Small.duration() < ExplosionKind::Medium.duration());
        assert!(ExplosionKind::Medium.duration() < ExplosionKind::Large.duration());
        assert!(ExplosionKind::Small.scale() < ExplosionKind::Large.scale());
    }

    #[test]
    fn test_frame_rect_layout() {
        let sheet = SpriteSheet {
            texture: names::EXPLOSION,
            width: 512,
            height: 512,
        };
        assert_eq!(sheet.frame_size(), (128, 128));
        let r = sheet.frame_rect(6);
        assert_eq!(r.min, Vec2::new(256.0, 128.0));
        assert_eq!(r.size, Vec2::splat(128.0));
    }

    #[test]
    fn test_reuses_finished_animation() {
        let mut m = manager();
        assert!(m.create_explosion(Vec2::ZERO, ExplosionKind::Small));
        m.update(10.0);
        assert_eq!(m.active_count(), 0);
        assert!(m.create_explosion(Vec2::ONE, ExplosionKind::Large));
        assert_eq!(m.pool_len(), 1);
        assert_eq!(m.active_count(), 1);
    }

    #[test]
    fn test_missing_sheet_disables_explosions() {
        let mut m = ExplosionManager::new(&TextureRegistry::new(), 20);
        assert!(!m.is_enabled());
        assert!(!m.create_explosion(Vec2::ZERO, ExplosionKind::Medium));
        assert_eq!(m.pool_len(), 0);
    }

    #[test]
    fn test_cleanup_trims_only_finished_surplus() {
        let mut registry = TextureRegistry::new();
        registry.insert(names::EXPLOSION, TextureInfo { width: 256, height: 256 });
        let mut m = ExplosionManager::new(&registry, 4);

        for _ in 0..6 {
            m.create_explosion(Vec2::ZERO, ExplosionKind::Small);
        }
        // All still playing: nothing may be removed
        m.cleanup();
        assert_eq!(m.pool_len(), 6);

        m.update(10.0);
        m.create_explosion(Vec2::ZERO, ExplosionKind::Large);
        m.cleanup();
        assert_eq!(m.pool_len(), 4);
        assert_eq!(m.active_count(), 1);
    }

    #[test]
    fn test_cleanup_below_cap_is_noop() {
        let mut m = manager();
        m.create_explosion(Vec2::ZERO, ExplosionKind::Small);
        m.update(10.0);
        m.cleanup();
        assert_eq!(m.pool_len(), 1);
    }
}
