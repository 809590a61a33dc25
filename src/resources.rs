//! Texture lookup
//!
//! The simulation never loads files. A [`ResourceProvider`] answers whether a
//! named texture exists and how large it is; everything else about assets
//! belongs to the platform layer. Lookups happen once, when a game state is
//! built, and the results are kept in a [`SpriteSet`].

use std::collections::HashMap;

/// Texture names the game asks for
pub mod names {
    pub const PLAYER_SHIP: &str = "player_ship";
    pub const ENEMY_BASIC: &str = "enemy_basic";
    pub const ENEMY_FAST: &str = "enemy_fast";
    pub const ENEMY_HEAVY: &str = "enemy_heavy";
    pub const PLAYER_BULLET: &str = "player_bullet";
    pub const ENEMY_BULLET: &str = "enemy_bullet";
    pub const HEAVY_BULLET: &str = "heavy_bullet";
    pub const EXPLOSION: &str = "explosion";

    pub const ALL: [&str; 8] = [
        PLAYER_SHIP,
        ENEMY_BASIC,
        ENEMY_FAST,
        ENEMY_HEAVY,
        PLAYER_BULLET,
        ENEMY_BULLET,
        HEAVY_BULLET,
        EXPLOSION,
    ];
}

/// Pixel dimensions of a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

/// Texture-by-name lookup
pub trait ResourceProvider {
    fn texture(&self, name: &str) -> Option<TextureInfo>;

    fn has_texture(&self, name: &str) -> bool {
        self.texture(name).is_some()
    }
}

/// In-memory provider; the platform registers whatever it managed to load
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, TextureInfo>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every texture the game knows about, at their usual sizes
    pub fn with_game_textures() -> Self {
        let mut registry = Self::new();
        for name in names::ALL {
            let info = match name {
                names::EXPLOSION => TextureInfo {
                    width: 512,
                    height: 512,
                },
                names::PLAYER_BULLET | names::ENEMY_BULLET | names::HEAVY_BULLET => TextureInfo {
                    width: 16,
                    height: 16,
                },
                _ => TextureInfo { width: 64, height: 64 },
            };
            registry.insert(name, info);
        }
        registry
    }

    pub fn insert(&mut self, name: impl Into<String>, info: TextureInfo) {
        self.textures.insert(name.into(), info);
    }

    pub fn remove(&mut self, name: &str) -> Option<TextureInfo> {
        self.textures.remove(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl ResourceProvider for TextureRegistry {
    fn texture(&self, name: &str) -> Option<TextureInfo> {
        self.textures.get(name).copied()
    }
}

/// Sprite textures resolved once; `None` means draw the procedural shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
    pub player: Option<&'static str>,
    pub enemy_basic: Option<&'static str>,
    pub enemy_fast: Option<&'static str>,
    pub enemy_heavy: Option<&'static str>,
    pub player_bullet: Option<&'static str>,
    pub enemy_bullet: Option<&'static str>,
    pub heavy_bullet: Option<&'static str>,
}

impl SpriteSet {
    pub fn resolve(provider: &dyn ResourceProvider) -> Self {
        let lookup = |name: &'static str| {
            if provider.has_texture(name) {
                Some(name)
            } else {
                log::warn!("Texture '{name}' not found, using shape fallback");
                None
            }
        };

        Self {
            player: lookup(names::PLAYER_SHIP),
            enemy_basic: lookup(names::ENEMY_BASIC),
            enemy_fast: lookup(names::ENEMY_FAST),
            enemy_heavy: lookup(names::ENEMY_HEAVY),
            player_bullet: lookup(names::PLAYER_BULLET),
            enemy_bullet: lookup(names::ENEMY_BULLET),
            heavy_bullet: lookup(names::HEAVY_BULLET),
        }
    }
}
