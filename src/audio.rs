//! Sound cues
//!
//! The simulation only announces that something audible happened. A backend
//! turns cues into sound; this crate ships the bookkeeping side (volume,
//! mute, per-cue counters) and a silent sink.

use serde::Serialize;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundEffect {
    /// Any ship fires
    Shoot,
    /// A ship is destroyed
    Explosion,
    /// A bullet connects without killing
    Hit,
}

impl SoundEffect {
    fn slot(self) -> usize {
        match self {
            Self::Shoot => 0,
            Self::Explosion => 1,
            Self::Hit => 2,
        }
    }
}

/// Fire-and-forget cue sink. Must never block or fail.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Swallows every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    enabled: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: [u64; 3],
    suppressed: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: [0; 3],
            suppressed: 0,
        }
    }

    /// Build from user settings
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut audio = Self::new();
        audio.set_enabled(settings.audio_enabled);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::info!("Audio {}", if self.enabled { "enabled" } else { "disabled" });
        self.enabled
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted || !self.enabled {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues that reached the backend
    pub fn played(&self, effect: SoundEffect) -> u64 {
        self.played[effect.slot()]
    }

    /// Cues dropped because audio was off or silent
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            self.suppressed += 1;
            return;
        }
        self.played[effect.slot()] += 1;
        log::trace!("Cue {effect:?} at volume {:.2}", self.effective_volume());
    }
}
