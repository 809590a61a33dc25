//! Input snapshot
//!
//! Platform event handlers feed key and button transitions in; once per frame
//! the held state is folded into a [`TickInput`] and the one-frame edges are
//! dropped with [`InputState::end_frame`].

use std::collections::HashSet;

use crate::Settings;
use crate::audio::AudioManager;
use crate::perf::PerformanceMonitor;
use crate::sim::{GamePhase, GameState, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    Enter,
    Num1,
    Num2,
    P,
    R,
    M,
    B,
    /// Toggles the autopilot
    I,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Held keys and buttons plus this frame's edges
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_held: HashSet<Key>,
    keys_just_pressed: HashSet<Key>,
    keys_just_released: HashSet<Key>,
    mouse_held: HashSet<MouseButton>,
    mouse_just_pressed: HashSet<MouseButton>,
    /// Autopilot latch, flipped by `I`
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down. Auto-repeat does not produce a second edge.
    pub fn key_pressed(&mut self, key: Key) {
        if self.keys_held.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    pub fn key_released(&mut self, key: Key) {
        self.keys_held.remove(&key);
        self.keys_just_released.insert(key);
    }

    pub fn mouse_pressed(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_just_pressed.insert(button);
        }
    }

    pub fn mouse_released(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
    }

    /// Forget everything, e.g. on focus change or round start
    pub fn clear_all(&mut self) {
        self.keys_held.clear();
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_held.clear();
        self.mouse_just_pressed.clear();
    }

    /// Drop one-frame edges; call after the frame has consumed them
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_just_pressed.clear();
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.keys_just_released.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    pub fn is_mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_just_pressed.contains(&button)
    }

    fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    /// Snapshot for one simulation tick
    pub fn to_tick_input(&self, phase: GamePhase) -> TickInput {
        let pause = match phase {
            GamePhase::Playing => self.is_key_just_pressed(Key::Escape),
            GamePhase::Paused => self.is_key_just_pressed(Key::Escape) || self.is_key_just_pressed(Key::P),
            _ => false,
        };

        TickInput {
            move_left: self.any_held(&[Key::A, Key::Left]),
            move_right: self.any_held(&[Key::D, Key::Right]),
            move_up: self.any_held(&[Key::W, Key::Up]),
            move_down: self.any_held(&[Key::S, Key::Down]),
            fire: self.is_key_held(Key::Space) || self.is_mouse_held(MouseButton::Left),
            pause,
            idle_mode: self.idle_mode,
        }
    }

    /// Phase-dependent actions triggered by this frame's key presses, in
    /// [`MENU_KEYS`] order. The iterator does not borrow the input state.
    pub fn menu_actions(&self, phase: GamePhase) -> impl Iterator<Item = MenuAction> + use<> {
        let pressed = MENU_KEYS.map(|key| self.is_key_just_pressed(key));
        MENU_KEYS
            .into_iter()
            .zip(pressed)
            .filter(|&(_, pressed)| pressed)
            .filter_map(move |(key, _)| MenuAction::for_key(phase, key))
    }
}

/// Keys that can trigger a [`MenuAction`], in the order they are handled
pub const MENU_KEYS: [Key; 7] = [Key::Enter, Key::Num1, Key::R, Key::Num2, Key::M, Key::B, Key::I];

/// Non-movement commands handled outside the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Restart,
    ReturnToMenu,
    ToggleAudio,
    ToggleDebugBounds,
    ToggleIdle,
    Quit,
}

impl MenuAction {
    pub fn for_key(phase: GamePhase, key: Key) -> Option<Self> {
        match (phase, key) {
            (GamePhase::MainMenu, Key::Num1 | Key::Enter) => Some(Self::StartGame),
            (GamePhase::MainMenu, Key::Num2) => Some(Self::Quit),
            (GamePhase::MainMenu | GamePhase::Playing | GamePhase::Paused, Key::M) => Some(Self::ToggleAudio),
            (GamePhase::Playing, Key::B) => Some(Self::ToggleDebugBounds),
            (GamePhase::Playing, Key::I) => Some(Self::ToggleIdle),
            (GamePhase::GameOver, Key::Num1 | Key::R) => Some(Self::Restart),
            (GamePhase::GameOver, Key::Num2 | Key::M) => Some(Self::ReturnToMenu),
            _ => None,
        }
    }

    /// Carry out the action. Returns `false` when the game should exit.
    pub fn apply(
        self,
        state: &mut GameState,
        input: &mut InputState,
        audio: &mut AudioManager,
        settings: &mut Settings,
        perf: &mut PerformanceMonitor,
    ) -> bool {
        match self {
            Self::StartGame | Self::Restart => {
                state.start_new_game();
                input.clear_all();
                perf.reset();
            }
            Self::ReturnToMenu => state.return_to_menu(),
            Self::ToggleAudio => {
                settings.audio_enabled = audio.toggle_enabled();
            }
            Self::ToggleDebugBounds => {
                settings.show_debug_bounds = !settings.show_debug_bounds;
                log::info!("Debug bounds: {}", settings.show_debug_bounds);
            }
            Self::ToggleIdle => {
                input.idle_mode = !input.idle_mode;
                log::info!("Idle mode: {}", input.idle_mode);
            }
            Self::Quit => return false,
        }
        true
    }
}
