//! Rendering seam
//!
//! The simulation is drawn by walking a `&GameState` and emitting
//! [`DrawCommand`]s into a [`RenderTarget`]. The target is write-only from the
//! game's side; a platform backend rasterizes the commands however it likes.

pub mod scene;

use glam::Vec2;

use crate::sim::geometry::{Color, Rect};

pub use scene::{SceneOptions, draw_game};

/// Background clear color
pub const CLEAR_COLOR: Color = Color::rgb(10, 10, 30);

/// One primitive to draw, in arena coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole target
    Clear(Color),
    /// Textured quad centred on `center`
    Sprite {
        texture: &'static str,
        center: Vec2,
        size: Vec2,
        /// Degrees, clockwise in screen space
        rotation: f32,
        /// Sub-rectangle of the texture in pixels (whole texture if `None`)
        source: Option<Rect>,
        tint: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
    },
    /// Isosceles triangle pointing along `rotation`
    Triangle {
        center: Vec2,
        size: f32,
        rotation: f32,
        fill: Color,
    },
    FillRect {
        rect: Rect,
        fill: Color,
    },
    OutlineRect {
        rect: Rect,
        color: Color,
        thickness: f32,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        color: Color,
    },
}

/// Sink for draw commands
pub trait RenderTarget {
    fn draw(&mut self, command: DrawCommand);
}

/// Records commands in order; used by headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Forget the previous frame, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderTarget for CommandList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
