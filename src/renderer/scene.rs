//! Scene walk
//!
//! Read-only traversal of the game state. Draw order: explosions, particles,
//! enemies, player, bullets, then HUD and phase overlays. Entities with a
//! resolved texture draw as sprites, others as flat shapes; collision never
//! depends on which.

use glam::Vec2;

use super::{CLEAR_COLOR, DrawCommand, RenderTarget};
use crate::Settings;
use crate::sim::entity::Simulated;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::geometry::{Color, Rect};
use crate::sim::particles::PARTICLE_RADIUS;
use crate::sim::{Bullet, GamePhase, GameState, Player};

/// Fallback triangle size for the player ship
const PLAYER_SHAPE_SIZE: f32 = 20.0;
const DEBUG_OUTLINE: f32 = 2.0;
const HUD_TEXT_SIZE: f32 = 20.0;

/// Presentation switches for one frame
#[derive(Debug, Clone, Default)]
pub struct SceneOptions {
    /// Outline tight collision bounds
    pub show_bounds: bool,
    /// Pool usage lines under the score
    pub show_diagnostics: bool,
    /// FPS readout, if the caller measured one
    pub fps: Option<f32>,
}

impl SceneOptions {
    pub fn from_settings(settings: &Settings, fps: Option<f32>) -> Self {
        Self {
            show_bounds: settings.show_debug_bounds,
            show_diagnostics: settings.show_debug_info,
            fps: fps.filter(|_| settings.show_fps),
        }
    }
}

/// Draw a whole frame
pub fn draw_game(state: &GameState, options: &SceneOptions, target: &mut dyn RenderTarget) {
    target.draw(DrawCommand::Clear(CLEAR_COLOR));

    if state.phase == GamePhase::MainMenu {
        draw_menu(state, target);
        return;
    }

    draw_world(state, options, target);
    draw_hud(state, options, target);

    match state.phase {
        GamePhase::Paused => draw_banner(state, "PAUSED\n\nPress ESC or P to resume", target),
        GamePhase::GameOver => {
            let text = format!(
                "GAME OVER\n\nFINAL SCORE: {}\nENEMIES KILLED: {}\n\nR to restart, M for menu",
                state.score, state.kills
            );
            draw_banner(state, &text, target);
        }
        _ => {}
    }
}

fn draw_world(state: &GameState, options: &SceneOptions, target: &mut dyn RenderTarget) {
    let offset = state.tuning.bounds.sprite_orientation_offset;

    if let Some(sheet) = state.explosions().sheet() {
        let (w, h) = sheet.frame_size();
        for explosion in state.explosions().iter_active() {
            target.draw(DrawCommand::Sprite {
                texture: sheet.texture,
                center: explosion.position,
                size: Vec2::new(w as f32, h as f32) * explosion.kind().scale(),
                rotation: 0.0,
                source: Some(sheet.frame_rect(explosion.frame())),
                tint: Color::WHITE,
            });
        }
    }

    for particle in state.particles().iter_active() {
        target.draw(DrawCommand::Circle {
            center: particle.position,
            radius: PARTICLE_RADIUS,
            fill: particle.color,
        });
    }

    for enemy in state.enemies().filter(|e| e.is_alive()) {
        draw_enemy(state, enemy, offset, target);
        if options.show_bounds {
            outline(enemy.bounds(), enemy_bounds_color(enemy.kind()), target);
        }
    }

    if let Some(player) = state.player().filter(|p| p.is_alive()) {
        draw_player(state, player, offset, target);
        if options.show_bounds {
            outline(player.bounds(), Color::rgba(0, 255, 0, 192), target);
        }
    }

    for bullet in state.bullets().filter(|b| b.is_alive()) {
        draw_bullet(state, bullet, target);
        if options.show_bounds {
            let color = if bullet.is_player_bullet() {
                Color::rgba(255, 255, 0, 192)
            } else {
                Color::rgba(255, 0, 0, 192)
            };
            outline(bullet.bounds(), color, target);
        }
    }
}

fn draw_enemy(state: &GameState, enemy: &Enemy, offset: f32, target: &mut dyn RenderTarget) {
    let sprites = state.sprites();
    let texture = match enemy.kind() {
        EnemyKind::Basic => sprites.enemy_basic,
        EnemyKind::Fast => sprites.enemy_fast,
        EnemyKind::Heavy => sprites.enemy_heavy,
    };

    target.draw(match texture {
        Some(texture) => DrawCommand::Sprite {
            texture,
            center: enemy.position,
            size: Vec2::splat(enemy.footprint()),
            rotation: enemy.rotation + offset,
            source: None,
            tint: Color::WHITE.with_alpha(enemy.tint_alpha()),
        },
        None => DrawCommand::Circle {
            center: enemy.position,
            radius: enemy.kind().radius(),
            fill: enemy.tint(),
        },
    });
}

fn draw_player(state: &GameState, player: &Player, offset: f32, target: &mut dyn RenderTarget) {
    target.draw(match state.sprites().player {
        Some(texture) => DrawCommand::Sprite {
            texture,
            center: player.position,
            size: Vec2::splat(player.footprint()),
            rotation: player.rotation + offset,
            source: None,
            tint: Color::WHITE,
        },
        None => DrawCommand::Triangle {
            center: player.position,
            size: PLAYER_SHAPE_SIZE,
            rotation: player.rotation,
            fill: Color::CYAN,
        },
    });
}

fn draw_bullet(state: &GameState, bullet: &Bullet, target: &mut dyn RenderTarget) {
    let sprites = state.sprites();
    let texture = if bullet.is_player_bullet() {
        sprites.player_bullet
    } else if bullet.is_heavy() {
        sprites.heavy_bullet
    } else {
        sprites.enemy_bullet
    };

    target.draw(match texture {
        Some(texture) => DrawCommand::Sprite {
            texture,
            center: bullet.position,
            size: Vec2::splat(bullet.footprint()),
            rotation: bullet.rotation,
            source: None,
            tint: Color::WHITE,
        },
        None => DrawCommand::Circle {
            center: bullet.position,
            radius: bullet.radius(),
            fill: if bullet.is_player_bullet() {
                Color::YELLOW
            } else {
                Color::RED
            },
        },
    });
}

fn draw_hud(state: &GameState, options: &SceneOptions, target: &mut dyn RenderTarget) {
    // Health bar, top left
    if let Some(player) = state.player() {
        let pct = player.health_fraction();
        target.draw(DrawCommand::FillRect {
            rect: Rect::new(Vec2::new(10.0, 10.0), Vec2::new(200.0, 20.0)),
            fill: Color::rgb(50, 50, 50),
        });
        target.draw(DrawCommand::OutlineRect {
            rect: Rect::new(Vec2::new(10.0, 10.0), Vec2::new(200.0, 20.0)),
            color: Color::WHITE,
            thickness: 2.0,
        });
        let fill = if pct > 0.6 {
            Color::GREEN
        } else if pct > 0.3 {
            Color::YELLOW
        } else {
            Color::RED
        };
        target.draw(DrawCommand::FillRect {
            rect: Rect::new(Vec2::new(12.0, 12.0), Vec2::new(196.0 * pct, 16.0)),
            fill,
        });
    }

    let mut lines = vec![
        format!("SCORE: {}", state.score),
        format!("KILLS: {}", state.kills),
        format!(
            "ENEMIES: {}/{}",
            state.enemies().count(),
            state.tuning.enemy.max_concurrent
        ),
    ];
    if let Some(fps) = options.fps {
        lines.push(format!("FPS: {fps:.0}"));
    }
    if options.show_diagnostics {
        let d = state.diagnostics();
        lines.push(format!("Enemy pool: {:.0}%", d.enemy_usage * 100.0));
        lines.push(format!("Bullet pool: {:.0}%", d.bullet_usage * 100.0));
        lines.push(format!("Particles: {}", d.active_particles));
        lines.push(format!("Explosions: {}/{}", d.active_explosions, d.explosion_pool));
    }

    for (i, text) in lines.into_iter().enumerate() {
        target.draw(DrawCommand::Text {
            text,
            position: Vec2::new(10.0, 40.0 + i as f32 * (HUD_TEXT_SIZE + 5.0)),
            size: HUD_TEXT_SIZE,
            color: Color::WHITE,
        });
    }
}

fn draw_menu(state: &GameState, target: &mut dyn RenderTarget) {
    draw_banner(
        state,
        "SPACE DEFENDER\n\n1 / ENTER  Start\nM  Toggle audio\n\nWASD / arrows move, SPACE fires",
        target,
    );
}

/// Dimmed full-screen overlay with centred text
fn draw_banner(state: &GameState, text: &str, target: &mut dyn RenderTarget) {
    let arena = state.arena();
    target.draw(DrawCommand::FillRect {
        rect: arena,
        fill: Color::rgba(0, 0, 0, 150),
    });
    target.draw(DrawCommand::Text {
        text: text.to_string(),
        position: arena.center() - Vec2::new(150.0, 80.0),
        size: 32.0,
        color: Color::WHITE,
    });
}

fn outline(rect: Rect, color: Color, target: &mut dyn RenderTarget) {
    target.draw(DrawCommand::OutlineRect {
        rect,
        color,
        thickness: DEBUG_OUTLINE,
    });
}

fn enemy_bounds_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Basic => Color::rgba(255, 0, 255, 192),
        EnemyKind::Fast => Color::rgba(0, 255, 255, 192),
        EnemyKind::Heavy => Color::rgba(255, 128, 0, 192),
    }
}
