//! Per-frame draw output
//!
//! Turns a read-only view of the session into a flat list of draw commands
//! plus HUD readouts. The host replays the commands onto whatever surface it
//! has; nothing here touches the DOM.

use glam::Vec2;

use crate::sim::{GameOverReport, GameState, Hazard};

/// 8-bit RGB with a float alpha, matching CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// CSS color string, e.g. `rgba(255, 152, 0, 0.5)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    /// #4CAF50
    pub const PLAYER: Rgba = Rgba::opaque(0x4C, 0xAF, 0x50);
    /// #ff0000
    pub const PROJECTILE: Rgba = Rgba::opaque(0xFF, 0x00, 0x00);
    /// #ff0000
    pub const BOUNCER: Rgba = Rgba::opaque(0xFF, 0x00, 0x00);
    /// #000000
    pub const EXPLOSIVE: Rgba = Rgba::opaque(0x00, 0x00, 0x00);
    pub const BLAST: Rgba = Rgba {
        r: 255,
        g: 152,
        b: 0,
        a: 0.5,
    };

    /// Afterflame color: deep orange shading toward yellow with intensity
    pub fn ember(intensity: f32) -> Rgba {
        let intensity = intensity.clamp(0.0, 1.0);
        Rgba {
            r: 255,
            g: (100.0 + 155.0 * intensity).round() as u8,
            b: 0,
            a: intensity,
        }
    }
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Rect {
        /// Top-left corner
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
}

/// Something that can draw the three primitives
pub trait DrawSink {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
}

/// Text readouts shown around the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub health: u32,
    /// Whole seconds with unit suffix, e.g. `12s`
    pub survival_label: String,
    /// Present only once the session has ended
    pub game_over: Option<GameOverReport>,
}

/// Everything the host needs to present one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub hud: Hud,
}

impl Frame {
    /// Issue every command to `sink`, in order
    pub fn replay<S: DrawSink>(&self, sink: &mut S) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear => sink.clear(),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => sink.fill_circle(center, radius, color),
                DrawCommand::Rect {
                    origin,
                    size,
                    color,
                } => sink.fill_rect(origin, size, color),
            }
        }
    }
}

/// Format whole seconds the way the HUD shows them
pub fn survival_label(secs: u32) -> String {
    format!("{}s", secs)
}

/// Build the frame for the current state
///
/// Draw order: clear, player, embers, hazards.
pub fn build_frame(state: &GameState) -> Frame {
    let mut commands = Vec::with_capacity(2 + state.embers.len() + state.hazards.len());
    commands.push(DrawCommand::Clear);

    commands.push(DrawCommand::Circle {
        center: state.player.pos,
        radius: state.player.radius,
        color: colors::PLAYER,
    });

    for ember in &state.embers {
        let intensity = ember.intensity();
        commands.push(DrawCommand::Circle {
            center: ember.pos,
            radius: ember.radius * intensity,
            color: colors::ember(intensity),
        });
    }

    for hazard in &state.hazards {
        let command = match hazard {
            Hazard::Explosive(e) if e.detonated => DrawCommand::Circle {
                center: e.pos,
                radius: e.blast_radius,
                color: colors::BLAST,
            },
            Hazard::Explosive(e) => DrawCommand::Circle {
                center: e.pos,
                radius: e.radius,
                color: colors::EXPLOSIVE,
            },
            Hazard::Bouncer(b) => DrawCommand::Circle {
                center: b.pos,
                radius: b.radius,
                color: colors::BOUNCER,
            },
            Hazard::Projectile(p) => DrawCommand::Rect {
                origin: p.min(),
                size: Vec2::new(p.width, p.height),
                color: colors::PROJECTILE,
            },
        };
        commands.push(command);
    }

    Frame {
        commands,
        hud: Hud {
            health: state.health,
            survival_label: survival_label(state.survival_secs()),
            game_over: state.report,
        },
    }
}
