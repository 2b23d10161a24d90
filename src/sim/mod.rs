//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of hazards and embers)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rank;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_rect_overlap, circles_overlap, closest_point_on_rect};
pub use rank::{GameOverReport, Rank};
pub use spawn::{spawn_burst, spawn_hazard};
pub use state::{
    Bouncer, DetonationCause, Ember, Explosive, GameEvent, GamePhase, GameState, Hazard, Heading,
    Player, Projectile,
};
pub use tick::{TickInput, move_player, step_bouncer, tick};
