//! Ember Dodge - a survival arcade game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, hazards, embers, collisions, spawning)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Frame building and the canvas draw sink
//! - `platform`: Keyboard state and animation-frame timing
//! - `settings`: Player preferences (audio)
//! - `audio`: Background music and synthesized effects

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (canvas pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Pixels per frame, per axis (diagonals are not normalized)
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const STARTING_HEALTH: u32 = 10;

    /// Spawn bookkeeping (milliseconds of accumulated frame delta)
    pub const SPAWN_INTERVAL_MS: f32 = 50.0;
    /// Burst roll below this spawns three hazards
    pub const BURST_TRIPLE_CHANCE: f32 = 0.4;
    /// Burst roll below this (and above the triple threshold) spawns two
    pub const BURST_DOUBLE_CUTOFF: f32 = 0.9;

    /// Variant weights: bouncers are three times as likely as either other kind
    pub const WEIGHT_BOUNCER: u32 = 3;
    pub const WEIGHT_PROJECTILE: u32 = 1;
    pub const WEIGHT_EXPLOSIVE: u32 = 1;

    /// Random hazard size range [min, min + spread)
    pub const HAZARD_SIZE_MIN: f32 = 15.0;
    pub const HAZARD_SIZE_SPREAD: f32 = 20.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 20.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
    pub const PROJECTILE_SPEED_MIN: f32 = 4.0;
    pub const PROJECTILE_SPEED_SPREAD: f32 = 5.0;
    pub const PROJECTILE_DAMAGE: u32 = 1;

    /// Bouncers
    pub const BOUNCER_MAX_SPEED_X: f32 = 2.0;
    pub const BOUNCER_SPEED_Y_MIN: f32 = 1.0;
    pub const BOUNCER_SPEED_Y_SPREAD: f32 = 2.0;
    pub const BOUNCER_MAX_BOUNCES: u32 = 5;
    pub const BOUNCER_DAMAGE: u32 = 2;

    /// Explosives
    pub const EXPLOSIVE_SPEED_MIN: f32 = 4.0;
    pub const EXPLOSIVE_SPEED_SPREAD: f32 = 5.0;
    /// Horizontal wobble per frame, +/- this many pixels
    pub const EXPLOSIVE_JITTER: f32 = 1.0;
    pub const FUSE_MS: f32 = 10_000.0;
    pub const RANDOM_DETONATION_CHANCE: f32 = 0.05;
    /// Point-in-time damage radius when a fuse runs out
    pub const FUSE_BLAST_RADIUS: f32 = 80.0;
    pub const BLAST_GROWTH: f32 = 2.0;
    pub const BLAST_RADIUS_CAP: f32 = 80.0;
    pub const BLAST_DAMAGE: u32 = 5;

    /// Embers left behind by detonations
    pub const EMBER_RADIUS_MIN: f32 = 15.0;
    pub const EMBER_RADIUS_SPREAD: f32 = 10.0;
    pub const EMBER_LIFETIME_MS: f32 = 3000.0;
    pub const EMBER_DAMAGE: u32 = 2;
}

