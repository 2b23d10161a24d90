//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a session can be tuned
//! (or made deterministic for tests) without touching the engine. Defaults
//! come from [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Tuning load/validation failure
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena & player ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub player_radius: f32,
    pub player_speed: f32,
    pub starting_health: u32,

    // === Spawning ===
    pub spawn_interval_ms: f32,
    pub burst_triple_chance: f32,
    pub burst_double_cutoff: f32,
    pub weight_bouncer: u32,
    pub weight_projectile: u32,
    pub weight_explosive: u32,
    pub hazard_size_min: f32,
    pub hazard_size_spread: f32,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed_min: f32,
    pub projectile_speed_spread: f32,
    pub projectile_damage: u32,

    // === Bouncers ===
    pub bouncer_max_speed_x: f32,
    pub bouncer_speed_y_min: f32,
    pub bouncer_speed_y_spread: f32,
    pub bouncer_max_bounces: u32,
    pub bouncer_damage: u32,

    // === Explosives ===
    pub explosive_speed_min: f32,
    pub explosive_speed_spread: f32,
    pub explosive_jitter: f32,
    pub fuse_ms: f32,
    pub random_detonation_chance: f32,
    pub fuse_blast_radius: f32,
    pub blast_growth: f32,
    pub blast_radius_cap: f32,
    pub blast_damage: u32,

    // === Embers ===
    pub ember_radius_min: f32,
    pub ember_radius_spread: f32,
    pub ember_lifetime_ms: f32,
    pub ember_damage: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            starting_health: STARTING_HEALTH,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            burst_triple_chance: BURST_TRIPLE_CHANCE,
            burst_double_cutoff: BURST_DOUBLE_CUTOFF,
            weight_bouncer: WEIGHT_BOUNCER,
            weight_projectile: WEIGHT_PROJECTILE,
            weight_explosive: WEIGHT_EXPLOSIVE,
            hazard_size_min: HAZARD_SIZE_MIN,
            hazard_size_spread: HAZARD_SIZE_SPREAD,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed_min: PROJECTILE_SPEED_MIN,
            projectile_speed_spread: PROJECTILE_SPEED_SPREAD,
            projectile_damage: PROJECTILE_DAMAGE,

            bouncer_max_speed_x: BOUNCER_MAX_SPEED_X,
            bouncer_speed_y_min: BOUNCER_SPEED_Y_MIN,
            bouncer_speed_y_spread: BOUNCER_SPEED_Y_SPREAD,
            bouncer_max_bounces: BOUNCER_MAX_BOUNCES,
            bouncer_damage: BOUNCER_DAMAGE,

            explosive_speed_min: EXPLOSIVE_SPEED_MIN,
            explosive_speed_spread: EXPLOSIVE_SPEED_SPREAD,
            explosive_jitter: EXPLOSIVE_JITTER,
            fuse_ms: FUSE_MS,
            random_detonation_chance: RANDOM_DETONATION_CHANCE,
            fuse_blast_radius: FUSE_BLAST_RADIUS,
            blast_growth: BLAST_GROWTH,
            blast_radius_cap: BLAST_RADIUS_CAP,
            blast_damage: BLAST_DAMAGE,

            ember_radius_min: EMBER_RADIUS_MIN,
            ember_radius_spread: EMBER_RADIUS_SPREAD,
            ember_lifetime_ms: EMBER_LIFETIME_MS,
            ember_damage: EMBER_DAMAGE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Arena extents as a vector (width, height)
    #[inline]
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Arena center, where the player starts
    #[inline]
    pub fn arena_center(&self) -> Vec2 {
        self.arena() / 2.0
    }

    /// Total variant weight (denominator of the spawn roll)
    pub fn total_weight(&self) -> u32 {
        self.weight_bouncer
            .saturating_add(self.weight_projectile)
            .saturating_add(self.weight_explosive)
    }

    /// Check that the values describe a playable arena
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.arena_width > 0.0) {
            return invalid("arena_width", "must be positive");
        }
        if !(self.arena_height > 0.0) {
            return invalid("arena_height", "must be positive");
        }
        if !(self.player_radius > 0.0) {
            return invalid("player_radius", "must be positive");
        }
        if self.player_radius * 2.0 > self.arena_width.min(self.arena_height) {
            return invalid("player_radius", "player does not fit in the arena");
        }
        if self.player_speed < 0.0 {
            return invalid("player_speed", "must not be negative");
        }
        if self.starting_health == 0 {
            return invalid("starting_health", "must be at least 1");
        }
        if self.spawn_interval_ms.is_nan() || self.spawn_interval_ms < 0.0 {
            return invalid("spawn_interval_ms", "must not be negative");
        }
        for (field, p) in [
            ("burst_triple_chance", self.burst_triple_chance),
            ("burst_double_cutoff", self.burst_double_cutoff),
            ("random_detonation_chance", self.random_detonation_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(field, "probability must be within [0, 1]");
            }
        }
        if self.burst_double_cutoff < self.burst_triple_chance {
            return invalid("burst_double_cutoff", "must not be below burst_triple_chance");
        }
        if self.total_weight() == 0 {
            return invalid("weight_bouncer", "at least one hazard weight must be non-zero");
        }
        if !(self.hazard_size_min > 0.0) || self.hazard_size_spread < 0.0 {
            return invalid("hazard_size_min", "size range must be positive");
        }
        if !(self.ember_radius_min > 0.0) || self.ember_radius_spread < 0.0 {
            return invalid("ember_radius_min", "radius range must be positive");
        }
        if !(self.ember_lifetime_ms > 0.0) {
            return invalid("ember_lifetime_ms", "must be positive");
        }
        if self.bouncer_max_bounces == 0 {
            return invalid("bouncer_max_bounces", "must be at least 1");
        }
        Ok(())
    }
}
