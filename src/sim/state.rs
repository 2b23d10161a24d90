//! Game state and core simulation types
//!
//! The engine owns everything here; the presentation layer only ever gets a
//! shared reference for building the frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rank::{GameOverReport, Rank};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player alive, simulation advancing
    Running,
    /// Health depleted; terminal until reset
    GameOver,
}

/// Vertical travel direction of a hazard, derived from its spawn edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Spawned above the arena, travelling toward larger y
    Down,
    /// Spawned below the arena, travelling toward smaller y
    Up,
}

impl Heading {
    /// +1 for down, -1 for up
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Down => 1.0,
            Heading::Up => -1.0,
        }
    }

    /// Whether `y` is past the exit edge for this heading, allowing `margin`
    #[inline]
    pub fn has_exited(self, y: f32, arena_height: f32, margin: f32) -> bool {
        match self {
            Heading::Down => y > arena_height + margin,
            Heading::Up => y < -margin,
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame along each held axis
    pub speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.arena_center(),
            radius: tuning.player_radius,
            speed: tuning.player_speed,
        }
    }
}

/// A fast bullet travelling straight up or down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Rectangle center
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub heading: Heading,
    /// Off-arena distance past the exit edge before removal
    pub margin: f32,
}

impl Projectile {
    /// Top-left corner of the collision rectangle
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.half_extents()
    }

    /// Bottom-right corner of the collision rectangle
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.half_extents()
    }

    #[inline]
    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }
}

/// A ball that ricochets off the arena walls until it runs out of bounces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bouncer {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame
    pub vel: Vec2,
    pub bounces: u32,
    pub max_bounces: u32,
}

impl Bouncer {
    /// Reached the bounce limit and must leave the arena
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.bounces >= self.max_bounces
    }
}

/// A bomb that drifts along its heading until it goes off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosive {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub heading: Heading,
    pub detonated: bool,
    /// Current blast circle radius; grows only after detonation
    pub blast_radius: f32,
    /// Accumulated frame delta while still in motion (ms)
    pub fuse_elapsed_ms: f32,
}

/// Closed set of hazard kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Hazard {
    Projectile(Projectile),
    Bouncer(Bouncer),
    Explosive(Explosive),
}

impl Hazard {
    pub fn pos(&self) -> Vec2 {
        match self {
            Hazard::Projectile(p) => p.pos,
            Hazard::Bouncer(b) => b.pos,
            Hazard::Explosive(e) => e.pos,
        }
    }
}

/// Lingering afterflame left where an explosive went off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ember {
    pub pos: Vec2,
    pub radius: f32,
    pub lifetime_ms: f32,
    pub max_lifetime_ms: f32,
}

impl Ember {
    pub fn new(pos: Vec2, radius: f32, lifetime_ms: f32) -> Self {
        Self {
            pos,
            radius,
            lifetime_ms,
            max_lifetime_ms: lifetime_ms,
        }
    }

    /// Remaining fraction of the lifetime in [0, 1] (drives size and alpha)
    #[inline]
    pub fn intensity(&self) -> f32 {
        if self.max_lifetime_ms <= 0.0 {
            return 0.0;
        }
        (self.lifetime_ms / self.max_lifetime_ms).clamp(0.0, 1.0)
    }
}

/// How an explosive came to detonate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetonationCause {
    /// Fuse ran out; the only path with an immediate point blast
    Fuse,
    /// Per-frame random misfire
    Misfire,
    /// Left the arena past its exit edge
    Boundary,
    /// Touched the player
    Contact,
}

/// Things that happened during a tick, drained by the host for audio/UI
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ProjectileHit,
    BouncerHit,
    Detonated { pos: Vec2, cause: DetonationCause },
    /// Player caught in a blast (fuse point blast or expanding blast circle)
    BlastHit,
    EmberBurn,
    GameOver(GameOverReport),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current RNG stream
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub health: u32,
    /// Seconds survived so far
    pub survival_time: f32,
    /// Accumulated delta since the last spawn burst (ms)
    pub spawn_timer_ms: f32,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub embers: Vec<Ember>,
    /// Set on the transition to GameOver
    pub report: Option<GameOverReport>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// New session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New session with explicit tuning
    ///
    /// `tuning` should already have passed [`Tuning::validate`];
    /// [`Tuning::from_json`] does that on load.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning: {:?}", tuning.validate());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            health: tuning.starting_health,
            survival_time: 0.0,
            spawn_timer_ms: 0.0,
            player: Player::new(&tuning),
            hazards: Vec::new(),
            embers: Vec::new(),
            report: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// Reinitialize the session. Allowed in any phase. The RNG stream
    /// carries on so consecutive runs differ.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.health = self.tuning.starting_health;
        self.survival_time = 0.0;
        self.spawn_timer_ms = 0.0;
        self.player = Player::new(&self.tuning);
        self.hazards.clear();
        self.embers.clear();
        self.report = None;
        self.events.clear();
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Reset with a fresh RNG seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset();
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whole seconds survived (what the HUD shows and ranks are judged on)
    #[inline]
    pub fn survival_secs(&self) -> u32 {
        self.survival_time.max(0.0).floor() as u32
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Subtract health (floored at zero) and end the game if it ran out
    pub(crate) fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.check_game_over();
    }

    /// Transition to GameOver if health is depleted. Idempotent.
    pub(crate) fn check_game_over(&mut self) {
        if self.health > 0 || self.is_over() {
            return;
        }
        let survival_secs = self.survival_secs();
        let report = GameOverReport {
            survival_secs,
            rank: Rank::from_seconds(survival_secs),
        };
        log::info!(
            "Game over after {}s: {}",
            report.survival_secs,
            report.rank.comment()
        );
        self.phase = GamePhase::GameOver;
        self.report = Some(report);
        self.events.push(GameEvent::GameOver(report));
    }
}
