//! Hazard generation
//!
//! Every draw goes through the caller's RNG so a seeded session spawns the
//! same hazards in the same order.

use glam::Vec2;
use rand::Rng;

use super::state::{Bouncer, Explosive, GameState, Hazard, Heading, Projectile};
use crate::tuning::Tuning;

/// Which hazard kind a spawn roll picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Bouncer,
    Projectile,
    Explosive,
}

/// Number of hazards in a burst for a uniform roll in [0, 1)
pub fn burst_size(roll: f32, tuning: &Tuning) -> usize {
    if roll < tuning.burst_triple_chance {
        3
    } else if roll < tuning.burst_double_cutoff {
        2
    } else {
        1
    }
}

/// Map a weighted roll in `0..total_weight` to a hazard kind
pub fn kind_for_roll(roll: u32, tuning: &Tuning) -> HazardKind {
    if roll < tuning.weight_bouncer {
        HazardKind::Bouncer
    } else if roll < tuning.weight_bouncer.saturating_add(tuning.weight_projectile) {
        HazardKind::Projectile
    } else {
        HazardKind::Explosive
    }
}

/// Create one hazard just off the top or bottom edge
pub fn spawn_hazard<R: Rng>(rng: &mut R, tuning: &Tuning) -> Hazard {
    // All-zero weights fall through to the last kind instead of an empty range
    let kind = kind_for_roll(rng.random_range(0..tuning.total_weight().max(1)), tuning);
    let size = tuning.hazard_size_min + rng.random::<f32>() * tuning.hazard_size_spread;
    let x = rng.random::<f32>() * tuning.arena_width;
    let (y, heading) = if rng.random_bool(0.5) {
        (-size, Heading::Down)
    } else {
        (tuning.arena_height + size, Heading::Up)
    };
    let pos = Vec2::new(x, y);

    match kind {
        HazardKind::Projectile => Hazard::Projectile(Projectile {
            pos,
            width: tuning.projectile_width,
            height: tuning.projectile_height,
            speed: tuning.projectile_speed_min
                + rng.random::<f32>() * tuning.projectile_speed_spread,
            heading,
            margin: size,
        }),
        HazardKind::Explosive => Hazard::Explosive(Explosive {
            pos,
            radius: size,
            speed: tuning.explosive_speed_min + rng.random::<f32>() * tuning.explosive_speed_spread,
            heading,
            detonated: false,
            blast_radius: 0.0,
            fuse_elapsed_ms: 0.0,
        }),
        HazardKind::Bouncer => {
            let vx = (rng.random::<f32>() - 0.5) * 2.0 * tuning.bouncer_max_speed_x;
            let vy = heading.sign()
                * (tuning.bouncer_speed_y_min + rng.random::<f32>() * tuning.bouncer_speed_y_spread);
            Hazard::Bouncer(Bouncer {
                pos,
                radius: size,
                vel: Vec2::new(vx, vy),
                bounces: 0,
                max_bounces: tuning.bouncer_max_bounces,
            })
        }
    }
}

/// Spawn one burst of hazards into the session
pub fn spawn_burst(state: &mut GameState) {
    let count = burst_size(state.rng.random::<f32>(), &state.tuning);
    for _ in 0..count {
        let hazard = spawn_hazard(&mut state.rng, &state.tuning);
        state.hazards.push(hazard);
    }
}
