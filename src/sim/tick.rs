//! Per-frame simulation step
//!
//! Advances the session once per animation frame. Movement is per frame
//! (not time-scaled); only timers (fuse, embers, spawning, survival time)
//! consume the millisecond delta.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_rect_overlap, circles_overlap};
use super::spawn::spawn_burst;
use super::state::{
    Bouncer, DetonationCause, Ember, Explosive, GameEvent, GameState, Hazard, Player,
};
use crate::tuning::Tuning;

/// Held movement keys, sampled at the start of a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Outcome of updating one explosive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExplosiveStep {
    /// Still in the arena (moving or blasting)
    Live,
    /// Went off this frame
    Detonated(DetonationCause),
    /// Blast finished; remove
    Spent,
}

/// Advance the session by one frame of `dt_ms` milliseconds
///
/// Steps run in a fixed order: player movement, hazard update, ember update,
/// collision pass, spawn bookkeeping, survival time. A step that drops
/// health to zero ends the game and the rest of the frame is skipped.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.is_over() {
        return;
    }
    let dt_ms = dt_ms.max(0.0);

    let arena = state.tuning.arena();
    move_player(&mut state.player, input, arena);

    update_hazards(state, dt_ms);
    if state.is_over() {
        return;
    }

    update_embers(state, dt_ms);
    if state.is_over() {
        return;
    }

    resolve_collisions(state);
    if state.is_over() {
        return;
    }

    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms > state.tuning.spawn_interval_ms {
        state.spawn_timer_ms = 0.0;
        spawn_burst(state);
    }

    state.survival_time += dt_ms / 1000.0;
}

/// Move the player one step per held key. Each axis is checked on its own
/// and a step is only taken if the whole circle stays inside the arena.
pub fn move_player(player: &mut Player, input: &TickInput, arena: Vec2) {
    let r = player.radius;
    let s = player.speed;

    if input.up {
        let next = player.pos.y - s;
        if next - r >= 0.0 {
            player.pos.y = next;
        }
    }
    if input.down {
        let next = player.pos.y + s;
        if next + r <= arena.y {
            player.pos.y = next;
        }
    }
    if input.left {
        let next = player.pos.x - s;
        if next - r >= 0.0 {
            player.pos.x = next;
        }
    }
    if input.right {
        let next = player.pos.x + s;
        if next + r <= arena.x {
            player.pos.x = next;
        }
    }
}

/// Move a bouncer and reflect it off any wall its circle overlaps.
/// Both axes can bounce in the same frame; each counts once. A bouncer
/// spawned straddling the top or bottom edge keeps flipping there until
/// its bounces run out.
pub fn step_bouncer(bouncer: &mut Bouncer, arena: Vec2) {
    bouncer.pos += bouncer.vel;
    let r = bouncer.radius;

    if bouncer.pos.x - r < 0.0 || bouncer.pos.x + r > arena.x {
        bouncer.vel.x = -bouncer.vel.x;
        bouncer.bounces += 1;
    }

    if bouncer.pos.y - r < 0.0 || bouncer.pos.y + r > arena.y {
        bouncer.vel.y = -bouncer.vel.y;
        bouncer.bounces += 1;
    }
}

/// Advance an explosive: drift and fuse before detonation, blast growth after
fn step_explosive<R: Rng>(
    explosive: &mut Explosive,
    dt_ms: f32,
    rng: &mut R,
    tuning: &Tuning,
) -> ExplosiveStep {
    if explosive.detonated {
        explosive.blast_radius += tuning.blast_growth;
        return if explosive.blast_radius > tuning.blast_radius_cap {
            ExplosiveStep::Spent
        } else {
            ExplosiveStep::Live
        };
    }

    explosive.pos.y += explosive.speed * explosive.heading.sign();
    let jitter = (rng.random::<f32>() - 0.5) * 2.0 * tuning.explosive_jitter;
    explosive.pos.x = (explosive.pos.x + jitter)
        .min(tuning.arena_width - explosive.radius)
        .max(explosive.radius);
    explosive.fuse_elapsed_ms += dt_ms;

    // At most one detonation path per frame
    let cause = if explosive.fuse_elapsed_ms >= tuning.fuse_ms {
        Some(DetonationCause::Fuse)
    } else if rng.random::<f32>() < tuning.random_detonation_chance {
        Some(DetonationCause::Misfire)
    } else if explosive
        .heading
        .has_exited(explosive.pos.y, tuning.arena_height, 0.0)
    {
        Some(DetonationCause::Boundary)
    } else {
        None
    };

    match cause {
        Some(cause) => {
            explosive.detonated = true;
            ExplosiveStep::Detonated(cause)
        }
        None => ExplosiveStep::Live,
    }
}

/// Move every hazard, detonate explosives and drop hazards that finished
fn update_hazards(state: &mut GameState, dt_ms: f32) {
    let GameState {
        tuning,
        rng,
        player,
        hazards,
        embers,
        events,
        ..
    } = state;
    let tuning = &*tuning;
    let arena = tuning.arena();
    let mut damage = 0;

    hazards.retain_mut(|hazard| match hazard {
        Hazard::Projectile(p) => {
            p.pos.y += p.speed * p.heading.sign();
            !p.heading.has_exited(p.pos.y, arena.y, p.margin)
        }
        Hazard::Bouncer(b) => {
            step_bouncer(b, arena);
            !b.is_spent()
        }
        Hazard::Explosive(e) => match step_explosive(e, dt_ms, &mut *rng, tuning) {
            ExplosiveStep::Live => true,
            ExplosiveStep::Spent => false,
            ExplosiveStep::Detonated(cause) => {
                log::debug!("Explosive detonated at {:?} ({:?})", e.pos, cause);
                events.push(GameEvent::Detonated { pos: e.pos, cause });

                // Only a spent fuse checks the player's position on the spot
                if cause == DetonationCause::Fuse
                    && e.pos.distance(player.pos) < tuning.fuse_blast_radius
                {
                    damage += tuning.blast_damage;
                    events.push(GameEvent::BlastHit);
                }

                let radius =
                    tuning.ember_radius_min + rng.random::<f32>() * tuning.ember_radius_spread;
                embers.push(Ember::new(e.pos, radius, tuning.ember_lifetime_ms));
                true
            }
        },
    });

    if damage > 0 {
        state.apply_damage(damage);
    }
}

/// Burn down ember lifetimes; an ember touching the player burns once and goes out
fn update_embers(state: &mut GameState, dt_ms: f32) {
    let GameState {
        tuning,
        player,
        embers,
        events,
        ..
    } = state;
    let mut damage = 0;

    embers.retain_mut(|ember| {
        ember.lifetime_ms -= dt_ms;
        if circles_overlap(player.pos, player.radius, ember.pos, ember.radius) {
            damage += tuning.ember_damage;
            events.push(GameEvent::EmberBurn);
            return false;
        }
        ember.lifetime_ms > 0.0
    });

    if damage > 0 {
        state.apply_damage(damage);
    }
}

/// Player vs hazard contact. Damage is summed over the pass and applied once
/// at the end.
fn resolve_collisions(state: &mut GameState) {
    let GameState {
        tuning,
        player,
        hazards,
        events,
        ..
    } = state;
    let mut damage = 0;

    hazards.retain_mut(|hazard| match hazard {
        Hazard::Projectile(p) => {
            if circle_rect_overlap(player.pos, player.radius, p.min(), p.max()) {
                log::debug!("Projectile hit at {:?}", p.pos);
                damage += tuning.projectile_damage;
                events.push(GameEvent::ProjectileHit);
                false
            } else {
                true
            }
        }
        Hazard::Bouncer(b) => {
            if circles_overlap(player.pos, player.radius, b.pos, b.radius) {
                log::debug!("Bouncer hit at {:?}", b.pos);
                damage += tuning.bouncer_damage;
                events.push(GameEvent::BouncerHit);
                false
            } else {
                true
            }
        }
        Hazard::Explosive(e) => {
            // Contact only lights the bomb; the blast circle below does the damage
            if !e.detonated && circles_overlap(player.pos, player.radius, e.pos, e.radius) {
                e.detonated = true;
                log::debug!("Explosive touched at {:?}", e.pos);
                events.push(GameEvent::Detonated {
                    pos: e.pos,
                    cause: DetonationCause::Contact,
                });
            }
            if e.detonated && circles_overlap(player.pos, player.radius, e.pos, e.blast_radius) {
                damage += tuning.blast_damage;
                events.push(GameEvent::BlastHit);
                false
            } else {
                true
            }
        }
    });

    if damage > 0 {
        state.apply_damage(damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Heading, Projectile};
    use crate::sim::Rank;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    /// No spawning, no random detonations, no wobble
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_interval_ms: f32::INFINITY,
            random_detonation_chance: 0.0,
            explosive_jitter: 0.0,
            ..Default::default()
        }
    }

    fn quiet_state() -> GameState {
        GameState::with_tuning(42, quiet_tuning())
    }

    fn projectile(pos: Vec2, heading: Heading) -> Hazard {
        Hazard::Projectile(Projectile {
            pos,
            width: 20.0,
            height: 5.0,
            speed: 5.0,
            heading,
            margin: 20.0,
        })
    }

    fn explosive(pos: Vec2, radius: f32, speed: f32, heading: Heading) -> Explosive {
        Explosive {
            pos,
            radius,
            speed,
            heading,
            detonated: false,
            blast_radius: 0.0,
            fuse_elapsed_ms: 0.0,
        }
    }

    fn only_explosive(state: &GameState) -> &Explosive {
        match state.hazards.as_slice() {
            [Hazard::Explosive(e)] => e,
            other => panic!("expected a single explosive, got {:?}", other),
        }
    }

    #[test]
    fn test_player_moves_and_stops_at_walls() {
        let mut state = quiet_state();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, FRAME_MS);
        assert_eq!(state.player.pos, Vec2::new(404.0, 300.0));

        for _ in 0..500 {
            tick(&mut state, &right, FRAME_MS);
        }
        assert_eq!(state.player.pos.x, 780.0);

        let up_left = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &up_left, FRAME_MS);
        }
        assert_eq!(state.player.pos, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut player = Player::new(&Tuning::default());
        let start = player.pos;
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        move_player(&mut player, &input, Tuning::default().arena());
        assert_eq!(player.pos - start, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_projectile_leaves_arena_without_damage() {
        let mut state = quiet_state();
        state
            .hazards
            .push(projectile(Vec2::new(50.0, -20.0), Heading::Down));

        // y = -20 + 5n; still inside the margin at n = 128 (y = 620)
        for _ in 0..128 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.hazards.len(), 1);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.hazards.is_empty());
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_upward_projectile_exits_top() {
        let mut state = quiet_state();
        state
            .hazards
            .push(projectile(Vec2::new(50.0, 20.0), Heading::Up));
        // y = 20 - 5n < -20 once n > 8
        for _ in 0..8 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.hazards.len(), 1);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_bouncer_reflects_off_left_wall() {
        let mut state = quiet_state();
        state.hazards.push(Hazard::Bouncer(Bouncer {
            pos: Vec2::new(21.0, 100.0),
            radius: 20.0,
            vel: Vec2::new(-2.0, 1.0),
            bounces: 0,
            max_bounces: 5,
        }));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        match state.hazards.as_slice() {
            [Hazard::Bouncer(b)] => {
                assert!(b.vel.x > 0.0);
                assert_eq!(b.vel.y, 1.0);
                assert_eq!(b.bounces, 1);
            }
            other => panic!("expected a bouncer, got {:?}", other),
        }
    }

    #[test]
    fn test_bouncer_corner_counts_both_axes() {
        let mut bouncer = Bouncer {
            pos: Vec2::new(21.0, 21.0),
            radius: 20.0,
            vel: Vec2::new(-2.0, -2.0),
            bounces: 0,
            max_bounces: 5,
        };
        step_bouncer(&mut bouncer, Vec2::new(800.0, 600.0));
        assert_eq!(bouncer.vel, Vec2::new(2.0, 2.0));
        assert_eq!(bouncer.bounces, 2);
    }

    #[test]
    fn test_bouncer_at_spawn_edge_flips_and_counts() {
        let mut bouncer = Bouncer {
            pos: Vec2::new(400.0, -20.0),
            radius: 20.0,
            vel: Vec2::new(0.0, 2.0),
            bounces: 0,
            max_bounces: 5,
        };
        step_bouncer(&mut bouncer, Vec2::new(800.0, 600.0));
        assert_eq!(bouncer.pos.y, -18.0);
        assert_eq!(bouncer.vel.y, -2.0);
        assert_eq!(bouncer.bounces, 1);

        let mut sideways = Bouncer {
            pos: Vec2::new(10.0, 300.0),
            radius: 20.0,
            vel: Vec2::new(1.0, 0.0),
            bounces: 0,
            max_bounces: 5,
        };
        step_bouncer(&mut sideways, Vec2::new(800.0, 600.0));
        assert_eq!(sideways.vel.x, -1.0);
        assert_eq!(sideways.bounces, 1);
    }

    #[test]
    fn test_bouncer_burns_out_at_spawn_edge() {
        let mut state = quiet_state();
        state.hazards.push(Hazard::Bouncer(Bouncer {
            pos: Vec2::new(400.0, -20.0),
            radius: 20.0,
            vel: Vec2::new(0.0, 2.0),
            bounces: 0,
            max_bounces: 5,
        }));

        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        match state.hazards.as_slice() {
            [Hazard::Bouncer(b)] => {
                assert_eq!(b.bounces, 4);
                assert!(b.pos.y - b.radius < 0.0);
            }
            other => panic!("expected a bouncer, got {:?}", other),
        }

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.hazards.is_empty());
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_bouncer_removed_on_reaching_max_bounces() {
        let mut state = quiet_state();
        // Narrow horizontal shuttle: bounces every few frames
        state.hazards.push(Hazard::Bouncer(Bouncer {
            pos: Vec2::new(21.0, 100.0),
            radius: 20.0,
            vel: Vec2::new(-2.0, 0.0),
            bounces: 4,
            max_bounces: 5,
        }));
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.hazards.is_empty());
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_fuse_detonation_blasts_nearby_player() {
        let mut state = quiet_state();
        state.hazards.push(Hazard::Explosive(explosive(
            Vec2::new(400.0, 250.0),
            15.0,
            0.0,
            Heading::Down,
        )));

        for _ in 0..9 {
            tick(&mut state, &TickInput::default(), 1000.0);
        }
        assert!(!only_explosive(&state).detonated);
        assert_eq!(state.health, 10);
        assert!(state.embers.is_empty());

        tick(&mut state, &TickInput::default(), 1000.0);
        assert!(only_explosive(&state).detonated);
        assert_eq!(state.health, 5);
        assert_eq!(state.embers.len(), 1);
        assert_eq!(state.embers[0].pos, Vec2::new(400.0, 250.0));
        assert!((15.0..=25.0).contains(&state.embers[0].radius));
        assert_eq!(state.phase, GamePhase::Running);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BlastHit));
        assert!(events.contains(&GameEvent::Detonated {
            pos: Vec2::new(400.0, 250.0),
            cause: DetonationCause::Fuse,
        }));
    }

    #[test]
    fn test_fuse_detonation_far_from_player_is_harmless() {
        let mut state = quiet_state();
        state.hazards.push(Hazard::Explosive(explosive(
            Vec2::new(100.0, 100.0),
            15.0,
            0.0,
            Heading::Down,
        )));
        for _ in 0..9 {
            tick(&mut state, &TickInput::default(), 1000.0);
        }
        assert!(!only_explosive(&state).detonated);

        tick(&mut state, &TickInput::default(), 1000.0);
        assert!(only_explosive(&state).detonated);
        assert_eq!(state.health, 10);
        assert_eq!(state.embers.len(), 1);
        assert!(!state.drain_events().contains(&GameEvent::BlastHit));
    }

    #[test]
    fn test_misfire_spawns_ember_without_point_blast() {
        let mut state = GameState::with_tuning(
            1,
            Tuning {
                random_detonation_chance: 1.0,
                ..quiet_tuning()
            },
        );
        // Within the 80px fuse radius, but a misfire never checks it
        state.hazards.push(Hazard::Explosive(explosive(
            Vec2::new(400.0, 240.0),
            15.0,
            0.0,
            Heading::Down,
        )));
        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert!(only_explosive(&state).detonated);
        assert_eq!(state.embers.len(), 1);
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_boundary_detonation() {
        let mut state = quiet_state();
        state.hazards.push(Hazard::Explosive(explosive(
            Vec2::new(100.0, 598.0),
            15.0,
            5.0,
            Heading::Down,
        )));
        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert!(only_explosive(&state).detonated);
        assert_eq!(state.embers.len(), 1);
        assert_eq!(state.embers[0].pos, Vec2::new(100.0, 603.0));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Detonated {
            pos: Vec2::new(100.0, 603.0),
            cause: DetonationCause::Boundary,
        }));
    }

    #[test]
    fn test_blast_grows_then_clears() {
        let mut state = quiet_state();
        let mut bomb = explosive(Vec2::new(100.0, 100.0), 15.0, 0.0, Heading::Down);
        bomb.detonated = true;
        bomb.blast_radius = 76.0;
        state.hazards.push(Hazard::Explosive(bomb));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(only_explosive(&state).blast_radius, 78.0);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(only_explosive(&state).blast_radius, 80.0);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.hazards.is_empty());
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_contact_detonation_defers_damage_to_blast() {
        let mut state = quiet_state();
        // 30px away: touching the bomb (20 + 20) but outside the player's own radius
        state.hazards.push(Hazard::Explosive(explosive(
            Vec2::new(430.0, 300.0),
            20.0,
            0.0,
            Heading::Down,
        )));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(only_explosive(&state).detonated);
        assert_eq!(state.health, 10);
        assert!(state.embers.is_empty());

        let mut frames = 1;
        while !state.hazards.is_empty() {
            tick(&mut state, &TickInput::default(), FRAME_MS);
            frames += 1;
            assert!(frames < 100, "blast never reached the player");
        }
        // Blast must exceed 10px: grows 2px per frame starting the frame after contact
        assert_eq!(frames, 7);
        assert_eq!(state.health, 5);
    }

    #[test]
    fn test_projectile_hits_accumulate() {
        let mut state = quiet_state();
        for expected in [9, 8, 7] {
            state
                .hazards
                .push(projectile(Vec2::new(400.0, 290.0), Heading::Down));
            tick(&mut state, &TickInput::default(), FRAME_MS);
            assert_eq!(state.health, expected);
            assert!(state.hazards.is_empty());
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_bouncer_hit_deals_two() {
        let mut state = quiet_state();
        state.hazards.push(Hazard::Bouncer(Bouncer {
            pos: Vec2::new(430.0, 300.0),
            radius: 15.0,
            vel: Vec2::ZERO,
            bounces: 0,
            max_bounces: 5,
        }));
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.health, 8);
        assert!(state.hazards.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::BouncerHit]);
    }

    #[test]
    fn test_ember_burns_once() {
        let mut state = quiet_state();
        state
            .embers
            .push(Ember::new(Vec2::new(410.0, 300.0), 20.0, 3000.0));
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.health, 8);
        assert!(state.embers.is_empty());

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.health, 8);
    }

    #[test]
    fn test_ember_expires() {
        let mut state = quiet_state();
        state
            .embers
            .push(Ember::new(Vec2::new(50.0, 50.0), 20.0, 3000.0));
        let mut last = 3000.0;
        for _ in 0..2 {
            tick(&mut state, &TickInput::default(), 1000.0);
            let lifetime = state.embers[0].lifetime_ms;
            assert!(lifetime < last);
            last = lifetime;
        }
        tick(&mut state, &TickInput::default(), 1000.0);
        assert!(state.embers.is_empty());
        assert_eq!(state.health, 10);
    }

    #[test]
    fn test_lethal_hit_ends_game_in_same_tick() {
        let mut state = quiet_state();
        state.health = 1;
        state.survival_time = 33.9;
        state
            .hazards
            .push(projectile(Vec2::new(400.0, 290.0), Heading::Down));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(state.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let report = state.report.expect("game over report");
        assert_eq!(report.survival_secs, 33);
        assert_eq!(report.rank, Rank::Diamond);
        // Fatal frame is not counted
        assert_eq!(state.survival_time, 33.9);
    }

    #[test]
    fn test_game_over_is_frozen() {
        let mut state = GameState::new(8);
        state.apply_damage(100);
        state.player.pos = Vec2::new(100.0, 100.0);

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.survival_time, 0.0);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_survival_time_accumulates() {
        let mut state = quiet_state();
        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), 250.0);
        }
        assert!((state.survival_time - 1.0).abs() < 1e-6);
        assert_eq!(state.survival_secs(), 1);
    }

    #[test]
    fn test_spawn_timer_fires_after_interval() {
        let mut state = GameState::new(11);
        tick(&mut state, &TickInput::default(), 30.0);
        assert!(state.hazards.is_empty());
        assert_eq!(state.spawn_timer_ms, 30.0);

        // 60ms accumulated: exceeds 50ms, burst spawns and timer resets
        tick(&mut state, &TickInput::default(), 30.0);
        assert!((1..=3).contains(&state.hazards.len()));
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_zero_delta_first_frame_spawns_nothing() {
        let mut state = GameState::new(11);
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.hazards.is_empty());
        assert_eq!(state.survival_time, 0.0);
    }

    #[test]
    fn test_reset_mid_play() {
        let mut state = GameState::new(77);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        state.reset();
        assert_eq!(state.health, 10);
        assert_eq!(state.survival_time, 0.0);
        assert!(state.hazards.is_empty());
        assert!(state.embers.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                up: true,
                right: true,
                ..Default::default()
            },
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, FRAME_MS);
            tick(&mut state2, input, FRAME_MS);
        }

        assert_eq!(state1.health, state2.health);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(
            format!("{:?}", state1.hazards),
            format!("{:?}", state2.hazards)
        );
        assert_eq!(state1.embers.len(), state2.embers.len());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn input_strategy() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(up, down, left, right)| TickInput {
                    up,
                    down,
                    left,
                    right,
                },
            )
        }

        proptest! {
            #[test]
            fn player_stays_inside_arena(
                seed in 0u64..1000,
                frames in proptest::collection::vec((input_strategy(), 0.0f32..50.0), 1..400)
            ) {
                let mut state = GameState::new(seed);
                let r = state.player.radius;
                let arena = state.tuning.arena();

                for (input, dt) in &frames {
                    tick(&mut state, input, *dt);
                    let p = state.player.pos;
                    prop_assert!(p.x >= r && p.x <= arena.x - r, "x={} out of bounds", p.x);
                    prop_assert!(p.y >= r && p.y <= arena.y - r, "y={} out of bounds", p.y);
                }
            }

            #[test]
            fn health_and_phase_stay_consistent(
                seed in 0u64..1000,
                frames in proptest::collection::vec((input_strategy(), 1.0f32..40.0), 1..600)
            ) {
                let mut state = GameState::new(seed);
                let mut last_time = 0.0;
                let mut last_health = state.health;

                for (input, dt) in &frames {
                    tick(&mut state, input, *dt);
                    prop_assert!(state.health <= last_health);
                    prop_assert_eq!(state.health == 0, state.is_over());
                    prop_assert!(state.survival_time >= last_time);
                    if state.is_over() {
                        prop_assert!(state.report.is_some());
                    }
                    for hazard in &state.hazards {
                        if let Hazard::Bouncer(b) = hazard {
                            prop_assert!(b.bounces < b.max_bounces);
                        }
                    }
                    last_time = state.survival_time;
                    last_health = state.health;
                }
            }

            #[test]
            fn embers_burn_at_most_once(
                spots in proptest::collection::vec((20.0f32..780.0, 20.0f32..580.0), 1..5),
                frames in proptest::collection::vec((input_strategy(), 1.0f32..50.0), 1..200)
            ) {
                let mut state = quiet_state();
                for (x, y) in &spots {
                    state.embers.push(Ember::new(Vec2::new(*x, *y), 20.0, 3000.0));
                }
                let initial = spots.len();
                let mut remaining = 3000.0f32;
                let mut burns = 0usize;

                for (input, dt) in &frames {
                    if state.is_over() {
                        break;
                    }
                    tick(&mut state, input, *dt);
                    remaining -= *dt;

                    burns += state
                        .drain_events()
                        .iter()
                        .filter(|e| **e == GameEvent::EmberBurn)
                        .count();
                    prop_assert!(burns <= initial);
                    prop_assert_eq!(state.health as usize, 10 - 2 * burns);

                    for ember in &state.embers {
                        prop_assert_eq!(ember.lifetime_ms, remaining);
                        prop_assert!(ember.lifetime_ms > 0.0);
                    }
                    if remaining > 0.0 {
                        prop_assert_eq!(state.embers.len() + burns, initial);
                    } else {
                        prop_assert!(state.embers.is_empty());
                    }
                }
            }

            #[test]
            fn bounce_counter_never_decreases(
                x in 25.0f32..775.0,
                y in 25.0f32..575.0,
                vx in -6.0f32..6.0,
                vy in -6.0f32..6.0,
            ) {
                let arena = Vec2::new(800.0, 600.0);
                let mut bouncer = Bouncer {
                    pos: Vec2::new(x, y),
                    radius: 20.0,
                    vel: Vec2::new(vx, vy),
                    bounces: 0,
                    max_bounces: 5,
                };
                let mut last = 0;
                for _ in 0..500 {
                    if bouncer.is_spent() {
                        break;
                    }
                    step_bouncer(&mut bouncer, arena);
                    prop_assert!(bouncer.bounces >= last);
                    prop_assert!(bouncer.bounces - last <= 2);
                    last = bouncer.bounces;
                }
            }
        }
    }
}
