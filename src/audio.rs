//! Audio: background music plus procedurally generated sound effects
//!
//! The music track is an `<audio>` element on the page; browsers refuse to
//! start it before a user gesture, so the host retries on clicks and keys.
//! Effects are synthesized with the Web Audio API - no external files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet clipped the player
    Hit,
    /// Bouncing ball or blast wave hit the player
    HeavyHit,
    /// A bomb went off somewhere
    Explosion,
    /// Player walked into an afterflame
    Sizzle,
    /// Health ran out
    GameOver,
}

impl SoundEffect {
    /// Number of variants (size of the cooldown table)
    pub const COUNT: usize = 5;

    /// Effect to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ProjectileHit => Some(SoundEffect::Hit),
            GameEvent::BouncerHit | GameEvent::BlastHit => Some(SoundEffect::HeavyHit),
            GameEvent::Detonated { .. } => Some(SoundEffect::Explosion),
            GameEvent::EmberBurn => Some(SoundEffect::Sizzle),
            GameEvent::GameOver(_) => Some(SoundEffect::GameOver),
        }
    }

    /// Minimum seconds between two plays of the same effect. Bombs go off
    /// several times a second; without this the mix turns to mush.
    pub fn cooldown_secs(&self) -> f64 {
        match self {
            SoundEffect::Explosion => 0.12,
            SoundEffect::Hit | SoundEffect::HeavyHit | SoundEffect::Sizzle => 0.05,
            SoundEffect::GameOver => 0.0,
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::Hit => 0,
            SoundEffect::HeavyHit => 1,
            SoundEffect::Explosion => 2,
            SoundEffect::Sizzle => 3,
            SoundEffect::GameOver => 4,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        music_volume: f32,
        sfx_volume: f32,
        muted: bool,
        last_played: [f64; SoundEffect::COUNT],
    }

    impl AudioManager {
        /// Set up effects and look up the music element by id
        pub fn new(music_element_id: &str, settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - effects disabled");
            }

            let music = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(music_element_id))
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
            match &music {
                Some(el) => el.set_loop(true),
                None => log::warn!("No #{} audio element - music disabled", music_element_id),
            }

            let mut manager = Self {
                ctx,
                music,
                music_volume: 0.0,
                sfx_volume: 0.0,
                muted: false,
                last_played: [f64::NEG_INFINITY; SoundEffect::COUNT],
            };
            manager.apply_settings(settings);
            manager
        }

        /// Pick up volume changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.music_volume = settings.effective_music_volume();
            self.sfx_volume = settings.effective_sfx_volume();
            self.sync_music_volume();
            if self.music_volume <= 0.0 {
                self.pause_music();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.sync_music_volume();
        }

        fn sync_music_volume(&self) {
            if let Some(music) = &self.music {
                let vol = if self.muted { 0.0 } else { self.music_volume };
                music.set_volume(vol as f64);
            }
        }

        /// Start the background track if it is not already playing.
        /// Safe to call on every click/keydown.
        pub fn ensure_music_playing(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }

            let Some(music) = &self.music else { return };
            if self.music_volume <= 0.0 || !music.paused() {
                return;
            }
            match music.play() {
                Ok(promise) => {
                    let on_reject = Closure::<dyn FnMut(JsValue)>::new(|e: JsValue| {
                        log::info!("Music needs a user gesture first: {:?}", e);
                    });
                    let _ = promise.catch(&on_reject);
                    on_reject.forget();
                }
                Err(e) => log::warn!("Music play failed: {:?}", e),
            }
        }

        pub fn pause_music(&self) {
            if let Some(music) = &self.music {
                let _ = music.pause();
            }
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            let vol = if self.muted { 0.0 } else { self.sfx_volume };
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = self.ctx.clone() else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let now = ctx.current_time();
            let slot = &mut self.last_played[effect.index()];
            if now - *slot < effect.cooldown_secs() {
                return;
            }
            *slot = now;

            match effect {
                SoundEffect::Hit => self.play_hit(&ctx, vol),
                SoundEffect::HeavyHit => self.play_heavy_hit(&ctx, vol),
                SoundEffect::Explosion => self.play_explosion(&ctx, vol),
                SoundEffect::Sizzle => self.play_sizzle(&ctx, vol),
                SoundEffect::GameOver => self.play_game_over(&ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Bullet hit - short sharp blip
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(440.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Ball or blast hit - low thump
        fn play_heavy_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Explosion - boom!
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();

            // High frequency crack
            if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain2.gain().set_value_at_time(vol * 0.1, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.15).ok();
            }
        }

        /// Ember burn - hissing downward sweep
        fn play_sizzle(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 2400.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}
