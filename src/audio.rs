//! Audio: synthesized impact and placement cues via Web Audio.
//!
//! The `AudioContext` is created lazily on the first user gesture (browsers
//! keep output suspended until one) and the subsystem owns all of its own
//! rate-limiter state. The envelopes are short percussive synth voices: a
//! deep sine thud for floor impacts, scaled by impact speed, and a crisp
//! filtered triangle pop for placements.

#[cfg(test)]
#[path = "audio_test.rs"]
mod audio_test;

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, BiquadFilterType, OscillatorType};

use crate::consts::{IMPACT_DEBOUNCE_MS, IMPACT_SPEED_NORM, MIN_IMPACT_INTENSITY};

/// Minimum-interval gate for impact sounds.
///
/// Pure state machine so the debounce window is testable without an audio
/// backend. A blocked attempt does not extend the window.
#[derive(Debug, Clone)]
pub struct ImpactGate {
    last_ms: f64,
}

impl ImpactGate {
    #[must_use]
    pub fn new() -> Self {
        Self { last_ms: f64::NEG_INFINITY }
    }

    /// Whether an impact may play at `now_ms`, claiming the slot if so.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ms < IMPACT_DEBOUNCE_MS {
            return false;
        }
        self.last_ms = now_ms;
        true
    }
}

impl Default for ImpactGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a floor-impact speed (px/frame) to loudness in `0..=1`.
#[must_use]
pub fn impact_intensity(speed: f64) -> f64 {
    (speed.abs() / IMPACT_SPEED_NORM).min(1.0)
}

/// Owns the lazily-created audio context and the per-sound envelopes.
pub struct SoundDirector {
    ctx: Option<AudioContext>,
    gate: ImpactGate,
}

impl SoundDirector {
    #[must_use]
    pub fn new() -> Self {
        Self { ctx: None, gate: ImpactGate::new() }
    }

    /// Create (or resume) the audio context. Must be called from a user
    /// gesture handler, or the browser keeps output suspended.
    pub fn ensure_init(&mut self) {
        if self.ctx.is_none() {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(err) => {
                    log::warn!("audio context unavailable: {err:?}");
                    return;
                }
            }
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                if let Err(err) = ctx.resume() {
                    log::debug!("audio resume failed: {err:?}");
                }
            }
        }
    }

    /// Play the floor-impact thud, scaled by the pre-collision speed.
    ///
    /// Skipped when audio was never unlocked, when the debounce gate is
    /// closed, or when the impact is too soft to hear.
    pub fn play_impact(&mut self, speed: f64) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        if !self.gate.allow(js_sys::Date::now()) {
            return;
        }
        let intensity = impact_intensity(speed);
        if intensity < MIN_IMPACT_INTENSITY {
            return;
        }
        if let Err(err) = impact_voice(ctx, intensity) {
            log::debug!("impact voice failed: {err:?}");
        }
    }

    /// Play the placement pop for a drag release.
    pub fn play_placement(&mut self) {
        self.ensure_init();
        let Some(ctx) = &self.ctx else {
            return;
        };
        if let Err(err) = placement_voice(ctx) {
            log::debug!("placement voice failed: {err:?}");
        }
    }
}

impl Default for SoundDirector {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn impact_voice(ctx: &AudioContext, intensity: f64) -> Result<(), JsValue> {
    let t = ctx.current_time();
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    // Deep thud: sine dropping from ~80-130 Hz to 30 Hz.
    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value_at_time((80.0 + intensity * 50.0) as f32, t)?;
    osc.frequency().exponential_ramp_to_value_at_time(30.0, t + 0.15)?;

    // Percussive envelope.
    gain.gain().set_value_at_time(0.0, t)?;
    gain.gain().linear_ramp_to_value_at_time((intensity * 0.4) as f32, t + 0.01)?;
    gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.2)?;

    osc.start()?;
    osc.stop_with_when(t + 0.2)?;
    Ok(())
}

fn placement_voice(ctx: &AudioContext) -> Result<(), JsValue> {
    let t = ctx.current_time();
    let osc = ctx.create_oscillator()?;
    let filter = ctx.create_biquad_filter()?;
    let gain = ctx.create_gain()?;

    osc.connect_with_audio_node(&filter)?;
    filter.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    // Crisp tick: triangle dropping an octave-and-change through a lowpass
    // that shaves the harshness off.
    osc.set_type(OscillatorType::Triangle);
    osc.frequency().set_value_at_time(600.0, t)?;
    osc.frequency().exponential_ramp_to_value_at_time(100.0, t + 0.08)?;

    filter.set_type(BiquadFilterType::Lowpass);
    filter.frequency().set_value(2000.0);

    gain.gain().set_value_at_time(0.0, t)?;
    gain.gain().linear_ramp_to_value_at_time(0.15, t + 0.005)?;
    gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.1)?;

    osc.start()?;
    osc.stop_with_when(t + 0.1)?;
    Ok(())
}
