//! The one-shot "power-up" tone, described in closed form so the web
//! frontend can hand the same curve to WebAudio param ramps while the native
//! frontend synthesizes samples directly.

use crate::constants::*;

/// Instantaneous frequency of the exponential sweep, clamped at the end
/// frequency once the sweep window closes.
#[inline]
pub fn frequency_at(t: f32) -> f32 {
    let x = (t / CUE_SWEEP_SECS).clamp(0.0, 1.0);
    CUE_START_HZ * (CUE_END_HZ / CUE_START_HZ).powf(x)
}

/// Amplitude envelope: linear attack to the peak, exponential release down
/// to the silence floor, zero afterwards.
#[inline]
pub fn gain_at(t: f32) -> f32 {
    if t < 0.0 {
        0.0
    } else if t < CUE_ATTACK_SECS {
        CUE_PEAK_GAIN * (t / CUE_ATTACK_SECS)
    } else if t < CUE_RELEASE_END_SECS {
        let x = (t - CUE_ATTACK_SECS) / (CUE_RELEASE_END_SECS - CUE_ATTACK_SECS);
        CUE_PEAK_GAIN * (CUE_FLOOR_GAIN / CUE_PEAK_GAIN).powf(x)
    } else {
        0.0
    }
}

/// Accumulated oscillator phase in cycles at time `t`.
///
/// For an exponential sweep `f(t) = f0 * k^(t/T)` the integral is
/// `f0 * T / ln(k) * (k^(t/T) - 1)`; past the sweep window the frequency
/// holds at `f1` and phase grows linearly.
#[inline]
pub fn phase_at(t: f32) -> f32 {
    let t = t.max(0.0);
    let k = CUE_END_HZ / CUE_START_HZ;
    let ln_k = k.ln();
    if t < CUE_SWEEP_SECS {
        CUE_START_HZ * CUE_SWEEP_SECS / ln_k * (k.powf(t / CUE_SWEEP_SECS) - 1.0)
    } else {
        let swept = CUE_START_HZ * CUE_SWEEP_SECS / ln_k * (k - 1.0);
        swept + CUE_END_HZ * (t - CUE_SWEEP_SECS)
    }
}

/// One mono sample of the cue at time `t` since the trigger.
#[inline]
pub fn sample(t: f32) -> f32 {
    (phase_at(t) * std::f32::consts::TAU).sin() * gain_at(t)
}

/// The cue is hard-stopped shortly after the release reaches the floor.
#[inline]
pub fn finished(t: f32) -> bool {
    t >= CUE_STOP_SECS
}
