//! One-shot power-up cue on WebAudio. The sweep and envelope are handed to
//! the audio thread as param ramps up front, so the graph needs no per-frame
//! attention; `CueVoice` only exists so teardown can cut it short.

use intro_core::constants::*;
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct CueVoice {
    ctx: web::AudioContext,
    osc: web::OscillatorNode,
}

/// Build and start the cue. Any failure (no audio device, autoplay policy)
/// is returned for the caller to log; the intro keeps running without sound.
pub fn trigger_cue() -> Result<CueVoice, JsValue> {
    let ctx = web::AudioContext::new()?;
    let now = ctx.current_time();

    let osc = web::OscillatorNode::new(&ctx)?;
    osc.set_type(web::OscillatorType::Sine);
    osc.frequency().set_value(CUE_START_HZ);
    osc.frequency()
        .exponential_ramp_to_value_at_time(CUE_END_HZ, now + CUE_SWEEP_SECS as f64)?;

    let gain = web::GainNode::new(&ctx)?;
    gain.gain().set_value(0.0);
    gain.gain()
        .linear_ramp_to_value_at_time(CUE_PEAK_GAIN, now + CUE_ATTACK_SECS as f64)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(CUE_FLOOR_GAIN, now + CUE_RELEASE_END_SECS as f64)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start()?;
    osc.stop_with_when(now + CUE_STOP_SECS as f64)?;

    Ok(CueVoice { ctx, osc })
}

impl CueVoice {
    /// Hard-stop the cue and release the audio context.
    pub fn stop(self) {
        let _ = self.osc.stop();
        let _ = self.ctx.close();
    }
}
