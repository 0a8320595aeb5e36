//! Elapsed-time sequencing for the overlay and the one-shot actions.
//!
//! Every threshold carries its own "already fired" guard, so sampling the
//! clock every frame still produces each transition exactly once per run.

use crate::constants::*;

/// A time threshold that fires at most once.
#[derive(Clone, Copy, Debug)]
pub struct OneShot {
    at: f32,
    fired: bool,
}

impl OneShot {
    pub fn new(at: f32) -> Self {
        Self { at, fired: false }
    }

    /// True exactly once: the first sample at or past the threshold.
    pub fn fire(&mut self, elapsed: f32) -> bool {
        if !self.fired && elapsed >= self.at {
            self.fired = true;
            return true;
        }
        false
    }

    /// Latch without firing, e.g. to cancel a pending action.
    pub fn suppress(&mut self) {
        self.fired = true;
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn at(&self) -> f32 {
        self.at
    }
}

/// Edge events produced by one timeline sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimelineEvents {
    pub start_audio: bool,
    pub reveal_text: bool,
    pub reveal_button: bool,
    pub auto_exit: bool,
}

/// Persistent visibility flags pushed out to the host overlay. Once set they
/// stay set for the rest of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayFlags {
    pub text_visible: bool,
    pub button_visible: bool,
}

pub struct Timeline {
    audio: OneShot,
    text: OneShot,
    button: OneShot,
    auto_exit: OneShot,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            audio: OneShot::new(AUDIO_CUE_AT),
            text: OneShot::new(TEXT_REVEAL_AT),
            button: OneShot::new(BUTTON_REVEAL_AT),
            auto_exit: OneShot::new(AUTO_EXIT_AT),
        }
    }

    pub fn sample(&mut self, elapsed: f32) -> TimelineEvents {
        TimelineEvents {
            start_audio: self.audio.fire(elapsed),
            reveal_text: self.text.fire(elapsed),
            reveal_button: self.button.fire(elapsed),
            auto_exit: self.auto_exit.fire(elapsed),
        }
    }

    pub fn flags(&self) -> OverlayFlags {
        OverlayFlags {
            text_visible: self.text.fired(),
            button_visible: self.button.fired(),
        }
    }

    /// Cancel the pending auto-exit; used when the user exits early so the
    /// sequence cannot end twice.
    pub fn cancel_auto_exit(&mut self) {
        self.auto_exit.suppress();
    }

    pub fn auto_exit_pending(&self) -> bool {
        !self.auto_exit.fired()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
