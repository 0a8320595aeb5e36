//! Host-page overlay sync. The headline, call-to-action and wrapper are
//! plain DOM elements owned by the page; the intro only flips `data-visible`
//! attributes and the wrapper opacity, and the page's CSS does the rest.

use intro_core::OverlayFlags;
use web_sys as web;

pub const OVERLAY_ROOT_ID: &str = "intro-overlay";
pub const OVERLAY_TEXT_ID: &str = "intro-text";
pub const OVERLAY_BUTTON_ID: &str = "intro-cta";

pub struct Overlay {
    root: Option<web::Element>,
    text: Option<web::Element>,
    button: Option<web::Element>,
    applied: OverlayFlags,
    applied_opacity: f32,
}

impl Overlay {
    /// Missing elements are tolerated: a page without an overlay still gets
    /// the full render and audio.
    pub fn new(document: &web::Document) -> Self {
        Self {
            root: document.get_element_by_id(OVERLAY_ROOT_ID),
            text: document.get_element_by_id(OVERLAY_TEXT_ID),
            button: document.get_element_by_id(OVERLAY_BUTTON_ID),
            applied: OverlayFlags::default(),
            applied_opacity: 1.0,
        }
    }

    /// Push visibility flags out to the DOM, touching it only on change.
    pub fn apply(&mut self, flags: OverlayFlags) {
        if flags == self.applied {
            return;
        }
        set_visible(&self.text, flags.text_visible);
        set_visible(&self.button, flags.button_visible);
        self.applied = flags;
    }

    /// Wrapper opacity for the exit fade, quantized so a steady value does
    /// not rewrite the attribute every frame.
    pub fn set_opacity(&mut self, opacity: f32) {
        let q = (opacity * 255.0).round() / 255.0;
        if (q - self.applied_opacity).abs() < 1.0 / 512.0 {
            return;
        }
        if let Some(el) = &self.root {
            let _ = el.set_attribute("style", &format!("opacity:{q:.3}"));
        }
        self.applied_opacity = q;
    }

    /// Final state once the intro is gone.
    pub fn clear(&mut self) {
        if let Some(el) = &self.root {
            let _ = el.set_attribute("style", "display:none");
        }
    }
}

#[inline]
fn set_visible(el: &Option<web::Element>, visible: bool) {
    if let Some(el) = el {
        let _ = el.set_attribute("data-visible", if visible { "true" } else { "false" });
    }
}
