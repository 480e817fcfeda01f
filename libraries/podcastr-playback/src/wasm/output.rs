//! `<audio>` element backend

use crate::{
    error::{PlaybackError, Result},
    media::MediaOutput,
};
use js_sys::Promise;
use tracing::warn;
use web_sys::HtmlAudioElement;

/// [`MediaOutput`] over a DOM audio element
///
/// `play()` only reports synchronous failures. The returned promise is kept
/// so the host can attach a rejection handler (autoplay policy) and report
/// it back as a `Failed` media event.
pub struct HtmlAudioOutput {
    element: HtmlAudioElement,
    pending_play: Option<Promise>,
}

impl HtmlAudioOutput {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self {
            element,
            pending_play: None,
        }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Promise of the most recent `play()` call, if not taken yet
    pub fn take_play_promise(&mut self) -> Option<Promise> {
        self.pending_play.take()
    }
}

impl MediaOutput for HtmlAudioOutput {
    fn set_source(&mut self, url: &str) {
        self.pending_play = None;
        self.element.set_src(url);
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::MediaRejected(format!("{:?}", e)))?;
        self.pending_play = Some(promise);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!("Audio element refused pause: {:?}", e);
        }
    }

    fn seek_to(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_loop(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}
