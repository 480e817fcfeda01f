//! Media output capability
//!
//! Abstracts the native audio element (HTML `<audio>`, a desktop backend, a
//! test double) behind a fixed set of commands and events. The controller
//! depends only on this interface.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Commands the controller issues to an audio backend
///
/// Backends decode and stream audio themselves and report back through
/// [`MediaEvent`]s tagged with the [`Generation`] of the source they belong
/// to.
pub trait MediaOutput {
    /// Load a new audio URL, replacing whatever was loaded before
    fn set_source(&mut self, url: &str);

    /// Start or resume playback
    ///
    /// Returns `Err(PlaybackError::MediaRejected)` when the backend refuses
    /// (e.g. the browser's autoplay policy).
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    /// Move the playhead to `seconds` from the start
    fn seek_to(&mut self, seconds: f64);

    /// Enable or disable native looping of the loaded source
    fn set_loop(&mut self, looping: bool);
}

impl<M: MediaOutput + ?Sized> MediaOutput for Box<M> {
    fn set_source(&mut self, url: &str) {
        (**self).set_source(url);
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek_to(&mut self, seconds: f64) {
        (**self).seek_to(seconds);
    }

    fn set_loop(&mut self, looping: bool) {
        (**self).set_loop(looping);
    }
}

/// Events reported by a media backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playhead moved (native clock, seconds)
    TimeUpdate { seconds: f64 },

    /// Duration and format of the loaded source are known
    MetadataLoaded,

    /// Source played to completion
    Ended,

    /// Backend acknowledged that playback started
    Played,

    /// Backend acknowledged that playback paused
    Paused,

    /// Playback failed or stalled
    Failed { message: String },
}

/// Identity of one loaded source
///
/// Every `set_source` issued by the controller gets a fresh generation.
/// Events carrying an older generation belong to a replaced episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw value, for hosts that tag DOM listeners with it
    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
