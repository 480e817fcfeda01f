//! Podcastr - Playback Core
//!
//! Platform-agnostic playback state machine for the Podcastr player.
//!
//! This crate provides:
//! - Playlist and current-episode selection (`PlaybackState`)
//! - Sequential and shuffle navigation with a shuffle back-stack
//! - Loop mode and the end-of-playlist policy
//! - A binding layer that drives any audio backend (`PlaybackController`)
//! - Derived views for the transport controls and "now playing" panel
//!
//! # Architecture
//!
//! `podcastr-playback` does not decode audio and does not fetch episodes:
//! - Audio output is a [`MediaOutput`] implementation supplied by the host
//! - Episodes arrive as plain [`Episode`] values from any data source
//! - No global state: the host owns a [`Session`] and passes it around
//!
//! The `wasm` feature adds an `HtmlAudioElement` backend and JS bindings.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use podcastr_playback::{Episode, MediaOutput, PlayerConfig, Result, Session};
//!
//! // A backend that does nothing
//! struct Silent;
//!
//! impl MediaOutput for Silent {
//!     fn set_source(&mut self, _url: &str) {}
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek_to(&mut self, _seconds: f64) {}
//!     fn set_loop(&mut self, _looping: bool) {}
//! }
//!
//! let mut session = Session::new(Silent, PlayerConfig::default());
//!
//! let episodes = vec![
//!     Episode::new("Ep 1", "Diego", "cover1.jpg", 1800, "ep1.m4a"),
//!     Episode::new("Ep 2", "Diego", "cover2.jpg", 2400, "ep2.m4a"),
//! ];
//! session.play_list(episodes, 0)?;
//! assert!(session.state().is_playing());
//!
//! session.play_next();
//! assert_eq!(session.state().current_index(), 1);
//! assert!(!session.controls().next_enabled);
//!
//! // Last episode finished: the playlist clears
//! session.handle_episode_ended();
//! assert!(session.state().is_empty());
//! # Ok::<(), podcastr_playback::PlaybackError>(())
//! ```
//!
//! # Example: Media Events
//!
//! ```rust,no_run
//! # use podcastr_playback::{MediaEvent, MediaOutput, Session};
//! # fn wire<M: MediaOutput>(session: &mut Session<M>) {
//! // Tag listeners with the generation current when the source was set
//! let generation = session.generation();
//!
//! // ... later, from the audio element's callbacks
//! session.handle_media_event(generation, MediaEvent::MetadataLoaded);
//! session.handle_media_event(generation, MediaEvent::TimeUpdate { seconds: 12.4 });
//! # }
//! ```

mod config;
mod controller;
mod error;
mod events;
mod history;
mod media;
mod session;
mod state;
pub mod time;
pub mod types;
mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use crate::config::ENV_PREFIX;
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use history::History;
pub use media::{Generation, MediaEvent, MediaOutput};
pub use session::Session;
pub use state::PlaybackState;
pub use time::{format_duration, format_duration_long};
pub use types::{Episode, PlayerConfig};
pub use view::{ControlsView, NowPlaying};
