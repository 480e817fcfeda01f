//! Player events
//!
//! Notifications the controller queues for the UI. The host drains them
//! after each intent or media event and re-renders.

use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// A different episode became current and its source was loaded
    EpisodeChanged {
        /// Playlist index of the new episode
        index: usize,
        /// Title of the new episode
        title: String,
    },

    /// Playing intent changed
    PlayingChanged { is_playing: bool },

    /// Loop mode changed
    LoopingChanged { is_looping: bool },

    /// Displayed progress changed (whole seconds)
    ProgressChanged { seconds: u64 },

    /// Playlist emptied, either explicitly or by running out of episodes
    PlaylistCleared,

    /// Media output reported or caused an error
    Error { message: String },
}
