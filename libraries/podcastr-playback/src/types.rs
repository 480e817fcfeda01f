//! Core types for podcast playback

use serde::{Deserialize, Serialize};

/// A playable podcast episode
///
/// Supplied by the episode data source and never mutated by the player.
/// Field aliases accept the names used by the episode API
/// (`thumbnail`, `duration`, `url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode slug, when the data source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Episode title
    pub title: String,

    /// Credited participants (free text)
    pub members: String,

    /// Artwork URL
    #[serde(alias = "thumbnail")]
    pub thumbnail_url: String,

    /// Length in whole seconds
    #[serde(alias = "duration")]
    pub duration_secs: u64,

    /// Audio file URL handed to the media output
    #[serde(alias = "url")]
    pub audio_url: String,
}

impl Episode {
    /// Create an episode without an id
    pub fn new(
        title: impl Into<String>,
        members: impl Into<String>,
        thumbnail_url: impl Into<String>,
        duration_secs: u64,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            members: members.into(),
            thumbnail_url: thumbnail_url.into(),
            duration_secs,
            audio_url: audio_url.into(),
        }
    }

    /// Attach the data source's episode id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Largest accepted shuffle back-stack capacity
pub const MAX_HISTORY_SIZE: usize = 10_000;

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Shuffle back-stack capacity (default: 50)
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Start playback as soon as a new episode is loaded (default: true)
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Seed for shuffle draws; entropy when unset
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Loop mode at session start (default: false)
    #[serde(default)]
    pub start_looping: bool,

    /// Shuffle mode at session start (default: false)
    #[serde(default)]
    pub start_shuffling: bool,
}

fn default_history_size() -> usize {
    50
}

fn default_autoplay() -> bool {
    true
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            autoplay: default_autoplay(),
            shuffle_seed: None,
            start_looping: false,
            start_shuffling: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.history_size, 50);
        assert!(config.autoplay);
        assert_eq!(config.shuffle_seed, None);
        assert!(!config.start_looping);
        assert!(!config.start_shuffling);
    }

    #[test]
    fn episode_builder() {
        let episode = Episode::new(
            "Faladev #30",
            "Diego e Richard",
            "https://example.com/cover.jpg",
            3981,
            "https://example.com/ep.m4a",
        )
        .with_id("a-importancia-da-contribuicao-em-open-source");

        assert_eq!(episode.title, "Faladev #30");
        assert_eq!(episode.duration_secs, 3981);
        assert_eq!(
            episode.id.as_deref(),
            Some("a-importancia-da-contribuicao-em-open-source")
        );
    }
}
