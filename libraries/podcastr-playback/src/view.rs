//! Derived views over playback state
//!
//! Pure functions that decide what the player UI shows and which controls
//! are enabled. They never mutate state.

use crate::{state::PlaybackState, time::format_duration};
use serde::{Deserialize, Serialize};

/// Enabled / active flags for the transport controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsView {
    pub shuffle_enabled: bool,
    pub previous_enabled: bool,
    pub play_enabled: bool,
    pub next_enabled: bool,
    pub loop_enabled: bool,

    pub is_shuffling: bool,
    pub is_looping: bool,
    pub is_playing: bool,
}

impl ControlsView {
    /// Every transport control is disabled while no episode is current.
    /// Shuffle additionally needs more than one episode.
    pub fn from_state(state: &PlaybackState) -> Self {
        let has_episode = state.current_episode().is_some();

        Self {
            shuffle_enabled: has_episode && state.len() > 1,
            previous_enabled: has_episode && state.has_previous(),
            play_enabled: has_episode,
            next_enabled: has_episode && state.has_next(),
            loop_enabled: has_episode,
            is_shuffling: state.is_shuffling(),
            is_looping: state.is_looping(),
            is_playing: state.is_playing(),
        }
    }
}

/// What the "now playing" panel renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub title: String,
    pub members: String,
    pub thumbnail_url: String,
    pub progress_secs: u64,
    pub duration_secs: u64,
    pub progress_label: String,
    pub duration_label: String,
}

impl NowPlaying {
    /// `None` when the playlist is empty
    pub fn from_state(state: &PlaybackState, progress_secs: u64) -> Option<Self> {
        let episode = state.current_episode()?;

        Some(Self {
            title: episode.title.clone(),
            members: episode.members.clone(),
            thumbnail_url: episode.thumbnail_url.clone(),
            progress_secs,
            duration_secs: episode.duration_secs,
            progress_label: format_duration(progress_secs),
            duration_label: format_duration(episode.duration_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Episode;

    fn episode(title: &str) -> Episode {
        Episode::new(title, "Tiago", "thumb.jpg", 754, "audio.m4a")
    }

    #[test]
    fn empty_state_disables_everything() {
        let state = PlaybackState::default();
        let view = ControlsView::from_state(&state);

        assert!(!view.shuffle_enabled);
        assert!(!view.previous_enabled);
        assert!(!view.play_enabled);
        assert!(!view.next_enabled);
        assert!(!view.loop_enabled);
        assert!(NowPlaying::from_state(&state, 0).is_none());
    }

    #[test]
    fn empty_state_while_shuffling_still_disables_previous() {
        let mut state = PlaybackState::default();
        state.toggle_shuffle();
        assert!(state.has_previous());

        let view = ControlsView::from_state(&state);
        assert!(!view.previous_enabled);
        assert!(view.is_shuffling);
    }

    #[test]
    fn singleton_disables_shuffle_and_navigation() {
        let mut state = PlaybackState::default();
        state.play(episode("one"));

        let view = ControlsView::from_state(&state);
        assert!(!view.shuffle_enabled);
        assert!(!view.previous_enabled);
        assert!(!view.next_enabled);
        assert!(view.play_enabled);
        assert!(view.loop_enabled);
        assert!(view.is_playing);
    }

    #[test]
    fn middle_of_list_enables_navigation() {
        let mut state = PlaybackState::default();
        state
            .play_list(vec![episode("a"), episode("b"), episode("c")], 1)
            .unwrap();

        let view = ControlsView::from_state(&state);
        assert!(view.shuffle_enabled);
        assert!(view.previous_enabled);
        assert!(view.next_enabled);
    }

    #[test]
    fn now_playing_labels() {
        let mut state = PlaybackState::default();
        state.play(episode("Faladev"));

        let now = NowPlaying::from_state(&state, 65).unwrap();
        assert_eq!(now.title, "Faladev");
        assert_eq!(now.members, "Tiago");
        assert_eq!(now.progress_label, "01:05");
        assert_eq!(now.duration_label, "12:34");
    }
}
