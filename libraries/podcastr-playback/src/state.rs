//! Playback state - playlist, selection and navigation policy
//!
//! `PlaybackState` decides which episode is current and how next / previous
//! / shuffle / loop interact. It performs no I/O; the controller turns its
//! changes into media commands.

use crate::{
    error::{PlaybackError, Result},
    history::History,
    types::{Episode, PlayerConfig},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Session-scoped playback state
///
/// Invariant: `current_index < episode_list.len()` whenever the list is
/// non-empty, and `current_index == 0` when it is empty.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    episode_list: Vec<Episode>,
    current_index: usize,

    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,

    // Bumped every time the selected episode changes
    selection: u64,

    // Indices left behind by shuffle draws
    history: History,
    rng: StdRng,
}

impl PlaybackState {
    /// Create an empty state from session configuration
    pub fn new(config: &PlayerConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            episode_list: Vec::new(),
            current_index: 0,
            is_playing: false,
            is_looping: config.start_looping,
            is_shuffling: config.start_shuffling,
            selection: 0,
            history: History::new(config.history_size),
            rng,
        }
    }

    /// Create an empty state with deterministic shuffle draws
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&PlayerConfig {
            shuffle_seed: Some(seed),
            ..PlayerConfig::default()
        })
    }

    // ===== Selection =====

    /// Play a single episode outside any list context
    ///
    /// The playlist becomes `[episode]`.
    pub fn play(&mut self, episode: Episode) {
        debug!(title = %episode.title, "Playing single episode");
        self.episode_list = vec![episode];
        self.current_index = 0;
        self.is_playing = true;
        self.history.clear();
        self.bump_selection();
    }

    /// Replace the playlist and start at `index`
    ///
    /// Fails with [`PlaybackError::OutOfRange`] without touching the state
    /// when `index` does not address an episode of `list`.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        if index >= list.len() {
            return Err(PlaybackError::OutOfRange {
                index,
                len: list.len(),
            });
        }

        debug!(len = list.len(), index, "Playing list");
        self.episode_list = list;
        self.current_index = index;
        self.is_playing = true;
        self.history.clear();
        self.bump_selection();
        Ok(())
    }

    /// Empty the playlist
    ///
    /// Playing, looping and shuffling flags keep their last value.
    pub fn clear_player_state(&mut self) {
        debug!("Clearing player state");
        self.episode_list.clear();
        self.current_index = 0;
        self.history.clear();
        self.bump_selection();
    }

    // ===== Flags =====

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        debug!(is_playing = self.is_playing, "Toggled play");
    }

    /// Absolute setter used to reconcile with what the media output reports
    pub fn set_playing_state(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
        debug!(is_looping = self.is_looping, "Toggled loop");
    }

    /// Flip shuffle mode
    ///
    /// The current index is kept; the shuffle back-stack starts over.
    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
        self.history.clear();
        debug!(is_shuffling = self.is_shuffling, "Toggled shuffle");
    }

    // ===== Navigation =====

    /// Advance to the next episode
    ///
    /// While shuffling, draws uniformly over the whole playlist and may
    /// land on the current episode again. Otherwise steps forward by one,
    /// or does nothing at the end of the list.
    pub fn play_next(&mut self) {
        if self.is_shuffling {
            if self.episode_list.is_empty() {
                return;
            }
            self.history.push(self.current_index);
            self.current_index = self.rng.gen_range(0..self.episode_list.len());
            debug!(index = self.current_index, "Shuffle drew next episode");
            self.bump_selection();
        } else if self.has_next() {
            self.current_index += 1;
            debug!(index = self.current_index, "Advanced to next episode");
            self.bump_selection();
        }
    }

    /// Go back to the previous episode
    ///
    /// While shuffling, retraces the shuffle back-stack and falls back to
    /// the preceding list position once it is exhausted.
    pub fn play_previous(&mut self) {
        if !self.has_previous() {
            return;
        }

        if self.is_shuffling {
            let len = self.episode_list.len();
            match self.history.pop() {
                Some(index) if index < len => self.current_index = index,
                _ if self.current_index > 0 => self.current_index -= 1,
                _ => return,
            }
        } else {
            self.current_index -= 1;
        }

        debug!(index = self.current_index, "Went back to previous episode");
        self.bump_selection();
    }

    // ===== Queries =====

    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Episode at the current index, if the playlist is non-empty
    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_index)
    }

    pub fn len(&self) -> usize {
        self.episode_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episode_list.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Whether "next" can move
    ///
    /// Shuffle mode claims a next episode whenever the list is non-empty.
    pub fn has_next(&self) -> bool {
        if self.is_shuffling {
            !self.episode_list.is_empty()
        } else {
            self.current_index + 1 < self.episode_list.len()
        }
    }

    /// Whether "previous" is offered; always true while shuffling
    pub fn has_previous(&self) -> bool {
        self.is_shuffling || self.current_index > 0
    }

    /// Counter that changes whenever a different episode gets selected
    pub fn selection(&self) -> u64 {
        self.selection
    }

    /// Number of shuffle draws "previous" can still retrace
    pub fn shuffle_history_len(&self) -> usize {
        self.history.len()
    }

    fn bump_selection(&mut self) {
        self.selection = self.selection.wrapping_add(1);
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}
