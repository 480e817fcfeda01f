//! Playback controller - binds playback state to a media output
//!
//! The controller turns state changes into media commands and media events
//! back into state changes:
//!
//! ```text
//! intent -> PlaybackState -> sync() -> MediaOutput commands
//!                 ^                           |
//!                 +-- handle_media_event() <--+ (time update, ended, ...)
//! ```
//!
//! Every source it loads gets a fresh [`Generation`]. Events tagged with an
//! older generation come from a replaced episode and are dropped.

use crate::{
    events::PlayerEvent,
    media::{Generation, MediaEvent, MediaOutput},
    state::PlaybackState,
    types::PlayerConfig,
};
use tracing::{debug, info, warn};

/// Reconciles [`PlaybackState`] with a [`MediaOutput`]
pub struct PlaybackController<M> {
    media: M,
    autoplay: bool,

    // Identity of the loaded source
    generation: Generation,
    // PlaybackState::selection() the loaded source corresponds to
    loaded_selection: u64,
    has_source: bool,

    // Displayed progress, whole seconds
    progress: u64,
    // Time updates are only accepted once metadata arrived
    progress_subscribed: bool,

    // Last flags pushed to the media output
    last_playing: bool,
    last_looping: bool,

    pending_events: Vec<PlayerEvent>,
}

impl<M: MediaOutput> PlaybackController<M> {
    /// Create a controller for a freshly created [`PlaybackState`]
    pub fn new(media: M, config: &PlayerConfig) -> Self {
        Self {
            media,
            autoplay: config.autoplay,
            generation: Generation::default(),
            loaded_selection: 0,
            has_source: false,
            progress: 0,
            progress_subscribed: false,
            last_playing: false,
            last_looping: config.start_looping,
            pending_events: Vec::new(),
        }
    }

    // ===== Reconciliation =====

    /// Push state changes to the media output
    ///
    /// Call after every intent. Loads a new source when the selection
    /// changed, then applies loop and play/pause transitions. A rejected
    /// `play()` forces the state back to not playing.
    pub fn sync(&mut self, state: &mut PlaybackState) {
        if state.selection() != self.loaded_selection {
            self.loaded_selection = state.selection();
            self.load_current(state);
        }

        if state.is_looping() != self.last_looping {
            self.last_looping = state.is_looping();
            if self.has_source {
                self.media.set_loop(self.last_looping);
            }
            self.emit(PlayerEvent::LoopingChanged {
                is_looping: self.last_looping,
            });
        }

        if state.is_playing() != self.last_playing {
            self.apply_playing(state);
        }
    }

    fn load_current(&mut self, state: &mut PlaybackState) {
        self.generation = self.generation.next();
        self.progress_subscribed = false;
        self.set_progress(0);

        let Some(episode) = state.current_episode() else {
            if self.has_source {
                self.media.pause();
            }
            self.has_source = false;
            info!(generation = %self.generation, "Playlist empty, player idle");
            self.emit(PlayerEvent::PlaylistCleared);
            return;
        };

        let url = episode.audio_url.clone();
        let title = episode.title.clone();
        let index = state.current_index();

        info!(generation = %self.generation, index, title = %title, "Loading episode");
        self.media.set_source(&url);
        self.media.set_loop(state.is_looping());
        self.last_looping = state.is_looping();
        self.has_source = true;
        self.emit(PlayerEvent::EpisodeChanged { index, title });

        if self.autoplay || state.is_playing() {
            self.start_playback(state);
        }
    }

    fn apply_playing(&mut self, state: &mut PlaybackState) {
        if !self.has_source {
            // Nothing to command; remember the intent for the next source
            self.record_playing(state.is_playing());
            return;
        }

        if state.is_playing() {
            self.start_playback(state);
        } else {
            self.media.pause();
            self.record_playing(false);
        }
    }

    fn start_playback(&mut self, state: &mut PlaybackState) {
        match self.media.play() {
            Ok(()) => {
                state.set_playing_state(true);
                self.record_playing(true);
            }
            Err(e) => {
                warn!(generation = %self.generation, "Media output rejected play: {}", e);
                state.set_playing_state(false);
                self.record_playing(false);
                self.emit(PlayerEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    // ===== User intents handled here =====

    /// Seek the loaded episode to `amount` seconds
    ///
    /// Displayed progress jumps to `amount` right away instead of waiting
    /// for the next time update. Clamped to the episode duration when it is
    /// known; ignored when nothing is loaded.
    pub fn handle_seek(&mut self, state: &PlaybackState, amount: u64) {
        let Some(episode) = state.current_episode() else {
            return;
        };
        if !self.has_source {
            return;
        }

        let amount = if episode.duration_secs > 0 {
            amount.min(episode.duration_secs)
        } else {
            amount
        };

        debug!(generation = %self.generation, amount, "Seeking");
        self.media.seek_to(amount as f64);
        self.set_progress(amount);
    }

    /// End-of-playback policy
    ///
    /// Continues with the next episode when there is one, otherwise clears
    /// the playlist and leaves the player idle.
    pub fn handle_episode_ended(&mut self, state: &mut PlaybackState) {
        if state.has_next() {
            state.play_next();
        } else {
            info!("Reached end of playlist");
            state.clear_player_state();
        }
        self.sync(state);
    }

    // ===== Media events =====

    /// Apply an event reported by the media output
    ///
    /// Returns `false` when the event was ignored: it belongs to a replaced
    /// source, or it is a time update that arrived before metadata.
    pub fn handle_media_event(
        &mut self,
        state: &mut PlaybackState,
        generation: Generation,
        event: MediaEvent,
    ) -> bool {
        if !self.has_source || generation != self.generation {
            debug!(
                stale = %generation,
                current = %self.generation,
                ?event,
                "Dropping stale media event"
            );
            return false;
        }

        match event {
            MediaEvent::MetadataLoaded => {
                self.media.seek_to(0.0);
                self.progress_subscribed = true;
                self.set_progress(0);
            }
            MediaEvent::TimeUpdate { seconds } => {
                if !self.progress_subscribed {
                    return false;
                }
                self.set_progress(seconds.max(0.0).floor() as u64);
            }
            MediaEvent::Ended => {
                if state.is_looping() {
                    // Native looping normally swallows this
                    self.media.seek_to(0.0);
                    self.set_progress(0);
                    self.start_playback(state);
                } else {
                    self.handle_episode_ended(state);
                }
            }
            MediaEvent::Played => {
                state.set_playing_state(true);
                self.record_playing(true);
            }
            MediaEvent::Paused => {
                state.set_playing_state(false);
                self.record_playing(false);
            }
            MediaEvent::Failed { message } => {
                warn!(generation = %self.generation, "Media playback failed: {}", message);
                state.set_playing_state(false);
                self.record_playing(false);
                self.emit(PlayerEvent::Error { message });
            }
        }

        true
    }

    // ===== Queries =====

    /// Displayed progress in whole seconds
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Generation of the currently loaded source
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn has_source(&self) -> bool {
        self.has_source
    }

    pub fn is_progress_subscribed(&self) -> bool {
        self.progress_subscribed
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_progress(&mut self, seconds: u64) {
        if self.progress != seconds {
            self.progress = seconds;
            self.emit(PlayerEvent::ProgressChanged { seconds });
        }
    }

    fn record_playing(&mut self, is_playing: bool) {
        if self.last_playing != is_playing {
            self.last_playing = is_playing;
            self.emit(PlayerEvent::PlayingChanged { is_playing });
        }
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::PlaybackError, types::Episode};

    #[derive(Debug, Default)]
    struct RecordingOutput {
        commands: Vec<String>,
        reject_play: bool,
    }

    impl MediaOutput for RecordingOutput {
        fn set_source(&mut self, url: &str) {
            self.commands.push(format!("source {url}"));
        }

        fn play(&mut self) -> crate::Result<()> {
            if self.reject_play {
                return Err(PlaybackError::MediaRejected("autoplay blocked".to_string()));
            }
            self.commands.push("play".to_string());
            Ok(())
        }

        fn pause(&mut self) {
            self.commands.push("pause".to_string());
        }

        fn seek_to(&mut self, seconds: f64) {
            self.commands.push(format!("seek {seconds}"));
        }

        fn set_loop(&mut self, looping: bool) {
            self.commands.push(format!("loop {looping}"));
        }
    }

    fn episode(title: &str, duration_secs: u64) -> Episode {
        Episode::new(title, "Diego", "thumb.jpg", duration_secs, format!("{title}.m4a"))
    }

    fn setup() -> (PlaybackState, PlaybackController<RecordingOutput>) {
        let config = PlayerConfig {
            shuffle_seed: Some(1),
            ..PlayerConfig::default()
        };
        (
            PlaybackState::new(&config),
            PlaybackController::new(RecordingOutput::default(), &config),
        )
    }

    #[test]
    fn loading_an_episode_sets_source_and_plays() {
        let (mut state, mut controller) = setup();
        state.play(episode("a", 120));
        controller.sync(&mut state);

        assert_eq!(
            controller.media().commands,
            vec!["source a.m4a", "loop false", "play"]
        );
        assert!(controller.has_source());
        assert!(state.is_playing());
        assert_eq!(controller.generation().as_u64(), 1);
    }

    #[test]
    fn toggling_play_pauses_and_resumes() {
        let (mut state, mut controller) = setup();
        state.play(episode("a", 120));
        controller.sync(&mut state);
        controller.media_mut().commands.clear();

        state.toggle_play();
        controller.sync(&mut state);
        state.toggle_play();
        controller.sync(&mut state);

        assert_eq!(controller.media().commands, vec!["pause", "play"]);
    }

    #[test]
    fn rejected_play_forces_not_playing() {
        let (mut state, mut controller) = setup();
        controller.media_mut().reject_play = true;

        state.play(episode("a", 120));
        controller.sync(&mut state);

        assert!(!state.is_playing());
        let events = controller.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, PlayerEvent::Error { .. })));
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn seek_updates_progress_immediately() {
        let (mut state, mut controller) = setup();
        state.play(episode("a", 120));
        controller.sync(&mut state);

        controller.handle_seek(&state, 30);
        assert_eq!(controller.progress(), 30);
        assert_eq!(controller.media().commands.last().unwrap(), "seek 30");

        controller.handle_seek(&state, 500);
        assert_eq!(controller.progress(), 120);
    }

    #[test]
    fn seek_without_episode_is_ignored() {
        let (state, mut controller) = setup();
        controller.handle_seek(&state, 30);
        assert_eq!(controller.progress(), 0);
        assert!(controller.media().commands.is_empty());
    }

    #[test]
    fn time_updates_need_metadata_first() {
        let (mut state, mut controller) = setup();
        state.play(episode("a", 120));
        controller.sync(&mut state);
        let generation = controller.generation();

        let applied = controller.handle_media_event(
            &mut state,
            generation,
            MediaEvent::TimeUpdate { seconds: 12.7 },
        );
        assert!(!applied);
        assert_eq!(controller.progress(), 0);

        assert!(controller.handle_media_event(&mut state, generation, MediaEvent::MetadataLoaded));
        assert!(controller.is_progress_subscribed());
        assert!(controller.handle_media_event(
            &mut state,
            generation,
            MediaEvent::TimeUpdate { seconds: 12.7 },
        ));
        assert_eq!(controller.progress(), 12);
    }

    #[test]
    fn stale_events_are_dropped() {
        let (mut state, mut controller) = setup();
        state
            .play_list(vec![episode("a", 120), episode("b", 90)], 0)
            .unwrap();
        controller.sync(&mut state);
        let old = controller.generation();

        state.play_next();
        controller.sync(&mut state);
        assert_ne!(controller.generation(), old);

        // The first episode's ended event must not advance the new one
        assert!(!controller.handle_media_event(&mut state, old, MediaEvent::Ended));
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn ended_advances_then_clears() {
        let (mut state, mut controller) = setup();
        state
            .play_list(vec![episode("a", 120), episode("b", 90)], 0)
            .unwrap();
        controller.sync(&mut state);

        let generation = controller.generation();
        controller.handle_media_event(&mut state, generation, MediaEvent::Ended);
        assert_eq!(state.current_index(), 1);

        let generation = controller.generation();
        controller.handle_media_event(&mut state, generation, MediaEvent::Ended);
        assert!(state.is_empty());
        assert!(!controller.has_source());
        assert!(controller
            .drain_events()
            .contains(&PlayerEvent::PlaylistCleared));
    }

    #[test]
    fn ended_while_looping_restarts() {
        let (mut state, mut controller) = setup();
        state
            .play_list(vec![episode("a", 120), episode("b", 90)], 0)
            .unwrap();
        state.toggle_loop();
        controller.sync(&mut state);
        controller.media_mut().commands.clear();

        let generation = controller.generation();
        controller.handle_media_event(&mut state, generation, MediaEvent::Ended);

        assert_eq!(state.current_index(), 0);
        assert_eq!(controller.generation(), generation);
        assert_eq!(controller.media().commands, vec!["seek 0", "play"]);
    }

    #[test]
    fn pause_acknowledgement_updates_state_without_command() {
        let (mut state, mut controller) = setup();
        state.play(episode("a", 120));
        controller.sync(&mut state);
        controller.media_mut().commands.clear();

        let generation = controller.generation();
        controller.handle_media_event(&mut state, generation, MediaEvent::Paused);
        assert!(!state.is_playing());

        controller.sync(&mut state);
        assert!(controller.media().commands.is_empty());
    }

    #[test]
    fn failure_event_forces_not_playing() {
        let (mut state, mut controller) = setup();
        state.play(episode("a", 120));
        controller.sync(&mut state);
        controller.drain_events();

        let generation = controller.generation();
        controller.handle_media_event(
            &mut state,
            generation,
            MediaEvent::Failed {
                message: "network stalled".to_string(),
            },
        );

        assert!(!state.is_playing());
        assert_eq!(
            controller.drain_events(),
            vec![
                PlayerEvent::PlayingChanged { is_playing: false },
                PlayerEvent::Error {
                    message: "network stalled".to_string()
                },
            ]
        );
    }

    #[test]
    fn no_autoplay_keeps_paused_selection_paused() {
        let config = PlayerConfig {
            autoplay: false,
            ..PlayerConfig::default()
        };
        let mut state = PlaybackState::new(&config);
        let mut controller = PlaybackController::new(RecordingOutput::default(), &config);

        state
            .play_list(vec![episode("a", 120), episode("b", 90)], 0)
            .unwrap();
        controller.sync(&mut state);
        state.toggle_play();
        controller.sync(&mut state);
        controller.media_mut().commands.clear();

        state.play_next();
        controller.sync(&mut state);
        assert_eq!(
            controller.media().commands,
            vec!["source b.m4a", "loop false"]
        );
        assert!(!state.is_playing());
    }
}
