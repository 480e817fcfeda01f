//! Playback session - the explicitly owned player context
//!
//! A `Session` is created once when the UI starts and handed by reference to
//! whatever needs the player. It owns the [`PlaybackState`] and the
//! [`PlaybackController`]; every intent mutates the state and then syncs the
//! media output.

use crate::{
    controller::PlaybackController,
    error::Result,
    events::PlayerEvent,
    media::{Generation, MediaEvent, MediaOutput},
    state::PlaybackState,
    types::{Episode, PlayerConfig},
    view::{ControlsView, NowPlaying},
};
use tracing::info;

/// Player context for one UI session
pub struct Session<M: MediaOutput> {
    state: PlaybackState,
    controller: PlaybackController<M>,
}

impl<M: MediaOutput> Session<M> {
    /// Start a session driving `media`
    pub fn new(media: M, config: PlayerConfig) -> Self {
        info!(
            autoplay = config.autoplay,
            history_size = config.history_size,
            "Starting playback session"
        );
        Self {
            state: PlaybackState::new(&config),
            controller: PlaybackController::new(media, &config),
        }
    }

    // ===== Intents =====

    pub fn play(&mut self, episode: Episode) {
        self.state.play(episode);
        self.sync();
    }

    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<()> {
        self.state.play_list(list, index)?;
        self.sync();
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.state.toggle_play();
        self.sync();
    }

    pub fn set_playing_state(&mut self, is_playing: bool) {
        self.state.set_playing_state(is_playing);
        self.sync();
    }

    pub fn toggle_loop(&mut self) {
        self.state.toggle_loop();
        self.sync();
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.toggle_shuffle();
        self.sync();
    }

    pub fn play_next(&mut self) {
        self.state.play_next();
        self.sync();
    }

    pub fn play_previous(&mut self) {
        self.state.play_previous();
        self.sync();
    }

    pub fn clear_player_state(&mut self) {
        self.state.clear_player_state();
        self.sync();
    }

    pub fn handle_seek(&mut self, amount: u64) {
        self.controller.handle_seek(&self.state, amount);
    }

    pub fn handle_episode_ended(&mut self) {
        self.controller.handle_episode_ended(&mut self.state);
    }

    /// Feed an event from the media output; see
    /// [`PlaybackController::handle_media_event`]
    pub fn handle_media_event(&mut self, generation: Generation, event: MediaEvent) -> bool {
        self.controller
            .handle_media_event(&mut self.state, generation, event)
    }

    fn sync(&mut self) {
        self.controller.sync(&mut self.state);
    }

    // ===== Views =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    pub fn media(&self) -> &M {
        self.controller.media()
    }

    pub fn media_mut(&mut self) -> &mut M {
        self.controller.media_mut()
    }

    pub fn progress(&self) -> u64 {
        self.controller.progress()
    }

    pub fn generation(&self) -> Generation {
        self.controller.generation()
    }

    pub fn controls(&self) -> ControlsView {
        ControlsView::from_state(&self.state)
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        NowPlaying::from_state(&self.state, self.controller.progress())
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.controller.drain_events()
    }
}
