//! WASM-compatible player wrapper

use super::output::HtmlAudioOutput;
use crate::{Episode, Generation, MediaEvent, PlaybackError, PlayerConfig, Session};
use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Plain snapshot of the playback state for JS consumers
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateSnapshot<'a> {
    episode_list: &'a [Episode],
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    has_next: bool,
    has_previous: bool,
}

/// WASM-compatible player
///
/// The host wires the audio element's DOM events to the `handle*` methods,
/// passing the generation that was current when the source was set.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Session<HtmlAudioOutput>,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player over `element`; `config` may be `undefined`
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlAudioElement, config: JsValue) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        config.validate().map_err(to_js)?;

        Ok(Self {
            inner: Session::new(HtmlAudioOutput::new(element), config),
            on_event: None,
        })
    }

    // ===== Intents =====

    pub fn play(&mut self, episode: JsValue) -> Result<(), JsValue> {
        let episode: Episode = serde_wasm_bindgen::from_value(episode)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse episode: {}", e)))?;
        self.inner.play(episode);
        self.flush_events();
        Ok(())
    }

    #[wasm_bindgen(js_name = playList)]
    pub fn play_list(&mut self, list: JsValue, index: usize) -> Result<(), JsValue> {
        let list: Vec<Episode> = serde_wasm_bindgen::from_value(list)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse episodes: {}", e)))?;
        self.inner.play_list(list, index).map_err(to_js)?;
        self.flush_events();
        Ok(())
    }

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = setPlayingState)]
    pub fn set_playing_state(&mut self, is_playing: bool) {
        self.inner.set_playing_state(is_playing);
        self.flush_events();
    }

    #[wasm_bindgen(js_name = toggleLoop)]
    pub fn toggle_loop(&mut self) {
        self.inner.toggle_loop();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.toggle_shuffle();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&mut self) {
        self.inner.play_next();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = playPrevious)]
    pub fn play_previous(&mut self) {
        self.inner.play_previous();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = clearPlayerState)]
    pub fn clear_player_state(&mut self) {
        self.inner.clear_player_state();
        self.flush_events();
    }

    /// Seek to `amount` seconds (slider value)
    #[wasm_bindgen(js_name = handleSeek)]
    pub fn handle_seek(&mut self, amount: f64) {
        self.inner.handle_seek(amount.max(0.0) as u64);
        self.flush_events();
    }

    // ===== Media events =====

    #[wasm_bindgen(js_name = handleMetadataLoaded)]
    pub fn handle_metadata_loaded(&mut self, generation: f64) -> bool {
        self.media_event(generation, MediaEvent::MetadataLoaded)
    }

    #[wasm_bindgen(js_name = handleTimeUpdate)]
    pub fn handle_time_update(&mut self, generation: f64, seconds: f64) -> bool {
        self.media_event(generation, MediaEvent::TimeUpdate { seconds })
    }

    #[wasm_bindgen(js_name = handleEnded)]
    pub fn handle_ended(&mut self, generation: f64) -> bool {
        self.media_event(generation, MediaEvent::Ended)
    }

    #[wasm_bindgen(js_name = handlePlayed)]
    pub fn handle_played(&mut self, generation: f64) -> bool {
        self.media_event(generation, MediaEvent::Played)
    }

    #[wasm_bindgen(js_name = handlePaused)]
    pub fn handle_paused(&mut self, generation: f64) -> bool {
        self.media_event(generation, MediaEvent::Paused)
    }

    #[wasm_bindgen(js_name = handleFailed)]
    pub fn handle_failed(&mut self, generation: f64, message: String) -> bool {
        self.media_event(generation, MediaEvent::Failed { message })
    }

    /// Promise of the last `play()` issued to the audio element
    #[wasm_bindgen(js_name = takePlayPromise)]
    pub fn take_play_promise(&mut self) -> Option<Promise> {
        self.inner.media_mut().take_play_promise()
    }

    // ===== State Queries =====

    /// Generation of the loaded source, to tag DOM listeners with
    pub fn generation(&self) -> f64 {
        self.inner.generation().as_u64() as f64
    }

    pub fn progress(&self) -> f64 {
        self.inner.progress() as f64
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        let state = self.inner.state();
        let snapshot = StateSnapshot {
            episode_list: state.episode_list(),
            current_index: state.current_index(),
            is_playing: state.is_playing(),
            is_looping: state.is_looping(),
            is_shuffling: state.is_shuffling(),
            has_next: state.has_next(),
            has_previous: state.has_previous(),
        };
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = getControls)]
    pub fn get_controls(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.controls()).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = getNowPlaying)]
    pub fn get_now_playing(&self) -> JsValue {
        match self.inner.now_playing() {
            Some(now) => serde_wasm_bindgen::to_value(&now).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    // ===== Event Listeners =====

    /// Register the callback receiving every player event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Internal =====

    fn media_event(&mut self, generation: f64, event: MediaEvent) -> bool {
        let applied = self
            .inner
            .handle_media_event(Generation::from_u64(generation as u64), event);
        self.flush_events();
        applied
    }

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        let Some(ref cb) = self.on_event else {
            return;
        };
        for event in events {
            if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
