//! WASM bindings for podcastr-playback
//!
//! Provides an `HtmlAudioElement` backend and a JavaScript-friendly wrapper
//! around [`Session`](crate::Session), so the player can run in the browser.

pub mod output;
pub mod player;

pub use output::HtmlAudioOutput;
pub use player::WasmPlayer;
