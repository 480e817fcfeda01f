//! Player configuration loading
//!
//! Layers an optional config file and `PODCASTR_*` environment variables
//! over the defaults of [`PlayerConfig`].

use crate::error::{PlaybackError, Result};
use crate::types::{PlayerConfig, MAX_HISTORY_SIZE};
use std::path::Path;

/// Environment variable prefix (`PODCASTR_HISTORY_SIZE`, `PODCASTR_AUTOPLAY`, ...)
pub const ENV_PREFIX: &str = "PODCASTR";

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// The file format follows its extension (`.toml`, `.json`, ...). A
    /// missing `path` means environment and defaults only.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(::config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.history_size > MAX_HISTORY_SIZE {
            return Err(PlaybackError::Config(format!(
                "history_size {} exceeds maximum of {}",
                self.history_size, MAX_HISTORY_SIZE
            )));
        }

        Ok(())
    }
}
