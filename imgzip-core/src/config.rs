//! Knobs of the pipeline a host may want to tune.
//!
//! There is no config file: the host builds a [`PipelineConfig`] in code or hands over a TOML
//! string it got from wherever it keeps its own settings.
use std::time::Duration;

use imgzip_common::serde::{self, Deserialize, Serialize};

use crate::error::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("Rust Image Archiver/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_PACING_DELAY_MS: u64 = 50;
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;
pub const MAX_COMPRESSION_LEVEL: u8 = 9;
pub const DEFAULT_FALLBACK_NAME: &str = "image";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde", default)]
pub struct PipelineConfig {
    /// Fixed pause between two items, in milliseconds.
    pub pacing_delay_ms: u64,
    /// Deflate level used when finalizing the archive.
    pub compression_level: u8,
    /// Name given to images whose alt text sanitizes to nothing.
    pub fallback_name: String,
    pub user_agent: String,
    /// Timeout handed to the HTTP client. `None` leaves the client's own default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: DEFAULT_PACING_DELAY_MS,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl PipelineConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(ConfigError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    #[inline]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Same config without the pause between items.
    pub fn without_pacing(mut self) -> Self {
        self.pacing_delay_ms = 0;
        self
    }
}
