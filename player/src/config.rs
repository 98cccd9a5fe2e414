use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Playback settings, usually read from a TOML file.
///
/// ```toml
/// playback_rate = 1.5
/// looping = true
/// prev_segment_threshold = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Multiplier applied to the elapsed wall clock time of each frame.
    pub playback_rate: f64,
    pub looping: bool,
    /// Start playing right after a sequence was recorded.
    pub autoplay: bool,
    /// Frames arriving sooner than this after the previous one are skipped.
    pub min_frame_interval_ms: u64,
    /// Seconds into a segment after which "previous" jumps to the start of the current segment
    /// instead of the previous one.
    pub prev_segment_threshold: f64,
    /// The duration of a wait without an explicit duration.
    pub default_wait: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playback_rate: 1.0,
            looping: false,
            autoplay: false,
            min_frame_interval_ms: 14,
            prev_segment_threshold: 0.5,
            default_wait: 1.0,
        }
    }
}

impl PlayerConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml).context("Failed to parse player configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read player configuration {path:?}"))?;
        Self::from_toml_str(&toml).with_context(|| format!("In {path:?}"))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.playback_rate.is_finite() && self.playback_rate > 0.0) {
            bail!(
                "`playback_rate` must be a positive number, was {}",
                self.playback_rate
            );
        }
        if !(self.prev_segment_threshold.is_finite() && self.prev_segment_threshold >= 0.0) {
            bail!(
                "`prev_segment_threshold` must not be negative, was {}",
                self.prev_segment_threshold
            );
        }
        if !(self.default_wait.is_finite() && self.default_wait >= 0.0) {
            bail!(
                "`default_wait` must not be negative, was {}",
                self.default_wait
            );
        }
        Ok(())
    }

    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_millis(self.min_frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = PlayerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.min_frame_interval(), Duration::from_millis(14));
    }

    #[test]
    fn parse_partial_config() {
        let config = PlayerConfig::from_toml_str(
            r#"
playback_rate = 2.0
looping = true
min_frame_interval_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.playback_rate, 2.0);
        assert!(config.looping);
        assert!(!config.autoplay);
        assert_eq!(config.min_frame_interval_ms, 0);
        assert_eq!(config.prev_segment_threshold, 0.5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(PlayerConfig::from_toml_str("playback_rate = 0.0").is_err());
        assert!(PlayerConfig::from_toml_str("playback_rate = -1.0").is_err());
        assert!(PlayerConfig::from_toml_str("prev_segment_threshold = -0.1").is_err());
        assert!(PlayerConfig::from_toml_str("default_wait = -2.0").is_err());
    }

    #[test]
    fn unknown_and_mistyped_fields_are_rejected() {
        assert!(PlayerConfig::from_toml_str("playback_speed = 1.0").is_err());
        assert!(PlayerConfig::from_toml_str("looping = \"yes\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = PlayerConfig::load("/nonexistent/player.toml").unwrap_err();
        assert!(format!("{err:#}").contains("player.toml"));
    }
}
