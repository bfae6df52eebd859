//! Tween engine configuration (TOML)
//!
//! ```toml
//! default_easing = "ease_out_quad"
//! default_update_channel = "frame_real_time"
//! default_delay = 0.1
//! ease_advance = "clamp"
//! time_scale = 1.0
//! label_prefix = "ui"
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::UpdateChannel;
use crate::easing::{EaseAdvance, Easing};
use crate::error::{Result, TweenError};

/// Defaults for new tweens and scheduler behavior
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Easing for parameters built with [`TweenParams::from_config`](crate::TweenParams::from_config)
    pub default_easing: Easing,
    /// Update channel for parameters built from this config
    pub default_update_channel: UpdateChannel,
    /// Delay in seconds for parameters built from this config
    pub default_delay: f32,
    /// Easing change at each loop boundary
    pub ease_advance: EaseAdvance,
    /// Initial scheduler time scale
    pub time_scale: f32,
    /// Prefix for generated tween labels (`<prefix>-<n>`)
    pub label_prefix: String,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            default_easing: Easing::Linear,
            default_update_channel: UpdateChannel::Frame,
            default_delay: 0.0,
            ease_advance: EaseAdvance::Wrap,
            time_scale: 1.0,
            label_prefix: "tween".to_string(),
        }
    }
}

impl TweenConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TweenConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TweenError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded tween config from {}", path.display());
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the scheduler cannot use
    pub fn validate(&self) -> Result<()> {
        if !self.default_delay.is_finite() || self.default_delay < 0.0 {
            return Err(TweenError::InvalidConfig(format!(
                "default_delay must be a non-negative number, got {}",
                self.default_delay
            )));
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(TweenError::InvalidConfig(format!(
                "time_scale must be a non-negative number, got {}",
                self.time_scale
            )));
        }
        if self.label_prefix.trim().is_empty() {
            return Err(TweenError::InvalidConfig(
                "label_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
