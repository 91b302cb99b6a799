// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration model
//!
//! Loaded from a TOML file; secrets can be overridden by environment
//! variables so they never have to live on disk.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("full-access password is not set (auth.full_pass or PANCAM_FULL_PASS)")]
    MissingFullPass,
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub auth: AuthConfig,
    pub transport: TransportConfig,
    pub camera: CameraConfig,
    pub sunset: SunsetConfig,
    #[serde(default)]
    pub limits: Limits,
}

/// Credentials consumed by the state machine
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Full-access password; overridable via PANCAM_FULL_PASS
    #[serde(default)]
    pub full_pass: String,
}

/// Outbound gateway the replies and photos are posted to
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    pub base_url: String,
    /// Gateway access token; overridable via PANCAM_GATEWAY_TOKEN
    #[serde(default)]
    pub token: String,
}

/// Motor-driver executable and image artifact layout
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// Path to the motor driver binary
    pub driver: PathBuf,
    /// Well-known path where a successful capture leaves the image
    pub image_path: PathBuf,
    /// Retry count passed through to the driver
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Post-move command the driver runs to fetch the frame
    pub fetch_command: String,
    /// Best-effort recovery command run when the image is missing
    #[serde(default)]
    pub recover_command: Option<String>,
}

/// Sunset feed endpoint and correction offset
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SunsetConfig {
    /// GET endpoint returning JSON with a results.sunset field
    pub feed_url: String,
    /// Hours added to the feed's sunset hour, wrapping modulo 24
    #[serde(default = "default_hour_offset")]
    pub hour_offset: i32,
}

/// Queueing and lifetime knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Limits {
    /// Max queued + running capture tasks
    pub queue_cap: usize,
    /// Idle session lifetime
    #[serde(with = "humantime_serde")]
    pub session_ttl: Duration,
    /// Guest password rotation period
    #[serde(with = "humantime_serde")]
    pub guest_rotation: Duration,
    /// Event scheduler tick resolution
    #[serde(with = "humantime_serde")]
    pub tick: Duration,
    /// Sunset provider day-boundary poll interval
    #[serde(with = "humantime_serde")]
    pub sunset_poll: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            queue_cap: 5,
            session_ttl: Duration::from_secs(8 * 60 * 60),
            guest_rotation: Duration::from_secs(8 * 60 * 60),
            tick: Duration::from_secs(1),
            sunset_poll: Duration::from_secs(5 * 60),
        }
    }
}

fn default_retries() -> u32 {
    3
}

fn default_hour_offset() -> i32 {
    0
}

impl Config {
    /// Load from a TOML file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&content)
    }

    /// Parse from TOML text and apply environment overrides
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;

        if let Ok(pass) = std::env::var("PANCAM_FULL_PASS") {
            config.auth.full_pass = pass;
        }
        if let Ok(token) = std::env::var("PANCAM_GATEWAY_TOKEN") {
            config.transport.token = token;
        }

        if config.auth.full_pass.is_empty() {
            return Err(ConfigError::MissingFullPass);
        }

        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
