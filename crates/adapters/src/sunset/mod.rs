// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sunset data feed boundary
//!
//! The feed is a geolocation endpoint returning JSON with a `results.sunset`
//! field holding an `HH:MM:SS` time of day. Only the raw text crosses this
//! boundary; parsing and the correction offset live in the engine.

mod fake;
mod http;

pub use fake::FakeSunsetFeed;
pub use http::HttpSunsetFeed;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from fetching sunset data
#[derive(Debug, Error, Clone)]
pub enum SunsetFeedError {
    #[error("feed request failed: {0}")]
    Request(String),

    #[error("feed response missing results.sunset")]
    MissingField,
}

/// Adapter for the external sunset time feed
#[async_trait]
pub trait SunsetFeed: Clone + Send + Sync + 'static {
    /// Fetch the raw sunset time text, e.g. "20:45:12"
    async fn fetch(&self) -> Result<String, SunsetFeedError>;
}
