// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real sunset feed client

use super::{SunsetFeed, SunsetFeedError};
use async_trait::async_trait;

#[derive(Clone)]
pub struct HttpSunsetFeed {
    url: String,
    agent: ureq::Agent,
}

impl HttpSunsetFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn fetch_blocking(&self) -> Result<String, SunsetFeedError> {
        let mut response = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|e| SunsetFeedError::Request(e.to_string()))?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SunsetFeedError::Request(e.to_string()))?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SunsetFeedError::Request(e.to_string()))?;
        json.get("results")
            .and_then(|r| r.get("sunset"))
            .and_then(|s| s.as_str())
            .map(str::to_string)
            .ok_or(SunsetFeedError::MissingField)
    }
}

#[async_trait]
impl SunsetFeed for HttpSunsetFeed {
    async fn fetch(&self) -> Result<String, SunsetFeedError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.fetch_blocking())
            .await
            .map_err(|e| SunsetFeedError::Request(e.to_string()))?
    }
}
