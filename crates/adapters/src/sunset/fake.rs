// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake sunset feed for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SunsetFeed, SunsetFeedError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Fake feed returning a configurable result
#[derive(Clone)]
pub struct FakeSunsetFeed {
    value: Arc<Mutex<Result<String, SunsetFeedError>>>,
    fetches: Arc<Mutex<usize>>,
}

impl FakeSunsetFeed {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Ok(raw.into()))),
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing() -> Self {
        let feed = Self::new("");
        feed.set(Err(SunsetFeedError::Request("fake outage".to_string())));
        feed
    }

    pub fn set(&self, value: Result<String, SunsetFeedError>) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = value;
    }

    /// Number of fetches performed
    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SunsetFeed for FakeSunsetFeed {
    async fn fetch(&self) -> Result<String, SunsetFeedError> {
        *self.fetches.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
