// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide shared state: the rotating guest credential and the daily
//! sunset target, plus the background tasks that maintain them.

use pancam_adapters::{SunsetFeed, SunsetFeedError};
use pancam_core::Clock;
use rand::Rng;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The rotating guest credential.
///
/// Sessions read it on every login attempt; the rotator task replaces it on
/// a fixed period. Rotation does not touch sessions already authenticated.
#[derive(Clone)]
pub struct GuestPass {
    current: Arc<RwLock<String>>,
}

impl GuestPass {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(generate_pass())),
        }
    }

    pub fn get(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the credential with a fresh random value
    pub fn rotate(&self) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = generate_pass();
    }
}

impl Default for GuestPass {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_pass() -> String {
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| {
            const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
            CHARSET[rng.gen_range(0..CHARSET.len())] as char
        })
        .collect()
}

/// Rotate the guest credential on a fixed period
pub fn spawn_rotator(pass: GuestPass, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(period).await;
            pass.rotate();
            info!("rotated guest pass");
        }
    })
}

/// Today's sunset target, if known.
///
/// `None` until the first successful fetch; sunset events hold off firing
/// until a target is available.
#[derive(Clone)]
pub struct SunsetTarget {
    target: Arc<RwLock<Option<(u32, u32)>>>,
}

impl SunsetTarget {
    pub fn new() -> Self {
        Self {
            target: Arc::new(RwLock::new(None)),
        }
    }

    pub fn get(&self) -> Option<(u32, u32)> {
        *self.target.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, hm: (u32, u32)) {
        *self.target.write().unwrap_or_else(|e| e.into_inner()) = Some(hm);
    }
}

impl Default for SunsetTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a feed value like `"20:45:00"` into an hour/minute pair, shifted by
/// the configured hour offset and wrapped into the 24h day.
pub fn parse_sunset(raw: &str, hour_offset: i32) -> Result<(u32, u32), SunsetFeedError> {
    let mut parts = raw.split(':');
    let hour: i64 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or(SunsetFeedError::MissingField)?;
    let minute: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .filter(|m| *m < 60)
        .ok_or(SunsetFeedError::MissingField)?;
    let hour = (hour + i64::from(hour_offset)).rem_euclid(24) as u32;
    Ok((hour, minute))
}

/// Refresh the sunset target once per civil day.
///
/// A failed fetch does not consume the day; the next poll retries until one
/// succeeds, then the provider goes quiet until the date changes.
pub fn spawn_sunset_provider<F, C>(
    target: SunsetTarget,
    feed: F,
    clock: C,
    hour_offset: i32,
    poll: Duration,
) -> JoinHandle<()>
where
    F: SunsetFeed,
    C: Clock,
{
    tokio::spawn(async move {
        let mut fetched_for = None;
        loop {
            let today = clock.today();
            if fetched_for != Some(today) {
                match refresh(&target, &feed, hour_offset).await {
                    Ok(hm) => {
                        info!(hour = hm.0, minute = hm.1, "updated sunset target");
                        fetched_for = Some(today);
                    }
                    Err(e) => warn!(error = %e, "sunset fetch failed, will retry"),
                }
            }
            tokio::time::sleep(poll).await;
        }
    })
}

async fn refresh<F: SunsetFeed>(
    target: &SunsetTarget,
    feed: &F,
    hour_offset: i32,
) -> Result<(u32, u32), SunsetFeedError> {
    let raw = feed.fetch().await?;
    let hm = parse_sunset(&raw, hour_offset)?;
    target.set(hm);
    Ok(hm)
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
