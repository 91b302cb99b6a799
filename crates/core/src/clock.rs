// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Event firing compares wall-clock hour/minute/second, so the trait exposes
//! local civil time alongside the monotonic instant.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Current local civil date and time
    fn local_now(&self) -> NaiveDateTime;

    fn wall_time(&self) -> NaiveTime {
        self.local_now().time()
    }

    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    instant: Arc<Mutex<Instant>>,
    wall: Arc<Mutex<NaiveDateTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            instant: Arc::new(Mutex::new(Instant::now())),
            wall: Arc::new(Mutex::new(chrono::Local::now().naive_local())),
        }
    }

    /// Advance both the monotonic and the civil clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut instant = self.instant.lock().unwrap_or_else(|e| e.into_inner());
        *instant += duration;
        let mut wall = self.wall.lock().unwrap_or_else(|e| e.into_inner());
        *wall += chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
    }

    /// Set the civil clock to a specific date and time
    pub fn set_wall(&self, datetime: NaiveDateTime) {
        let mut wall = self.wall.lock().unwrap_or_else(|e| e.into_inner());
        *wall = datetime;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.instant.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn local_now(&self) -> NaiveDateTime {
        *self.wall.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
