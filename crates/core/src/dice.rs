// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Injected randomness for dice rolls and credential generation

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A source of die rolls (1..=6)
pub trait Roller: Send + Sync {
    fn roll(&self) -> u8;
}

/// Thread-rng backed roller
#[derive(Clone, Default)]
pub struct RandRoller;

impl Roller for RandRoller {
    fn roll(&self) -> u8 {
        rand::thread_rng().gen_range(1..=6)
    }
}

/// Deterministic roller for testing: yields a fixed sequence, cycling
pub struct FixedRoller {
    values: Vec<u8>,
    next: AtomicUsize,
}

impl FixedRoller {
    pub fn new(values: Vec<u8>) -> Self {
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }
}

impl Roller for FixedRoller {
    fn roll(&self) -> u8 {
        if self.values.is_empty() {
            return 1;
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()]
    }
}
