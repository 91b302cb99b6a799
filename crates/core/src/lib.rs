// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pancam-core: Core library for the pancam camera daemon
//!
//! This crate provides:
//! - Domain types for coordinates, triggers and per-session events
//! - The command grammar and the pure per-session state machine
//! - Clock and dice-roll abstractions for testable time and randomness
//! - The daemon configuration model and validation error taxonomy

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod clock;
pub mod command;
pub mod config;
pub mod dice;
pub mod effect;
pub mod error;
pub mod interpreter;
pub mod types;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use command::Command;
pub use config::{Config, ConfigError};
pub use dice::{FixedRoller, RandRoller, Roller};
pub use effect::{Effect, Step};
pub use error::ValidationError;
pub use interpreter::{interpret, Ctx, SessionView, QUEUE_FULL_REPLY};
pub use types::{AuthLevel, Coords, EventSpec, SessionState, Trigger};
