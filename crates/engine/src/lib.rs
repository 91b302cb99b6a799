// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pancam-engine: runtime for the pancam camera daemon
//!
//! Owns the session registry (one task per session, single writer), the
//! bounded-concurrency capture controller, the per-event scheduler loops and
//! the process-wide guest-credential and sunset-target state.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod capture;
pub mod runtime;
pub mod scheduler;
pub mod shared;

pub use capture::{CaptureController, QueueFull};
pub use runtime::{Inbound, Runtime, RuntimeDeps};
pub use scheduler::{spawn_event_loop, EventHandle};
pub use shared::{
    parse_sunset, spawn_rotator, spawn_sunset_provider, GuestPass, SunsetTarget,
};
