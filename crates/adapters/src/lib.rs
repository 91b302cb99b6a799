// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External boundary adapters for the pancam daemon
//!
//! Three boundaries, each behind a trait with a real and a fake
//! implementation: the outbound message transport, the camera motor driver,
//! and the sunset data feed.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod actuator;
pub mod sunset;
pub mod transport;

pub use actuator::{Actuator, ActuatorCall, ActuatorError, FakeActuator, MotorDriver};
pub use sunset::{FakeSunsetFeed, HttpSunsetFeed, SunsetFeed, SunsetFeedError};
pub use transport::{FakeTransport, HttpTransport, Transport, TransportCall, TransportError};
