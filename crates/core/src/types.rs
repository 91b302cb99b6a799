// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain types: pan coordinates, capture triggers, per-session events

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Pan range of the mount in degrees
pub const MAX_X: i64 = 360;
/// Tilt range of the mount in degrees
pub const MAX_Y: i64 = 90;

/// A validated pan/tilt target position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    /// Validate raw user input against the mount's range
    pub fn new(x: i64, y: i64) -> Result<Self, ValidationError> {
        if !(0..=MAX_X).contains(&x) {
            return Err(ValidationError::XOutOfRange(x));
        }
        if !(0..=MAX_Y).contains(&y) {
            return Err(ValidationError::YOutOfRange(y));
        }
        Ok(Self {
            x: x as i32,
            y: y as i32,
        })
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {} Y: {}", self.x, self.y)
    }
}

/// When a recurring event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Fixed daily time
    Daily { hour: u32, minute: u32 },
    /// Re-read the process-wide sunset target each day
    Sunset,
}

impl Trigger {
    /// Build a fixed daily trigger from raw user input.
    ///
    /// Hours and minutes normalize modulo 24/60, but negative values are
    /// rejected before normalization.
    pub fn daily(hour: i64, minute: i64) -> Result<Self, ValidationError> {
        if hour < 0 {
            return Err(ValidationError::NegativeHour(hour));
        }
        if minute < 0 {
            return Err(ValidationError::NegativeMinute(minute));
        }
        Ok(Self::Daily {
            hour: (hour % 24) as u32,
            minute: (minute % 60) as u32,
        })
    }
}

/// A recurring daily capture request, at most one per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub coords: Coords,
    pub trigger: Trigger,
}

impl std::fmt::Display for EventSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.trigger {
            Trigger::Daily { hour, minute } => {
                write!(f, "{} at {}:{:02}", self.coords, hour, minute)
            }
            Trigger::Sunset => write!(f, "{} at sunset 🌆", self.coords),
        }
    }
}

/// Authentication level of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthLevel {
    Unauthenticated,
    Guest,
    Full,
}

impl AuthLevel {
    pub fn is_full(self) -> bool {
        matches!(self, AuthLevel::Full)
    }
}

/// Explicit state tag for the per-session command interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for a credential
    Unauthenticated,
    /// Default command-accepting state
    Authenticated,
    /// Waiting for "X Y" to take a one-shot photo
    AwaitingPhotoCoords,
    /// Waiting for "X Y Hours Minutes" to create a daily event
    AwaitingEventCoords,
    /// Waiting for "X Y" to create a sunset event
    AwaitingSunsetCoords,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
