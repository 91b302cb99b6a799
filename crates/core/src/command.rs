// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recognized slash commands
//!
//! Matching is exact and case-sensitive; anything else is free-form text
//! interpreted by the current session state.

/// A recognized command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Photo,
    Dice,
    EventCreate,
    EventDelete,
    EventSunset,
    SunsetTime,
    GuestPass,
}

impl Command {
    /// Parse an inbound text as a command, if it matches exactly
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/help" => Some(Self::Help),
            "/photo" => Some(Self::Photo),
            "/dice" => Some(Self::Dice),
            "/eventcreate" => Some(Self::EventCreate),
            "/eventdelete" => Some(Self::EventDelete),
            "/eventsunset" => Some(Self::EventSunset),
            "/sunsettime" => Some(Self::SunsetTime),
            "/guestpass" => Some(Self::GuestPass),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Help => "/help",
            Self::Photo => "/photo",
            Self::Dice => "/dice",
            Self::EventCreate => "/eventcreate",
            Self::EventDelete => "/eventdelete",
            Self::EventSunset => "/eventsunset",
            Self::SunsetTime => "/sunsettime",
            Self::GuestPass => "/guestpass",
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
