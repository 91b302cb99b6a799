// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects produced by the command interpreter
//!
//! The interpreter is pure: it never talks to the transport, the capture
//! controller or the event scheduler directly. It returns a `Step` and the
//! session task executes the effects in order.

use crate::types::{AuthLevel, Coords, EventSpec, SessionState};

/// One side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a text reply to the session
    Reply(String),
    /// Submit a one-shot capture, replying with `ack` on admission.
    /// A full queue replies with the queue-full message instead.
    Capture { coords: Coords, ack: String },
    /// Create and activate the session's recurring event
    StartEvent(EventSpec),
    /// Deactivate the session's recurring event
    StopEvent,
}

/// Result of interpreting one inbound text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State the session moves to
    pub next: SessionState,
    /// Auth level change, if the transition granted one
    pub auth: Option<AuthLevel>,
    /// Effects to execute, in order
    pub effects: Vec<Effect>,
}

impl Step {
    pub fn stay(state: SessionState) -> Self {
        Self {
            next: state,
            auth: None,
            effects: Vec::new(),
        }
    }

    pub fn with_reply(state: SessionState, text: impl Into<String>) -> Self {
        Self {
            next: state,
            auth: None,
            effects: vec![Effect::Reply(text.into())],
        }
    }

    pub fn reply(mut self, text: impl Into<String>) -> Self {
        self.effects.push(Effect::Reply(text.into()));
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn grant(mut self, auth: AuthLevel) -> Self {
        self.auth = Some(auth);
        self
    }
}
