// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Transport, TransportError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Text {
        session_id: String,
        text: String,
    },
    Image {
        session_id: String,
        image: Vec<u8>,
        caption: String,
    },
}

/// Fake transport recording every outbound message
#[derive(Clone, Default)]
pub struct FakeTransport {
    calls: Arc<Mutex<Vec<TransportCall>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// All text messages sent to a session, in order
    pub fn texts_for(&self, session_id: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TransportCall::Text {
                    session_id: sid,
                    text,
                } if sid == session_id => Some(text),
                _ => None,
            })
            .collect()
    }

    /// All image captions sent to a session, in order
    pub fn captions_for(&self, session_id: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TransportCall::Image {
                    session_id: sid,
                    caption,
                    ..
                } if sid == session_id => Some(caption),
                _ => None,
            })
            .collect()
    }

    /// Make every subsequent send fail
    pub fn fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    fn check_fail(&self) -> Result<(), TransportError> {
        if *self.fail_sends.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(TransportError::Request("fake send failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send_text(&self, session_id: &str, text: &str) -> Result<(), TransportError> {
        self.check_fail()?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TransportCall::Text {
                session_id: session_id.to_string(),
                text: text.to_string(),
            });
        Ok(())
    }

    async fn send_image(
        &self,
        session_id: &str,
        image: &[u8],
        caption: &str,
    ) -> Result<(), TransportError> {
        self.check_fail()?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TransportCall::Image {
                session_id: session_id.to_string(),
                image: image.to_vec(),
                caption: caption.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
