// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound transport boundary
//!
//! The chat network itself is out of scope; replies and photos are posted to
//! a small JSON gateway that owns delivery, retries and rate limits.

mod fake;
mod http;

pub use fake::{FakeTransport, TransportCall};
pub use http::HttpTransport;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from outbound delivery
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("gateway request failed: {0}")]
    Request(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Adapter for outbound text and image delivery
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Send a text reply to a session
    async fn send_text(&self, session_id: &str, text: &str) -> Result<(), TransportError>;

    /// Send a captured image with a caption to a session
    async fn send_image(
        &self,
        session_id: &str,
        image: &[u8],
        caption: &str,
    ) -> Result<(), TransportError>;
}
