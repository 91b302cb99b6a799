// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON gateway client for outbound delivery

use super::{Transport, TransportError};
use async_trait::async_trait;
use base64::Engine;

/// Posts outbound messages to the configured gateway.
///
/// `ureq` is blocking, so every call runs on the tokio blocking pool.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<(), TransportError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let payload =
            serde_json::to_string(&body).map_err(|e| TransportError::Request(e.to_string()))?;
        self.agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .send(payload.as_bytes())
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_text(&self, session_id: &str, text: &str) -> Result<(), TransportError> {
        let this = self.clone();
        let body = serde_json::json!({
            "session_id": session_id,
            "text": text,
        });
        tokio::task::spawn_blocking(move || this.post("send_text", body))
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?
    }

    async fn send_image(
        &self,
        session_id: &str,
        image: &[u8],
        caption: &str,
    ) -> Result<(), TransportError> {
        let this = self.clone();
        let body = serde_json::json!({
            "session_id": session_id,
            "caption": caption,
            "image": base64::engine::general_purpose::STANDARD.encode(image),
        });
        tokio::task::spawn_blocking(move || this.post("send_image", body))
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?
    }
}
