// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-concurrency capture controller
//!
//! The camera is a single slow resource. Admission is an atomic
//! check-and-increment against the queue cap, so concurrent submissions can
//! never race past it; the physical access itself runs under a global mutex,
//! one operation at a time. The in-flight count bounds queued + running
//! tasks, not physical concurrency.

use pancam_core::Coords;
use pancam_adapters::{Actuator, Transport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Admission refused: the queue is at capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capture queue is full")]
pub struct QueueFull;

/// Pause after a failed outbound delivery so a dead gateway cannot spin hot
pub(crate) const SEND_FAILURE_BACKOFF: std::time::Duration =
    std::time::Duration::from_millis(500);

/// Last committed mount position, guarded by the physical-access mutex
struct CameraState {
    last_x: i32,
}

/// Decrements the in-flight count on every exit path
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Serializes physical camera access and bounds queued work
pub struct CaptureController<T: Transport, A: Actuator> {
    transport: T,
    actuator: A,
    cap: usize,
    in_flight: Arc<AtomicUsize>,
    camera: Arc<tokio::sync::Mutex<CameraState>>,
}

impl<T: Transport, A: Actuator> Clone for CaptureController<T, A> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            actuator: self.actuator.clone(),
            cap: self.cap,
            in_flight: Arc::clone(&self.in_flight),
            camera: Arc::clone(&self.camera),
        }
    }
}

impl<T: Transport, A: Actuator> CaptureController<T, A> {
    pub fn new(transport: T, actuator: A, cap: usize) -> Self {
        Self {
            transport,
            actuator,
            cap,
            in_flight: Arc::new(AtomicUsize::new(0)),
            camera: Arc::new(tokio::sync::Mutex::new(CameraState { last_x: 0 })),
        }
    }

    /// Current queued + running capture tasks
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit a capture for a session, fire and forget.
    ///
    /// Admission and the reservation are a single atomic step; on refusal
    /// the counter is untouched. The physical work runs on its own task and
    /// reports its outcome to the originating session over the transport.
    pub fn try_submit(&self, session_id: &str, coords: Coords) -> Result<(), QueueFull> {
        self.admit()?;
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        let this = self.clone();
        let session_id = session_id.to_string();
        tokio::spawn(async move {
            let _guard = guard;
            this.run(&session_id, coords).await;
        });
        Ok(())
    }

    fn admit(&self) -> Result<(), QueueFull> {
        self.in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.cap).then_some(n + 1)
            })
            .map(|_| ())
            .map_err(|_| QueueFull)
    }

    /// One physical access: pan, capture, retrieve, forward, discard.
    ///
    /// Holds the camera mutex for the whole sequence so the image artifact
    /// of one capture cannot be overwritten by the next before it is read.
    async fn run(&self, session_id: &str, coords: Coords) {
        let mut camera = self.camera.lock().await;

        if let Err(e) = self
            .actuator
            .point(coords.x, coords.y, camera.last_x)
            .await
        {
            error!(session_id, %coords, error = %e, "failed to access motor driver");
            self.report(session_id, "Cant access camera driver [🛑], try again later 🕑")
                .await;
            return;
        }
        camera.last_x = coords.x;

        let image = match self.actuator.retrieve_image().await {
            Ok(image) => image,
            Err(e) => {
                error!(session_id, error = %e, "failed to retrieve image");
                self.report(session_id, "Cant get photo [🛑], try again later 🕙")
                    .await;
                self.actuator.recover().await;
                return;
            }
        };

        info!(session_id, %coords, bytes = image.len(), "captured photo");

        if let Err(e) = self
            .transport
            .send_image(session_id, &image, &coords.to_string())
            .await
        {
            error!(session_id, error = %e, "failed to send photo");
            self.report(session_id, "Cant send photo [🛑], try again later 🕞")
                .await;
        }

        self.actuator.discard_image().await;
    }

    async fn report(&self, session_id: &str, text: &str) {
        if let Err(e) = self.transport.send_text(session_id, text).await {
            warn!(session_id, error = %e, "failed to report capture error");
            tokio::time::sleep(SEND_FAILURE_BACKOFF).await;
        }
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
