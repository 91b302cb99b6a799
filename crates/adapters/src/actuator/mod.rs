// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Camera actuator boundary
//!
//! The motor driver is an external executable: it pans the mount to the
//! target, triggers autofocus capture and leaves the image at a well-known
//! path. The capture controller owns the calling discipline; this adapter
//! only maps the invocation contract.

mod fake;
mod motor;

pub use fake::{ActuatorCall, FakeActuator};
pub use motor::MotorDriver;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the physical access stages
#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("failed to spawn motor driver: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("motor driver exited with {0}")]
    DriverFailed(String),

    #[error("image artifact missing: {0}")]
    ImageMissing(#[source] std::io::Error),
}

/// Adapter for the pan-mount motor driver and its image artifact
#[async_trait]
pub trait Actuator: Clone + Send + Sync + 'static {
    /// Re-home the mount to X 0 at process start; failure is fatal upstream
    async fn reset(&self) -> Result<(), ActuatorError>;

    /// Pan from `current_x` to the target and capture a frame
    async fn point(&self, x: i32, y: i32, current_x: i32) -> Result<(), ActuatorError>;

    /// Read the captured image artifact
    async fn retrieve_image(&self) -> Result<Vec<u8>, ActuatorError>;

    /// Remove the transient image artifact, best effort
    async fn discard_image(&self);

    /// Best-effort recovery after a missing image (re-init the camera rig)
    async fn recover(&self);
}
