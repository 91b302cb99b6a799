// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real motor driver invocation
//!
//! Positional argument contract:
//! `driver <target_x> <target_y> <reset> <current_x> <retries> <post_command>`
//! Zero exit is success; a successful run leaves the image at `image_path`.

use super::{Actuator, ActuatorError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct MotorDriver {
    driver: PathBuf,
    image_path: PathBuf,
    retries: u32,
    fetch_command: String,
    recover_command: Option<String>,
}

impl MotorDriver {
    pub fn new(
        driver: PathBuf,
        image_path: PathBuf,
        retries: u32,
        fetch_command: String,
        recover_command: Option<String>,
    ) -> Self {
        Self {
            driver,
            image_path,
            retries,
            fetch_command,
            recover_command,
        }
    }

    async fn run(
        &self,
        x: i32,
        y: i32,
        reset: bool,
        current_x: i32,
        post_command: &str,
    ) -> Result<(), ActuatorError> {
        debug!(x, y, reset, current_x, "invoking motor driver");
        let status = Command::new(&self.driver)
            .arg(x.to_string())
            .arg(y.to_string())
            .arg(if reset { "True" } else { "False" })
            .arg(current_x.to_string())
            .arg(self.retries.to_string())
            .arg(post_command)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(ActuatorError::Spawn)?;

        if !status.success() {
            return Err(ActuatorError::DriverFailed(status.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Actuator for MotorDriver {
    async fn reset(&self) -> Result<(), ActuatorError> {
        self.run(0, 0, true, 0, "").await
    }

    async fn point(&self, x: i32, y: i32, current_x: i32) -> Result<(), ActuatorError> {
        self.run(x, y, false, current_x, &self.fetch_command).await
    }

    async fn retrieve_image(&self) -> Result<Vec<u8>, ActuatorError> {
        tokio::fs::read(&self.image_path)
            .await
            .map_err(ActuatorError::ImageMissing)
    }

    async fn discard_image(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.image_path).await {
            warn!(path = %self.image_path.display(), error = %e, "failed to remove image artifact");
        }
    }

    async fn recover(&self) {
        let Some(command) = &self.recover_command else {
            return;
        };
        warn!(command, "running camera recovery command");
        match Command::new(command).stdin(Stdio::null()).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(%status, "recovery command failed"),
            Err(e) => warn!(error = %e, "failed to spawn recovery command"),
        }
    }
}

#[cfg(test)]
#[path = "motor_tests.rs"]
mod tests;
