// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake actuator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Actuator, ActuatorError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Recorded actuator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorCall {
    Reset,
    Point { x: i32, y: i32, current_x: i32 },
    Retrieve,
    Discard,
    Recover,
}

#[derive(Default)]
struct Inner {
    calls: Vec<ActuatorCall>,
    image: Option<Vec<u8>>,
    fail_point: bool,
    fail_retrieve: bool,
    gate: Option<Arc<Semaphore>>,
}

/// Fake actuator recording calls, with configurable failures and an
/// optional gate that blocks `point` until a permit is released.
#[derive(Clone, Default)]
pub struct FakeActuator {
    inner: Arc<Mutex<Inner>>,
}

impl FakeActuator {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.set_image(vec![0xff, 0xd8]);
        fake
    }

    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    pub fn points(&self) -> Vec<(i32, i32, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ActuatorCall::Point { x, y, current_x } => Some((x, y, current_x)),
                _ => None,
            })
            .collect()
    }

    /// Set the bytes `retrieve_image` returns
    pub fn set_image(&self, image: Vec<u8>) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).image = Some(image);
    }

    pub fn fail_point(&self, fail: bool) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_point = fail;
    }

    pub fn fail_retrieve(&self, fail: bool) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_retrieve = fail;
    }

    /// Block every `point` call until a permit is added to the semaphore
    pub fn gate_point(&self, gate: Arc<Semaphore>) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).gate = Some(gate);
    }

    fn record(&self, call: ActuatorCall) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .push(call);
    }
}

#[async_trait]
impl Actuator for FakeActuator {
    async fn reset(&self) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Reset);
        Ok(())
    }

    async fn point(&self, x: i32, y: i32, current_x: i32) -> Result<(), ActuatorError> {
        let gate = self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gate
            .clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.record(ActuatorCall::Point { x, y, current_x });
        let fail = self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_point;
        if fail {
            return Err(ActuatorError::DriverFailed("exit status: 1".to_string()));
        }
        Ok(())
    }

    async fn retrieve_image(&self) -> Result<Vec<u8>, ActuatorError> {
        self.record(ActuatorCall::Retrieve);
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.fail_retrieve {
            return Err(ActuatorError::ImageMissing(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no artifact",
            )));
        }
        Ok(inner.image.clone().unwrap_or_default())
    }

    async fn discard_image(&self) {
        self.record(ActuatorCall::Discard);
    }

    async fn recover(&self) {
        self.record(ActuatorCall::Recover);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
