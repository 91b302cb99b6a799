// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-event scheduler loops
//!
//! Each active event owns one timer loop at one-second resolution. Firing is
//! a once-per-minute edge (second must be exactly zero) so a slow capture
//! cannot cause repeated submissions within the same minute. Cancellation is
//! cooperative: deactivating the event stops the loop within one tick.

use crate::capture::CaptureController;
use crate::shared::SunsetTarget;
use chrono::{NaiveTime, Timelike};
use pancam_adapters::{Actuator, Transport};
use pancam_core::{Clock, EventSpec, Trigger};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A session's active event: the spec plus its cancellation flag
#[derive(Clone)]
pub struct EventHandle {
    pub spec: EventSpec,
    active: Arc<AtomicBool>,
}

impl EventHandle {
    pub fn new(spec: EventSpec) -> Self {
        Self {
            spec,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Lazy deletion: the scheduler loop observes the flag and exits
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Resolve the hour/minute an event should fire at right now.
///
/// Returns `None` for a sunset event while no sunset target is known yet.
pub fn effective_target(trigger: &Trigger, sunset: Option<(u32, u32)>) -> Option<(u32, u32)> {
    match trigger {
        Trigger::Daily { hour, minute } => Some((*hour, *minute)),
        Trigger::Sunset => sunset,
    }
}

/// Once-per-minute firing edge
pub fn fires_at(now: NaiveTime, target: (u32, u32)) -> bool {
    now.hour() == target.0 && now.minute() == target.1 && now.second() == 0
}

/// Start the timer loop for an active event
pub fn spawn_event_loop<T, A, C>(
    session_id: String,
    event: EventHandle,
    controller: CaptureController<T, A>,
    sunset: SunsetTarget,
    clock: C,
    tick: Duration,
) -> JoinHandle<()>
where
    T: Transport,
    A: Actuator,
    C: Clock,
{
    tokio::spawn(async move {
        info!(session_id, event = %event.spec, "event scheduler started");
        loop {
            tokio::time::sleep(tick).await;

            if !event.is_active() {
                info!(session_id, "event deactivated, stopping scheduler");
                return;
            }

            let Some(target) = effective_target(&event.spec.trigger, sunset.get()) else {
                continue;
            };
            if !fires_at(clock.wall_time(), target) {
                continue;
            }

            // No user is waiting on a scheduled capture, so a full queue
            // skips this tick instead of surfacing an error.
            match controller.try_submit(&session_id, event.spec.coords) {
                Ok(()) => info!(session_id, event = %event.spec, "firing event capture"),
                Err(e) => debug!(session_id, %e, "skipping event tick"),
            }
        }
    })
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
