// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session registry and per-session executor tasks
//!
//! Each session is one tokio task owning its state machine, fed over an mpsc
//! channel. The task is the single writer of session state; the registry only
//! maps session ids to channel senders. Sessions are created on first message
//! and evicted when their lifetime deadline passes with no active event.

use crate::capture::CaptureController;
use crate::scheduler::{spawn_event_loop, EventHandle};
use crate::shared::{GuestPass, SunsetTarget};
use pancam_adapters::{Actuator, Transport};
use pancam_core::{
    interpret, AuthLevel, Clock, Ctx, Effect, Roller, SessionState, SessionView,
    QUEUE_FULL_REPLY,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One inbound chat message for a session
#[derive(Debug, Clone)]
pub struct Inbound {
    pub sender: String,
    pub text: String,
}

/// Everything the runtime needs to operate
pub struct RuntimeDeps<T, A, C> {
    pub transport: T,
    pub actuator: A,
    pub clock: C,
    pub roller: Arc<dyn Roller>,
    pub full_pass: String,
    pub queue_cap: usize,
    pub session_ttl: Duration,
    pub tick: Duration,
}

struct RuntimeInner<T: Transport, A: Actuator, C: Clock> {
    transport: T,
    controller: CaptureController<T, A>,
    guest_pass: GuestPass,
    sunset: SunsetTarget,
    clock: C,
    roller: Arc<dyn Roller>,
    full_pass: String,
    session_ttl: Duration,
    tick: Duration,
    sessions: Mutex<HashMap<String, mpsc::Sender<Inbound>>>,
}

/// The daemon's session runtime
pub struct Runtime<T: Transport, A: Actuator, C: Clock> {
    inner: Arc<RuntimeInner<T, A, C>>,
}

impl<T: Transport, A: Actuator, C: Clock> Clone for Runtime<T, A, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport, A: Actuator, C: Clock> Runtime<T, A, C> {
    pub fn new(deps: RuntimeDeps<T, A, C>) -> Self {
        let controller =
            CaptureController::new(deps.transport.clone(), deps.actuator, deps.queue_cap);
        Self {
            inner: Arc::new(RuntimeInner {
                transport: deps.transport,
                controller,
                guest_pass: GuestPass::new(),
                sunset: SunsetTarget::new(),
                clock: deps.clock,
                roller: deps.roller,
                full_pass: deps.full_pass,
                session_ttl: deps.session_ttl,
                tick: deps.tick,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The rotating guest credential, for the rotator task
    pub fn guest_pass(&self) -> GuestPass {
        self.inner.guest_pass.clone()
    }

    /// The shared sunset target, for the provider task
    pub fn sunset(&self) -> SunsetTarget {
        self.inner.sunset.clone()
    }

    pub fn session_count(&self) -> usize {
        self.inner
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn captures_in_flight(&self) -> usize {
        self.inner.controller.in_flight()
    }

    /// Route one inbound message to its session, creating the session task
    /// on first contact.
    pub async fn dispatch(&self, session_id: &str, sender: &str, text: &str) {
        let msg = Inbound {
            sender: sender.to_string(),
            text: text.to_string(),
        };
        let tx = self.session_tx(session_id);
        if let Err(mpsc::error::SendError(msg)) = tx.send(msg).await {
            // The task exited between lookup and send; replace it and retry
            let tx = self.respawn(session_id);
            if tx.send(msg).await.is_err() {
                warn!(session_id, "dropping message for session that exited twice");
            }
        }
    }

    fn session_tx(&self, session_id: &str) -> mpsc::Sender<Inbound> {
        let mut sessions = self
            .inner
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(tx) = sessions.get(session_id) {
            return tx.clone();
        }
        self.spawn_session(&mut sessions, session_id)
    }

    fn respawn(&self, session_id: &str) -> mpsc::Sender<Inbound> {
        let mut sessions = self
            .inner
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        // Another dispatcher may have respawned it already
        if let Some(tx) = sessions.get(session_id) {
            if !tx.is_closed() {
                return tx.clone();
            }
        }
        sessions.remove(session_id);
        self.spawn_session(&mut sessions, session_id)
    }

    fn spawn_session(
        &self,
        sessions: &mut HashMap<String, mpsc::Sender<Inbound>>,
        session_id: &str,
    ) -> mpsc::Sender<Inbound> {
        let (tx, rx) = mpsc::channel(32);
        sessions.insert(session_id.to_string(), tx.clone());
        let this = self.clone();
        let id = session_id.to_string();
        tokio::spawn(async move {
            this.run_session(id, rx).await;
        });
        info!(session_id, "session created");
        tx
    }

    /// One session's lifetime: interpret messages, execute effects, expire.
    ///
    /// The lifetime deadline is set once at creation; activity does not
    /// extend it. When the deadline passes, a session with a live event is
    /// kept for the event's sake, demoted to the login prompt and given a
    /// fresh full period; any other session exits and is evicted from the
    /// registry.
    async fn run_session(self, session_id: String, mut rx: mpsc::Receiver<Inbound>) {
        let mut state = SessionState::Unauthenticated;
        let mut auth = AuthLevel::Unauthenticated;
        let mut event: Option<EventHandle> = None;
        let mut deadline = tokio::time::Instant::now() + self.inner.session_ttl;

        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };

                    let step = {
                        let view = SessionView {
                            state,
                            auth,
                            event: event.as_ref().map(|h| &h.spec),
                            sender: &msg.sender,
                        };
                        let ctx = Ctx {
                            guest_pass: &self.inner.guest_pass.get(),
                            full_pass: &self.inner.full_pass,
                            sunset: self.inner.sunset.get(),
                            roller: self.inner.roller.as_ref(),
                        };
                        interpret(&view, &msg.text, &ctx)
                    };

                    state = step.next;
                    if let Some(granted) = step.auth {
                        auth = granted;
                    }
                    for effect in step.effects {
                        self.execute(&session_id, effect, &mut event).await;
                    }
                }
                () = tokio::time::sleep_until(deadline) => {
                    if event.is_some() {
                        info!(session_id, "session expired, kept for active event");
                        state = SessionState::Unauthenticated;
                        auth = AuthLevel::Unauthenticated;
                        deadline = tokio::time::Instant::now() + self.inner.session_ttl;
                    } else {
                        info!(session_id, "session expired");
                        break;
                    }
                }
            }
        }

        if let Some(handle) = event.take() {
            handle.deactivate();
        }
        rx.close();
        let mut sessions = self
            .inner
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        // Only evict our own entry; dispatch may have respawned under the key
        if sessions
            .get(&session_id)
            .is_some_and(mpsc::Sender::is_closed)
        {
            sessions.remove(&session_id);
        }
    }

    async fn execute(&self, session_id: &str, effect: Effect, event: &mut Option<EventHandle>) {
        match effect {
            Effect::Reply(text) => self.send(session_id, &text).await,

            Effect::Capture { coords, ack } => {
                match self.inner.controller.try_submit(session_id, coords) {
                    Ok(()) => self.send(session_id, &ack).await,
                    Err(e) => {
                        warn!(session_id, %coords, %e, "capture refused");
                        self.send(session_id, QUEUE_FULL_REPLY).await;
                    }
                }
            }

            Effect::StartEvent(spec) => {
                let handle = EventHandle::new(spec);
                spawn_event_loop(
                    session_id.to_string(),
                    handle.clone(),
                    self.inner.controller.clone(),
                    self.inner.sunset.clone(),
                    self.inner.clock.clone(),
                    self.inner.tick,
                );
                *event = Some(handle);
            }

            Effect::StopEvent => {
                if let Some(handle) = event.take() {
                    handle.deactivate();
                }
            }
        }
    }

    async fn send(&self, session_id: &str, text: &str) {
        if let Err(e) = self.inner.transport.send_text(session_id, text).await {
            warn!(session_id, error = %e, "failed to send reply");
            tokio::time::sleep(crate::capture::SEND_FAILURE_BACKOFF).await;
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
