// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown, cleanup.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use pancam_adapters::{Actuator, ActuatorError, HttpSunsetFeed, HttpTransport, MotorDriver};
use pancam_core::{Config, ConfigError, RandRoller, SystemClock};
use pancam_engine::{spawn_rotator, spawn_sunset_provider, Runtime, RuntimeDeps};
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Daemon runtime with concrete adapter types
pub type DaemonRuntime = Runtime<HttpTransport, MotorDriver, SystemClock>;

/// Filesystem layout of a daemon instance
#[derive(Debug, Clone)]
pub struct Paths {
    /// Daemon configuration file
    pub config_path: PathBuf,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
}

impl Paths {
    /// Resolve the daemon's filesystem layout for a config file
    pub fn resolve(config_path: &Path) -> Result<Self, LifecycleError> {
        let state_dir = state_dir()?;
        let socket_dir = socket_dir();

        Ok(Self {
            config_path: config_path.to_path_buf(),
            socket_path: socket_dir.join("pancamd.sock"),
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
        })
    }
}

/// Daemon state during operation
pub struct DaemonState {
    pub paths: Paths,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Session runtime
    pub runtime: DaemonRuntime,
    /// Guest rotator and sunset provider tasks
    background: Vec<JoinHandle<()>>,
    /// When daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl std::fmt::Debug for DaemonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaemonState")
            .field("paths", &self.paths)
            .field("start_time", &self.start_time)
            .field("shutdown_requested", &self.shutdown_requested)
            .finish_non_exhaustive()
    }
}

impl DaemonState {
    /// Shutdown the daemon gracefully
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        for task in self.background.drain(..) {
            task.abort();
        }

        if self.paths.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.paths.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        if self.paths.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.paths.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // Lock file is released automatically when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Camera reset failed: {0}")]
    CameraReset(#[from] ActuatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(paths: &Paths) -> Result<DaemonState, LifecycleError> {
    match startup_inner(paths).await {
        Ok(state) => Ok(state),
        // The lock holder is another live daemon; its PID file and socket
        // must stay in place.
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(paths);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(paths: &Paths) -> Result<DaemonState, LifecycleError> {
    // 1. Create state and socket directories
    if let Some(parent) = paths.lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Some(parent) = paths.socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // 2. Acquire lock file FIRST - prevents races
    let lock_file = File::create(&paths.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    let mut lock_file = lock_file;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file; // Reborrow as immutable

    // 3. Load configuration BEFORE binding socket (fail fast)
    let config = Config::load(&paths.config_path)?;

    // 4. Build adapters
    let actuator = MotorDriver::new(
        config.camera.driver.clone(),
        config.camera.image_path.clone(),
        config.camera.retries,
        config.camera.fetch_command.clone(),
        config.camera.recover_command.clone(),
    );
    let transport = HttpTransport::new(&config.transport.base_url, &config.transport.token);
    let feed = HttpSunsetFeed::new(&config.sunset.feed_url);

    // 5. Re-home the mount; a dead motor driver means the daemon is useless
    actuator.reset().await?;
    info!("camera re-homed to start position");

    // 6. Create the runtime and its background tasks
    let runtime = Runtime::new(RuntimeDeps {
        transport,
        actuator,
        clock: SystemClock,
        roller: Arc::new(RandRoller),
        full_pass: config.auth.full_pass.clone(),
        queue_cap: config.limits.queue_cap,
        session_ttl: config.limits.session_ttl,
        tick: config.limits.tick,
    });
    let background = vec![
        spawn_rotator(runtime.guest_pass(), config.limits.guest_rotation),
        spawn_sunset_provider(
            runtime.sunset(),
            feed,
            SystemClock,
            config.sunset.hour_offset,
            config.limits.sunset_poll,
        ),
    ];

    // 7. Remove stale socket and bind (LAST - only after all validation passes)
    if paths.socket_path.exists() {
        std::fs::remove_file(&paths.socket_path)?;
    }
    let listener = UnixListener::bind(&paths.socket_path)
        .map_err(|e| LifecycleError::BindFailed(paths.socket_path.clone(), e))?;

    info!("Daemon started");

    Ok(DaemonState {
        paths: paths.clone(),
        lock_file,
        listener,
        runtime,
        background,
        start_time: Instant::now(),
        shutdown_requested: false,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(paths: &Paths) {
    if paths.socket_path.exists() {
        let _ = std::fs::remove_file(&paths.socket_path);
    }
    if paths.lock_path.exists() {
        let _ = std::fs::remove_file(&paths.lock_path);
    }
}

/// Get the state directory for pancam
fn state_dir() -> Result<PathBuf, LifecycleError> {
    // Use XDG_STATE_HOME or default to ~/.local/state
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("pancam"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/pancam"))
}

/// Get the socket directory for pancam
///
/// Uses /tmp/pancam by default to keep paths short (macOS SUN_LEN = 104).
/// Can be overridden with PANCAM_SOCKET_DIR for testing.
fn socket_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PANCAM_SOCKET_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("/tmp/pancam")
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
