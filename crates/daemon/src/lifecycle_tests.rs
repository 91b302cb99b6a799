// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn paths_in(dir: &Path) -> Paths {
    Paths {
        config_path: dir.join("pancam.toml"),
        socket_path: dir.join("pancamd.sock"),
        lock_path: dir.join("daemon.pid"),
        log_path: dir.join("daemon.log"),
    }
}

#[tokio::test]
async fn second_start_leaves_the_lock_holders_pid_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());

    // Another instance already holds the lock
    let holder = File::create(&paths.lock_path).unwrap();
    holder.try_lock_exclusive().unwrap();

    let err = startup(&paths).await.unwrap_err();
    assert!(matches!(err, LifecycleError::LockFailed(_)));
    assert!(paths.lock_path.exists());
}

#[tokio::test]
async fn failed_startup_after_locking_cleans_its_own_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());

    // No config file: startup fails after the lock was taken
    let err = startup(&paths).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Config(_)));
    assert!(!paths.lock_path.exists());
}
