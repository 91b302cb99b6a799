// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

const MINIMAL: &str = r#"
[auth]
full_pass = "hunter2"

[transport]
base_url = "http://127.0.0.1:9000"
token = "abc"

[camera]
driver = "./motor_driver.bin"
image_path = "./photoaf.jpg"
fetch_command = "wget -N -P . http://127.0.0.1:8080/photoaf.jpg"

[sunset]
feed_url = "https://api.sunrise-sunset.org/json?lat=56.968&lng=23.77038"
hour_offset = 15
"#;

#[test]
fn minimal_config_uses_limit_defaults() {
    let config = Config::from_toml(MINIMAL).unwrap();

    assert_eq!(config.auth.full_pass, "hunter2");
    assert_eq!(config.camera.retries, 3);
    assert_eq!(config.sunset.hour_offset, 15);
    assert_eq!(config.limits.queue_cap, 5);
    assert_eq!(config.limits.session_ttl, Duration::from_secs(8 * 60 * 60));
    assert_eq!(config.limits.guest_rotation, Duration::from_secs(8 * 60 * 60));
    assert_eq!(config.limits.tick, Duration::from_secs(1));
    assert_eq!(config.limits.sunset_poll, Duration::from_secs(5 * 60));
}

#[test]
fn limits_parse_humantime_durations() {
    let content = format!(
        "{MINIMAL}\n[limits]\nqueue_cap = 2\nsession_ttl = \"1h\"\nguest_rotation = \"30m\"\ntick = \"500ms\"\nsunset_poll = \"1m\"\n"
    );
    let config = Config::from_toml(&content).unwrap();

    assert_eq!(config.limits.queue_cap, 2);
    assert_eq!(config.limits.session_ttl, Duration::from_secs(3600));
    assert_eq!(config.limits.guest_rotation, Duration::from_secs(1800));
    assert_eq!(config.limits.tick, Duration::from_millis(500));
    assert_eq!(config.limits.sunset_poll, Duration::from_secs(60));
}

#[test]
fn missing_full_pass_is_rejected() {
    let content = MINIMAL.replace("full_pass = \"hunter2\"", "");
    let err = Config::from_toml(&content);
    assert!(matches!(err, Err(ConfigError::MissingFullPass)));
}

#[test]
fn unknown_fields_are_rejected() {
    let content = format!("{MINIMAL}\nbogus = 1\n");
    assert!(matches!(
        Config::from_toml(&content),
        Err(ConfigError::Parse(_))
    ));
}
