// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_all_commands() {
    let all = [
        Command::Help,
        Command::Photo,
        Command::Dice,
        Command::EventCreate,
        Command::EventDelete,
        Command::EventSunset,
        Command::SunsetTime,
        Command::GuestPass,
    ];
    for cmd in all {
        assert_eq!(Command::parse(cmd.as_str()), Some(cmd));
    }
}

#[test]
fn matching_is_exact_and_case_sensitive() {
    assert_eq!(Command::parse("/Help"), None);
    assert_eq!(Command::parse("/photo "), None);
    assert_eq!(Command::parse("photo"), None);
    assert_eq!(Command::parse("/photograph"), None);
    assert_eq!(Command::parse(""), None);
}
