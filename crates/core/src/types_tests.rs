// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn coords_accepts_full_range() {
    assert_eq!(Coords::new(0, 0).unwrap(), Coords { x: 0, y: 0 });
    assert_eq!(Coords::new(360, 90).unwrap(), Coords { x: 360, y: 90 });
    assert_eq!(Coords::new(180, 45).unwrap(), Coords { x: 180, y: 45 });
}

#[test]
fn coords_rejects_out_of_range() {
    assert_eq!(Coords::new(361, 0), Err(ValidationError::XOutOfRange(361)));
    assert_eq!(Coords::new(-1, 0), Err(ValidationError::XOutOfRange(-1)));
    assert_eq!(Coords::new(0, 91), Err(ValidationError::YOutOfRange(91)));
    assert_eq!(Coords::new(0, -5), Err(ValidationError::YOutOfRange(-5)));
}

#[test]
fn trigger_normalizes_hour_and_minute() {
    assert_eq!(
        Trigger::daily(26, 75).unwrap(),
        Trigger::Daily { hour: 2, minute: 15 }
    );
    assert_eq!(
        Trigger::daily(0, 0).unwrap(),
        Trigger::Daily { hour: 0, minute: 0 }
    );
    assert_eq!(
        Trigger::daily(23, 59).unwrap(),
        Trigger::Daily { hour: 23, minute: 59 }
    );
}

#[test]
fn trigger_rejects_negative_before_normalization() {
    // -1 % 24 would normalize to a valid hour; it must be rejected instead
    assert_eq!(Trigger::daily(-1, 30), Err(ValidationError::NegativeHour(-1)));
    assert_eq!(
        Trigger::daily(12, -30),
        Err(ValidationError::NegativeMinute(-30))
    );
}

#[test]
fn event_spec_round_trip_normalizes() {
    let spec = EventSpec {
        coords: Coords::new(10, 20).unwrap(),
        trigger: Trigger::daily(26, 75).unwrap(),
    };
    assert_eq!(spec.coords, Coords { x: 10, y: 20 });
    assert_eq!(spec.trigger, Trigger::Daily { hour: 2, minute: 15 });
}

#[test]
fn event_spec_display_shows_parameters() {
    let spec = EventSpec {
        coords: Coords::new(10, 20).unwrap(),
        trigger: Trigger::Daily { hour: 2, minute: 5 },
    };
    assert_eq!(spec.to_string(), "X: 10 Y: 20 at 2:05");

    let sunset = EventSpec {
        coords: Coords::new(300, 15).unwrap(),
        trigger: Trigger::Sunset,
    };
    assert!(sunset.to_string().contains("sunset"));
}
