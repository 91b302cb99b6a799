// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dice::FixedRoller;

fn ctx<'a>(roller: &'a FixedRoller) -> Ctx<'a> {
    Ctx {
        guest_pass: "guest-secret",
        full_pass: "full-secret",
        sunset: Some((21, 5)),
        roller,
    }
}

fn view(state: SessionState, auth: AuthLevel) -> SessionView<'static> {
    SessionView {
        state,
        auth,
        event: None,
        sender: "Alice",
    }
}

fn replies(step: &Step) -> Vec<String> {
    step.effects
        .iter()
        .filter_map(|e| match e {
            Effect::Reply(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn wrong_password_stays_unauthenticated() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Unauthenticated, AuthLevel::Unauthenticated);

    let step = interpret(&v, "not-a-password", &ctx(&roller));

    assert_eq!(step.next, SessionState::Unauthenticated);
    assert_eq!(step.auth, None);
    assert!(replies(&step)[0].contains("password"));
}

#[test]
fn guest_password_grants_guest() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Unauthenticated, AuthLevel::Unauthenticated);

    let step = interpret(&v, "guest-secret", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    assert_eq!(step.auth, Some(AuthLevel::Guest));
    assert!(replies(&step)[0].contains("Welcome back"));
}

#[test]
fn full_password_grants_full() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Unauthenticated, AuthLevel::Unauthenticated);

    let step = interpret(&v, "full-secret", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    assert_eq!(step.auth, Some(AuthLevel::Full));
}

#[test]
fn commands_are_not_recognized_before_login() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Unauthenticated, AuthLevel::Unauthenticated);

    let step = interpret(&v, "/help", &ctx(&roller));

    assert_eq!(step.next, SessionState::Unauthenticated);
    assert!(replies(&step)[0].contains("password"));
}

#[test]
fn unknown_command_replies_and_stays() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Authenticated, AuthLevel::Full);

    let step = interpret(&v, "/frobnicate", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    assert!(replies(&step)[0].contains("dont understand"));
}

#[test]
fn help_is_scoped_to_auth_level() {
    let roller = FixedRoller::new(vec![1]);

    let guest = interpret(
        &view(SessionState::Authenticated, AuthLevel::Guest),
        "/help",
        &ctx(&roller),
    );
    let full = interpret(
        &view(SessionState::Authenticated, AuthLevel::Full),
        "/help",
        &ctx(&roller),
    );

    let guest_replies = replies(&guest);
    let full_replies = replies(&full);
    let guest_help = &guest_replies[0];
    let full_help = &full_replies[0];
    assert!(guest_help.contains("/photo"));
    assert!(!guest_help.contains("/eventcreate"));
    assert!(!guest_help.contains("/guestpass"));
    assert!(full_help.contains("/eventcreate"));
    assert!(full_help.contains("/guestpass"));
}

#[test]
fn photo_moves_to_awaiting_coords() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Authenticated, AuthLevel::Guest);

    let step = interpret(&v, "/photo", &ctx(&roller));

    assert_eq!(step.next, SessionState::AwaitingPhotoCoords);
}

#[test]
fn photo_coords_submit_capture_and_return() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::AwaitingPhotoCoords, AuthLevel::Guest);

    let step = interpret(&v, "120 45", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    assert!(step.effects.iter().any(|e| matches!(
        e,
        Effect::Capture {
            coords: Coords { x: 120, y: 45 },
            ..
        }
    )));
}

#[test]
fn photo_coords_validation_errors_remain_awaiting() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::AwaitingPhotoCoords, AuthLevel::Guest);
    let c = ctx(&roller);

    for input in ["10", "10 20 30", "ten twenty", ""] {
        let step = interpret(&v, input, &c);
        assert_eq!(step.next, SessionState::AwaitingPhotoCoords, "{input:?}");
        assert!(!step.effects.iter().any(|e| matches!(e, Effect::Capture { .. })));
    }

    let step = interpret(&v, "361 20", &c);
    assert_eq!(step.next, SessionState::AwaitingPhotoCoords);
    assert!(replies(&step)[0].contains('X'));

    let step = interpret(&v, "20 91", &c);
    assert_eq!(step.next, SessionState::AwaitingPhotoCoords);
    assert!(replies(&step)[0].contains('Y'));
}

#[test]
fn commands_intercept_pending_coordinate_entry() {
    let roller = FixedRoller::new(vec![1]);
    let c = ctx(&roller);

    for state in [
        SessionState::AwaitingPhotoCoords,
        SessionState::AwaitingEventCoords,
        SessionState::AwaitingSunsetCoords,
    ] {
        let step = interpret(&view(state, AuthLevel::Full), "/help", &c);
        assert_eq!(step.next, SessionState::Authenticated, "{state:?}");
    }

    // A command can even chain into another awaiting state
    let step = interpret(
        &view(SessionState::AwaitingEventCoords, AuthLevel::Full),
        "/photo",
        &c,
    );
    assert_eq!(step.next, SessionState::AwaitingPhotoCoords);
}

#[test]
fn dice_maps_rolls_to_coordinates() {
    let roller = FixedRoller::new(vec![6, 1]);
    let v = view(SessionState::Authenticated, AuthLevel::Guest);

    let step = interpret(&v, "/dice", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    let capture = step
        .effects
        .iter()
        .find_map(|e| match e {
            Effect::Capture { coords, .. } => Some(*coords),
            _ => None,
        })
        .unwrap();
    assert_eq!(capture, Coords { x: 360, y: 15 });
}

#[test]
fn eventcreate_refused_for_guest() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Authenticated, AuthLevel::Guest);

    let step = interpret(&v, "/eventcreate", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    assert!(replies(&step)[0].contains("guest"));
    assert!(!step
        .effects
        .iter()
        .any(|e| matches!(e, Effect::StartEvent(_))));
}

#[test]
fn eventcreate_refused_while_event_active() {
    let roller = FixedRoller::new(vec![1]);
    let spec = EventSpec {
        coords: Coords { x: 10, y: 20 },
        trigger: Trigger::Daily { hour: 2, minute: 15 },
    };
    let v = SessionView {
        state: SessionState::Authenticated,
        auth: AuthLevel::Full,
        event: Some(&spec),
        sender: "Alice",
    };

    let step = interpret(&v, "/eventcreate", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    // Refusal reports the existing event's parameters unchanged
    assert!(replies(&step)[0].contains("X: 10 Y: 20 at 2:15"));
}

#[test]
fn event_coords_create_normalized_event() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::AwaitingEventCoords, AuthLevel::Full);

    let step = interpret(&v, "10 20 26 75", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    let spec = step
        .effects
        .iter()
        .find_map(|e| match e {
            Effect::StartEvent(spec) => Some(*spec),
            _ => None,
        })
        .unwrap();
    assert_eq!(spec.coords, Coords { x: 10, y: 20 });
    assert_eq!(spec.trigger, Trigger::Daily { hour: 2, minute: 15 });
}

#[test]
fn event_coords_reject_negative_time() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::AwaitingEventCoords, AuthLevel::Full);
    let c = ctx(&roller);

    let step = interpret(&v, "10 20 -1 30", &c);
    assert_eq!(step.next, SessionState::AwaitingEventCoords);
    assert!(replies(&step)[0].contains("hours"));

    let step = interpret(&v, "10 20 5 -30", &c);
    assert_eq!(step.next, SessionState::AwaitingEventCoords);
    assert!(replies(&step)[0].contains("minutes"));
}

#[test]
fn event_coords_reject_bad_input() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::AwaitingEventCoords, AuthLevel::Full);
    let c = ctx(&roller);

    for input in ["10 20 5", "10 20 5 6 7", "a b c d", "400 20 5 6", "10 95 5 6"] {
        let step = interpret(&v, input, &c);
        assert_eq!(step.next, SessionState::AwaitingEventCoords, "{input:?}");
        assert!(
            !step.effects.iter().any(|e| matches!(e, Effect::StartEvent(_))),
            "{input:?}"
        );
    }
}

#[test]
fn eventdelete_without_event_refused() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Authenticated, AuthLevel::Full);

    let step = interpret(&v, "/eventdelete", &ctx(&roller));

    assert_eq!(step.next, SessionState::Authenticated);
    assert!(replies(&step)[0].contains("no existing event"));
    assert!(!step.effects.iter().any(|e| matches!(e, Effect::StopEvent)));
}

#[test]
fn eventdelete_stops_event_and_reports_parameters() {
    let roller = FixedRoller::new(vec![1]);
    let spec = EventSpec {
        coords: Coords { x: 300, y: 15 },
        trigger: Trigger::Sunset,
    };
    let v = SessionView {
        state: SessionState::Authenticated,
        auth: AuthLevel::Full,
        event: Some(&spec),
        sender: "Alice",
    };

    let step = interpret(&v, "/eventdelete", &ctx(&roller));

    assert!(step.effects.iter().any(|e| matches!(e, Effect::StopEvent)));
    assert!(replies(&step)[0].contains("X: 300 Y: 15"));
}

#[test]
fn eventsunset_flow_creates_sunset_event() {
    let roller = FixedRoller::new(vec![1]);
    let c = ctx(&roller);

    let step = interpret(
        &view(SessionState::Authenticated, AuthLevel::Full),
        "/eventsunset",
        &c,
    );
    assert_eq!(step.next, SessionState::AwaitingSunsetCoords);

    let step = interpret(
        &view(SessionState::AwaitingSunsetCoords, AuthLevel::Full),
        "300 15",
        &c,
    );
    assert_eq!(step.next, SessionState::Authenticated);
    let spec = step
        .effects
        .iter()
        .find_map(|e| match e {
            Effect::StartEvent(spec) => Some(*spec),
            _ => None,
        })
        .unwrap();
    assert_eq!(spec.trigger, Trigger::Sunset);
    assert_eq!(spec.coords, Coords { x: 300, y: 15 });
}

#[test]
fn eventsunset_refused_for_guest() {
    let roller = FixedRoller::new(vec![1]);
    let step = interpret(
        &view(SessionState::Authenticated, AuthLevel::Guest),
        "/eventsunset",
        &ctx(&roller),
    );
    assert_eq!(step.next, SessionState::Authenticated);
    assert!(replies(&step)[0].contains("guest"));
}

#[test]
fn sunsettime_reports_current_target() {
    let roller = FixedRoller::new(vec![1]);
    let v = view(SessionState::Authenticated, AuthLevel::Guest);

    let step = interpret(&v, "/sunsettime", &ctx(&roller));
    assert!(replies(&step)[0].contains("21:05"));

    let no_target = Ctx {
        sunset: None,
        ..ctx(&roller)
    };
    let step = interpret(&v, "/sunsettime", &no_target);
    assert!(replies(&step)[0].contains("not known"));
}

#[test]
fn guestpass_full_only() {
    let roller = FixedRoller::new(vec![1]);
    let c = ctx(&roller);

    let step = interpret(
        &view(SessionState::Authenticated, AuthLevel::Guest),
        "/guestpass",
        &c,
    );
    assert!(replies(&step)[0].contains("guest"));
    assert!(!replies(&step)[0].contains("guest-secret"));

    let step = interpret(
        &view(SessionState::Authenticated, AuthLevel::Full),
        "/guestpass",
        &c,
    );
    assert!(replies(&step)[0].contains("guest-secret"));
}
