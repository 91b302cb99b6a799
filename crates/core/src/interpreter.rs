// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session command interpreter
//!
//! A pure transition function over an explicit state tag: given the session's
//! current state and one inbound text, produce the next state and the effects
//! to execute. All ambient reads (credentials, sunset target, die rolls) come
//! in through [`Ctx`], so every transition is testable in isolation.

use crate::command::Command;
use crate::dice::Roller;
use crate::effect::{Effect, Step};
use crate::error::ValidationError;
use crate::types::{AuthLevel, Coords, EventSpec, SessionState, Trigger};

/// Reply sent when the capture queue is at capacity
pub const QUEUE_FULL_REPLY: &str = "Sorry, queue is full. Try again later 🕙";

/// Read-only snapshot of the session handed to the interpreter
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub state: SessionState,
    pub auth: AuthLevel,
    /// The session's active event, if any
    pub event: Option<&'a EventSpec>,
    /// Display name supplied by the transport
    pub sender: &'a str,
}

/// Ambient process-wide values the interpreter reads but never writes
pub struct Ctx<'a> {
    pub guest_pass: &'a str,
    pub full_pass: &'a str,
    /// Current sunset target, if known
    pub sunset: Option<(u32, u32)>,
    pub roller: &'a dyn Roller,
}

/// Interpret one inbound text for a session
pub fn interpret(view: &SessionView, text: &str, ctx: &Ctx) -> Step {
    match view.state {
        SessionState::Unauthenticated => login(view, text, ctx),
        SessionState::Authenticated => match Command::parse(text) {
            Some(cmd) => handle_command(cmd, view, ctx),
            None => Step::with_reply(
                SessionState::Authenticated,
                format!("{}, I dont understand command: {}", view.sender, text),
            ),
        },
        // Commands are intercepted from every awaiting state before
        // coordinate parsing, so a pending entry can be abandoned.
        SessionState::AwaitingPhotoCoords => match Command::parse(text) {
            Some(cmd) => handle_command(cmd, view, ctx),
            None => photo_coords(view, text),
        },
        SessionState::AwaitingEventCoords => match Command::parse(text) {
            Some(cmd) => handle_command(cmd, view, ctx),
            None => event_coords(view, text),
        },
        SessionState::AwaitingSunsetCoords => match Command::parse(text) {
            Some(cmd) => handle_command(cmd, view, ctx),
            None => sunset_coords(view, text),
        },
    }
}

/// Credential check; any other text repeats the prompt
fn login(view: &SessionView, text: &str, ctx: &Ctx) -> Step {
    let welcome = format!(
        "Welcome back, {}, I am ready to work, please send me a \"/photo\" command to take a picture 🖼",
        view.sender
    );
    if text == ctx.guest_pass {
        Step::with_reply(SessionState::Authenticated, welcome).grant(AuthLevel::Guest)
    } else if text == ctx.full_pass {
        Step::with_reply(SessionState::Authenticated, welcome).grant(AuthLevel::Full)
    } else {
        Step::with_reply(
            SessionState::Unauthenticated,
            format!(
                "Hello {} 🖐, I am ready to take some photos 📷. Please send me your password 😉",
                view.sender
            ),
        )
    }
}

fn handle_command(cmd: Command, view: &SessionView, ctx: &Ctx) -> Step {
    match cmd {
        Command::Help => Step::with_reply(SessionState::Authenticated, help_text(view.auth)),

        Command::Photo => Step::with_reply(
            SessionState::AwaitingPhotoCoords,
            format!(
                "{}, please specify coordinates X Y 🕹 in degrees to turn camera 📷 and take a picture 🖼",
                view.sender
            ),
        ),

        Command::Dice => {
            let d1 = ctx.roller.roll();
            let d2 = ctx.roller.roll();
            let coords = Coords {
                x: i32::from(d1) * (360 / 6),
                y: i32::from(d2) * (90 / 6),
            };
            Step::with_reply(
                SessionState::Authenticated,
                format!("{}, rolled 🎲 {} and {}", view.sender, d1, d2),
            )
            .effect(Effect::Capture {
                coords,
                ack: format!(
                    "{}, doing photo 🖼 on coordinates {}, please wait 🕙",
                    view.sender, coords
                ),
            })
        }

        Command::EventCreate => match event_guard(view) {
            Err(step) => step,
            Ok(()) => Step::with_reply(
                SessionState::AwaitingEventCoords,
                format!(
                    "{}, event will send you a photo 🖼 every day at exact time, to create an event send information in format \"X Y Hours Minutes\" 😁",
                    view.sender
                ),
            ),
        },

        Command::EventDelete => match view.event {
            None => Step::with_reply(
                SessionState::Authenticated,
                format!("{}, you have no existing event [🛑]", view.sender),
            ),
            Some(spec) => Step::stay(SessionState::Authenticated)
                .effect(Effect::StopEvent)
                .reply(format!(
                    "{}, deleted your existing event ({}) 🎉",
                    view.sender, spec
                )),
        },

        Command::EventSunset => match event_guard(view) {
            Err(step) => step,
            Ok(()) => Step::with_reply(
                SessionState::AwaitingSunsetCoords,
                "Enter X and Y coordinate to create sunset event 🌆",
            ),
        },

        Command::SunsetTime => {
            let reply = match ctx.sunset {
                Some((hour, minute)) => format!(
                    "{}, today you can see sunset at {}:{:02}",
                    view.sender, hour, minute
                ),
                None => format!("{}, sunset time is not known yet 🌆", view.sender),
            };
            Step::with_reply(SessionState::Authenticated, reply)
        }

        Command::GuestPass => {
            if !view.auth.is_full() {
                return guest_refusal(view);
            }
            Step::with_reply(
                SessionState::Authenticated,
                format!(
                    "{}, guest password 🔐 for next 8 hours is {}",
                    view.sender, ctx.guest_pass
                ),
            )
        }
    }
}

/// Full-auth and single-event guard shared by /eventcreate and /eventsunset
fn event_guard(view: &SessionView) -> Result<(), Step> {
    if !view.auth.is_full() {
        return Err(guest_refusal(view));
    }
    if let Some(spec) = view.event {
        return Err(Step::with_reply(
            SessionState::Authenticated,
            format!(
                "{}, delete your existing event first ({}) 🎉",
                view.sender, spec
            ),
        ));
    }
    Ok(())
}

fn guest_refusal(view: &SessionView) -> Step {
    Step::with_reply(
        SessionState::Authenticated,
        format!("{}, you can not do that as guest [🛑]", view.sender),
    )
}

fn help_text(auth: AuthLevel) -> String {
    let guest = "/help - Get a list of commands 📜\n\
                 /photo - Take a photo from camera 📷\n\
                 /dice - Throw a dice and take a photo 🎲\n\
                 /sunsettime - Get sunset time 🌆🕘";
    if auth.is_full() {
        format!(
            "{guest}\n\
             /eventcreate - Create an event 🎉\n\
             /eventdelete - Delete an event 🔴\n\
             /eventsunset - Create sunset event 🌆\n\
             /guestpass - Get guest password 🔐"
        )
    } else {
        guest.to_string()
    }
}

/// Parse exactly `expected` whitespace-separated integers
fn parse_fields(text: &str, expected: usize) -> Result<Vec<i64>, ValidationError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != expected {
        return Err(ValidationError::WrongFieldCount {
            expected,
            got: fields.len(),
        });
    }
    fields
        .iter()
        .map(|f| {
            f.parse::<i64>()
                .map_err(|_| ValidationError::NotNumeric((*f).to_string()))
        })
        .collect()
}

/// Map a coordinate validation failure to its user-visible reply
fn range_reply(sender: &str, err: &ValidationError) -> String {
    match err {
        ValidationError::XOutOfRange(_) => format!(
            "{sender}, X coordinate should be greater than 0, but smaller than 360 [🛑]"
        ),
        ValidationError::YOutOfRange(_) => {
            format!("{sender}, Y coordinate should be greater than 0, but smaller than 90 [🛑]")
        }
        ValidationError::NegativeHour(_) => {
            format!("{sender}, hours cant be negative number [🛑]")
        }
        ValidationError::NegativeMinute(_) => {
            format!("{sender}, minutes cant be negative number [🛑]")
        }
        _ => format!("{sender}, please specify valid coordinates X Y 🕹 in degrees"),
    }
}

fn photo_coords(view: &SessionView, text: &str) -> Step {
    let coords = match parse_pair(view, text, SessionState::AwaitingPhotoCoords) {
        Ok(coords) => coords,
        Err(step) => return step,
    };
    Step::stay(SessionState::Authenticated).effect(Effect::Capture {
        coords,
        ack: format!(
            "{}, added your request to the queue, please wait 🕙",
            view.sender
        ),
    })
}

fn sunset_coords(view: &SessionView, text: &str) -> Step {
    let coords = match parse_pair(view, text, SessionState::AwaitingSunsetCoords) {
        Ok(coords) => coords,
        Err(step) => return step,
    };
    Step::stay(SessionState::Authenticated)
        .effect(Effect::StartEvent(EventSpec {
            coords,
            trigger: Trigger::Sunset,
        }))
        .reply(format!(
            "Created sunset 🌆 event at coordinates {} {}",
            coords.x, coords.y
        ))
}

/// Parse and validate "X Y"; on failure reply and remain in `retry` state
fn parse_pair(view: &SessionView, text: &str, retry: SessionState) -> Result<Coords, Step> {
    let fields = parse_fields(text, 2).map_err(|err| {
        tracing::warn!(sender = view.sender, input = text, %err, "invalid coordinates");
        Step::with_reply(
            retry,
            format!(
                "{}, please specify valid coordinates X Y 🕹 in degrees",
                view.sender
            ),
        )
    })?;
    Coords::new(fields[0], fields[1]).map_err(|err| {
        tracing::warn!(sender = view.sender, input = text, %err, "coordinates out of range");
        Step::with_reply(retry, range_reply(view.sender, &err))
    })
}

fn event_coords(view: &SessionView, text: &str) -> Step {
    const RETRY: SessionState = SessionState::AwaitingEventCoords;

    let fields = match parse_fields(text, 4) {
        Ok(fields) => fields,
        Err(err) => {
            tracing::warn!(sender = view.sender, input = text, %err, "invalid event input");
            return Step::with_reply(
                RETRY,
                format!(
                    "{}, please specify valid info in format \"X Y Hours Minutes\" to create an event 📷",
                    view.sender
                ),
            );
        }
    };

    // Time first: negative hour/minute is rejected before the coordinates
    // are looked at, and before modulo normalization.
    let trigger = match Trigger::daily(fields[2], fields[3]) {
        Ok(trigger) => trigger,
        Err(err) => return Step::with_reply(RETRY, range_reply(view.sender, &err)),
    };
    let coords = match Coords::new(fields[0], fields[1]) {
        Ok(coords) => coords,
        Err(err) => return Step::with_reply(RETRY, range_reply(view.sender, &err)),
    };

    let spec = EventSpec { coords, trigger };
    Step::stay(SessionState::Authenticated)
        .effect(Effect::StartEvent(spec))
        .reply(format!("{}, event ({}) created 🎉", view.sender, spec))
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod tests;
