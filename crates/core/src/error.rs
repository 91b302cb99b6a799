// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation errors for user-supplied coordinate and time input

use thiserror::Error;

/// Malformed or out-of-range user input.
///
/// Always recoverable: the interpreter reports the error to the user and
/// stays in (or returns to) a command-accepting state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("X coordinate {0} is outside 0..=360")]
    XOutOfRange(i64),

    #[error("Y coordinate {0} is outside 0..=90")]
    YOutOfRange(i64),

    #[error("hours can not be negative: {0}")]
    NegativeHour(i64),

    #[error("minutes can not be negative: {0}")]
    NegativeMinute(i64),

    #[error("expected {expected} numbers, got {got}")]
    WrongFieldCount { expected: usize, got: usize },

    #[error("not a number: {0}")]
    NotNumeric(String),
}
