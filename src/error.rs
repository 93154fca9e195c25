// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for table construction, input parsing and the reducers.
//!
//! An instance without a stable matching is *not* an error; it is reported as
//! [`Outcome::Unstable`](crate::engine::Outcome::Unstable).

use crate::table::PersonId;
use thiserror::Error;

/// Errors raised by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// A perfect matching needs an even number of participants.
    #[error("{count} participants cannot be paired (count must be even)")]
    OddParticipantCount { count: usize },

    /// A preference list names someone outside `0..count`.
    #[error("participant {person} lists {candidate}, but only {count} participants exist")]
    IdOutOfRange {
        person: PersonId,
        candidate: PersonId,
        count: usize,
    },

    /// A participant ranks themself.
    #[error("participant {person} lists themself")]
    SelfReference { person: PersonId },

    /// The same candidate appears twice in one list.
    #[error("participant {person} lists {candidate} more than once")]
    DuplicateCandidate {
        person: PersonId,
        candidate: PersonId,
    },

    /// `a` ranks `b`, but `b` does not rank `a`.
    #[error("participant {person} lists {candidate}, but {candidate} does not list {person}")]
    Asymmetric {
        person: PersonId,
        candidate: PersonId,
    },

    /// Input ids are not a dense `1..=n` range.
    #[error("participant {id} has no preference line")]
    MissingParticipant { id: usize },

    /// Two input lines declare the same id.
    #[error("participant {id} is declared twice (line {line})")]
    DuplicateParticipant { id: usize, line: usize },

    /// Malformed text in the preference file.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Internal contract breach inside a reducer. Always a bug, never bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
