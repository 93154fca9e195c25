// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Participant identifiers and availability flags.

use serde::{Serialize, Serializer};
use std::fmt;

/// A participant, as a dense zero-based index.
///
/// This is a newtype wrapper so that participant ids cannot be confused with
/// positions inside a preference list. `Display` prints the 1-based id used by
/// preference files and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(usize);

impl PersonId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Create from a 1-based external id, returning None for 0.
    pub fn from_label(label: usize) -> Option<Self> {
        label.checked_sub(1).map(Self)
    }

    /// Get the zero-based index (for array indexing).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Get the 1-based external id.
    pub fn label(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for PersonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.label() as u64)
    }
}

/// Phase 1 availability of a participant.
///
/// Phase 2 never reads this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// No proposal of theirs is currently held.
    #[default]
    Free,
    /// Their head currently holds their proposal.
    SemiEngaged,
}
