// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rotations and the RotationFinder.
//!
//! A rotation is a cyclic sequence of pairs `(x_0,y_0) .. (x_{r-1},y_{r-1})`
//! where `y_i` is the head of `x_i` and `y_{i+1 mod r}` is the second entry of
//! `x_i`. The finder starts at any participant with two or more entries and
//! follows `second -> participant holding it as head` until a second entry
//! repeats.

use crate::error::{Error, Result};
use crate::strategy::SelectionStrategy;
use crate::table::{PersonId, PreferenceTable};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Which part of the traversed chain forms the rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// Only the cycle: pairs from the first occurrence of the repeated entry
    /// to the end of the chain.
    #[default]
    Cycle,
    /// The whole chain from the starting participant, tail included.
    Accumulated,
}

/// An ordered cyclic sequence of `(x, y)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rotation {
    pairs: Vec<(PersonId, PersonId)>,
}

impl Rotation {
    /// Create a rotation from its pairs, in order.
    ///
    /// # Panics
    ///
    /// Panics if `pairs` is empty.
    pub fn new(pairs: Vec<(PersonId, PersonId)>) -> Self {
        assert!(!pairs.is_empty(), "Rotation needs at least one pair");
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(PersonId, PersonId)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false; a rotation has at least one pair.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The `x` of the pair before pair `i`, wrapping around.
    pub fn predecessor(&self, i: usize) -> PersonId {
        let r = self.pairs.len();
        self.pairs[(i + r - 1) % r].0
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (x, y)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{{{x},{y}}}")?;
        }
        Ok(())
    }
}

/// Locates one rotation in a table whose lists are all non-empty.
#[derive(Debug, Clone, Copy)]
pub struct RotationFinder {
    mode: RotationMode,
}

impl RotationFinder {
    pub fn new(mode: RotationMode) -> Self {
        Self { mode }
    }

    /// Find a rotation starting from the participant `strategy` selects among
    /// those with at least two entries.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if no participant has two entries, or the
    /// chain reaches an entry that is not exactly one participant's head, or a
    /// participant with fewer than two entries.
    pub fn find(
        &self,
        table: &PreferenceTable,
        strategy: &dyn SelectionStrategy,
    ) -> Result<Rotation> {
        let start = strategy
            .select(table, &|p| table.list_len(p) >= 2)
            .ok_or_else(|| {
                Error::InvariantViolation("no list with two or more entries".to_string())
            })?;
        self.find_from(table, start)
    }

    /// Find the rotation reached from `start`.
    pub fn find_from(&self, table: &PreferenceTable, start: PersonId) -> Result<Rotation> {
        let head = table.head(start).ok_or_else(|| {
            Error::InvariantViolation(format!("rotation start {start} has an empty list"))
        })?;
        let mut xs = vec![start];
        let mut ys = vec![head];
        let mut second = second_of(table, start)?;

        let repeat = loop {
            if let Some(i) = ys.iter().position(|&y| y == second) {
                break i;
            }
            if xs.len() > table.len() {
                return Err(Error::InvariantViolation(format!(
                    "rotation chain from {start} never closes"
                )));
            }
            let next_x = unique_with_head(table, second)?;
            xs.push(next_x);
            ys.push(second);
            second = second_of(table, next_x)?;
        };

        let from = match self.mode {
            RotationMode::Cycle => repeat,
            RotationMode::Accumulated => 0,
        };
        Ok(Rotation::new(
            xs[from..].iter().copied().zip(ys[from..].iter().copied()).collect(),
        ))
    }
}

fn second_of(table: &PreferenceTable, x: PersonId) -> Result<PersonId> {
    table.second(x).ok_or_else(|| {
        Error::InvariantViolation(format!("{x} is on a rotation chain with fewer than two entries"))
    })
}

/// The single participant whose head is `y`.
fn unique_with_head(table: &PreferenceTable, y: PersonId) -> Result<PersonId> {
    let mut found = table.participants().filter(|&p| table.head(p) == Some(y));
    match (found.next(), found.next()) {
        (Some(x), None) => Ok(x),
        (None, _) => Err(Error::InvariantViolation(format!(
            "no participant has {y} as head"
        ))),
        (Some(a), Some(b)) => Err(Error::InvariantViolation(format!(
            "both {a} and {b} have {y} as head"
        ))),
    }
}
