// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The matching engine.
//!
//! This module drives a sequence of [`Phase`]s over a [`MatchingContext`]
//! until one of them reports a terminal result, then reads the matching off
//! the final table.
//!
//! # State machine
//!
//! ```text
//! ReducingPhase1 -> { Stable, Unstable, ReducingPhase2 }
//! ReducingPhase2 -> { Stable, Unstable, ReducingPhase2 }   (one rotation per round)
//! ```
//!
//! The engine follows a simple execution model:
//! 1. Call `try_phase(ctx, round)` on the current phase
//! 2. If Repeat: call the same phase again with `round + 1`
//! 3. If Advance: move to the next phase at round 0
//! 4. If Stable or Unstable: stop
//!
//! Every round strictly removes entries from the table or turns a free
//! participant semi-engaged, so the loop terminates.
//!
//! # Example
//!
//! ```
//! use stable_roommates::context::{EngineConfig, MatchingContext};
//! use stable_roommates::engine::{MatchingEngine, Outcome};
//! use stable_roommates::table::PreferenceTable;
//!
//! let table = PreferenceTable::from_indices(&[&[1, 2, 3], &[0, 2, 3], &[3, 0, 1], &[2, 0, 1]]).unwrap();
//! let mut ctx = MatchingContext::new(table, EngineConfig::default());
//! let mut engine = MatchingEngine::irving();
//!
//! match engine.run(&mut ctx).unwrap() {
//!     Outcome::Stable(matching) => assert_eq!(matching.len(), 2),
//!     Outcome::Unstable => unreachable!(),
//! }
//! ```

pub mod phase;

pub use phase::{Phase, PhaseResult};

use crate::context::MatchingContext;
use crate::error::{Error, Result};
use crate::phases::{ProposalPhase, RotationPhase};
use crate::table::{PersonId, PreferenceTable};
use serde::Serialize;
use tracing::info;

/// Where a run is in Irving's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    ReducingPhase1,
    ReducingPhase2,
    Stable,
    Unstable,
}

/// A perfect matching, one pair per couple, each pair with the smaller id first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Matching {
    pairs: Vec<(PersonId, PersonId)>,
}

impl Matching {
    pub fn pairs(&self) -> &[(PersonId, PersonId)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The participant matched with `person`.
    pub fn partner_of(&self, person: PersonId) -> Option<PersonId> {
        self.pairs.iter().find_map(|&(a, b)| {
            if a == person {
                Some(b)
            } else if b == person {
                Some(a)
            } else {
                None
            }
        })
    }
}

/// Result of a run. `Unstable` is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stable(Matching),
    Unstable,
}

impl Outcome {
    pub fn is_stable(&self) -> bool {
        matches!(self, Outcome::Stable(_))
    }

    pub fn matching(&self) -> Option<&Matching> {
        match self {
            Outcome::Stable(m) => Some(m),
            Outcome::Unstable => None,
        }
    }
}

/// Read the matching off a table whose lists are all singletons.
///
/// # Errors
///
/// [`Error::InvariantViolation`] if some list is not a singleton or two heads
/// do not point at each other.
pub fn extract_matching(table: &PreferenceTable) -> Result<Matching> {
    let mut pairs = Vec::with_capacity(table.len() / 2);
    for person in table.participants() {
        if !table.is_singleton(person) {
            return Err(Error::InvariantViolation(format!(
                "{person} has {} entries in a final table",
                table.list_len(person)
            )));
        }
        let partner = table.head(person).ok_or_else(|| {
            Error::InvariantViolation(format!("{person} has no partner"))
        })?;
        if table.head(partner) != Some(person) {
            return Err(Error::InvariantViolation(format!(
                "{person} holds {partner}, but {partner} does not hold {person}"
            )));
        }
        if person < partner {
            pairs.push((person, partner));
        }
    }
    Ok(Matching { pairs })
}

/// Engine that runs phases in sequence.
pub struct MatchingEngine {
    /// Phases to execute in sequence.
    phases: Vec<Box<dyn Phase>>,

    /// States passed through during the last run.
    states: Vec<EngineState>,

    /// Statistics: number of try_phase calls.
    rounds: u64,
}

impl MatchingEngine {
    /// Create an engine with the given phases, run in the order given.
    pub fn new(phases: Vec<Box<dyn Phase>>) -> Self {
        Self {
            phases,
            states: Vec::new(),
            rounds: 0,
        }
    }

    /// Irving's algorithm: proposals, then rotations.
    pub fn irving() -> Self {
        Self::new(vec![Box::new(ProposalPhase), Box::new(RotationPhase)])
    }

    /// Run to completion.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if a phase reports one, or the phase
    /// list is exhausted without a terminal result.
    pub fn run(&mut self, ctx: &mut MatchingContext) -> Result<Outcome> {
        self.states.clear();
        self.rounds = 0;

        if self.phases.is_empty() {
            return Err(Error::InvariantViolation("engine has no phases".to_string()));
        }

        let mut index = 0;
        let mut round = 0;
        self.enter(index);

        loop {
            let result = self.phases[index].try_phase(ctx, round)?;
            self.rounds += 1;

            match result {
                PhaseResult::Repeat => round += 1,
                PhaseResult::Advance => {
                    index += 1;
                    round = 0;
                    if index >= self.phases.len() {
                        return Err(Error::InvariantViolation(
                            "reached the end of the phase list without a result".to_string(),
                        ));
                    }
                    self.enter(index);
                }
                PhaseResult::Stable => {
                    self.states.push(EngineState::Stable);
                    let matching = extract_matching(&ctx.table)?;
                    info!(pairs = matching.len(), rounds = self.rounds, "stable matching found");
                    return Ok(Outcome::Stable(matching));
                }
                PhaseResult::Unstable => {
                    self.states.push(EngineState::Unstable);
                    info!(rounds = self.rounds, "no stable matching");
                    return Ok(Outcome::Unstable);
                }
            }
        }
    }

    fn enter(&mut self, index: usize) {
        let phase = &self.phases[index];
        info!(phase = phase.name(), "entering phase");
        self.states.push(phase.state());
    }

    /// States passed through during the last run, terminal state last.
    pub fn states(&self) -> &[EngineState] {
        &self.states
    }

    /// Number of `try_phase` calls made during the last run.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}
