// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rust implementation of Irving's algorithm for the stable roommates problem.
//!
//! Given an even number of participants, each ranking some of the others,
//! find a perfect pairing in which no two participants who are not paired
//! together would both rather be with each other, or report that no such
//! pairing exists.
//!
//! # Architecture
//!
//! All state of a run lives in one [`MatchingContext`]:
//!
//! - [`PreferenceTable`]: per-participant ranked lists with tombstone
//!   deletion and the symmetric-presence invariant
//! - [`Trace`]: ordered log of proposals, deletions and rotations
//! - [`Statistics`](state::Statistics): per-run counters
//!
//! # Algorithm
//!
//! The [`MatchingEngine`] runs two phases over the table:
//!
//! 1. **ProposalPhase**: free participants propose to their heads until
//!    nobody free has a non-empty list (the first-reduced table)
//! 2. **RotationPhase**: while some list has two or more entries, find a
//!    rotation and eliminate it
//!
//! The run ends `Stable` when every list is a singleton and `Unstable` as soon
//! as any list is empty.
//!
//! # References
//!
//! - Irving, R. W. (1985). "An efficient algorithm for the 'stable roommates'
//!   problem." Journal of Algorithms 6(4), 577-595.
//! - Gusfield, D. and Irving, R. W. (1989). *The Stable Marriage Problem:
//!   Structure and Algorithms.* MIT Press.

pub mod context;
pub mod engine;
pub mod error;
pub mod input;
pub mod phases;
pub mod report;
pub mod state;
pub mod strategy;
pub mod table;
pub mod trace;

// Re-export commonly used types
pub use context::{EngineConfig, MatchingContext};
pub use engine::{EngineState, Matching, MatchingEngine, Outcome};
pub use error::{Error, Result};
pub use table::{PersonId, PreferenceTable};
pub use trace::Trace;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Run {
    pub outcome: Outcome,
    /// States passed through, terminal state last.
    pub states: Vec<EngineState>,
    /// Final table, trace and statistics.
    pub context: MatchingContext,
}

/// Run Irving's algorithm on `table` with `config`.
pub fn solve(table: PreferenceTable, config: EngineConfig) -> Result<Run> {
    let mut context = MatchingContext::new(table, config);
    let mut engine = MatchingEngine::irving();
    let outcome = engine.run(&mut context)?;
    Ok(Run {
        outcome,
        states: engine.states().to_vec(),
        context,
    })
}
