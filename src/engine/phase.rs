// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Phase trait for the matching engine.
//!
//! The engine runs phases in sequence. Each call to a phase performs one
//! unit of work (a single proposal, a single rotation) and reports whether
//! the same phase should run again, control should pass to the next phase,
//! or the run has reached a terminal state.
//!
//! # Example
//!
//! ```
//! use stable_roommates::context::MatchingContext;
//! use stable_roommates::engine::{EngineState, Phase, PhaseResult};
//! use stable_roommates::error::Result;
//!
//! #[derive(Debug)]
//! struct CountTo(usize);
//!
//! impl Phase for CountTo {
//!     fn try_phase(&mut self, _ctx: &mut MatchingContext, round: usize) -> Result<PhaseResult> {
//!         if round < self.0 {
//!             Ok(PhaseResult::Repeat)
//!         } else {
//!             Ok(PhaseResult::Advance)
//!         }
//!     }
//!
//!     fn state(&self) -> EngineState {
//!         EngineState::ReducingPhase1
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CountTo"
//!     }
//! }
//! ```

use super::EngineState;
use crate::context::MatchingContext;
use crate::error::Result;
use std::fmt::Debug;

/// Result of running one round of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseResult {
    /// Work was done. Run the same phase again with the next round number.
    Repeat,

    /// This phase is finished without deciding the outcome. Move to the next
    /// phase in sequence.
    Advance,

    /// Every list is a singleton; the table is a stable matching.
    Stable,

    /// Some list is empty; no stable matching exists.
    Unstable,
}

impl PhaseResult {
    pub fn is_terminal(self) -> bool {
        matches!(self, PhaseResult::Stable | PhaseResult::Unstable)
    }
}

/// One stage of the reduction.
///
/// # Lifecycle
///
/// 1. Engine calls `try_phase(ctx, 0)` when it first reaches the phase
/// 2. `Repeat`: engine calls `try_phase(ctx, round + 1)`
/// 3. `Advance`: engine moves on to the next phase at round 0
/// 4. `Stable` / `Unstable`: the run ends
///
/// An `Err` aborts the run; it signals an internal invariant violation.
pub trait Phase: Debug {
    fn try_phase(&mut self, ctx: &mut MatchingContext, round: usize) -> Result<PhaseResult>;

    /// The engine state reported while this phase runs.
    fn state(&self) -> EngineState;

    /// Optional: Get a name for this phase (for logging).
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Decide the outcome from the table alone, if it is already decided.
///
/// Both phases use this: an empty list means no stable matching, all
/// singletons means the table is the matching.
pub fn terminal_state(ctx: &MatchingContext) -> Option<PhaseResult> {
    if ctx.table.exists_empty() {
        Some(PhaseResult::Unstable)
    } else if ctx.table.all_singleton() {
        Some(PhaseResult::Stable)
    } else {
        None
    }
}
