// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! RotationEliminator and RotationPhase (Phase 2).
//!
//! Eliminating a rotation makes every `y_i` drop each candidate it ranks
//! below `x_{i-1}`, the participant that moves on to `y_i` once the rotation
//! is applied. Cut-off positions for all pairs are read before the first
//! deletion, so the result does not depend on the order pairs are processed.

use crate::context::MatchingContext;
use crate::engine::phase::terminal_state;
use crate::engine::{EngineState, Phase, PhaseResult};
use crate::error::{Error, Result};
use crate::phases::rotation::{Rotation, RotationFinder, RotationMode};
use crate::state::Counters;
use crate::table::PersonId;
use crate::trace::TraceEvent;
use tracing::{debug, info};

/// Where truncation of one `y_i` list starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    /// Delete everything strictly after this position.
    After(usize),
    /// The predecessor is absent from the list; delete everything. Only the
    /// accumulated mode reaches this.
    Everything,
}

/// Applies a rotation to the table.
#[derive(Debug, Clone, Copy)]
pub struct RotationEliminator {
    mode: RotationMode,
}

impl RotationEliminator {
    pub fn new(mode: RotationMode) -> Self {
        Self { mode }
    }

    /// Eliminate `rotation`, returning the number of pairs deleted.
    ///
    /// # Errors
    ///
    /// In [`RotationMode::Cycle`], a predecessor missing from its `y` list is
    /// an [`Error::InvariantViolation`].
    pub fn eliminate(&self, ctx: &mut MatchingContext, rotation: &Rotation) -> Result<usize> {
        let mut cuts: Vec<(PersonId, Cut)> = Vec::with_capacity(rotation.len());
        for (i, &(_, y)) in rotation.pairs().iter().enumerate() {
            let predecessor = rotation.predecessor(i);
            let cut = match (ctx.table.present_rank_of(y, predecessor), self.mode) {
                (Some(position), _) => Cut::After(position),
                (None, RotationMode::Accumulated) => Cut::Everything,
                (None, RotationMode::Cycle) => {
                    return Err(Error::InvariantViolation(format!(
                        "rotation predecessor {predecessor} is not in {y}'s list"
                    )))
                }
            };
            cuts.push((y, cut));
        }

        let before = ctx.table.total_remaining();
        for (y, cut) in cuts {
            let position = match cut {
                Cut::After(position) => Some(position),
                Cut::Everything => None,
            };
            for w in ctx.table.entries_after(y, position) {
                ctx.delete_pair(y, w)?;
            }
        }
        Ok((before - ctx.table.total_remaining()) / 2)
    }
}

/// Phase 2 of Irving's algorithm: find and eliminate one rotation per round
/// until the table is decided.
#[derive(Debug, Default)]
pub struct RotationPhase;

impl Phase for RotationPhase {
    fn try_phase(&mut self, ctx: &mut MatchingContext, round: usize) -> Result<PhaseResult> {
        if round == 0 {
            ctx.trace.checkpoint();
            ctx.record(TraceEvent::EnterPhaseTwo);
        }
        if let Some(result) = terminal_state(ctx) {
            info!(rotations = round, "phase 2 complete");
            return Ok(result);
        }

        let mode = ctx.rotation_mode();
        let rotation = RotationFinder::new(mode).find(&ctx.table, ctx.strategy())?;
        debug!(round, %rotation, "rotation");
        ctx.record(TraceEvent::Rotation(rotation.clone()));
        ctx.count(Counters::Rotations);

        let deleted = RotationEliminator::new(mode).eliminate(ctx, &rotation)?;
        if deleted == 0 {
            return Err(Error::InvariantViolation(format!(
                "eliminating rotation {rotation} deleted nothing"
            )));
        }
        Ok(PhaseResult::Repeat)
    }

    fn state(&self) -> EngineState {
        EngineState::ReducingPhase2
    }

    fn name(&self) -> &str {
        "Rotation"
    }
}
