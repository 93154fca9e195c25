// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! ProposalPhase - Phase 1, sequential proposals down to the first-reduced table.
//!
//! Each round picks one free participant `x` with a non-empty list and lets
//! `x` propose to its head `y`:
//!
//! 1. whoever `y` currently holds is rejected and becomes free
//! 2. `x` becomes semi-engaged
//! 3. `y` deletes every candidate it ranks below `x` (paired deletion)
//!
//! A paired deletion that removes a semi-engaged participant's head frees that
//! participant, on either side of the pair. With that rule at most one
//! semi-engaged participant has any given head, which is why step 1 can reject
//! unconditionally.

use crate::context::MatchingContext;
use crate::engine::phase::terminal_state;
use crate::engine::{EngineState, Phase, PhaseResult};
use crate::error::{Error, Result};
use crate::state::Counters;
use crate::table::{Availability, PersonId, PreferenceTable};
use crate::trace::TraceEvent;
use tracing::{debug, info};

/// Phase 1 of Irving's algorithm.
#[derive(Debug, Default)]
pub struct ProposalPhase;

impl Phase for ProposalPhase {
    fn try_phase(&mut self, ctx: &mut MatchingContext, round: usize) -> Result<PhaseResult> {
        let next = {
            let table = &ctx.table;
            ctx.strategy().select(table, &|p| {
                table.availability(p) == Availability::Free && !table.is_list_empty(p)
            })
        };

        match next {
            Some(x) => {
                propose(ctx, x)?;
                Ok(PhaseResult::Repeat)
            }
            None => {
                info!(
                    proposals = round,
                    remaining = ctx.table.total_remaining(),
                    "phase 1 complete"
                );
                Ok(terminal_state(ctx).unwrap_or(PhaseResult::Advance))
            }
        }
    }

    fn state(&self) -> EngineState {
        EngineState::ReducingPhase1
    }

    fn name(&self) -> &str {
        "Proposal"
    }
}

/// Let `x` propose to its head and truncate the receiver's list.
pub fn propose(ctx: &mut MatchingContext, x: PersonId) -> Result<()> {
    let y = ctx.table.head(x).ok_or_else(|| {
        Error::InvariantViolation(format!("{x} was selected to propose with an empty list"))
    })?;

    if let Some(z) = holder_of(&ctx.table, y)? {
        release(ctx, z, y);
    }

    ctx.table.set_availability(x, Availability::SemiEngaged);
    debug!(proposer = %x, receiver = %y, "proposal");
    ctx.record(TraceEvent::Proposal {
        proposer: x,
        receiver: y,
    });
    ctx.count(Counters::Proposals);

    let position = ctx.table.present_rank_of(y, x).ok_or_else(|| {
        Error::InvariantViolation(format!("{x} heads towards {y}, but {y} does not list {x}"))
    })?;
    for w in ctx.table.entries_after(y, Some(position)) {
        release_if_holding(ctx, w, y);
        release_if_holding(ctx, y, w);
        ctx.delete_pair(y, w)?;
    }
    Ok(())
}

/// The semi-engaged participant whose head is `receiver`, if any.
///
/// # Errors
///
/// [`Error::InvariantViolation`] if more than one such participant exists.
pub fn holder_of(table: &PreferenceTable, receiver: PersonId) -> Result<Option<PersonId>> {
    let mut holders = table.participants().filter(|&p| {
        table.availability(p) == Availability::SemiEngaged && table.head(p) == Some(receiver)
    });
    let first = holders.next();
    if let Some(second) = holders.next() {
        debug_assert!(
            false,
            "{receiver} holds proposals from both {first:?} and {second}"
        );
        return Err(Error::InvariantViolation(format!(
            "{receiver} holds more than one proposal"
        )));
    }
    Ok(first)
}

/// Free `proposer` if `receiver` is the head it is semi-engaged to.
fn release_if_holding(ctx: &mut MatchingContext, proposer: PersonId, receiver: PersonId) {
    if ctx.table.availability(proposer) == Availability::SemiEngaged
        && ctx.table.head(proposer) == Some(receiver)
    {
        release(ctx, proposer, receiver);
    }
}

fn release(ctx: &mut MatchingContext, proposer: PersonId, receiver: PersonId) {
    ctx.table.set_availability(proposer, Availability::Free);
    debug!(rejected = %proposer, %receiver, "rejection");
    ctx.record(TraceEvent::Rejection {
        rejected: proposer,
        receiver,
    });
    ctx.count(Counters::Rejections);
}
