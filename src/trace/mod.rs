// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ordered event log of one engine run.
//!
//! The reducers append an event for every proposal, rejection, paired
//! deletion and rotation, in the order they happen. Reports are rendered from
//! this log, and tests can assert on it instead of only the final outcome.
//!
//! Checkpoints mark positions in the log (the engine sets one when Phase 2
//! begins) so a caller can slice out the events of a single phase.

use crate::phases::Rotation;
use crate::table::PersonId;

/// A single entry in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// `proposer` proposed to `receiver`, who now holds the proposal.
    Proposal {
        proposer: PersonId,
        receiver: PersonId,
    },
    /// `receiver` revoked the proposal it held from `rejected`.
    Rejection {
        rejected: PersonId,
        receiver: PersonId,
    },
    /// The pair `{a,b}` was removed from both lists. `a` is the side whose
    /// list was being truncated.
    Deletion { a: PersonId, b: PersonId },
    /// Phase 1 ended with a table that needs rotations.
    EnterPhaseTwo,
    /// A rotation about to be eliminated.
    Rotation(Rotation),
}

/// The event log.
#[derive(Debug, Default)]
pub struct Trace {
    /// All events recorded so far
    events: Vec<TraceEvent>,
    /// Stack of checkpoint indices
    checkpoints: Vec<usize>,
}

impl Trace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a checkpoint at the current position and return it.
    pub fn checkpoint(&mut self) -> usize {
        let checkpoint = self.events.len();
        self.checkpoints.push(checkpoint);
        checkpoint
    }

    pub(crate) fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// All events in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Events recorded since the most recent checkpoint (all events if none).
    pub fn events_since_checkpoint(&self) -> &[TraceEvent] {
        let start = self.checkpoints.last().copied().unwrap_or(0);
        &self.events[start..]
    }

    /// Events recorded before the first checkpoint (all events if none).
    pub fn events_before_checkpoint(&self) -> &[TraceEvent] {
        let end = self.checkpoints.first().copied().unwrap_or(self.events.len());
        &self.events[..end]
    }

    /// The rotations in elimination order.
    pub fn rotations(&self) -> impl Iterator<Item = &Rotation> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Rotation(r) => Some(r),
            _ => None,
        })
    }

    /// Get the current number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deletion(a: usize, b: usize) -> TraceEvent {
        TraceEvent::Deletion {
            a: PersonId::new(a),
            b: PersonId::new(b),
        }
    }

    #[test]
    fn test_trace_new() {
        let trace = Trace::new();
        assert!(trace.is_empty());
        assert!(trace.events_since_checkpoint().is_empty());
    }

    #[test]
    fn test_checkpoint_slices() {
        let mut trace = Trace::new();
        trace.record(deletion(0, 1));
        trace.record(deletion(2, 3));

        assert_eq!(trace.checkpoint(), 2);
        trace.record(TraceEvent::EnterPhaseTwo);
        trace.record(deletion(1, 2));

        assert_eq!(trace.len(), 4);
        assert_eq!(
            trace.events_before_checkpoint(),
            &[deletion(0, 1), deletion(2, 3)]
        );
        assert_eq!(
            trace.events_since_checkpoint(),
            &[TraceEvent::EnterPhaseTwo, deletion(1, 2)]
        );
    }

    #[test]
    fn test_without_checkpoint_both_slices_cover_everything() {
        let mut trace = Trace::new();
        trace.record(deletion(0, 1));
        assert_eq!(trace.events_since_checkpoint().len(), 1);
        assert_eq!(trace.events_before_checkpoint().len(), 1);
        assert_eq!(trace.rotations().count(), 0);
    }
}
