// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matching context: everything one run of the engine owns.
//!
//! The context combines:
//! - the [`PreferenceTable`] mutated in place by both phases
//! - the [`Trace`] of events
//! - per-run [`Statistics`]
//! - the selection strategy and rotation mode from [`EngineConfig`]
//!
//! A context is used by exactly one run; nothing in it is shared.

pub mod config;

pub use config::EngineConfig;

use crate::error::Result;
use crate::phases::RotationMode;
use crate::state::{Counters, Statistics};
use crate::strategy::SelectionStrategy;
use crate::table::{PersonId, PreferenceTable};
use crate::trace::{Trace, TraceEvent};
use tracing::debug;

/// State of one engine run.
#[derive(Debug)]
pub struct MatchingContext {
    /// The preference table being reduced
    pub table: PreferenceTable,
    /// Ordered event log
    pub trace: Trace,
    pub statistics: Statistics,
    strategy: Box<dyn SelectionStrategy>,
    rotation_mode: RotationMode,
}

impl MatchingContext {
    /// Create a context for `table` using the named strategy in `config`.
    pub fn new(table: PreferenceTable, config: EngineConfig) -> Self {
        Self::with_strategy(table, config.selection.strategy(), config.rotation_mode)
    }

    /// Create a context with an arbitrary selection strategy.
    pub fn with_strategy(
        table: PreferenceTable,
        strategy: Box<dyn SelectionStrategy>,
        rotation_mode: RotationMode,
    ) -> Self {
        Self {
            table,
            trace: Trace::new(),
            statistics: Statistics::new(),
            strategy,
            rotation_mode,
        }
    }

    pub fn strategy(&self) -> &dyn SelectionStrategy {
        self.strategy.as_ref()
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    /// Paired deletion with trace and counter bookkeeping.
    ///
    /// `a` is the participant whose list is being truncated.
    pub fn delete_pair(&mut self, a: PersonId, b: PersonId) -> Result<()> {
        self.table.delete_pair(a, b)?;
        debug!(%a, %b, remaining = self.table.total_remaining(), "deletion");
        self.trace.record(TraceEvent::Deletion { a, b });
        self.statistics.increment_counter(Counters::Deletions);
        Ok(())
    }

    pub(crate) fn record(&mut self, event: TraceEvent) {
        self.trace.record(event);
    }

    pub(crate) fn count(&mut self, counter: Counters) {
        self.statistics.increment_counter(counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PreferenceTable {
        PreferenceTable::from_indices(&[&[1, 2, 3], &[2, 0, 3], &[0, 1, 3], &[0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_context_new() {
        let ctx = MatchingContext::new(table(), EngineConfig::default());
        assert!(ctx.trace.is_empty());
        assert_eq!(ctx.strategy().name(), "ascending");
        assert_eq!(ctx.rotation_mode(), RotationMode::Cycle);
    }

    #[test]
    fn test_delete_pair_records_event() {
        let mut ctx = MatchingContext::new(table(), EngineConfig::default());
        ctx.delete_pair(PersonId::new(2), PersonId::new(3)).unwrap();

        assert_eq!(ctx.statistics.get(Counters::Deletions), 1);
        assert_eq!(
            ctx.trace.events(),
            &[TraceEvent::Deletion {
                a: PersonId::new(2),
                b: PersonId::new(3)
            }]
        );
        assert!(!ctx.table.contains(PersonId::new(3), PersonId::new(2)));
    }

    #[test]
    fn test_failed_delete_records_nothing() {
        let mut ctx = MatchingContext::new(table(), EngineConfig::default());
        ctx.delete_pair(PersonId::new(0), PersonId::new(1)).unwrap();
        assert!(ctx.delete_pair(PersonId::new(0), PersonId::new(1)).is_err());
        assert_eq!(ctx.trace.len(), 1);
        assert_eq!(ctx.statistics.get(Counters::Deletions), 1);
    }
}
