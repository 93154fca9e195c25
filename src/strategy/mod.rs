// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Participant selection order.
//!
//! Phase 1 picks "any free participant with a non-empty list" and Phase 2
//! picks "any participant with at least two entries". The algorithm is correct
//! for every choice, so the choice is a strategy. [`AscendingOrder`] scans by
//! increasing id and reproduces the classic output line for line.

use crate::table::{PersonId, PreferenceTable};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Debug;

/// Chooses the next participant satisfying a predicate.
pub trait SelectionStrategy: Debug {
    /// Return the first participant, in this strategy's order, for which
    /// `eligible` holds.
    fn select(
        &self,
        table: &PreferenceTable,
        eligible: &dyn Fn(PersonId) -> bool,
    ) -> Option<PersonId>;

    fn name(&self) -> &str;
}

/// Scan ids 0, 1, 2, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct AscendingOrder;

impl SelectionStrategy for AscendingOrder {
    fn select(
        &self,
        table: &PreferenceTable,
        eligible: &dyn Fn(PersonId) -> bool,
    ) -> Option<PersonId> {
        table.participants().find(|&p| eligible(p))
    }

    fn name(&self) -> &str {
        "ascending"
    }
}

/// Scan ids n-1, n-2, ..., 0
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendingOrder;

impl SelectionStrategy for DescendingOrder {
    fn select(
        &self,
        table: &PreferenceTable,
        eligible: &dyn Fn(PersonId) -> bool,
    ) -> Option<PersonId> {
        table.participants().rev().find(|&p| eligible(p))
    }

    fn name(&self) -> &str {
        "descending"
    }
}

/// Scan a caller-supplied order, then any ids it left out in ascending order.
#[derive(Debug, Clone)]
pub struct FixedOrder {
    order: Vec<PersonId>,
}

impl FixedOrder {
    pub fn new(order: Vec<PersonId>) -> Self {
        Self { order }
    }

    pub fn from_indices(order: &[usize]) -> Self {
        Self::new(order.iter().copied().map(PersonId::new).collect())
    }
}

impl SelectionStrategy for FixedOrder {
    fn select(
        &self,
        table: &PreferenceTable,
        eligible: &dyn Fn(PersonId) -> bool,
    ) -> Option<PersonId> {
        let n = table.len();
        self.order
            .iter()
            .copied()
            .filter(|p| p.index() < n)
            .chain(table.participants())
            .find(|&p| eligible(p))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Named orders selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionOrder {
    #[default]
    Ascending,
    Descending,
}

impl SelectionOrder {
    pub fn strategy(self) -> Box<dyn SelectionStrategy> {
        match self {
            SelectionOrder::Ascending => Box::new(AscendingOrder),
            SelectionOrder::Descending => Box::new(DescendingOrder),
        }
    }
}
