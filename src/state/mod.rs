// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-run bookkeeping that is not part of the preference table.

pub mod statistics;

pub use statistics::{Counters, Statistics};
