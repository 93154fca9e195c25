// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rendering a finished run as text or JSON.
//!
//! The text form prints the Phase 1 proposals and deletions, each rotation
//! eliminated in Phase 2, and the result, all with 1-based ids:
//!
//! ```text
//! # proposal: 1 --> 3
//! # deletion: {3,6}
//! - please embark to phase 2.
//! #rotation(1): {1,3} {4,2}
//! - result: stable matching found:
//! {1,6}
//! ```

use crate::context::EngineConfig;
use crate::engine::{EngineState, Matching, Outcome};
use crate::error::{Error, Result};
use crate::state::Statistics;
use crate::trace::{Trace, TraceEvent};
use clap::ValueEnum;
use serde::Serialize;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Render the event log (unless `quiet`) followed by the result lines.
pub fn render_text(trace: &Trace, outcome: &Outcome, quiet: bool) -> String {
    let mut out = String::new();
    if !quiet {
        write_events(&mut out, trace);
    }
    write_result(&mut out, outcome);
    out
}

fn write_events(out: &mut String, trace: &Trace) {
    let mut in_phase_two = false;
    let mut rotations = 0;
    for event in trace.events() {
        match event {
            TraceEvent::Proposal { proposer, receiver } => {
                out.push_str(&format!("# proposal: {proposer} --> {receiver}\n"));
            }
            TraceEvent::Deletion { a, b } if !in_phase_two => {
                out.push_str(&format!("# deletion: {{{a},{b}}}\n"));
            }
            TraceEvent::EnterPhaseTwo => {
                in_phase_two = true;
                out.push_str("- please embark to phase 2.\n");
            }
            TraceEvent::Rotation(rotation) => {
                rotations += 1;
                out.push_str(&format!("#rotation({rotations}): {rotation}\n"));
            }
            TraceEvent::Deletion { .. } | TraceEvent::Rejection { .. } => {}
        }
    }
}

fn write_result(out: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Stable(matching) => {
            out.push_str("- result: stable matching found:\n");
            for (a, b) in matching.pairs() {
                out.push_str(&format!("{{{a},{b}}}\n"));
            }
        }
        Outcome::Unstable => out.push_str("- result: no stable matching.\n"),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'static str,
    pairs: Option<&'a Matching>,
    states: &'a [EngineState],
    statistics: &'a Statistics,
    config: &'a EngineConfig,
}

/// Render the outcome as a pretty-printed JSON document.
pub fn render_json(
    outcome: &Outcome,
    states: &[EngineState],
    statistics: &Statistics,
    config: &EngineConfig,
) -> Result<String> {
    let report = JsonReport {
        result: if outcome.is_stable() {
            "stable"
        } else {
            "unstable"
        },
        pairs: outcome.matching(),
        states,
        statistics,
        config,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| Error::InvariantViolation(format!("report serialization failed: {e}")))
}
