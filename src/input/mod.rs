// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Preference file parsing.
//!
//! One participant per line, 1-based ids:
//!
//! ```text
//! 1	3 4 2 6 5
//! 2	6 5 4 1 3
//! ```
//!
//! The first number is the participant, the rest is their ranking, most
//! preferred first. Any whitespace separates numbers. Blank lines and lines
//! starting with `#` are skipped. Lines may appear in any order, but the ids
//! must cover `1..=n` exactly once.

use crate::error::{Error, Result};
use crate::table::{PersonId, PreferenceTable};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse preference lines into zero-based lists indexed by participant.
///
/// Ids are checked against the number of lines before any list is placed, so
/// an id larger than that is reported as a gap in `1..=n`.
pub fn parse_preferences(text: &str) -> Result<Vec<Vec<PersonId>>> {
    let mut entries: Vec<(PersonId, Vec<PersonId>, usize)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let person = match tokens.next() {
            Some(token) => parse_id(token, line)?,
            None => continue,
        };
        let preferences = tokens
            .map(|token| parse_id(token, line))
            .collect::<Result<Vec<_>>>()?;
        entries.push((person, preferences, line));
    }

    let count = entries.len();
    let mut rows: Vec<Option<Vec<PersonId>>> = vec![None; count];
    for (person, preferences, line) in entries {
        let Some(slot) = rows.get_mut(person.index()) else {
            debug!(%person, line, count, "participant id beyond the number of lines");
            continue;
        };
        if slot.is_some() {
            return Err(Error::DuplicateParticipant {
                id: person.label(),
                line,
            });
        }
        *slot = Some(preferences);
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.ok_or(Error::MissingParticipant { id: i + 1 }))
        .collect()
}

fn parse_id(token: &str, line: usize) -> Result<PersonId> {
    let label: usize = token.parse().map_err(|_| Error::Parse {
        line,
        message: format!("`{token}` is not a participant id"),
    })?;
    PersonId::from_label(label).ok_or_else(|| Error::Parse {
        line,
        message: "participant ids start at 1".to_string(),
    })
}

/// Parse and validate a table from text.
pub fn parse_table(text: &str) -> Result<PreferenceTable> {
    let table = PreferenceTable::new(parse_preferences(text)?)?;
    debug!(participants = table.len(), entries = table.total_remaining(), "table loaded");
    Ok(table)
}

/// Read, parse and validate a preference file.
pub fn load_table(path: &Path) -> Result<PreferenceTable> {
    parse_table(&fs::read_to_string(path)?)
}
