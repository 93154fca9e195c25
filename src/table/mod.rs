// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The mutable preference table shared by both phases.
//!
//! Every participant owns a fixed-length list of candidates in original rank
//! order. Entries are never removed from the list; a deletion turns the slot
//! into a tombstone so that positions stay stable while the reducers iterate
//! over "everything after position K".
//!
//! # Symmetric presence
//!
//! `b` is present in `a`'s list if and only if `a` is present in `b`'s list.
//! The only mutation that touches list contents is [`PreferenceTable::delete_pair`],
//! which removes both directions together. Nothing can be undeleted, so the
//! total number of present entries only ever decreases.

pub mod person;

pub use person::{Availability, PersonId};

use crate::error::{Error, Result};
use std::collections::HashSet;

/// One cell of a preference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Present(PersonId),
    Deleted,
}

/// A participant's ranked list plus its count of present entries.
#[derive(Debug, Clone)]
struct PreferenceList {
    slots: Vec<Slot>,
    live: usize,
}

impl PreferenceList {
    fn new(candidates: &[PersonId]) -> Self {
        Self {
            slots: candidates.iter().map(|&c| Slot::Present(c)).collect(),
            live: candidates.len(),
        }
    }

    fn present(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.slots.iter().filter_map(|slot| match *slot {
            Slot::Present(p) => Some(p),
            Slot::Deleted => None,
        })
    }

    fn present_position(&self, candidate: PersonId) -> Option<usize> {
        self.slots
            .iter()
            .position(|&s| s == Slot::Present(candidate))
    }
}

/// Preference lists and availability for all participants of one run.
#[derive(Debug, Clone)]
pub struct PreferenceTable {
    lists: Vec<PreferenceList>,
    availability: Vec<Availability>,
    remaining: usize,
}

impl PreferenceTable {
    /// Build a validated table from zero-based preference lists.
    ///
    /// `lists[i]` is participant `i`'s ranking, most preferred first.
    ///
    /// # Errors
    ///
    /// Rejects an odd participant count, out-of-range ids, self references,
    /// duplicate candidates and asymmetric acceptability. No table is created
    /// when any of these hold.
    pub fn new(lists: Vec<Vec<PersonId>>) -> Result<Self> {
        let count = lists.len();
        if count % 2 != 0 {
            return Err(Error::OddParticipantCount { count });
        }

        // One set per list, used both for duplicate and symmetry checks.
        let mut accepted: Vec<HashSet<PersonId>> = Vec::with_capacity(count);
        for (i, list) in lists.iter().enumerate() {
            let person = PersonId::new(i);
            let mut set = HashSet::with_capacity(list.len());
            for &candidate in list {
                if candidate.index() >= count {
                    return Err(Error::IdOutOfRange {
                        person,
                        candidate,
                        count,
                    });
                }
                if candidate == person {
                    return Err(Error::SelfReference { person });
                }
                if !set.insert(candidate) {
                    return Err(Error::DuplicateCandidate { person, candidate });
                }
            }
            accepted.push(set);
        }
        for (i, list) in lists.iter().enumerate() {
            let person = PersonId::new(i);
            for &candidate in list {
                if !accepted[candidate.index()].contains(&person) {
                    return Err(Error::Asymmetric {
                        person,
                        candidate,
                    });
                }
            }
        }

        let remaining = lists.iter().map(Vec::len).sum();
        Ok(Self {
            lists: lists.iter().map(|l| PreferenceList::new(l)).collect(),
            availability: vec![Availability::Free; count],
            remaining,
        })
    }

    /// Convenience constructor from raw zero-based indices.
    pub fn from_indices(lists: &[&[usize]]) -> Result<Self> {
        Self::new(
            lists
                .iter()
                .map(|l| l.iter().copied().map(PersonId::new).collect())
                .collect(),
        )
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// All participant ids in ascending order.
    pub fn participants(&self) -> impl DoubleEndedIterator<Item = PersonId> {
        (0..self.lists.len()).map(PersonId::new)
    }

    /// First present entry of `id`'s list.
    pub fn head(&self, id: PersonId) -> Option<PersonId> {
        self.lists[id.index()].present().next()
    }

    /// First present entry strictly after the head.
    pub fn second(&self, id: PersonId) -> Option<PersonId> {
        self.lists[id.index()].present().nth(1)
    }

    /// Last present entry of `id`'s list.
    pub fn last(&self, id: PersonId) -> Option<PersonId> {
        self.lists[id.index()].present().last()
    }

    /// True when every entry of `id`'s list has been deleted.
    pub fn is_list_empty(&self, id: PersonId) -> bool {
        self.lists[id.index()].live == 0
    }

    /// True when exactly one entry of `id`'s list remains.
    pub fn is_singleton(&self, id: PersonId) -> bool {
        self.lists[id.index()].live == 1
    }

    /// Number of present entries in `id`'s list.
    pub fn list_len(&self, id: PersonId) -> usize {
        self.lists[id.index()].live
    }

    /// Present entries of `id`'s list, most preferred first.
    pub fn remaining(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.lists[id.index()].present()
    }

    /// Whether `other` is still present in `id`'s list.
    pub fn contains(&self, id: PersonId, other: PersonId) -> bool {
        self.lists[id.index()].present_position(other).is_some()
    }

    /// Position of `other` in `id`'s list, only if still present.
    pub fn present_rank_of(&self, id: PersonId, other: PersonId) -> Option<usize> {
        self.lists[id.index()].present_position(other)
    }

    /// Present entries of `id`'s list strictly after `position`.
    ///
    /// `None` means "from the start", so every present entry is returned.
    pub fn entries_after(&self, id: PersonId, position: Option<usize>) -> Vec<PersonId> {
        let start = position.map_or(0, |p| p + 1);
        self.lists[id.index()]
            .slots
            .iter()
            .skip(start)
            .filter_map(|slot| match *slot {
                Slot::Present(p) => Some(p),
                Slot::Deleted => None,
            })
            .collect()
    }

    /// Delete `b` from `a`'s list and `a` from `b`'s list.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if either direction is already gone.
    pub fn delete_pair(&mut self, a: PersonId, b: PersonId) -> Result<()> {
        let a_pos = self.lists[a.index()].present_position(b);
        let b_pos = self.lists[b.index()].present_position(a);
        let (Some(a_pos), Some(b_pos)) = (a_pos, b_pos) else {
            return Err(Error::InvariantViolation(format!(
                "paired deletion of {{{a},{b}}} found no reciprocal entry"
            )));
        };

        let a_list = &mut self.lists[a.index()];
        a_list.slots[a_pos] = Slot::Deleted;
        a_list.live -= 1;
        let b_list = &mut self.lists[b.index()];
        b_list.slots[b_pos] = Slot::Deleted;
        b_list.live -= 1;

        self.remaining -= 2;
        Ok(())
    }

    /// Total present entries across all lists.
    pub fn total_remaining(&self) -> usize {
        self.remaining
    }

    pub fn exists_empty(&self) -> bool {
        self.lists.iter().any(|l| l.live == 0)
    }

    pub fn all_singleton(&self) -> bool {
        self.lists.iter().all(|l| l.live == 1)
    }

    pub fn availability(&self, id: PersonId) -> Availability {
        self.availability[id.index()]
    }

    pub fn set_availability(&mut self, id: PersonId, availability: Availability) {
        self.availability[id.index()] = availability;
    }

    /// Present entries of every list, for comparing table states.
    pub fn snapshot(&self) -> Vec<Vec<PersonId>> {
        self.lists.iter().map(|l| l.present().collect()).collect()
    }

    /// Re-derive symmetric presence from scratch.
    ///
    /// The reducers never call this; it exists for tests and debug checks.
    pub fn check_symmetry(&self) -> Result<()> {
        for a in self.participants() {
            for b in self.remaining(a) {
                if !self.contains(b, a) {
                    return Err(Error::InvariantViolation(format!(
                        "{b} is present in {a}'s list but not the reverse"
                    )));
                }
            }
        }
        Ok(())
    }
}
