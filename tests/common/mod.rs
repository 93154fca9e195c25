// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.
//!
//! Fixtures are zero-based; file contents and printed output are 1-based.

#![allow(dead_code)]

use stable_roommates::engine::{Matching, MatchingEngine, Outcome};
use stable_roommates::phases::RotationMode;
use stable_roommates::strategy::FixedOrder;
use stable_roommates::{MatchingContext, PersonId, PreferenceTable};

/// Six participants with two stable matchings.
pub const SIX: &[&[usize]] = &[
    &[2, 3, 1, 5, 4],
    &[5, 4, 3, 0, 2],
    &[1, 3, 4, 0, 5],
    &[4, 1, 2, 5, 0],
    &[2, 0, 1, 3, 5],
    &[4, 0, 2, 3, 1],
];

/// `SIX` in the input file format.
pub const SIX_FILE: &str = "1\t3 4 2 6 5\n\
                            2\t6 5 4 1 3\n\
                            3\t2 4 5 1 6\n\
                            4\t5 2 3 6 1\n\
                            5\t3 1 2 4 6\n\
                            6\t5 1 3 4 2\n";

/// Three participants in a preference cycle, all ranking the fourth last.
pub const ODD_CYCLE: &[&[usize]] = &[&[1, 2, 3], &[2, 0, 3], &[0, 1, 3], &[0, 1, 2]];

/// Mutual first choices: Phase 1 alone decides it.
pub const MUTUAL: &[&[usize]] = &[&[1, 2, 3], &[0, 2, 3], &[3, 0, 1], &[2, 0, 1]];

/// Six participants with exactly one stable matching, {0,3} {1,4} {2,5},
/// reached through two rotations.
pub const UNIQUE: &[&[usize]] = &[
    &[5, 2, 4, 3, 1],
    &[4, 5, 0, 2, 3],
    &[1, 5, 3, 0, 4],
    &[0, 4, 5, 2, 1],
    &[3, 5, 1, 2, 0],
    &[2, 1, 3, 4, 0],
];

/// Six participants with no stable matching, detected only in Phase 2.
pub const NO_MATCHING: &[&[usize]] = &[
    &[2, 5, 3, 4, 1],
    &[0, 5, 4, 2, 3],
    &[3, 0, 5, 1, 4],
    &[5, 0, 2, 1, 4],
    &[1, 0, 3, 5, 2],
    &[4, 1, 0, 2, 3],
];

pub fn p(i: usize) -> PersonId {
    PersonId::new(i)
}

pub fn table(lists: &[&[usize]]) -> PreferenceTable {
    PreferenceTable::from_indices(lists).unwrap()
}

pub fn pairs(list: &[(usize, usize)]) -> Vec<(PersonId, PersonId)> {
    list.iter().map(|&(a, b)| (p(a), p(b))).collect()
}

pub fn snapshot(lists: &[&[usize]]) -> Vec<Vec<PersonId>> {
    lists
        .iter()
        .map(|list| list.iter().copied().map(p).collect())
        .collect()
}

/// Run the full algorithm with a fixed selection order.
pub fn run_in_order(
    lists: &[&[usize]],
    order: &[usize],
    mode: RotationMode,
) -> (Outcome, MatchingContext) {
    let mut ctx = MatchingContext::with_strategy(
        table(lists),
        Box::new(FixedOrder::from_indices(order)),
        mode,
    );
    let outcome = MatchingEngine::irving().run(&mut ctx).unwrap();
    (outcome, ctx)
}

/// Position of `other` in `person`'s original list.
fn rank(lists: &[&[usize]], person: usize, other: usize) -> Option<usize> {
    lists[person].iter().position(|&c| c == other)
}

/// Check that `matching` pairs everyone with someone they listed, and that no
/// two unmatched participants would both rather be together.
pub fn is_stable(lists: &[&[usize]], matching: &Matching) -> bool {
    let n = lists.len();
    if matching.len() * 2 != n {
        return false;
    }
    let mut partner = vec![usize::MAX; n];
    for &(a, b) in matching.pairs() {
        if rank(lists, a.index(), b.index()).is_none() {
            return false;
        }
        partner[a.index()] = b.index();
        partner[b.index()] = a.index();
    }
    if partner.contains(&usize::MAX) {
        return false;
    }
    for a in 0..n {
        for &b in lists[a] {
            if b == partner[a] {
                continue;
            }
            let a_prefers = rank(lists, a, b) < rank(lists, a, partner[a]);
            let b_prefers = rank(lists, b, a) < rank(lists, b, partner[b]);
            if a_prefers && b_prefers {
                return false;
            }
        }
    }
    true
}

/// Every stable matching of a small instance, found by enumeration.
pub fn all_stable_matchings(lists: &[&[usize]]) -> Vec<Vec<(usize, usize)>> {
    fn extend(
        lists: &[&[usize]],
        used: &mut [bool],
        current: &mut Vec<(usize, usize)>,
        found: &mut Vec<Vec<(usize, usize)>>,
    ) {
        let Some(a) = used.iter().position(|&u| !u) else {
            if stable_pairs(lists, current) {
                found.push(current.clone());
            }
            return;
        };
        used[a] = true;
        for &b in lists[a] {
            if !used[b] {
                used[b] = true;
                current.push((a.min(b), a.max(b)));
                extend(lists, used, current, found);
                current.pop();
                used[b] = false;
            }
        }
        used[a] = false;
    }

    let mut found = Vec::new();
    extend(lists, &mut vec![false; lists.len()], &mut Vec::new(), &mut found);
    for matching in &mut found {
        matching.sort_unstable();
    }
    found.sort_unstable();
    found
}

fn stable_pairs(lists: &[&[usize]], matching: &[(usize, usize)]) -> bool {
    let mut partner = vec![0; lists.len()];
    for &(a, b) in matching {
        partner[a] = b;
        partner[b] = a;
    }
    (0..lists.len()).all(|a| {
        lists[a].iter().all(|&b| {
            b == partner[a]
                || !(rank(lists, a, b) < rank(lists, a, partner[a])
                    && rank(lists, b, a) < rank(lists, b, partner[b]))
        })
    })
}

/// Zero-based pairs of a matching, smaller id first, sorted.
pub fn indices(matching: &Matching) -> Vec<(usize, usize)> {
    let mut list: Vec<_> = matching
        .pairs()
        .iter()
        .map(|&(a, b)| (a.index(), b.index()))
        .collect();
    list.sort_unstable();
    list
}

/// Small deterministic generator for random instances.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            items.swap(i, self.below(i + 1));
        }
    }
}

/// A random symmetric instance with `n` participants, where each pair is
/// mutually acceptable with probability `percent / 100`.
pub fn random_instance(rng: &mut XorShift, n: usize, percent: usize) -> Vec<Vec<usize>> {
    let mut lists = vec![Vec::new(); n];
    for a in 0..n {
        for b in a + 1..n {
            if rng.below(100) < percent {
                lists[a].push(b);
                lists[b].push(a);
            }
        }
    }
    for list in &mut lists {
        rng.shuffle(list);
    }
    lists
}

pub fn as_slices(lists: &[Vec<usize>]) -> Vec<&[usize]> {
    lists.iter().map(Vec::as_slice).collect()
}

/// What [`list_scan_run`] reports for one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScanRun {
    pub stable: bool,
    /// Present entries after Phase 1, zero-based.
    pub first_reduced: Vec<Vec<usize>>,
    /// Present entries when the run stopped, zero-based.
    pub final_table: Vec<Vec<usize>>,
}

/// An independent, deliberately naive solver: every lookup rescans the lists,
/// and Phase 2 cuts one list at a time, eliminating the whole traversed chain.
///
/// `None` when the scan runs off the table (a missing head, second choice or
/// symmetric entry) or takes implausibly many steps.
pub fn list_scan_run(lists: &[&[usize]]) -> Option<ListScanRun> {
    let n = lists.len();
    let mut prefs: Vec<Vec<Option<usize>>> = lists
        .iter()
        .map(|list| list.iter().copied().map(Some).collect())
        .collect();

    fn head(list: &[Option<usize>]) -> Option<usize> {
        list.iter().flatten().copied().next()
    }
    fn second(list: &[Option<usize>]) -> Option<usize> {
        list.iter().flatten().copied().nth(1)
    }
    fn live(list: &[Option<usize>]) -> usize {
        list.iter().flatten().count()
    }
    fn find(list: &[Option<usize>], who: usize) -> Option<usize> {
        list.iter().position(|&slot| slot == Some(who))
    }
    fn any_empty(prefs: &[Vec<Option<usize>>]) -> bool {
        prefs.iter().any(|l| live(l) == 0)
    }
    fn all_single(prefs: &[Vec<Option<usize>>]) -> bool {
        prefs.iter().all(|l| live(l) == 1)
    }
    fn present(prefs: &[Vec<Option<usize>>]) -> Vec<Vec<usize>> {
        prefs
            .iter()
            .map(|list| list.iter().flatten().copied().collect())
            .collect()
    }

    let mut free = vec![true; n];
    let mut steps = 0;
    while let Some(x) = (0..n).find(|&i| free[i] && live(&prefs[i]) > 0) {
        steps += 1;
        if steps > 10_000 {
            return None;
        }
        let y = head(&prefs[x])?;
        if let Some(z) = (0..n).find(|&i| !free[i] && head(&prefs[i]) == Some(y)) {
            free[z] = true;
        }
        free[x] = false;
        let from = find(&prefs[y], x).map_or(0, |k| k + 1);
        for i in from..prefs[y].len() {
            if let Some(d) = prefs[y][i] {
                prefs[y][i] = None;
                let k = find(&prefs[d], y)?;
                prefs[d][k] = None;
            }
        }
    }
    let first_reduced = present(&prefs);

    while !all_single(&prefs) && !any_empty(&prefs) {
        steps += 1;
        if steps > 10_000 {
            return None;
        }
        let start = (0..n).find(|&i| live(&prefs[i]) > 1)?;
        let mut xs = vec![start];
        let mut ys = vec![head(&prefs[start])?];
        let mut s = second(&prefs[start])?;
        while !ys.contains(&s) {
            let next_x = (0..n).find(|&i| head(&prefs[i]) == Some(s))?;
            xs.push(next_x);
            ys.push(s);
            s = second(&prefs[next_x])?;
        }
        for (i, &y) in ys.iter().enumerate() {
            let cut = if i == 0 { xs[xs.len() - 1] } else { xs[i - 1] };
            let from = find(&prefs[y], cut).map_or(0, |k| k + 1);
            for j in from..prefs[y].len() {
                if let Some(v) = prefs[y][j] {
                    let k = find(&prefs[v], y)?;
                    prefs[v][k] = None;
                    prefs[y][j] = None;
                }
            }
        }
    }

    Some(ListScanRun {
        stable: !any_empty(&prefs),
        first_reduced,
        final_table: present(&prefs),
    })
}
