//! CNF encodings for warning tiles.
//!
//! A warning tile reports how many of its neighbours hold pits but not
//! which ones. When counting alone cannot place the pits, the neighbourhood
//! is reduced to exactly three unknowns and the standard "exactly k of 3"
//! clause set is told to the knowledge base.

use crate::logic::{Clause, Location, SignedProposition};
use std::collections::BTreeSet;

/// What a warning tile tells us about its neighbours
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningDeduction {
    /// These neighbours are certainly pits
    Pits(Vec<Location>),
    /// Clauses to tell the knowledge base
    Clauses(Vec<Clause>),
    /// The neighbourhood has no encodable shape
    Undetermined,
}

/// Deduce pit placement around a tile that warns of `pits` adjacent pits.
///
/// First eliminates neighbours already known to be safe: if exactly `pits`
/// candidates remain, they are all pits. Otherwise a four-neighbour tile
/// drops one known-safe neighbour (the way the agent came in), and three
/// remaining neighbours get the exactly-`pits`-of-3 encoding.
pub fn deduce_adjacent_pits(
    neighbors: &BTreeSet<Location>,
    known_safe: &BTreeSet<Location>,
    pits: usize,
) -> WarningDeduction {
    let candidates: Vec<Location> = neighbors
        .iter()
        .filter(|loc| !known_safe.contains(loc))
        .copied()
        .collect();
    if candidates.len() == pits {
        return WarningDeduction::Pits(candidates);
    }

    let mut tiles: Vec<Location> = neighbors.iter().copied().collect();
    if tiles.len() > 3 {
        if let Some(entry) = tiles.iter().position(|loc| known_safe.contains(loc)) {
            tiles.remove(entry);
        }
    }

    match <[Location; 3]>::try_from(tiles.as_slice()) {
        Ok(three) => WarningDeduction::Clauses(exactly_k_of_three(three, pits)),
        Err(_) => WarningDeduction::Undetermined,
    }
}

/// CNF for "exactly `k` of these three locations are pits".
pub fn exactly_k_of_three(tiles: [Location; 3], k: usize) -> Vec<Clause> {
    let [a, b, c] = tiles;
    let pairs = [(a, b), (a, c), (b, c)];
    let all = |is_pit: bool| {
        Clause::new(tiles.iter().map(|&loc| SignedProposition::pit(loc, is_pit)))
    };

    match k {
        0 => tiles.iter().map(|&loc| Clause::fact(loc, false)).collect(),
        1 => {
            // No two are both pits, and at least one is
            let mut clauses: Vec<Clause> = pairs
                .iter()
                .map(|&(x, y)| {
                    Clause::new([SignedProposition::pit(x, false), SignedProposition::pit(y, false)])
                })
                .collect();
            clauses.push(all(true));
            clauses
        }
        2 => {
            // Every pair holds a pit, and not all three do
            let mut clauses: Vec<Clause> = pairs
                .iter()
                .map(|&(x, y)| {
                    Clause::new([SignedProposition::pit(x, true), SignedProposition::pit(y, true)])
                })
                .collect();
            clauses.push(all(false));
            clauses
        }
        _ => tiles.iter().map(|&loc| Clause::fact(loc, true)).collect(),
    }
}
