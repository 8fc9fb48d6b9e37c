//! Known-fact simplification.
//!
//! Condenses clauses using locations already known to be pits or pit-free.
//! For a known fact `l` (the unit `P(loc)` or `~P(loc)`), every
//! multi-proposition clause that contains `l` is subsumed by the fact and
//! dropped, and every one that contains the complement of `l` is replaced by
//! its resolvent with the fact. Unit clauses are left alone.
//!
//! Example:
//!     clauses    = {P(1,1) v ~P(2,1), ~P(1,1) v P(1,2)}
//!     known pits = {(1,1)}
//!     result     = {P(1,2)}
//! (the fact `P(1,1)` itself is kept in the knowledge base by the caller)

use crate::logic::{Clause, Location, Proposition};
use indexmap::IndexSet;
use std::collections::BTreeSet;
use tracing::warn;

/// Simplify `clauses` with the single fact "`location` is (not) a pit".
///
/// Returns the new clause set and whether anything changed.
pub fn simplify_for_fact(
    clauses: IndexSet<Clause>,
    location: Location,
    is_pit: bool,
) -> (IndexSet<Clause>, bool) {
    let prop = Proposition::pit(location);
    let fact = Clause::fact(location, is_pit);
    let mut changed = false;
    let mut result = IndexSet::with_capacity(clauses.len());

    for clause in clauses {
        if clause.len() <= 1 {
            result.insert(clause);
            continue;
        }
        match clause.polarity(&prop) {
            None => {
                result.insert(clause);
            }
            Some(polarity) if polarity == is_pit => {
                // Subsumed by the fact
                changed = true;
            }
            Some(_) => match Clause::resolve(&clause, &fact) {
                Some(resolvent) => {
                    if resolvent.is_empty() {
                        warn!(%clause, %fact, "known fact contradicts the knowledge base");
                    }
                    changed = true;
                    result.insert(resolvent);
                }
                None => {
                    result.insert(clause);
                }
            },
        }
    }

    (result, changed)
}

/// Simplify `clauses` with every known pit and safe location, one location at
/// a time, until no clause changes.
///
/// Each change removes a clause or shortens one, so the loop terminates; the
/// result is a fixed point, which makes repeated calls with the same facts
/// no-ops.
pub fn simplify_from_known_locations(
    mut clauses: IndexSet<Clause>,
    known_pits: &BTreeSet<Location>,
    known_safe: &BTreeSet<Location>,
) -> IndexSet<Clause> {
    let facts: Vec<(Location, bool)> = known_pits
        .iter()
        .map(|&loc| (loc, true))
        .chain(known_safe.iter().map(|&loc| (loc, false)))
        .collect();

    loop {
        let mut any_changed = false;
        for &(location, is_pit) in &facts {
            let (simplified, changed) = simplify_for_fact(clauses, location, is_pit);
            clauses = simplified;
            any_changed |= changed;
        }
        if !any_changed {
            return clauses;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SignedProposition;

    fn loc(col: i32, row: i32) -> Location {
        Location::new(col, row)
    }

    fn lit(col: i32, row: i32, is_pit: bool) -> SignedProposition {
        SignedProposition::pit(loc(col, row), is_pit)
    }

    #[test]
    fn test_documented_example() {
        let clauses: IndexSet<Clause> = [
            Clause::new([lit(1, 1, true), lit(2, 1, false)]),
            Clause::new([lit(1, 1, false), lit(1, 2, true)]),
        ]
        .into_iter()
        .collect();
        let pits: BTreeSet<Location> = [loc(1, 1)].into_iter().collect();

        let simplified = simplify_from_known_locations(clauses, &pits, &BTreeSet::new());
        assert_eq!(simplified.len(), 1);
        assert!(simplified.contains(&Clause::fact(loc(1, 2), true)));
    }

    #[test]
    fn test_units_are_untouched() {
        let clauses: IndexSet<Clause> = [Clause::fact(loc(1, 1), true)].into_iter().collect();
        let (simplified, changed) = simplify_for_fact(clauses.clone(), loc(1, 1), true);
        assert!(!changed);
        assert_eq!(simplified, clauses);
    }

    #[test]
    fn test_unrelated_clauses_are_kept() {
        let clause = Clause::new([lit(4, 4, true), lit(5, 5, true)]);
        let clauses: IndexSet<Clause> = [clause.clone()].into_iter().collect();
        let (simplified, changed) = simplify_for_fact(clauses, loc(1, 1), false);
        assert!(!changed);
        assert!(simplified.contains(&clause));
    }

    #[test]
    fn test_several_facts_shrink_one_clause() {
        let clauses: IndexSet<Clause> = [Clause::new([
            lit(1, 1, true),
            lit(2, 1, true),
            lit(3, 1, true),
        ])]
        .into_iter()
        .collect();
        let safe: BTreeSet<Location> = [loc(1, 1), loc(2, 1)].into_iter().collect();

        let simplified = simplify_from_known_locations(clauses, &BTreeSet::new(), &safe);
        assert_eq!(simplified.len(), 1);
        assert!(simplified.contains(&Clause::fact(loc(3, 1), true)));
    }

    #[test]
    fn test_idempotent() {
        let clauses: IndexSet<Clause> = [
            Clause::new([lit(0, 0, true), lit(1, 0, true)]),
            Clause::new([lit(0, 0, true), lit(2, 0, true)]),
            Clause::new([lit(1, 0, true), lit(2, 0, true)]),
            Clause::new([lit(0, 0, false), lit(1, 0, false), lit(2, 0, false)]),
        ]
        .into_iter()
        .collect();
        let safe: BTreeSet<Location> = [loc(0, 0)].into_iter().collect();

        let once = simplify_from_known_locations(clauses, &BTreeSet::new(), &safe);
        let twice = simplify_from_known_locations(once.clone(), &BTreeSet::new(), &safe);
        assert_eq!(once, twice);
    }
}
