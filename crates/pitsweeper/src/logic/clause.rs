//! Propositional clauses over maze locations

use super::proposition::{Location, Proposition, SignedProposition};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A disjunction of signed propositions.
///
/// Each proposition appears at most once. Supplying a proposition with both
/// polarities removes it and marks the clause as a tautology (logically
/// `True`). A clause that is not a tautology and has no propositions is the
/// empty clause, i.e. a contradiction.
///
/// Clauses are values: equality and hashing only look at the
/// proposition-to-polarity map and the tautology flag, and every
/// transformation returns a new clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    props: BTreeMap<Proposition, bool>,
    tautology: bool,
}

impl Clause {
    /// Create a clause from signed propositions
    pub fn new<I>(literals: I) -> Self
    where
        I: IntoIterator<Item = SignedProposition>,
    {
        let mut props = BTreeMap::new();
        // Propositions removed by a conflict stay out for good
        let mut collapsed = BTreeSet::new();

        for lit in literals {
            if collapsed.contains(&lit.proposition) {
                continue;
            }
            match props.get(&lit.proposition) {
                None => {
                    props.insert(lit.proposition, lit.polarity);
                }
                Some(&polarity) if polarity != lit.polarity => {
                    props.remove(&lit.proposition);
                    collapsed.insert(lit.proposition);
                }
                Some(_) => {}
            }
        }

        Clause {
            props,
            tautology: !collapsed.is_empty(),
        }
    }

    /// The empty clause (contradiction)
    pub fn empty() -> Self {
        Clause::default()
    }

    /// A clause with a single signed proposition
    pub fn unit(literal: SignedProposition) -> Self {
        Clause::new([literal])
    }

    /// The unit fact `P(location)` or `~P(location)`
    pub fn fact(location: Location, is_pit: bool) -> Self {
        Clause::unit(SignedProposition::pit(location, is_pit))
    }

    /// Polarity of `prop` in this clause, if it occurs
    pub fn polarity(&self, prop: &Proposition) -> Option<bool> {
        self.props.get(prop).copied()
    }

    pub fn is_tautology(&self) -> bool {
        self.tautology
    }

    /// Check if this is the empty clause (tautologies are never empty)
    pub fn is_empty(&self) -> bool {
        !self.tautology && self.props.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        !self.tautology && self.props.len() == 1
    }

    /// Number of propositions in this clause
    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn propositions(&self) -> impl Iterator<Item = &Proposition> + '_ {
        self.props.keys()
    }

    pub fn literals(&self) -> impl Iterator<Item = SignedProposition> + '_ {
        self.props
            .iter()
            .map(|(prop, &polarity)| SignedProposition::new(*prop, polarity))
    }

    /// Binary resolution.
    ///
    /// Returns `None` unless the clauses disagree on exactly one shared
    /// proposition. Tautologies never resolve: their removed propositions
    /// would otherwise make the resolvent stronger than its premises.
    pub fn resolve(c1: &Clause, c2: &Clause) -> Option<Clause> {
        if c1.tautology || c2.tautology {
            return None;
        }

        let mut pivot = None;
        for (prop, &polarity) in &c1.props {
            if let Some(&other) = c2.props.get(prop) {
                if other != polarity && pivot.replace(*prop).is_some() {
                    return None;
                }
            }
        }
        let pivot = pivot?;

        let mut props = c1.props.clone();
        props.extend(c2.props.iter().map(|(prop, &polarity)| (*prop, polarity)));
        props.remove(&pivot);

        // A single conflict means no complementary pair survives, so the
        // resolvent is never a tautology.
        Some(Clause {
            props,
            tautology: false,
        })
    }

    /// Flip the polarity of every proposition
    pub fn invert(&self) -> Clause {
        Clause {
            props: self
                .props
                .iter()
                .map(|(prop, &polarity)| (*prop, !polarity))
                .collect(),
            tautology: self.tautology,
        }
    }
}

impl FromIterator<SignedProposition> for Clause {
    fn from_iter<I: IntoIterator<Item = SignedProposition>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tautology {
            return write!(f, "{{True}}");
        }
        write!(f, "{{")?;
        for (i, lit) in self.literals().enumerate() {
            if i > 0 {
                write!(f, " v ")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(col: i32, row: i32) -> Location {
        Location::new(col, row)
    }

    fn pit(col: i32, row: i32) -> SignedProposition {
        SignedProposition::pit(loc(col, row), true)
    }

    fn no_pit(col: i32, row: i32) -> SignedProposition {
        SignedProposition::pit(loc(col, row), false)
    }

    #[test]
    fn test_construction_and_lookup() {
        let clause = Clause::new([pit(1, 1), no_pit(2, 1)]);
        assert_eq!(clause.len(), 2);
        assert_eq!(clause.polarity(&Proposition::pit(loc(1, 1))), Some(true));
        assert_eq!(clause.polarity(&Proposition::pit(loc(2, 1))), Some(false));
        assert_eq!(clause.polarity(&Proposition::pit(loc(3, 1))), None);
        assert!(!clause.is_tautology());
        assert!(!clause.is_empty());
    }

    #[test]
    fn test_repeated_proposition_is_kept_once() {
        let clause = Clause::new([pit(1, 1), pit(1, 1)]);
        assert!(clause.is_unit());
        assert_eq!(clause, Clause::fact(loc(1, 1), true));
    }

    #[test]
    fn test_conflicting_proposition_collapses_to_tautology() {
        let clause = Clause::new([pit(1, 1), no_pit(1, 1), pit(2, 2)]);
        assert!(clause.is_tautology());
        assert_eq!(clause.polarity(&Proposition::pit(loc(1, 1))), None);
        assert_eq!(clause.len(), 1);
        assert!(!clause.is_empty());
        assert_eq!(clause.to_string(), "{True}");
    }

    #[test]
    fn test_collapsed_proposition_does_not_come_back() {
        let a = Clause::new([no_pit(3, 0), pit(3, 0), no_pit(3, 0)]);
        let b = Clause::new([no_pit(3, 0), no_pit(3, 0), pit(3, 0)]);
        assert!(a.is_tautology());
        assert_eq!(a.polarity(&Proposition::pit(loc(3, 0))), None);
        assert_eq!(a, b);

        let c = Clause::new([pit(1, 1), no_pit(1, 1), pit(1, 1), pit(2, 2)]);
        assert_eq!(c, Clause::new([pit(2, 2), no_pit(1, 1), pit(1, 1)]));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_empty_clause() {
        assert!(Clause::empty().is_empty());
        assert!(Clause::new([]).is_empty());
        // P v ~P has no propositions left but is True, not a contradiction
        assert!(!Clause::new([pit(1, 1), no_pit(1, 1)]).is_empty());
    }

    #[test]
    fn test_equality_ignores_construction_order() {
        let a = Clause::new([pit(1, 1), no_pit(2, 1), pit(3, 1)]);
        let b = Clause::new([pit(3, 1), pit(1, 1), no_pit(2, 1)]);
        assert_eq!(a, b);

        let set: std::collections::HashSet<Clause> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_resolve_single_conflict() {
        // ~P(1,1) v ~P(2,1)  and  P(1,1)  =>  ~P(2,1)
        let c1 = Clause::new([no_pit(1, 1), no_pit(2, 1)]);
        let c2 = Clause::fact(loc(1, 1), true);
        let resolvent = Clause::resolve(&c1, &c2).unwrap();
        assert_eq!(resolvent, Clause::fact(loc(2, 1), false));
    }

    #[test]
    fn test_resolve_keeps_agreeing_propositions() {
        let c1 = Clause::new([pit(1, 1), pit(2, 1)]);
        let c2 = Clause::new([no_pit(1, 1), pit(2, 1), pit(3, 1)]);
        let resolvent = Clause::resolve(&c1, &c2).unwrap();
        assert_eq!(resolvent, Clause::new([pit(2, 1), pit(3, 1)]));
    }

    #[test]
    fn test_resolve_to_empty_clause() {
        let resolvent =
            Clause::resolve(&Clause::fact(loc(1, 1), true), &Clause::fact(loc(1, 1), false))
                .unwrap();
        assert!(resolvent.is_empty());
    }

    #[test]
    fn test_resolve_fails_without_conflict() {
        let c1 = Clause::new([pit(1, 1), pit(2, 1)]);
        let c2 = Clause::new([pit(1, 1), no_pit(3, 1)]);
        assert_eq!(Clause::resolve(&c1, &c2), None);

        let disjoint = Clause::new([pit(5, 5)]);
        assert_eq!(Clause::resolve(&c1, &disjoint), None);
    }

    #[test]
    fn test_resolve_fails_with_two_conflicts() {
        let c1 = Clause::new([pit(1, 1), pit(2, 1)]);
        let c2 = Clause::new([no_pit(1, 1), no_pit(2, 1)]);
        assert_eq!(Clause::resolve(&c1, &c2), None);
        assert_eq!(Clause::resolve(&c2, &c1), None);
    }

    #[test]
    fn test_tautologies_do_not_resolve() {
        let taut = Clause::new([pit(1, 1), no_pit(1, 1), pit(2, 1)]);
        let c = Clause::fact(loc(2, 1), false);
        assert_eq!(Clause::resolve(&taut, &c), None);
    }

    #[test]
    fn test_invert_returns_new_clause() {
        let original = Clause::new([pit(1, 1), no_pit(2, 1)]);
        let inverted = original.invert();
        assert_eq!(inverted, Clause::new([no_pit(1, 1), pit(2, 1)]));
        assert_eq!(original, Clause::new([pit(1, 1), no_pit(2, 1)]));
        assert_eq!(inverted.invert(), original);
    }

    #[test]
    fn test_display() {
        let clause = Clause::new([pit(1, 1), no_pit(2, 1)]);
        assert_eq!(clause.to_string(), "{P(1,1) v ~P(2,1)}");
        assert_eq!(Clause::empty().to_string(), "{}");
    }
}
