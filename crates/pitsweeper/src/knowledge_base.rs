//! CNF knowledge base of maze clauses.
//!
//! Stores a duplicate-free set of clauses (an implicit conjunction) and
//! answers entailment queries by refutation. Callers must only tell clauses
//! that are consistent with the maze: the knowledge base trades validating
//! assertions for cheap `tell` calls, and an inconsistent knowledge base
//! entails everything.

use crate::logic::{Clause, Location, Proposition};
use crate::prover::{prove_with_budget, ProofResult, Refutation, RefutationConfig};
use crate::simplifying::simplify_from_known_locations;
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    clauses: IndexSet<Clause>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Add `clause`. Returns `false` if it was already present or is a
    /// tautology (which is `True` and carries no information).
    pub fn tell(&mut self, clause: Clause) -> bool {
        if clause.is_tautology() {
            return false;
        }
        self.clauses.insert(clause)
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses in insertion order
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    /// Decide whether the knowledge base entails `query`, with no time limit.
    pub fn ask(&self, query: &Clause) -> bool {
        let mut refutation =
            Refutation::new(self.filter_relevant(query), query, RefutationConfig::unbounded());
        refutation.prove() == ProofResult::Entailed
    }

    /// Decide entailment within the limits of `config`.
    ///
    /// With a timeout, the proof runs on a worker thread over a private copy
    /// of the relevant clauses. `None` means the answer is unknown (budget or
    /// clause limit exceeded).
    pub fn ask_bounded(&self, query: &Clause, config: &RefutationConfig) -> Option<bool> {
        let refutation = Refutation::new(self.filter_relevant(query), query, config.clone());
        let result = match config.timeout {
            Some(budget) => prove_with_budget(refutation, budget),
            None => {
                let mut refutation = refutation;
                Some(refutation.prove())
            }
        };
        result.and_then(|r| r.decided())
    }

    /// Clauses connected to `query` through shared propositions.
    ///
    /// Starts from the query's propositions and repeatedly pulls in every
    /// clause that mentions a relevant proposition, marking that clause's
    /// other propositions relevant too, until nothing new is reached. Only
    /// these clauses can take part in a refutation of the query.
    pub fn filter_relevant(&self, query: &Clause) -> Vec<Clause> {
        let mut by_prop: HashMap<&Proposition, Vec<usize>> = HashMap::new();
        for (idx, clause) in self.clauses.iter().enumerate() {
            for prop in clause.propositions() {
                by_prop.entry(prop).or_default().push(idx);
            }
        }

        let mut relevant_props: HashSet<&Proposition> = query.propositions().collect();
        let mut worklist: Vec<&Proposition> = relevant_props.iter().copied().collect();
        let mut selected = vec![false; self.clauses.len()];

        while let Some(prop) = worklist.pop() {
            let Some(indices) = by_prop.get(prop) else {
                continue;
            };
            for &idx in indices {
                if selected[idx] {
                    continue;
                }
                selected[idx] = true;
                for other in self.clauses[idx].propositions() {
                    if relevant_props.insert(other) {
                        worklist.push(other);
                    }
                }
            }
        }

        let relevant: Vec<Clause> = self
            .clauses
            .iter()
            .zip(selected)
            .filter_map(|(clause, keep)| keep.then(|| clause.clone()))
            .collect();
        debug!(
            query = %query,
            relevant = relevant.len(),
            total = self.clauses.len(),
            "filtered relevant clauses"
        );
        relevant
    }

    /// Condense the clause set with known pit and pit-free locations.
    ///
    /// The unit facts themselves are told first, so dropping clauses that a
    /// fact subsumes never loses information. Call whenever new facts are
    /// confirmed and before the next query.
    pub fn simplify(&mut self, known_pits: &BTreeSet<Location>, known_safe: &BTreeSet<Location>) {
        for &loc in known_pits {
            self.tell(Clause::fact(loc, true));
        }
        for &loc in known_safe {
            self.tell(Clause::fact(loc, false));
        }

        let before = self.clauses.len();
        let clauses = std::mem::take(&mut self.clauses);
        self.clauses = simplify_from_known_locations(clauses, known_pits, known_safe);
        debug!(before, after = self.clauses.len(), "simplified knowledge base");
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", clause)?;
        }
        write!(f, "]")
    }
}
