//! Refutation prover: decides entailment by resolution.
//!
//! The `Refutation` struct owns a private working set built from the
//! relevant knowledge-base clauses plus the negated query, and saturates it
//! with binary resolution until the empty clause appears (the query is
//! entailed) or a full pass adds nothing new (it is not).
//!
//! Use `prove()` to run inline, or [`bounded::prove_with_budget`] to run on a
//! worker thread under a wall-clock budget.

pub mod bounded;
pub mod profile;

use crate::logic::Clause;
use indexmap::IndexSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub use bounded::prove_with_budget;
pub use profile::QueryStats;

/// Limits for a single refutation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefutationConfig {
    /// Wall-clock budget; `None` runs until a fixed point
    pub timeout: Option<Duration>,
    /// Maximum working-set size, 0 means no limit
    pub max_clauses: usize,
}

impl RefutationConfig {
    pub fn unbounded() -> Self {
        RefutationConfig::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        RefutationConfig {
            timeout: Some(timeout),
            max_clauses: 0,
        }
    }
}

/// Outcome of a refutation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofResult {
    /// The empty clause was derived: the clauses entail the query
    Entailed,
    /// Saturated without a contradiction
    NotEntailed,
    /// Timed out, cancelled, or exceeded the clause limit
    ResourceLimit,
}

impl ProofResult {
    /// `Some(entailed)` for a definite answer, `None` for a resource limit
    pub fn decided(&self) -> Option<bool> {
        match self {
            ProofResult::Entailed => Some(true),
            ProofResult::NotEntailed => Some(false),
            ProofResult::ResourceLimit => None,
        }
    }
}

/// Negate a query clause into the clauses that seed the refutation.
///
/// `~(a v b)` is `~a ^ ~b`, so a multi-proposition query becomes one unit
/// clause per proposition. For a unit query this is just its inversion.
pub fn negate_query(query: &Clause) -> Vec<Clause> {
    if query.len() <= 1 {
        if query.is_empty() {
            // ~False is True and contributes nothing
            return Vec::new();
        }
        return vec![query.invert()];
    }
    query
        .literals()
        .map(|lit| Clause::unit(lit.negated()))
        .collect()
}

/// One entailment query over a private clause set.
pub struct Refutation {
    clauses: IndexSet<Clause>,
    trivially_entailed: bool,
    config: RefutationConfig,
    stats: QueryStats,
    /// Set to `true` to stop the resolution loop
    cancel: Arc<AtomicBool>,
}

impl Refutation {
    /// Build the working set from `relevant` clauses and the negation of `query`.
    pub fn new(relevant: Vec<Clause>, query: &Clause, config: RefutationConfig) -> Self {
        let mut clauses: IndexSet<Clause> = relevant
            .into_iter()
            .filter(|c| !c.is_tautology())
            .collect();
        clauses.extend(negate_query(query));

        let stats = QueryStats {
            initial_clauses: clauses.len(),
            ..Default::default()
        };

        Refutation {
            clauses,
            trivially_entailed: query.is_tautology(),
            config,
            stats,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that cancels this run from another thread
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn stats(&self) -> &QueryStats {
        &self.stats
    }

    /// The working set, including every resolvent derived so far
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    /// Run resolution to completion or until a limit is hit.
    pub fn prove(&mut self) -> ProofResult {
        let start = Instant::now();
        let result = self.saturate(start);
        self.stats.elapsed = start.elapsed();
        self.stats.final_clauses = self.clauses.len();

        debug!(
            ?result,
            passes = self.stats.passes,
            generated = self.stats.clauses_generated,
            working_set = self.stats.final_clauses,
            "refutation finished"
        );
        result
    }

    fn saturate(&mut self, start: Instant) -> ProofResult {
        if self.trivially_entailed || self.clauses.iter().any(Clause::is_empty) {
            return ProofResult::Entailed;
        }

        let deadline = self.config.timeout.map(|t| start + t);
        // Pairs among clauses below `settled` were all tried in an earlier pass.
        let mut settled = 0;

        loop {
            self.stats.passes += 1;
            let len = self.clauses.len();
            let mut new_clauses: IndexSet<Clause> = IndexSet::new();

            for j in settled..len {
                if self.is_cancelled(deadline) {
                    return ProofResult::ResourceLimit;
                }
                let right = &self.clauses[j];
                for left in self.clauses.iter().take(j) {
                    self.stats.pairs_tried += 1;
                    if let Some(resolvent) = Clause::resolve(left, right) {
                        if resolvent.is_empty() {
                            return ProofResult::Entailed;
                        }
                        if !self.clauses.contains(&resolvent) {
                            new_clauses.insert(resolvent);
                        }
                    }
                }
            }

            // Fixed point: nothing new can lead to a contradiction
            if new_clauses.is_empty() {
                return ProofResult::NotEntailed;
            }

            settled = len;
            self.stats.clauses_generated += new_clauses.len();
            self.clauses.extend(new_clauses);

            if self.config.max_clauses > 0 && self.clauses.len() > self.config.max_clauses {
                return ProofResult::ResourceLimit;
            }
        }
    }

    fn is_cancelled(&self, deadline: Option<Instant>) -> bool {
        if self.cancel.load(Ordering::Relaxed) {
            return true;
        }
        matches!(deadline, Some(deadline) if Instant::now() >= deadline)
    }
}
