//! Per-query statistics for the refutation loop

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::time::Duration;

fn secs(d: &Duration) -> f64 {
    d.as_secs_f64()
}

/// Counters collected by one refutation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStats {
    /// Clauses in the working set before the first pass (relevant clauses + negated query)
    pub initial_clauses: usize,
    /// Full resolution passes started
    pub passes: usize,
    /// Resolution attempts between clause pairs
    pub pairs_tried: usize,
    /// New clauses added to the working set
    pub clauses_generated: usize,
    /// Working-set size when the run ended
    pub final_clauses: usize,
    pub elapsed: Duration,
}

impl Serialize for QueryStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("QueryStats", 6)?;
        s.serialize_field("initial_clauses", &self.initial_clauses)?;
        s.serialize_field("passes", &self.passes)?;
        s.serialize_field("pairs_tried", &self.pairs_tried)?;
        s.serialize_field("clauses_generated", &self.clauses_generated)?;
        s.serialize_field("final_clauses", &self.final_clauses)?;
        s.serialize_field("elapsed", &secs(&self.elapsed))?;
        s.end()
    }
}
