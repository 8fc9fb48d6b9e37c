//! Simplification of the clause set from confirmed facts

mod known_facts;

pub use known_facts::{simplify_for_fact, simplify_from_known_locations};
