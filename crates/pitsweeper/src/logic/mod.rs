//! Propositional logic over maze locations
//!
//! This module provides the fundamental types of the knowledge base:
//! locations, propositions, signed propositions and clauses.

pub mod clause;
pub mod proposition;


pub use clause::Clause;
pub use proposition::{Location, Proposition, SignedProposition, Symbol};
