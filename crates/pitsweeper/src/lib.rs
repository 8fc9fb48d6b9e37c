//! Pitsweeper: a maze agent backed by a propositional resolution prover
//!
//! The agent records what it perceives as CNF clauses over "pit at (col,row)"
//! propositions and decides whether frontier tiles are safe by refutation,
//! under a per-query time budget.

pub mod agent;
pub mod config;
pub mod environment;
pub mod error;
pub mod game;
pub mod json;
pub mod knowledge_base;
pub mod logic;
pub mod maze;
pub mod prover;
pub mod simplifying;

pub use agent::{MazeAgent, Safety};
pub use config::AgentConfig;
pub use environment::{Environment, Perception, Tile};
pub use error::{PitsweeperError, Result};
pub use game::{play, run, GameReport};
pub use knowledge_base::KnowledgeBase;
pub use logic::{Clause, Location, Proposition, SignedProposition, Symbol};
pub use maze::GridMaze;
pub use prover::{ProofResult, QueryStats, Refutation, RefutationConfig};
