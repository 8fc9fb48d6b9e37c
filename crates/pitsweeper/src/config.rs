//! Agent configuration types.

use crate::error::Result;
use crate::prover::RefutationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the maze agent.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Wall-clock budget for each knowledge-base query, in milliseconds
    pub ask_timeout_ms: u64,
    /// Priority penalty for frontier tiles whose safety is unknown
    pub suspected_penalty: f64,
    /// Priority penalty for frontier tiles known to hold a pit
    pub hazard_penalty: f64,
    /// Weight of the distance from the current location in the move priority
    pub move_cost_weight: f64,
    /// Working-set limit for a single query, 0 means no limit
    pub max_working_clauses: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            ask_timeout_ms: 250,
            suspected_penalty: 4.0,
            hazard_penalty: 20.0,
            move_cost_weight: 0.5,
            max_working_clauses: 0, // 0 means no limit
        }
    }
}

impl AgentConfig {
    pub fn ask_timeout(&self) -> Duration {
        Duration::from_millis(self.ask_timeout_ms)
    }

    /// Limits applied to each bounded query
    pub fn refutation(&self) -> RefutationConfig {
        RefutationConfig {
            timeout: Some(self.ask_timeout()),
            max_clauses: self.max_working_clauses,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
