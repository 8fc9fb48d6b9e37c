//! Frontier move ordering

use crate::config::AgentConfig;
use crate::logic::Location;
use std::collections::BTreeSet;

/// A frontier location with its move priority (lower is better)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMove {
    pub location: Location,
    pub priority: f64,
}

/// What the priority of a frontier location depends on
pub struct MoveScoring<'a> {
    pub goal: Location,
    pub current: Location,
    pub config: &'a AgentConfig,
    pub suspected_pits: &'a BTreeSet<Location>,
    pub known_pits: &'a BTreeSet<Location>,
}

impl MoveScoring<'_> {
    /// Distance to the goal plus a weighted distance from the current
    /// location, penalised for suspected and known pits. Known pits stay
    /// selectable as a last resort.
    pub fn priority(&self, location: Location) -> f64 {
        let to_goal = location.manhattan(&self.goal) as f64;
        let move_cost = location.manhattan(&self.current) as f64;
        let mut priority = to_goal + move_cost * self.config.move_cost_weight;

        if self.suspected_pits.contains(&location) {
            priority += self.config.suspected_penalty;
        }
        if self.known_pits.contains(&location) {
            priority += self.config.hazard_penalty;
        }
        priority
    }
}

/// Frontier locations in ascending priority; ties are broken by location so
/// the order is deterministic.
pub fn rank_frontier(frontier: &BTreeSet<Location>, scoring: &MoveScoring<'_>) -> Vec<RankedMove> {
    let mut ranked: Vec<RankedMove> = frontier
        .iter()
        .map(|&location| RankedMove {
            location,
            priority: scoring.priority(location),
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.priority
            .total_cmp(&b.priority)
            .then_with(|| a.location.cmp(&b.location))
    });
    ranked
}
