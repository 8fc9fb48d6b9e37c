//! Maze agent: turns perceptions into knowledge and knowledge into moves.
//!
//! Each call to [`MazeAgent::think`] processes one perception:
//!
//! 1. tell the knowledge base whether the current tile is a pit;
//! 2. deduce what the tile says about its cardinal neighbours (clear tiles
//!    make them safe, high warnings make them pits, low warnings are encoded
//!    as clauses);
//! 3. rank the frontier and return the best location that can be proven
//!    safe, falling back to the best location overall.
//!
//! Safety queries run under a wall-clock budget; a query that runs out of
//! time leaves the location "suspected" instead of failing the step.

pub mod encoding;
pub mod frontier;

use crate::config::AgentConfig;
use crate::environment::{Environment, Perception, Tile};
use crate::error::{PitsweeperError, Result};
use crate::knowledge_base::KnowledgeBase;
use crate::logic::{Clause, Location, SignedProposition};
use self::encoding::{deduce_adjacent_pits, WarningDeduction};
use self::frontier::{rank_frontier, MoveScoring};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Classification of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Safety {
    /// Certainly pit-free
    Safe,
    /// Certainly a pit
    Hazard,
    /// Not decidable with the current knowledge and budget
    Unknown,
}

pub struct MazeAgent {
    config: AgentConfig,
    goal: Location,
    kb: KnowledgeBase,
    safe_tiles: BTreeSet<Location>,
    pit_tiles: BTreeSet<Location>,
    suspected_pits: BTreeSet<Location>,
    /// Set when clauses were told since the last simplification
    facts_changed: bool,
}

impl MazeAgent {
    /// Create an agent with the rules that hold in every maze: the start and
    /// goal are safe, and at least one neighbour of the goal is pit-free.
    pub fn new<E: Environment + ?Sized>(env: &E, config: AgentConfig) -> Self {
        let goal = env.goal_location();
        let mut agent = MazeAgent {
            config,
            goal,
            kb: KnowledgeBase::new(),
            safe_tiles: BTreeSet::new(),
            pit_tiles: BTreeSet::new(),
            suspected_pits: BTreeSet::new(),
            facts_changed: false,
        };

        agent.confirm_safe(env.player_location());
        agent.confirm_safe(goal);

        let paths_to_goal = env.cardinal_neighbors(goal, 1);
        if paths_to_goal.len() == 1 {
            agent.confirm_safe_all(&paths_to_goal);
        } else if !paths_to_goal.is_empty() {
            agent.kb.tell(Clause::new(
                paths_to_goal
                    .iter()
                    .map(|&loc| SignedProposition::pit(loc, false)),
            ));
        }

        agent
    }

    /// Process one perception and choose the next frontier location to move into.
    pub fn think<E: Environment + ?Sized>(
        &mut self,
        env: &E,
        perception: &Perception,
    ) -> Result<Location> {
        self.observe(env, perception);
        let frontier = env.frontier_locations();
        let target = self.select_move(&frontier, perception.location)?;
        info!(from = %perception.location, to = %target, "moving");
        Ok(target)
    }

    /// Record what `perception` says about the current tile and its neighbours.
    pub fn observe<E: Environment + ?Sized>(&mut self, env: &E, perception: &Perception) {
        let current = perception.location;
        match perception.tile {
            Tile::Pit => self.confirm_pit(current),
            _ => self.confirm_safe(current),
        }

        let neighbors = env.cardinal_neighbors(current, 1);
        match perception.tile {
            Tile::Safe | Tile::Warning(0) => self.confirm_safe_all(&neighbors),
            Tile::Warning(n @ (1 | 2)) => self.infer_adjacent_pits(&neighbors, n as usize),
            Tile::Warning(3) => {
                // Everything but the way in must be a pit
                let unknown: BTreeSet<Location> =
                    neighbors.difference(&self.safe_tiles).copied().collect();
                self.confirm_pits_all(&unknown);
            }
            Tile::Warning(_) => self.confirm_pits_all(&neighbors),
            Tile::Pit => {}
        }
        debug!(
            location = %current,
            tile = %perception.tile,
            clauses = self.kb.len(),
            safe = self.safe_tiles.len(),
            pits = self.pit_tiles.len(),
            "observed"
        );
    }

    /// Decide whether `location` is safe, querying the knowledge base if the
    /// answer is not already known.
    pub fn is_safe_tile(&mut self, location: Location) -> Safety {
        if self.safe_tiles.contains(&location) {
            return Safety::Safe;
        }
        if self.pit_tiles.contains(&location) {
            return Safety::Hazard;
        }

        self.refresh_knowledge();
        let limits = self.config.refutation();

        match self.kb.ask_bounded(&Clause::fact(location, false), &limits) {
            Some(true) => {
                self.confirm_safe(location);
                return Safety::Safe;
            }
            // A timeout here means the pit query would most likely time out too
            None => {
                self.suspect(location);
                return Safety::Unknown;
            }
            Some(false) => {}
        }

        if self.kb.ask_bounded(&Clause::fact(location, true), &limits) == Some(true) {
            self.confirm_pit(location);
            return Safety::Hazard;
        }

        self.suspect(location);
        Safety::Unknown
    }

    /// Pick the next move from `frontier`.
    ///
    /// The goal wins outright. Otherwise candidates are tried in priority
    /// order and the first provably safe one is taken; if none is, the
    /// best-ranked candidate is taken anyway.
    pub fn select_move(
        &mut self,
        frontier: &BTreeSet<Location>,
        current: Location,
    ) -> Result<Location> {
        if frontier.contains(&self.goal) {
            return Ok(self.goal);
        }

        let ranked = {
            let scoring = MoveScoring {
                goal: self.goal,
                current,
                config: &self.config,
                suspected_pits: &self.suspected_pits,
                known_pits: &self.pit_tiles,
            };
            rank_frontier(frontier, &scoring)
        };
        let fallback = ranked.first().ok_or(PitsweeperError::EmptyFrontier)?.location;

        for candidate in &ranked {
            if self.is_safe_tile(candidate.location) == Safety::Safe {
                return Ok(candidate.location);
            }
        }

        debug!(location = %fallback, "no provably safe move, taking the best guess");
        Ok(fallback)
    }

    pub fn goal(&self) -> Location {
        self.goal
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn safe_tiles(&self) -> &BTreeSet<Location> {
        &self.safe_tiles
    }

    pub fn pit_tiles(&self) -> &BTreeSet<Location> {
        &self.pit_tiles
    }

    pub fn suspected_pits(&self) -> &BTreeSet<Location> {
        &self.suspected_pits
    }

    // =========================================================================
    // Private helper methods
    // =========================================================================

    fn infer_adjacent_pits(&mut self, neighbors: &BTreeSet<Location>, pits: usize) {
        match deduce_adjacent_pits(neighbors, &self.safe_tiles, pits) {
            WarningDeduction::Pits(locations) => {
                for loc in locations {
                    self.confirm_pit(loc);
                }
            }
            WarningDeduction::Clauses(clauses) => {
                for clause in clauses {
                    self.facts_changed |= self.kb.tell(clause);
                }
            }
            WarningDeduction::Undetermined => {}
        }
    }

    /// Simplify the knowledge base if it changed since the last time.
    fn refresh_knowledge(&mut self) {
        if self.facts_changed {
            self.kb.simplify(&self.pit_tiles, &self.safe_tiles);
            self.facts_changed = false;
        }
    }

    fn confirm_safe(&mut self, location: Location) {
        if self.pit_tiles.contains(&location) {
            warn!(%location, "ignoring safe fact for a confirmed pit");
            return;
        }
        self.suspected_pits.remove(&location);
        if self.safe_tiles.insert(location) {
            self.kb.tell(Clause::fact(location, false));
            self.facts_changed = true;
        }
    }

    fn confirm_pit(&mut self, location: Location) {
        if self.safe_tiles.contains(&location) {
            warn!(%location, "ignoring pit fact for a confirmed safe tile");
            return;
        }
        self.suspected_pits.remove(&location);
        if self.pit_tiles.insert(location) {
            self.kb.tell(Clause::fact(location, true));
            self.facts_changed = true;
        }
    }

    fn confirm_safe_all(&mut self, locations: &BTreeSet<Location>) {
        for &loc in locations {
            self.confirm_safe(loc);
        }
    }

    fn confirm_pits_all(&mut self, locations: &BTreeSet<Location>) {
        for &loc in locations {
            self.confirm_pit(loc);
        }
    }

    fn suspect(&mut self, location: Location) {
        if self.suspected_pits.insert(location) {
            debug!(%location, "safety unknown, marking as suspected");
        }
    }
}
