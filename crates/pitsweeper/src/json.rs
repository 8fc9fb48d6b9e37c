//! JSON serialization types for knowledge-base and agent snapshots

use crate::agent::MazeAgent;
use crate::config::AgentConfig;
use crate::knowledge_base::KnowledgeBase;
use crate::logic::{Clause, Location, SignedProposition};
use serde::{Deserialize, Serialize};

/// JSON representation of a signed proposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub symbol: String,
    pub location: Location,
    pub polarity: bool,
}

impl LiteralJson {
    pub fn from_literal(lit: &SignedProposition) -> Self {
        LiteralJson {
            symbol: lit.proposition.symbol.name().to_string(),
            location: lit.proposition.location,
            polarity: lit.polarity,
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseJson {
    pub literals: Vec<LiteralJson>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tautology: bool,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause) -> Self {
        ClauseJson {
            literals: clause.literals().map(|l| LiteralJson::from_literal(&l)).collect(),
            tautology: clause.is_tautology(),
        }
    }
}

/// JSON representation of a knowledge base, clauses in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseJson {
    pub clauses: Vec<ClauseJson>,
}

impl KnowledgeBaseJson {
    pub fn from_kb(kb: &KnowledgeBase) -> Self {
        KnowledgeBaseJson {
            clauses: kb.clauses().map(ClauseJson::from_clause).collect(),
        }
    }
}

/// JSON representation of everything the agent knows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentJson {
    pub goal: Location,
    pub config: AgentConfig,
    pub safe_tiles: Vec<Location>,
    pub pit_tiles: Vec<Location>,
    pub suspected_pits: Vec<Location>,
    pub knowledge_base: KnowledgeBaseJson,
}

impl AgentJson {
    pub fn from_agent(agent: &MazeAgent) -> Self {
        AgentJson {
            goal: agent.goal(),
            config: agent.config().clone(),
            safe_tiles: agent.safe_tiles().iter().copied().collect(),
            pit_tiles: agent.pit_tiles().iter().copied().collect(),
            suspected_pits: agent.suspected_pits().iter().copied().collect(),
            knowledge_base: KnowledgeBaseJson::from_kb(agent.knowledge_base()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Environment, Perception, Tile};
    use std::collections::BTreeSet;

    struct Line;

    impl Environment for Line {
        fn goal_location(&self) -> Location {
            Location::new(4, 0)
        }

        fn player_location(&self) -> Location {
            Location::new(0, 0)
        }

        fn cardinal_neighbors(&self, location: Location, radius: i32) -> BTreeSet<Location> {
            location
                .cardinal(radius)
                .into_iter()
                .filter(|l| l.row == 0 && (0..5).contains(&l.col))
                .collect()
        }

        fn frontier_locations(&self) -> BTreeSet<Location> {
            BTreeSet::new()
        }
    }

    #[test]
    fn test_clause_json() {
        let clause = Clause::new([
            SignedProposition::pit(Location::new(1, 2), true),
            SignedProposition::pit(Location::new(0, 0), false),
        ]);
        let json = serde_json::to_value(ClauseJson::from_clause(&clause)).unwrap();
        assert_eq!(json["literals"][0]["location"]["col"], 0);
        assert_eq!(json["literals"][0]["polarity"], false);
        assert_eq!(json["literals"][1]["symbol"], "P");
        assert!(json.get("tautology").is_none());
    }

    #[test]
    fn test_agent_snapshot() {
        let env = Line;
        let mut agent = MazeAgent::new(&env, AgentConfig::default());
        agent.observe(&env, &Perception::new(Location::new(1, 0), Tile::Warning(1)));

        let snapshot = AgentJson::from_agent(&agent);
        assert_eq!(snapshot.goal, Location::new(4, 0));
        assert!(snapshot.pit_tiles.contains(&Location::new(2, 0)));
        assert_eq!(snapshot.knowledge_base.clauses.len(), agent.knowledge_base().len());

        let text = serde_json::to_string(&snapshot).unwrap();
        let back: AgentJson = serde_json::from_str(&text).unwrap();
        assert_eq!(back.pit_tiles, snapshot.pit_tiles);
    }
}
