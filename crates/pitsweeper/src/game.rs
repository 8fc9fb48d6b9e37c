//! Game loop: perceive, think, move, until the goal is reached.

use crate::agent::MazeAgent;
use crate::config::AgentConfig;
use crate::environment::{Environment, Tile};
use crate::error::{PitsweeperError, Result};
use crate::logic::Location;
use crate::maze::GridMaze;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Outcome of one game
#[derive(Debug, Clone)]
pub struct GameReport {
    /// Number of moves made
    pub moves: usize,
    /// Number of times the agent stepped into a pit
    pub pits_hit: usize,
    /// Every location visited, starting with the start tile
    pub path: Vec<Location>,
    pub elapsed: Duration,
}

impl Serialize for GameReport {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("GameReport", 4)?;
        s.serialize_field("moves", &self.moves)?;
        s.serialize_field("pits_hit", &self.pits_hit)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("elapsed", &self.elapsed.as_secs_f64())?;
        s.end()
    }
}

/// Play `maze` from its current position with a fresh agent.
pub fn play(maze: &mut GridMaze, config: AgentConfig, max_steps: usize) -> Result<GameReport> {
    let mut agent = MazeAgent::new(&*maze, config);
    run(maze, &mut agent, max_steps)
}

/// Drive `agent` through `maze` until it stands on the goal.
///
/// Stepping into a pit is counted but does not end the game. Fails with
/// [`PitsweeperError::StepLimit`] after `max_steps` moves without reaching
/// the goal.
pub fn run(maze: &mut GridMaze, agent: &mut MazeAgent, max_steps: usize) -> Result<GameReport> {
    let start_time = Instant::now();
    let goal = maze.goal_location();
    let mut perception = maze.perceive();
    let mut path = vec![perception.location];
    let mut pits_hit = 0;

    while perception.location != goal {
        if path.len() > max_steps {
            return Err(PitsweeperError::StepLimit(max_steps));
        }
        let target = agent.think(&*maze, &perception)?;
        perception = maze.move_to(target)?;
        path.push(target);
        if perception.tile == Tile::Pit {
            pits_hit += 1;
            warn!(location = %target, "stepped into a pit");
        }
    }

    let report = GameReport {
        moves: path.len() - 1,
        pits_hit,
        path,
        elapsed: start_time.elapsed(),
    };
    info!(moves = report.moves, pits_hit, "reached the goal");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor() {
        let mut maze = GridMaze::parse("#####\n#@.G#\n#####\n").unwrap();
        let report = play(&mut maze, AgentConfig::default(), 10).unwrap();
        assert_eq!(report.moves, 2);
        assert_eq!(report.pits_hit, 0);
        assert_eq!(report.path, vec![Location::new(1, 1), Location::new(2, 1), Location::new(3, 1)]);
    }

    #[test]
    fn test_step_limit() {
        let mut maze = GridMaze::parse("#######\n#@...G#\n#######\n").unwrap();
        let result = play(&mut maze, AgentConfig::default(), 2);
        assert!(matches!(result, Err(PitsweeperError::StepLimit(2))));
    }

    #[test]
    fn test_disconnected_goal() {
        let mut maze = GridMaze::parse("######\n#@.#G#\n######\n").unwrap();
        let result = play(&mut maze, AgentConfig::default(), 10);
        assert!(matches!(result, Err(PitsweeperError::EmptyFrontier)));
    }

    #[test]
    fn test_report_serializes_elapsed_as_seconds() {
        let report = GameReport {
            moves: 1,
            pits_hit: 0,
            path: vec![Location::new(0, 0), Location::new(1, 0)],
            elapsed: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elapsed"], 1.5);
        assert_eq!(json["path"][1]["col"], 1);
        assert!(json.get("reached_goal").is_none());
    }
}
