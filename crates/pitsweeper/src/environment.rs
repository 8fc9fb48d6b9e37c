//! Interface to the maze the agent explores.
//!
//! The environment is the authority on geometry and perception; the agent
//! never holds references into it between calls.

use crate::logic::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What the agent perceives on the tile it stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// No adjacent pits
    Safe,
    /// Number of adjacent pits (0..=4)
    Warning(u8),
    /// The tile is a pit
    Pit,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Safe => write!(f, "."),
            Tile::Warning(n) => write!(f, "{}", n),
            Tile::Pit => write!(f, "P"),
        }
    }
}

/// One observation, delivered once per decision step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perception {
    pub location: Location,
    pub tile: Tile,
}

impl Perception {
    pub fn new(location: Location, tile: Tile) -> Self {
        Perception { location, tile }
    }
}

pub trait Environment {
    fn goal_location(&self) -> Location;

    fn player_location(&self) -> Location;

    /// Open (in-bounds, non-wall) locations `radius` steps from `location`
    /// along the four axes
    fn cardinal_neighbors(&self, location: Location, radius: i32) -> BTreeSet<Location>;

    /// Reachable, unexplored locations the agent may move into next
    fn frontier_locations(&self) -> BTreeSet<Location>;
}
