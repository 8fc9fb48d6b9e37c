//! Text-grid mazes.
//!
//! A maze is a rectangle of characters, one row per line:
//!
//! ```text
//! #######
//! #@..P.#
//! #.#...#
//! #..P.G#
//! #######
//! ```
//!
//! `#` is a wall, `.` floor, `P` a pit, `@` the start and `G` the goal.
//! Short lines are padded with walls. Columns grow to the right and rows
//! grow downwards, both starting at zero.

use crate::environment::{Environment, Perception, Tile};
use crate::error::{PitsweeperError, Result};
use crate::logic::Location;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Wall,
    Floor,
    Pit,
}

#[derive(Debug, Clone)]
pub struct GridMaze {
    cells: Vec<Vec<Cell>>,
    width: usize,
    start: Location,
    goal: Location,
    player: Location,
    explored: BTreeSet<Location>,
}

impl GridMaze {
    pub fn parse(text: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (row, line) in text.lines().enumerate() {
            let line = line.trim_end();
            let mut cell_row = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let here = Location::new(col as i32, row as i32);
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Floor,
                    'P' => Cell::Pit,
                    '@' => {
                        set_once(&mut start, here, "start", row, col)?;
                        Cell::Floor
                    }
                    'G' => {
                        set_once(&mut goal, here, "goal", row, col)?;
                        Cell::Floor
                    }
                    other => {
                        return Err(PitsweeperError::MazeParse {
                            line: row + 1,
                            column: col + 1,
                            message: format!("unexpected character '{}'", other),
                        })
                    }
                };
                cell_row.push(cell);
            }
            cells.push(cell_row);
        }

        // Trailing blank lines are not part of the grid
        while cells.last().is_some_and(|r| r.is_empty()) {
            cells.pop();
        }
        if cells.is_empty() {
            return Err(PitsweeperError::InvalidMaze("maze is empty".into()));
        }

        let start = start.ok_or_else(|| PitsweeperError::InvalidMaze("no start ('@')".into()))?;
        let goal = goal.ok_or_else(|| PitsweeperError::InvalidMaze("no goal ('G')".into()))?;

        let width = cells.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut cells {
            row.resize(width, Cell::Wall);
        }

        Ok(GridMaze {
            cells,
            width,
            start,
            goal,
            player: start,
            explored: BTreeSet::from([start]),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn start(&self) -> Location {
        self.start
    }

    /// In bounds and not a wall
    pub fn is_open(&self, location: Location) -> bool {
        self.cell(location).is_some_and(|c| c != Cell::Wall)
    }

    pub fn is_pit(&self, location: Location) -> bool {
        self.cell(location) == Some(Cell::Pit)
    }

    /// Number of pits in the four cardinal neighbours
    pub fn adjacent_pits(&self, location: Location) -> u8 {
        location
            .cardinal(1)
            .into_iter()
            .filter(|&n| self.is_pit(n))
            .count() as u8
    }

    /// What the agent sees standing on `location`
    pub fn perceive_at(&self, location: Location) -> Perception {
        let tile = if self.is_pit(location) {
            Tile::Pit
        } else {
            match self.adjacent_pits(location) {
                0 => Tile::Safe,
                n => Tile::Warning(n),
            }
        };
        Perception::new(location, tile)
    }

    /// What the agent sees where it currently stands
    pub fn perceive(&self) -> Perception {
        self.perceive_at(self.player)
    }

    /// Move the player to `target`, which must be explored or on the frontier.
    pub fn move_to(&mut self, target: Location) -> Result<Perception> {
        if !self.explored.contains(&target) && !self.frontier_locations().contains(&target) {
            return Err(PitsweeperError::IllegalMove(target));
        }
        self.player = target;
        self.explored.insert(target);
        Ok(self.perceive())
    }

    fn cell(&self, location: Location) -> Option<Cell> {
        let row = usize::try_from(location.row).ok()?;
        let col = usize::try_from(location.col).ok()?;
        self.cells.get(row)?.get(col).copied()
    }
}

fn set_once(
    slot: &mut Option<Location>,
    here: Location,
    what: &str,
    row: usize,
    col: usize,
) -> Result<()> {
    if slot.replace(here).is_some() {
        return Err(PitsweeperError::MazeParse {
            line: row + 1,
            column: col + 1,
            message: format!("second {} marker", what),
        });
    }
    Ok(())
}

impl Environment for GridMaze {
    fn goal_location(&self) -> Location {
        self.goal
    }

    fn player_location(&self) -> Location {
        self.player
    }

    fn cardinal_neighbors(&self, location: Location, radius: i32) -> BTreeSet<Location> {
        location
            .cardinal(radius)
            .into_iter()
            .filter(|&n| self.is_open(n))
            .collect()
    }

    fn frontier_locations(&self) -> BTreeSet<Location> {
        self.explored
            .iter()
            .flat_map(|&loc| self.cardinal_neighbors(loc, 1))
            .filter(|loc| !self.explored.contains(loc))
            .collect()
    }
}

/// Renders the grid with the player as `@`, unexplored floor as `?` and
/// explored floor by its warning count.
impl fmt::Display for GridMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                let here = Location::new(col as i32, row as i32);
                let ch = if here == self.player {
                    '@'
                } else if cell == Cell::Wall {
                    '#'
                } else if here == self.goal {
                    'G'
                } else if !self.explored.contains(&here) {
                    '?'
                } else {
                    match self.perceive_at(here).tile {
                        Tile::Pit => 'P',
                        Tile::Safe => '.',
                        Tile::Warning(n) => char::from_digit(n as u32, 10).unwrap_or('!'),
                    }
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
#####
#@.P#
#..G#
#####
";

    fn loc(col: i32, row: i32) -> Location {
        Location::new(col, row)
    }

    #[test]
    fn test_parse() {
        let maze = GridMaze::parse(SMALL).unwrap();
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.height(), 4);
        assert_eq!(maze.start(), loc(1, 1));
        assert_eq!(maze.goal_location(), loc(3, 2));
        assert_eq!(maze.player_location(), loc(1, 1));
        assert!(maze.is_pit(loc(3, 1)));
        assert!(!maze.is_open(loc(0, 0)));
        assert!(!maze.is_open(loc(-1, 2)));
    }

    #[test]
    fn test_parse_errors() {
        let err = GridMaze::parse("#@x#\n#G.#\n").unwrap_err();
        assert!(matches!(err, PitsweeperError::MazeParse { line: 1, column: 3, .. }));

        let err = GridMaze::parse("#@@G#\n").unwrap_err();
        assert!(matches!(err, PitsweeperError::MazeParse { line: 1, column: 3, .. }));

        assert!(matches!(GridMaze::parse("#..G#\n"), Err(PitsweeperError::InvalidMaze(_))));
        assert!(matches!(GridMaze::parse("\n\n"), Err(PitsweeperError::InvalidMaze(_))));
    }

    #[test]
    fn test_short_lines_are_walls() {
        let maze = GridMaze::parse("#@..\n#G\n").unwrap();
        assert_eq!(maze.width(), 4);
        assert!(!maze.is_open(loc(3, 1)));
    }

    #[test]
    fn test_perception() {
        let maze = GridMaze::parse(SMALL).unwrap();
        assert_eq!(maze.perceive().tile, Tile::Safe);
        assert_eq!(maze.perceive_at(loc(2, 1)).tile, Tile::Warning(1));
        assert_eq!(maze.perceive_at(loc(3, 2)).tile, Tile::Warning(1));
        assert_eq!(maze.perceive_at(loc(3, 1)).tile, Tile::Pit);
    }

    #[test]
    fn test_neighbors_skip_walls() {
        let maze = GridMaze::parse(SMALL).unwrap();
        let around = maze.cardinal_neighbors(loc(1, 1), 1);
        assert_eq!(around, BTreeSet::from([loc(2, 1), loc(1, 2)]));
    }

    #[test]
    fn test_frontier_grows_with_moves() {
        let mut maze = GridMaze::parse(SMALL).unwrap();
        assert_eq!(maze.frontier_locations(), BTreeSet::from([loc(2, 1), loc(1, 2)]));

        let perception = maze.move_to(loc(2, 1)).unwrap();
        assert_eq!(perception, Perception::new(loc(2, 1), Tile::Warning(1)));
        assert_eq!(
            maze.frontier_locations(),
            BTreeSet::from([loc(3, 1), loc(1, 2), loc(2, 2)])
        );
    }

    #[test]
    fn test_illegal_move() {
        let mut maze = GridMaze::parse(SMALL).unwrap();
        assert!(matches!(
            maze.move_to(loc(3, 2)),
            Err(PitsweeperError::IllegalMove(l)) if l == loc(3, 2)
        ));
        assert!(matches!(maze.move_to(loc(0, 0)), Err(PitsweeperError::IllegalMove(_))));
        // Moving back onto explored ground is fine
        assert!(maze.move_to(loc(1, 1)).is_ok());
    }

    #[test]
    fn test_display() {
        let mut maze = GridMaze::parse(SMALL).unwrap();
        maze.move_to(loc(2, 1)).unwrap();
        assert_eq!(maze.to_string(), "#####\n#.@?#\n#??G#\n#####\n");
    }
}
