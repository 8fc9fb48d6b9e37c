//! Locations, propositions and signed propositions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A maze coordinate as `(column, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub col: i32,
    pub row: i32,
}

impl Location {
    pub const fn new(col: i32, row: i32) -> Self {
        Location { col, row }
    }

    /// Manhattan distance between two locations
    pub fn manhattan(&self, other: &Location) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// The four locations `radius` steps away along each axis (unchecked against any maze)
    pub fn cardinal(&self, radius: i32) -> [Location; 4] {
        [
            Location::new(self.col, self.row - radius),
            Location::new(self.col + radius, self.row),
            Location::new(self.col, self.row + radius),
            Location::new(self.col - radius, self.row),
        ]
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Symbols of the proposition alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    /// "A pit is present at the location"
    Pit,
}

impl Symbol {
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Pit => "P",
        }
    }
}

/// An atomic statement about one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Proposition {
    pub symbol: Symbol,
    pub location: Location,
}

impl Proposition {
    pub fn new(symbol: Symbol, location: Location) -> Self {
        Proposition { symbol, location }
    }

    /// `P(location)`
    pub fn pit(location: Location) -> Self {
        Proposition::new(Symbol::Pit, location)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol.name(), self.location)
    }
}

/// A proposition with a polarity (`true` = asserted, `false` = negated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedProposition {
    pub proposition: Proposition,
    pub polarity: bool,
}

impl SignedProposition {
    pub fn new(proposition: Proposition, polarity: bool) -> Self {
        SignedProposition {
            proposition,
            polarity,
        }
    }

    /// `P(location)` when `is_pit`, `~P(location)` otherwise
    pub fn pit(location: Location, is_pit: bool) -> Self {
        SignedProposition::new(Proposition::pit(location), is_pit)
    }

    /// Same proposition, opposite polarity
    pub fn negated(&self) -> Self {
        SignedProposition::new(self.proposition, !self.polarity)
    }
}

impl fmt::Display for SignedProposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.proposition)
    }
}
