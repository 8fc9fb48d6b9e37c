//! Error types for Pitsweeper

use crate::logic::Location;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PitsweeperError {
    #[error("Frontier is empty: no move is available")]
    EmptyFrontier,

    #[error("Illegal move to {0}: location is not on the frontier")]
    IllegalMove(Location),

    #[error("Maze parse error at line {line}, column {column}: {message}")]
    MazeParse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid maze: {0}")]
    InvalidMaze(String),

    #[error("Step limit of {0} reached before the goal")]
    StepLimit(usize),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PitsweeperError>;
