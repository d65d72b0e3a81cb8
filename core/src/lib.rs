// SPDX-License-Identifier: MIT OR Apache-2.0

//! Go rules core - grid, board, placement and superko legality
//!
//! This crate provides the synchronous rules engine:
//! - Bordered storage grid with precomputed neighbours
//! - Value-semantics board snapshots with a structural hash
//! - Move application, capture resolution and suicide handling
//! - Positional superko against the per-game history
//! - A caller-level session layer (turn order, passes, finish policy)

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod game;
pub mod grid;
pub mod moves;
pub mod rules;
pub mod session;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{column_label, Board};
pub use game::{board_snapshot, create_game, is_finished, validate_and_apply, GameState, History};
pub use grid::{Grid, StoragePos};
pub use moves::{Move, Removal};
pub use rules::{Group, Outcome, Resolution, Rules, Ruleset, SuicideRule, Verdict};
pub use session::{
    AnyOf, ConsecutivePasses, FinishPolicy, FinishReason, GameEvent, NeverFinish, NoLegalMoves, Play,
    Session, SessionError,
};

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (traditionally goes first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Playable coordinate, `x` is the column and `y` the row, both in `[0, dim)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is valid for a board of given size
    pub fn is_valid(&self, dim: u8) -> bool {
        self.x < dim && self.y < dim
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Content of a single storage cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    /// Free intersection
    Empty,
    /// Permanent sentinel ring around the playable area
    Border,
    /// A stone of the given color
    Stone(Color),
}

impl Content {
    /// Only empty cells accept a new stone
    pub fn is_playable(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// Color of the stone in this cell, if any
    pub fn stone(&self) -> Option<Color> {
        match self {
            Content::Stone(color) => Some(*color),
            _ => None,
        }
    }

    /// Text glyph used by board rendering and diagrams
    pub fn glyph(&self) -> char {
        match self {
            Content::Empty => '.',
            Content::Border => '#',
            Content::Stone(Color::Black) => 'X',
            Content::Stone(Color::White) => 'O',
        }
    }

    /// Inverse of [`Content::glyph`]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | '+' => Some(Content::Empty),
            '#' => Some(Content::Border),
            'X' | 'x' | 'B' => Some(Content::Stone(Color::Black)),
            'O' | 'o' | 'W' => Some(Content::Stone(Color::White)),
            _ => None,
        }
    }
}

/// Invariant violations: a bug in the caller or in the engine, never an illegal move
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board dimension must be positive
    #[error("Invalid board dimension {0}")]
    InvalidDimension(u8),

    /// Playable accessor addressed outside `[0, dim)`
    #[error("Coordinate ({x}, {y}) outside a {dim}x{dim} board")]
    OutOfBounds { x: u8, y: u8, dim: u8 },

    /// Storage index outside the bordered storage space
    #[error("Storage index {index} outside storage of {len} cells")]
    OutsideStorage { index: usize, len: usize },

    /// Placement target was not empty at application time
    #[error("Cannot place at ({x}, {y}): cell holds {found:?}")]
    OccupiedOrInvalid { x: u8, y: u8, found: Content },

    /// Removal found something other than the expected stone
    #[error("Removal at storage index {index} expected {expected:?} but found {found:?}")]
    UnexpectedContent {
        index: usize,
        expected: Color,
        found: Content,
    },

    /// Border content may only live on the border ring
    #[error("Cannot store border content at ({x}, {y})")]
    BorderContent { x: u8, y: u8 },

    /// The border ring is never written after construction
    #[error("Cannot write the border cell at storage index {index}")]
    BorderWrite { index: usize },

    /// Text diagram could not be parsed into a board
    #[error("Invalid board diagram: {0}")]
    InvalidDiagram(String),
}

/// Validation stage at which a move was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Target out of range or not empty
    Technical,
    /// Own group left without liberties after captures
    Dynamic,
    /// Resulting position already occurred in this game
    Historical,
}

/// An illegal move. Expected and recoverable, reported to the player
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The target is off the board or already occupied
    #[error("{coord} is not a playable point")]
    NotPlayable { coord: Coord },

    /// The move would leave its own group without liberties
    #[error("Move at {coord} would be suicide")]
    Suicide { coord: Coord },

    /// The move would repeat an earlier board position
    #[error("Move at {coord} repeats an earlier position (superko)")]
    Superko { coord: Coord },
}

impl Rejection {
    /// Stage that produced this rejection
    pub fn stage(&self) -> Stage {
        match self {
            Rejection::NotPlayable { .. } => Stage::Technical,
            Rejection::Suicide { .. } => Stage::Dynamic,
            Rejection::Superko { .. } => Stage::Historical,
        }
    }

    /// Target coordinate of the rejected move
    pub fn coord(&self) -> Coord {
        match self {
            Rejection::NotPlayable { coord }
            | Rejection::Suicide { coord }
            | Rejection::Superko { coord } => *coord,
        }
    }
}

/// Failure of [`validate_and_apply`]: either an illegal move or an engine fault
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// The move is illegal
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// An invariant was violated while resolving the move
    #[error("Engine invariant violated: {0}")]
    Engine(#[from] GameError),
}

impl PlayError {
    /// The rejection, when this is an ordinary illegal move
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            PlayError::Rejected(rejection) => Some(*rejection),
            PlayError::Engine(_) => None,
        }
    }
}
