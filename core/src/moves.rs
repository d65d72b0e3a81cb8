// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stone placement and removal

use crate::board::Board;
use crate::grid::StoragePos;
use crate::{Color, Content, Coord, GameError};
use serde::{Deserialize, Serialize};

/// Intended placement of a stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Target playable coordinate
    pub coord: Coord,
    /// Color of the placed stone
    pub color: Color,
}

impl Move {
    /// Create a new move
    pub fn new(coord: Coord, color: Color) -> Self {
        Self { coord, color }
    }

    /// Shorthand for `Move::new(Coord::new(x, y), color)`
    pub fn at(x: u8, y: u8, color: Color) -> Self {
        Self::new(Coord::new(x, y), color)
    }

    /// Return a new board with the stone placed.
    ///
    /// No captures are resolved here and `board` is left untouched. Fails if
    /// the target is off the board or not empty.
    pub fn apply(&self, board: &Board) -> Result<Board, GameError> {
        let pos = board.grid().playable_to_storage(self.coord)?;
        let found = board.at(pos);
        if !found.is_playable() {
            return Err(GameError::OccupiedOrInvalid {
                x: self.coord.x,
                y: self.coord.y,
                found,
            });
        }

        let mut next = board.copy();
        next.put(pos, Content::Stone(self.color))?;
        Ok(next)
    }
}

/// Removal of one captured stone, checked against the stone it expects to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// Storage position of the captured stone
    pub pos: StoragePos,
    /// Color that must currently occupy `pos`
    pub expected: Color,
}

impl Removal {
    /// Create a new removal
    pub fn new(pos: StoragePos, expected: Color) -> Self {
        Self { pos, expected }
    }

    /// Clear the cell in place, refusing to overwrite anything unexpected
    pub fn apply(&self, board: &mut Board) -> Result<(), GameError> {
        let found = board.at(self.pos);
        if found != Content::Stone(self.expected) {
            tracing::warn!(
                index = self.pos.index(),
                expected = ?self.expected,
                found = ?found,
                "Removal precondition failed"
            );
            return Err(GameError::UnexpectedContent {
                index: self.pos.index(),
                expected: self.expected,
                found,
            });
        }

        board.put(self.pos, Content::Empty)
    }
}
