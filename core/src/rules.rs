// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rules and validation logic
//!
//! A move passes three stages in order, each running only if the previous
//! one passed:
//! 1. technical: the target is on the board and empty
//! 2. dynamic: opponent groups left without liberties are captured, then the
//!    mover's own group is checked for suicide
//! 3. historical: the resulting position must not appear in the game history
//!    (positional superko)

use crate::board::Board;
use crate::game::History;
use crate::grid::StoragePos;
use crate::moves::{Move, Removal};
use crate::{Color, Content, Coord, GameError, Rejection};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Treatment of a placement that leaves its own group without liberties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuicideRule {
    /// Suicide is rejected at the dynamic stage
    #[default]
    Forbidden,
    /// The group is removed and superko decides; single-stone suicide
    /// always repeats the current position and is rejected there
    Allowed,
}

/// Rule variations supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ruleset {
    /// Suicide handling
    #[serde(default)]
    pub suicide: SuicideRule,
}

/// Maximal connected set of same-colored stones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Color shared by every member
    pub color: Color,
    /// Member stones, in discovery order starting at the origin
    pub stones: Vec<StoragePos>,
    /// Empty cells adjacent to any member
    pub liberties: HashSet<StoragePos>,
}

impl Group {
    /// Number of distinct liberties
    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    /// A group with no liberties is captured
    pub fn is_dead(&self) -> bool {
        self.liberties.is_empty()
    }

    /// Number of stones in the group
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// Groups always hold at least their origin stone
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// Board after placement and capture resolution, before the superko check
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Resulting board
    pub board: Board,
    /// Opponent stones removed by the placement
    pub captured: Vec<Coord>,
    /// Own stones removed because the placement was suicide
    pub self_captured: Vec<Coord>,
}

/// A legal move together with everything needed to commit it
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The validated move
    pub mv: Move,
    /// Board after the move and its captures
    pub board: Board,
    /// Structural hash of `board`
    pub hash: u64,
    /// Opponent stones removed
    pub captured: Vec<Coord>,
    /// Own stones removed (only under [`SuicideRule::Allowed`])
    pub self_captured: Vec<Coord>,
}

/// Result of checking a move
#[derive(Debug, Clone)]
pub enum Verdict {
    /// The move may be committed
    Legal(Outcome),
    /// The move is illegal
    Illegal(Rejection),
}

impl Verdict {
    /// Whether the move passed every stage
    pub fn is_legal(&self) -> bool {
        matches!(self, Verdict::Legal(_))
    }
}

/// Validation and state-transition engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Rules {
    ruleset: Ruleset,
}

impl Rules {
    /// Create a rules engine for the given variation
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    /// Active rule variation
    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// Group containing the stone at `pos`, or `None` if `pos` holds no stone.
    ///
    /// Breadth-first over same-colored neighbours; every cell is visited at
    /// most once.
    pub fn group_at(board: &Board, pos: StoragePos) -> Option<Group> {
        let color = board.at(pos).stone()?;

        let mut stones = Vec::new();
        let mut liberties = HashSet::new();
        let mut visited = HashSet::from([pos]);
        let mut frontier = VecDeque::from([pos]);

        while let Some(current) = frontier.pop_front() {
            stones.push(current);

            for (adjacent, content) in board.neighbors(current) {
                match content {
                    Content::Empty => {
                        liberties.insert(adjacent);
                    }
                    Content::Stone(other) if other == color => {
                        if visited.insert(adjacent) {
                            frontier.push_back(adjacent);
                        }
                    }
                    _ => {}
                }
            }
        }

        tracing::trace!(
            origin = pos.index(),
            stones = stones.len(),
            liberties = liberties.len(),
            "Walked group"
        );

        Some(Group {
            color,
            stones,
            liberties,
        })
    }

    /// Group containing the stone at a playable coordinate
    pub fn group_at_coord(board: &Board, coord: Coord) -> Result<Option<Group>, GameError> {
        let pos = board.grid().playable_to_storage(coord)?;
        Ok(Self::group_at(board, pos))
    }

    /// Stage 1: target on the board and empty
    pub fn is_technically_valid(board: &Board, mv: &Move) -> bool {
        matches!(board.get(mv.coord), Ok(Content::Empty))
    }

    /// Stage 2: place the stone, capture dead opponent groups, then remove the
    /// mover's own group if it is left without liberties.
    ///
    /// Captures run before the self-liberty check, which is what lets a stone
    /// with no liberties of its own survive by capturing.
    pub fn resolve(board: &Board, mv: &Move) -> Result<Resolution, GameError> {
        let mut next = mv.apply(board)?;
        let origin = next.grid().playable_to_storage(mv.coord)?;
        let opponent = mv.color.opposite();

        let adjacent: Vec<StoragePos> = next.grid().neighbors(origin).to_vec();
        let mut captured = Vec::new();
        for pos in adjacent {
            if next.at(pos) != Content::Stone(opponent) {
                continue;
            }
            if let Some(group) = Self::group_at(&next, pos) {
                if group.is_dead() {
                    captured.extend(Self::remove_group(&mut next, &group)?);
                }
            }
        }

        let mut self_captured = Vec::new();
        if let Some(own) = Self::group_at(&next, origin) {
            if own.is_dead() {
                self_captured = Self::remove_group(&mut next, &own)?;
            }
        }

        if !captured.is_empty() {
            tracing::debug!(
                at = %mv.coord,
                color = ?mv.color,
                stones = captured.len(),
                "Captured opponent stones"
            );
        }
        if !self_captured.is_empty() {
            tracing::debug!(
                at = %mv.coord,
                color = ?mv.color,
                stones = self_captured.len(),
                "Placement removed its own group"
            );
        }

        Ok(Resolution {
            board: next,
            captured,
            self_captured,
        })
    }

    /// Run all three stages for `mv` against `board` and `history`.
    ///
    /// `history` must already hold `board` itself, either as its starting
    /// position or as its last committed entry.
    ///
    /// Illegal moves come back as [`Verdict::Illegal`]; an `Err` means an
    /// engine invariant was broken.
    pub fn check(&self, board: &Board, history: &History, mv: &Move) -> Result<Verdict, GameError> {
        if !Self::is_technically_valid(board, mv) {
            return Ok(Verdict::Illegal(Rejection::NotPlayable { coord: mv.coord }));
        }

        let resolution = Self::resolve(board, mv)?;
        if !resolution.self_captured.is_empty() && self.ruleset.suicide == SuicideRule::Forbidden {
            return Ok(Verdict::Illegal(Rejection::Suicide { coord: mv.coord }));
        }

        let hash = resolution.board.structural_hash();
        if history.contains(hash) {
            tracing::debug!(at = %mv.coord, color = ?mv.color, hash, "Superko repetition");
            return Ok(Verdict::Illegal(Rejection::Superko { coord: mv.coord }));
        }

        Ok(Verdict::Legal(Outcome {
            mv: *mv,
            board: resolution.board,
            hash,
            captured: resolution.captured,
            self_captured: resolution.self_captured,
        }))
    }

    /// Every coordinate where `color` may legally play
    pub fn legal_moves(
        &self,
        board: &Board,
        history: &History,
        color: Color,
    ) -> Result<Vec<Coord>, GameError> {
        let mut legal = Vec::new();
        for coord in board.grid().coords() {
            if self.check(board, history, &Move::new(coord, color))?.is_legal() {
                legal.push(coord);
            }
        }
        Ok(legal)
    }

    fn remove_group(board: &mut Board, group: &Group) -> Result<Vec<Coord>, GameError> {
        let mut removed = Vec::with_capacity(group.len());
        for pos in &group.stones {
            Removal::new(*pos, group.color).apply(board)?;
            if let Some(coord) = board.grid().storage_to_playable(*pos)? {
                removed.push(coord);
            }
        }
        Ok(removed)
    }
}
