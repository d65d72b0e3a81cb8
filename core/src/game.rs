// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-game state: current board plus the history of committed positions

use crate::board::Board;
use crate::moves::Move;
use crate::rules::{Outcome, Rules, Ruleset, Verdict};
use crate::{Color, Coord, GameError, PlayError};
use std::collections::HashSet;

/// Ordered record of board hashes, one per committed move.
///
/// The starting position, when known, is remembered for lookups but is not
/// a committed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    start: Option<u64>,
    hashes: Vec<u64>,
    seen: HashSet<u64>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// History of a game that began in the position hashing to `start`
    pub fn starting_at(start: u64) -> Self {
        Self {
            start: Some(start),
            hashes: Vec::new(),
            seen: HashSet::from([start]),
        }
    }

    /// Hash of the starting position
    pub fn start(&self) -> Option<u64> {
        self.start
    }

    /// Append a committed position
    pub fn record(&mut self, hash: u64) {
        self.hashes.push(hash);
        self.seen.insert(hash);
    }

    /// Whether the position occurred at any earlier point of the game,
    /// the starting position included
    pub fn contains(&self, hash: u64) -> bool {
        self.seen.contains(&hash)
    }

    /// Hashes in commit order
    pub fn hashes(&self) -> &[u64] {
        &self.hashes
    }

    /// Most recently committed position
    pub fn last(&self) -> Option<u64> {
        self.hashes.last().copied()
    }

    /// Number of committed positions
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Nothing committed yet
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Board and history of one game.
///
/// Every transition returns a new `GameState`; a state handed out is never
/// mutated again.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    history: History,
    rules: Rules,
}

impl GameState {
    /// Start a game on an empty `dim x dim` board with default rules
    pub fn new(dim: u8) -> Result<Self, GameError> {
        Self::with_ruleset(dim, Ruleset::default())
    }

    /// Start a game on an empty board with the given rule variation
    pub fn with_ruleset(dim: u8, ruleset: Ruleset) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new(dim)?, ruleset))
    }

    /// Start from an arbitrary position; only that position is remembered
    pub fn from_board(board: Board, ruleset: Ruleset) -> Self {
        Self {
            history: History::starting_at(board.structural_hash()),
            board,
            rules: Rules::new(ruleset),
        }
    }

    /// Current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Committed positions
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Rules engine in force for this game
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Check a move without committing it
    pub fn check(&self, mv: &Move) -> Result<Verdict, GameError> {
        self.rules.check(&self.board, &self.history, mv)
    }

    /// Validate `mv` and, if legal, return the next state with its outcome
    pub fn play(&self, mv: Move) -> Result<(GameState, Outcome), PlayError> {
        match self.check(&mv)? {
            Verdict::Legal(outcome) => {
                let mut history = self.history.clone();
                history.record(outcome.hash);
                let next = GameState {
                    board: outcome.board.clone(),
                    history,
                    rules: self.rules,
                };
                Ok((next, outcome))
            }
            Verdict::Illegal(rejection) => Err(PlayError::Rejected(rejection)),
        }
    }

    /// Validate `mv` and return the next state
    pub fn validate_and_apply(&self, mv: Move) -> Result<GameState, PlayError> {
        self.play(mv).map(|(next, _)| next)
    }

    /// Every coordinate where `color` may legally play
    pub fn legal_moves(&self, color: Color) -> Result<Vec<Coord>, GameError> {
        self.rules.legal_moves(&self.board, &self.history, color)
    }

    /// Termination hook; the rules core never ends a game by itself.
    ///
    /// See [`crate::session::FinishPolicy`] for caller-level policies.
    pub fn is_finished(&self) -> bool {
        false
    }
}

/// Start a game on an empty `dim x dim` board
pub fn create_game(dim: u8) -> Result<GameState, GameError> {
    GameState::new(dim)
}

/// Validate a move and return the state after it
pub fn validate_and_apply(state: &GameState, mv: Move) -> Result<GameState, PlayError> {
    state.validate_and_apply(mv)
}

/// Read-only view of the current board, for rendering
pub fn board_snapshot(state: &GameState) -> &Board {
    state.board()
}

/// Whether the game has ended; always `false` in the rules core
pub fn is_finished(state: &GameState) -> bool {
    state.is_finished()
}
