// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-level game session
//!
//! Layers turn order, passes, resignation, prisoner counts and a pluggable
//! end-of-game policy on top of [`GameState`]. Submissions are processed one
//! at a time and only from the side to move.

use crate::game::GameState;
use crate::moves::Move;
use crate::rules::Ruleset;
use crate::{Color, Coord, GameError, PlayError, Rejection};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Something a player can submit on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Play {
    /// Place a stone at the specified coordinate
    Place(Coord),
    /// Pass the turn
    Pass,
    /// Resign the game
    Resign,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// A player resigned
    Resignation {
        /// The player who resigned
        by: Color,
    },
    /// The session's [`FinishPolicy`] reported the game over
    Policy,
}

/// Game events produced by a submitted play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A play was accepted
    MoveMade {
        /// The play that was made
        play: Play,
        /// The player who made it
        by: Color,
    },
    /// Stones were captured
    StonesCaptured {
        /// The coordinates of captured stones
        positions: Vec<Coord>,
        /// The player who lost the stones
        player: Color,
    },
    /// The session is over
    GameFinished {
        /// What ended it
        reason: FinishReason,
    },
}

/// Errors returned by [`Session::play`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The submitting side is not the side to move
    #[error("{got} submitted a move but {expected} is to move")]
    OutOfTurn { expected: Color, got: Color },

    /// The session already finished
    #[error("Game is over")]
    GameOver,

    /// The placement is illegal
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// An engine invariant was violated
    #[error("Engine invariant violated: {0}")]
    Engine(#[from] GameError),
}

impl From<PlayError> for SessionError {
    fn from(err: PlayError) -> Self {
        match err {
            PlayError::Rejected(rejection) => SessionError::Rejected(rejection),
            PlayError::Engine(err) => SessionError::Engine(err),
        }
    }
}

/// Caller-supplied end-of-game rule, checked after every accepted play
pub trait FinishPolicy: fmt::Debug + Send + Sync {
    /// Whether the session should end now
    fn is_finished(&self, session: &Session) -> bool;
}

/// Never ends the game; the rules core default
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFinish;

impl FinishPolicy for NeverFinish {
    fn is_finished(&self, _session: &Session) -> bool {
        false
    }
}

/// Ends the game after `n` consecutive passes
#[derive(Debug, Clone, Copy)]
pub struct ConsecutivePasses(pub u32);

impl Default for ConsecutivePasses {
    fn default() -> Self {
        Self(2)
    }
}

impl FinishPolicy for ConsecutivePasses {
    fn is_finished(&self, session: &Session) -> bool {
        session.consecutive_passes() >= self.0
    }
}

/// Ends the game when the side to move has no legal placement
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLegalMoves;

impl FinishPolicy for NoLegalMoves {
    fn is_finished(&self, session: &Session) -> bool {
        match session.legal_moves() {
            Ok(moves) => moves.is_empty(),
            Err(err) => {
                tracing::warn!("Legal move enumeration failed: {}", err);
                false
            }
        }
    }
}

/// Ends the game as soon as any of the wrapped policies does
#[derive(Debug, Default)]
pub struct AnyOf(pub Vec<Box<dyn FinishPolicy>>);

impl FinishPolicy for AnyOf {
    fn is_finished(&self, session: &Session) -> bool {
        self.0.iter().any(|policy| policy.is_finished(session))
    }
}

/// A game being played, one submission at a time
#[derive(Debug)]
pub struct Session {
    state: GameState,
    to_move: Color,
    moves: Vec<(Color, Play)>,
    consecutive_passes: u32,
    /// Stones captured by (Black, White)
    prisoners: (u32, u32),
    finished: Option<FinishReason>,
    policy: Box<dyn FinishPolicy>,
}

impl Session {
    /// New session on an empty board, Black to move
    pub fn new(
        dim: u8,
        ruleset: Ruleset,
        policy: Box<dyn FinishPolicy>,
    ) -> Result<Self, GameError> {
        Ok(Self::from_state(
            GameState::with_ruleset(dim, ruleset)?,
            Color::Black,
            policy,
        ))
    }

    /// Resume from an existing state
    pub fn from_state(state: GameState, to_move: Color, policy: Box<dyn FinishPolicy>) -> Self {
        Self {
            state,
            to_move,
            moves: Vec::new(),
            consecutive_passes: 0,
            prisoners: (0, 0),
            finished: None,
            policy,
        }
    }

    /// Current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Side expected to submit next
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Accepted plays in order
    pub fn moves(&self) -> &[(Color, Play)] {
        &self.moves
    }

    /// Passes since the last placement
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    /// Stones captured by `color`
    pub fn prisoners(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.prisoners.0,
            Color::White => self.prisoners.1,
        }
    }

    /// Why the session ended, if it has
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finished
    }

    /// Whether the session has ended
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Legal placements for the side to move
    pub fn legal_moves(&self) -> Result<Vec<Coord>, GameError> {
        self.state.legal_moves(self.to_move)
    }

    /// Submit a play for `color`.
    ///
    /// Illegal placements leave the session unchanged and the same side
    /// remains to move.
    pub fn play(&mut self, color: Color, play: Play) -> Result<Vec<GameEvent>, SessionError> {
        if self.finished.is_some() {
            return Err(SessionError::GameOver);
        }
        if color != self.to_move {
            return Err(SessionError::OutOfTurn {
                expected: self.to_move,
                got: color,
            });
        }

        let mut events = vec![GameEvent::MoveMade { play, by: color }];

        match play {
            Play::Place(coord) => {
                let (next, outcome) = self.state.play(Move::new(coord, color))?;
                self.state = next;
                self.consecutive_passes = 0;

                if !outcome.captured.is_empty() {
                    self.add_prisoners(color, outcome.captured.len());
                    events.push(GameEvent::StonesCaptured {
                        positions: outcome.captured,
                        player: color.opposite(),
                    });
                }
                if !outcome.self_captured.is_empty() {
                    self.add_prisoners(color.opposite(), outcome.self_captured.len());
                    events.push(GameEvent::StonesCaptured {
                        positions: outcome.self_captured,
                        player: color,
                    });
                }
            }
            Play::Pass => {
                self.consecutive_passes += 1;
            }
            Play::Resign => {
                self.finished = Some(FinishReason::Resignation { by: color });
            }
        }

        self.moves.push((color, play));
        self.to_move = color.opposite();
        tracing::debug!(by = ?color, play = ?play, move_number = self.moves.len(), "Play accepted");

        if self.finished.is_none() && self.policy.is_finished(self) {
            self.finished = Some(FinishReason::Policy);
        }
        if let Some(reason) = self.finished {
            tracing::info!(reason = ?reason, moves = self.moves.len(), "Game finished");
            events.push(GameEvent::GameFinished { reason });
        }

        Ok(events)
    }

    fn add_prisoners(&mut self, captor: Color, count: usize) {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        let slot = match captor {
            Color::Black => &mut self.prisoners.0,
            Color::White => &mut self.prisoners.1,
        };
        *slot = slot.saturating_add(count);
    }
}
