// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positional superko on a 6x6 board.
//!
//! The ko sits on the east edge: White owns (4,0), Black builds (5,0),
//! (5,2) and (4,1) around the point (5,1).

use gorules_core::{
    create_game, Board, Color, Content, GameState, History, Move, PlayError, Rejection, Rules,
    Ruleset, Stage, SuicideRule, Verdict,
};

fn play_all(mut state: GameState, moves: &[Move]) -> GameState {
    for mv in moves {
        state = state
            .validate_and_apply(*mv)
            .unwrap_or_else(|err| panic!("{mv:?} should be legal: {err}"));
    }
    state
}

fn ko_setup() -> GameState {
    play_all(
        create_game(6).unwrap(),
        &[
            Move::at(4, 0, Color::White),
            Move::at(5, 0, Color::Black),
            Move::at(5, 2, Color::Black),
            Move::at(4, 1, Color::Black),
        ],
    )
}

fn superko_at(err: PlayError) -> Rejection {
    match err.rejection() {
        Some(rejection) if rejection.stage() == Stage::Historical => rejection,
        other => panic!("expected a superko rejection, got {other:?}"),
    }
}

#[test]
fn immediate_recapture_is_rejected() {
    let before_take = ko_setup();
    let after_take = before_take
        .validate_and_apply(Move::at(5, 1, Color::White))
        .unwrap();
    assert_eq!(after_take.board().count(Color::Black), 2, "(5,0) was taken");

    let err = after_take
        .validate_and_apply(Move::at(5, 0, Color::Black))
        .unwrap_err();
    let rejection = superko_at(err);
    assert_eq!(rejection.coord(), gorules_core::Coord::new(5, 0));

    // The rejected attempt committed nothing.
    assert_eq!(after_take.history().len(), before_take.history().len() + 1);
}

#[test]
fn recapture_after_threats_then_white_retake_is_rejected() {
    let after_take = ko_setup()
        .validate_and_apply(Move::at(5, 1, Color::White))
        .unwrap();

    // Threat and answer elsewhere make the recapture a new position.
    let after_threats = play_all(
        after_take,
        &[Move::at(0, 5, Color::Black), Move::at(2, 5, Color::White)],
    );
    let recaptured = after_threats
        .validate_and_apply(Move::at(5, 0, Color::Black))
        .unwrap();
    assert_eq!(recaptured.board().count(Color::White), 2);

    // White retaking would restore the position after the threats.
    let err = recaptured
        .validate_and_apply(Move::at(5, 1, Color::White))
        .unwrap_err();
    assert_eq!(
        superko_at(err),
        Rejection::Superko {
            coord: gorules_core::Coord::new(5, 1)
        }
    );
}

#[test]
fn repetition_of_any_earlier_position_is_rejected() {
    let current = Board::from_diagram(
        "
        O X .
        . . .
        . . .
        ",
    )
    .unwrap();
    let ancient = Board::from_diagram(
        "
        . X .
        X . .
        . . .
        ",
    )
    .unwrap();
    let mv = Move::at(0, 1, Color::Black);
    let rules = Rules::default();

    let mut recent_only = History::new();
    recent_only.record(current.structural_hash());
    assert!(rules.check(&current, &recent_only, &mv).unwrap().is_legal());

    let mut full = History::new();
    full.record(ancient.structural_hash());
    full.record(Board::new(3).unwrap().structural_hash());
    full.record(current.structural_hash());
    let verdict = rules.check(&current, &full, &mv).unwrap();
    assert!(matches!(verdict, Verdict::Illegal(Rejection::Superko { .. })));
}

#[test]
fn suicide_reproducing_the_position_is_rejected_under_either_rule() {
    let state = ko_setup();
    // Without White's (4,0), Black's (5,0) keeps a liberty and (5,1) is a
    // plain eye for Black.
    let board = Board::from_diagram(
        "
        . . . . . X
        . . . . X .
        . . . . . X
        . . . . . .
        . . . . . .
        . . . . . .
        ",
    )
    .unwrap();
    let white_into_eye = Move::at(5, 1, Color::White);

    let forbidden = GameState::from_board(board.copy(), Ruleset::default());
    let err = forbidden.validate_and_apply(white_into_eye).unwrap_err();
    assert_eq!(err.rejection().map(|r| r.stage()), Some(Stage::Dynamic));

    let allowed = GameState::from_board(
        board,
        Ruleset {
            suicide: SuicideRule::Allowed,
        },
    );
    let err = allowed.validate_and_apply(white_into_eye).unwrap_err();
    assert_eq!(err.rejection().map(|r| r.stage()), Some(Stage::Historical));

    // The ko setup still accepts the capturing version of the same point.
    assert!(state.validate_and_apply(white_into_eye).is_ok());
}

#[test]
fn retake_restoring_the_starting_position_is_rejected() {
    let start = Board::from_diagram(
        "
        . X O .
        X O . O
        . X O .
        . . . .
        ",
    )
    .unwrap();
    let state = GameState::from_board(start.copy(), Ruleset::default());

    let taken = state
        .validate_and_apply(Move::at(2, 1, Color::Black))
        .unwrap();
    assert_eq!(taken.board().get(gorules_core::Coord::new(1, 1)), Ok(Content::Empty));

    let err = taken
        .validate_and_apply(Move::at(1, 1, Color::White))
        .unwrap_err();
    assert_eq!(
        superko_at(err),
        Rejection::Superko {
            coord: gorules_core::Coord::new(1, 1)
        }
    );
    assert_eq!(taken.history().len(), 1);
    assert!(taken.history().contains(start.structural_hash()));
}

#[test]
fn suicide_back_to_the_empty_board_is_rejected() {
    let state = GameState::with_ruleset(
        2,
        Ruleset {
            suicide: SuicideRule::Allowed,
        },
    )
    .unwrap();
    let filled = play_all(
        state,
        &[
            Move::at(0, 0, Color::Black),
            Move::at(1, 0, Color::Black),
            Move::at(0, 1, Color::Black),
        ],
    );

    // Filling the last point removes all four stones.
    let err = filled
        .validate_and_apply(Move::at(1, 1, Color::Black))
        .unwrap_err();
    assert_eq!(err.rejection().map(|r| r.stage()), Some(Stage::Historical));
    assert_eq!(filled.board().count(Color::Black), 3);
}

#[test]
fn history_grows_by_one_per_commit() {
    let state = ko_setup();
    assert_eq!(state.history().len(), 4);
    assert_eq!(state.history().last(), Some(state.board().structural_hash()));

    let mut hashes = state.history().hashes().to_vec();
    hashes.sort_unstable();
    hashes.dedup();
    assert_eq!(hashes.len(), 4, "committed positions are all distinct");
}
