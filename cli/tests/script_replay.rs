// SPDX-License-Identifier: MIT OR Apache-2.0

// Replays a typed move script through the parser and a session, the same
// path the binary takes for `--script`.
use gorules_cli::config::{CliConfig, FinishMode};
use gorules_cli::{input, render};
use gorules_core::{Color, Coord, Rejection, Session, SessionError};

const KO_SCRIPT: &str = "
# east-edge ko on 6x6
5,0
4,0
5,2
0,3
4,1
5,1
# immediate retake is refused
5,0
A6
C6
5,0
pass
pass
";

fn replay(script: &str, config: &CliConfig) -> (Session, Vec<SessionError>) {
    let mut session =
        Session::new(config.board_size, config.ruleset(), config.finish_policy()).unwrap();
    let mut errors = Vec::new();

    for line in script.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let play = input::parse_play(line, config.board_size).unwrap();
        let color = session.to_move();
        if let Err(err) = session.play(color, play) {
            errors.push(err);
        }
    }

    (session, errors)
}

#[test]
fn ko_script_replays_with_one_rejection() {
    let config = CliConfig {
        board_size: 6,
        ..CliConfig::default()
    };
    let (session, errors) = replay(KO_SCRIPT, &config);

    assert_eq!(
        errors,
        vec![SessionError::Rejected(Rejection::Superko {
            coord: Coord::new(5, 0)
        })]
    );
    assert!(session.is_finished());
    assert_eq!(session.prisoners(Color::Black), 1);
    assert_eq!(session.prisoners(Color::White), 1);

    let board = render::render_board(session.state().board());
    assert_eq!(board.matches('●').count(), 4);
    assert_eq!(board.matches('○').count(), 3);
}

#[test]
fn never_policy_keeps_playing_after_passes() {
    let config = CliConfig {
        board_size: 6,
        finish: FinishMode::Never,
        ..CliConfig::default()
    };
    let (session, errors) = replay(KO_SCRIPT, &config);

    assert_eq!(errors.len(), 1);
    assert!(!session.is_finished());
    assert_eq!(session.consecutive_passes(), 2);
}

#[test]
fn status_line_reports_turn_and_prisoners() {
    let config = CliConfig {
        board_size: 6,
        finish: FinishMode::Never,
        ..CliConfig::default()
    };
    let (session, _) = replay(KO_SCRIPT, &config);
    assert_eq!(
        render::render_status(&session),
        "Move 12 - White to play - prisoners: Black 1 / White 1"
    );
}
