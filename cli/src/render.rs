// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use gorules_core::{column_label, Board, Color, Content, Coord, Session};

/// Render the board with labels on every side
pub fn render_board(board: &Board) -> String {
    let dim = board.dim();
    let mut output = String::new();

    let labels = column_labels(dim);
    output.push_str(&labels);

    for row in 0..dim {
        output.push_str(&format!("{:2} ", row + 1));

        for col in 0..dim {
            let coord = Coord::new(col, row);
            let symbol = match board.get(coord) {
                Ok(Content::Stone(Color::Black)) => '●',
                Ok(Content::Stone(Color::White)) => '○',
                Ok(Content::Empty) if is_star_point(coord, dim) => '+',
                Ok(Content::Empty) => '·',
                Ok(Content::Border) | Err(_) => '?',
            };
            output.push_str(&format!(" {}", symbol));
        }

        output.push_str(&format!(" {}", row + 1));
        output.push('\n');
    }

    output.push_str(&labels);
    output
}

/// One-line summary of whose turn it is and the prisoner counts
pub fn render_status(session: &Session) -> String {
    format!(
        "Move {} - {} to play - prisoners: Black {} / White {}",
        session.moves().len() + 1,
        session.to_move(),
        session.prisoners(Color::Black),
        session.prisoners(Color::White),
    )
}

fn column_labels(dim: u8) -> String {
    let mut labels = String::from("   ");
    for col in 0..dim {
        labels.push(' ');
        labels.push(column_label(col));
    }
    labels.push('\n');
    labels
}

/// Check if a coordinate is a star point on the board
fn is_star_point(coord: Coord, dim: u8) -> bool {
    match dim {
        // Four corner points and the centre
        9 => matches!(
            (coord.x, coord.y),
            (2, 2) | (2, 6) | (4, 4) | (6, 2) | (6, 6)
        ),
        13 => matches!(
            (coord.x, coord.y),
            (3, 3) | (3, 9) | (6, 6) | (9, 3) | (9, 9)
        ),
        // Corners, sides and centre
        19 => [3, 9, 15].contains(&coord.x) && [3, 9, 15].contains(&coord.y),
        _ => false,
    }
}
