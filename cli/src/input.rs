// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of typed moves

use anyhow::{anyhow, Result};
use gorules_core::{Coord, Play};

/// Parse `pass`, `resign`, a labelled point like `D4`, or a raw `x,y` pair.
///
/// Labelled rows count from the top, matching the rendered board.
pub fn parse_play(input: &str, dim: u8) -> Result<Play> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "pass" => return Ok(Play::Pass),
        "resign" => return Ok(Play::Resign),
        _ => {}
    }

    let coord = match input.split_once(',') {
        Some((x, y)) => parse_pair(x, y)?,
        None => parse_label(&input, dim)?,
    };

    if !coord.is_valid(dim) {
        return Err(anyhow!(
            "{} is outside the {}x{} board",
            coord,
            dim,
            dim
        ));
    }
    Ok(Play::Place(coord))
}

fn parse_pair(x: &str, y: &str) -> Result<Coord> {
    let x = x.trim().parse::<u8>().map_err(|_| anyhow!("Invalid column '{}'", x.trim()))?;
    let y = y.trim().parse::<u8>().map_err(|_| anyhow!("Invalid row '{}'", y.trim()))?;
    Ok(Coord::new(x, y))
}

fn parse_label(input: &str, dim: u8) -> Result<Coord> {
    let mut chars = input.chars();
    let col_char = chars
        .next()
        .ok_or_else(|| anyhow!("Invalid move format. Examples: 'D4', '3,3', 'pass', 'resign'."))?;
    let row_str = chars.as_str();

    // Parse column (A-Z, skipping I)
    let col = if ('a'..='h').contains(&col_char) {
        col_char as u8 - b'a'
    } else if ('j'..='z').contains(&col_char) {
        col_char as u8 - b'a' - 1
    } else {
        return Err(anyhow!("Invalid column. Must be a letter other than I."));
    };

    let row = match row_str.parse::<u8>() {
        Ok(r) if r > 0 && r <= dim => r - 1,
        _ => return Err(anyhow!("Invalid row. Must be between 1 and {}.", dim)),
    };

    Ok(Coord::new(col, row))
}
