// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::grid::{Grid, StoragePos};
use crate::{Color, Content, Coord, GameError};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Snapshot of cell contents over a [`Grid`].
///
/// Cloning copies the cell storage; the grid itself is immutable and shared.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Arc<Grid>,
    /// Indexed by storage position, border ring included
    cells: Vec<Content>,
}

impl Board {
    /// Create an empty board with its own grid
    pub fn new(dim: u8) -> Result<Self, GameError> {
        Ok(Self::with_grid(Arc::new(Grid::new(dim)?)))
    }

    /// Create an empty board over an existing grid
    pub fn with_grid(grid: Arc<Grid>) -> Self {
        let cells = (0..grid.storage_len())
            .map(|index| {
                if grid.is_border(StoragePos(index)) {
                    Content::Border
                } else {
                    Content::Empty
                }
            })
            .collect();

        Self { grid, cells }
    }

    /// Parse a diagram of `.`, `X` and `O` rows into a board.
    ///
    /// Whitespace inside rows is ignored, blank lines are skipped and the
    /// number of rows fixes the dimension.
    pub fn from_diagram(text: &str) -> Result<Self, GameError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let dim = u8::try_from(rows.len())
            .map_err(|_| GameError::InvalidDiagram(format!("{} rows is too many", rows.len())))?;
        let mut board = Self::new(dim)?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(GameError::InvalidDiagram(format!(
                    "row {} has {} cells, expected {}",
                    y + 1,
                    row.len(),
                    rows.len()
                )));
            }
            for (x, glyph) in row.iter().enumerate() {
                let content = match Content::from_glyph(*glyph) {
                    Some(Content::Border) | None => {
                        return Err(GameError::InvalidDiagram(format!(
                            "unexpected '{}' at row {}",
                            glyph,
                            y + 1
                        )))
                    }
                    Some(content) => content,
                };
                // Both indices are below `dim`, which fits in a u8.
                board.set(Coord::new(x as u8, y as u8), content)?;
            }
        }

        Ok(board)
    }

    /// Grid this board is laid out on
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// Playable dimension
    pub fn dim(&self) -> u8 {
        self.grid.dim()
    }

    /// Independent snapshot with identical content
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// Content at a playable coordinate
    pub fn get(&self, coord: Coord) -> Result<Content, GameError> {
        let pos = self.grid.playable_to_storage(coord)?;
        Ok(self.at(pos))
    }

    /// Overwrite the content at a playable coordinate
    pub fn set(&mut self, coord: Coord, content: Content) -> Result<(), GameError> {
        if content == Content::Border {
            return Err(GameError::BorderContent {
                x: coord.x,
                y: coord.y,
            });
        }
        let pos = self.grid.playable_to_storage(coord)?;
        self.cells[pos.index()] = content;
        Ok(())
    }

    /// Content at a storage position; anything outside storage reads as border
    pub fn at(&self, pos: StoragePos) -> Content {
        self.cells
            .get(pos.index())
            .copied()
            .unwrap_or(Content::Border)
    }

    /// Storage-level write used by placement and removal
    pub(crate) fn put(&mut self, pos: StoragePos, content: Content) -> Result<(), GameError> {
        if self.grid.storage_to_playable(pos)?.is_none() {
            return Err(GameError::BorderWrite { index: pos.index() });
        }
        if content == Content::Border {
            return Err(GameError::BorderWrite { index: pos.index() });
        }
        self.cells[pos.index()] = content;
        Ok(())
    }

    /// Neighbours of a storage position tagged with their current content
    pub fn neighbors(&self, pos: StoragePos) -> impl Iterator<Item = (StoragePos, Content)> + '_ {
        self.grid
            .neighbors(pos)
            .iter()
            .map(move |adjacent| (*adjacent, self.at(*adjacent)))
    }

    /// Hash over dimension and every cell.
    ///
    /// Equal boards hash equally; boards of different dimension hash apart
    /// even when their stones sit on the same coordinates.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Every stone on the board with its playable coordinate
    pub fn stones(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.grid.coords().filter_map(move |coord| {
            let pos = self.grid.playable_to_storage(coord).ok()?;
            self.at(pos).stone().map(|color| (coord, color))
        })
    }

    /// Count stones of specified color on the board
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|content| **content == Content::Stone(color))
            .count()
    }

    /// Every playable cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|content| matches!(content, Content::Empty | Content::Border))
    }

    /// Raw storage dump including the border ring, one storage row per line
    pub fn render_storage(&self) -> String {
        let stride = self.grid.stride();
        let mut output = String::with_capacity(stride * (stride + 1));
        for row in self.cells.chunks(stride) {
            output.extend(row.iter().map(Content::glyph));
            output.push('\n');
        }
        output
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.dim() == other.dim() && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dim().hash(state);
        self.cells.hash(state);
    }
}

/// Column label for a zero-based column, A-Z skipping I
pub fn column_label(col: u8) -> char {
    if col < 8 {
        (b'A' + col) as char
    } else if col < 25 {
        (b'A' + col + 1) as char
    } else {
        '?'
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = self.dim();

        write!(f, "   ")?;
        for col in 0..dim {
            write!(f, " {}", column_label(col))?;
        }
        writeln!(f)?;

        for y in 0..dim {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..dim {
                let glyph = self
                    .get(Coord::new(x, y))
                    .map(|content| content.glyph())
                    .unwrap_or('?');
                write!(f, " {}", glyph)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_is_empty_inside_border() {
        let board = Board::new(4).unwrap();
        assert!(board.is_empty());
        for coord in board.grid().coords() {
            assert_eq!(board.get(coord), Ok(Content::Empty));
        }
        for pos in board.grid().border_positions() {
            assert_eq!(board.at(pos), Content::Border);
        }
        assert_eq!(
            board.get(Coord::new(4, 0)),
            Err(GameError::OutOfBounds { x: 4, y: 0, dim: 4 })
        );
    }

    #[test]
    fn copy_is_independent() {
        let mut original = Board::new(5).unwrap();
        let snapshot = original.copy();
        original
            .set(Coord::new(2, 2), Content::Stone(Color::Black))
            .unwrap();

        assert_eq!(snapshot.get(Coord::new(2, 2)), Ok(Content::Empty));
        assert_ne!(original, snapshot);
        assert_ne!(original.structural_hash(), snapshot.structural_hash());
    }

    #[test]
    fn border_cannot_be_written() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(
            board.set(Coord::new(0, 0), Content::Border),
            Err(GameError::BorderContent { x: 0, y: 0 })
        );
        assert_eq!(
            board.put(StoragePos(0), Content::Empty),
            Err(GameError::BorderWrite { index: 0 })
        );
        assert_eq!(
            board.put(StoragePos(99), Content::Empty),
            Err(GameError::OutsideStorage { index: 99, len: 25 })
        );
    }

    #[test]
    fn hash_depends_on_dimension() {
        let mut small = Board::new(5).unwrap();
        let mut large = Board::new(6).unwrap();
        small.set(Coord::new(1, 1), Content::Stone(Color::White)).unwrap();
        large.set(Coord::new(1, 1), Content::Stone(Color::White)).unwrap();

        assert_ne!(small, large);
        assert_ne!(small.structural_hash(), large.structural_hash());
    }

    #[test]
    fn diagram_round_trips_through_storage_render() {
        let board = Board::from_diagram(
            "
            X . .
            . O .
            . . X
            ",
        )
        .unwrap();

        assert_eq!(board.dim(), 3);
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 1);
        assert_eq!(
            board.render_storage(),
            "#####\n#X..#\n#.O.#\n#..X#\n#####\n"
        );
    }

    #[test]
    fn diagram_rejects_ragged_rows() {
        assert!(matches!(
            Board::from_diagram("..\n.\n"),
            Err(GameError::InvalidDiagram(_))
        ));
        assert!(matches!(
            Board::from_diagram(".#\n..\n"),
            Err(GameError::InvalidDiagram(_))
        ));
        assert_eq!(Board::from_diagram(""), Err(GameError::InvalidDimension(0)));
    }

    #[test]
    fn column_labels_skip_i() {
        assert_eq!(column_label(0), 'A');
        assert_eq!(column_label(7), 'H');
        assert_eq!(column_label(8), 'J');
        assert_eq!(column_label(18), 'T');
        assert_eq!(column_label(24), 'Z');
        assert_eq!(column_label(25), '?');
    }

    #[test]
    fn display_has_labels() {
        let mut board = Board::new(3).unwrap();
        board.set(Coord::new(0, 0), Content::Stone(Color::Black)).unwrap();
        board.set(Coord::new(2, 1), Content::Stone(Color::White)).unwrap();

        let expected = "    A B C\n 1  X . .\n 2  . . O\n 3  . . .\n";
        assert_eq!(board.to_string(), expected);
    }
}
