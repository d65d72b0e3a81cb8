// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bordered storage grid
//!
//! Playable coordinates live in `[0, dim) x [0, dim)`. Storage surrounds them
//! with a one-cell ring, so storage is `(dim + 2) x (dim + 2)` and
//! `storage = playable + (1, 1)`. Every non-border storage cell gets its four
//! neighbours precomputed once, in north, east, south, west order.

use crate::{Coord, GameError};
use serde::{Deserialize, Serialize};

/// Linear index into the bordered storage space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoragePos(pub usize);

impl StoragePos {
    /// Raw storage index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Coordinate mapping and neighbour table for a fixed board dimension
#[derive(Debug, PartialEq, Eq)]
pub struct Grid {
    dim: u8,
    stride: usize,
    /// `None` for border cells
    neighbors: Vec<Option<[StoragePos; 4]>>,
}

impl Grid {
    /// Build the grid for a `dim x dim` board
    pub fn new(dim: u8) -> Result<Self, GameError> {
        if dim == 0 {
            return Err(GameError::InvalidDimension(dim));
        }

        let stride = dim as usize + 2;
        let mut neighbors = Vec::with_capacity(stride * stride);

        for sy in 0..stride {
            for sx in 0..stride {
                let border = sx == 0 || sy == 0 || sx == stride - 1 || sy == stride - 1;
                if border {
                    neighbors.push(None);
                    continue;
                }

                let at = |x: usize, y: usize| StoragePos(y * stride + x);
                neighbors.push(Some([
                    at(sx, sy - 1), // north
                    at(sx + 1, sy), // east
                    at(sx, sy + 1), // south
                    at(sx - 1, sy), // west
                ]));
            }
        }

        Ok(Self {
            dim,
            stride,
            neighbors,
        })
    }

    /// Playable dimension
    pub fn dim(&self) -> u8 {
        self.dim
    }

    /// Width of one storage row, `dim + 2`
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total number of storage cells including the border ring
    pub fn storage_len(&self) -> usize {
        self.stride * self.stride
    }

    /// Map a playable coordinate into storage
    pub fn playable_to_storage(&self, coord: Coord) -> Result<StoragePos, GameError> {
        if !coord.is_valid(self.dim) {
            return Err(GameError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                dim: self.dim,
            });
        }

        Ok(StoragePos(
            (coord.y as usize + 1) * self.stride + coord.x as usize + 1,
        ))
    }

    /// Map a storage position back to playable space.
    ///
    /// Returns `Ok(None)` for border cells and an error for indices outside
    /// the storage space altogether.
    pub fn storage_to_playable(&self, pos: StoragePos) -> Result<Option<Coord>, GameError> {
        let (sx, sy) = self.storage_xy(pos)?;
        if self.is_border(pos) {
            return Ok(None);
        }

        // Non-border cells satisfy 1 <= sx, sy <= dim, so the narrowing is lossless.
        Ok(Some(Coord::new((sx - 1) as u8, (sy - 1) as u8)))
    }

    /// Storage column and row of a storage position
    pub fn storage_xy(&self, pos: StoragePos) -> Result<(usize, usize), GameError> {
        if pos.0 >= self.storage_len() {
            return Err(GameError::OutsideStorage {
                index: pos.0,
                len: self.storage_len(),
            });
        }
        Ok((pos.0 % self.stride, pos.0 / self.stride))
    }

    /// Whether the position is on the sentinel ring (or outside storage)
    pub fn is_border(&self, pos: StoragePos) -> bool {
        !matches!(self.neighbors.get(pos.0), Some(Some(_)))
    }

    /// Neighbours of a playable storage cell in north, east, south, west order.
    ///
    /// Border cells and positions outside storage have no neighbour entry.
    pub fn neighbors(&self, pos: StoragePos) -> &[StoragePos] {
        match self.neighbors.get(pos.0) {
            Some(Some(adjacent)) => adjacent.as_slice(),
            _ => &[],
        }
    }

    /// All playable storage positions, row by row
    pub fn playable_positions(&self) -> impl Iterator<Item = StoragePos> + '_ {
        (0..self.storage_len())
            .map(StoragePos)
            .filter(move |pos| !self.is_border(*pos))
    }

    /// All border ring positions
    pub fn border_positions(&self) -> impl Iterator<Item = StoragePos> + '_ {
        (0..self.storage_len())
            .map(StoragePos)
            .filter(move |pos| self.is_border(*pos))
    }

    /// All playable coordinates, row by row
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let dim = self.dim;
        (0..dim).flat_map(move |y| (0..dim).map(move |x| Coord::new(x, y)))
    }
}
