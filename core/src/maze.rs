use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Smallest row or column count that still leaves room for a wall ring around a path.
pub const MIN_EXTENT: usize = 3;

/// Checks requested maze extents and converts them to grid coordinates.
pub(crate) fn checked_size(rows: usize, cols: usize) -> Result<Coord2> {
    let invalid = GameError::InvalidDimensions { rows, cols };
    if rows < MIN_EXTENT || cols < MIN_EXTENT {
        return Err(invalid);
    }
    let rows = Coord::try_from(rows).map_err(|_| invalid)?;
    let cols = Coord::try_from(cols).map_err(|_| invalid)?;
    Ok((rows, cols))
}

/// A freshly generated maze: the grid plus the entry the player starts on and the goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    grid: Array2<Tile>,
    start: Coord2,
    end: Coord2,
}

impl Maze {
    pub(crate) const fn new_unchecked(grid: Array2<Tile>, start: Coord2, end: Coord2) -> Self {
        Self { grid, start, end }
    }

    /// Wraps an existing grid, checking it describes a playable level.
    ///
    /// The grid must be at least 3x3, contain no [`Tile::Empty`], hold exactly one
    /// [`Tile::Player`] at `start` and exactly one [`Tile::Goal`] at `end`.
    pub fn new(grid: Array2<Tile>, start: Coord2, end: Coord2) -> Result<Self> {
        let (rows, cols) = grid.dim();
        let size = checked_size(rows, cols)?;
        for (row, col) in [start, end] {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::InvalidCoords);
            }
        }

        let count = |wanted: Tile| grid.iter().filter(|&&tile| tile == wanted).count();
        if count(Tile::Empty) != 0
            || count(Tile::Player) != 1
            || count(Tile::Goal) != 1
            || grid[start.to_nd_index()] != Tile::Player
            || grid[end.to_nd_index()] != Tile::Goal
        {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self::new_unchecked(grid, start, end))
    }

    /// Parses a maze drawn with [`Tile::symbol`] characters, one string per row.
    ///
    /// ```
    /// use mazegame_core::Maze;
    ///
    /// let maze = Maze::from_rows(&["#@#", "# #", "#*#"]).unwrap();
    /// assert_eq!(maze.start(), (0, 1));
    /// assert_eq!(maze.end(), (2, 1));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(rows.len() * width);
        for row in rows {
            let before = tiles.len();
            for symbol in row.as_ref().chars() {
                tiles.push(Tile::from_symbol(symbol).ok_or(GameError::InvalidBoardShape)?);
            }
            if tiles.len() - before != width {
                return Err(GameError::InvalidBoardShape);
            }
        }
        let grid = Array2::from_shape_vec((rows.len(), width), tiles)
            .map_err(|_| GameError::InvalidBoardShape)?;

        let find = |wanted: Tile| -> Result<Coord2> {
            let ((row, col), _) = grid
                .indexed_iter()
                .find(|&(_, &tile)| tile == wanted)
                .ok_or(GameError::InvalidBoardShape)?;
            let row = Coord::try_from(row).map_err(|_| GameError::InvalidBoardShape)?;
            let col = Coord::try_from(col).map_err(|_| GameError::InvalidBoardShape)?;
            Ok((row, col))
        };
        let start = find(Tile::Player)?;
        let end = find(Tile::Goal)?;

        Self::new(grid, start, end)
    }

    pub fn grid(&self) -> &Array2<Tile> {
        &self.grid
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn end(&self) -> Coord2 {
        self.end
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.grid)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.grid[coords.to_nd_index()]
    }

    /// Length of the shortest route from start to end, `None` if they are not connected.
    pub fn solution_len(&self) -> Option<CellCount> {
        shortest_path_len(&self.grid, self.start, self.end)
    }

    pub fn into_parts(self) -> (Coord2, Coord2, Array2<Tile>) {
        (self.start, self.end, self.grid)
    }
}

/// Writes a grid with one line of [`Tile::symbol`] characters per row.
pub(crate) fn write_grid(f: &mut fmt::Formatter<'_>, grid: &Array2<Tile>) -> fmt::Result {
    for (index, row) in grid.rows().into_iter().enumerate() {
        if index > 0 {
            writeln!(f)?;
        }
        for tile in row {
            write!(f, "{}", tile.symbol())?;
        }
    }
    Ok(())
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.grid)
    }
}
