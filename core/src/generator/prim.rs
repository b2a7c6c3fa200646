use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Randomized Prim's carving: grows a single tree of path cells out of one interior seed cell, so
/// every carved cell is connected to the entry and the exit.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimMazeGenerator {
    seed: u64,
}

impl PrimMazeGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MazeGenerator for PrimMazeGenerator {
    fn generate(self, rows: usize, cols: usize) -> Result<Maze> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        carve(rows, cols, &mut rng)
    }
}

/// Carves a `rows` x `cols` maze drawing every random choice from `source`.
///
/// The seed cell is drawn first (row, then column), followed by one frontier index per loop
/// iteration. The frontier is a plain list and a drawn wall is swap-removed, so a fixed sequence
/// of draws always produces the same maze.
pub fn carve<R: RandomSource + ?Sized>(rows: usize, cols: usize, source: &mut R) -> Result<Maze> {
    let (size_rows, size_cols) = checked_size(rows, cols)?;
    let mut grid: Array2<Tile> = Array2::from_elem((rows, cols), Tile::Empty);

    let seed_cell: Coord2 = (
        1 + draw_coord(source, size_rows - 2),
        1 + draw_coord(source, size_cols - 2),
    );
    grid[seed_cell.to_nd_index()] = Tile::Path;

    let mut frontier = Vec::new();
    wall_off(&mut grid, seed_cell, &mut frontier);

    let mut draws: usize = 0;
    while !frontier.is_empty() {
        let index = draw(source, frontier.len());
        let wall = frontier.swap_remove(index);
        draws += 1;

        // a second path neighbor would close a loop
        if path_neighbor_count(&grid, wall) >= 2 {
            continue;
        }

        if bridges_path(&grid, wall) {
            grid[wall.to_nd_index()] = Tile::Path;
            wall_off(&mut grid, wall, &mut frontier);
        }
    }

    for tile in grid.iter_mut() {
        if *tile == Tile::Empty {
            *tile = Tile::Wall;
        }
    }

    let (start, end) = open_entry_exit(&mut grid)?;
    let maze = Maze::new_unchecked(grid, start, end);
    log::debug!(
        "Generated {}x{} maze from seed cell {:?} after {} frontier draws, start {:?}, end {:?}",
        rows,
        cols,
        seed_cell,
        draws,
        start,
        end
    );
    log::trace!("\n{maze}");
    Ok(maze)
}

fn draw<R: RandomSource + ?Sized>(source: &mut R, len: usize) -> usize {
    source.pick(len) % len
}

fn draw_coord<R: RandomSource + ?Sized>(source: &mut R, extent: Coord) -> Coord {
    // below `extent`, so it fits
    draw(source, usize::from(extent)) as Coord
}

/// Turns the still untouched neighbors of `coords` into walls and queues them on the frontier.
fn wall_off(grid: &mut Array2<Tile>, coords: Coord2, frontier: &mut Vec<Coord2>) {
    for pos in grid.iter_neighbors(coords) {
        let tile = &mut grid[pos.to_nd_index()];
        if *tile == Tile::Empty {
            *tile = Tile::Wall;
            frontier.push(pos);
        }
    }
}

fn path_neighbor_count(grid: &Array2<Tile>, coords: Coord2) -> usize {
    grid.iter_neighbor_cells(coords)
        .filter(|&tile| tile == Tile::Path)
        .count()
}

/// Whether carving `coords` would extend the path into untouched space along one axis.
fn bridges_path(grid: &Array2<Tile>, (row, col): Coord2) -> bool {
    let (rows, cols) = grid_size(grid);
    let opposite_sides = |a: Coord2, b: Coord2| {
        matches!(
            (grid[a.to_nd_index()], grid[b.to_nd_index()]),
            (Tile::Empty, Tile::Path) | (Tile::Path, Tile::Empty)
        )
    };

    let vertical = row > 0 && row + 1 < rows && opposite_sides((row - 1, col), (row + 1, col));
    let horizontal = col > 0 && col + 1 < cols && opposite_sides((row, col - 1), (row, col + 1));
    vertical || horizontal
}

/// Breaks the entry through the top border and the exit through the bottom border.
///
/// The entry sits above the leftmost path cell of the second row, the exit below the rightmost
/// path cell of the second to last row.
fn open_entry_exit(grid: &mut Array2<Tile>) -> Result<(Coord2, Coord2)> {
    let (rows, cols) = grid_size(grid);
    let is_path = |row: Coord, col: Coord| grid[(row, col).to_nd_index()] == Tile::Path;

    let entry_col = (0..cols).find(|&col| is_path(1, col));
    let exit_col = (1..cols).rev().find(|&col| is_path(rows - 2, col));
    let (Some(entry_col), Some(exit_col)) = (entry_col, exit_col) else {
        log::warn!(
            "No path cell next to the border of a {}x{} maze, cannot place entry and exit",
            rows,
            cols
        );
        return Err(GameError::InvalidDimensions {
            rows: rows.into(),
            cols: cols.into(),
        });
    };

    let start = (0, entry_col);
    let end = (rows - 1, exit_col);
    grid[start.to_nd_index()] = Tile::Player;
    grid[end.to_nd_index()] = Tile::Goal;
    Ok((start, end))
}
