use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Breadth-first search over passable tiles.
///
/// Returns the cells of a shortest route from `from` to `to`, both ends included, or `None` when
/// `to` cannot be reached. Either endpoint outside the grid also yields `None`.
pub fn shortest_path(grid: &Array2<Tile>, from: Coord2, to: Coord2) -> Option<Vec<Coord2>> {
    let (rows, cols) = grid_size(grid);
    if from.0 >= rows || from.1 >= cols || to.0 >= rows || to.1 >= cols {
        return None;
    }

    let mut came_from: Array2<Option<Coord2>> = Array2::from_elem(grid.dim(), None);
    let mut to_visit = VecDeque::from([from]);
    came_from[from.to_nd_index()] = Some(from);

    while let Some(visit_coords) = to_visit.pop_front() {
        if visit_coords == to {
            let mut path = Vec::from([to]);
            let mut current = to;
            while current != from {
                current = came_from[current.to_nd_index()]?;
                path.push(current);
            }
            path.reverse();
            return Some(path);
        }

        for (pos, tile) in grid.iter_neighbor_cells_with_index(visit_coords) {
            if tile.is_passable() && came_from[pos.to_nd_index()].is_none() {
                came_from[pos.to_nd_index()] = Some(visit_coords);
                to_visit.push_back(pos);
            }
        }
    }

    None
}

/// Number of moves on a shortest route from `from` to `to`.
pub fn shortest_path_len(grid: &Array2<Tile>, from: Coord2, to: Coord2) -> Option<CellCount> {
    let path = shortest_path(grid, from, to)?;
    CellCount::try_from(path.len() - 1).ok()
}

/// Moves that walk a path cell by cell.
pub fn path_directions(path: &[Coord2]) -> Option<Vec<Direction>> {
    path.windows(2)
        .map(|step| Direction::between(step[0], step[1]))
        .collect()
}
