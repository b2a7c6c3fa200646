use alloc::vec::Vec;
use core::fmt;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Unsolved,
    Solved,
}

impl BoardState {
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Unsolved
    }
}

/// Player state for one level: the maze grid with the trail drawn into it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Tile>,
    start: Coord2,
    end: Coord2,
    position: Coord2,
    state: BoardState,
    step_count: Saturating<CellCount>,
}

impl Board {
    pub fn new(maze: Maze) -> Self {
        let (start, end, grid) = maze.into_parts();
        Self {
            grid,
            start,
            end,
            position: start,
            state: Default::default(),
            step_count: Saturating(0),
        }
    }

    /// Read-only view of the tiles, for rendering.
    pub fn grid(&self) -> &Array2<Tile> {
        &self.grid
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.grid[coords.to_nd_index()]
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.grid)
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn end(&self) -> Coord2 {
        self.end
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    /// Accepted moves so far; blocked moves are not counted.
    pub fn step_count(&self) -> CellCount {
        self.step_count.0
    }

    pub fn move_up(&mut self) -> Result<MoveOutcome> {
        self.step(Direction::Up)
    }

    pub fn move_down(&mut self) -> Result<MoveOutcome> {
        self.step(Direction::Down)
    }

    pub fn move_left(&mut self) -> Result<MoveOutcome> {
        self.step(Direction::Left)
    }

    pub fn move_right(&mut self) -> Result<MoveOutcome> {
        self.step(Direction::Right)
    }

    /// Moves the player one cell.
    ///
    /// Walls and the grid border silently block the move. The vacated cell is marked
    /// [`Tile::Visited`], except when stepping back onto an already visited cell: then the vacated
    /// cell reverts to [`Tile::Path`], so the trail only shows the current route. Reaching the goal
    /// solves the board and keeps the [`Tile::Goal`] tile in place.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadySolved`] once the goal has been reached.
    pub fn step(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_unsolved()?;

        let Some(target) = neighbor(self.position, direction, self.size()) else {
            return Ok(MoveOutcome::Blocked);
        };
        let target_tile = self.grid[target.to_nd_index()];
        if !target_tile.is_passable() {
            return Ok(MoveOutcome::Blocked);
        }

        self.step_count += 1;
        self.grid[self.position.to_nd_index()] = match target_tile {
            Tile::Visited => Tile::Path,
            _ => Tile::Visited,
        };
        self.position = target;

        if target_tile == Tile::Goal {
            self.state = BoardState::Solved;
            log::info!("Maze solved in {} steps", self.step_count);
            return Ok(MoveOutcome::Solved);
        }

        self.grid[target.to_nd_index()] = Tile::Player;
        Ok(MoveOutcome::Moved)
    }

    /// Moves leading from the current position to the goal along a shortest route.
    pub fn solution(&self) -> Option<Vec<Direction>> {
        if self.is_solved() {
            return Some(Vec::new());
        }
        let path = shortest_path(&self.grid, self.position, self.end)?;
        path_directions(&path)
    }

    fn check_unsolved(&self) -> Result<()> {
        if self.state.is_solved() {
            Err(GameError::AlreadySolved)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn board() -> Board {
        Board::new(Maze::from_rows(&["#@###", "#   #", "#   #", "#   #", "###*#"]).unwrap())
    }

    fn player_tiles(board: &Board) -> usize {
        board.grid().iter().filter(|&&tile| tile == Tile::Player).count()
    }

    #[test]
    fn starts_at_entry() {
        let board = board();

        assert_eq!(board.position(), (0, 1));
        assert_eq!(board.start(), (0, 1));
        assert_eq!(board.end(), (4, 3));
        assert_eq!(board.step_count(), 0);
        assert_eq!(board.state(), BoardState::Unsolved);
    }

    #[test]
    fn border_and_walls_block_silently() {
        let mut board = board();

        assert_eq!(board.move_up().unwrap(), MoveOutcome::Blocked);
        assert_eq!(board.move_left().unwrap(), MoveOutcome::Blocked);
        assert_eq!(board.move_right().unwrap(), MoveOutcome::Blocked);

        assert_eq!(board.position(), (0, 1));
        assert_eq!(board.step_count(), 0);
        assert_eq!(board.tile_at((0, 1)), Tile::Player);
    }

    #[test]
    fn walks_through_open_cells() {
        let mut board = board();

        board.move_up().unwrap();
        assert_eq!(board.position(), (0, 1));
        board.move_down().unwrap();
        assert_eq!(board.position(), (1, 1));
        board.move_down().unwrap();
        assert_eq!(board.position(), (2, 1));
        board.move_left().unwrap();
        assert_eq!(board.position(), (2, 1));
        board.move_right().unwrap();
        assert_eq!(board.position(), (2, 2));
        board.move_left().unwrap();
        assert_eq!(board.position(), (2, 1));
        assert_eq!(player_tiles(&board), 1);
    }

    #[test]
    fn counts_only_accepted_moves() {
        let mut board = board();

        board.move_up().unwrap();
        board.move_down().unwrap();
        board.move_left().unwrap();
        board.move_down().unwrap();
        board.move_right().unwrap();

        assert_eq!(board.step_count(), 3);
        assert_eq!(board.position(), (2, 2));
    }

    #[test]
    fn trail_marks_visited_and_backtracking_clears_it() {
        let mut board = board();

        board.move_down().unwrap();
        board.move_down().unwrap();
        assert_eq!(board.tile_at((0, 1)), Tile::Visited);
        assert_eq!(board.tile_at((1, 1)), Tile::Visited);
        assert_eq!(board.tile_at((2, 1)), Tile::Player);

        board.move_up().unwrap();
        assert_eq!(board.tile_at((2, 1)), Tile::Path);
        assert_eq!(board.tile_at((1, 1)), Tile::Player);
        assert_eq!(board.tile_at((0, 1)), Tile::Visited);
        assert_eq!(
            board.to_string(),
            ["#~###", "#@  #", "#   #", "#   #", "###*#"].join("\n")
        );
    }

    #[test]
    fn reaching_goal_solves_and_keeps_goal_tile() {
        let mut board = board();

        for _ in 0..4 {
            board.move_down().unwrap();
        }
        for _ in 0..3 {
            board.move_right().unwrap();
        }
        let outcome = board.move_down().unwrap();

        assert_eq!(outcome, MoveOutcome::Solved);
        assert!(board.is_solved());
        assert_eq!(board.position(), (4, 3));
        assert_eq!(board.tile_at((4, 3)), Tile::Goal);
        assert_eq!(player_tiles(&board), 0);
        assert_eq!(board.step_count(), 6);
    }

    #[test]
    fn solved_board_rejects_moves() {
        let mut board = board();
        for direction in board.solution().unwrap() {
            board.step(direction).unwrap();
        }
        let steps = board.step_count();
        let snapshot = board.clone();

        assert_eq!(board.move_up(), Err(GameError::AlreadySolved));
        assert_eq!(board.move_left(), Err(GameError::AlreadySolved));
        assert_eq!(board.step_count(), steps);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn solution_walks_to_goal() {
        let mut board = board();
        board.move_down().unwrap();

        let moves = board.solution().unwrap();

        assert_eq!(moves.len(), 5);
        for direction in moves {
            assert_ne!(board.step(direction).unwrap(), MoveOutcome::Blocked);
        }
        assert!(board.is_solved());
        assert_eq!(board.solution(), Some(Vec::new()));
    }

    #[test]
    fn generated_board_is_solvable() {
        let maze = PrimMazeGenerator::new(11).generate(21, 31).unwrap();
        let expected = maze.solution_len().unwrap();
        let mut board = Board::new(maze);

        let moves = board.solution().unwrap();
        assert_eq!(moves.len(), expected as usize);
        for direction in moves {
            board.step(direction).unwrap();
        }

        assert!(board.is_solved());
        assert_eq!(board.step_count(), expected);
    }
}
