//! Maze game core: randomized Prim's maze generation, the player board and level progression.
//!
//! Rendering and input live outside this crate. A front end creates a [`GameSession`], forwards
//! input as moves, draws [`GameSession::grid`] and calls [`GameSession::advance_level`] once the
//! maze is solved.
//!
//! ```
//! use mazegame_core::*;
//!
//! let mut session = GameSession::new(SessionConfig {
//!     seed: Some(1),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! for direction in session.board().solution().unwrap() {
//!     session.step(direction).unwrap();
//! }
//! assert!(session.is_solved());
//!
//! session.advance_level().unwrap();
//! assert_eq!(session.level(), 2);
//! ```
#![no_std]

extern crate alloc;

pub use analysis::*;
pub use board::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use maze::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod board;
mod config;
mod error;
mod generator;
mod maze;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wall or border in the way, nothing changed.
    Blocked,
    Moved,
    /// The move landed on the goal.
    Solved,
}

impl MoveOutcome {
    /// Whether this outcome changed the board.
    pub const fn has_update(self) -> bool {
        match self {
            Self::Blocked => false,
            Self::Moved => true,
            Self::Solved => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_blocked_moves_leave_board_untouched() {
        assert!(!MoveOutcome::Blocked.has_update());
        assert!(MoveOutcome::Moved.has_update());
        assert!(MoveOutcome::Solved.has_update());
    }
}
