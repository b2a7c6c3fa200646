use serde::{Deserialize, Serialize};

/// Classification of a single maze cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Not reached yet, only exists while a maze is being carved.
    Empty,
    Wall,
    Path,
    /// Passable cell the player walked through.
    Visited,
    Player,
    Goal,
}

impl Tile {
    /// Whether the player may step onto this tile.
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Empty | Self::Wall)
    }

    /// Character used by text fixtures and debug output.
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Path => ' ',
            Self::Visited => '~',
            Self::Player => '@',
            Self::Goal => '*',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol {
            '.' => Self::Empty,
            '#' => Self::Wall,
            ' ' => Self::Path,
            '~' => Self::Visited,
            '@' => Self::Player,
            '*' => Self::Goal,
            _ => return None,
        })
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Empty
    }
}
