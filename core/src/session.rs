use alloc::collections::BTreeMap;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Steps taken on each level played so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    steps: BTreeMap<Level, CellCount>,
}

impl LevelStats {
    pub fn record(&mut self, level: Level, steps: CellCount) {
        self.steps.insert(level, steps);
    }

    pub fn steps(&self, level: Level) -> Option<CellCount> {
        self.steps.get(&level).copied()
    }

    pub fn total_steps(&self) -> CellCount {
        self.steps.values().fold(0, |total, &steps| total.saturating_add(steps))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, CellCount)> + '_ {
        self.steps.iter().map(|(&level, &steps)| (level, steps))
    }
}

/// One playthrough: the board of the current level and what happened on the previous ones.
///
/// Every level gets a freshly generated board, its seed is drawn from the session generator.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    level: Level,
    board: Board,
    stats: LevelStats,
    rng: SmallRng,
}

impl GameSession {
    /// Starts a session on level 1.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidDimensions`] when the config cannot produce a valid maze.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(entropy_seed);
        let mut rng = SmallRng::seed_from_u64(seed);
        let level = 1;
        let board = build_board(&config, level, &mut rng)?;

        let mut stats = LevelStats::default();
        stats.record(level, 0);
        log::info!("Starting maze session with seed {seed}");

        Ok(Self {
            config,
            level,
            board,
            stats,
            rng,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid(&self) -> &Array2<Tile> {
        self.board.grid()
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Steps taken on the current level.
    pub fn step_count(&self) -> CellCount {
        self.board.step_count()
    }

    pub fn stats(&self) -> &LevelStats {
        &self.stats
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

    pub fn step(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let outcome = self.board.step(direction)?;
        self.update_stats();
        Ok(outcome)
    }

    /// Replaces the solved board with a new, denser maze for the next level.
    ///
    /// # Errors
    ///
    /// [`GameError::NotSolved`] while the current level is still unsolved. A generation failure
    /// leaves the session on the solved level.
    pub fn advance_level(&mut self) -> Result<()> {
        if !self.board.is_solved() {
            return Err(GameError::NotSolved);
        }
        self.update_stats();

        let next_level = self.level.saturating_add(1);
        let board = build_board(&self.config, next_level, &mut self.rng)?;
        log::info!(
            "Level {} solved in {} steps, advancing to level {}",
            self.level,
            self.board.step_count(),
            next_level
        );

        self.level = next_level;
        self.board = board;
        self.stats.record(next_level, 0);
        Ok(())
    }

    fn update_stats(&mut self) {
        self.stats.record(self.level, self.board.step_count());
    }
}

fn build_board(config: &SessionConfig, level: Level, rng: &mut SmallRng) -> Result<Board> {
    let (rows, cols) = config.dimensions_for_level(level);
    log::debug!("Generating {rows}x{cols} maze for level {level}");
    let maze = PrimMazeGenerator::new(rng.random()).generate(rows, cols)?;
    Ok(Board::new(maze))
}

/// Seed for sessions without a configured one.
fn entropy_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_else(|_| {
            log::warn!("System clock before unix epoch, using a fixed seed");
            0
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> SessionConfig {
        SessionConfig {
            maze_width: 50,
            maze_height: 30,
            base_tile_size: 10,
            seed: Some(seed),
        }
    }

    fn solve(session: &mut GameSession) {
        for direction in session.board().solution().unwrap() {
            session.step(direction).unwrap();
        }
        assert!(session.is_solved());
    }

    #[test]
    fn starts_on_first_level() {
        let session = GameSession::new(small_config(1)).unwrap();

        assert_eq!(session.level(), 1);
        assert_eq!(session.grid().dim(), (3, 5));
        assert_eq!(session.step_count(), 0);
        assert!(!session.is_solved());
        assert_eq!(session.stats().steps(1), Some(0));
    }

    #[test]
    fn moves_update_level_stats() {
        let mut session = GameSession::new(small_config(2)).unwrap();

        session.move_down().unwrap();
        session.move_up().unwrap();

        assert_eq!(session.stats().steps(1), Some(session.step_count()));
        assert_eq!(session.step_count(), 2);
    }

    #[test]
    fn cannot_advance_unsolved_level() {
        let mut session = GameSession::new(small_config(3)).unwrap();

        assert_eq!(session.advance_level(), Err(GameError::NotSolved));
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn advancing_records_steps_and_regenerates() {
        let mut session = GameSession::new(small_config(4)).unwrap();
        solve(&mut session);
        let first_steps = session.step_count();

        assert_eq!(session.move_down(), Err(GameError::AlreadySolved));
        session.advance_level().unwrap();

        assert_eq!(session.level(), 2);
        assert_eq!(session.stats().steps(1), Some(first_steps));
        assert_eq!(session.stats().steps(2), Some(0));
        assert_eq!(session.grid().dim(), (6, 10));
        assert!(!session.is_solved());
        assert_eq!(session.step_count(), 0);

        solve(&mut session);
        let second_steps = session.step_count();
        session.advance_level().unwrap();

        assert_eq!(session.level(), 3);
        assert_eq!(session.grid().dim(), (10, 16));
        assert_eq!(session.stats().total_steps(), first_steps + second_steps);
        assert_eq!(
            session.stats().iter().collect::<alloc::vec::Vec<_>>(),
            [(1, first_steps), (2, second_steps), (3, 0)]
        );
    }

    #[test]
    fn fixed_seed_replays_the_same_levels() {
        let mut a = GameSession::new(small_config(9)).unwrap();
        let mut b = GameSession::new(small_config(9)).unwrap();

        for _ in 0..3 {
            assert_eq!(a.board(), b.board());
            solve(&mut a);
            solve(&mut b);
            a.advance_level().unwrap();
            b.advance_level().unwrap();
        }
    }

    #[test]
    fn rejects_config_without_room_for_a_maze() {
        let config = SessionConfig {
            maze_width: 20,
            ..small_config(0)
        };

        assert!(matches!(
            GameSession::new(config),
            Err(GameError::InvalidDimensions { .. })
        ));
    }
}
