//! Host-facing wrapper that owns one maze, its RNG and the walker.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::MazeError;
use crate::generator::{GenState, MazeGenerator, StepOutcome, ENTRANCE};
use crate::grid::Grid;
use crate::movement::{Direction, Entity};

pub const SPAWN_FACING: Direction = Direction::Right;

/// One maze and the entity walking it.
///
/// `init` allocates the grid and `deinit` consumes the session, so nothing
/// can touch the grid before or after that window.
pub struct Session {
    grid: Grid,
    generator: MazeGenerator,
    rng: StdRng,
    seed: u64,
    entity: Entity,
}

impl Session {
    pub fn init(config: &Config) -> Result<Self, MazeError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut grid = Grid::new(config.width, config.height)?;
        grid.reset();
        info!(width = config.width, height = config.height, seed, "maze session started");
        Ok(Self {
            grid,
            generator: MazeGenerator::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            entity: Entity::new(ENTRANCE, SPAWN_FACING),
        })
    }

    /// Runs one generation step; a no-op once the maze is done.
    pub fn tick(&mut self) -> Result<StepOutcome, MazeError> {
        self.generator.step(&mut self.grid, &mut self.rng)
    }

    /// Generates the rest of the maze in one call.
    pub fn finish(&mut self) -> Result<usize, MazeError> {
        self.generator.run_to_completion(&mut self.grid, &mut self.rng)
    }

    /// Turns the entity: `+1` clockwise, `-1` counter-clockwise.
    pub fn rotate_direction(&mut self, delta: i32) {
        self.entity.rotate(delta);
    }

    /// Steps the entity along its facing; returns whether it moved.
    pub fn advance(&mut self) -> bool {
        let moved = self.entity.advance(&self.grid);
        debug!(x = self.entity.pos.x, y = self.entity.pos.y, moved, "advance");
        moved
    }

    /// Starts a fresh maze on the same grid, continuing the RNG stream.
    pub fn regenerate(&mut self) {
        self.grid.reset();
        self.generator = MazeGenerator::new();
        self.entity = Entity::new(ENTRANCE, SPAWN_FACING);
        info!("maze regenerated");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn is_done(&self) -> bool {
        self.generator.is_done()
    }

    pub fn state(&self) -> GenState {
        self.generator.state()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deinit(self) {
        info!(seed = self.seed, "maze session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Pos;

    fn seeded(seed: u64) -> Session {
        let config = Config {
            seed: Some(seed),
            ..Config::default()
        };
        Session::init(&config).unwrap()
    }

    #[test]
    fn init_rejects_bad_dimensions() {
        let config = Config {
            height: 1,
            ..Config::default()
        };
        assert!(matches!(
            Session::init(&config),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn spawns_at_entrance() {
        let session = seeded(5);
        assert_eq!(session.entity().pos, ENTRANCE);
        assert_eq!(session.entity().facing, Direction::Right);
        assert_eq!(session.seed(), 5);
        assert!(!session.is_done());
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        a.finish().unwrap();
        b.finish().unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn entity_walks_in_from_the_entrance_once_done() {
        let mut session = seeded(11);
        session.finish().unwrap();
        assert!(session.is_done());
        // (1, 1) is odd on both axes and never walled.
        assert!(session.advance());
        assert_eq!(session.entity().pos, Pos::new(1, 1));
        session.rotate_direction(1);
        session.rotate_direction(1);
        assert_eq!(session.entity().facing, Direction::Left);
        assert!(session.advance());
        assert_eq!(session.entity().pos, ENTRANCE);
        assert!(!session.advance());
        session.deinit();
    }

    #[test]
    fn regenerate_restarts_carving() {
        let mut session = seeded(8);
        session.finish().unwrap();
        session.advance();
        session.regenerate();
        assert!(!session.is_done());
        assert_eq!(session.entity().pos, ENTRANCE);
        assert_eq!(session.grid().count_walls(), 2 * 9 + 2 * 9);
        assert!(matches!(session.tick(), Ok(StepOutcome::Carved(_))));
    }
}
