//! Recursive-bisection maze generation with a grid-bound walker.
//!
//! The grid starts as a walled frame around an open interior. Each call to
//! [`MazeGenerator::step`] splits one open room with a wall on an even
//! coordinate and a door on an odd one, until no 2x2 room is left and the
//! entrance is opened. [`try_move`] moves a walker one cell at a time,
//! refusing to enter walls. [`Session`] bundles both for a host loop.
//!
//! ```
//! use bisect_maze::{Config, Session};
//!
//! let config = Config { seed: Some(7), ..Config::default() };
//! let mut session = Session::init(&config).unwrap();
//! while !session.is_done() {
//!     session.tick().unwrap();
//! }
//! assert!(session.advance());
//! session.deinit();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod movement;
pub mod room;
pub mod session;

pub use config::Config;
pub use error::MazeError;
pub use generator::{Bisection, GenState, MazeGenerator, StepOutcome, Wall, ENTRANCE};
pub use grid::{Grid, Pos};
pub use movement::{try_move, Direction, Entity};
pub use room::{find_room, Room};
pub use session::Session;
