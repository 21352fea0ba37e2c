//! Small reference environments used by the binaries and the tests: a maze
//! for the search engines and a noisy grid world for the learners.

mod direction;
mod grid_world;
mod maze;

pub use direction::Direction;
pub use grid_world::{BuiltinGrid, GridAction, GridState, GridWorld, GridWorldEnvironment};
pub use maze::{ManhattanHeuristic, Maze, Position};
