pub mod config;
pub mod error;
pub mod mapgen;
pub mod random;
pub mod types;

pub use config::{GrowthStop, MazeConfig};
pub use error::MazeError;
pub use mapgen::{Maze, MazeGenerator, generate_maze};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use types::*;
