//! High-level maze generation that runs growth and then hazard placement.

use tracing::debug;

use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::random::RandomSource;

use super::growth::{GrowthEngine, GrowthOutcome};
use super::hazards::HazardPlacer;
use super::model::Maze;

#[derive(Clone, Debug)]
pub struct MazeGenerator {
    config: MazeConfig,
}

impl MazeGenerator {
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Maze, MazeError> {
        let GrowthOutcome { mut tiles, depths, report } =
            GrowthEngine::seed(&self.config, &mut *rng)?.run()?;
        let hazards = HazardPlacer::new(&self.config, &mut *rng).place(&mut tiles, &depths)?;

        let maze = Maze::new(tiles, depths, hazards, report);
        debug!(
            width = maze.width(),
            height = maze.height(),
            floor_count = maze.floor_count(),
            max_depth = maze.max_depth(),
            fingerprint = maze.fingerprint(),
            "maze generated"
        );
        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};
    use crate::types::Tile;

    #[test]
    fn new_rejects_invalid_config() {
        let config = MazeConfig { branch_period: 0, ..MazeConfig::default() };
        assert!(matches!(MazeGenerator::new(config), Err(MazeError::InvalidConfig { .. })));
    }

    #[test]
    fn generator_keeps_the_validated_config() {
        let config = MazeConfig { hazard_count: 2, ..MazeConfig::with_size(12, 12) };
        let generator = MazeGenerator::new(config.clone()).expect("valid");
        assert_eq!(generator.config(), &config);
    }

    #[test]
    fn default_maze_carries_exactly_five_hazards() {
        let generator = MazeGenerator::new(MazeConfig::default()).expect("default is valid");
        let maze = generator.generate(&mut SeededRandom::new(2_024)).expect("generation succeeds");

        assert_eq!(maze.width(), 16);
        assert_eq!(maze.height(), 23);
        assert_eq!(maze.tiles().count(Tile::Hazard), 5);
        assert_eq!(maze.hazards().len(), 5);
    }

    #[test]
    fn shallow_grid_surfaces_insufficient_deep_floor() {
        let config = MazeConfig { iteration_cap: 50, ..MazeConfig::with_size(4, 4) };
        let generator = MazeGenerator::new(config).expect("valid");
        let result = generator.generate(&mut ScriptedRandom::constant(0.99));
        assert_eq!(result, Err(MazeError::InsufficientDeepFloor { placed: 0, requested: 5 }));
    }

    #[test]
    fn default_config_can_box_growth_into_a_shallow_pocket() {
        // Seed 70 walls its branches into a 36-cell pocket with max depth 14, leaving no
        // deep floor inside the sampling window. The shortfall is reported, not retried.
        let generator = MazeGenerator::new(MazeConfig::default()).expect("default is valid");
        let result = generator.generate(&mut SeededRandom::new(70));
        assert_eq!(result, Err(MazeError::InsufficientDeepFloor { placed: 0, requested: 5 }));
    }

    #[test]
    fn generator_accepts_trait_objects() {
        let config =
            MazeConfig { hazard_count: 0, iteration_cap: 20, ..MazeConfig::with_size(8, 8) };
        let generator = MazeGenerator::new(config).expect("valid");
        let mut seeded = SeededRandom::new(1);
        let rng: &mut dyn RandomSource = &mut seeded;
        let maze = generator.generate(rng).expect("generation succeeds");
        assert!(maze.floor_count() >= 9);
    }
}
