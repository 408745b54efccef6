//! Generation parameters and their defaults.

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

pub const MAZE_WIDTH: usize = 16;
pub const MAZE_HEIGHT: usize = 23;
pub const TIE_BREAK_PROBABILITY: f64 = 0.4;
pub const ITERATION_CAP: u32 = 10_000;
pub const BRANCH_PERIOD: u32 = 10;
pub const HAZARD_COUNT: usize = 5;
pub const HAZARD_DEPTH_FRACTION: f64 = 0.5;
pub const MAX_HAZARD_SAMPLES: u32 = 100_000;

/// Smallest side that still fits the 3x3 seed block.
pub const MIN_SIDE: usize = 3;
/// Largest grid area accepted. Also keeps every coordinate within `i32`.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Condition that ends the growth loop besides running out of branches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStop {
    /// Run until `iteration_cap`; floor coverage is never consulted.
    #[default]
    IterationCap,
    /// Also stop as soon as a third of the grid is floor.
    FloorCoverage,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub tie_break_probability: f64,
    pub iteration_cap: u32,
    pub branch_period: u32,
    pub hazard_count: usize,
    pub hazard_depth_fraction: f64,
    pub growth_stop: GrowthStop,
    pub max_hazard_samples: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: MAZE_WIDTH,
            height: MAZE_HEIGHT,
            tie_break_probability: TIE_BREAK_PROBABILITY,
            iteration_cap: ITERATION_CAP,
            branch_period: BRANCH_PERIOD,
            hazard_count: HAZARD_COUNT,
            hazard_depth_fraction: HAZARD_DEPTH_FRACTION,
            growth_stop: GrowthStop::IterationCap,
            max_hazard_samples: MAX_HAZARD_SAMPLES,
        }
    }
}

impl MazeConfig {
    /// Default parameters on a grid of another size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Floor count at which `GrowthStop::FloorCoverage` ends growth.
    pub fn floor_target(&self) -> usize {
        self.width * self.height / 3
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(invalid(format!(
                "grid {}x{} is smaller than the {MIN_SIDE}x{MIN_SIDE} seed block",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(invalid(format!(
                "grid {}x{} exceeds {MAX_GRID_CELLS} cells",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.tie_break_probability) {
            return Err(invalid(format!(
                "tie_break_probability {} must be within [0, 1]",
                self.tie_break_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.hazard_depth_fraction) {
            return Err(invalid(format!(
                "hazard_depth_fraction {} must be within [0, 1]",
                self.hazard_depth_fraction
            )));
        }
        if self.branch_period == 0 {
            return Err(invalid("branch_period must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> MazeError {
    MazeError::InvalidConfig { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_named_constants() {
        let config = MazeConfig::default();
        assert_eq!(config.width, 16);
        assert_eq!(config.height, 23);
        assert_eq!(config.tie_break_probability, 0.4);
        assert_eq!(config.iteration_cap, 10_000);
        assert_eq!(config.branch_period, 10);
        assert_eq!(config.hazard_count, 5);
        assert_eq!(config.hazard_depth_fraction, 0.5);
        assert_eq!(config.growth_stop, GrowthStop::IterationCap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn floor_target_is_a_third_of_the_grid() {
        assert_eq!(MazeConfig::default().floor_target(), 122);
        assert_eq!(MazeConfig::with_size(10, 10).floor_target(), 33);
    }

    #[test]
    fn rejects_grids_above_the_cell_limit() {
        let err = MazeConfig::with_size(100_000, 100_000)
            .validate()
            .expect_err("10^10 cells should be rejected");
        assert!(matches!(err, MazeError::InvalidConfig { .. }));

        let overflow = MazeConfig::with_size(usize::MAX, 4).validate();
        assert!(matches!(overflow, Err(MazeError::InvalidConfig { .. })));

        assert!(MazeConfig::with_size(1_024, 1_024).validate().is_ok());
        assert!(MazeConfig::with_size(1_025, 1_024).validate().is_err());
    }

    #[test]
    fn rejects_grids_smaller_than_seed_block() {
        let err = MazeConfig::with_size(2, 10).validate().expect_err("2 wide should be rejected");
        assert!(matches!(err, MazeError::InvalidConfig { .. }));
        assert!(MazeConfig::with_size(3, 3).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        let config = MazeConfig { tie_break_probability: 1.5, ..MazeConfig::default() };
        assert!(config.validate().is_err());

        let config = MazeConfig { tie_break_probability: f64::NAN, ..MazeConfig::default() };
        assert!(config.validate().is_err());

        let config = MazeConfig { hazard_depth_fraction: -0.1, ..MazeConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_branch_period() {
        let config = MazeConfig { branch_period: 0, ..MazeConfig::default() };
        let err = config.validate().expect_err("zero period should be rejected");
        assert!(err.to_string().contains("branch_period"), "unexpected message: {err}");
    }

    #[test]
    fn partial_json_fills_missing_fields_from_defaults() {
        let config: MazeConfig =
            serde_json::from_str(r#"{"width": 8, "growth_stop": "floor_coverage"}"#)
                .expect("partial config should deserialize");
        assert_eq!(config.width, 8);
        assert_eq!(config.height, MAZE_HEIGHT);
        assert_eq!(config.growth_stop, GrowthStop::FloorCoverage);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<MazeConfig>(r#"{"widht": 8}"#);
        assert!(parsed.is_err());
    }
}
