//! Post-growth pass that turns a few deep floor cells into hazards.

use std::ops::Range;

use tracing::{debug, warn};

use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::random::RandomSource;
use crate::types::{Pos, Tile};

use super::grid::{Depth, DepthMap, TileGrid};

/// Cells closer than this to the left/top edge are never sampled.
const WINDOW_NEAR_MARGIN: usize = 3;
/// Cells closer than this to the right/bottom edge are never sampled.
const WINDOW_FAR_MARGIN: usize = 2;

pub struct HazardPlacer<'a, R: RandomSource + ?Sized> {
    config: &'a MazeConfig,
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> HazardPlacer<'a, R> {
    pub fn new(config: &'a MazeConfig, rng: &'a mut R) -> Self {
        Self { config, rng }
    }

    /// Samples the interior window until `hazard_count` deep floor cells have been
    /// converted, returning them in placement order. Fails when the window holds too
    /// few qualifying cells or the sample budget runs out first.
    pub fn place(
        &mut self,
        tiles: &mut TileGrid,
        depths: &DepthMap,
    ) -> Result<Vec<Pos>, MazeError> {
        let requested = self.config.hazard_count;
        if requested == 0 {
            return Ok(Vec::new());
        }

        let threshold = f64::from(depths.max_depth()) * self.config.hazard_depth_fraction;
        let (xs, ys) = sampling_window(tiles.width(), tiles.height());

        let mut available = 0_usize;
        for y in ys.clone() {
            for x in xs.clone() {
                if is_deep_floor(tiles, depths, window_pos(x, y), threshold)? {
                    available += 1;
                }
            }
        }
        if available < requested {
            warn!(available, requested, threshold, "not enough deep floor for hazards");
            return Err(MazeError::InsufficientDeepFloor { placed: 0, requested });
        }

        let mut placed = Vec::with_capacity(requested);
        let mut samples = 0_u32;
        while placed.len() < requested {
            if samples >= self.config.max_hazard_samples {
                warn!(
                    samples,
                    placed = placed.len(),
                    requested,
                    "hazard sampling budget exhausted"
                );
                return Err(MazeError::InsufficientDeepFloor { placed: placed.len(), requested });
            }
            let x = self.rng.next_uniform_int(xs.clone());
            let y = self.rng.next_uniform_int(ys.clone());
            samples += 1;

            let pos = window_pos(x, y);
            if is_deep_floor(tiles, depths, pos, threshold)? {
                tiles.set(pos, Tile::Hazard)?;
                placed.push(pos);
            }
        }

        debug!(samples, placed = placed.len(), threshold, "hazards placed");
        Ok(placed)
    }
}

/// Column and row ranges hazards are drawn from.
pub fn sampling_window(width: usize, height: usize) -> (Range<usize>, Range<usize>) {
    (
        WINDOW_NEAR_MARGIN..width.saturating_sub(WINDOW_FAR_MARGIN),
        WINDOW_NEAR_MARGIN..height.saturating_sub(WINDOW_FAR_MARGIN),
    )
}

fn window_pos(x: usize, y: usize) -> Pos {
    Pos { y: y as i32, x: x as i32 }
}

fn is_deep_floor(
    tiles: &TileGrid,
    depths: &DepthMap,
    pos: Pos,
    threshold: f64,
) -> Result<bool, MazeError> {
    if tiles.get(pos)? != Tile::Floor {
        return Ok(false);
    }
    Ok(matches!(depths.get(pos)?, Depth::At(depth) if f64::from(depth) > threshold))
}
