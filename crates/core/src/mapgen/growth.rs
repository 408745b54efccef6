//! Branch-driven corridor carving outward from the seed block.
//!
//! Every iteration first forks a branch on the configured period, then moves each
//! active branch one cell. A branch prefers the deepest eligible neighbor (uncarved
//! wall counts as deepest), skips neighbors already marked visited when an unvisited
//! one of equal depth exists, and breaks remaining ties with a uniform draw.

use std::mem;

use tracing::{debug, trace};

use crate::config::{GrowthStop, MazeConfig};
use crate::error::MazeError;
use crate::random::RandomSource;
use crate::types::{Direction, Pos, Tile};

use super::grid::{Depth, DepthMap, TileGrid, VisitedMask};

/// Side of the square block carved before growth starts.
pub const SEED_BLOCK_SIDE: i32 = 3;
/// Where the first branch starts.
pub const ORIGIN: Pos = Pos { y: 2, x: 2 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    IterationCap,
    FloorCoverage,
    /// Every branch ran out of eligible moves.
    Converged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthReport {
    pub iterations: u32,
    /// Includes the origin branch.
    pub branches_created: usize,
    pub branches_converged: usize,
    pub floor_count: usize,
    pub max_depth: u32,
    pub stop_reason: StopReason,
}

#[derive(Clone, Debug)]
pub struct GrowthOutcome {
    pub tiles: TileGrid,
    pub depths: DepthMap,
    pub report: GrowthReport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Branch {
    at: Pos,
    depth: u32,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    pos: Pos,
    // (depth, not yet visited); larger wins.
    rank: (Depth, bool),
}

pub struct GrowthEngine<'a, R: RandomSource + ?Sized> {
    config: &'a MazeConfig,
    rng: &'a mut R,
    tiles: TileGrid,
    depths: DepthMap,
    visited: VisitedMask,
    branches: Vec<Branch>,
    last_processed: Branch,
    iteration: u32,
    floor_count: usize,
    branches_created: usize,
    branches_converged: usize,
}

impl<'a, R: RandomSource + ?Sized> GrowthEngine<'a, R> {
    /// Walls everywhere except the seed block, with a single branch at the origin.
    pub fn seed(config: &'a MazeConfig, rng: &'a mut R) -> Result<Self, MazeError> {
        config.validate()?;
        let mut tiles = TileGrid::filled(config.width, config.height, Tile::Wall);
        let mut depths = DepthMap::new(config.width, config.height);
        for y in 0..SEED_BLOCK_SIDE {
            for x in 0..SEED_BLOCK_SIDE {
                let pos = Pos { y, x };
                tiles.set(pos, Tile::Floor)?;
                depths.assign(pos, 0)?;
            }
        }

        let origin = Branch { at: ORIGIN, depth: 0 };
        Ok(Self {
            config,
            rng,
            tiles,
            depths,
            visited: VisitedMask::filled(config.width, config.height, false),
            branches: vec![origin],
            last_processed: origin,
            iteration: 0,
            floor_count: (SEED_BLOCK_SIDE * SEED_BLOCK_SIDE) as usize,
            branches_created: 1,
            branches_converged: 0,
        })
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn depths(&self) -> &DepthMap {
        &self.depths
    }

    pub fn visited(&self) -> &VisitedMask {
        &self.visited
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn active_branches(&self) -> usize {
        self.branches.len()
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    /// `Some` once growth has terminated.
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.branches.is_empty() {
            Some(StopReason::Converged)
        } else if self.iteration >= self.config.iteration_cap {
            Some(StopReason::IterationCap)
        } else if self.config.growth_stop == GrowthStop::FloorCoverage
            && self.floor_count >= self.config.floor_target()
        {
            Some(StopReason::FloorCoverage)
        } else {
            None
        }
    }

    /// Runs one synchronized iteration over all active branches.
    pub fn step(&mut self) -> Result<(), MazeError> {
        if self.iteration % self.config.branch_period == 0 {
            self.branches.push(self.last_processed);
            self.branches_created += 1;
        }

        let active = mem::take(&mut self.branches);
        let mut survivors = Vec::with_capacity(active.len());
        for branch in active {
            match self.advance(branch)? {
                Some(moved) => {
                    survivors.push(moved);
                    self.last_processed = moved;
                }
                None => {
                    trace!(iteration = self.iteration, at = %branch.at, "branch converged");
                    self.branches_converged += 1;
                    self.last_processed = branch;
                }
            }
        }
        self.branches = survivors;
        self.iteration += 1;
        Ok(())
    }

    pub fn run(mut self) -> Result<GrowthOutcome, MazeError> {
        let stop_reason = loop {
            if let Some(reason) = self.stop_reason() {
                break reason;
            }
            self.step()?;
        };

        let report = GrowthReport {
            iterations: self.iteration,
            branches_created: self.branches_created,
            branches_converged: self.branches_converged,
            floor_count: self.floor_count,
            max_depth: self.depths.max_depth(),
            stop_reason,
        };
        debug!(
            iterations = report.iterations,
            branches_created = report.branches_created,
            branches_converged = report.branches_converged,
            floor_count = report.floor_count,
            max_depth = report.max_depth,
            stop_reason = ?report.stop_reason,
            "maze growth finished"
        );
        Ok(GrowthOutcome { tiles: self.tiles, depths: self.depths, report })
    }

    fn advance(&mut self, branch: Branch) -> Result<Option<Branch>, MazeError> {
        let Some(target) = self.select_move(branch.at)? else {
            return Ok(None);
        };

        let target_tile = self.tiles.get(target)?;
        let depth = match self.depths.get(target)? {
            Depth::Unassigned => {
                let depth = branch.depth + 1;
                self.depths.assign(target, depth)?;
                depth
            }
            Depth::At(existing) => {
                if target_tile == Tile::Floor {
                    self.visited.set(branch.at, true)?;
                }
                existing
            }
        };
        if target_tile != Tile::Floor {
            self.floor_count += 1;
        }
        self.tiles.set(target, Tile::Floor)?;
        Ok(Some(Branch { at: target, depth }))
    }

    fn select_move(&mut self, from: Pos) -> Result<Option<Pos>, MazeError> {
        let mut best: Option<Candidate> = None;
        for direction in Direction::SCAN_ORDER {
            let Some(candidate) = self.candidate(from, direction)? else {
                continue;
            };
            best = match best {
                None => Some(candidate),
                Some(current) if candidate.rank > current.rank => Some(candidate),
                Some(current)
                    if candidate.rank == current.rank
                        && self.rng.next_uniform_real() < self.config.tie_break_probability =>
                {
                    Some(candidate)
                }
                keep => keep,
            };
        }
        Ok(best.map(|candidate| candidate.pos))
    }

    /// A neighbor is eligible when it is already floor, or when it and the three
    /// cells around it facing away from `from` are all wall. The whole footprint
    /// must lie inside the grid either way.
    fn candidate(&self, from: Pos, direction: Direction) -> Result<Option<Candidate>, MazeError> {
        let target = from.step(direction);
        let [left, right] = direction.sides();
        let footprint = [target, target.step(direction), target.step(left), target.step(right)];
        if !footprint.iter().all(|&pos| self.tiles.in_bounds(pos)) {
            return Ok(None);
        }

        if self.tiles.get(target)? != Tile::Floor {
            for pos in footprint {
                if self.tiles.get(pos)? != Tile::Wall {
                    return Ok(None);
                }
            }
        }

        let rank = (self.depths.get(target)?, !self.visited.get(target)?);
        Ok(Some(Candidate { pos: target, rank }))
    }
}
