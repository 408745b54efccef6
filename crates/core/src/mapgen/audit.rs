//! Structural checks every generated maze must pass.

use std::collections::VecDeque;

use thiserror::Error;

use crate::config::MazeConfig;
use crate::types::{Direction, Pos, Tile};

use super::grid::{Depth, VisitedMask};
use super::growth::SEED_BLOCK_SIDE;
use super::model::Maze;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuditViolation {
    #[error("seed block cell {pos} is not floor at depth 0")]
    SeedBlock { pos: Pos },
    #[error("walkable cell {pos} has no depth")]
    MissingDepth { pos: Pos },
    #[error("depth {depth} at {pos} exceeds max depth {max_depth}")]
    DepthAboveMax { pos: Pos, depth: u32, max_depth: u32 },
    #[error("expected {expected} hazards, found {found}")]
    HazardCount { expected: usize, found: usize },
    #[error("hazard list does not match the hazard tiles")]
    HazardListMismatch,
    #[error("hazard at {pos} has depth {depth}, too shallow for max depth {max_depth}")]
    ShallowHazard { pos: Pos, depth: u32, max_depth: u32 },
    #[error("walkable cell {pos} is not connected to the seed block")]
    Unreachable { pos: Pos },
}

pub fn audit_maze(maze: &Maze, config: &MazeConfig) -> Result<(), AuditViolation> {
    let max_depth = maze.max_depth();

    for y in 0..SEED_BLOCK_SIDE {
        for x in 0..SEED_BLOCK_SIDE {
            let pos = Pos { y, x };
            if maze.tile_at(pos) != Ok(Tile::Floor) || maze.depths().get(pos) != Ok(Depth::At(0)) {
                return Err(AuditViolation::SeedBlock { pos });
            }
        }
    }

    let mut hazard_tiles = Vec::new();
    for (pos, tile) in maze.tiles().iter() {
        let depth = maze.depths().get(pos).unwrap_or(Depth::Unassigned);
        if let Depth::At(depth) = depth
            && depth > max_depth
        {
            return Err(AuditViolation::DepthAboveMax { pos, depth, max_depth });
        }
        if tile == Tile::Wall {
            continue;
        }
        let Depth::At(depth) = depth else {
            return Err(AuditViolation::MissingDepth { pos });
        };
        if tile == Tile::Hazard {
            if f64::from(depth) <= f64::from(max_depth) * config.hazard_depth_fraction {
                return Err(AuditViolation::ShallowHazard { pos, depth, max_depth });
            }
            hazard_tiles.push(pos);
        }
    }

    if hazard_tiles.len() != config.hazard_count {
        return Err(AuditViolation::HazardCount {
            expected: config.hazard_count,
            found: hazard_tiles.len(),
        });
    }
    let mut listed = maze.hazards().to_vec();
    listed.sort();
    if listed != hazard_tiles {
        return Err(AuditViolation::HazardListMismatch);
    }

    if let Some(pos) = unreachable_walkable(maze) {
        return Err(AuditViolation::Unreachable { pos });
    }
    Ok(())
}

fn is_walkable(maze: &Maze, pos: Pos) -> bool {
    matches!(maze.tile_at(pos), Ok(Tile::Floor | Tile::Hazard))
}

fn unreachable_walkable(maze: &Maze) -> Option<Pos> {
    let mut seen = VisitedMask::filled(maze.width(), maze.height(), false);
    let start = Pos { y: 0, x: 0 };
    let mut open = VecDeque::from([start]);
    seen.set(start, true).ok()?;

    while let Some(pos) = open.pop_front() {
        for direction in Direction::SCAN_ORDER {
            let next = pos.step(direction);
            if !is_walkable(maze, next) || seen.get(next) != Ok(false) {
                continue;
            }
            seen.set(next, true).ok()?;
            open.push_back(next);
        }
    }

    maze.tiles()
        .iter()
        .find(|&(pos, tile)| tile != Tile::Wall && seen.get(pos) != Ok(true))
        .map(|(pos, _)| pos)
}
