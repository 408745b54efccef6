//! The finished, read-only maze handed to renderers.

use xxhash_rust::xxh3::xxh3_64;

use crate::error::MazeError;
use crate::types::{Pos, Tile};

use super::grid::{Depth, DepthMap, TileGrid};
use super::growth::GrowthReport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    tiles: TileGrid,
    depths: DepthMap,
    hazards: Vec<Pos>,
    report: GrowthReport,
}

impl Maze {
    pub(super) fn new(
        tiles: TileGrid,
        depths: DepthMap,
        hazards: Vec<Pos>,
        report: GrowthReport,
    ) -> Self {
        Self { tiles, depths, hazards, report }
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn tile_at(&self, pos: Pos) -> Result<Tile, MazeError> {
        self.tiles.get(pos)
    }

    pub fn depths(&self) -> &DepthMap {
        &self.depths
    }

    pub fn max_depth(&self) -> u32 {
        self.depths.max_depth()
    }

    /// Hazard cells in the order they were placed.
    pub fn hazards(&self) -> &[Pos] {
        &self.hazards
    }

    pub fn report(&self) -> &GrowthReport {
        &self.report
    }

    /// Walkable cells, hazards included.
    pub fn floor_count(&self) -> usize {
        self.tiles.count(Tile::Floor) + self.tiles.count(Tile::Hazard)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for (_, tile) in self.tiles.iter() {
            bytes.push(match tile {
                Tile::Wall => 0,
                Tile::Floor => 1,
                Tile::Hazard => 2,
            });
        }
        for (_, depth) in self.depths.iter() {
            let value = match depth {
                Depth::At(depth) => depth,
                Depth::Unassigned => u32::MAX,
            };
            bytes.extend(value.to_le_bytes());
        }
        bytes.extend(self.max_depth().to_le_bytes());
        bytes.extend((self.hazards.len() as u32).to_le_bytes());
        for pos in &self.hazards {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// One string per row: `.` floor, `#` wall, `^` hazard.
    pub fn rows(&self) -> Vec<String> {
        self.tiles.rows().map(|row| row.iter().map(|tile| tile.glyph()).collect()).collect()
    }

    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in self.rows() {
            out.push_str(&row);
            out.push('\n');
        }
        out
    }
}
