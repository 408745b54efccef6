use std::fs;
use std::io;
use std::path::Path;

use labyrinth::{Maze, Pos};
use serde::{Deserialize, Serialize};

use crate::format_fingerprint;

pub const EXPORT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MazeExport {
    pub format_version: u32,
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
    pub hazards: Vec<Pos>,
    pub max_depth: u32,
    pub iterations: u32,
    pub fingerprint_hex: String,
}

impl MazeExport {
    pub fn from_maze(seed: u64, maze: &Maze) -> Self {
        Self {
            format_version: EXPORT_FORMAT_VERSION,
            seed,
            width: maze.width(),
            height: maze.height(),
            rows: maze.rows(),
            hazards: maze.hazards().to_vec(),
            max_depth: maze.max_depth(),
            iterations: maze.report().iterations,
            fingerprint_hex: format_fingerprint(maze.fingerprint()),
        }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let export: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(export)
    }
}
