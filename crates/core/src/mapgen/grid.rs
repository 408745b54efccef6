//! Dense fixed-extent cell stores shared by the tile, depth, and visited layers.

use crate::error::MazeError;
use crate::types::{Pos, Tile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

pub type TileGrid = Grid<Tile>;
pub type VisitedMask = Grid<bool>;

impl<T: Copy> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, cells: vec![value; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: Pos) -> Result<T, MazeError> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Pos, value: T) -> Result<(), MazeError> {
        let index = self.index(pos)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, T)> + '_ {
        self.cells.iter().enumerate().map(|(index, &value)| {
            let pos = Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 };
            (pos, value)
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    fn index(&self, pos: Pos) -> Result<usize, MazeError> {
        if !self.in_bounds(pos) {
            return Err(MazeError::OutOfBounds { pos, width: self.width, height: self.height });
        }
        Ok((pos.y as usize) * self.width + (pos.x as usize))
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&cell| cell == value).count()
    }
}

/// Growth distance of a cell. `Unassigned` orders above every real depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Depth {
    At(u32),
    Unassigned,
}

impl Depth {
    pub fn value(self) -> Option<u32> {
        match self {
            Depth::At(depth) => Some(depth),
            Depth::Unassigned => None,
        }
    }
}

/// Write-once depth layer that tracks the largest depth handed out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthMap {
    grid: Grid<Depth>,
    max_depth: u32,
}

impl DepthMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { grid: Grid::filled(width, height, Depth::Unassigned), max_depth: 0 }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, pos: Pos) -> Result<Depth, MazeError> {
        self.grid.get(pos)
    }

    pub fn assign(&mut self, pos: Pos, depth: u32) -> Result<(), MazeError> {
        if self.grid.get(pos)? != Depth::Unassigned {
            return Err(MazeError::AlreadyAssigned { pos });
        }
        self.grid.set(pos, Depth::At(depth))?;
        self.max_depth = self.max_depth.max(depth);
        Ok(())
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, Depth)> + '_ {
        self.grid.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_access_is_rejected_on_every_edge() {
        let mut grid = TileGrid::filled(4, 3, Tile::Wall);
        for pos in [
            Pos { y: -1, x: 0 },
            Pos { y: 0, x: -1 },
            Pos { y: 3, x: 0 },
            Pos { y: 0, x: 4 },
        ] {
            assert_eq!(
                grid.get(pos),
                Err(MazeError::OutOfBounds { pos, width: 4, height: 3 }),
                "{pos} should be out of bounds"
            );
            assert!(grid.set(pos, Tile::Floor).is_err());
        }
        assert_eq!(grid.count(Tile::Wall), 12);
    }

    #[test]
    fn set_then_get_reads_back_the_cell() {
        let mut grid = TileGrid::filled(5, 5, Tile::Wall);
        let pos = Pos { y: 4, x: 3 };
        grid.set(pos, Tile::Floor).expect("in bounds");
        assert_eq!(grid.get(pos), Ok(Tile::Floor));
        assert_eq!(grid.count(Tile::Floor), 1);
    }

    #[test]
    fn iter_walks_rows_top_to_bottom() {
        let grid = VisitedMask::filled(3, 2, false);
        let positions: Vec<Pos> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions.first(), Some(&Pos { y: 0, x: 0 }));
        assert_eq!(positions[3], Pos { y: 1, x: 0 });
        assert_eq!(positions.last(), Some(&Pos { y: 1, x: 2 }));
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn unassigned_orders_above_every_real_depth() {
        assert!(Depth::Unassigned > Depth::At(u32::MAX));
        assert!(Depth::At(3) > Depth::At(2));
        assert_eq!(Depth::Unassigned.value(), None);
        assert_eq!(Depth::At(9).value(), Some(9));
    }

    #[test]
    fn depth_is_assigned_once() {
        let mut depths = DepthMap::new(3, 3);
        let pos = Pos { y: 1, x: 1 };
        depths.assign(pos, 4).expect("first assignment succeeds");
        assert_eq!(depths.assign(pos, 5), Err(MazeError::AlreadyAssigned { pos }));
        assert_eq!(depths.get(pos), Ok(Depth::At(4)));
    }

    #[test]
    fn max_depth_tracks_the_largest_assignment() {
        let mut depths = DepthMap::new(4, 1);
        assert_eq!(depths.max_depth(), 0);
        depths.assign(Pos { y: 0, x: 0 }, 6).expect("assign");
        depths.assign(Pos { y: 0, x: 1 }, 2).expect("assign");
        assert_eq!(depths.max_depth(), 6);
        assert!(depths.assign(Pos { y: 0, x: 9 }, 99).is_err());
        assert_eq!(depths.max_depth(), 6, "failed assignment must not move the maximum");
    }
}
