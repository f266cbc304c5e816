//! The well: walls plus settled blocks, stored sparsely by (column, row).

use crate::piece::Piece;
use std::collections::HashMap;
use std::ops::{Range, RangeInclusive};

/// Cell coordinate: (column, row). Row 0 is the top of the well.
pub type Pos = (i32, i32);

/// Colour tag of an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Wall,
    Green,
    Blue,
    Yellow,
    Red,
    Cyan,
    Magenta,
    Orange,
}

impl BlockColor {
    pub const PIECES: [Self; 7] = [
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Red,
        Self::Cyan,
        Self::Magenta,
        Self::Orange,
    ];
}

/// Walls and settled blocks. A coordinate is present iff it is a wall or a settled block;
/// absence means empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Well {
    width: i32,
    height: i32,
    cells: HashMap<Pos, BlockColor>,
}

impl Well {
    /// New well with `width` interior columns and `height` interior rows, walls placed.
    pub fn new(width: u16, height: u16) -> Self {
        let mut well = Self {
            width: i32::from(width),
            height: i32::from(height),
            cells: HashMap::new(),
        };
        well.place_walls();
        well
    }

    /// Clear everything and put the walls back.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.place_walls();
    }

    fn place_walls(&mut self) {
        for row in 0..=self.height {
            self.cells.insert((0, row), BlockColor::Wall);
            self.cells.insert((self.width + 1, row), BlockColor::Wall);
        }
        for col in self.interior_columns() {
            self.cells.insert((col, self.height), BlockColor::Wall);
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Columns between the side walls: 1..=W.
    #[inline]
    pub fn interior_columns(&self) -> RangeInclusive<i32> {
        1..=self.width
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<BlockColor> {
        self.cells.get(&pos).copied()
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, color: BlockColor) {
        self.cells.insert(pos, color);
    }

    pub fn remove(&mut self, pos: Pos) -> Option<BlockColor> {
        self.cells.remove(&pos)
    }

    /// True for any present entry, wall or settled block.
    #[inline]
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.get(pos) == Some(BlockColor::Wall)
    }

    /// Remove the interior cells of every row in `rows`; walls are left alone.
    pub fn clear_row_range(&mut self, rows: Range<i32>) {
        for row in rows {
            for col in self.interior_columns() {
                self.cells.remove(&(col, row));
            }
        }
    }

    /// Lock a piece: its cells become settled blocks.
    pub fn merge(&mut self, piece: &Piece) {
        for (pos, color) in piece.blocks() {
            self.cells.insert(pos, color);
        }
    }

    /// Interior contents of one row, left to right.
    pub fn row(&self, row: i32) -> Vec<Option<BlockColor>> {
        self.interior_columns().map(|col| self.get((col, row))).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, BlockColor)> + '_ {
        self.cells.iter().map(|(&pos, &color)| (pos, color))
    }

    /// Number of settled (non-wall) blocks.
    pub fn settled_count(&self) -> usize {
        self.cells
            .values()
            .filter(|c| **c != BlockColor::Wall)
            .count()
    }
}
