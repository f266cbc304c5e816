//! The falling piece: shape templates, translation, rotation and shape selection.

use crate::well::{BlockColor, Pos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

/// The seven tetromino shapes (N is the Z shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    O,
    J,
    L,
    I,
    S,
    N,
    T,
}

impl Shape {
    pub const ALL: [Self; 7] = [Self::O, Self::J, Self::L, Self::I, Self::S, Self::N, Self::T];

    /// Spawn cells as (column, row), anchored near the top of a 10-wide well.
    /// `Piece::spawn_in` shifts them for other widths.
    pub fn spawn_cells(self) -> [Pos; 4] {
        match self {
            Self::O => [(6, 0), (7, 0), (6, 1), (7, 1)],
            Self::J => [(4, 0), (5, 0), (6, 0), (6, 1)],
            Self::L => [(4, 1), (5, 1), (6, 1), (6, 0)],
            Self::I => [(4, 0), (5, 0), (6, 0), (7, 0)],
            Self::S => [(5, 0), (5, 1), (6, 1), (6, 2)],
            Self::N => [(6, 0), (6, 1), (5, 1), (5, 2)],
            Self::T => [(4, 0), (5, 0), (6, 0), (5, 1)],
        }
    }

    pub fn color(self) -> BlockColor {
        match self {
            Self::O => BlockColor::Green,
            Self::J => BlockColor::Blue,
            Self::L => BlockColor::Yellow,
            Self::I => BlockColor::Red,
            Self::S => BlockColor::Cyan,
            Self::N => BlockColor::Magenta,
            Self::T => BlockColor::Orange,
        }
    }
}

/// Active piece: four distinct cells of one shape. Never edited in place; every move
/// produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    cells: [Pos; 4],
}

impl Piece {
    pub fn spawn(shape: Shape) -> Self {
        Self {
            shape,
            cells: shape.spawn_cells(),
        }
    }

    /// Spawn in a well `width` columns wide: templates shift right by `(width - 10) / 2`,
    /// never left.
    pub fn spawn_in(shape: Shape, width: i32) -> Self {
        Self::spawn(shape).translate(((width - 10) / 2).max(0), 0)
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn cells(&self) -> &[Pos; 4] {
        &self.cells
    }

    #[inline]
    pub fn color(&self) -> BlockColor {
        self.shape.color()
    }

    /// Cells paired with the piece colour.
    pub fn blocks(&self) -> impl Iterator<Item = (Pos, BlockColor)> + '_ {
        let color = self.color();
        self.cells.iter().map(move |&pos| (pos, color))
    }

    /// Smallest row covered by the piece.
    pub fn top_row(&self) -> i32 {
        self.cells.iter().map(|&(_, row)| row).min().unwrap_or(0)
    }

    pub fn translate(&self, dcol: i32, drow: i32) -> Self {
        Self {
            shape: self.shape,
            cells: self.cells.map(|(col, row)| (col + dcol, row + drow)),
        }
    }

    /// Integer centroid of the bounding box, rounded towards negative infinity.
    pub fn centroid(&self) -> Pos {
        let cols = self.cells.iter().map(|&(col, _)| col);
        let rows = self.cells.iter().map(|&(_, row)| row);
        let (min_col, max_col) = (cols.clone().min().unwrap_or(0), cols.max().unwrap_or(0));
        let (min_row, max_row) = (rows.clone().min().unwrap_or(0), rows.max().unwrap_or(0));
        (
            (max_col + min_col).div_euclid(2),
            (max_row + min_row).div_euclid(2),
        )
    }

    /// Quarter turn about the integer centroid: (x, y) -> (y, -x), then one row down to
    /// offset the truncated centroid. Not a true rotation for every shape and position.
    pub fn rotate(&self) -> Self {
        let (cx, cy) = self.centroid();
        Self {
            shape: self.shape,
            cells: self.cells.map(|(col, row)| {
                let (x, y) = (col - cx, row - cy);
                (y + cx, -x + cy + 1)
            }),
        }
    }
}

/// Where new shapes come from.
pub trait ShapeSource: Debug {
    fn next_shape(&mut self) -> Shape;
}

/// Uniformly random shapes.
#[derive(Debug)]
pub struct RandomShapes {
    rng: StdRng,
}

impl RandomShapes {
    /// Seeded for reproducible games, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.rng.gen_range(0..Shape::ALL.len())]
    }
}

/// Repeats a fixed list of shapes; a list of one always yields the same shape.
#[derive(Debug, Clone)]
pub struct ShapeCycle {
    shapes: Vec<Shape>,
    next: usize,
}

impl ShapeCycle {
    /// Falls back to `Shape::ALL` when given an empty list.
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let mut shapes: Vec<Shape> = shapes.into_iter().collect();
        if shapes.is_empty() {
            shapes = Shape::ALL.to_vec();
        }
        Self { shapes, next: 0 }
    }
}

impl ShapeSource for ShapeCycle {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.next % self.shapes.len()];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}
