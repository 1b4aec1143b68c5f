//! The city grid: coordinates, shapes, rectangular regions and cell storage.
use crate::error::SimulationError;
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// A cell on the city grid, given as `(row, col)`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
#[display("({row}, {col})")]
pub struct Coordinate {
    /// Row index, counted from the top
    pub row: usize,
    /// Column index, counted from the left
    pub col: usize,
}

impl Coordinate {
    /// Create a new [`Coordinate`]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Coordinate> for (usize, usize) {
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}

/// A point in continuous grid space.
///
/// Market locations are points rather than cells, as they may sit between cells or off the grid.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Point {
    /// Position along the row axis
    pub row: f64,
    /// Position along the column axis
    pub col: f64,
}

impl Point {
    /// Create a new [`Point`]
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f64 {
        let d_row = self.row - other.row;
        let d_col = self.col - other.col;
        (d_row * d_row + d_col * d_col).sqrt()
    }
}

impl From<Coordinate> for Point {
    fn from(coord: Coordinate) -> Self {
        Self {
            row: coord.row as f64,
            col: coord.col as f64,
        }
    }
}

/// The number of rows and columns of a grid. Both are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{rows}x{cols}")]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    /// Create a new [`GridShape`], checking that it has at least one cell
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        ensure!(rows > 0 && cols > 0, SimulationError::EmptyGrid { rows, cols });
        Ok(Self { rows, cols })
    }

    /// Number of rows
    pub fn rows(self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn cell_count(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the coordinate lies on the grid
    pub fn contains(self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Iterate over all coordinates in row-major order
    pub fn iter_coordinates(self) -> impl Iterator<Item = Coordinate> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coordinate { row, col }))
    }
}

/// An axis-aligned rectangle of cells, inclusive at both corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{start}-{end}")]
pub struct Region {
    /// Top-left corner
    pub start: Coordinate,
    /// Bottom-right corner
    pub end: Coordinate,
}

impl Region {
    /// Create a new [`Region`]
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// Check that the corners are ordered and that the region lies on the grid
    pub fn validate(&self, shape: GridShape) -> Result<()> {
        ensure!(
            self.start.row <= self.end.row && self.start.col <= self.end.col,
            SimulationError::InvalidRegion {
                region: *self,
                reason: "start corner exceeds end corner",
            }
        );
        ensure!(
            shape.contains(self.start) && shape.contains(self.end),
            SimulationError::InvalidRegion {
                region: *self,
                reason: "region extends outside the grid",
            }
        );

        Ok(())
    }

    /// Iterate over the coordinates covered by the region in row-major order
    pub fn iter_coordinates(self) -> impl Iterator<Item = Coordinate> {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| Coordinate { row, col })
        })
    }
}

/// A dense two-dimensional grid of values stored in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    shape: GridShape,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(shape: GridShape, value: T) -> Self {
        Self {
            shape,
            cells: vec![value; shape.cell_count()],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` for every coordinate
    pub fn from_fn<F>(shape: GridShape, f: F) -> Self
    where
        F: FnMut(Coordinate) -> T,
    {
        Self {
            shape,
            cells: shape.iter_coordinates().map(f).collect(),
        }
    }

    /// The shape of the grid
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells (never true for a valid [`GridShape`])
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        self.shape
            .contains(coord)
            .then(|| coord.row * self.shape.cols + coord.col)
    }

    /// Get the value at the given coordinate, if it is on the grid
    pub fn get(&self, coord: Coordinate) -> Option<&T> {
        self.index(coord).map(|idx| &self.cells[idx])
    }

    /// Get a mutable reference to the value at the given coordinate
    pub fn get_mut(&mut self, coord: Coordinate) -> Option<&mut T> {
        self.index(coord).map(|idx| &mut self.cells[idx])
    }

    /// Iterate over the values in row-major order
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// The values of each row, in order
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.shape.cols)
    }

    /// Iterate over `(coordinate, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        self.shape.iter_coordinates().zip(self.cells.iter())
    }
}
