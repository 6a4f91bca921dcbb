use std::fmt;

use rand::Rng;

/// Character used for a live cell by [`Grid::from_rows`] and the `Debug` output.
pub const ALIVE: char = '#';

/// Character used for a dead cell by [`Grid::from_rows`] and the `Debug` output.
pub const DEAD: char = '.';

/// Size of the cell field in cells.
///
/// Derived from the viewport by integer division with the cell edge length. Both axes are at
/// least `1`, so every grid has at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Compute the number of cells that fit in a `width` by `height` pixel viewport.
    pub fn from_viewport(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);

        Self::new(
            (height / cell_size) as usize,
            (width / cell_size) as usize,
        )
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

/// A toroidal field of cells.
///
/// Cells are stored row-major in a single buffer, so every row has exactly `cols` entries.
/// Neighbour lookups wrap around both axes: there is no edge, the right-most column touches the
/// left-most one and the bottom row touches the top row.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// The cell buffer
    cells: Vec<bool>,

    dims: Dimensions,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(dims: Dimensions) -> Self {
        let dims = Dimensions::new(dims.rows, dims.cols);

        Self {
            cells: vec![false; dims.area()],
            dims,
        }
    }

    pub fn from_fn<F>(dims: Dimensions, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut grid = Self::new(dims);

        for row in 0..grid.dims.rows {
            for col in 0..grid.dims.cols {
                let i = grid.index(row, col);
                grid.cells[i] = f(row, col);
            }
        }

        grid
    }

    /// Build a grid from text rows, where `#` is a live cell and anything else is dead.
    ///
    /// The width is the length of the longest row; shorter rows are padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let dims = Dimensions::new(rows.len(), cols);

        Self::from_fn(dims, |row, col| {
            rows.get(row)
                .and_then(|r| r.chars().nth(col))
                .is_some_and(|c| c == ALIVE)
        })
    }

    /// Every cell is alive with probability `density`, independently of the others.
    ///
    /// `density` is clamped to `[0, 1]`.
    pub fn random<R: Rng>(dims: Dimensions, density: f64, rng: &mut R) -> Self {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };

        Self::from_fn(dims, |_, _| rng.gen_bool(density))
    }

    /// A dead grid of the same dimensions.
    pub fn clone_empty(&self) -> Self {
        Self::new(self.dims)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// State of the cell, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if !self.dims.contains(row, col) {
            return None;
        }

        Some(self.cells[self.index(row, col)])
    }

    /// Sets the cell. Out of bounds positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if !self.dims.contains(row, col) {
            return;
        }

        let i = self.index(row, col);
        self.cells[i] = alive;
    }

    /// Flips the cell. Out of bounds positions are ignored.
    pub fn toggle(&mut self, row: usize, col: usize) {
        if !self.dims.contains(row, col) {
            return;
        }

        let i = self.index(row, col);
        self.cells[i] = !self.cells[i];
    }

    /// Number of live cells among the 8 surrounding `(row, col)`, wrapping around the edges.
    ///
    /// On grids narrower than 3 cells the same cell is reached through more than one direction
    /// and is counted once per direction. On a 1x1 grid the single cell is its own 8 neighbours.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let Dimensions { rows, cols } = self.dims;
        let (row, col) = (row % rows, col % cols);

        let up = (row + rows - 1) % rows;
        let down = (row + 1) % rows;
        let left = (col + cols - 1) % cols;
        let right = (col + 1) % cols;

        let neighbors = [
            (up, left),
            (up, col),
            (up, right),
            (row, left),
            (row, right),
            (down, left),
            (down, col),
            (down, right),
        ];

        neighbors
            .into_iter()
            .filter(|&(r, c)| self.cells[self.index(r, c)])
            .count() as u8
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.dims.cols)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dims.cols + col
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line: String = row.iter().map(|&c| if c { ALIVE } else { DEAD }).collect();
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}
