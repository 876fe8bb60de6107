// src/grid.rs
// Row-major two-dimensional storage for sample data

/// A dense row-major grid of `rows × columns` cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

/// The decoded output table: time in column 0, then voltage/current pairs.
pub type SampleTable = Grid<f64>;

impl<T: Copy> Grid<T> {
    /// Wrap already laid-out cells. `cells.len()` must equal `rows * columns`.
    pub(crate) fn from_cells(rows: usize, columns: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Grid { rows, columns, cells }
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Cell at (`row`, `column`), or `None` when out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.cells[row * self.columns + column])
    }

    /// All cells of one row
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Iterate over rows in storage (capture) order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| &self.cells[r * self.columns..(r + 1) * self.columns])
    }

    /// Copy out one column, top to bottom.
    pub fn column(&self, column: usize) -> Option<Vec<T>> {
        if column >= self.columns {
            return None;
        }
        Some(self.rows().map(|row| row[column]).collect())
    }

    /// Flat row-major view of every cell.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Apply `f` to every cell, keeping shape and order.
    pub fn map<U: Copy, F: Fn(T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(|&v| f(v)).collect(),
        }
    }
}
