//! Cell Store: the rectangular partition and its cells.
//!
//! A `Grid` is an immutable snapshot. Every mutation returns a new `Grid` and
//! leaves the receiver untouched, so no caller ever observes a half-applied
//! change.
//!
//! Invariants (checked by `Grid::from_parts`, preserved by every transition):
//! - `rows >= 1`, `cols >= 1`
//! - `cells.len() == rows * cols <= MAX_CELLS`
//! - `cells[i].id == i`
//! - `cells[i].reserved == !cells[i].reserved_by.is_empty()`

use crate::cell::{Cell, FieldUpdate};
use crate::error::GridError;

/// Largest partition, in cells. One worksheet holds this many data rows
/// under its header.
pub const MAX_CELLS: usize = 1_048_575;

/// Clamp a requested dimension to the smallest valid partition size.
///
/// Anything below 1 (including negative input from a form or CLI) becomes 1.
pub fn clamp_dimension(value: i64) -> usize {
    if value < 1 {
        1
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

/// Cell count of a `rows x cols` partition after clamping each dimension
/// to at least 1. Fails if the product overflows or exceeds `MAX_CELLS`.
pub fn cell_count(rows: usize, cols: usize) -> Result<usize, GridError> {
    let (rows, cols) = (rows.max(1), cols.max(1));
    rows.checked_mul(cols)
        .filter(|&count| count <= MAX_CELLS)
        .ok_or(GridError::TooLarge { rows, cols })
}

fn clamp_shape(rows: usize, cols: usize) -> (usize, usize) {
    let cols = cols.clamp(1, MAX_CELLS);
    (rows.clamp(1, MAX_CELLS / cols), cols)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// Reservation counts over a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub reserved: usize,
    pub available: usize,
}

impl Grid {
    /// A grid of `rows * cols` defaulted cells. Zero dimensions are clamped to 1.
    ///
    /// Oversized requests are clamped too: columns to `MAX_CELLS`, then rows
    /// to what fits beside them. Use `try_initialize` to reject them instead.
    pub fn initialize(rows: usize, cols: usize) -> Self {
        let (rows, cols) = clamp_shape(rows, cols);
        Self::build(rows, cols)
    }

    /// Like `initialize`, but a partition over `MAX_CELLS` is an error.
    pub fn try_initialize(rows: usize, cols: usize) -> Result<Self, GridError> {
        cell_count(rows, cols)?;
        Ok(Self::build(rows.max(1), cols.max(1)))
    }

    fn build(rows: usize, cols: usize) -> Self {
        let cells = (0..rows * cols).map(Cell::new).collect();
        Self { rows, cols, cells }
    }

    /// Re-partition into `rows * cols` cells.
    ///
    /// This is a full reset, not a resize: every prior annotation and
    /// reservation is discarded, even when the dimensions are unchanged.
    /// An oversized partition fails and discards nothing.
    pub fn repartition(&self, rows: usize, cols: usize) -> Result<Self, GridError> {
        let next = Self::try_initialize(rows, cols)?;
        log::debug!(
            "repartition {}x{} -> {}x{}: discarded {} cells ({} reserved)",
            self.rows,
            self.cols,
            next.rows,
            next.cols,
            self.cells.len(),
            self.reserved().count()
        );
        Ok(next)
    }

    /// Rebuild a grid from persisted parts, rejecting anything that breaks
    /// the grid invariants.
    pub fn from_parts(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidShape(format!(
                "dimensions must be positive, got {rows}x{cols}"
            )));
        }
        let expected = cell_count(rows, cols)?;
        if cells.len() != expected {
            return Err(GridError::InvalidShape(format!(
                "{rows}x{cols} needs {expected} cells, found {}",
                cells.len()
            )));
        }
        for (position, cell) in cells.iter().enumerate() {
            if cell.id != position {
                return Err(GridError::InvalidShape(format!(
                    "cell at position {position} has id {}",
                    cell.id
                )));
            }
            if !cell.reservation_consistent() {
                return Err(GridError::InvalidShape(format!(
                    "cell {position} has reserved={} but reservedBy={:?}",
                    cell.reserved, cell.reserved_by
                )));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in id order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn cell(&self, id: usize) -> Result<&Cell, GridError> {
        self.cells.get(id).ok_or(GridError::OutOfRange {
            id,
            len: self.cells.len(),
        })
    }

    /// (row, col) position of a cell id, row-major.
    pub fn position(&self, id: usize) -> Result<(usize, usize), GridError> {
        self.cell(id)?;
        Ok((id / self.cols, id % self.cols))
    }

    /// Replace one annotation field of one cell. All other cells are unchanged.
    pub fn set_field(&self, id: usize, update: FieldUpdate) -> Result<Self, GridError> {
        self.with_cell(id, |cell| cell.apply(update))
    }

    /// Copy-on-write edit of a single cell.
    pub(crate) fn with_cell<F>(&self, id: usize, edit: F) -> Result<Self, GridError>
    where
        F: FnOnce(&mut Cell),
    {
        self.cell(id)?;
        let mut next = self.clone();
        edit(&mut next.cells[id]);
        debug_assert!(next.cells[id].reservation_consistent());
        Ok(next)
    }

    /// Reserved cells in id order.
    pub fn reserved(&self) -> impl Iterator<Item = &Cell> + Clone + '_ {
        self.cells.iter().filter(|cell| cell.reserved)
    }

    pub fn summary(&self) -> Summary {
        let reserved = self.reserved().count();
        Summary {
            total: self.cells.len(),
            reserved,
            available: self.cells.len() - reserved,
        }
    }
}
