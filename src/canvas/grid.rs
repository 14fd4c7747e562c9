//! Canvas Grid
//!
//! A rectangular grid of cells. Importers only talk to it through
//! `new`, `resize`, `set_color` and `put_char`, and never touch the
//! storage layout directly.

use serde::{Deserialize, Serialize};

use super::cell::{Attr, Cell, Color};

/// Canvas error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    /// Cell storage for the requested size could not be allocated
    #[error("cannot allocate a {width}x{height} canvas")]
    Allocation { width: usize, height: usize },
}

/// A character canvas: `width * height` cells stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    /// Attribute stamped on every written character
    active: Attr,
}

impl Canvas {
    /// Create a canvas filled with blanks in the default attribute
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        Self::with_attr(width, height, Attr::default())
    }

    /// Create a canvas filled with blanks in `active`, which also becomes
    /// the attribute for subsequent writes
    pub fn with_attr(width: usize, height: usize, active: Attr) -> Result<Self, CanvasError> {
        let cells = alloc_cells(width, height, Cell::blank(active))?;
        Ok(Self {
            cells,
            width,
            height,
            active,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The attribute applied by the next `put_char`
    pub fn active_attr(&self) -> Attr {
        self.active
    }

    /// Set the color pair applied by subsequent writes
    pub fn set_color(&mut self, fg: Color, bg: Color) {
        self.active = Attr::new(fg, bg);
    }

    /// Write a character at (x, y) in the active attribute.
    ///
    /// Coordinates outside the canvas are ignored.
    pub fn put_char(&mut self, x: i64, y: i64, ch: u32) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        self.cells[index] = Cell::new(ch, self.active);
    }

    /// Get a reference to a cell
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Get a mutable reference to a cell
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Get a row of cells
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.cells[start..start + self.width])
        } else {
            None
        }
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.width.max(1))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to all cells in row-major order
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Resize the canvas.
    ///
    /// Cells inside both the old and new bounds keep their content; new
    /// cells are blanks in the active attribute. On failure the canvas is
    /// left untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), CanvasError> {
        if width == self.width && height == self.height {
            return Ok(());
        }

        // Rows are contiguous, so a height-only change works in place
        if width == self.width {
            let err = CanvasError::Allocation { width, height };
            let len = width.checked_mul(height).ok_or_else(|| err.clone())?;
            if len > self.cells.len() {
                self.cells
                    .try_reserve(len - self.cells.len())
                    .map_err(|_| err)?;
            }
            self.cells.resize(len, Cell::blank(self.active));
            self.height = height;
            return Ok(());
        }

        let mut cells = alloc_cells(width, height, Cell::blank(self.active))?;
        let keep_cols = width.min(self.width);
        for y in 0..height.min(self.height) {
            let src = y * self.width;
            let dst = y * width;
            cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

fn alloc_cells(width: usize, height: usize, fill: Cell) -> Result<Vec<Cell>, CanvasError> {
    let err = CanvasError::Allocation { width, height };
    let len = width.checked_mul(height).ok_or_else(|| err.clone())?;
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|_| err)?;
    cells.resize(len, fill);
    Ok(cells)
}
