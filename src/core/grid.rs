//! Grid module - the locked-block playfield
//!
//! A 10x20 matrix of cells stored as a flat array for cache locality and
//! zero-allocation. Coordinates: (x, y) with x in 0..10 left to right and
//! y in 0..20 top to bottom. Pieces spawn above the field at negative y,
//! so collision queries accept signed coordinates: above-field positions
//! count as empty, everything else out of bounds counts as occupied.

use arrayvec::ArrayVec;

use crate::core::piece::{Shape, Tetromino};
use crate::types::{Cell, PaletteColor, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Result of settling a piece into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Every cell landed inside the visible field.
    Locked,
    /// At least one cell would have landed above the field (y < 0).
    TopOut,
}

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision query with spawn-friendly semantics: positions above the
    /// field (y < 0, x in range) are free so pieces can fall in from above;
    /// the side walls, the floor, and locked cells are occupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.cells[(y as usize) * (GRID_WIDTH as usize) + (x as usize)].is_some()
    }

    /// True iff every occupied cell of `shape`, anchored at (x, y), is free.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .cells()
            .iter()
            .all(|&(dx, dy)| !self.is_occupied(x + dx, y + dy))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        let start = y * GRID_WIDTH as usize;
        let end = start + GRID_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Settle a piece into the grid.
    ///
    /// Cells inside the visible field are written; if any cell sits above
    /// the field (y < 0) the outcome is `TopOut`. The visible part of the
    /// piece is still written so the final frame shows where it ended up.
    pub fn lock(&mut self, piece: &Tetromino) -> LockOutcome {
        let mut outcome = LockOutcome::Locked;
        for &(dx, dy) in piece.shape.cells().iter() {
            let x = piece.x + dx;
            let y = piece.y + dy;
            if y < 0 {
                outcome = LockOutcome::TopOut;
            } else {
                self.set(x, y, Some(piece.color));
            }
        }
        outcome
    }

    /// Clear all full rows, shifting everything above down.
    ///
    /// Single bottom-to-top pass with a write pointer: fullness is judged
    /// against the pre-clear rows, so simultaneous clears cannot skip rows.
    /// Returns the cleared row indices, bottom to top.
    pub fn clear_full_rows(&mut self) -> ArrayVec<i8, 4> {
        let mut cleared = ArrayVec::new();
        let width = GRID_WIDTH as usize;
        let mut write_y = GRID_HEIGHT as usize;

        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                let _ = cleared.try_push(read_y as i8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    let dst = write_y * width;
                    self.cells.copy_within(src..src + width, dst);
                }
            }
        }

        // Rows vacated at the top become empty.
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// True iff any locked cell sits strictly above `row`.
    pub fn any_occupied_above(&self, row: i8) -> bool {
        let limit = row.clamp(0, GRID_HEIGHT as i8) as usize;
        self.cells[..limit * GRID_WIDTH as usize]
            .iter()
            .any(|cell| cell.is_some())
    }

    /// Reset the grid to all-empty
    pub fn reset(&mut self) {
        self.cells = [None; GRID_SIZE];
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill an entire row with a color. Test and scenario setup helper.
    pub fn fill_row(&mut self, y: i8, color: PaletteColor) {
        for x in 0..GRID_WIDTH as i8 {
            self.set(x, y, Some(color));
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    const RED: PaletteColor = PaletteColor(0);
    const BLUE: PaletteColor = PaletteColor(1);

    #[test]
    fn index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn above_field_is_free_walls_are_not() {
        let grid = Grid::new();
        assert!(!grid.is_occupied(4, -1));
        assert!(!grid.is_occupied(0, -3));
        assert!(grid.is_occupied(-1, 5));
        assert!(grid.is_occupied(10, 5));
        assert!(grid.is_occupied(4, 20));
        // Above-field but outside the columns is still a wall.
        assert!(grid.is_occupied(-1, -1));
    }

    #[test]
    fn lock_writes_visible_cells_and_reports_top_out() {
        let mut grid = Grid::new();
        let mut piece = Tetromino::spawn(PieceKind::O, RED);
        piece.x = 4;
        piece.y = -1;

        assert_eq!(grid.lock(&piece), LockOutcome::TopOut);
        // The bottom row of the O still landed in row 0.
        assert_eq!(grid.get(5, 0), Some(Some(RED)));
        assert_eq!(grid.get(5, 1), Some(None));
    }

    #[test]
    fn clear_full_rows_reports_bottom_to_top() {
        let mut grid = Grid::new();
        grid.fill_row(19, RED);
        grid.fill_row(17, BLUE);

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
    }

    #[test]
    fn any_occupied_above_respects_boundary() {
        let mut grid = Grid::new();
        grid.set(3, 5, Some(RED));
        assert!(grid.any_occupied_above(6));
        assert!(!grid.any_occupied_above(5));
        assert!(!grid.any_occupied_above(0));
    }
}
