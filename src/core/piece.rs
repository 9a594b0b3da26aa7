//! Piece module - tetromino shapes and rotation
//!
//! Shapes are the seven canonical tetromino matrices. Rotation is the
//! classic reverse-rows-then-transpose quarter turn, with no wall kicks:
//! a rotation that does not fit is rejected outright.

use crate::core::grid::Grid;
use crate::types::{PaletteColor, PieceKind, GRID_WIDTH};

/// A tetromino's occupied cells as (x, y) offsets from its anchor, plus the
/// bounding-box dimensions the rotation math needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [(i8, i8); 4],
}

impl Shape {
    /// Canonical spawn-orientation shape for a piece kind.
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_cells(4, 1, [(0, 0), (1, 0), (2, 0), (3, 0)]),
            PieceKind::J => Self::from_cells(3, 2, [(0, 0), (0, 1), (1, 1), (2, 1)]),
            PieceKind::L => Self::from_cells(3, 2, [(2, 0), (0, 1), (1, 1), (2, 1)]),
            PieceKind::O => Self::from_cells(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]),
            PieceKind::S => Self::from_cells(3, 2, [(1, 0), (2, 0), (0, 1), (1, 1)]),
            PieceKind::T => Self::from_cells(3, 2, [(1, 0), (0, 1), (1, 1), (2, 1)]),
            PieceKind::Z => Self::from_cells(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]),
        }
    }

    fn from_cells(width: u8, height: u8, cells: [(i8, i8); 4]) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Occupied cells as offsets from the anchor (top-left of the bounding box).
    pub fn cells(&self) -> &[(i8, i8); 4] {
        &self.cells
    }

    /// Quarter turn clockwise (reverse rows, then transpose).
    ///
    /// Cell (x, y) maps to (height - 1 - y, x); the bounding box swaps sides.
    pub fn rotated(&self) -> Self {
        let h = self.height as i8;
        let mut cells = self.cells;
        for cell in &mut cells {
            *cell = (h - 1 - cell.1, cell.0);
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// The falling piece: shape, color, and signed anchor position.
/// y is negative while the piece is entering from above the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub shape: Shape,
    pub color: PaletteColor,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// New piece at the spawn position: horizontally centered, fully above
    /// the field so it falls in from the top.
    pub fn spawn(kind: PieceKind, color: PaletteColor) -> Self {
        let shape = Shape::of(kind);
        Self {
            shape,
            color,
            x: ((GRID_WIDTH - shape.width()) / 2) as i8,
            y: -(shape.height() as i8),
        }
    }

    /// True iff this piece, offset by (dx, dy), fits on the grid.
    pub fn fits(&self, grid: &Grid, dx: i8, dy: i8) -> bool {
        grid.can_place(&self.shape, self.x + dx, self.y + dy)
    }

    /// Anchor y of the straight-drop landing position. Recomputed from the
    /// current state every time; never mutates the piece.
    pub fn drop_y(&self, grid: &Grid) -> i8 {
        let mut dy: i8 = 0;
        while self.fits(grid, 0, dy + 1) {
            dy += 1;
        }
        self.y + dy
    }

    /// The ghost projection: this piece translated to its landing position.
    pub fn ghost(&self, grid: &Grid) -> Tetromino {
        Tetromino {
            y: self.drop_y(grid),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_quarter_turns_are_identity() {
        for kind in PieceKind::ALL {
            let shape = Shape::of(kind);
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(shape, back, "{:?} rotation is not cyclic", kind);
        }
    }

    #[test]
    fn rotation_swaps_bounding_box() {
        let i = Shape::of(PieceKind::I);
        assert_eq!((i.width(), i.height()), (4, 1));
        let vertical = i.rotated();
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        assert_eq!(vertical.cells(), &[(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn o_rotation_is_identity() {
        let o = Shape::of(PieceKind::O);
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn spawn_is_centered_above_field() {
        let piece = Tetromino::spawn(PieceKind::T, PaletteColor(0));
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, -2);

        let i = Tetromino::spawn(PieceKind::I, PaletteColor(0));
        assert_eq!(i.x, 3);
        assert_eq!(i.y, -1);
    }

    #[test]
    fn drop_y_reaches_the_floor_on_empty_grid() {
        let grid = Grid::new();
        let piece = Tetromino::spawn(PieceKind::O, PaletteColor(0));
        // O is 2 tall, so its anchor lands at row 18.
        assert_eq!(piece.drop_y(&grid), 18);
        // Ghost never mutates the source piece.
        let ghost = piece.ghost(&grid);
        assert_eq!(ghost.y, 18);
        assert_eq!(piece.y, -2);
    }
}
