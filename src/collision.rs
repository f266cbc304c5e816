//! Collision checks. Walls are occupied entries in the well, so there is no separate
//! bounds check: leaving the well and hitting a wall are the same test.

use crate::piece::Piece;
use crate::well::Well;

/// True if every cell of `piece`, shifted by (dcol, drow), is unoccupied.
pub fn can_place(well: &Well, piece: &Piece, dcol: i32, drow: i32) -> bool {
    piece
        .cells()
        .iter()
        .all(|&(col, row)| !well.is_occupied((col + dcol, row + drow)))
}

/// True if the piece cannot move one row down.
#[inline]
pub fn is_grounded(well: &Well, piece: &Piece) -> bool {
    !can_place(well, piece, 0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Shape;
    use crate::well::BlockColor;

    #[test]
    fn test_spawn_fits_empty_well() {
        let well = Well::new(10, 20);
        for shape in Shape::ALL {
            assert!(can_place(&well, &Piece::spawn(shape), 0, 0), "{shape:?}");
        }
    }

    #[test]
    fn test_side_walls_block() {
        let well = Well::new(10, 20);
        // I spans columns 4..=7: three steps left reaches column 1, four hits the wall.
        let piece = Piece::spawn(Shape::I);
        assert!(can_place(&well, &piece, -3, 0));
        assert!(!can_place(&well, &piece, -4, 0));
        assert!(can_place(&well, &piece, 3, 0));
        assert!(!can_place(&well, &piece, 4, 0));
    }

    #[test]
    fn test_floor_blocks() {
        let well = Well::new(10, 20);
        let piece = Piece::spawn(Shape::I);
        assert!(can_place(&well, &piece, 0, 19));
        assert!(!can_place(&well, &piece, 0, 20));
        assert!(is_grounded(&well, &piece.translate(0, 19)));
        assert!(!is_grounded(&well, &piece));
    }

    #[test]
    fn test_settled_block_blocks_one_cell() {
        let mut well = Well::new(10, 20);
        well.set((5, 3), BlockColor::Red);
        let piece = Piece::spawn(Shape::T); // (4,0) (5,0) (6,0) (5,1)
        assert!(can_place(&well, &piece, 0, 1));
        assert!(!can_place(&well, &piece, 0, 2));
        assert!(!can_place(&well, &piece, 0, 3));
        assert!(can_place(&well, &piece, 2, 3));
    }

    #[test]
    fn test_above_the_well_is_open() {
        let well = Well::new(10, 20);
        let piece = Piece::spawn(Shape::I).rotate();
        assert!(piece.cells().iter().any(|&(_, row)| row < 0));
        assert!(can_place(&well, &piece, 0, 0));
    }
}
