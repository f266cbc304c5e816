//! Full-row detection and collapse. One row per call: several full rows are cleared on
//! successive ticks, not all at once.

use crate::well::Well;

impl Well {
    /// First full interior row, scanning from the top (row 0) down.
    pub fn find_full_row(&self) -> Option<i32> {
        (0..self.height()).find(|&row| {
            self.interior_columns()
                .all(|col| self.is_occupied((col, row)))
        })
    }

    /// Remove `row` and shift every interior cell above it down by one.
    pub fn collapse(&mut self, row: i32) {
        for r in (0..=row).rev() {
            self.clear_row_range(r..r + 1);
            for col in self.interior_columns() {
                if let Some(color) = self.get((col, r - 1)) {
                    self.set((col, r), color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::well::{BlockColor, Well};

    fn fill_row(well: &mut Well, row: i32, color: BlockColor) {
        for col in 1..=well.width() {
            well.set((col, row), color);
        }
    }

    #[test]
    fn test_empty_well_has_no_full_row() {
        assert_eq!(Well::new(10, 20).find_full_row(), None);
    }

    #[test]
    fn test_floor_is_not_a_full_row() {
        let well = Well::new(4, 5);
        assert!(well.is_wall((1, 5)));
        assert_eq!(well.find_full_row(), None);
    }

    #[test]
    fn test_find_then_collapse_row_five() {
        let mut well = Well::new(10, 20);
        fill_row(&mut well, 5, BlockColor::Blue);
        assert_eq!(well.find_full_row(), Some(5));
        well.collapse(5);
        assert_eq!(well.find_full_row(), None);
        assert!(well.row(5).iter().all(Option::is_none));
    }

    #[test]
    fn test_topmost_full_row_reported_first() {
        let mut well = Well::new(10, 20);
        fill_row(&mut well, 19, BlockColor::Red);
        fill_row(&mut well, 12, BlockColor::Green);
        assert_eq!(well.find_full_row(), Some(12));
        well.collapse(12);
        assert_eq!(well.find_full_row(), Some(19));
    }

    #[test]
    fn test_almost_full_row_is_not_full() {
        let mut well = Well::new(10, 20);
        fill_row(&mut well, 8, BlockColor::Cyan);
        well.remove((10, 8));
        assert_eq!(well.find_full_row(), None);
    }

    #[test]
    fn test_collapse_shifts_rows_above_only() {
        let mut well = Well::new(10, 20);
        fill_row(&mut well, 19, BlockColor::Red);
        well.set((2, 18), BlockColor::Orange);
        well.set((10, 18), BlockColor::Blue);
        well.set((4, 3), BlockColor::Cyan);
        well.set((7, 0), BlockColor::Green);
        well.collapse(19);

        assert_eq!(well.get((2, 19)), Some(BlockColor::Orange));
        assert_eq!(well.get((10, 19)), Some(BlockColor::Blue));
        assert_eq!(well.get((4, 4)), Some(BlockColor::Cyan));
        assert_eq!(well.get((7, 1)), Some(BlockColor::Green));
        assert!(well.row(18).iter().all(Option::is_none));
        assert!(well.row(0).iter().all(Option::is_none));
        assert_eq!(well.settled_count(), 4);
    }

    #[test]
    fn test_collapse_leaves_rows_below_and_walls() {
        let mut well = Well::new(10, 20);
        well.set((3, 15), BlockColor::Yellow);
        fill_row(&mut well, 10, BlockColor::Magenta);
        well.collapse(10);
        assert_eq!(well.get((3, 15)), Some(BlockColor::Yellow));
        for row in 0..=20 {
            assert!(well.is_wall((0, row)));
            assert!(well.is_wall((11, row)));
        }
        assert_eq!(well.settled_count(), 1);
    }
}
