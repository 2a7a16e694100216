use core::fmt;

use crate::*;

/// Rectangular grid stored as a [`DynArray`] of rows.
///
/// Once the grid has a row, every row has the same length. Edits that would break that
/// are rejected without touching the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DynGrid<T> {
    storage: DynArray<DynArray<T>>,
}

impl<T> DynGrid<T> {
    pub fn new() -> Self {
        Self {
            storage: DynArray::new(),
        }
    }

    /// Builds a `rows x cols` grid, `make(row, col)` supplying each cell.
    ///
    /// Either dimension being zero yields an empty grid.
    pub fn filled(
        rows: usize,
        cols: usize,
        mut make: impl FnMut(usize, usize) -> T,
    ) -> Result<Self> {
        let mut grid = Self::new();
        if cols == 0 {
            return Ok(grid);
        }
        for row in 0..rows {
            let cells: DynArray<T> = (0..cols).map(|col| make(row, col)).collect();
            grid.storage.add(cells)?;
        }
        Ok(grid)
    }

    pub fn row_count(&self) -> usize {
        self.storage.size()
    }

    pub fn col_count(&self) -> usize {
        self.storage.get(0).map_or(0, DynArray::size)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Whether `(row, col)` lies inside the grid and holds a value.
    pub fn is_valid_cell(&self, row: usize, col: usize) -> bool {
        row < self.row_count() && col < self.col_count() && self.get(row, col).is_ok()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.storage.get(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.storage.get_mut(row)?.get_mut(col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<T> {
        self.storage.get_mut(row)?.set(col, value)
    }

    pub fn rows(&self) -> ArrayIter<'_, DynArray<T>> {
        self.storage.iter()
    }

    /// Inserts `row` before `index`, `index == row_count()` appends.
    #[must_use]
    pub fn add_row(&mut self, index: usize, row: DynArray<T>) -> bool {
        if row.is_empty() || index > self.row_count() {
            return false;
        }
        if !self.is_empty() && row.size() != self.col_count() {
            return false;
        }
        self.storage.insert(index, row).is_ok()
    }

    /// Inserts one value of `col` into every row at `index`, `index == col_count()`
    /// appends.
    #[must_use]
    pub fn add_col(&mut self, index: usize, col: DynArray<T>) -> bool {
        if index > self.col_count() || col.is_empty() || col.size() != self.row_count() {
            return false;
        }

        let mut inserted = 0;
        for (row, value) in self.storage.iter_mut().zip(col) {
            if let Err(err) = row.insert(index, value) {
                log::warn!("Column insert failed at row {}: {}", inserted, err);
                break;
            }
            inserted += 1;
        }
        if inserted == self.row_count() {
            return true;
        }

        // undo the rows already extended
        for row in self.storage.iter_mut().take(inserted) {
            let _ = row.remove(index);
        }
        false
    }

    pub fn remove_row(&mut self, index: usize) -> Option<DynArray<T>> {
        self.storage.remove(index).ok()
    }

    /// Removes column `index` from every row, dropping all rows once no column is left.
    pub fn remove_col(&mut self, index: usize) -> Option<DynArray<T>> {
        if index >= self.col_count() {
            return None;
        }
        let removed = self
            .storage
            .iter_mut()
            .map(|row| row.remove(index))
            .collect::<Result<DynArray<T>>>()
            .ok()?;
        if self.col_count() == 0 {
            self.storage = DynArray::new();
        }
        Some(removed)
    }
}

impl<T> Default for DynGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for DynGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row_count() == 0 || self.col_count() == 0 {
            return f.write_str("empty board");
        }
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str("|")?;
            for cell in row {
                write!(f, "{}|", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn assert_rectangular<T>(grid: &DynGrid<T>) {
        let cols = grid.col_count();
        assert!(grid.rows().all(|row| row.size() == cols));
    }

    fn int_grid() -> DynGrid<i32> {
        let mut grid = DynGrid::new();
        for i in 0..3 {
            let row: DynArray<i32> = [(i + 1) * 10, (i + 1) * 11].into_iter().collect();
            assert!(grid.add_row(grid.row_count(), row));
        }
        grid
    }

    #[test]
    fn add_row_to_empty_grid() {
        let mut grid = DynGrid::new();
        let row: DynArray<&str> = ["English", "Spanish", "German"].into_iter().collect();

        assert_eq!((grid.row_count(), grid.col_count()), (0, 0));
        assert!(!grid.add_row(1, row.clone()));
        assert!(grid.add_row(0, row));
        assert_eq!((grid.row_count(), grid.col_count()), (1, 3));
    }

    #[test]
    fn get_set_and_cell_validity() {
        let row: DynArray<&str> = ["English", "Spanish", "German"].into_iter().collect();
        let mut grid = DynGrid::new();
        assert!(grid.add_row(0, row));

        assert_eq!(*grid.get(0, 0).unwrap(), "English");
        assert_eq!(grid.set(0, 1, "Espano").unwrap(), "Spanish");
        assert_eq!(*grid.get(0, 1).unwrap(), "Espano");
        assert!(grid.is_valid_cell(0, 0));
        assert!(grid.is_valid_cell(0, 2));
        assert!(!grid.is_valid_cell(0, 3));
        assert!(!grid.is_valid_cell(1, 0));
        assert!(!grid.is_valid_cell(3, 2));
        assert_eq!(
            grid.get(0, 3),
            Err(GameError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            grid.set(2, 0, "x"),
            Err(GameError::IndexOutOfRange { index: 2, len: 1 })
        );
    }

    #[test]
    fn add_row_rejects_mismatched_length() {
        let mut grid = int_grid();
        let short: DynArray<i32> = [1].into_iter().collect();

        assert!(!grid.add_row(0, short));
        assert!(!grid.add_row(0, DynArray::new()));
        assert_eq!(grid.row_count(), 3);
        assert_rectangular(&grid);
    }

    #[test]
    fn display_renders_rows() {
        assert_eq!(int_grid().to_string(), "|10|11|\n|20|22|\n|30|33|");
        assert_eq!(DynGrid::<i32>::new().to_string(), "empty board");
    }

    #[test]
    fn add_col_requires_one_value_per_row() {
        let mut grid = int_grid();
        let mut col: DynArray<i32> = [-10, -20].into_iter().collect();

        assert!(!grid.add_col(1, col.clone()));
        col.add(-30).unwrap();
        assert!(!grid.add_col(3, col.clone()));
        assert!(!grid.add_col(1, DynArray::new()));
        assert!(grid.add_col(1, col));

        assert_eq!((grid.row_count(), grid.col_count()), (3, 3));
        assert_eq!(grid.to_string(), "|10|-10|11|\n|20|-20|22|\n|30|-30|33|");
        assert_rectangular(&grid);
    }

    #[test]
    fn add_col_on_empty_grid_is_rejected() {
        let mut grid = DynGrid::new();
        let col: DynArray<i32> = [1, 2].into_iter().collect();
        assert!(!grid.add_col(0, col));
        assert!(grid.is_empty());
    }

    #[test]
    fn remove_rows_and_cols_until_empty() {
        let mut grid = int_grid();
        let col: DynArray<i32> = [-10, -20, -30].into_iter().collect();
        assert!(grid.add_col(1, col));

        assert!(grid.remove_row(5).is_none());
        assert!(grid.remove_row(3).is_none());
        assert_eq!(grid.remove_row(1).unwrap().to_string(), "[20, -20, 22]");
        assert_eq!((grid.row_count(), grid.col_count()), (2, 3));

        assert!(grid.remove_col(3).is_none());
        assert_eq!(grid.remove_col(0).unwrap().to_string(), "[10, 30]");
        assert_eq!(grid.remove_col(1).unwrap().to_string(), "[11, 33]");
        assert_rectangular(&grid);
        assert_eq!(grid.remove_col(0).unwrap().to_string(), "[-10, -30]");
        assert_eq!((grid.row_count(), grid.col_count()), (0, 0));
        assert!(grid.remove_col(0).is_none());
    }

    #[test]
    fn filled_builds_requested_shape() {
        let grid = DynGrid::filled(3, 4, |row, col| row * 4 + col).unwrap();
        assert_eq!((grid.row_count(), grid.col_count()), (3, 4));
        assert_eq!(*grid.get(2, 3).unwrap(), 11);
        assert_rectangular(&grid);

        assert!(DynGrid::filled(3, 0, |_, _| 0).unwrap().is_empty());
    }
}
