/// Subplot grid: one cell per package, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
}

impl GridLayout {
    /// `columns = min(packages, max_columns)`, `rows = ceil(packages / columns)`.
    ///
    /// Zero packages gives an empty 0x0 grid.
    pub fn plan(packages: usize, max_columns: usize) -> Self {
        let columns = packages.min(max_columns.max(1));
        if columns == 0 {
            return GridLayout {
                rows: 0,
                columns: 0,
            };
        }
        GridLayout {
            rows: packages.div_ceil(columns),
            columns,
        }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.cells() == 0
    }

    /// Row-major `(row, column)` of the 0-based subplot `index`.
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.cells() {
            return None;
        }
        Some((index / self.columns, index % self.columns))
    }
}
