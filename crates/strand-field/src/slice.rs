//! One cross-sectional slice of the strand quarter model.
//!
//! A [`SliceGrid`] is a dense row-major rectangle of `f64` state values.
//! Row 0 and column 0 are the cooled outer faces of the quarter model;
//! the last row and last column lie on the symmetry planes. The grid can
//! hand out four disjoint mutable quadrant views so the scheduler's
//! workers update one slice concurrently without overlap.

use std::fmt;

/// Dense row-major grid of state values for one slice.
#[derive(Clone, PartialEq)]
pub struct SliceGrid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl SliceGrid {
    /// Allocate a `rows × cols` grid with every cell set to `init`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize, init: f64) -> Self {
        assert!(rows > 0 && cols > 0, "slice grid must be non-empty");
        Self {
            rows,
            cols,
            cells: vec![init; rows * cols],
        }
    }

    /// Number of rows (perpendicular cross-section direction).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn idx(&self, y: usize, x: usize) -> usize {
        assert!(
            y < self.rows && x < self.cols,
            "cell ({y}, {x}) out of range for {}x{} slice",
            self.rows,
            self.cols
        );
        y * self.cols + x
    }

    /// Read the cell at `(y, x)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> f64 {
        self.cells[self.idx(y, x)]
    }

    /// Write the cell at `(y, x)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[inline]
    pub fn set(&mut self, y: usize, x: usize, value: f64) {
        let i = self.idx(y, x);
        self.cells[i] = value;
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    /// The raw cells in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.cells
    }

    /// Split the grid into four disjoint mutable quadrants at the given
    /// row and column boundaries.
    ///
    /// Returns `[top-left, top-right, bottom-left, bottom-right]`. A
    /// split of 0 or `rows`/`cols` yields empty quadrants on that side.
    ///
    /// # Panics
    ///
    /// Panics if `row_split > rows` or `col_split > cols`.
    pub fn quadrants_mut(&mut self, row_split: usize, col_split: usize) -> [QuadrantMut<'_>; 4] {
        assert!(
            row_split <= self.rows && col_split <= self.cols,
            "quadrant split ({row_split}, {col_split}) out of range for {}x{} slice",
            self.rows,
            self.cols
        );
        let cols = self.cols;
        let (top, bottom) = self.cells.split_at_mut(row_split * cols);
        let mut tl = Vec::with_capacity(row_split);
        let mut tr = Vec::with_capacity(row_split);
        for row in top.chunks_mut(cols) {
            let (l, r) = row.split_at_mut(col_split);
            tl.push(l);
            tr.push(r);
        }
        let lower_rows = self.rows - row_split;
        let mut bl = Vec::with_capacity(lower_rows);
        let mut br = Vec::with_capacity(lower_rows);
        for row in bottom.chunks_mut(cols) {
            let (l, r) = row.split_at_mut(col_split);
            bl.push(l);
            br.push(r);
        }
        [
            QuadrantMut::new(tl, 0, 0),
            QuadrantMut::new(tr, 0, col_split),
            QuadrantMut::new(bl, row_split, 0),
            QuadrantMut::new(br, row_split, col_split),
        ]
    }
}

impl fmt::Debug for SliceGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceGrid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

/// A disjoint mutable rectangular view into one [`SliceGrid`].
///
/// Cells are addressed in the *parent grid's* coordinates; the view
/// remembers its own offsets so worker code writes the same `(y, x)` it
/// read from the previous-tick field.
pub struct QuadrantMut<'a> {
    rows: Vec<&'a mut [f64]>,
    row_start: usize,
    col_start: usize,
}

impl<'a> QuadrantMut<'a> {
    fn new(rows: Vec<&'a mut [f64]>, row_start: usize, col_start: usize) -> Self {
        Self {
            rows,
            row_start,
            col_start,
        }
    }

    /// First parent-grid row covered by this view.
    #[inline]
    pub fn row_start(&self) -> usize {
        self.row_start
    }

    /// One past the last parent-grid row covered by this view.
    #[inline]
    pub fn row_end(&self) -> usize {
        self.row_start + self.rows.len()
    }

    /// First parent-grid column covered by this view.
    #[inline]
    pub fn col_start(&self) -> usize {
        self.col_start
    }

    /// One past the last parent-grid column covered by this view.
    #[inline]
    pub fn col_end(&self) -> usize {
        self.col_start + self.rows.first().map_or(0, |r| r.len())
    }

    /// True if the view covers no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.rows[0].is_empty()
    }

    /// Write a cell addressed in parent-grid coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `(y, x)` lies outside this view.
    #[inline]
    pub fn set(&mut self, y: usize, x: usize, value: f64) {
        assert!(
            y >= self.row_start && x >= self.col_start,
            "cell ({y}, {x}) below quadrant origin ({}, {})",
            self.row_start,
            self.col_start
        );
        self.rows[y - self.row_start][x - self.col_start] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_get_set() {
        let mut g = SliceGrid::new(3, 4, 0.0);
        g.set(1, 2, 7.5);
        assert_eq!(g.get(1, 2), 7.5);
        assert_eq!(g.get(2, 1), 0.0);
        assert_eq!(g.values()[1 * 4 + 2], 7.5);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_cell_panics() {
        let g = SliceGrid::new(3, 4, 0.0);
        g.get(3, 0);
    }

    #[test]
    fn quadrants_cover_grid_disjointly() {
        let mut g = SliceGrid::new(5, 6, 0.0);
        let mut quads = g.quadrants_mut(2, 3);
        for q in quads.iter_mut() {
            for y in q.row_start()..q.row_end() {
                for x in q.col_start()..q.col_end() {
                    q.set(y, x, (y * 6 + x) as f64);
                }
            }
        }
        drop(quads);
        for y in 0..5 {
            for x in 0..6 {
                assert_eq!(g.get(y, x), (y * 6 + x) as f64, "cell ({y}, {x})");
            }
        }
    }

    #[test]
    fn degenerate_split_yields_empty_quadrants() {
        let mut g = SliceGrid::new(2, 2, 1.0);
        let quads = g.quadrants_mut(0, 2);
        assert!(quads[0].is_empty());
        assert!(quads[1].is_empty());
        assert!(quads[3].is_empty());
        assert_eq!(quads[2].row_end(), 2);
        assert_eq!(quads[2].col_end(), 2);
    }
}
