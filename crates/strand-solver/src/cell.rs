//! Cell classification for the quarter cross-section.
//!
//! The quarter model cools on two faces and mirrors on the other two:
//! row 0 and column 0 are the outer (cooled) faces, the last row and
//! last column lie on the symmetry planes. Every cell falls into one of
//! nine classes by which faces it touches, and each class fixes the
//! treatment of all four stencil sides by an exhaustive match.

use smallvec::SmallVec;

/// Position class of one cell within the quarter cross-section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// Touches no face.
    Interior,
    /// On the cooled top face (row 0).
    CooledTop,
    /// On the cooled left face (column 0).
    CooledLeft,
    /// The cooled outer corner (row 0, column 0).
    CooledCorner,
    /// On the right symmetry plane (last column).
    SymmetryRight,
    /// On the bottom symmetry plane (last row).
    SymmetryBottom,
    /// The strand-centre corner (last row, last column).
    SymmetryCorner,
    /// Cooled top face meeting the right symmetry plane.
    CooledTopSymmetryRight,
    /// Cooled left face meeting the bottom symmetry plane.
    CooledLeftSymmetryBottom,
}

/// Classify the cell at `(y, x)` in a `rows × cols` quarter grid.
///
/// # Panics
///
/// Panics if either coordinate is out of range or the grid is smaller
/// than 2×2 (a quarter model needs distinct cooled and symmetry faces).
pub fn classify(y: usize, x: usize, rows: usize, cols: usize) -> CellClass {
    assert!(rows >= 2 && cols >= 2, "quarter grid must be at least 2x2");
    assert!(y < rows && x < cols, "cell ({y}, {x}) out of range");
    let top = y == 0;
    let left = x == 0;
    let bottom = y == rows - 1;
    let right = x == cols - 1;
    match (top, left, bottom, right) {
        (true, true, _, _) => CellClass::CooledCorner,
        (true, _, _, true) => CellClass::CooledTopSymmetryRight,
        (_, true, true, _) => CellClass::CooledLeftSymmetryBottom,
        (_, _, true, true) => CellClass::SymmetryCorner,
        (true, _, _, _) => CellClass::CooledTop,
        (_, true, _, _) => CellClass::CooledLeft,
        (_, _, true, _) => CellClass::SymmetryBottom,
        (_, _, _, true) => CellClass::SymmetryRight,
        _ => CellClass::Interior,
    }
}

/// How one stencil side of a cell is treated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Side {
    /// Conduct against the in-grid neighbour at `(ny, nx)` across `step`.
    Conduction { ny: usize, nx: usize, step: f64 },
    /// Cooled outer face: apply the zone boundary condition across `step`.
    Cooled { step: f64 },
    /// Symmetry plane: zero-gradient, no heat crosses.
    Symmetry,
}

impl CellClass {
    /// The four side treatments for a cell of this class at `(y, x)`,
    /// in up/left/down/right order. `dy`/`dx` are the grid steps.
    pub(crate) fn sides(self, y: usize, x: usize, dy: f64, dx: f64) -> SmallVec<[Side; 4]> {
        let up = Side::Conduction {
            ny: y.wrapping_sub(1),
            nx: x,
            step: dy,
        };
        let left = Side::Conduction {
            ny: y,
            nx: x.wrapping_sub(1),
            step: dx,
        };
        let down = Side::Conduction {
            ny: y + 1,
            nx: x,
            step: dy,
        };
        let right = Side::Conduction {
            ny: y,
            nx: x + 1,
            step: dx,
        };
        let cooled_y = Side::Cooled { step: dy };
        let cooled_x = Side::Cooled { step: dx };
        match self {
            CellClass::Interior => SmallVec::from_slice(&[up, left, down, right]),
            CellClass::CooledTop => SmallVec::from_slice(&[cooled_y, left, down, right]),
            CellClass::CooledLeft => SmallVec::from_slice(&[up, cooled_x, down, right]),
            CellClass::CooledCorner => SmallVec::from_slice(&[cooled_y, cooled_x, down, right]),
            CellClass::SymmetryRight => {
                SmallVec::from_slice(&[up, left, down, Side::Symmetry])
            }
            CellClass::SymmetryBottom => {
                SmallVec::from_slice(&[up, left, Side::Symmetry, right])
            }
            CellClass::SymmetryCorner => {
                SmallVec::from_slice(&[up, left, Side::Symmetry, Side::Symmetry])
            }
            CellClass::CooledTopSymmetryRight => {
                SmallVec::from_slice(&[cooled_y, left, down, Side::Symmetry])
            }
            CellClass::CooledLeftSymmetryBottom => {
                SmallVec::from_slice(&[up, cooled_x, Side::Symmetry, right])
            }
        }
    }
}

/// One representative coordinate per cell class present in a
/// `rows × cols` grid. Small grids collapse some classes; duplicates
/// are removed.
pub fn canonical_positions(rows: usize, cols: usize) -> SmallVec<[(usize, usize); 9]> {
    let mid_y = (rows / 2).clamp(1, rows.saturating_sub(2).max(1));
    let mid_x = (cols / 2).clamp(1, cols.saturating_sub(2).max(1));
    let mut out: SmallVec<[(usize, usize); 9]> = SmallVec::new();
    for y in [0, mid_y, rows - 1] {
        for x in [0, mid_x, cols - 1] {
            if !out.contains(&(y, x)) {
                out.push((y, x));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_covers_all_nine_classes() {
        let (rows, cols) = (4, 5);
        assert_eq!(classify(0, 0, rows, cols), CellClass::CooledCorner);
        assert_eq!(classify(0, 2, rows, cols), CellClass::CooledTop);
        assert_eq!(classify(0, 4, rows, cols), CellClass::CooledTopSymmetryRight);
        assert_eq!(classify(2, 0, rows, cols), CellClass::CooledLeft);
        assert_eq!(classify(2, 2, rows, cols), CellClass::Interior);
        assert_eq!(classify(2, 4, rows, cols), CellClass::SymmetryRight);
        assert_eq!(classify(3, 0, rows, cols), CellClass::CooledLeftSymmetryBottom);
        assert_eq!(classify(3, 2, rows, cols), CellClass::SymmetryBottom);
        assert_eq!(classify(3, 4, rows, cols), CellClass::SymmetryCorner);
    }

    #[test]
    fn corner_precedence_over_edges() {
        // A 2x2 grid is all corners.
        assert_eq!(classify(0, 0, 2, 2), CellClass::CooledCorner);
        assert_eq!(classify(0, 1, 2, 2), CellClass::CooledTopSymmetryRight);
        assert_eq!(classify(1, 0, 2, 2), CellClass::CooledLeftSymmetryBottom);
        assert_eq!(classify(1, 1, 2, 2), CellClass::SymmetryCorner);
    }

    #[test]
    fn symmetry_sides_carry_no_term() {
        let sides = CellClass::SymmetryCorner.sides(3, 4, 0.01, 0.01);
        let symmetric = sides.iter().filter(|s| **s == Side::Symmetry).count();
        assert_eq!(symmetric, 2);
    }

    #[test]
    fn canonical_positions_cover_every_class() {
        let positions = canonical_positions(6, 7);
        assert_eq!(positions.len(), 9);
        let classes: std::collections::HashSet<_> = positions
            .iter()
            .map(|&(y, x)| classify(y, x, 6, 7))
            .collect();
        assert_eq!(classes.len(), 9);
    }

    #[test]
    fn canonical_positions_dedupe_on_small_grids() {
        let positions = canonical_positions(2, 2);
        assert_eq!(positions.len(), 4);
    }
}
