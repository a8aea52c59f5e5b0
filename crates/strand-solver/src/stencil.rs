//! Explicit finite-difference update for one cell, quadrant, or slice.
//!
//! The solver reads every operand from the previous-tick grid and
//! writes only the next-tick grid, so update order within a tick is
//! irrelevant and partitions can run concurrently. Conduction is purely
//! in-plane: slices are thin enough that axial conduction is dominated
//! by advection, so each slice updates independently.

use strand_core::{CastingMachine, CoolingZone, MaterialTable};
use strand_field::{QuadrantMut, SliceGrid};

use crate::cell::{classify, Side};
use crate::conductance::effective_conductivity;

/// Explicit stencil over the quarter cross-section.
///
/// Holds references to the two read-only collaborators plus the grid
/// steps; one instance is shared by every worker in a dispatch.
pub struct StencilSolver<'a> {
    table: &'a MaterialTable,
    machine: &'a CastingMachine,
    dy: f64,
    dx: f64,
}

impl<'a> StencilSolver<'a> {
    /// Build a solver for a grid with the given cell steps, metres.
    ///
    /// # Panics
    ///
    /// Panics if either step is not strictly positive and finite.
    pub fn new(table: &'a MaterialTable, machine: &'a CastingMachine, dy: f64, dx: f64) -> Self {
        assert!(
            dy.is_finite() && dy > 0.0 && dx.is_finite() && dx > 0.0,
            "grid steps must be finite and positive"
        );
        Self {
            table,
            machine,
            dy,
            dx,
        }
    }

    /// Material table this solver reads properties from.
    pub fn table(&self) -> &MaterialTable {
        self.table
    }

    /// Machine description this solver reads boundary conditions from.
    pub fn machine(&self) -> &CastingMachine {
        self.machine
    }

    /// Grid steps `(dy, dx)`, metres.
    pub fn steps(&self) -> (f64, f64) {
        (self.dy, self.dx)
    }

    /// Next-tick value of the cell at `(y, x)` of `prev`, under the
    /// given zone's boundary conditions.
    ///
    /// A cell with all neighbours equal to itself and no cooled face
    /// accumulates exactly zero delta, so a uniform field stays
    /// bit-identical away from the cooled boundary.
    pub fn update_cell(
        &self,
        prev: &SliceGrid,
        y: usize,
        x: usize,
        zone: &CoolingZone,
        dt: f64,
    ) -> f64 {
        let rows = prev.rows();
        let cols = prev.cols();
        let value = prev.get(y, x);
        let k_self = self.table.conductivity_at(value);
        let density = self.table.density_at(value);
        let mut total = 0.0;
        for side in classify(y, x, rows, cols).sides(y, x, self.dy, self.dx) {
            match side {
                Side::Conduction { ny, nx, step } => {
                    let nb = prev.get(ny, nx);
                    let k_nb = self.table.conductivity_at(nb);
                    let half = step * 0.5;
                    let k_eff = effective_conductivity(half, half, k_self, k_nb);
                    total += k_eff * (value - nb) / (step * (half + half));
                }
                Side::Cooled { step } => {
                    total += self.machine.boundary_flux(zone, value) / step;
                }
                Side::Symmetry => {}
            }
        }
        let delta = total * 2.0 * dt / density;
        (value - delta).max(zone.floor_value)
    }

    /// Update every cell of one quadrant view from the previous grid.
    pub fn update_quadrant(
        &self,
        prev: &SliceGrid,
        quad: &mut QuadrantMut<'_>,
        zone: &CoolingZone,
        dt: f64,
    ) {
        for y in quad.row_start()..quad.row_end() {
            for x in quad.col_start()..quad.col_end() {
                quad.set(y, x, self.update_cell(prev, y, x, zone, dt));
            }
        }
    }

    /// Update a whole slice in row-major order.
    pub fn update_slice(
        &self,
        prev: &SliceGrid,
        next: &mut SliceGrid,
        zone: &CoolingZone,
        dt: f64,
    ) {
        for y in 0..prev.rows() {
            for x in 0..prev.cols() {
                next.set(y, x, self.update_cell(prev, y, x, zone, dt));
            }
        }
    }

    /// Update a whole slice visiting cells in a caller-supplied order.
    ///
    /// The order must enumerate every cell exactly once; the result is
    /// identical to [`Self::update_slice`] because all reads hit `prev`.
    pub fn update_slice_ordered(
        &self,
        prev: &SliceGrid,
        next: &mut SliceGrid,
        zone: &CoolingZone,
        dt: f64,
        order: &[(usize, usize)],
    ) {
        debug_assert_eq!(order.len(), prev.cell_count());
        for &(y, x) in order {
            next.set(y, x, self.update_cell(prev, y, x, zone, dt));
        }
    }
}
