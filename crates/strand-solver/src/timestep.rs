//! Adaptive explicit-stability timestep.
//!
//! Every coefficient in the stencil depends on the local state value,
//! so the stability bound is re-evaluated each tick. Scanning every
//! cell would cost as much as the update itself; instead the bound is
//! probed at the nine canonical positions of each live slice, which
//! cover all boundary-treatment combinations the slice contains.

use strand_core::CoolingZone;
use strand_field::{SliceGrid, SlidingFieldBuffer};

use crate::cell::{canonical_positions, classify, Side};
use crate::conductance::effective_conductivity;
use crate::stencil::StencilSolver;

impl StencilSolver<'_> {
    /// Stability bound contributed by one cell, if it constrains.
    ///
    /// Cells with a non-positive state value or no value-dependent
    /// coupling (all faces symmetric or flux-imposed) contribute no
    /// bound.
    fn cell_timestep(&self, grid: &SliceGrid, y: usize, x: usize, zone: &CoolingZone) -> Option<f64> {
        let value = grid.get(y, x);
        if !(value > 0.0) {
            return None;
        }
        let props = self.table().props_at(value);
        let (dy, dx) = self.steps();
        let mut coupling = 0.0;
        for side in classify(y, x, grid.rows(), grid.cols()).sides(y, x, dy, dx) {
            match side {
                Side::Conduction { ny, nx, step } => {
                    let k_nb = self.table().conductivity_at(grid.get(ny, nx));
                    let half = step * 0.5;
                    let k_eff = effective_conductivity(half, half, props.conductivity, k_nb);
                    coupling += k_eff / (step * (half + half));
                }
                Side::Cooled { step } => {
                    coupling += self.machine().boundary_coefficient(zone) / step;
                }
                Side::Symmetry => {}
            }
        }
        if !(coupling > 0.0) {
            return None;
        }
        let dt = props.density * props.enthalpy / (value * coupling);
        (dt.is_finite() && dt > 0.0).then_some(dt)
    }

    /// The tick timestep: the minimum stability bound over the nine
    /// canonical positions of every live slice, capped at `max_dt`.
    ///
    /// `head_offset_m` is the axial distance the newest slice has moved
    /// past the meniscus (zero while material is still being poured).
    /// An empty window returns `max_dt` unchanged.
    pub fn stable_timestep(&self, field: &SlidingFieldBuffer, head_offset_m: f64, max_dt: f64) -> f64 {
        if field.is_empty() {
            return max_dt;
        }
        let positions = canonical_positions(field.rows(), field.cols());
        let machine = self.machine();
        let mut dt = max_dt;
        field.traverse(|z, grid| {
            let zone = machine.zone_of(head_offset_m + machine.slice_center(z));
            for &(y, x) in &positions {
                if let Some(bound) = self.cell_timestep(grid, y, x, zone) {
                    dt = dt.min(bound);
                }
            }
        });
        dt
    }
}
