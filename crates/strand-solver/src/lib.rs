//! Explicit finite-difference solver for the strand thermal simulator.
//!
//! One tick of physics: classify each cell of the quarter cross-section
//! by the faces it touches, accumulate per-side conduction and boundary
//! terms against the previous-tick field, and write the clamped result
//! into the next-tick field. The stability timestep is probed at nine
//! canonical positions per live slice and recomputed every tick.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod cell;
mod conductance;
mod stencil;
mod timestep;

pub use cell::{canonical_positions, classify, CellClass};
pub use conductance::{effective_conductivity, CALIBRATION};
pub use stencil::StencilSolver;
