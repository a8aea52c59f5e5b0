//! Per-tick measurements returned by the simulation loop.

use strand_core::TickId;

use crate::sim::CastPhase;

/// What one tick did and what it cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickMetrics {
    /// The tick this describes.
    pub tick: TickId,
    /// Timestep actually taken, seconds of simulated time.
    pub dt: f64,
    /// Casting phase at the end of the tick.
    pub phase: CastPhase,
    /// Live slices dispatched to the solver.
    pub slices_updated: usize,
    /// Slices poured at the mold end this tick.
    pub inserted: usize,
    /// Slices evicted at the tail end this tick.
    pub evicted: usize,
    /// Wall-clock time spent inside the dispatch, microseconds.
    pub compute_micros: u64,
    /// Wall-clock time for the whole tick, microseconds.
    pub total_micros: u64,
}
