//! The per-strand simulation loop.
//!
//! One tick: compute the adaptive timestep from the previous-tick
//! field, dispatch the stencil over every live slice, flip the double
//! buffer, then advance the window by however many whole slices the
//! strand travelled (the fractional remainder carries to the next
//! tick). Window advance runs strictly after the flip, so a slice
//! poured during tick N is first read by tick N+1.

use std::time::Instant;

use strand_core::{CastingMachine, MaterialTable, TickId};
use strand_field::{FieldPair, SlidingFieldBuffer};
use strand_solver::StencilSolver;

use crate::config::CasterConfig;
use crate::error::{EngineError, StepError};
use crate::metrics::TickMetrics;
use crate::scheduler::CaseScheduler;
use crate::snapshot::SurfaceSnapshot;

/// Casting regime of a strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastPhase {
    /// Pouring into a not-yet-full window; nothing is evicted.
    Filling,
    /// Window at capacity; every poured slice displaces the oldest.
    Steady,
    /// Pouring has stopped; the remaining strand drains out.
    TailOut,
    /// The strand has fully left the machine.
    Done,
}

/// One strand's state, collaborators, and tick loop.
pub struct Simulation {
    config: CasterConfig,
    table: MaterialTable,
    machine: CastingMachine,
    scheduler: CaseScheduler,
    pair: FieldPair,
    phase: CastPhase,
    tick: TickId,
    sim_time_s: f64,
    /// Strand travel not yet converted into a whole-slice advance.
    carry_m: f64,
    /// Axial distance the newest slice has moved past the meniscus.
    /// Zero until tail-out begins.
    head_offset_m: f64,
}

impl Simulation {
    /// Validate the configuration and build the engine.
    pub fn new(
        config: CasterConfig,
        table: MaterialTable,
        machine: CastingMachine,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let scheduler =
            CaseScheduler::new(config.workers, config.partition, config.rows, config.cols)?;
        let pair = FieldPair::new(config.rows, config.cols, config.window_capacity);
        Ok(Self {
            config,
            table,
            machine,
            scheduler,
            pair,
            phase: CastPhase::Filling,
            tick: TickId(0),
            sim_time_s: 0.0,
            carry_m: 0.0,
            head_offset_m: 0.0,
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &CasterConfig {
        &self.config
    }

    /// Machine description.
    pub fn machine(&self) -> &CastingMachine {
        &self.machine
    }

    /// Material table.
    pub fn table(&self) -> &MaterialTable {
        &self.table
    }

    /// The current (previous-tick) field.
    pub fn field(&self) -> &SlidingFieldBuffer {
        self.pair.read()
    }

    /// Current casting phase.
    pub fn phase(&self) -> CastPhase {
        self.phase
    }

    /// True once the strand has fully left the machine.
    pub fn is_done(&self) -> bool {
        self.phase == CastPhase::Done
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> TickId {
        self.tick
    }

    /// Simulated seconds elapsed.
    pub fn sim_time_s(&self) -> f64 {
        self.sim_time_s
    }

    /// Total cells updated across the whole run.
    pub fn cells_updated(&self) -> u64 {
        self.scheduler.cells_updated()
    }

    /// Stop pouring: the strand tail drains out and the run ends when
    /// the last slice is evicted. Idempotent; ignored once done.
    pub fn stop_casting(&mut self) {
        if matches!(self.phase, CastPhase::Filling | CastPhase::Steady) {
            self.phase = if self.pair.is_empty() {
                CastPhase::Done
            } else {
                CastPhase::TailOut
            };
        }
    }

    /// Extract a surface snapshot of the current field.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot::extract(
            self.pair.read(),
            &self.table,
            &self.machine,
            self.head_offset_m,
            self.tick,
            self.sim_time_s,
            self.config.snapshot_stride,
        )
    }

    /// Run one tick: timestep, dispatch, flip, window advance.
    ///
    /// A finished strand ticks as a no-op with `dt = 0`.
    pub fn tick(&mut self) -> Result<TickMetrics, StepError> {
        let began = Instant::now();
        if self.is_done() {
            return Ok(TickMetrics {
                tick: self.tick,
                dt: 0.0,
                phase: self.phase,
                slices_updated: 0,
                inserted: 0,
                evicted: 0,
                compute_micros: 0,
                total_micros: began.elapsed().as_micros() as u64,
            });
        }

        let solver = StencilSolver::new(&self.table, &self.machine, self.config.dy, self.config.dx);
        let dt = solver.stable_timestep(self.pair.read(), self.head_offset_m, self.config.max_dt);
        if !(dt.is_finite() && dt > 0.0) {
            return Err(StepError::DegenerateTimestep { dt });
        }

        let size = self.pair.size();
        let compute =
            self.scheduler
                .dispatch(&solver, &mut self.pair, self.head_offset_m, dt, 0, size);
        self.pair.swap();

        let (inserted, evicted) = self.advance_window(dt);

        self.sim_time_s += dt;
        self.tick = self.tick.next();
        Ok(TickMetrics {
            tick: self.tick,
            dt,
            phase: self.phase,
            slices_updated: size,
            inserted,
            evicted,
            compute_micros: compute.as_micros() as u64,
            total_micros: began.elapsed().as_micros() as u64,
        })
    }

    /// Convert strand travel into whole-slice pours/evictions. The
    /// sub-slice remainder stays in `carry_m` so no travel is lost.
    fn advance_window(&mut self, dt: f64) -> (usize, usize) {
        self.carry_m += self.machine.casting_speed * dt;
        let mut inserted = 0;
        let mut evicted = 0;
        while self.carry_m >= self.machine.slice_thickness {
            self.carry_m -= self.machine.slice_thickness;
            match self.phase {
                CastPhase::Filling => {
                    self.pair.add_first(self.machine.pour_value);
                    inserted += 1;
                    if self.pair.is_full() {
                        self.phase = CastPhase::Steady;
                    }
                }
                CastPhase::Steady => {
                    self.pair.remove_last();
                    self.pair.add_first(self.machine.pour_value);
                    evicted += 1;
                    inserted += 1;
                }
                CastPhase::TailOut => {
                    self.pair.remove_last();
                    self.head_offset_m += self.machine.slice_thickness;
                    evicted += 1;
                    if self.pair.is_empty() {
                        self.phase = CastPhase::Done;
                        break;
                    }
                }
                CastPhase::Done => break,
            }
        }
        (inserted, evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartitionStrategy;
    use strand_test_utils::{constant_table, two_zone_machine};

    fn small_sim(capacity: usize) -> Simulation {
        let config = CasterConfig {
            rows: 4,
            cols: 4,
            window_capacity: capacity,
            workers: 2,
            partition: PartitionStrategy::Range,
            max_dt: 0.25,
            ..CasterConfig::default()
        };
        Simulation::new(config, constant_table(), two_zone_machine()).unwrap()
    }

    #[test]
    fn filling_pours_until_the_window_is_full() {
        let mut sim = small_sim(8);
        assert_eq!(sim.phase(), CastPhase::Filling);
        // At 0.1 m/s a slice is poured every 0.5 s of simulated time;
        // with the adaptive dt that is a few hundred ticks per pour.
        for _ in 0..5000 {
            sim.tick().unwrap();
            if sim.phase() == CastPhase::Steady {
                break;
            }
        }
        assert_eq!(sim.phase(), CastPhase::Steady);
        assert_eq!(sim.field().size(), sim.field().capacity());
    }

    #[test]
    fn steady_state_holds_the_window_size() {
        let mut sim = small_sim(8);
        for _ in 0..5000 {
            sim.tick().unwrap();
            if sim.phase() == CastPhase::Steady {
                break;
            }
        }
        let size = sim.field().size();
        let mut poured = 0;
        for _ in 0..1000 {
            let m = sim.tick().unwrap();
            assert_eq!(m.inserted, m.evicted);
            poured += m.inserted;
            assert_eq!(sim.field().size(), size);
        }
        assert!(poured > 0);
    }

    #[test]
    fn tail_out_drains_to_done() {
        let mut sim = small_sim(8);
        for _ in 0..5000 {
            sim.tick().unwrap();
            if sim.phase() == CastPhase::Steady {
                break;
            }
        }
        sim.stop_casting();
        assert_eq!(sim.phase(), CastPhase::TailOut);
        for _ in 0..5000 {
            sim.tick().unwrap();
            if sim.is_done() {
                break;
            }
        }
        assert!(sim.is_done());
        assert!(sim.field().is_empty());
        // A finished strand ticks as a no-op.
        let m = sim.tick().unwrap();
        assert_eq!(m.dt, 0.0);
        assert_eq!(m.slices_updated, 0);
    }

    #[test]
    fn sim_time_accumulates_monotonically() {
        let mut sim = small_sim(8);
        let mut last = 0.0;
        for _ in 0..50 {
            let m = sim.tick().unwrap();
            assert!(m.dt > 0.0);
            assert!(sim.sim_time_s() > last);
            last = sim.sim_time_s();
        }
    }

    #[test]
    fn stop_casting_before_pour_finishes_immediately() {
        let mut sim = small_sim(8);
        sim.stop_casting();
        assert!(sim.is_done());
    }
}
