//! Background runner thread for one strand.
//!
//! The runner owns the [`Simulation`] for the duration of the run and
//! hands it back on [`StrandRunner::join`]. Control flows in through
//! two atomic flags polled at tick boundaries; results flow out through
//! a bounded event channel. Event sends are best-effort: a slow
//! consumer drops events rather than stalling the tick loop.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};
use strand_core::StrandId;

use crate::error::StepError;
use crate::sim::Simulation;
use crate::snapshot::{SnapshotCadence, SurfaceSnapshot};

/// Events emitted by the runner thread.
///
/// Every event carries the ID of the strand that produced it, so a
/// consumer merging several runners' streams can demultiplex them.
#[derive(Clone, Debug)]
pub enum StrandEvent {
    /// A snapshot cadence period elapsed.
    SnapshotReady {
        /// Strand the snapshot was taken from.
        strand: StrandId,
        /// The extracted snapshot.
        snapshot: SurfaceSnapshot,
    },
    /// The strand fully left the machine.
    Finished {
        /// Strand that finished.
        strand: StrandId,
        /// Ticks executed over the whole run.
        ticks: u64,
        /// Simulated seconds covered.
        sim_time_s: f64,
    },
    /// A tick failed; the run is over.
    Failed {
        /// Strand whose tick failed.
        strand: StrandId,
        /// The failure.
        error: StepError,
    },
}

const EVENT_QUEUE_DEPTH: usize = 64;

/// Handle to a running strand simulation.
pub struct StrandRunner {
    strand: StrandId,
    handle: JoinHandle<Simulation>,
    stop: Arc<AtomicBool>,
    stop_casting: Arc<AtomicBool>,
    events: Receiver<StrandEvent>,
}

impl StrandRunner {
    /// Move the simulation onto a named background thread. Events from
    /// this runner are tagged with `strand`.
    pub fn spawn(strand: StrandId, sim: Simulation) -> io::Result<Self> {
        let (tx, rx) = bounded(EVENT_QUEUE_DEPTH);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_casting = Arc::new(AtomicBool::new(false));
        let handle = thread::Builder::new()
            .name(format!("strand-sim-{strand}"))
            .spawn({
                let stop = Arc::clone(&stop);
                let stop_casting = Arc::clone(&stop_casting);
                move || run_loop(strand, sim, tx, stop, stop_casting)
            })?;
        Ok(Self {
            strand,
            handle,
            stop,
            stop_casting,
            events: rx,
        })
    }

    /// The strand this runner simulates.
    pub fn strand_id(&self) -> StrandId {
        self.strand
    }

    /// Ask the loop to halt at the next tick boundary. The simulation
    /// keeps its state for post-run inspection via [`Self::join`].
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Stop pouring; the strand drains out and the run finishes on its
    /// own once the last slice is evicted.
    pub fn stop_casting(&self) {
        self.stop_casting.store(true, Ordering::Relaxed);
    }

    /// Receiver for runner events.
    pub fn events(&self) -> &Receiver<StrandEvent> {
        &self.events
    }

    /// Wait for the thread and recover the simulation. An `Err` means
    /// the thread panicked (an index-contract violation in a worker).
    pub fn join(self) -> thread::Result<Simulation> {
        self.handle.join()
    }
}

fn run_loop(
    strand: StrandId,
    mut sim: Simulation,
    tx: Sender<StrandEvent>,
    stop: Arc<AtomicBool>,
    stop_casting: Arc<AtomicBool>,
) -> Simulation {
    let mut cadence = SnapshotCadence::new(sim.config().snapshot_cadence_s);
    while !stop.load(Ordering::Relaxed) {
        if stop_casting.swap(false, Ordering::Relaxed) {
            sim.stop_casting();
        }
        let began = Instant::now();
        let metrics = match sim.tick() {
            Ok(metrics) => metrics,
            Err(error) => {
                let _ = tx.try_send(StrandEvent::Failed { strand, error });
                break;
            }
        };
        if cadence.advance(metrics.dt) {
            let _ = tx.try_send(StrandEvent::SnapshotReady {
                strand,
                snapshot: sim.snapshot(),
            });
        }
        if sim.is_done() {
            let _ = tx.try_send(StrandEvent::Finished {
                strand,
                ticks: sim.ticks().0,
                sim_time_s: sim.sim_time_s(),
            });
            break;
        }
        if sim.config().realtime && sim.config().time_scale > 0.0 {
            let budget = Duration::from_secs_f64(metrics.dt * sim.config().time_scale);
            if let Some(rest) = budget.checked_sub(began.elapsed()) {
                thread::sleep(rest);
            }
        }
    }
    sim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CasterConfig, PartitionStrategy};
    use strand_test_utils::{constant_table, two_zone_machine};

    fn fast_sim() -> Simulation {
        let config = CasterConfig {
            rows: 4,
            cols: 4,
            window_capacity: 8,
            workers: 2,
            partition: PartitionStrategy::Quadrant,
            realtime: false,
            ..CasterConfig::default()
        };
        Simulation::new(config, constant_table(), two_zone_machine()).unwrap()
    }

    #[test]
    fn immediate_cast_stop_finishes_the_run() {
        let runner = StrandRunner::spawn(StrandId(1), fast_sim()).unwrap();
        runner.stop_casting();
        let deadline = Duration::from_secs(30);
        let mut finished = false;
        while let Ok(event) = runner.events().recv_timeout(deadline) {
            if let StrandEvent::Finished { .. } = event {
                finished = true;
                break;
            }
        }
        assert!(finished, "no Finished event before the deadline");
        let sim = runner.join().expect("runner thread joins cleanly");
        assert!(sim.is_done());
    }

    #[test]
    fn stop_halts_mid_run_and_returns_the_simulation() {
        let runner = StrandRunner::spawn(StrandId(1), fast_sim()).unwrap();
        // Default cadence (4 s simulated) arrives quickly unpaced.
        let event = runner
            .events()
            .recv_timeout(Duration::from_secs(30))
            .expect("an event before the deadline");
        assert!(matches!(event, StrandEvent::SnapshotReady { .. }));
        runner.stop();
        let sim = runner.join().expect("runner thread joins cleanly");
        assert!(!sim.is_done());
        assert!(sim.ticks().0 > 0);
        assert!(sim.sim_time_s() > 0.0);
    }

    #[test]
    fn events_carry_the_spawning_strand_id() {
        let runner = StrandRunner::spawn(StrandId(7), fast_sim()).unwrap();
        assert_eq!(runner.strand_id(), StrandId(7));
        runner.stop_casting();
        let deadline = Duration::from_secs(30);
        let mut finished = None;
        while let Ok(event) = runner.events().recv_timeout(deadline) {
            match event {
                StrandEvent::SnapshotReady { strand, .. } => {
                    assert_eq!(strand, StrandId(7));
                }
                StrandEvent::Finished { strand, .. } => {
                    finished = Some(strand);
                    break;
                }
                StrandEvent::Failed { error, .. } => panic!("tick failed: {error}"),
            }
        }
        assert_eq!(finished, Some(StrandId(7)));
        runner.join().expect("runner thread joins cleanly");
    }
}
