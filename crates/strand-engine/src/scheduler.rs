//! Fixed worker pool and per-tick work division.
//!
//! The scheduler owns a rayon pool built once per strand and dispatches
//! one slice range per tick. Dispatch is synchronous: `pool.scope`
//! joins every spawned partition before returning, and a worker panic
//! (an index-contract violation) re-raises on the calling thread. There
//! is no retry path; the solver is pure arithmetic over validated
//! collaborators, so a failed partition means a programming error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use strand_field::{FieldPair, SlidingFieldBuffer};
use strand_solver::StencilSolver;

use crate::config::PartitionStrategy;
use crate::error::EngineError;

/// Worker pool plus the partitioning policy for one strand.
pub struct CaseScheduler {
    pool: rayon::ThreadPool,
    workers: usize,
    strategy: PartitionStrategy,
    /// Outside-ring-inward traversal order, precomputed for the grid
    /// dimensions. Used by the range strategy.
    spiral: Vec<(usize, usize)>,
    cells_updated: AtomicU64,
}

impl CaseScheduler {
    /// Build the pool with `workers` named threads.
    pub fn new(
        workers: usize,
        strategy: PartitionStrategy,
        rows: usize,
        cols: usize,
    ) -> Result<Self, EngineError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("strand-worker-{i}"))
            .build()
            .map_err(EngineError::PoolBuild)?;
        Ok(Self {
            pool,
            workers,
            strategy,
            spiral: spiral_order(rows, cols),
            cells_updated: AtomicU64::new(0),
        })
    }

    /// Pool worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Active partition strategy.
    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// Total cells updated across all dispatches so far.
    pub fn cells_updated(&self) -> u64 {
        self.cells_updated.load(Ordering::Relaxed)
    }

    /// Update slices `[start, end)` of the write side from the read
    /// side and return the wall-clock time spent.
    ///
    /// Returns immediately for an empty range. Blocks until every
    /// partition has completed.
    ///
    /// # Panics
    ///
    /// Re-raises any panic from a worker (out-of-range access inside
    /// the solver is a contract violation, not a recoverable fault).
    pub fn dispatch(
        &self,
        solver: &StencilSolver<'_>,
        pair: &mut FieldPair,
        head_offset_m: f64,
        dt: f64,
        start: usize,
        end: usize,
    ) -> Duration {
        if start == end {
            return Duration::ZERO;
        }
        let began = Instant::now();
        let (read, write) = pair.split_mut();
        match self.strategy {
            PartitionStrategy::Quadrant => {
                self.dispatch_quadrant(solver, read, write, head_offset_m, dt, start, end)
            }
            PartitionStrategy::Range => {
                self.dispatch_range(solver, read, write, head_offset_m, dt, start, end)
            }
        }
        let cells = ((end - start) * read.rows() * read.cols()) as u64;
        self.cells_updated.fetch_add(cells, Ordering::Relaxed);
        began.elapsed()
    }

    /// Four quadrant views per slice, one work item each.
    fn dispatch_quadrant(
        &self,
        solver: &StencilSolver<'_>,
        read: &SlidingFieldBuffer,
        write: &mut SlidingFieldBuffer,
        head_offset_m: f64,
        dt: f64,
        start: usize,
        end: usize,
    ) {
        let r_mid = read.rows() / 2;
        let c_mid = read.cols() / 2;
        let machine = solver.machine();
        let slices = write.slices_mut_range(start, end);
        self.pool.scope(|scope| {
            for (z, next) in slices {
                let prev = read.slice(z);
                let zone = machine.zone_of(head_offset_m + machine.slice_center(z));
                for mut quad in next.quadrants_mut(r_mid, c_mid) {
                    if quad.is_empty() {
                        continue;
                    }
                    scope.spawn(move |_| solver.update_quadrant(prev, &mut quad, zone, dt));
                }
            }
        });
    }

    /// Whole slices split evenly across workers, remainder to the
    /// first workers; cells visited in spiral order.
    fn dispatch_range(
        &self,
        solver: &StencilSolver<'_>,
        read: &SlidingFieldBuffer,
        write: &mut SlidingFieldBuffer,
        head_offset_m: f64,
        dt: f64,
        start: usize,
        end: usize,
    ) {
        let machine = solver.machine();
        let slices = write.slices_mut_range(start, end);
        let count = slices.len();
        let base = count / self.workers;
        let rem = count % self.workers;
        let mut remaining = slices.into_iter();
        let mut batches = Vec::with_capacity(self.workers);
        for w in 0..self.workers {
            let take = base + usize::from(w < rem);
            let batch: Vec<_> = remaining.by_ref().take(take).collect();
            if !batch.is_empty() {
                batches.push(batch);
            }
        }
        let spiral = self.spiral.as_slice();
        self.pool.scope(|scope| {
            for batch in batches {
                scope.spawn(move |_| {
                    for (z, next) in batch {
                        let prev = read.slice(z);
                        let zone = machine.zone_of(head_offset_m + machine.slice_center(z));
                        solver.update_slice_ordered(prev, next, zone, dt, spiral);
                    }
                });
            }
        });
    }
}

/// Row-major bounds walked as a clockwise inward spiral from (0, 0).
fn spiral_order(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(rows * cols);
    let (mut top, mut bottom, mut left, mut right) = (0usize, rows, 0usize, cols);
    while top < bottom && left < right {
        for x in left..right {
            order.push((top, x));
        }
        top += 1;
        for y in top..bottom {
            order.push((y, right - 1));
        }
        right -= 1;
        if top < bottom {
            for x in (left..right).rev() {
                order.push((bottom - 1, x));
            }
            bottom -= 1;
        }
        if left < right {
            for y in (top..bottom).rev() {
                order.push((y, left));
            }
            left += 1;
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strand_field::SliceGrid;
    use strand_test_utils::{constant_table, two_zone_machine};

    #[test]
    fn spiral_visits_every_cell_once() {
        for (rows, cols) in [(2, 2), (3, 3), (4, 6), (5, 2), (7, 7)] {
            let order = spiral_order(rows, cols);
            assert_eq!(order.len(), rows * cols, "{rows}x{cols}");
            let unique: HashSet<_> = order.iter().collect();
            assert_eq!(unique.len(), rows * cols, "{rows}x{cols}");
        }
    }

    #[test]
    fn spiral_walks_the_outer_ring_first() {
        let order = spiral_order(3, 3);
        assert_eq!(
            order,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2),
                (2, 1),
                (2, 0),
                (1, 0),
                (1, 1),
            ]
        );
    }

    /// Pair whose read side carries a gradient, write side zeroed.
    fn gradient_pair(rows: usize, cols: usize, count: usize) -> FieldPair {
        let mut pair = FieldPair::new(rows, cols, count.max(1));
        for _ in 0..count {
            pair.add_first(0.0);
        }
        for z in 0..count {
            let grid = pair.write_mut().slice_mut(z);
            for y in 0..rows {
                for x in 0..cols {
                    grid.set(y, x, 1400.0 + (z * 31 + y * 7 + x) as f64);
                }
            }
        }
        pair.swap();
        pair
    }

    #[test]
    fn empty_range_returns_immediately() {
        let table = constant_table();
        let machine = two_zone_machine();
        let solver = StencilSolver::new(&table, &machine, 0.01, 0.01);
        let scheduler = CaseScheduler::new(2, PartitionStrategy::Quadrant, 4, 4).unwrap();
        let mut pair = gradient_pair(4, 4, 3);
        let elapsed = scheduler.dispatch(&solver, &mut pair, 0.0, 0.01, 2, 2);
        assert_eq!(elapsed, Duration::ZERO);
        assert_eq!(scheduler.cells_updated(), 0);
    }

    #[test]
    fn quadrant_dispatch_matches_serial_update() {
        let table = constant_table();
        let machine = two_zone_machine();
        let solver = StencilSolver::new(&table, &machine, 0.01, 0.01);
        let scheduler = CaseScheduler::new(8, PartitionStrategy::Quadrant, 5, 6).unwrap();
        let mut pair = gradient_pair(5, 6, 4);

        let mut expected = Vec::new();
        for z in 0..4 {
            let zone = machine.zone_at_slice(z);
            let mut next = SliceGrid::new(5, 6, 0.0);
            solver.update_slice(pair.read().slice(z), &mut next, zone, 0.01);
            expected.push(next);
        }

        scheduler.dispatch(&solver, &mut pair, 0.0, 0.01, 0, 4);
        for (z, want) in expected.iter().enumerate() {
            assert_eq!(pair.write_mut().slice(z), want, "slice {z}");
        }
        assert_eq!(scheduler.cells_updated(), 4 * 5 * 6);
    }

    #[test]
    fn range_and_quadrant_strategies_agree() {
        let table = constant_table();
        let machine = two_zone_machine();
        let solver = StencilSolver::new(&table, &machine, 0.01, 0.01);
        let by_quadrant = CaseScheduler::new(8, PartitionStrategy::Quadrant, 4, 4).unwrap();
        let by_range = CaseScheduler::new(3, PartitionStrategy::Range, 4, 4).unwrap();

        let mut pair_a = gradient_pair(4, 4, 7);
        let mut pair_b = gradient_pair(4, 4, 7);
        by_quadrant.dispatch(&solver, &mut pair_a, 0.0, 0.02, 0, 7);
        by_range.dispatch(&solver, &mut pair_b, 0.0, 0.02, 0, 7);

        for z in 0..7 {
            assert_eq!(
                pair_a.write_mut().slice(z),
                pair_b.write_mut().slice(z),
                "slice {z}"
            );
        }
    }
}
