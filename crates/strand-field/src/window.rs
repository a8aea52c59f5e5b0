//! The sliding window over the live portion of the strand.
//!
//! A [`SlidingFieldBuffer`] is a bounded deque of [`SliceGrid`]s backed
//! by two [`RotatingArray`]s. Slices live in pour order: the *old* array
//! holds the run nearest the strand tail, the *young* array holds the
//! run nearest the mold. New slices push onto the young array's back in
//! O(1); evicting the tail advances the old array's front cursor in
//! O(1). When the old array drains empty the two arrays swap roles, so
//! neither array's footprint ever exceeds the window capacity and no
//! element is ever shifted on the steady-state path.
//!
//! Logical slice index `z` counts from the mold: `z = 0` is the newest
//! slice, `z = size() − 1` the oldest.

use crate::rotating::RotatingArray;
use crate::slice::SliceGrid;

/// Slot-allocation granularity. Capacity rounds up to a multiple of
/// this, and vacated front slots are reclaimed this many at a time.
pub const FIELD_BLOCK: usize = 8;

/// Which backing array currently holds live slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Residency {
    /// No live slices.
    Empty,
    /// All live slices are in array A.
    OnlyA,
    /// All live slices are in array B.
    OnlyB,
    /// The live run spans both arrays.
    Split,
}

/// Bounded sliding window of cross-sectional slices.
#[derive(Debug)]
pub struct SlidingFieldBuffer {
    a: RotatingArray<SliceGrid>,
    b: RotatingArray<SliceGrid>,
    /// True when array A holds the old (tail-side) run.
    old_is_a: bool,
    capacity: usize,
    rows: usize,
    cols: usize,
    /// Evicted grids kept for reuse so steady-state ticks do not allocate.
    spares: Vec<SliceGrid>,
}

impl SlidingFieldBuffer {
    /// Create an empty window for `rows × cols` slices.
    ///
    /// The capacity is rounded up to the next multiple of
    /// [`FIELD_BLOCK`]; [`Self::capacity`] reports the rounded value.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or either slice dimension is zero.
    pub fn new(rows: usize, cols: usize, capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be non-zero");
        assert!(rows > 0 && cols > 0, "slice dimensions must be non-zero");
        let rounded = capacity.div_ceil(FIELD_BLOCK) * FIELD_BLOCK;
        Self {
            a: RotatingArray::new(),
            b: RotatingArray::new(),
            old_is_a: true,
            capacity: rounded,
            rows,
            cols,
            spares: Vec::new(),
        }
    }

    /// Rows per slice.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns per slice.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of live slices.
    #[inline]
    pub fn size(&self) -> usize {
        self.a.len() + self.b.len()
    }

    /// Maximum number of live slices (block-rounded).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no slices are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// True when the window is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.size() == self.capacity
    }

    /// Which backing array holds the live run.
    pub fn residency(&self) -> Residency {
        match (self.a.is_empty(), self.b.is_empty()) {
            (true, true) => Residency::Empty,
            (false, true) => Residency::OnlyA,
            (true, false) => Residency::OnlyB,
            (false, false) => Residency::Split,
        }
    }

    fn arrays(&self) -> (&RotatingArray<SliceGrid>, &RotatingArray<SliceGrid>) {
        if self.old_is_a {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }

    fn arrays_mut(
        &mut self,
    ) -> (&mut RotatingArray<SliceGrid>, &mut RotatingArray<SliceGrid>) {
        if self.old_is_a {
            (&mut self.a, &mut self.b)
        } else {
            (&mut self.b, &mut self.a)
        }
    }

    /// Restore the role invariant: the old array is non-empty whenever
    /// any slice is live. When the old run drains, the young array
    /// becomes the old one and growth restarts in the other array.
    fn normalize(&mut self) {
        let (old, young) = self.arrays();
        if old.is_empty() && !young.is_empty() {
            self.old_is_a = !self.old_is_a;
        }
    }

    fn take_spare(&mut self, init: f64) -> SliceGrid {
        match self.spares.pop() {
            Some(mut grid) => {
                grid.fill(init);
                grid
            }
            None => SliceGrid::new(self.rows, self.cols, init),
        }
    }

    fn keep_spare(&mut self, grid: SliceGrid) {
        if self.spares.len() < FIELD_BLOCK {
            self.spares.push(grid);
        }
    }

    /// Insert a freshly poured slice at the mold end (`z = 0`), every
    /// cell set to `init`. No-op when the window is full.
    pub fn add_first(&mut self, init: f64) {
        if self.is_full() {
            return;
        }
        let grid = self.take_spare(init);
        let (_, young) = self.arrays_mut();
        young.push_back(grid);
        self.normalize();
    }

    /// Insert a slice at the tail end (`z = size() − 1`), every cell
    /// set to `init`. No-op when the window is full.
    ///
    /// Front slots vacated by earlier tail evictions are reused; when
    /// none remain the run is shifted back a block at a time, so the
    /// cost stays amortized O(1).
    pub fn add_last(&mut self, init: f64) {
        if self.is_full() {
            return;
        }
        let grid = self.take_spare(init);
        let (old, _) = self.arrays_mut();
        if old.is_empty() {
            old.push_back(grid);
        } else if let Err(grid) = old.push_front(grid) {
            old.open_front(FIELD_BLOCK);
            let pushed = old.push_front(grid);
            debug_assert!(pushed.is_ok());
        }
        self.normalize();
    }

    /// Remove the newest slice (`z = 0`). No-op when empty.
    pub fn remove_first(&mut self) {
        let (old, young) = self.arrays_mut();
        let grid = young.pop_back().or_else(|| old.pop_back());
        if let Some(grid) = grid {
            self.keep_spare(grid);
        }
        self.normalize();
    }

    /// Evict the oldest slice (`z = size() − 1`). No-op when empty.
    pub fn remove_last(&mut self) {
        let (old, _) = self.arrays_mut();
        let grid = old.pop_front();
        if let Some(grid) = grid {
            self.keep_spare(grid);
        }
        self.normalize();
    }

    #[inline]
    fn check_z(&self, z: usize) {
        assert!(
            z < self.size(),
            "slice index {z} out of range for window of {} slices",
            self.size()
        );
    }

    /// The slice at logical index `z` (0 = newest).
    ///
    /// # Panics
    ///
    /// Panics if `z >= size()`.
    pub fn slice(&self, z: usize) -> &SliceGrid {
        self.check_z(z);
        let (old, young) = self.arrays();
        if z < young.len() {
            young.get(young.len() - 1 - z)
        } else {
            old.get(old.len() - 1 - (z - young.len()))
        }
    }

    /// Mutable slice at logical index `z`.
    ///
    /// # Panics
    ///
    /// Panics if `z >= size()`.
    pub fn slice_mut(&mut self, z: usize) -> &mut SliceGrid {
        self.check_z(z);
        let (old, young) = self.arrays_mut();
        let young_len = young.len();
        if z < young_len {
            young.get_mut(young_len - 1 - z)
        } else {
            old.get_mut(old.len() - 1 - (z - young_len))
        }
    }

    /// Read one cell.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    #[inline]
    pub fn get(&self, z: usize, y: usize, x: usize) -> f64 {
        self.slice(z).get(y, x)
    }

    /// Write one cell, clamped from below to `floor`.
    ///
    /// NaN values collapse to the floor.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    #[inline]
    pub fn set(&mut self, z: usize, y: usize, x: usize, value: f64, floor: f64) {
        self.slice_mut(z).set(y, x, value.max(floor));
    }

    /// Visit every live slice in ascending `z` order.
    pub fn traverse(&self, mut visit: impl FnMut(usize, &SliceGrid)) {
        let (old, young) = self.arrays();
        let mut z = 0;
        for grid in young.iter().rev().chain(old.iter().rev()) {
            visit(z, grid);
            z += 1;
        }
    }

    /// Visit the slices in `[start, end)` in ascending `z` order.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or `end > size()`.
    pub fn traverse_range(&self, start: usize, end: usize, mut visit: impl FnMut(usize, &SliceGrid)) {
        assert!(
            start <= end && end <= self.size(),
            "slice range [{start}, {end}) out of range for window of {} slices",
            self.size()
        );
        let (old, young) = self.arrays();
        for (z, grid) in young
            .iter()
            .rev()
            .chain(old.iter().rev())
            .enumerate()
            .skip(start)
            .take(end - start)
        {
            visit(z, grid);
        }
    }

    /// Mutable references to the slices in `[start, end)`, paired with
    /// their logical indices, in ascending `z` order. Used by the
    /// scheduler to hand disjoint sub-ranges to workers.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or `end > size()`.
    pub fn slices_mut_range(&mut self, start: usize, end: usize) -> Vec<(usize, &mut SliceGrid)> {
        assert!(
            start <= end && end <= self.size(),
            "slice range [{start}, {end}) out of range for window of {} slices",
            self.size()
        );
        let (old, young) = self.arrays_mut();
        young
            .iter_mut()
            .rev()
            .chain(old.iter_mut().rev())
            .enumerate()
            .skip(start)
            .take(end - start)
            .collect()
    }
}
