//! Double-buffered field: the previous-tick and next-tick windows.
//!
//! The solver reads every neighbour from the previous-tick side and
//! writes only the next-tick side, so one tick's updates never observe
//! each other. [`FieldPair::swap`] flips the roles in O(1) by toggling a
//! flag; no cell is copied. Window-advance operations apply to both
//! sides so the two buffers stay congruent slice for slice.

use crate::window::SlidingFieldBuffer;

/// Two congruent [`SlidingFieldBuffer`]s with read/write roles.
#[derive(Debug)]
pub struct FieldPair {
    a: SlidingFieldBuffer,
    b: SlidingFieldBuffer,
    /// True when buffer A holds the previous-tick field.
    a_is_read: bool,
}

impl FieldPair {
    /// Create an empty pair; both sides share dimensions and capacity.
    pub fn new(rows: usize, cols: usize, capacity: usize) -> Self {
        Self {
            a: SlidingFieldBuffer::new(rows, cols, capacity),
            b: SlidingFieldBuffer::new(rows, cols, capacity),
            a_is_read: true,
        }
    }

    /// The previous-tick field.
    #[inline]
    pub fn read(&self) -> &SlidingFieldBuffer {
        if self.a_is_read {
            &self.a
        } else {
            &self.b
        }
    }

    /// The next-tick field.
    #[inline]
    pub fn write_mut(&mut self) -> &mut SlidingFieldBuffer {
        if self.a_is_read {
            &mut self.b
        } else {
            &mut self.a
        }
    }

    /// Both sides at once: shared previous-tick, mutable next-tick.
    #[inline]
    pub fn split_mut(&mut self) -> (&SlidingFieldBuffer, &mut SlidingFieldBuffer) {
        if self.a_is_read {
            (&self.a, &mut self.b)
        } else {
            (&self.b, &mut self.a)
        }
    }

    /// Flip read/write roles. O(1), no data moves.
    pub fn swap(&mut self) {
        self.a_is_read = !self.a_is_read;
    }

    /// Live slice count (identical on both sides).
    pub fn size(&self) -> usize {
        debug_assert_eq!(self.a.size(), self.b.size());
        self.a.size()
    }

    /// Block-rounded capacity shared by both sides.
    pub fn capacity(&self) -> usize {
        self.a.capacity()
    }

    /// True when both sides are at capacity.
    pub fn is_full(&self) -> bool {
        self.a.is_full()
    }

    /// True when no slices are live.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Pour a fresh slice at the mold end of both sides.
    pub fn add_first(&mut self, init: f64) {
        self.a.add_first(init);
        self.b.add_first(init);
    }

    /// Insert a slice at the tail end of both sides.
    pub fn add_last(&mut self, init: f64) {
        self.a.add_last(init);
        self.b.add_last(init);
    }

    /// Remove the newest slice from both sides.
    pub fn remove_first(&mut self) {
        self.a.remove_first();
        self.b.remove_first();
    }

    /// Evict the oldest slice from both sides.
    pub fn remove_last(&mut self) {
        self.a.remove_last();
        self.b.remove_last();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_flips_roles_without_moving_data() {
        let mut pair = FieldPair::new(2, 2, 8);
        pair.add_first(100.0);
        pair.write_mut().set(0, 0, 0, 250.0, 0.0);
        assert_eq!(pair.read().get(0, 0, 0), 100.0);
        pair.swap();
        assert_eq!(pair.read().get(0, 0, 0), 250.0);
        assert_eq!(pair.write_mut().get(0, 0, 0), 100.0);
    }

    #[test]
    fn split_exposes_read_and_write_sides() {
        let mut pair = FieldPair::new(2, 2, 8);
        pair.add_first(100.0);
        let (read, write) = pair.split_mut();
        write.set(0, 1, 1, read.get(0, 1, 1) - 5.0, 0.0);
        pair.swap();
        assert_eq!(pair.read().get(0, 1, 1), 95.0);
    }

    #[test]
    fn window_advance_keeps_sides_congruent() {
        let mut pair = FieldPair::new(2, 2, 8);
        for tag in 0..5 {
            pair.add_first(tag as f64);
        }
        pair.remove_last();
        pair.add_last(7.0);
        pair.swap();
        pair.remove_first();
        assert_eq!(pair.size(), 4);
        assert_eq!(pair.read().get(3, 0, 0), 7.0);
        assert_eq!(pair.write_mut().get(3, 0, 0), 7.0);
    }
}
