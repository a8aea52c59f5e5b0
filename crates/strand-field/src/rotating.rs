//! Front-cursor rotating array, the storage half of the sliding window.
//!
//! A `RotatingArray` holds a contiguous run of occupied slots inside a
//! growable vector. Removing from the front advances a cursor instead of
//! shifting elements; the vacated slots are reclaimed in a block when
//! the tail end needs room, so both ends support amortized O(1)
//! insertion and removal without a general ring buffer.

/// Growable array with an advancing front cursor.
///
/// Invariant: slots `[start, start + len)` are occupied, all others are
/// empty. When the run drains to empty the cursor snaps back to 0.
#[derive(Debug)]
pub(crate) struct RotatingArray<T> {
    slots: Vec<Option<T>>,
    start: usize,
    len: usize,
}

impl<T> RotatingArray<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            start: 0,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reference to the `i`-th occupied element, front first.
    #[inline]
    pub(crate) fn get(&self, i: usize) -> &T {
        self.slots[self.start + i]
            .as_ref()
            .expect("slot in live run is occupied")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, i: usize) -> &mut T {
        self.slots[self.start + i]
            .as_mut()
            .expect("slot in live run is occupied")
    }

    /// Append behind the current run, growing the vector if needed.
    pub(crate) fn push_back(&mut self, item: T) {
        let i = self.start + self.len;
        if i == self.slots.len() {
            self.slots.push(Some(item));
        } else {
            debug_assert!(self.slots[i].is_none());
            self.slots[i] = Some(item);
        }
        self.len += 1;
    }

    /// Insert ahead of the current run, reusing a vacated front slot.
    ///
    /// Fails (returning the item) when the cursor is already at slot 0;
    /// the caller opens front room first via [`Self::open_front`].
    pub(crate) fn push_front(&mut self, item: T) -> Result<(), T> {
        if self.start == 0 {
            return Err(item);
        }
        self.start -= 1;
        debug_assert!(self.slots[self.start].is_none());
        self.slots[self.start] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Shift the occupied run `extra` slots toward the back, creating
    /// that many vacant front slots in one O(len) pass.
    pub(crate) fn open_front(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let old_end = self.start + self.len;
        if self.slots.len() < old_end + extra {
            self.slots.resize_with(old_end + extra, || None);
        }
        for i in (self.start..old_end).rev() {
            self.slots[i + extra] = self.slots[i].take();
        }
        self.start += extra;
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.start].take();
        self.start += 1;
        self.len -= 1;
        if self.len == 0 {
            self.start = 0;
        }
        item
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.start + self.len - 1].take();
        self.len -= 1;
        if self.len == 0 {
            self.start = 0;
        }
        item
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.slots[self.start..self.start + self.len]
            .iter()
            .map(|s| s.as_ref().expect("slot in live run is occupied"))
    }

    pub(crate) fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> {
        self.slots[self.start..self.start + self.len]
            .iter_mut()
            .map(|s| s.as_mut().expect("slot in live run is occupied"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_growth_and_front_drain() {
        let mut arr = RotatingArray::new();
        for i in 0..5 {
            arr.push_back(i);
        }
        assert_eq!(arr.len(), 5);
        assert_eq!(*arr.get(0), 0);
        assert_eq!(arr.pop_front(), Some(0));
        assert_eq!(arr.pop_front(), Some(1));
        assert_eq!(arr.len(), 3);
        // Remaining elements keep their order behind the cursor.
        assert_eq!(*arr.get(0), 2);
        assert_eq!(*arr.get(2), 4);
    }

    #[test]
    fn cursor_resets_on_empty() {
        let mut arr = RotatingArray::new();
        arr.push_back(1);
        arr.push_back(2);
        arr.pop_front();
        arr.pop_front();
        assert!(arr.is_empty());
        // A fresh push lands at slot 0 again.
        arr.push_back(9);
        assert_eq!(arr.pop_front(), Some(9));
    }

    #[test]
    fn front_insertion_reuses_vacated_slots() {
        let mut arr = RotatingArray::new();
        for i in 0..4 {
            arr.push_back(i);
        }
        arr.pop_front();
        arr.pop_front();
        assert!(arr.push_front(10).is_ok());
        assert_eq!(*arr.get(0), 10);
        assert!(arr.push_front(11).is_ok());
        // Cursor back at 0: the next front insert must fail.
        assert_eq!(arr.push_front(12), Err(12));
    }

    #[test]
    fn open_front_preserves_order() {
        let mut arr = RotatingArray::new();
        for i in 0..3 {
            arr.push_back(i);
        }
        arr.open_front(2);
        assert!(arr.push_front(-1).is_ok());
        let collected: Vec<i32> = arr.iter().copied().collect();
        assert_eq!(collected, vec![-1, 0, 1, 2]);
    }

    #[test]
    fn pop_back_trims_the_run() {
        let mut arr = RotatingArray::new();
        for i in 0..3 {
            arr.push_back(i);
        }
        assert_eq!(arr.pop_back(), Some(2));
        assert_eq!(arr.pop_back(), Some(1));
        assert_eq!(arr.pop_back(), Some(0));
        assert_eq!(arr.pop_back(), None);
    }
}
