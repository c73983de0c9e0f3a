use std::mem;

use log::trace;
use rand::Rng;

use super::List;

/// Passes performed by [`List::shuffle`].
pub const DEFAULT_SHUFFLE_DEPTH: usize = 10;

// =============================================================================
// Milestone 7: Ordering
// =============================================================================

impl<T> List<T> {
    /// Bubble sort into ascending order using `left > right` as the
    /// out-of-order test.
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        self.sort_by(|left, right| left > right);
    }

    /// Bubble sort driven by `out_of_order(left, right)`, which returns true
    /// when `left` belongs after `right`.
    ///
    /// Runs `len` passes of `len - 1` adjacent comparisons and swaps values
    /// between nodes; the chain itself is never relinked.
    pub fn sort_by<F>(&mut self, mut out_of_order: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        trace!("bubble sort over {} values", self.length);
        for _ in 0..self.length {
            let mut cursor = self.head.as_deref_mut();
            while let Some(node) = cursor {
                if let Some(next) = node.next.as_deref_mut() {
                    if out_of_order(&node.value, &next.value) {
                        mem::swap(&mut node.value, &mut next.value);
                    }
                }
                cursor = node.next.as_deref_mut();
            }
        }
    }

    /// Shuffles with the thread-local RNG for [`DEFAULT_SHUFFLE_DEPTH`] passes.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng(), DEFAULT_SHUFFLE_DEPTH);
    }

    /// Runs `depth` Fisher-Yates passes. Each pass walks `i` from the last
    /// position down to 0, removes the value at `i` and reinserts it at a
    /// uniformly drawn `j` in `0..=i`.
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R, depth: usize) {
        trace!("shuffling {} values, depth {}", self.length, depth);
        for _ in 0..depth {
            for i in (0..self.length).rev() {
                let j = rng.gen_range(0..=i);
                if let Some(value) = self.unlink(i) {
                    self.link(value, j);
                }
            }
        }
    }
}
