//! Heapsort, the guaranteed *O*(*n* \* log(*n*)) fallback of the quicksort driver.

use core::cmp::Ordering;

use crate::elements::Elements;

/// Sorts the inclusive range `[low, high]` using heapsort.
///
/// Never inline this, it is an unlikely fallback out of the main dispatch loop.
#[inline(never)]
pub(crate) fn heapsort<E: Elements>(e: &mut E, low: usize, high: usize) {
    if high <= low {
        return;
    }

    let count = high - low + 1;

    // Build the heap in linear time.
    for node in (0..count / 2).rev() {
        sift_down(e, low, node, count - 1);
    }

    // Pop maximal elements from the heap.
    for end in (1..count).rev() {
        e.swap(low, low + end);
        sift_down(e, low, 0, end - 1);
    }
}

// This binary heap respects the invariant `parent >= child`. Node indices are relative to `base`
// and `last` is the last node still part of the heap.
fn sift_down<E: Elements>(e: &mut E, base: usize, mut node: usize, last: usize) {
    loop {
        let left = 2 * node + 1;
        if left > last {
            return;
        }

        let mut largest = node;
        if e.compare(base + largest, base + left) == Ordering::Less {
            largest = left;
        }

        let right = left + 1;
        if right <= last && e.compare(base + largest, base + right) == Ordering::Less {
            largest = right;
        }

        if largest == node {
            return;
        }

        e.swap(base + node, base + largest);
        node = largest;
    }
}
