use core::cmp::Ordering;

use crate::config::SortConfig;
use crate::elements::Elements;
use crate::heapsort::heapsort;
use crate::stack::{Frame, WorkStack};

/// Counts of what the driver did during one sort call.
///
/// A call that had nothing to do, because the input was empty, a single element or otherwise
/// degenerate, reports all zeros.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of partition steps, including those whose children were then heapsorted because the
    /// work stack was too full to take them.
    pub partitions: usize,
    /// Ranges finished by insertion sort.
    pub insertion_sorts: usize,
    /// Ranges heapsorted because their frame reached the depth limit.
    pub depth_limit_heapsorts: usize,
    /// Ranges heapsorted because pushing their children would have filled the work stack.
    pub stack_limit_heapsorts: usize,
    /// Highest number of frames held by the work stack at any point.
    pub max_stack_len: usize,
}

impl Stats {
    /// Heapsorted ranges for either reason.
    pub fn heapsorts(&self) -> usize {
        self.depth_limit_heapsorts + self.stack_limit_heapsorts
    }
}

/// Number of partition levels allowed before a range must be heapsorted, `2 * floor(log2(len))`.
///
/// The binary OR by one is used to eliminate the zero-check in the logarithm.
#[inline]
pub(crate) fn depth_limit(len: usize) -> usize {
    2 * (len | 1).ilog2() as usize
}

/// Sorts all of `e` with the quicksort driver.
///
/// Pending ranges live on a fixed-capacity `WorkStack` instead of the call stack. A range is
/// insertion sorted once it is shorter than the small-sort threshold and heapsorted once its depth
/// reaches `depth_limit(len)` or once pushing its children would fill the stack. Both heapsort
/// exits cap the work per element, giving *O*(*n* \* log(*n*)) worst-case for any input.
pub(crate) fn quicksort<E: Elements>(e: &mut E, config: &SortConfig) -> Stats {
    let mut stats = Stats::default();

    let len = e.len();
    if len < 2 {
        return stats;
    }

    let limit = depth_limit(len);
    let small_sort_threshold = config.small_sort_threshold();

    let mut stack = WorkStack::new(config.stack_capacity());
    stack.push(Frame {
        low: 0,
        high: len - 1,
        depth: 0,
    });
    stats.max_stack_len = stack.len();

    while let Some(frame) = stack.pop() {
        if frame.low >= frame.high {
            continue;
        }

        let range_len = frame.high - frame.low + 1;

        if range_len < small_sort_threshold {
            e.insertion_sort(frame.low, frame.high);
            stats.insertion_sorts += 1;
            continue;
        }

        // If too many bad pivot choices were made, simply fall back to heapsort in order to
        // guarantee `O(n * log(n))` worst-case.
        if frame.depth >= limit {
            heapsort(e, frame.low, frame.high);
            stats.depth_limit_heapsorts += 1;
            continue;
        }

        let mid = partition(e, frame.low, frame.high);
        stats.partitions += 1;

        let has_left = mid > frame.low;
        let has_right = mid < frame.high;
        let child_count = has_left as usize + has_right as usize;

        if stack.len() + child_count >= stack.capacity() {
            heapsort(e, frame.low, frame.high);
            stats.stack_limit_heapsorts += 1;
            continue;
        }

        if has_left {
            stack.push(Frame {
                low: frame.low,
                high: mid - 1,
                depth: frame.depth + 1,
            });
        }
        if has_right {
            stack.push(Frame {
                low: mid + 1,
                high: frame.high,
                depth: frame.depth + 1,
            });
        }
        stats.max_stack_len = stats.max_stack_len.max(stack.len());
    }

    stats
}

/// Lomuto partition of `[low, high]` around the middle element.
///
/// On return every element in `[low, mid)` compares less than or equal to the pivot, the pivot
/// sits at `mid` and every element in `(mid, high]` compares greater. Returns `mid`.
fn partition<E: Elements>(e: &mut E, low: usize, high: usize) -> usize {
    // Park the pivot at the end of the range, out of the way of the scan.
    e.swap(low + (high - low) / 2, high);

    let mut lt_end = low;
    for i in low..high {
        if e.compare(i, high) != Ordering::Greater {
            e.swap(lt_end, i);
            lt_end += 1;
        }
    }

    // Place the pivot between the two partitions.
    e.swap(lt_end, high);

    lt_end
}

#[test]
fn depth_limit_values() {
    assert_eq!(depth_limit(2), 2);
    assert_eq!(depth_limit(3), 2);
    assert_eq!(depth_limit(16), 8);
    assert_eq!(depth_limit(1000), 18);
    assert_eq!(depth_limit(65536), 32);
}

#[test]
fn partition_places_pivot() {
    use crate::elements::SliceElements;

    let mut v = [9, 3, 7, 5, 1, 8, 2];
    // The middle element 5 becomes the pivot.
    let mid = partition(
        &mut SliceElements::new(&mut v, |a: &i32, b: &i32| a.cmp(b)),
        0,
        6,
    );

    assert_eq!(mid, 3);
    assert_eq!(v[mid], 5);
    assert!(v[..mid].iter().all(|x| *x <= 5));
    assert!(v[mid + 1..].iter().all(|x| *x > 5));
}

#[test]
fn partition_ties_go_left() {
    use crate::elements::SliceElements;

    let mut v = [4; 10];
    let mid = partition(
        &mut SliceElements::new(&mut v, |a: &i32, b: &i32| a.cmp(b)),
        0,
        9,
    );
    assert_eq!(mid, 9);
}
