/// Default number of frames the work stack can hold.
pub const DEFAULT_STACK_CAPACITY: usize = 64;

/// Size of the frame array reserved on the call stack. Larger configured capacities are clamped
/// to this value.
pub const MAX_STACK_CAPACITY: usize = 128;

/// Ranges shorter than this are handed to insertion sort.
pub const DEFAULT_SMALL_SORT_THRESHOLD: usize = 16;

/// Upper bound for the small-sort threshold. Insertion sort is quadratic, letting callers raise the
/// threshold without bound would void the *O*(*n* \* log(*n*)) worst-case.
pub const MAX_SMALL_SORT_THRESHOLD: usize = 32;

/// Tunables of a single sort call.
///
/// The defaults match the classic configuration: a 64 frame work stack and insertion sort below
/// 16 elements. Lowering the stack capacity is mostly useful to exercise the stack-limit heapsort
/// fallback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortConfig {
    stack_capacity: usize,
    small_sort_threshold: usize,
}

impl SortConfig {
    pub const fn new() -> Self {
        Self {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            small_sort_threshold: DEFAULT_SMALL_SORT_THRESHOLD,
        }
    }

    /// Sets the work stack capacity, clamped to `1..=MAX_STACK_CAPACITY`.
    #[must_use]
    pub const fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = if capacity == 0 {
            1
        } else if capacity > MAX_STACK_CAPACITY {
            MAX_STACK_CAPACITY
        } else {
            capacity
        };
        self
    }

    /// Sets the length below which ranges are insertion sorted, clamped to
    /// `0..=MAX_SMALL_SORT_THRESHOLD`.
    #[must_use]
    pub const fn with_small_sort_threshold(mut self, threshold: usize) -> Self {
        self.small_sort_threshold = if threshold > MAX_SMALL_SORT_THRESHOLD {
            MAX_SMALL_SORT_THRESHOLD
        } else {
            threshold
        };
        self
    }

    pub const fn stack_capacity(&self) -> usize {
        self.stack_capacity
    }

    pub const fn small_sort_threshold(&self) -> usize {
        self.small_sort_threshold
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn config_clamping() {
    let config = SortConfig::default();
    assert_eq!(config.stack_capacity(), DEFAULT_STACK_CAPACITY);
    assert_eq!(config.small_sort_threshold(), DEFAULT_SMALL_SORT_THRESHOLD);

    assert_eq!(SortConfig::new().with_stack_capacity(0).stack_capacity(), 1);
    assert_eq!(SortConfig::new().with_stack_capacity(8).stack_capacity(), 8);
    assert_eq!(
        SortConfig::new().with_stack_capacity(10_000).stack_capacity(),
        MAX_STACK_CAPACITY
    );

    assert_eq!(
        SortConfig::new()
            .with_small_sort_threshold(0)
            .small_sort_threshold(),
        0
    );
    assert_eq!(
        SortConfig::new()
            .with_small_sort_threshold(1_000)
            .small_sort_threshold(),
        MAX_SMALL_SORT_THRESHOLD
    );
}
