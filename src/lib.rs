//! Bounded introsort.
//!
//! An unstable, in-place sort with *O*(*n* \* log(*n*)) worst-case time and a fixed-size work stack
//! instead of recursion. Ranges are partitioned quicksort style around the middle element, ranges
//! below the small-sort threshold are insertion sorted, and heapsort takes over once a range has
//! been partitioned `2 * floor(log2(n))` times or the work stack runs out of room.
//!
//! Two interfaces share one engine:
//!
//! - [`sort`], [`sort_by`] and [`sort_by_with`] over typed slices. These never allocate and
//!   cannot fail.
//! - [`sort_bytes`] and [`sort_bytes_with`] over type-erased, fixed-size byte elements. These
//!   need one element worth of scratch memory from a [`ScratchAlloc`] and report failure through
//!   [`SortError`].

use core::cmp::Ordering;
use core::mem;

mod alloc;
mod arena;
mod config;
mod elements;
mod error;
mod heapsort;
mod quicksort;
mod smallsort;
mod stack;

pub use alloc::{Global, ScratchAlloc};
pub use arena::{Arena, ArenaMark};
pub use config::{
    SortConfig, DEFAULT_SMALL_SORT_THRESHOLD, DEFAULT_STACK_CAPACITY, MAX_SMALL_SORT_THRESHOLD,
    MAX_STACK_CAPACITY,
};
pub use error::SortError;
pub use quicksort::Stats;

use elements::{ByteElements, SliceElements};

/// Sorts the slice, but might not preserve the order of equal elements.
///
/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does not allocate),
/// and *O*(*n* \* log(*n*)) worst-case.
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_by_with(v, &SortConfig::default(), T::cmp);
}

/// Sorts the slice with a comparator function, but might not preserve the order of equal
/// elements.
///
/// The comparator function must define a total ordering for the elements in the slice. If the
/// ordering is not total, the order of the elements is unspecified, but the slice still holds
/// exactly its original elements. The same is true if `compare` panics.
#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_by_with(v, &SortConfig::default(), compare);
}

/// Like [`sort_by`], with explicit configuration. Returns what the driver did.
pub fn sort_by_with<T, F>(v: &mut [T], config: &SortConfig, compare: F) -> Stats
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Sorting has no meaningful behavior on zero-sized types.
    if mem::size_of::<T>() == 0 || v.len() < 2 {
        return Stats::default();
    }

    quicksort::quicksort(&mut SliceElements::new(v, compare), config)
}

/// Sorts `count` elements of `element_size` bytes each, stored back to back at the start of
/// `base`, using scratch memory from the global allocator.
///
/// See [`sort_bytes_with`].
pub fn sort_bytes<F>(
    base: Option<&mut [u8]>,
    count: usize,
    element_size: usize,
    compare: Option<F>,
) -> Result<Stats, SortError>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    sort_bytes_with(
        base,
        count,
        element_size,
        compare,
        &mut Global::new(),
        &SortConfig::default(),
    )
}

/// Sorts `count` elements of `element_size` bytes each, stored back to back at the start of
/// `base`. `compare` is handed two `element_size` byte slices.
///
/// A missing buffer or comparator, `count < 2` or `element_size == 0` make the call a no-op that
/// returns `Ok(Stats::default())`. Bytes of `base` past `count * element_size` are never touched.
///
/// The scratch buffer for insertion sort is requested from `alloc` before the first element is
/// moved. All errors are therefore reported with `base` left exactly as it was.
///
/// If `compare` panics the panic is propagated, and the first `count` elements of `base` hold the
/// original elements in unspecified order. The same holds if `compare` is not a total order.
pub fn sort_bytes_with<A, F>(
    base: Option<&mut [u8]>,
    count: usize,
    element_size: usize,
    compare: Option<F>,
    alloc: &mut A,
    config: &SortConfig,
) -> Result<Stats, SortError>
where
    A: ScratchAlloc + ?Sized,
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let (Some(base), Some(compare)) = (base, compare) else {
        return Ok(Stats::default());
    };

    if count < 2 || element_size == 0 {
        return Ok(Stats::default());
    }

    let required = count
        .checked_mul(element_size)
        .ok_or(SortError::SizeOverflow {
            count,
            element_size,
        })?;

    if base.len() < required {
        return Err(SortError::BufferTooSmall {
            required,
            actual: base.len(),
        });
    }

    let scratch = alloc
        .alloc_scratch(element_size)
        .filter(|scratch| scratch.len() >= element_size)
        .ok_or(SortError::ScratchUnavailable { size: element_size })?;

    let mut elements = ByteElements::new(
        &mut base[..required],
        element_size,
        &mut scratch[..element_size],
        compare,
    );

    Ok(quicksort::quicksort(&mut elements, config))
}
