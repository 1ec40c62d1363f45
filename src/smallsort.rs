use core::cmp::Ordering;

/// Sorts `v` by insertion, *O*(*n*^2) worst-case, meant for short ranges only.
///
/// The element being inserted stays in the slice while its destination is searched. Only then is
/// the run `v[j..=i]` rotated by one, so every comparison sees live elements and a panicking
/// `compare` leaves `v` a permutation of its input.
pub(crate) fn insertion_sort_slice<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && compare(&v[j - 1], &v[i]) == Ordering::Greater {
            j -= 1;
        }

        if j != i {
            v[j..=i].rotate_right(1);
        }
    }
}

/// Sorts the elements `[low, high]` of `bytes`, each `size` bytes long, by insertion.
///
/// `scratch` holds the element being inserted while larger predecessors are shifted right. A
/// `GapGuard` writes it back into the open slot even if `compare` panics, so `bytes` always ends
/// up a permutation of its input.
pub(crate) fn insertion_sort_bytes<F>(
    bytes: &mut [u8],
    size: usize,
    low: usize,
    high: usize,
    scratch: &mut [u8],
    compare: &mut F,
) where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    for i in (low + 1)..=high {
        scratch.copy_from_slice(&bytes[i * size..(i + 1) * size]);

        let mut gap = GapGuard {
            bytes: &mut *bytes,
            size,
            pos: i,
            value: &*scratch,
        };

        while gap.pos > low
            && compare(&gap.bytes[(gap.pos - 1) * size..gap.pos * size], gap.value)
                == Ordering::Greater
        {
            gap.bytes
                .copy_within((gap.pos - 1) * size..gap.pos * size, gap.pos * size);
            gap.pos -= 1;
        }
    }
}

// Element `pos` of `bytes` is a stale copy, `value` is the element that belongs there.
struct GapGuard<'a> {
    bytes: &'a mut [u8],
    size: usize,
    pos: usize,
    value: &'a [u8],
}

impl Drop for GapGuard<'_> {
    fn drop(&mut self) {
        let start = self.pos * self.size;
        self.bytes[start..start + self.size].copy_from_slice(self.value);
    }
}

#[test]
fn insertion_sort_slice_basic() {
    let mut v = [5, 1, 4, 1, 3, 9, 2];
    insertion_sort_slice(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
    assert_eq!(v, [1, 1, 2, 3, 4, 5, 9]);

    let mut empty: [i32; 0] = [];
    insertion_sort_slice(&mut empty, &mut |a: &i32, b: &i32| a.cmp(b));
}

#[test]
fn insertion_sort_bytes_sub_range() {
    // Two byte big-endian values, only elements 1..=4 are sorted.
    let values: [u16; 6] = [900, 40, 3, 700, 3, 1];
    let mut bytes: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    let mut scratch = [0u8; 2];

    insertion_sort_bytes(&mut bytes, 2, 1, 4, &mut scratch, &mut |a: &[u8], b: &[u8]| {
        a.cmp(b)
    });

    let sorted: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(sorted, [900, 3, 3, 40, 700, 1]);
}

#[test]
fn insertion_sort_bytes_panic_keeps_elements() {
    let mut bytes: Vec<u8> = (0..10).rev().collect();
    let mut scratch = [0u8; 1];
    let mut calls = 0;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        insertion_sort_bytes(&mut bytes, 1, 0, 9, &mut scratch, &mut |a: &[u8], b: &[u8]| {
            calls += 1;
            if calls == 5 {
                panic!("comparison failed");
            }
            a.cmp(b)
        });
    }));
    assert!(result.is_err());

    bytes.sort_unstable();
    assert_eq!(bytes, (0..10).collect::<Vec<u8>>());
}
