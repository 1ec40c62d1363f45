use core::cmp::Ordering;

/// Index based view of the array being sorted.
///
/// The driver, partition and heapsort only ever compare and swap elements by index, which lets the
/// same engine run over typed slices and over type-erased byte buffers. Insertion sort is the one
/// step that needs to hold an element aside, so each representation brings its own.
pub(crate) trait Elements {
    fn len(&self) -> usize;

    /// Three-way comparison of the elements at `a` and `b`.
    fn compare(&mut self, a: usize, b: usize) -> Ordering;

    fn swap(&mut self, a: usize, b: usize);

    /// Sorts the inclusive range `[low, high]`.
    fn insertion_sort(&mut self, low: usize, high: usize);
}

pub(crate) struct SliceElements<'a, T, F> {
    v: &'a mut [T],
    compare: F,
}

impl<'a, T, F> SliceElements<'a, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    pub fn new(v: &'a mut [T], compare: F) -> Self {
        Self { v, compare }
    }
}

impl<T, F> Elements for SliceElements<'_, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    #[inline]
    fn len(&self) -> usize {
        self.v.len()
    }

    #[inline]
    fn compare(&mut self, a: usize, b: usize) -> Ordering {
        (self.compare)(&self.v[a], &self.v[b])
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.v.swap(a, b);
    }

    fn insertion_sort(&mut self, low: usize, high: usize) {
        crate::smallsort::insertion_sort_slice(&mut self.v[low..=high], &mut self.compare);
    }
}

/// `count` elements of `size` bytes each, stored back to back.
pub(crate) struct ByteElements<'a, F> {
    bytes: &'a mut [u8],
    size: usize,
    scratch: &'a mut [u8],
    compare: F,
}

impl<'a, F> ByteElements<'a, F>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    /// `bytes.len()` must be a multiple of `size` and `scratch` exactly `size` bytes long.
    pub fn new(bytes: &'a mut [u8], size: usize, scratch: &'a mut [u8], compare: F) -> Self {
        debug_assert!(size != 0 && bytes.len() % size == 0);
        debug_assert_eq!(scratch.len(), size);

        Self {
            bytes,
            size,
            scratch,
            compare,
        }
    }

    #[inline]
    fn span(&self, i: usize) -> core::ops::Range<usize> {
        i * self.size..(i + 1) * self.size
    }
}

impl<F> Elements for ByteElements<'_, F>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    #[inline]
    fn len(&self) -> usize {
        self.bytes.len() / self.size
    }

    #[inline]
    fn compare(&mut self, a: usize, b: usize) -> Ordering {
        let (a, b) = (self.span(a), self.span(b));
        (self.compare)(&self.bytes[a], &self.bytes[b])
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.bytes.split_at_mut(hi * self.size);
        left[lo * self.size..(lo + 1) * self.size].swap_with_slice(&mut right[..self.size]);
    }

    fn insertion_sort(&mut self, low: usize, high: usize) {
        crate::smallsort::insertion_sort_bytes(
            self.bytes,
            self.size,
            low,
            high,
            self.scratch,
            &mut self.compare,
        );
    }
}

#[test]
fn byte_swap_and_compare() {
    let mut bytes = [1u8, 2, 3, 4, 5, 6];
    let mut scratch = [0u8; 2];
    let mut elements = ByteElements::new(&mut bytes, 2, &mut scratch, |a: &[u8], b: &[u8]| {
        a.cmp(b)
    });

    assert_eq!(elements.len(), 3);
    assert_eq!(elements.compare(0, 2), Ordering::Less);

    elements.swap(2, 0);
    elements.swap(1, 1);
    assert_eq!(elements.compare(0, 2), Ordering::Greater);

    drop(elements);
    assert_eq!(bytes, [5, 6, 3, 4, 1, 2]);
}
