//! Bump allocator over a caller-provided buffer.
//!
//! Allocations are handed out front to back and only released in bulk, either all at once with
//! [`Arena::reset`] or back to an earlier [`ArenaMark`]. Every allocation borrows the arena, so the
//! borrow checker rules out holding on to memory that a later `restore` or `reset` hands out again.

use crate::alloc::ScratchAlloc;

/// Position in an [`Arena`] returned by [`Arena::mark`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArenaMark {
    position: usize,
}

#[derive(Debug)]
pub struct Arena<'buf> {
    buffer: &'buf mut [u8],
    used: usize,
}

impl<'buf> Arena<'buf> {
    /// Returns `None` if `buffer` is empty.
    pub fn new(buffer: &'buf mut [u8]) -> Option<Self> {
        if buffer.is_empty() {
            return None;
        }

        Some(Self { buffer, used: 0 })
    }

    /// Allocates `size` bytes directly after the previous allocation.
    pub fn alloc(&mut self, size: usize) -> Option<&mut [u8]> {
        if size == 0 || size > self.available() {
            return None;
        }

        let start = self.used;
        self.used += size;

        Some(&mut self.buffer[start..self.used])
    }

    /// Allocates `size` bytes starting at an address that is a multiple of `align`.
    ///
    /// `align` has to be a power of two. Padding bytes skipped to reach the alignment count as
    /// used.
    pub fn alloc_aligned(&mut self, size: usize, align: usize) -> Option<&mut [u8]> {
        if size == 0 || !align.is_power_of_two() {
            return None;
        }

        let base = self.buffer.as_ptr() as usize;
        let current = base.checked_add(self.used)?;
        let aligned = current.checked_add(align - 1)? & !(align - 1);
        let start = aligned - base;

        let end = start.checked_add(size)?;
        if end > self.capacity() {
            return None;
        }

        self.used = end;

        Some(&mut self.buffer[start..end])
    }

    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            position: self.used,
        }
    }

    /// Rewinds the arena to `mark`, marks beyond the capacity are ignored.
    pub fn restore(&mut self, mark: ArenaMark) {
        if mark.position <= self.capacity() {
            self.used = mark.position;
        }
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn available(&self) -> usize {
        self.capacity() - self.used
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

impl ScratchAlloc for Arena<'_> {
    fn alloc_scratch(&mut self, size: usize) -> Option<&mut [u8]> {
        self.alloc(size)
    }
}

#[test]
fn new_rejects_empty_buffer() {
    assert!(Arena::new(&mut []).is_none());
}

#[test]
fn alloc_until_full() {
    let mut buffer = [0u8; 64];
    let mut arena = Arena::new(&mut buffer).unwrap();

    assert_eq!(arena.alloc(40).map(|s| s.len()), Some(40));
    assert_eq!(arena.used(), 40);
    assert_eq!(arena.available(), 24);

    assert!(arena.alloc(25).is_none());
    assert!(arena.alloc(0).is_none());
    assert_eq!(arena.used(), 40);

    assert_eq!(arena.alloc(24).map(|s| s.len()), Some(24));
    assert_eq!(arena.available(), 0);
    assert!(arena.alloc(1).is_none());
}

#[test]
fn allocations_do_not_overlap() {
    let mut buffer = [0u8; 8];
    let mut arena = Arena::new(&mut buffer).unwrap();

    arena.alloc(4).unwrap().fill(0xAA);
    arena.alloc(4).unwrap().fill(0xBB);
    drop(arena);

    assert_eq!(buffer, [0xAA, 0xAA, 0xAA, 0xAA, 0xBB, 0xBB, 0xBB, 0xBB]);
}

#[test]
fn aligned_alloc() {
    let mut buffer = [0u8; 256];
    let mut arena = Arena::new(&mut buffer).unwrap();

    arena.alloc(1).unwrap();
    for align in [1, 2, 8, 16, 64] {
        let block = arena.alloc_aligned(3, align).unwrap();
        assert_eq!(block.len(), 3);
        assert_eq!(block.as_ptr() as usize % align, 0);
    }

    assert!(arena.alloc_aligned(4, 0).is_none());
    assert!(arena.alloc_aligned(4, 3).is_none());
    assert!(arena.alloc_aligned(0, 8).is_none());
    assert!(arena.alloc_aligned(1024, 8).is_none());
}

#[test]
fn mark_restore_reset() {
    let mut buffer = [0u8; 32];
    let mut arena = Arena::new(&mut buffer).unwrap();

    arena.alloc(10).unwrap();
    let mark = arena.mark();
    arena.alloc(12).unwrap();
    assert_eq!(arena.used(), 22);

    arena.restore(mark);
    assert_eq!(arena.used(), 10);

    arena.restore(ArenaMark { position: 33 });
    assert_eq!(arena.used(), 10);

    arena.reset();
    assert_eq!(arena.used(), 0);
    assert_eq!(arena.available(), arena.capacity());
}
