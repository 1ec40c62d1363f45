/// Source of the scratch memory used by the byte-level insertion sort.
///
/// Returning `None` signals that the request could not be served. The memory is released when the
/// returned borrow ends.
pub trait ScratchAlloc {
    fn alloc_scratch(&mut self, size: usize) -> Option<&mut [u8]>;
}

/// Scratch memory from the global allocator.
///
/// The buffer is kept between calls, so reusing one `Global` for many sorts of the same element
/// size allocates only once. Allocation failure is reported instead of aborting the process.
#[derive(Debug, Default)]
pub struct Global {
    buf: Vec<u8>,
}

impl Global {
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }
}

impl ScratchAlloc for Global {
    fn alloc_scratch(&mut self, size: usize) -> Option<&mut [u8]> {
        self.buf.clear();
        self.buf.try_reserve_exact(size).ok()?;
        self.buf.resize(size, 0);

        Some(&mut self.buf[..])
    }
}

impl<A: ScratchAlloc + ?Sized> ScratchAlloc for &mut A {
    fn alloc_scratch(&mut self, size: usize) -> Option<&mut [u8]> {
        (**self).alloc_scratch(size)
    }
}

#[test]
fn global_serves_requested_size() {
    let mut global = Global::new();
    assert_eq!(global.alloc_scratch(24).map(|s| s.len()), Some(24));
    assert_eq!(global.alloc_scratch(3).map(|s| s.len()), Some(3));
    assert!(global.alloc_scratch(usize::MAX).is_none());
}
