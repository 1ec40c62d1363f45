use crate::config::MAX_STACK_CAPACITY;

/// Inclusive range `[low, high]` still waiting to be sorted, produced at partition `depth`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct Frame {
    pub low: usize,
    pub high: usize,
    pub depth: usize,
}

/// Array-backed LIFO of frames living on the call stack.
///
/// The driver checks `len() + n < capacity()` before pushing `n` frames, so `push` never has to
/// deal with a full stack.
pub(crate) struct WorkStack {
    frames: [Frame; MAX_STACK_CAPACITY],
    len: usize,
    capacity: usize,
}

impl WorkStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: [Frame::default(); MAX_STACK_CAPACITY],
            len: 0,
            capacity: capacity.clamp(1, MAX_STACK_CAPACITY),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn push(&mut self, frame: Frame) {
        debug_assert!(self.len < self.capacity);
        self.frames[self.len] = frame;
        self.len += 1;
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Frame> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        Some(self.frames[self.len])
    }
}

#[test]
fn lifo_order() {
    let mut stack = WorkStack::new(4);
    assert_eq!(stack.capacity(), 4);
    assert_eq!(stack.pop(), None);

    for depth in 0..3 {
        stack.push(Frame {
            low: depth,
            high: depth + 10,
            depth,
        });
    }
    assert_eq!(stack.len(), 3);

    assert_eq!(stack.pop().map(|f| f.depth), Some(2));
    assert_eq!(stack.pop().map(|f| f.depth), Some(1));
    assert_eq!(stack.pop().map(|f| f.depth), Some(0));
    assert_eq!(stack.pop(), None);

    assert_eq!(WorkStack::new(0).capacity(), 1);
    assert_eq!(WorkStack::new(usize::MAX).capacity(), MAX_STACK_CAPACITY);
}
