use std::error::Error;
use std::fmt;

/// Reasons a byte-level sort refuses to run.
///
/// Every variant is reported before the first write to the input, so the caller always gets the
/// array back exactly as it was passed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortError {
    /// The allocator could not provide the `size` byte scratch buffer insertion sort needs.
    ScratchUnavailable { size: usize },
    /// `count * element_size` bytes were requested but the buffer is shorter.
    BufferTooSmall { required: usize, actual: usize },
    /// `count * element_size` does not fit into `usize`.
    SizeOverflow { count: usize, element_size: usize },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SortError::ScratchUnavailable { size } => {
                write!(f, "unable to allocate {size} byte scratch buffer")
            }
            SortError::BufferTooSmall { required, actual } => {
                write!(f, "buffer holds {actual} bytes, {required} bytes required")
            }
            SortError::SizeOverflow {
                count,
                element_size,
            } => write!(
                f,
                "{count} elements of {element_size} bytes overflow the address space"
            ),
        }
    }
}

impl Error for SortError {}

#[test]
fn error_display() {
    assert_eq!(
        SortError::ScratchUnavailable { size: 24 }.to_string(),
        "unable to allocate 24 byte scratch buffer"
    );
    assert_eq!(
        SortError::BufferTooSmall {
            required: 40,
            actual: 36
        }
        .to_string(),
        "buffer holds 36 bytes, 40 bytes required"
    );
}
