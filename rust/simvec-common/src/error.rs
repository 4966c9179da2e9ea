use std::alloc::Layout;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// The requested slot count cannot be expressed as a memory layout.
    pub fn capacity_overflow(requested: usize) -> Error {
        Error(
            ErrorKind::Allocation {
                requested,
                reason: AllocationFailure::CapacityOverflow,
            }
            .into(),
        )
    }

    /// The global allocator refused a valid layout.
    pub fn out_of_memory(requested: usize, layout: Layout) -> Error {
        Error(
            ErrorKind::Allocation {
                requested,
                reason: AllocationFailure::OutOfMemory {
                    size: layout.size(),
                    align: layout.align(),
                },
            }
            .into(),
        )
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, len }.into())
    }

    /// Returns `true` if this error was raised while obtaining storage.
    pub fn is_allocation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Allocation { .. })
    }

    /// Returns `true` if this error was raised by a checked accessor.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfRange { .. })
    }

    /// Converts an allocation failure into the reaction std collections have
    /// for their infallible APIs: a panic on capacity overflow and
    /// `handle_alloc_error` when the allocator is exhausted.
    ///
    /// Any other error kind panics with its message.
    #[cold]
    #[track_caller]
    pub fn raise(self) -> ! {
        match self.into_kind() {
            ErrorKind::Allocation {
                reason: AllocationFailure::OutOfMemory { size, align },
                ..
            } => match Layout::from_size_align(size, align) {
                Ok(layout) => std::alloc::handle_alloc_error(layout),
                Err(_) => panic!("invalid layout: size {size}, align {align}"),
            },
            kind => panic!("{kind}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("failed to allocate storage for {requested} elements: {reason}")]
    Allocation {
        requested: usize,
        reason: AllocationFailure,
    },

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocationFailure {
    #[error("capacity overflow")]
    CapacityOverflow,

    #[error("allocator returned null for {size} bytes (align {align})")]
    OutOfMemory { size: usize, align: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let e = Error::capacity_overflow(usize::MAX);
        assert!(e.is_allocation());
        assert!(!e.is_index_out_of_range());
        assert!(matches!(
            e.kind(),
            ErrorKind::Allocation {
                requested: usize::MAX,
                reason: AllocationFailure::CapacityOverflow
            }
        ));

        let e = Error::index_out_of_range(3, 2);
        assert!(e.is_index_out_of_range());
        assert_eq!(e.to_string(), "index 3 is out of range for length 2");
    }

    #[test]
    fn test_out_of_memory_message() {
        let layout = Layout::from_size_align(4096, 8).unwrap();
        let e = Error::out_of_memory(512, layout);
        assert_eq!(
            e.to_string(),
            "failed to allocate storage for 512 elements: \
             allocator returned null for 4096 bytes (align 8)"
        );
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_raise_capacity_overflow_panics() {
        Error::capacity_overflow(usize::MAX).raise();
    }
}
