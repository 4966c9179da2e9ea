//! Capacity hints for constructing a [`SimpleVector`](crate::SimpleVector).

/// A request to pre-allocate storage, consumed by the
/// `From<ReserveRequest>` conversion of `SimpleVector`.
///
/// The resulting container is empty with exactly `capacity` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveRequest {
    capacity: usize,
}

impl ReserveRequest {
    pub const fn new(capacity: usize) -> ReserveRequest {
        ReserveRequest { capacity }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Creates a [`ReserveRequest`] for `capacity` slots.
pub const fn reserve(capacity: usize) -> ReserveRequest {
    ReserveRequest::new(capacity)
}
