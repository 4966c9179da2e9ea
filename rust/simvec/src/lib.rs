//! A minimal resizable contiguous container.
//!
//! [`SimpleVector`] stores its elements in a single [`OwningBuffer`] and grows
//! by reallocating to `max(capacity * 2, required)` slots, moving the live
//! elements into the new block before the old one is released.
//!
//! ```
//! use simvec::{SimpleVector, reserve, simvec};
//!
//! let mut v = simvec![1, 2, 3];
//! v.insert(1, 9);
//! assert_eq!(v, [1, 9, 2, 3]);
//!
//! let w: SimpleVector<u32> = reserve(10).into();
//! assert_eq!((w.len(), w.capacity()), (0, 10));
//! ```

pub mod into_iter;
pub mod macros;
pub mod reserve;
pub mod simple_vector;

pub use into_iter::IntoIter;
pub use reserve::{ReserveRequest, reserve};
pub use simple_vector::{GROWTH_FACTOR, SimpleVector};
pub use simvec_buffer::OwningBuffer;
pub use simvec_common::{
    Result,
    error::{AllocationFailure, Error, ErrorKind},
};

#[cfg(test)]
mod tests;
