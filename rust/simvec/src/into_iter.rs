//! By-value iteration over a [`SimpleVector`](crate::SimpleVector).

use std::ptr;

use simvec_buffer::OwningBuffer;

/// An iterator that moves elements out of a `SimpleVector`.
///
/// The iterator owns the vector's buffer. Elements that are never yielded are
/// dropped together with the iterator.
pub struct IntoIter<T> {
    buf: OwningBuffer<T>,
    /// First slot not yet yielded from the front.
    start: usize,
    /// One past the last slot not yet yielded from the back.
    end: usize,
}

impl<T> IntoIter<T> {
    /// Takes over `buf`, whose slots `[0, len)` are live.
    pub(crate) fn new(buf: OwningBuffer<T>, len: usize) -> IntoIter<T> {
        debug_assert!(len <= buf.capacity());
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }

    /// Returns the elements that have not been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[start, end)` are live.
        unsafe {
            std::slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: slot `index` is live and leaves the live range here.
        Some(unsafe { self.buf.get_unchecked(index).assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` is live and leaves the live range here.
        Some(unsafe { self.buf.get_unchecked(self.end).assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> std::iter::FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        self.end = self.start;
        // SAFETY: the remaining slots are live and dropped exactly once.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(self.start), remaining);
            ptr::drop_in_place(rest);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
