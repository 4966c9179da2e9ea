use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr,
};

use simvec_buffer::OwningBuffer;
use simvec_common::{Result, error::Error, result::ResultExt, verify_index};

use crate::{into_iter::IntoIter, reserve::ReserveRequest};

/// Capacity multiplier applied when an insertion or resize outgrows the
/// current buffer.
pub const GROWTH_FACTOR: usize = 2;

/// A resizable array of `T` stored in one contiguous [`OwningBuffer`].
///
/// Slots `[0, len)` hold live values and slots `[len, capacity)` are
/// allocated but uninitialized. Capacity only ever grows: truncating,
/// clearing, popping and erasing keep the buffer.
///
/// # Growth
///
/// When a resize or insertion needs more than `capacity` slots, a new buffer of
/// `max(capacity * GROWTH_FACTOR, required)` slots is allocated first, and only
/// then are the live elements moved into it. An allocation failure therefore
/// leaves the container untouched. [`reserve`](Self::reserve) allocates exactly
/// the requested capacity.
///
/// # Fallible API
///
/// Every operation that may allocate has a `try_` variant returning
/// [`Result`]. The plain variants treat allocation failure the way std
/// collections do: capacity overflow panics, allocator exhaustion calls
/// [`std::alloc::handle_alloc_error`].
pub struct SimpleVector<T> {
    buf: OwningBuffer<T>,
    len: usize,
}

impl<T> SimpleVector<T> {
    /// Creates a new empty vector with no capacity allocation.
    pub const fn new() -> SimpleVector<T> {
        SimpleVector {
            buf: OwningBuffer::empty(),
            len: 0,
        }
    }

    /// Creates an empty vector with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> SimpleVector<T> {
        Self::try_with_capacity(capacity).or_raise()
    }

    /// Creates an empty vector with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn try_with_capacity(capacity: usize) -> Result<SimpleVector<T>> {
        Ok(SimpleVector {
            buf: OwningBuffer::new(capacity)?,
            len: 0,
        })
    }

    /// Creates a vector of `len` default values, with capacity `len`.
    pub fn with_len(len: usize) -> SimpleVector<T>
    where
        T: Default,
    {
        Self::try_with_len(len).or_raise()
    }

    /// Fallible version of [`with_len`](Self::with_len).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn try_with_len(len: usize) -> Result<SimpleVector<T>>
    where
        T: Default,
    {
        let mut v = Self::try_with_capacity(len)?;
        v.fill_to(len, T::default);
        Ok(v)
    }

    /// Creates a vector holding `len` clones of `value`, with capacity `len`.
    pub fn from_elem(len: usize, value: T) -> SimpleVector<T>
    where
        T: Clone,
    {
        Self::try_from_elem(len, value).or_raise()
    }

    /// Fallible version of [`from_elem`](Self::from_elem).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn try_from_elem(len: usize, value: T) -> Result<SimpleVector<T>>
    where
        T: Clone,
    {
        let mut v = Self::try_with_capacity(len)?;
        v.fill_to(len, || value.clone());
        Ok(v)
    }

    /// Creates a vector holding clones of `items` in order, with capacity
    /// `items.len()`.
    pub fn from_slice(items: &[T]) -> SimpleVector<T>
    where
        T: Clone,
    {
        Self::try_from_slice(items).or_raise()
    }

    /// Fallible version of [`from_slice`](Self::from_slice).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn try_from_slice(items: &[T]) -> Result<SimpleVector<T>>
    where
        T: Clone,
    {
        let mut v = Self::try_with_capacity(items.len())?;
        for item in items {
            v.write_next(item.clone());
        }
        Ok(v)
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice containing the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialized.
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns a mutable slice containing the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots `[0, len)` are initialized.
        unsafe { std::slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Returns a raw pointer to the first slot.
    ///
    /// The pointer is dangling when no storage is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`. The check is performed only in debug
    /// builds.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} >= len {}", self.len);
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`. The check is performed only in debug
    /// builds.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} >= len {}", self.len);
        unsafe { &mut *self.buf.as_mut_ptr().add(index) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an index-out-of-range error if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.len);
        // SAFETY: verified above.
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an index-out-of-range error if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.len);
        // SAFETY: verified above.
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// Drops all elements. Capacity and storage are kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops the elements past `new_len`. Has no effect if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Shorten first, so a panicking destructor cannot expose dropped slots.
        self.len = new_len;
        // SAFETY: slots `[new_len, new_len + tail_len)` were live.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(new_len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Grows the capacity to exactly `new_capacity` slots.
    ///
    /// Does nothing if `new_capacity <= capacity`. Never changes `len`.
    pub fn reserve(&mut self, new_capacity: usize) {
        self.try_reserve(new_capacity).or_raise()
    }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the new storage cannot be obtained; the
    /// vector is left unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.reallocate(new_capacity)
    }

    /// Sets the length to `new_len`.
    ///
    /// Shrinking drops the tail. Growing appends default values, reallocating
    /// to `max(capacity * 2, new_len)` slots when the current buffer is too
    /// small.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.try_resize(new_len).or_raise()
    }

    /// Fallible version of [`resize`](Self::resize).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the new storage cannot be obtained; the
    /// vector is left unchanged.
    pub fn try_resize(&mut self, new_len: usize) -> Result<()>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.grow_to_fit(new_len)?;
        self.fill_to(new_len, T::default);
        Ok(())
    }

    /// Appends `value`, doubling the capacity when the vector is full.
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).or_raise()
    }

    /// Fallible version of [`push_back`](Self::push_back).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the vector is full and a larger buffer
    /// cannot be obtained. The vector is unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        let len = self.len;
        self.try_insert(len, value).map(|_| ())
    }

    /// Inserts `value` at `index`, shifting the following elements right, and
    /// returns a reference to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.try_insert(index, value).or_raise()
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the vector is full and a larger buffer
    /// cannot be obtained. The vector is unchanged and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let new_len = len
            .checked_add(1)
            .ok_or_else(|| Error::capacity_overflow(len))?;
        self.grow_to_fit(new_len)?;

        // SAFETY: `new_len <= capacity`, so slot `len` exists. The overlapping
        // copy moves `[index, len)` to `[index + 1, len + 1)` back to front.
        unsafe {
            let at = self.buf.as_mut_ptr().add(index);
            ptr::copy(at, at.add(1), len - index);
            ptr::write(at, value);
        }
        self.len = new_len;
        // SAFETY: just written.
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// Drops the element at `index`, shifting the following elements left.
    ///
    /// Returns the index that now holds the element that followed the erased
    /// one, which equals the new `len` if the last element was erased.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Removes and returns the element at `index`, shifting the following
    /// elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        // SAFETY: `index < len`. The value is read out before its slot is
        // overwritten by the front-to-back move of `[index + 1, len)`.
        unsafe {
            let at = self.buf.as_mut_ptr().add(index);
            let value = ptr::read(at);
            ptr::copy(at.add(1), at, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Removes the last element and returns it, or `None` if the vector is
    /// empty. No other element moves.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was the last live slot and is now outside the
        // live range, so it is read exactly once.
        Some(unsafe { self.buf.get_unchecked(self.len).assume_init_read() })
    }

    /// Exchanges the contents of two vectors without allocating.
    #[inline]
    pub fn swap(&mut self, other: &mut SimpleVector<T>) {
        self.buf.swap(&mut other.buf);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the contents out, leaving this vector empty with zero capacity.
    #[inline]
    pub fn take(&mut self) -> SimpleVector<T> {
        std::mem::replace(self, Self::new())
    }
}

impl<T> SimpleVector<T> {
    /// Ensures room for `required` elements, growing by [`GROWTH_FACTOR`] or to
    /// `required`, whichever is larger.
    fn grow_to_fit(&mut self, required: usize) -> Result<()> {
        let capacity = self.capacity();
        if required <= capacity {
            return Ok(());
        }
        let new_capacity = std::cmp::max(capacity.saturating_mul(GROWTH_FACTOR), required);
        self.reallocate(new_capacity)
    }

    /// Moves the live elements into a fresh buffer of `new_capacity` slots.
    ///
    /// The new buffer is obtained before anything moves, so a failure leaves
    /// the vector as it was.
    #[cold]
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity >= self.len);
        let mut new_buf = OwningBuffer::<T>::new(new_capacity)?;
        log::trace!(
            "reallocating {} -> {new_capacity} slots ({} live)",
            self.capacity(),
            self.len
        );
        // SAFETY: both blocks hold at least `len` slots and do not overlap.
        // The old slots become moved-from and are released without drops.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_mut_ptr(), self.len);
        }
        self.buf.swap(&mut new_buf);
        Ok(())
    }

    /// Appends values produced by `make` until `len == new_len`.
    ///
    /// `len` advances after each write, so a panic in `make` leaves a valid
    /// prefix behind.
    fn fill_to(&mut self, new_len: usize, mut make: impl FnMut() -> T) {
        debug_assert!(new_len <= self.capacity());
        while self.len < new_len {
            self.write_next(make());
        }
    }

    /// Writes `value` into slot `len`, which must be allocated.
    #[inline]
    fn write_next(&mut self, value: T) {
        let len = self.len;
        self.buf[len].write(value);
        self.len = len + 1;
    }

    /// Hands the buffer and the live length over to a by-value iterator.
    fn into_parts(self) -> (OwningBuffer<T>, usize) {
        let mut this = ManuallyDrop::new(self);
        let len = this.len;
        (this.buf.take(), len)
    }
}

impl<T> Drop for SimpleVector<T> {
    fn drop(&mut self) {
        // SAFETY: slots `[0, len)` are live and dropped exactly once; the
        // buffer then frees the storage.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T: Clone> Clone for SimpleVector<T> {
    /// Copies the live elements into independent storage of exactly `len`
    /// slots.
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    /// Builds a complete copy of `source` and swaps it in.
    ///
    /// If cloning an element panics, `self` is left untouched.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Default for SimpleVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SimpleVector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for SimpleVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} >= len {}", self.len);
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for SimpleVector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} >= len {}", self.len);
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for SimpleVector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for SimpleVector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SimpleVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleVector")
            .field("values", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for SimpleVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVector<T> {}

impl<T: PartialEq> PartialEq<[T]> for SimpleVector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for SimpleVector<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SimpleVector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for SimpleVector<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for SimpleVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> From<ReserveRequest> for SimpleVector<T> {
    fn from(request: ReserveRequest) -> Self {
        Self::with_capacity(request.capacity())
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVector<T> {
    fn from(items: [T; N]) -> Self {
        let mut v = Self::with_capacity(N);
        for item in items {
            v.write_next(item);
        }
        v
    }
}

impl<T: Clone> From<&[T]> for SimpleVector<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T> FromIterator<T> for SimpleVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = SimpleVector::new();
        v.extend(iter);
        v
    }
}

impl<T> Extend<T> for SimpleVector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.grow_to_fit(self.len.saturating_add(lower)).or_raise();
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a SimpleVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> IntoIterator for SimpleVector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_parts();
        IntoIter::new(buf, len)
    }
}
