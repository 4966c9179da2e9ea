//! Fixed-size heap storage with unique ownership.
//!
//! This module provides `OwningBuffer`, the raw storage primitive underneath
//! `SimpleVector`. A buffer owns a contiguous block of `capacity` slots of `T`
//! obtained from the global allocator. It never resizes itself and never
//! touches slot contents: from the buffer's point of view every slot is
//! uninitialized memory, and the owner decides which slots hold live values.
//!
//! # Safety
//!
//! Dropping an `OwningBuffer` frees the block without dropping any values that
//! may still live in it. Owners must drop (or move out) live values first.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use simvec_common::{Result, error::Error};

/// A move-only owner of a contiguous block of `capacity` slots of `T`.
///
/// Zero capacity is legal and maps to an empty buffer that owns no memory;
/// its pointer is dangling and must never be dereferenced. Buffers of
/// zero-sized types never allocate either, but still report the requested
/// capacity.
pub struct OwningBuffer<T> {
    /// Start of the block, dangling when nothing is allocated.
    ptr: NonNull<T>,
    /// Number of slots, fixed at construction.
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> OwningBuffer<T> {
    /// Creates an empty buffer without allocating.
    pub const fn empty() -> OwningBuffer<T> {
        OwningBuffer {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates storage for `capacity` slots.
    ///
    /// The slots are left uninitialized.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the byte size of the block overflows
    /// the address space, or if the global allocator cannot satisfy the
    /// request.
    pub fn new(capacity: usize) -> Result<OwningBuffer<T>> {
        if capacity == 0 {
            return Ok(Self::empty());
        }
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(OwningBuffer {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or_else(|| {
            log::debug!(
                "allocation of {} bytes for {capacity} slots failed",
                layout.size()
            );
            Error::out_of_memory(capacity, layout)
        })?;

        Ok(OwningBuffer {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Returns the number of slots owned by this buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the buffer has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns a raw pointer to slot 0.
    ///
    /// The pointer is dangling for an empty buffer and may be used only for
    /// address arithmetic within `0..=capacity`.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable raw pointer to slot 0.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a reference to slot `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `capacity`. The check is performed only in
    /// debug builds.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &MaybeUninit<T> {
        debug_assert!(index < self.capacity, "slot {index} >= {}", self.capacity);
        unsafe { &*self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Returns a mutable reference to slot `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `capacity`. The check is performed only in
    /// debug builds.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        debug_assert!(index < self.capacity, "slot {index} >= {}", self.capacity);
        unsafe { &mut *self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }

    /// Returns all slots as a slice of possibly uninitialized values.
    #[inline]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: the block holds `capacity` slots and `MaybeUninit<T>` has
        // the layout of `T`.
        unsafe {
            std::slice::from_raw_parts(self.ptr.as_ptr().cast::<MaybeUninit<T>>(), self.capacity)
        }
    }

    /// Returns all slots as a mutable slice of possibly uninitialized values.
    #[inline]
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: see `as_uninit_slice`; `&mut self` guarantees exclusivity.
        unsafe {
            std::slice::from_raw_parts_mut(
                self.ptr.as_ptr().cast::<MaybeUninit<T>>(),
                self.capacity,
            )
        }
    }

    /// Exchanges the owned storage with `other` without allocating.
    #[inline]
    pub fn swap(&mut self, other: &mut OwningBuffer<T>) {
        std::mem::swap(self, other);
    }

    /// Moves the storage out, leaving this buffer empty.
    #[inline]
    pub fn take(&mut self) -> OwningBuffer<T> {
        std::mem::replace(self, Self::empty())
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_| Error::capacity_overflow(capacity))
    }
}

impl<T> std::ops::Index<usize> for OwningBuffer<T> {
    type Output = MaybeUninit<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_uninit_slice()[index]
    }
}

impl<T> std::ops::IndexMut<usize> for OwningBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_uninit_slice_mut()[index]
    }
}

impl<T> Default for OwningBuffer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for OwningBuffer<T> {
    /// Returns the block to the global allocator.
    ///
    /// Slot contents are not dropped.
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        // The layout was valid when the block was allocated.
        let Ok(layout) = Layout::array::<T>(self.capacity) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: `ptr` was returned by `alloc::alloc` with this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

// SAFETY: `OwningBuffer` uniquely owns its block, so sending it transfers the
// slots it may contain.
unsafe impl<T: Send> Send for OwningBuffer<T> {}

// SAFETY: shared access only exposes shared references to the slots.
unsafe impl<T: Sync> Sync for OwningBuffer<T> {}

impl<T> std::fmt::Debug for OwningBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwningBuffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}
