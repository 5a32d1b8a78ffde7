use crate::{StorageError, macros::trace};
use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use core::{
    fmt::{self, Debug, Formatter},
    mem,
    ptr::NonNull,
};

/// An owned block of uninitialized memory with room for `capacity` values of
/// type `T`.
///
/// This is the low-level layer beneath [`DynamicArray`]. It acquires and
/// releases memory and nothing else: no slot is ever treated as holding a
/// live `T`. Writing values into the block, reading them back out, and
/// dropping them are entirely the owner's responsibility. Dropping a
/// `RawStorage` releases the block **without** dropping anything in it.
///
/// A capacity of zero, or a zero-sized `T`, never touches the allocator.
///
/// [`DynamicArray`]: crate::DynamicArray
pub struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

// SAFETY: `RawStorage` uniquely owns its block, like `Box<[MaybeUninit<T>]>`
unsafe impl<T> Send for RawStorage<T> where T: Send {}
unsafe impl<T> Sync for RawStorage<T> where T: Sync {}

impl<T> RawStorage<T> {
    /// Creates a handle with no block and a capacity of zero.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates a block with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CapacityOverflow`] if the block would exceed
    /// `isize::MAX` bytes and [`StorageError::AllocFailed`] if the global
    /// allocator cannot satisfy the request. No memory is held on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::{RawStorage, StorageError};
    /// let storage = RawStorage::<u32>::try_with_capacity(16)?;
    /// assert_eq!(storage.capacity(), 16);
    ///
    /// let err = RawStorage::<u32>::try_with_capacity(usize::MAX).unwrap_err();
    /// assert_eq!(err, StorageError::CapacityOverflow);
    /// # Ok::<(), StorageError>(())
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
            });
        }

        // SAFETY: `layout` has a non-zero size
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(StorageError::AllocFailed { capacity })?;
        trace!("allocated {} slots ({} bytes) at {:p}", capacity, layout.size(), ptr);
        Ok(Self { ptr, capacity })
    }

    /// Allocates a block with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the block would exceed `isize::MAX` bytes. Aborts through
    /// [`handle_alloc_error`] if the allocator fails.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(storage) => storage,
            Err(error) => Self::fail(error),
        }
    }

    /// Returns the number of element slots in the block.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the address of slot `index`.
    ///
    /// `index == capacity` is permitted and yields the one-past-the-end
    /// address. Only debug builds check the bound. Dereferencing the result
    /// is up to the caller, who must know whether the slot is initialized.
    #[inline]
    pub fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity, "slot index out of bounds");
        self.ptr.as_ptr().wrapping_add(index)
    }

    /// Returns a pointer to the first slot.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Exchanges blocks and capacities with `other`.
    ///
    /// No element data is read or written.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    fn layout(capacity: usize) -> Result<Layout, StorageError> {
        Layout::array::<T>(capacity).map_err(|_| StorageError::CapacityOverflow)
    }

    #[cold]
    pub(crate) fn fail(error: StorageError) -> ! {
        match error {
            StorageError::CapacityOverflow => panic!("capacity overflow"),
            StorageError::AllocFailed { capacity } => match Self::layout(capacity) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("capacity overflow"),
            },
        }
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for RawStorage<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        let Ok(layout) = Self::layout(self.capacity) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        trace!("released {} slots at {:p}", self.capacity, self.ptr);
        // SAFETY: the block was allocated in `try_with_capacity` with this
        // same layout and has not been released since
        unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
    }
}
