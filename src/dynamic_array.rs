use crate::{IntoIter, RawStorage, StorageError, guard::PartialInit, macros::trace};
use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    convert::Infallible,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    ptr, slice,
};

/// A growable contiguous array.
///
/// A `DynamicArray<T>` owns one [`RawStorage<T>`] and tracks how many of its
/// leading slots hold live values. Slots `[0, len)` are initialized and
/// owned by the array; slots `[len, capacity)` are raw memory.
///
/// Every operation that needs more room replaces the storage wholesale:
/// a new block is allocated, any new element is constructed straight into
/// its final slot there, the existing elements are moved across, and only
/// then is the new block swapped in. A constructor that fails (by panicking
/// or by returning an error from one of the `try_*` methods) therefore
/// leaves the array exactly as it was.
///
/// Slice methods such as indexing, [`iter`], [`first`] and [`sort`] are
/// available through [`Deref<Target = [T]>`](Deref).
///
/// # Examples
///
/// ```
/// # use dynamic_array::DynamicArray;
/// let mut array = DynamicArray::new();
/// array.push('a');
/// array.push('c');
/// array.insert(1, 'b');
/// assert_eq!(array, ['a', 'b', 'c']);
/// assert_eq!(array.pop(), Some('c'));
/// assert_eq!(array[1], 'b');
/// ```
///
/// [`iter`]: slice::iter
/// [`first`]: slice::first
/// [`sort`]: slice::sort
pub struct DynamicArray<T> {
    storage: RawStorage<T>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Constructs a new, empty `DynamicArray<T>`.
    ///
    /// The array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let array = DynamicArray::<u8>::new();
    /// assert_eq!(array.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            storage: RawStorage::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `DynamicArray<T>` with room for exactly
    /// `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the block would exceed `isize::MAX` bytes. Aborts through
    /// [`handle_alloc_error`] if the allocator fails.
    ///
    /// [`handle_alloc_error`]: alloc::alloc::handle_alloc_error
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RawStorage::with_capacity(capacity),
            len: 0,
        }
    }

    /// Fallible version of [`DynamicArray::with_capacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Ok(Self {
            storage: RawStorage::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Constructs an array of `len` default values.
    ///
    /// Exactly `len` slots are allocated. If a call to `T::default` panics,
    /// the values built so far are dropped and the block is released before
    /// the panic propagates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let array = DynamicArray::<String>::with_len(3);
    /// assert_eq!(array.len(), 3);
    /// assert_eq!(array.capacity(), 3);
    /// assert!(array.iter().all(String::is_empty));
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(len, |_| T::default())
    }

    /// Constructs an array of `len` elements, each built by calling `f` with
    /// its index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let squares = DynamicArray::from_fn(4, |i| i * i);
    /// assert_eq!(squares, [0, 1, 4, 9]);
    /// ```
    pub fn from_fn<F>(len: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut storage = RawStorage::with_capacity(len);
        // SAFETY: the block is fresh and has room for `len` elements
        let mut guard = unsafe { PartialInit::new(storage.as_mut_ptr()) };
        for i in 0..len {
            unsafe { guard.push(f(i)) };
        }
        let len = guard.finish();
        Self { storage, len }
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of element slots allocated, live or not.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Extracts a slice of the live elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialized
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the live elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots `[0, len)` are initialized and uniquely borrowed
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Returns a raw pointer to the first slot.
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns a raw mutable pointer to the first slot.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Ensures room for at least `new_capacity` elements in total.
    ///
    /// Does nothing if the capacity is already large enough. Otherwise
    /// exactly `new_capacity` slots are allocated and every element is moved
    /// into the new block. Capacity never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the block would exceed `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::<i32>::new();
    /// array.reserve(10);
    /// assert_eq!(array.capacity(), 10);
    /// array.reserve(4);
    /// assert_eq!(array.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(error) = self.try_reserve(new_capacity) {
            RawStorage::<T>::fail(error)
        }
    }

    /// Fallible version of [`DynamicArray::reserve`].
    ///
    /// # Errors
    ///
    /// Returns the allocation error, leaving the array unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), StorageError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let storage = RawStorage::try_with_capacity(new_capacity)?;
        // SAFETY: the fresh block has room for every live element
        unsafe { self.relocate_into(storage, None) };
        Ok(())
    }

    /// Appends an element to the back of the array.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::new();
    /// array.push(1);
    /// array.push(2);
    /// assert_eq!(array, [1, 2]);
    /// ```
    pub fn push(&mut self, value: T) {
        self.emplace_back_with(|| value);
    }

    /// Constructs an element at the back of the array and returns a
    /// reference to it.
    ///
    /// When the array is full its capacity doubles (or becomes 1). The
    /// element is built after the larger block is allocated and written
    /// directly into its final slot there; if `f` panics, the new block is
    /// released and the existing elements are never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::new();
    /// let name = array.emplace_back_with(|| String::from("first"));
    /// name.push('!');
    /// assert_eq!(array[0], "first!");
    /// ```
    pub fn emplace_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back_with(|| Ok::<_, Infallible>(f())) {
            Ok(element) => element,
            Err(never) => match never {},
        }
    }

    /// Constructs an element at the back of the array with a fallible
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`. The array's length, capacity and elements
    /// are then exactly as before the call.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::DynamicArray;
    /// let mut array = DynamicArray::from([1u8, 2]);
    /// let parsed = array.try_emplace_back_with(|| "300".parse::<u8>());
    /// assert!(parsed.is_err());
    /// assert_eq!(array, [1, 2]);
    /// assert_eq!(array.capacity(), 2);
    /// ```
    pub fn try_emplace_back_with<E, F>(&mut self, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let index = self.len;
        if self.len == self.capacity() {
            let storage = self.grown_storage();
            let value = f()?;
            // SAFETY: the fresh block has room for `len + 1` elements
            unsafe {
                storage.slot(index).write(value);
                self.relocate_into(storage, None);
            }
        } else {
            let value = f()?;
            // SAFETY: `len < capacity`, so slot `len` is spare room
            unsafe { self.storage.slot(index).write(value) };
        }
        self.len += 1;
        // SAFETY: slot `index` was just initialized
        Ok(unsafe { &mut *self.storage.slot(index) })
    }

    /// Removes the last element and returns it, or [`None`] if the array is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: the slot held the last live element and is no longer
            // counted by `len`
            Some(unsafe { self.storage.slot(self.len).read() })
        }
    }

    /// Drops the last element in place. Does nothing if the array is empty.
    pub fn pop_back(&mut self) {
        self.truncate(self.len.saturating_sub(1));
    }

    /// Inserts `value` at `index`, shifting every element after it one
    /// position to the right, and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::dyn_array;
    /// let mut array = dyn_array!['a', 'b', 'c'];
    /// array.insert(1, 'x');
    /// assert_eq!(array, ['a', 'x', 'b', 'c']);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace_with(index, || value)
    }

    /// Constructs an element at `index`, shifting every element after it one
    /// position to the right, and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_with(index, || Ok::<_, Infallible>(f())) {
            Ok(element) => element,
            Err(never) => match never {},
        }
    }

    /// Constructs an element at `index` with a fallible constructor.
    ///
    /// The element is always built before anything is shifted or relocated,
    /// so an error from `f` (or a panic in it) leaves the array unchanged.
    /// Inserting at `len` is the same as [`try_emplace_back_with`].
    ///
    /// # Errors
    ///
    /// Returns the error from `f`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// [`try_emplace_back_with`]: DynamicArray::try_emplace_back_with
    pub fn try_emplace_with<E, F>(&mut self, index: usize, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        assert!(index <= self.len, "index out of bounds");
        if index == self.len {
            return self.try_emplace_back_with(f);
        }

        if self.len == self.capacity() {
            let storage = self.grown_storage();
            let value = f()?;
            // SAFETY: the fresh block has room for `len + 1` elements
            unsafe {
                storage.slot(index).write(value);
                self.relocate_into(storage, Some(index));
            }
        } else {
            let value = f()?;
            // SAFETY: `len < capacity`, so the run `[index, len)` can move one
            // slot right without leaving the block
            unsafe {
                let at = self.storage.slot(index);
                ptr::copy(at, at.add(1), self.len - index);
                at.write(value);
            }
        }
        self.len += 1;
        // SAFETY: slot `index` was just initialized
        Ok(unsafe { &mut *self.storage.slot(index) })
    }

    /// Removes and returns the element at `index`, shifting every element
    /// after it one position to the left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "index out of bounds");
        // SAFETY: `index` is a live slot; after reading it out, the run
        // `(index, len)` closes the gap and `len` stops counting the last slot
        unsafe {
            let at = self.storage.slot(index);
            let out = at.read();
            ptr::copy(at.add(1), at, self.len - index - 1);
            self.len -= 1;
            out
        }
    }

    /// Drops the element at `index`, shifting every element after it one
    /// position to the left. Returns `index`, which now refers to the
    /// element that followed the erased one (or to the end).
    ///
    /// Never allocates.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::dyn_array;
    /// let mut array = dyn_array!['a', 'x', 'b', 'c'];
    /// let next = array.erase(1);
    /// assert_eq!(array[next], 'b');
    /// assert_eq!(array, ['a', 'b', 'c']);
    /// ```
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Shortens the array to `len` elements, dropping the rest. Has no
    /// effect if `len` is not below the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(self.storage.slot(len), self.len - len);
        // Lower the length first so a panicking `Drop` cannot cause a
        // second drop of the tail.
        self.len = len;
        // SAFETY: the tail held live elements that are no longer counted
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the array to `new_len`, filling new slots with default
    /// values.
    ///
    /// Shrinking drops the elements past `new_len`. Growing first reserves
    /// exactly `new_len` slots, then builds the new values; if one of them
    /// panics, the values built so far are dropped and the length is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::dyn_array;
    /// let mut array = dyn_array![7, 8];
    /// array.resize(5);
    /// assert_eq!(array, [7, 8, 0, 0, 0]);
    /// array.resize(1);
    /// assert_eq!(array, [7]);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes the array to `new_len`, filling new slots by calling `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        // SAFETY: after the reserve, slots `[len, new_len)` are spare room
        let mut guard = unsafe { PartialInit::new(self.storage.slot(self.len)) };
        for _ in self.len..new_len {
            unsafe { guard.push(f()) };
        }
        self.len += guard.finish();
    }

    /// Clones and appends every element of `other`.
    ///
    /// If a clone panics, the clones made so far are dropped and the array
    /// keeps its previous length.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        self.reserve_for(other.len());
        // SAFETY: `reserve_for` made room for `other.len()` more elements
        unsafe { self.append_clones(other) };
    }

    /// Takes the contents of the array, leaving it empty.
    ///
    /// The block moves to the returned array; no element is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynamic_array::dyn_array;
    /// let mut a = dyn_array![1, 2, 3];
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(a.capacity(), 0);
    /// assert_eq!(b, [1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Replaces the contents of the array with those of `other`. The
    /// previous contents are dropped.
    pub fn assign(&mut self, mut other: Self) {
        self.swap_with(&mut other);
    }

    /// Exchanges contents with `other` without touching any element.
    ///
    /// Named apart from the slice method [`swap`](slice::swap), which
    /// exchanges two elements and stays reachable through `Deref`.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Allocates the block the next growth step moves into.
    fn grown_storage(&self) -> RawStorage<T> {
        let new_capacity = match self.capacity() {
            0 => Ok(1),
            capacity => capacity.checked_mul(2).ok_or(StorageError::CapacityOverflow),
        };
        match new_capacity.and_then(RawStorage::try_with_capacity) {
            Ok(storage) => {
                trace!("growing from {} to {} slots", self.capacity(), storage.capacity());
                storage
            }
            Err(error) => RawStorage::<T>::fail(error),
        }
    }

    /// Makes room for `additional` more elements, at least doubling the
    /// capacity when it has to grow.
    fn reserve_for(&mut self, additional: usize) {
        let Some(needed) = self.len.checked_add(additional) else {
            RawStorage::<T>::fail(StorageError::CapacityOverflow)
        };
        if needed > self.capacity() {
            self.reserve(needed.max(self.capacity().saturating_mul(2)));
        }
    }

    /// Moves every live element into `storage` and swaps it in.
    ///
    /// With `gap == Some(index)`, elements from `index` on land one slot to
    /// the right, leaving slot `index` of the new block to the caller.
    /// Moves are bitwise copies, so this step cannot fail part-way: the old
    /// block gives up its elements only after the new block holds them all.
    ///
    /// # Safety
    ///
    /// The caller must ensure that
    ///
    /// - `storage` has room for `len` elements, or `len + 1` with a gap
    /// - `index <= len` for a gap at `index`
    /// - the slots of `storage` that receive elements are uninitialized
    unsafe fn relocate_into(&mut self, mut storage: RawStorage<T>, gap: Option<usize>) {
        let src = self.storage.as_ptr();
        let dst = storage.as_mut_ptr();
        unsafe {
            match gap {
                None => ptr::copy_nonoverlapping(src, dst, self.len),
                Some(index) => {
                    ptr::copy_nonoverlapping(src, dst, index);
                    ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), self.len - index);
                }
            }
        }
        self.storage.swap(&mut storage);
        // `storage` now holds the old block with nothing live in it, so
        // dropping it only releases memory.
    }

    /// Clones `items` into the spare slots after `len`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `capacity - len >= items.len()`.
    unsafe fn append_clones(&mut self, items: &[T])
    where
        T: Clone,
    {
        let mut guard = unsafe { PartialInit::new(self.storage.slot(self.len)) };
        for item in items {
            unsafe { guard.push(item.clone()) };
        }
        self.len += guard.finish();
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: slots `[0, len)` are live; the storage releases the block
        // afterwards
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}

impl<T> Clone for DynamicArray<T>
where
    T: Clone,
{
    /// Allocates exactly `len` slots and clones every element into them, in
    /// order. A panicking clone drops the clones made so far.
    fn clone(&self) -> Self {
        Self::from_fn(self.len, |i| self[i].clone())
    }

    /// Makes `self` a copy of `source`.
    ///
    /// If `self` lacks the capacity, a full copy of `source` is built and
    /// swapped in, leaving `self` untouched on failure. Otherwise the common
    /// prefix is assigned with [`Clone::clone_from`], then the excess is
    /// either dropped or cloned into spare capacity.
    fn clone_from(&mut self, source: &Self) {
        if self.capacity() < source.len {
            let mut copy = source.clone();
            self.swap_with(&mut copy);
            return;
        }

        let common = self.len.min(source.len);
        for (dst, src) in self.iter_mut().zip(&source[..common]) {
            dst.clone_from(src);
        }
        if source.len < self.len {
            self.truncate(source.len);
        } else {
            // SAFETY: `capacity >= source.len`
            unsafe { self.append_clones(&source[common..]) };
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for DynamicArray<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_slice(), f)
    }
}

impl<T> Hash for DynamicArray<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> PartialOrd for DynamicArray<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T> Ord for DynamicArray<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for DynamicArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for DynamicArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_for(iter.size_hint().0);
        for element in iter {
            self.push(element);
        }
    }
}

impl<'a, T> Extend<&'a T> for DynamicArray<T>
where
    T: 'a + Copy,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut me = ManuallyDrop::new(self);
        IntoIter {
            storage: mem::take(&mut me.storage),
            start: 0,
            end: me.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(value: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        out.extend(value);
        out
    }
}

impl<T> From<&[T]> for DynamicArray<T>
where
    T: Clone,
{
    fn from(value: &[T]) -> Self {
        let mut out = Self::with_capacity(value.len());
        // SAFETY: the capacity is exactly `value.len()`
        unsafe { out.append_clones(value) };
        out
    }
}

impl<T> From<alloc::vec::Vec<T>> for DynamicArray<T> {
    fn from(value: alloc::vec::Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<DynamicArray<T>> for alloc::vec::Vec<T> {
    fn from(value: DynamicArray<T>) -> Self {
        value.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicArray;
    use crate::{StorageError, dyn_array};
    use std::{
        borrow::BorrowMut,
        hash::{DefaultHasher, Hash, Hasher},
    };

    #[test]
    fn default_does_not_allocate() {
        let array = DynamicArray::<u32>::default();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 0);
    }

    #[test]
    fn growth_doubles_capacity() {
        let mut array = DynamicArray::new();
        let mut capacities = vec![];
        for i in 0..9 {
            array.push(i);
            capacities.push(array.capacity());
        }
        assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(array, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn reserve_then_push_never_reallocates() {
        let mut array = DynamicArray::new();
        array.reserve(100);
        let block = array.as_ptr();
        for i in 0..100 {
            array.push(i);
        }
        assert_eq!(array.as_ptr(), block);
        assert_eq!(array.capacity(), 100);
    }

    #[test]
    fn reserve_never_shrinks() {
        let mut array = dyn_array![1, 2, 3, 4];
        array.reserve(2);
        assert_eq!(array.capacity(), 4);
        array.resize(1);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn try_reserve_overflow_leaves_array_intact() {
        let mut array = dyn_array![1u64, 2];
        assert!(array.try_reserve(usize::MAX).is_err());
        assert_eq!(array, [1, 2]);
        assert_eq!(array.capacity(), 2);
    }

    #[test]
    fn emplace_back_returns_new_element() {
        let mut array = DynamicArray::new();
        *array.emplace_back_with(|| 5) += 1;
        assert_eq!(array, [6]);
    }

    #[test]
    fn pop_back_on_empty_is_a_no_op() {
        let mut array = DynamicArray::<String>::new();
        array.pop_back();
        assert!(array.is_empty());
        array.push("a".into());
        array.pop_back();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    fn insert_then_erase_in_the_middle() {
        let mut array = dyn_array!['a', 'b', 'c'];
        assert_eq!(*array.insert(1, 'x'), 'x');
        assert_eq!(array, ['a', 'x', 'b', 'c']);
        assert_eq!(array.len(), 4);
        assert_eq!(array.erase(1), 1);
        assert_eq!(array, ['a', 'b', 'c']);
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn insert_without_reallocation() {
        let mut array = DynamicArray::with_capacity(8);
        array.extend([1, 2, 3]);
        let block = array.as_ptr();
        array.insert(0, 0);
        array.insert(2, 9);
        assert_eq!(array, [0, 1, 9, 2, 3]);
        assert_eq!(array.as_ptr(), block);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut array = dyn_array![1, 2];
        array.insert(2, 3);
        assert_eq!(array, [1, 2, 3]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn insert_into_empty() {
        let mut array = DynamicArray::new();
        array.insert(0, "only");
        assert_eq!(array, ["only"]);
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn insert_past_end_panics() {
        let mut array = dyn_array![1];
        array.insert(2, 0);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn erase_at_end_panics() {
        let mut array = dyn_array![1];
        array.erase(1);
    }

    #[test]
    fn resize_grows_with_defaults_and_shrinks() {
        let mut array = dyn_array![String::from("a"), String::from("b")];
        array.resize(5);
        assert_eq!(array.len(), 5);
        assert!(array[2..].iter().all(String::is_empty));
        array.resize(1);
        assert_eq!(array, [String::from("a")]);
        array.resize(1);
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn with_len_value_initializes() {
        let array = DynamicArray::<u8>::with_len(4);
        assert_eq!(array, [0, 0, 0, 0]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn clone_is_deep() {
        let mut a = dyn_array![String::from("x"), String::from("y")];
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.capacity(), 2);
        a[0].push('!');
        a.push(String::from("z"));
        assert_eq!(b, [String::from("x"), String::from("y")]);
    }

    #[test]
    fn take_moves_everything() {
        let mut a = dyn_array![1, 2, 3];
        let block = a.as_ptr();
        let b = a.take();
        assert_eq!(a.len(), 0);
        assert_eq!(b, [1, 2, 3]);
        assert_eq!(b.as_ptr(), block);
    }

    #[test]
    fn assign_replaces_contents() {
        let mut a = dyn_array![1, 2, 3];
        a.assign(dyn_array![4]);
        assert_eq!(a, [4]);
    }

    #[test]
    fn clone_from_into_small_capacity() {
        let mut a = dyn_array![1];
        let b = dyn_array![1, 2, 3];
        a.clone_from(&b);
        assert_eq!(a, b);
        assert_eq!(a.capacity(), 3);
    }

    #[test]
    fn clone_from_shorter_source_keeps_capacity() {
        let mut a = dyn_array![1, 2, 3, 4];
        let b = dyn_array![7, 8];
        a.clone_from(&b);
        assert_eq!(a, [7, 8]);
        assert_eq!(a.capacity(), 4);
    }

    #[test]
    fn clone_from_longer_source_within_capacity() {
        let mut a = DynamicArray::with_capacity(6);
        a.extend([1, 2]);
        let b = dyn_array![5, 6, 7, 8];
        let block = a.as_ptr();
        a.clone_from(&b);
        assert_eq!(a, [5, 6, 7, 8]);
        assert_eq!(a.as_ptr(), block);
    }

    #[test]
    fn clone_from_an_equal_copy_is_a_no_op() {
        let mut a = dyn_array![1, 2, 3];
        let same = a.clone();
        a.clone_from(&same);
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn extend_from_slice_and_conversions() {
        let mut array = DynamicArray::from(&[1, 2][..]);
        array.extend_from_slice(&[3, 4]);
        array.extend(&[5]);
        let vec: Vec<_> = array.into();
        assert_eq!(vec, [1, 2, 3, 4, 5]);
        let back = DynamicArray::from(vec);
        assert_eq!(back, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn slice_access() {
        let mut array: DynamicArray<_> = (1..=4).collect();
        assert_eq!(array.first(), Some(&1));
        assert_eq!(array.get(9), None);
        array.reverse();
        for x in &mut array {
            *x *= 10;
        }
        assert_eq!(array.iter().sum::<i32>(), 100);
        assert_eq!(array, [40, 30, 20, 10]);
    }

    #[test]
    fn zero_sized_elements() {
        let mut array = DynamicArray::new();
        for _ in 0..10 {
            array.push(());
        }
        array.insert(3, ());
        assert_eq!(array.len(), 11);
        array.remove(0);
        assert_eq!(array.len(), 10);
        assert_eq!(array.into_iter().count(), 10);
    }

    #[test]
    fn try_with_capacity_reports_overflow() {
        let array = DynamicArray::<u8>::try_with_capacity(16).unwrap();
        assert_eq!(array.capacity(), 16);
        assert!(array.is_empty());
        assert_eq!(
            DynamicArray::<u64>::try_with_capacity(usize::MAX).unwrap_err(),
            StorageError::CapacityOverflow
        );
    }

    #[test]
    fn raw_pointer_writes_are_visible() {
        let mut array = dyn_array![1, 2, 3];
        unsafe { array.as_mut_ptr().add(1).write(20) };
        assert_eq!(array, [1, 20, 3]);
        assert_eq!(array.as_mut_ptr().cast_const(), array.as_ptr());
    }

    #[test]
    fn hashes_like_a_slice() {
        fn hash_of<H: Hash + ?Sized>(value: &H) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let array = dyn_array![3, 1, 4];
        assert_eq!(hash_of(&array), hash_of(&[3, 1, 4][..]));
        assert_ne!(hash_of(&array), hash_of(&dyn_array![3, 1]));
    }

    #[test]
    fn mutable_slice_views() {
        fn zero_first(values: &mut [i32]) {
            values[0] = 0;
        }

        let mut array = dyn_array![5, 6];
        zero_first(array.as_mut());
        assert_eq!(array, [0, 6]);
        BorrowMut::<[i32]>::borrow_mut(&mut array)[1] = 9;
        assert_eq!(array, [0, 9]);
    }

    #[test]
    fn ordering_and_debug() {
        assert!(dyn_array![1, 2] < dyn_array![1, 3]);
        assert_eq!(format!("{:?}", dyn_array![1, 2]), "[1, 2]");
    }
}
