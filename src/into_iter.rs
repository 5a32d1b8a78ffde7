use crate::RawStorage;
use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    ptr, slice,
};

/// An iterator that moves out of a [`DynamicArray`].
///
/// This struct is created by the [`into_iter`] method, provided by the
/// [`IntoIterator`] trait. Elements that are never yielded are dropped along
/// with the iterator, after which the block is released.
///
/// [`DynamicArray`]: crate::DynamicArray
/// [`into_iter`]: crate::DynamicArray::into_iter
pub struct IntoIter<T> {
    pub(crate) storage: RawStorage<T>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements that have not been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[start, end)` are still live
        unsafe { slice::from_raw_parts(self.storage.slot(self.start), self.end - self.start) }
    }

    /// Returns the elements that have not been yielded yet, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots `[start, end)` are still live and uniquely borrowed
        unsafe { slice::from_raw_parts_mut(self.storage.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            // SAFETY: the slot is live and stops being counted right away
            let out = unsafe { self.storage.slot(self.start).read() };
            self.start += 1;
            Some(out)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: the slot was the last live one and is no longer counted
            Some(unsafe { self.storage.slot(self.end).read() })
        }
    }
}

impl<T> Debug for IntoIter<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(self.storage.slot(self.start), self.end - self.start);
        self.start = self.end;
        // SAFETY: the unyielded slots are live; the storage releases the
        // block afterwards
        unsafe { ptr::drop_in_place(rest) };
    }
}

impl<T> FusedIterator for IntoIter<T> {}
impl<T> ExactSizeIterator for IntoIter<T> {}
