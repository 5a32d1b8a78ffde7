use core::{mem, ptr};

/// A run of slots being initialized one after another.
///
/// If the guard is dropped before [`PartialInit::finish`] is called, every
/// slot written so far is dropped in place. This is what rolls a bulk
/// construction back when an element constructor panics part-way through.
pub(crate) struct PartialInit<T> {
    start: *mut T,
    len: usize,
}

impl<T> PartialInit<T> {
    /// Starts an empty run at `start`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `start` is valid for writes of as many
    /// elements as will be passed to [`PartialInit::push`], and that those
    /// slots are uninitialized.
    pub(crate) unsafe fn new(start: *mut T) -> Self {
        Self { start, len: 0 }
    }

    /// Writes `value` into the next slot of the run.
    ///
    /// # Safety
    ///
    /// The next slot must lie within the range promised to
    /// [`PartialInit::new`].
    pub(crate) unsafe fn push(&mut self, value: T) {
        unsafe { self.start.add(self.len).write(value) };
        self.len += 1;
    }

    /// Hands the initialized slots over to the caller and returns how many
    /// there are.
    pub(crate) fn finish(self) -> usize {
        let len = self.len;
        mem::forget(self);
        len
    }
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `len` slots from `start` were written by `push`
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.len)) };
    }
}

#[cfg(test)]
mod tests {
    use super::PartialInit;
    use core::mem::MaybeUninit;
    use std::{cell::Cell, rc::Rc};

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drops_written_slots_when_abandoned() {
        let drops = Rc::new(Cell::new(0));
        let mut slots: [MaybeUninit<Counted>; 4] = [const { MaybeUninit::uninit() }; 4];
        {
            let mut guard = unsafe { PartialInit::new(slots.as_mut_ptr().cast::<Counted>()) };
            unsafe {
                guard.push(Counted(drops.clone()));
                guard.push(Counted(drops.clone()));
            }
        }
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn finish_keeps_slots_alive() {
        let drops = Rc::new(Cell::new(0));
        let mut slots: [MaybeUninit<Counted>; 2] = [const { MaybeUninit::uninit() }; 2];
        let mut guard = unsafe { PartialInit::new(slots.as_mut_ptr().cast::<Counted>()) };
        unsafe { guard.push(Counted(drops.clone())) };
        assert_eq!(guard.finish(), 1);
        assert_eq!(drops.get(), 0);
        unsafe { slots[0].assume_init_drop() };
        assert_eq!(drops.get(), 1);
    }
}
