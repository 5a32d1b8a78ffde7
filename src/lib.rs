//! A growable contiguous array built on an explicit raw storage layer.
//!
//! The crate is split into two cooperating pieces:
//!
//! - [`RawStorage`] owns a block of uninitialized memory sized for a fixed
//!   number of elements. It allocates and releases; it never constructs or
//!   drops an element.
//! - [`DynamicArray`] owns one [`RawStorage`] and a count of how many leading
//!   slots hold live values. It implements appending, positional insertion
//!   and removal, resizing, cloning and iteration on top of it.
//!
//! Whenever a [`DynamicArray`] needs a bigger block it builds the new state
//! completely before giving up the old one: allocate, construct the new
//! element in its final slot, move the existing elements across, then swap
//! the blocks. An element constructor that panics, or that returns an error
//! through one of the `try_*` methods, leaves the array as it was.
//!
//! ```
//! use dynamic_array::{DynamicArray, dyn_array};
//!
//! let mut array = dyn_array![1, 2, 3];
//! array.insert(1, 10);
//! assert_eq!(array, [1, 10, 2, 3]);
//!
//! let failed = array.try_emplace_back_with(|| "x".parse::<i32>());
//! assert!(failed.is_err());
//! assert_eq!(array.len(), 4);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod dynamic_array;
mod eq_impl;
mod error;
mod guard;
mod into_iter;
mod macros;
mod raw_storage;


pub use dynamic_array::DynamicArray;
pub use error::StorageError;
pub use into_iter::IntoIter;
pub use raw_storage::RawStorage;
