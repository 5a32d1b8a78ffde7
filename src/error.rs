use core::{error, fmt};

/// An error returned when raw storage for a [`DynamicArray`] cannot be
/// obtained.
///
/// [`DynamicArray`]: crate::DynamicArray
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StorageError {
    /// The requested capacity, in bytes, exceeds `isize::MAX`.
    CapacityOverflow,
    /// The global allocator could not provide a block for `capacity`
    /// elements.
    AllocFailed {
        /// The number of element slots that was requested.
        capacity: usize,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => f.write_str("capacity overflow"),
            Self::AllocFailed { capacity } => {
                write!(f, "memory allocation failed for a capacity of {capacity}")
            }
        }
    }
}

impl error::Error for StorageError {}

#[cfg(test)]
mod tests {
    use super::StorageError;

    #[test]
    fn display() {
        assert_eq!(StorageError::CapacityOverflow.to_string(), "capacity overflow");
        assert_eq!(
            StorageError::AllocFailed { capacity: 12 }.to_string(),
            "memory allocation failed for a capacity of 12"
        );
    }
}
