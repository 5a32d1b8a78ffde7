/// Emits a `log::trace!` record when the `log` feature is enabled.
#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)+) => {
        ::log::trace!(target: "dynamic_array", $($arg)+)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

pub(crate) use trace;

/// Creates a [`DynamicArray`] containing the arguments.
///
/// `dyn_array!` works like `vec!`:
///
/// - Create a [`DynamicArray`] containing a given list of elements:
///
/// ```
/// # use dynamic_array::dyn_array;
/// let array = dyn_array![1, 2, 3];
/// assert_eq!(array, [1, 2, 3]);
/// ```
///
/// - Create a [`DynamicArray`] from a given element and size:
///
/// ```
/// # use dynamic_array::dyn_array;
/// let array = dyn_array![1; 3];
/// assert_eq!(array, [1, 1, 1]);
/// ```
///
/// The second form clones the element, so `T` must implement [`Clone`].
///
/// [`DynamicArray`]: crate::DynamicArray
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynamicArray::new()
    };

    ($elem:expr; $n:expr) => {{
        let elem = $elem;
        $crate::DynamicArray::from_fn($n, |_| ::core::clone::Clone::clone(&elem))
    }};

    ($($x:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($x),+])
    };
}
