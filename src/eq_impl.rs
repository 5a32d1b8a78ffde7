use crate::DynamicArray;
use alloc::vec::Vec;

macro_rules! uni {
    ($t:ty, $u:ty $(, $($b:tt)+)?) => {
        impl<T, U $(, $($b)+)?> PartialEq<$u> for $t
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &$u) -> bool {
                self[..] == other[..]
            }
        }
    };
}

uni!(DynamicArray<T>, DynamicArray<U>);

uni!(DynamicArray<T>, Vec<U>);
uni!(DynamicArray<T>, [U]);
uni!(DynamicArray<T>, &[U]);
uni!(DynamicArray<T>, &mut [U]);
uni!(DynamicArray<T>, [U; N], const N: usize);
uni!(DynamicArray<T>, &[U; N], const N: usize);

uni!(Vec<T>, DynamicArray<U>);
uni!([T], DynamicArray<U>);
uni!(&[T], DynamicArray<U>);
uni!(&mut [T], DynamicArray<U>);
uni!([T; N], DynamicArray<U>, const N: usize);

impl<T> Eq for DynamicArray<T> where T: Eq {}

#[cfg(test)]
mod tests {
    use crate::{DynamicArray, dyn_array};

    #[test]
    fn compares_against_other_sequences() {
        let array = dyn_array![1, 2, 3];
        assert_eq!(array, vec![1, 2, 3]);
        assert_eq!(vec![1, 2, 3], array);
        assert_eq!(array, [1, 2, 3]);
        assert_eq!([1, 2, 3], array);
        assert_eq!(array, &[1, 2, 3][..]);
        assert_eq!(&[1, 2, 3][..], array);
        assert_ne!(array, [1, 2]);
    }

    #[test]
    fn compares_across_element_types() {
        let owned: DynamicArray<String> = dyn_array!["a".to_string(), "b".to_string()];
        assert_eq!(owned, ["a", "b"]);
    }
}
