//! [Linear Search]: Method for finding an element within a list. It
//! sequentially checks each element of the list until a match is found or the
//! whole list has been searched.
//!
//! Hash table buckets are short, unordered chains, so every bucket lookup in
//! this crate goes through [`linear_search_by`].
//!
//! [Linear Search]: https://en.wikipedia.org/wiki/Linear_search

/// Returns the index of the first element for which `pred` returns `true`,
/// or [`None`] if no element matches.
///
/// # Time Complexity
///
/// Takes *O*(*n*) time. Linear search sequentially checks each element of the
/// list until a match is found or the whole list has been searched.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// let chain = [(11, "a"), (4, "b"), (30, "c"), (4, "d")];
///
/// assert_eq!(linear_search_by(&chain, |(k, _)| *k == 4), Some(1));
/// assert_eq!(linear_search_by(&chain, |(k, _)| *k == 40), None);
/// ```
pub fn linear_search_by<T, F>(arr: &[T], mut pred: F) -> Option<usize>
where
    F: FnMut(&T) -> bool,
{
    for (i, elem) in arr.iter().enumerate() {
        if pred(elem) {
            return Some(i);
        }
    }

    None
}

/// Returns the index of the first `(key, value)` pair whose key equals `key`.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// let chain = [(7, 'x'), (9, 'y')];
///
/// assert_eq!(linear_search_key(&chain, &9), Some(1));
/// assert_eq!(linear_search_key(&chain, &8), None);
/// ```
#[inline]
pub fn linear_search_key<K: PartialEq, V>(arr: &[(K, V)], key: &K) -> Option<usize> {
    linear_search_by(arr, |(k, _)| k == key)
}
