//! Stable re-ordering by insertion sequence
//!
//! After a priority drain the entries come out in served order. These helpers
//! put them back into submission order.
//!
//! The sort is a straight insertion sort: O(n) on already-ordered input, O(n²)
//! in general. It is meant for small batches of records; for large inputs use
//! `slice::sort_by_key`, which is also stable.

use crate::traits::Sequenced;

/// Sorts `items` in place by ascending `key`, keeping equal keys in their
/// current relative order
///
/// # Example
///
/// ```rust
/// use triage_queue::sort::stable_sort_by_key;
///
/// let mut words = vec!["pear", "fig", "apple", "kiwi"];
/// stable_sort_by_key(&mut words, |w| w.len());
/// assert_eq!(words, vec!["fig", "pear", "kiwi", "apple"]);
/// ```
pub fn stable_sort_by_key<T, K, F>(items: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    for i in 1..items.len() {
        let mut j = i;
        // Strict comparison: an equal key never moves past its predecessor
        while j > 0 && key(&items[j]) < key(&items[j - 1]) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sorts `items` in place by ascending insertion sequence number
pub fn sort_by_sequence<S: Sequenced>(items: &mut [S]) {
    stable_sort_by_key(items, |item| item.sequence());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::HeapEntry;

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<i32> = Vec::new();
        stable_sort_by_key(&mut empty, |x| *x);
        assert!(empty.is_empty());

        let mut single = vec![42];
        stable_sort_by_key(&mut single, |x| *x);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_equal_keys_keep_order() {
        let mut pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        stable_sort_by_key(&mut pairs, |(k, _)| *k);
        assert_eq!(pairs, vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_reverse_input() {
        let mut values: Vec<u32> = (0..50).rev().collect();
        stable_sort_by_key(&mut values, |x| *x);
        assert_eq!(values, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_by_sequence_restores_submission_order() {
        let mut entries = vec![
            HeapEntry::new(1, "b", 2),
            HeapEntry::new(2, "c", 3),
            HeapEntry::new(3, "a", 1),
        ];
        sort_by_sequence(&mut entries);

        let payloads: Vec<&str> = entries.iter().map(|e| *e.payload()).collect();
        assert_eq!(payloads, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_sequence_on_references() {
        let owned = [HeapEntry::new(0, (), 9), HeapEntry::new(0, (), 4)];
        let mut refs: Vec<&HeapEntry<()>> = owned.iter().collect();
        sort_by_sequence(&mut refs);
        assert_eq!(refs[0].sequence(), 4);
        assert_eq!(refs[1].sequence(), 9);
    }
}
