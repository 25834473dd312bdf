//! Lazy permutation enumeration (iterative Heap's algorithm).

/// All orderings of a fixed sequence, one swap per step.
///
/// The identity ordering comes first and the sequence ends after `n!`
/// orderings. [`advance`](Self::advance) lends the current ordering without
/// allocating; the [`Iterator`] impl yields owned copies.
///
/// # Example
///
/// ```
/// use fairslot_solver::permutation::Permutations;
///
/// let orderings: Vec<Vec<u8>> = Permutations::new(vec![1, 2, 3]).collect();
/// assert_eq!(orderings.len(), 6);
/// assert_eq!(orderings[0], vec![1, 2, 3]);
/// assert_eq!(orderings[1], vec![2, 1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    original: Vec<T>,
    current: Vec<T>,
    counters: Vec<usize>,
    position: usize,
    started: bool,
}

impl<T: Clone> Permutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let n = items.len();
        Self {
            current: items.clone(),
            original: items,
            counters: vec![0; n],
            position: 1,
            started: false,
        }
    }

    /// Number of elements being permuted.
    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Steps to the next ordering and lends it, or returns `None` when done.
    pub fn advance(&mut self) -> Option<&[T]> {
        if !self.started {
            self.started = true;
            return Some(&self.current);
        }
        let n = self.current.len();
        while self.position < n {
            let i = self.position;
            if self.counters[i] < i {
                let k = if i % 2 == 1 { self.counters[i] } else { 0 };
                self.current.swap(i, k);
                self.counters[i] += 1;
                self.position = 1;
                return Some(&self.current);
            }
            self.counters[i] = 0;
            self.position += 1;
        }
        None
    }

    /// Restarts from the identity ordering.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.original);
        self.counters.iter_mut().for_each(|c| *c = 0);
        self.position = 1;
        self.started = false;
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        self.advance().map(<[T]>::to_vec)
    }
}

/// `n!`, or `None` if it does not fit in a `u64`.
pub fn permutation_count(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_yields_n_factorial_distinct_orderings() {
        for n in 0..=7usize {
            let items: Vec<usize> = (0..n).collect();
            let orderings: Vec<Vec<usize>> = Permutations::new(items.clone()).collect();
            assert_eq!(orderings.len() as u64, permutation_count(n).unwrap());

            let distinct: HashSet<_> = orderings.iter().cloned().collect();
            assert_eq!(distinct.len(), orderings.len(), "repeats for n = {n}");

            for ordering in &orderings {
                let mut sorted = ordering.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, items);
            }
        }
    }

    #[test]
    fn test_identity_first() {
        let mut perms = Permutations::new(vec!['a', 'b', 'c', 'd']);
        assert_eq!(perms.advance(), Some(&['a', 'b', 'c', 'd'][..]));
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let mut perms = Permutations::new(vec![1, 2]);
        assert!(perms.advance().is_some());
        assert!(perms.advance().is_some());
        assert!(perms.advance().is_none());
        assert!(perms.advance().is_none());
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut perms = Permutations::new(vec![3, 1, 2]);
        let first: Vec<Vec<i32>> = perms.by_ref().collect();
        perms.reset();
        let second: Vec<Vec<i32>> = perms.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_items_keep_positions() {
        // orderings are distinct by position, not by value
        let count = Permutations::new(vec![5, 5, 6]).count();
        assert_eq!(count, 6);
    }

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutation_count(0), Some(1));
        assert_eq!(permutation_count(12), Some(479_001_600));
        assert_eq!(permutation_count(20), Some(2_432_902_008_176_640_000));
        assert_eq!(permutation_count(21), None);
    }
}
