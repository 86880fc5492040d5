use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Split the items into `folds` partitions using a generator seeded with `seed`.
///
/// Items are drawn uniformly at random from a private working copy, one at a time, and dealt to
/// the folds in round-robin order until the copy is exhausted. Every item lands in exactly one
/// fold, fold sizes differ by at most one, and the same seed and input order always produce the
/// same folds. Zero folds yields no partitions.
pub fn partition<T: Clone>(items: &[T], folds: usize, seed: u64) -> Vec<Vec<T>> {
    if folds == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut pool = items.to_vec();
    let mut partitions: Vec<Vec<T>> = (0..folds)
        .map(|_| Vec::with_capacity(items.len() / folds + 1))
        .collect();

    let mut current = 0;
    while !pool.is_empty() {
        let index = rng.gen_range(0..pool.len());
        partitions[current].push(pool.swap_remove(index));

        current = (current + 1) % folds;
    }

    debug!(
        "Partitioned {} items into {} folds of sizes {:?}",
        items.len(),
        folds,
        partitions.iter().map(Vec::len).collect::<Vec<_>>()
    );

    partitions
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_partition_is_complete() {
        for size in [0, 1, 7, 10, 23] {
            for folds in 1..=6 {
                let items: Vec<usize> = (0..size).collect();

                let partitions = partition(&items, folds, 4);

                assert_eq!(partitions.len(), folds);

                let mut all: Vec<usize> = partitions.iter().flatten().copied().collect();
                all.sort_unstable();
                assert_eq!(all, items);

                let sizes: Vec<usize> = partitions.iter().map(Vec::len).collect();
                let max = sizes.iter().max().unwrap();
                let min = sizes.iter().min().unwrap();
                assert!(max - min <= 1, "unbalanced folds: {:?}", sizes);
            }
        }
    }

    #[test]
    fn test_partition_is_deterministic() {
        let items: Vec<String> = (0..50).map(|i| format!("item-{}", i)).collect();

        assert_eq!(partition(&items, 5, 42), partition(&items, 5, 42));
        assert_ne!(partition(&items, 5, 42), partition(&items, 5, 43));
    }

    #[test]
    fn test_partition_leaves_input_untouched() {
        let items = vec![3, 1, 2];

        let _ = partition(&items, 2, 1);

        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn test_partition_without_folds() {
        assert!(partition(&[1, 2, 3], 0, 1).is_empty());
    }
}
