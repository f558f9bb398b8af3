use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `len` items drawn uniformly from `0..max_value`; identical for identical arguments.
///
/// `max_value` below 1 is treated as 1.
pub fn random_sample(seed: u64, len: usize, max_value: i64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bound = max_value.max(1);
    (0..len).map(|_| rng.gen_range(0..bound)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sample() {
        assert_eq!(random_sample(7, 32, 100), random_sample(7, 32, 100));
        assert_ne!(random_sample(7, 32, 100), random_sample(8, 32, 100));
    }

    #[test]
    fn values_stay_in_range() {
        assert!(random_sample(1, 500, 10).iter().all(|v| (0..10).contains(v)));
        assert!(random_sample(1, 5, 0).iter().all(|v| *v == 0));
    }
}
