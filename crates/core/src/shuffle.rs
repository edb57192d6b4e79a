use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
///
/// Uses Fisher–Yates: walking from the last index down to 1, each slot is
/// swapped with a position drawn uniformly from `[0, i]`.
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    out.as_mut_slice().shuffle(rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn input_is_not_mutated() {
        let input = vec![1, 2, 3, 4, 5];
        let mut rng = StdRng::seed_from_u64(7);
        let out = shuffled(&input, &mut rng);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);

        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn empty_and_single_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&["only"], &mut rng), vec!["only"]);
    }

    #[test]
    fn every_ordering_is_equally_likely() {
        // 4! = 24 orderings; chi-square with 23 degrees of freedom.
        const TRIALS: usize = 48_000;
        let input = [0_u8, 1, 2, 3];
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..TRIALS {
            *counts.entry(shuffled(&input, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 24, "all permutations must appear");
        let expected = TRIALS as f64 / 24.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // p = 0.001 critical value for 23 dof is ~49.7.
        assert!(chi_square < 49.7, "chi-square too large: {chi_square}");
    }
}
