//! Allowed value splits for parameters that must not single out an option.
//!
//! A split lists how many options share each value, e.g. `[2, 3]` for five
//! options: one value on two options, another on three. No allowed split
//! leaves exactly one option different from all the others.

use rand::{
    Rng,
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
};

use crate::error::OddityError;

const FOUR_OPTIONS: &[&[usize]] = &[&[2, 2], &[2, 1, 1]];

const FIVE_OPTIONS: &[&[usize]] = &[
    &[2, 3],
    &[3, 1, 1],
    &[2, 2, 1],
    &[2, 1, 1, 1],
    &[1, 1, 1, 1, 1],
];

const SIX_OPTIONS: &[&[usize]] = &[
    &[3, 3],
    &[2, 2, 2],
    &[4, 2],
    &[4, 1, 1],
    &[3, 2, 1],
    &[3, 1, 1, 1],
    &[2, 2, 1, 1],
    &[2, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1],
];

/// Every allowed split for `option_count` options, or `None` when that
/// number of options is not supported.
pub fn allowed_splits(option_count: usize) -> Option<&'static [&'static [usize]]> {
    match option_count {
        4 => Some(FOUR_OPTIONS),
        5 => Some(FIVE_OPTIONS),
        6 => Some(SIX_OPTIONS),
        _ => None,
    }
}

/// Picks an allowed split for `option_count` options.
///
/// # Arguments
///
/// * `max_values` - Only consider splits needing at most this many distinct
///   values, e.g. the size of the parameter's value pool.
///
/// # Errors
///
/// Returns [`OddityError::ConstraintUnsatisfiable`] for an unsupported
/// option count or when no split fits within `max_values`.
///
/// # Examples
///
/// ```
/// # use oddity::validation::sample_split;
/// # use rand::{SeedableRng, rngs::StdRng};
/// let mut rng = StdRng::seed_from_u64(1);
/// let split = sample_split(5, Some(2), &mut rng).unwrap();
/// assert_eq!(split, &[2, 3]);
/// ```
pub fn sample_split(
    option_count: usize,
    max_values: Option<usize>,
    rng: &mut StdRng,
) -> Result<&'static [usize], OddityError> {
    let splits = allowed_splits(option_count).ok_or_else(|| {
        OddityError::unsatisfiable(format!("no allowed splits for {option_count} options"))
    })?;
    let candidates: Vec<&'static [usize]> = splits
        .iter()
        .copied()
        .filter(|split| max_values.is_none_or(|max| split.len() <= max))
        .collect();
    candidates.choose(rng).copied().ok_or_else(|| {
        OddityError::unsatisfiable(format!(
            "no allowed split for {option_count} options with at most {} values",
            max_values.unwrap_or_default()
        ))
    })
}

/// Assigns a value index to each of `option_count` options so that value
/// `i` is used by exactly `split[i]` options, in random order.
///
/// # Errors
///
/// Returns [`OddityError::ConstraintUnsatisfiable`] when the split does not
/// add up to `option_count`.
pub fn assign_split_to_indices(
    split: &[usize],
    option_count: usize,
    rng: &mut StdRng,
) -> Result<Vec<usize>, OddityError> {
    let total: usize = split.iter().sum();
    if total != option_count {
        return Err(OddityError::unsatisfiable(format!(
            "split {split:?} covers {total} options, expected {option_count}"
        )));
    }
    let mut indices: Vec<usize> = split
        .iter()
        .enumerate()
        .flat_map(|(value, &count)| std::iter::repeat_n(value, count))
        .collect();
    indices.shuffle(rng);
    Ok(indices)
}

/// A uniformly chosen option index
pub(super) fn random_index(option_count: usize, rng: &mut StdRng) -> usize {
    rng.random_range(0..option_count)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;

    // ===================
    // Property Test Functions
    // ===================

    /// Five-option splits never single out one option and assignments match
    /// their split.
    fn check_five_option_assignment(seed: u64) -> Result<(), TestCaseError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let split = sample_split(5, None, &mut rng).unwrap();
        prop_assert_ne!(split, &[4, 1][..]);
        prop_assert_ne!(split, &[1, 4][..]);

        let indices = assign_split_to_indices(split, 5, &mut rng).unwrap();
        for (value, &count) in split.iter().enumerate() {
            prop_assert_eq!(indices.iter().filter(|&&i| i == value).count(), count);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn five_option_assignment(seed in any::<u64>()) {
            check_five_option_assignment(seed)?;
        }
    }
}
