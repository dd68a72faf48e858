//! Generation of answer option sets with a single intended odd one out.

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom};

use super::{
    derived::{DerivedProperty, OptionRecord, check_derived_parameters},
    frequency::{Frequency, weighted_choice},
    split::{allowed_splits, assign_split_to_indices, random_index, sample_split},
};
use crate::error::OddityError;

const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// A parameter that takes different values across the options.
#[derive(Debug, Clone, PartialEq)]
pub struct Variator {
    name: String,
    pool: Vec<String>,
    frequency: Frequency,
}

impl Variator {
    /// A variator drawing its values from `pool`, duplicates removed.
    pub fn new(name: impl Into<String>, pool: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut values: Vec<String> = Vec::new();
        for value in pool {
            let value = value.into();
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Self {
            name: name.into(),
            pool: values,
            frequency: Frequency::default(),
        }
    }

    /// Sets how often this variator is picked as the differentiator.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Value index per option: `answer_index` alone gets value 1 when this is
    /// the differentiator, otherwise an allowed split bounded by the pool.
    fn value_indices(
        &self,
        option_count: usize,
        differentiator: Option<usize>,
        rng: &mut StdRng,
    ) -> Result<Vec<usize>, OddityError> {
        if let Some(answer_index) = differentiator {
            let mut indices = vec![0; option_count];
            indices[answer_index] = 1;
            return Ok(indices);
        }
        if self.pool.len() < 2 {
            return Ok(vec![0; option_count]);
        }
        let split = sample_split(option_count, Some(self.pool.len()), rng)?;
        assign_split_to_indices(split, option_count, rng)
    }
}

/// A generated set of options.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
    options: Vec<OptionRecord>,
    differentiator: String,
    answer_index: usize,
}

impl OptionSet {
    pub fn options(&self) -> &[OptionRecord] {
        &self.options
    }

    /// Name of the variator that singles out the answer
    pub fn differentiator(&self) -> &str {
        &self.differentiator
    }

    pub fn answer_index(&self) -> usize {
        self.answer_index
    }

    pub fn answer(&self) -> &OptionRecord {
        &self.options[self.answer_index]
    }
}

/// Assigns variator values to a fixed number of options so that exactly one
/// option is the odd one out, for exactly one reason.
///
/// Each attempt picks a differentiator (weighted by [`Frequency`]) and an
/// answer index, gives the differentiator a (N-1):1 split and every other
/// variator an allowed split. The attempt is rejected when two options are
/// identical or when any variator or derived property other than the
/// differentiator singles out an option.
///
/// # Examples
///
/// ```
/// # use oddity::validation::{OptionSetGenerator, Variator};
/// # use rand::{SeedableRng, rngs::StdRng};
/// let generator = OptionSetGenerator::new(
///     5,
///     vec![
///         Variator::new("shape", ["circle", "square", "triangle", "pentagon"]),
///         Variator::new("shading", ["white", "grey", "black"]),
///     ],
/// )
/// .unwrap();
///
/// let set = generator.generate(&mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(set.options().len(), 5);
/// ```
#[derive(Debug)]
pub struct OptionSetGenerator {
    option_count: usize,
    variators: Vec<Variator>,
    derived: Vec<DerivedProperty>,
    max_attempts: usize,
}

impl OptionSetGenerator {
    /// Creates a generator for `option_count` options.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::ConstraintUnsatisfiable`] when `option_count`
    /// has no allowed splits, when no variator has two or more values, or
    /// when two variators share a name.
    pub fn new(option_count: usize, variators: Vec<Variator>) -> Result<Self, OddityError> {
        if allowed_splits(option_count).is_none() {
            return Err(OddityError::unsatisfiable(format!(
                "option sets of {option_count} are not supported"
            )));
        }
        if !variators.iter().any(|v| v.pool().len() >= 2) {
            return Err(OddityError::unsatisfiable(
                "no variator has two values to differentiate with",
            ));
        }
        for (i, variator) in variators.iter().enumerate() {
            if variators[..i].iter().any(|other| other.name() == variator.name()) {
                return Err(OddityError::unsatisfiable(format!(
                    "variator `{}` defined twice",
                    variator.name()
                )));
            }
        }
        Ok(Self {
            option_count,
            variators,
            derived: Vec::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Adds a property computed over whole options that must not single out
    /// an option either.
    pub fn with_derived(mut self, property: DerivedProperty) -> Self {
        self.derived.push(property);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    pub fn variators(&self) -> &[Variator] {
        &self.variators
    }

    /// Generates one option set.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::ConstraintUnsatisfiable`] when every attempt is
    /// rejected.
    pub fn generate(&self, rng: &mut StdRng) -> Result<OptionSet, OddityError> {
        let candidates: Vec<(usize, Frequency)> = self
            .variators
            .iter()
            .enumerate()
            .filter(|(_, v)| v.pool().len() >= 2)
            .map(|(i, v)| (i, v.frequency()))
            .collect();

        let fields: Vec<DerivedProperty> = self
            .variators
            .iter()
            .map(|v| DerivedProperty::field(v.name()))
            .collect();

        for attempt in 1..=self.max_attempts {
            let differentiator = *weighted_choice(rng, &candidates)?;
            let answer_index = random_index(self.option_count, rng);

            let mut options = vec![OptionRecord::new(); self.option_count];
            for (i, variator) in self.variators.iter().enumerate() {
                let indices = variator.value_indices(
                    self.option_count,
                    (i == differentiator).then_some(answer_index),
                    rng,
                )?;
                let mut values = variator.pool().to_vec();
                values.shuffle(rng);
                for (option, &index) in options.iter_mut().zip(&indices) {
                    option.insert(variator.name().to_string(), values[index].clone());
                }
            }

            if has_duplicates(&options) {
                trace!(attempt; "Rejected: duplicate options");
                continue;
            }

            let differentiator_name = self.variators[differentiator].name();
            let conflicts = check_derived_parameters(&options, fields.iter().chain(&self.derived));
            let unintended = conflicts
                .iter()
                .find(|c| !(c.property == differentiator_name && c.answer_index == answer_index));
            if let Some(conflict) = unintended {
                trace!(
                    attempt,
                    property = conflict.property,
                    index = conflict.answer_index;
                    "Rejected: unintended odd one out"
                );
                continue;
            }

            debug!(
                attempt,
                differentiator = differentiator_name,
                answer_index;
                "Option set generated"
            );
            return Ok(OptionSet {
                options,
                differentiator: differentiator_name.to_string(),
                answer_index,
            });
        }

        Err(OddityError::unsatisfiable(format!(
            "no valid option set of {} after {} attempts",
            self.option_count, self.max_attempts
        )))
    }
}

fn has_duplicates(options: &[OptionRecord]) -> bool {
    options
        .iter()
        .enumerate()
        .any(|(i, option)| options[..i].contains(option))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn generator() -> OptionSetGenerator {
        OptionSetGenerator::new(
            5,
            vec![
                Variator::new("shape", ["circle", "square", "triangle", "pentagon", "hexagon"]),
                Variator::new("shading", ["white", "grey", "black"]),
                Variator::new("line", ["solid", "dashed"]).with_frequency(Frequency::Rare),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_variator_dedups_pool() {
        let variator = Variator::new("shape", ["circle", "circle", "square"]);
        assert_eq!(variator.pool(), ["circle", "square"]);
    }

    #[test]
    fn test_new_rejects_bad_setups() {
        let one_value = vec![Variator::new("shape", ["circle"])];
        assert!(OptionSetGenerator::new(5, one_value).is_err());

        let shapes = vec![Variator::new("shape", ["circle", "square"])];
        assert!(OptionSetGenerator::new(3, shapes.clone()).is_err());

        let twice = vec![shapes[0].clone(), shapes[0].clone()];
        assert!(matches!(
            OptionSetGenerator::new(5, twice),
            Err(OddityError::ConstraintUnsatisfiable(_))
        ));
    }

    #[test]
    fn test_generated_set_has_single_odd_one_out() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(21);
        let set = generator.generate(&mut rng).unwrap();

        let differentiator = set.differentiator();
        let answer = set.answer_index();
        let answer_value = &set.answer()[differentiator];
        for (i, option) in set.options().iter().enumerate() {
            if i != answer {
                assert_ne!(&option[differentiator], answer_value);
                assert_eq!(&option[differentiator], &set.options()[(answer + 1) % 5][differentiator]);
            }
        }

        let fields: Vec<_> = ["shape", "shading", "line"]
            .into_iter()
            .map(DerivedProperty::field)
            .collect();
        let conflicts = check_derived_parameters(set.options(), &fields);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].property, differentiator);
    }

    #[test]
    fn test_constant_variator_stays_constant() {
        let generator = OptionSetGenerator::new(
            4,
            vec![
                Variator::new("shape", ["circle", "square", "star"]),
                Variator::new("colour", ["black"]),
                Variator::new("size", ["small", "large"]),
            ],
        )
        .unwrap();
        let set = generator.generate(&mut StdRng::seed_from_u64(5)).unwrap();
        assert!(set.options().iter().all(|o| o["colour"] == "black"));
        assert_ne!(set.differentiator(), "colour");
    }

    #[test]
    fn test_echoing_derived_property_exhausts() {
        // Repeats the only possible differentiator under another name
        let echo = DerivedProperty::new("shape echo", |option| option.get("shape").cloned());
        let generator = OptionSetGenerator::new(4, vec![Variator::new("shape", ["circle", "square"])])
            .unwrap()
            .with_derived(echo)
            .with_max_attempts(20);

        let err = generator.generate(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, OddityError::ConstraintUnsatisfiable(_)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = generator();
        let a = generator.generate(&mut StdRng::seed_from_u64(99)).unwrap();
        let b = generator.generate(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;

    // ===================
    // Property Test Functions
    // ===================

    /// Options are pairwise distinct and only the differentiator isolates
    /// the answer.
    fn check_option_set(seed: u64, option_count: usize) -> Result<(), TestCaseError> {
        let generator = OptionSetGenerator::new(
            option_count,
            vec![
                Variator::new("shape", ["circle", "square", "triangle", "pentagon", "hexagon", "star"]),
                Variator::new("shading", ["white", "grey", "black", "slash"]),
                Variator::new("count", ["1", "2", "3"]).with_frequency(Frequency::Uncommon),
            ],
        )
        .unwrap();
        let set = generator.generate(&mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(set.options().len(), option_count);
        prop_assert!(!has_duplicates(set.options()));

        let fields: Vec<_> = ["shape", "shading", "count"]
            .into_iter()
            .map(DerivedProperty::field)
            .collect();
        let conflicts = check_derived_parameters(set.options(), &fields);
        prop_assert_eq!(conflicts.len(), 1);
        prop_assert_eq!(&conflicts[0].property, set.differentiator());
        prop_assert_eq!(conflicts[0].answer_index, set.answer_index());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn option_set(seed in any::<u64>(), option_count in 4usize..=6) {
            check_option_set(seed, option_count)?;
        }
    }
}
