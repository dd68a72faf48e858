//! Frequency-weighted random choice.

use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, seq::IndexedRandom};

use crate::error::OddityError;

/// How often a choice should come up relative to its alternatives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Self::Common, Self::Uncommon, Self::Rare];

    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }

    /// Relative weight: common 1, uncommon 1/3, rare 1/10
    pub fn weight(self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Uncommon => 1.0 / 3.0,
            Self::Rare => 1.0 / 10.0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Frequency {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.name() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown frequency `{s}`")))
    }
}

/// Picks one item with probability proportional to its frequency weight.
///
/// # Errors
///
/// Returns [`OddityError::ConstraintUnsatisfiable`] when `choices` is empty.
///
/// # Examples
///
/// ```
/// # use oddity::validation::{Frequency, weighted_choice};
/// # use rand::{SeedableRng, rngs::StdRng};
/// let mut rng = StdRng::seed_from_u64(3);
/// let choices = [("circle", Frequency::Common), ("star", Frequency::Rare)];
/// let picked = weighted_choice(&mut rng, &choices).unwrap();
/// assert!(["circle", "star"].contains(picked));
/// ```
pub fn weighted_choice<'a, T>(rng: &mut StdRng, choices: &'a [(T, Frequency)]) -> Result<&'a T, OddityError> {
    choices
        .choose_weighted(rng, |(_, frequency)| frequency.weight())
        .map(|(item, _)| item)
        .map_err(|err| OddityError::unsatisfiable(format!("cannot make a weighted choice: {err}")))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_weights() {
        assert_eq!(Frequency::Common.weight(), 1.0);
        assert!((Frequency::Uncommon.weight() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(Frequency::Rare.weight(), 0.1);
        assert_eq!(Frequency::default(), Frequency::Common);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" Rare ".parse::<Frequency>().unwrap(), Frequency::Rare);
        assert!("often".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_empty_choices() {
        let mut rng = StdRng::seed_from_u64(0);
        let choices: [(u8, Frequency); 0] = [];
        assert!(matches!(
            weighted_choice(&mut rng, &choices),
            Err(OddityError::ConstraintUnsatisfiable(_))
        ));
    }

    #[test]
    fn test_common_beats_rare() {
        let mut rng = StdRng::seed_from_u64(12);
        let choices = [("common", Frequency::Common), ("rare", Frequency::Rare)];
        let common = (0..2000)
            .filter(|_| *weighted_choice(&mut rng, &choices).unwrap() == "common")
            .count();
        // Expected share is 1 / 1.1, about 1818 of 2000
        assert!(common > 1650 && common < 1950, "{common}");
    }
}
