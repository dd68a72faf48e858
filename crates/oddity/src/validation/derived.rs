//! Detection of unintended odd-one-out answers.

use std::fmt;

use indexmap::IndexMap;
use log::trace;

/// One answer option: property name to value, in a stable property order.
pub type OptionRecord = IndexMap<String, String>;

type ExtractFn = dyn Fn(&OptionRecord) -> Option<String> + Send + Sync;

/// A property read from, or computed over, an option.
///
/// Besides the parameters an option is generated from, a question may have
/// properties derived from several of them (say, the total number of sides
/// drawn). Those can single out an option just as well.
pub struct DerivedProperty {
    name: String,
    extract: Box<ExtractFn>,
}

impl DerivedProperty {
    /// A property computed by `extract`; returning `None` declines, and the
    /// property is then not checked.
    pub fn new(
        name: impl Into<String>,
        extract: impl Fn(&OptionRecord) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            extract: Box::new(extract),
        }
    }

    /// The option's own value for `name`.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = name.clone();
        Self::new(name, move |option| option.get(&key).cloned())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, option: &OptionRecord) -> Option<String> {
        (self.extract)(option)
    }
}

impl fmt::Debug for DerivedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedProperty")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A property whose values single out one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub property: String,
    /// Index of the option that differs
    pub answer_index: usize,
    /// The differing option's value
    pub value: String,
    /// The value every other option shares
    pub common_value: String,
}

/// Reports every property for which all options but one share a value.
///
/// The caller decides which conflicts are intended: the differentiator
/// isolating the correct answer is one of them.
///
/// # Examples
///
/// ```
/// # use oddity::validation::{DerivedProperty, OptionRecord, check_derived_parameters};
/// let options: Vec<OptionRecord> = ["a", "a", "a", "a", "b"]
///     .iter()
///     .map(|v| [("shading".to_string(), v.to_string())].into_iter().collect())
///     .collect();
/// let conflicts = check_derived_parameters(&options, &[DerivedProperty::field("shading")]);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].answer_index, 4);
/// assert_eq!(conflicts[0].common_value, "a");
/// ```
pub fn check_derived_parameters<'a>(
    options: &[OptionRecord],
    properties: impl IntoIterator<Item = &'a DerivedProperty>,
) -> Vec<Conflict> {
    let n = options.len();
    if n < 3 {
        return Vec::new();
    }

    let mut conflicts = Vec::new();
    for property in properties {
        let Some(values) = options
            .iter()
            .map(|option| property.extract(option))
            .collect::<Option<Vec<String>>>()
        else {
            trace!(property = property.name(); "Property declined, skipped");
            continue;
        };

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in &values {
            *counts.entry(value.as_str()).or_default() += 1;
        }
        let Some(common) = counts.iter().find(|&(_, &c)| c == n - 1).map(|(v, _)| *v) else {
            continue;
        };
        let Some(odd) = counts.iter().find(|&(_, &c)| c == 1).map(|(v, _)| *v) else {
            continue;
        };
        let Some(answer_index) = values.iter().position(|v| v == odd) else {
            continue;
        };
        conflicts.push(Conflict {
            property: property.name().to_string(),
            answer_index,
            value: odd.to_string(),
            common_value: common.to_string(),
        });
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(property: &str, values: &[&str]) -> Vec<OptionRecord> {
        values
            .iter()
            .map(|v| {
                let mut record = OptionRecord::new();
                record.insert(property.to_string(), v.to_string());
                record
            })
            .collect()
    }

    #[test]
    fn test_single_odd_value_is_a_conflict() {
        let options = options("count", &["3", "3", "5", "3", "3"]);
        let conflicts = check_derived_parameters(&options, &[DerivedProperty::field("count")]);
        assert_eq!(
            conflicts,
            vec![Conflict {
                property: "count".to_string(),
                answer_index: 2,
                value: "5".to_string(),
                common_value: "3".to_string(),
            }]
        );
    }

    #[test]
    fn test_two_two_one_is_not_a_conflict() {
        let options = options("shape", &["a", "a", "b", "b", "c"]);
        assert!(check_derived_parameters(&options, &[DerivedProperty::field("shape")]).is_empty());
    }

    #[test]
    fn test_all_distinct_is_not_a_conflict() {
        let options = options("shape", &["a", "b", "c", "d", "e"]);
        assert!(check_derived_parameters(&options, &[DerivedProperty::field("shape")]).is_empty());
    }

    #[test]
    fn test_declining_property_is_skipped() {
        let options = options("count", &["1", "1", "1", "2"]);
        let missing = DerivedProperty::field("colour");
        assert!(check_derived_parameters(&options, &[missing]).is_empty());
    }

    #[test]
    fn test_computed_property() {
        let options = options("count", &["2", "4", "6", "3"]);
        let parity = DerivedProperty::new("parity", |option| {
            let count: u32 = option.get("count")?.parse().ok()?;
            Some(if count % 2 == 0 { "even" } else { "odd" }.to_string())
        });
        let conflicts = check_derived_parameters(&options, &[parity]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].answer_index, 3);
        assert_eq!(conflicts[0].value, "odd");
    }
}
