//! Combinatorial validation of answer options.
//!
//! A question shows N options, one of which is the odd one out. Every
//! parameter that varies across options must do so without accidentally
//! singling out a second option:
//!
//! - [`sample_split`] and [`assign_split_to_indices`] give non-differentiating
//!   parameters a value distribution where no option stands alone against
//!   all others.
//! - [`check_derived_parameters`] finds properties, including ones computed
//!   over several parameters, that still isolate an option.
//! - [`OptionSetGenerator`] combines both in a bounded rejection loop.

mod derived;
mod frequency;
mod options;
mod split;

pub use derived::{Conflict, DerivedProperty, OptionRecord, check_derived_parameters};
pub use frequency::{Frequency, weighted_choice};
pub use options::{OptionSet, OptionSetGenerator, Variator};
pub use split::{allowed_splits, assign_split_to_indices, sample_split};
