//! Reductions from a population to a single value.

pub mod sum;

pub use sum::sum_pop;
