//! Initialisers producing fresh [`Parameter`]s.
//!
//! Random initialisers take the RNG explicitly so that callers (and tests)
//! control seeding.

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::error::PopGradError;
use crate::nn::parameter::Parameter;

fn check_len(len: usize, operation: &str) -> Result<(), PopGradError> {
    if len == 0 {
        return Err(PopGradError::EmptyPopulation {
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// A parameter of `len` zeros.
pub fn zeros(len: usize) -> Result<Parameter, PopGradError> {
    full(len, 0.0)
}

/// A parameter of `len` copies of `value`.
pub fn full(len: usize, value: f64) -> Result<Parameter, PopGradError> {
    check_len(len, "init::full")?;
    Parameter::new(vec![value; len])
}

/// A parameter sampled from `N(mean, std^2)`.
///
/// # Errors
/// `InvalidInitialization` if `std` is negative or NaN.
pub fn normal<R: Rng + ?Sized>(
    len: usize,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<Parameter, PopGradError> {
    check_len(len, "init::normal")?;
    let dist = Normal::new(mean, std).map_err(|e| {
        PopGradError::InvalidInitialization(format!("normal(mean={}, std={}): {}", mean, std, e))
    })?;
    Parameter::new((0..len).map(|_| dist.sample(rng)).collect::<Vec<f64>>())
}

/// A parameter sampled uniformly from `[low, high)`.
///
/// # Errors
/// `InvalidInitialization` unless `low < high` and both bounds are finite.
pub fn uniform<R: Rng + ?Sized>(
    len: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Parameter, PopGradError> {
    check_len(len, "init::uniform")?;
    if low >= high || !low.is_finite() || !high.is_finite() {
        return Err(PopGradError::InvalidInitialization(format!(
            "uniform requires finite low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    Parameter::new((0..len).map(|_| dist.sample(rng)).collect::<Vec<f64>>())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
