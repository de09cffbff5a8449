//! Optimizers that update [`Parameter`]s from their accumulated gradients.
//!
//! An optimizer holds an ordered list of parameters. It never triggers
//! backprop itself; callers run the forward/backward pass, then `step`.

use popgrad_core::{Parameter, PopGradError};

pub mod gd;
pub mod momentum;

pub use gd::GD;
pub use momentum::Momentum;

/// Trait for optimization algorithms.
pub trait Optimizer {
    /// Performs a single update of every held parameter, in list order.
    fn step(&mut self) -> Result<(), PopGradError>;

    /// Resets each held parameter's own gradient buffer.
    ///
    /// Only the parameters are touched; intermediate nodes of the graph that
    /// produced the gradients keep theirs. Optimizer state is preserved.
    fn zero_grad(&mut self);

    /// The parameters managed by this optimizer.
    fn params(&self) -> &[Parameter];
}
