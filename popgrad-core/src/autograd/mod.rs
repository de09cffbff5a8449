//! # Reverse-mode autodiff
//!
//! - [`backward_op`]: the `BackwardOp` trait and the `GradFn` tagged dispatch.
//! - [`graph`]: topological ordering, the reverse traversal (`backprop`) and
//!   graph-wide gradient reset.
//! - [`grad_check`]: finite-difference verification of backward rules.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

use std::fmt;

pub use backward_op::{BackwardOp, GradFn};
pub use graph::{backprop, backprop_with_hook, topological_order, zero_grad_graph};

/// How the root's gradient is seeded before the reverse traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Seed {
    /// `[1.0]` for a size-one root, a vector of ones otherwise
    /// (an implicit sum-of-components objective).
    #[default]
    Ones,
    /// Caller-supplied upstream gradient. Must match the root's size.
    Explicit(Vec<f64>),
}

impl Seed {
    /// Materialises the seed vector for a root of `numel` elements.
    pub(crate) fn resolve(&self, numel: usize) -> Result<Vec<f64>, crate::error::PopGradError> {
        match self {
            Seed::Ones if numel == 1 => Ok(vec![1.0]),
            Seed::Ones => Ok(vec![1.0; numel]),
            Seed::Explicit(values) => {
                if values.len() != numel {
                    return Err(crate::error::PopGradError::shape_mismatch(
                        numel,
                        values.len(),
                        "backprop seed",
                    ));
                }
                Ok(values.clone())
            }
        }
    }
}

/// Snapshot of one node, reported after its backward rule ran.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub op: String,
    pub value: Vec<f64>,
    pub grad: Vec<f64>,
    pub parent_values: Vec<Vec<f64>>,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[NODE] op={}, value={:?}, grad={:?} | <-- parents={:?}",
            self.op, self.value, self.grad, self.parent_values
        )
    }
}
