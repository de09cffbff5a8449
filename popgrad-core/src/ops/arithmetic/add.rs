use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::arithmetic::prepare_binary;
use crate::ops::operand::Operand;

// --- Backward Operation Structure ---

/// Backward context for addition. The local derivative is 1 for both inputs,
/// so nothing from the forward pass needs to be kept.
#[derive(Debug, Clone)]
pub struct AddBackward;

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        Ok(vec![grad_output.to_vec(), grad_output.to_vec()])
    }
}

// --- Forward Operation ---

/// Elementwise sum `out[i] = a[i] + b[i]`.
///
/// A size-one operand is broadcast against a larger one.
///
/// # Errors
/// `ShapeMismatch` when the sizes differ and neither is 1.
pub fn add(a: impl Into<Operand>, b: impl Into<Operand>) -> Result<Node, PopGradError> {
    let (a, b) = prepare_binary(a, b, "add")?;
    let result_data: Vec<f64> = {
        let (a_guard, b_guard) = (a.read_data(), b.read_data());
        a_guard
            .data()
            .iter()
            .zip(b_guard.data())
            .map(|(x, y)| x + y)
            .collect()
    };
    Ok(Node::from_op(result_data, vec![a, b], GradFn::Add(AddBackward)))
}

// --- Tests ---
#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
