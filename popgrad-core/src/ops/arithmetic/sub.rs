use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::arithmetic::prepare_binary;
use crate::ops::operand::Operand;

// --- Backward Operation Structure ---

#[derive(Debug, Clone)]
pub struct SubBackward;

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        let grad_b = grad_output.iter().map(|g| -g).collect();
        Ok(vec![grad_output.to_vec(), grad_b])
    }
}

// --- Forward Operation ---

/// Elementwise difference `out[i] = a[i] - b[i]`, with scalar broadcasting.
pub fn sub(a: impl Into<Operand>, b: impl Into<Operand>) -> Result<Node, PopGradError> {
    let (a, b) = prepare_binary(a, b, "sub")?;
    let result_data: Vec<f64> = {
        let (a_guard, b_guard) = (a.read_data(), b.read_data());
        a_guard
            .data()
            .iter()
            .zip(b_guard.data())
            .map(|(x, y)| x - y)
            .collect()
    };
    Ok(Node::from_op(result_data, vec![a, b], GradFn::Sub(SubBackward)))
}

// --- Tests ---
#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
