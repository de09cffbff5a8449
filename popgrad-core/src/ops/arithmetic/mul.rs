use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::arithmetic::prepare_binary;
use crate::ops::operand::Operand;

// --- Backward Operation Structure ---

/// Backward context for multiplication.
///
/// Keeps copies of both multiplicands as they were when the product was taken.
#[derive(Debug, Clone)]
pub struct MulBackward {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        // grad_a = grad_output * b
        let grad_a = grad_output.iter().zip(&self.b).map(|(g, b)| b * g).collect();
        // grad_b = grad_output * a
        let grad_b = grad_output.iter().zip(&self.a).map(|(g, a)| a * g).collect();
        Ok(vec![grad_a, grad_b])
    }
}

// --- Forward Operation ---

/// Elementwise product `out[i] = a[i] * b[i]`, with scalar broadcasting.
pub fn mul(a: impl Into<Operand>, b: impl Into<Operand>) -> Result<Node, PopGradError> {
    let (a, b) = prepare_binary(a, b, "mul")?;
    let a_data = a.data();
    let b_data = b.data();
    let result_data = a_data.iter().zip(&b_data).map(|(x, y)| x * y).collect();

    let backward_context = MulBackward {
        a: a_data,
        b: b_data,
    };
    Ok(Node::from_op(
        result_data,
        vec![a, b],
        GradFn::Mul(backward_context),
    ))
}

// --- Tests ---
#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
