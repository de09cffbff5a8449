use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::operand::Operand;

// --- Backward Operation Structure ---

/// Backward context for tanh. Stores the forward output, since
/// `d/dx tanh(x) = 1 - tanh(x)^2`.
#[derive(Debug, Clone)]
pub struct TanhBackward {
    output: Vec<f64>,
}

impl BackwardOp for TanhBackward {
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        let grad_input = grad_output
            .iter()
            .zip(&self.output)
            .map(|(g, y)| (1.0 - y * y) * g)
            .collect();
        Ok(vec![grad_input])
    }
}

// --- Forward Operation ---

pub(crate) fn tanh_node(x: &Node) -> Node {
    let output: Vec<f64> = x.read_data().data().iter().map(|v| v.tanh()).collect();
    let backward_context = TanhBackward {
        output: output.clone(),
    };
    Node::from_op(output, vec![x.clone()], GradFn::Tanh(backward_context))
}

/// Elementwise hyperbolic tangent.
pub fn tanh(x: impl Into<Operand>) -> Result<Node, PopGradError> {
    let x = x.into().into_node("tanh")?;
    Ok(tanh_node(&x))
}

impl Node {
    /// Method form of [`tanh`].
    pub fn tanh(&self) -> Node {
        tanh_node(self)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "tanh_test.rs"]
mod tests;
