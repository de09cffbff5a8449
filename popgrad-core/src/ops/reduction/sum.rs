use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::operand::Operand;

// --- Backward Operation Structure ---

/// Backward context for the population sum: only the input size is needed.
#[derive(Debug, Clone)]
pub struct SumBackward {
    input_len: usize,
}

impl BackwardOp for SumBackward {
    /// The scalar upstream gradient reaches every contributing element unchanged.
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        let upstream = match grad_output {
            [g] => *g,
            _ => {
                return Err(PopGradError::shape_mismatch(
                    1,
                    grad_output.len(),
                    "sum backward",
                ))
            }
        };
        Ok(vec![vec![upstream; self.input_len]])
    }
}

// --- Forward Operation ---

pub(crate) fn sum_node(x: &Node) -> Node {
    let (total, input_len) = {
        let guard = x.read_data();
        (guard.data().iter().sum::<f64>(), guard.numel())
    };
    Node::from_op(
        vec![total],
        vec![x.clone()],
        GradFn::Sum(SumBackward { input_len }),
    )
}

/// Reduces a population to a size-one node holding the sum of its elements.
pub fn sum_pop(x: impl Into<Operand>) -> Result<Node, PopGradError> {
    let x = x.into().into_node("sum_pop")?;
    Ok(sum_node(&x))
}

impl Node {
    /// Method form of [`sum_pop`].
    pub fn sum_pop(&self) -> Node {
        sum_node(self)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
