use thiserror::Error;

use crate::autograd::Seed;
use crate::error::PopGradError;
use crate::node::Node;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(PopGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(PopGradError),
    #[error("Gradient check input must be a leaf node. Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Node error during intermediate calculation: {0}")]
    NodeError(PopGradError),
}

impl From<PopGradError> for GradCheckError {
    fn from(err: PopGradError) -> Self {
        GradCheckError::NodeError(err)
    }
}

/// Sum of the output's components: the scalar objective the check differentiates.
fn calculate_loss(output: &Node) -> f64 {
    output.read_data().data().iter().sum()
}

/// Checks analytical gradients against central finite differences.
///
/// The objective is the sum of `func`'s output, which is exactly what a
/// backprop seeded with ones differentiates. Every input that requires grad
/// is perturbed element by element with a fresh leaf, so the caller's nodes
/// are never mutated; their gradient buffers hold the analytical result
/// afterwards.
///
/// An element fails only when the difference exceeds both `abs_tol` and
/// `rel_tol` scaled by the larger magnitude.
pub fn check_grad<F>(
    func: F,
    inputs: &[Node],
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Node]) -> Result<Node, PopGradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    // --- Analytical pass ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    output.zero_grad_graph();
    output
        .backprop(Seed::Ones, false)
        .map_err(GradCheckError::BackwardPassError)?;

    // --- Numerical pass ---
    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }
        let analytical = original_input.grad();
        let original_data = original_input.data();

        let perturbed_loss = |elem_idx: usize, delta: f64| -> Result<f64, GradCheckError> {
            let mut values = original_data.clone();
            values[elem_idx] += delta;
            let mut perturbed_inputs = inputs.to_vec();
            perturbed_inputs[i] = Node::new(values)?;
            let output = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
            Ok(calculate_loss(&output))
        };

        for (elem_idx, &analytical_grad) in analytical.iter().enumerate() {
            let loss_plus = perturbed_loss(elem_idx, epsilon)?;
            let loss_minus = perturbed_loss(elem_idx, -epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            let scale = analytical_grad.abs().max(numerical_grad.abs());
            if difference > abs_tol && difference > rel_tol * scale {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{mul, sum_pop};

    #[test]
    fn test_check_grad_accepts_correct_rule() {
        let x = Node::new([0.3, -1.2, 2.0]).unwrap();
        let func = |inputs: &[Node]| mul(&inputs[0], &inputs[0]);
        assert!(check_grad(func, &[x.clone()], 1e-6, 1e-5, 1e-5).is_ok());
        assert_eq!(x.grad(), vec![0.6, -2.4, 4.0]);
    }

    #[test]
    fn test_check_grad_rejects_non_leaf_input() {
        let x = Node::new([1.0]).unwrap();
        let y = sum_pop(&x).unwrap();
        let func = |inputs: &[Node]| -> Result<Node, PopGradError> { Ok(inputs[0].clone()) };
        assert_eq!(
            check_grad(func, &[y], 1e-6, 1e-5, 1e-5),
            Err(GradCheckError::InputNotLeaf { input_index: 0 })
        );
    }

    #[test]
    fn test_check_grad_detects_wrong_gradient() {
        // A hand-assembled node has no backward rule, so the analytical
        // gradient of its input stays zero.
        let x = Node::new([1.0, 2.0]).unwrap();
        let func = |inputs: &[Node]| {
            let doubled: Vec<f64> = inputs[0].data().iter().map(|v| 2.0 * v).collect();
            Node::from_parts(doubled, vec![inputs[0].clone()], "double", true)
        };
        let result = check_grad(func, &[x], 1e-6, 1e-5, 1e-5);
        assert!(matches!(
            result,
            Err(GradCheckError::GradientMismatch { input_index: 0, element_index: 0, .. })
        ));
    }

    #[test]
    fn test_forward_errors_are_reported() {
        let x = Node::new([1.0, 2.0]).unwrap();
        let func = |inputs: &[Node]| mul(&inputs[0], [1.0, 2.0, 3.0]);
        assert!(matches!(
            check_grad(func, &[x], 1e-6, 1e-5, 1e-5),
            Err(GradCheckError::ForwardPassError(PopGradError::ShapeMismatch { .. }))
        ));
    }
}
