use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::linalg::matrix::Matrix;
use crate::ops::operand::Operand;

// --- Backward Operation Structure ---

/// Backward context for `y = A x`. Only `x` is a parent; `A` is a constant.
#[derive(Debug, Clone)]
pub struct MatVecBackward {
    matrix: Matrix,
}

impl BackwardOp for MatVecBackward {
    /// `dL/dx = A^T dL/dy`
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        if grad_output.len() != self.matrix.rows() {
            return Err(PopGradError::shape_mismatch(
                self.matrix.rows(),
                grad_output.len(),
                "matvec backward",
            ));
        }
        Ok(vec![self.matrix.transpose_mul_vec(grad_output)])
    }
}

// --- Forward Operation ---

fn matvec_node(matrix: Matrix, x: &Node) -> Result<Node, PopGradError> {
    if x.numel() != matrix.cols() {
        return Err(PopGradError::shape_mismatch(
            matrix.cols(),
            x.numel(),
            "matvec",
        ));
    }
    let result_data = matrix.mul_vec(x.read_data().data());
    Ok(Node::from_op(
        result_data,
        vec![x.clone()],
        GradFn::MatVec(MatVecBackward { matrix }),
    ))
}

/// Matrix-vector product `out[i] = sum_j A[i][j] * x[j]` with a constant `A`.
///
/// `matrix` may be a [`Matrix`] reference or any raw row structure that
/// converts into one (`Vec<Vec<f64>>`, `[[f64; C]; R]`, ...).
///
/// # Errors
/// `InvalidMatrixSpec` for an empty or ragged matrix, `ShapeMismatch` when
/// `x` does not have one element per column.
pub fn matvec<M>(matrix: M, x: impl Into<Operand>) -> Result<Node, PopGradError>
where
    M: TryInto<Matrix, Error = PopGradError>,
{
    let matrix = matrix.try_into()?;
    let x = x.into().into_node("matvec")?;
    matvec_node(matrix, &x)
}

impl Node {
    /// Method form of [`matvec`]: `A * self`.
    pub fn matvec(&self, matrix: &Matrix) -> Result<Node, PopGradError> {
        matvec_node(matrix.clone(), self)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "matvec_test.rs"]
mod tests;
