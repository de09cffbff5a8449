use std::fmt::Debug;

use crate::error::PopGradError;
use crate::ops::activation::tanh::TanhBackward;
use crate::ops::arithmetic::add::AddBackward;
use crate::ops::arithmetic::mul::MulBackward;
use crate::ops::arithmetic::sub::SubBackward;
use crate::ops::broadcast::BroadcastBackward;
use crate::ops::linalg::matvec::MatVecBackward;
use crate::ops::reduction::sum::SumBackward;

/// Defines the interface for the backward pass of a differentiable population operation.
///
/// Each operation stores in its backward context the forward values it needs,
/// captured when the operation ran. Later mutation of a parameter's data never
/// changes the gradient of a graph that was already built.
pub trait BackwardOp: Debug {
    /// Computes the gradient contribution for each parent, given the gradient
    /// flowing into the operation's output.
    ///
    /// # Returns
    /// One vector per parent, in the order the parents were passed to the
    /// forward operation. Each vector has the parent's population size.
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError>;
}

/// Backward rule attached to a non-leaf node.
///
/// One variant per operation kind, each carrying the minimal cached forward
/// data its rule needs. Dispatch is a single `match`.
#[derive(Debug, Clone)]
pub enum GradFn {
    Add(AddBackward),
    Sub(SubBackward),
    Mul(MulBackward),
    Tanh(TanhBackward),
    Sum(SumBackward),
    MatVec(MatVecBackward),
    Broadcast(BroadcastBackward),
}

impl GradFn {
    /// Operation tag recorded on the output node.
    pub fn op_tag(&self) -> &'static str {
        match self {
            GradFn::Add(_) => "+",
            GradFn::Sub(_) => "-",
            GradFn::Mul(_) => "*",
            GradFn::Tanh(_) => "tanh",
            GradFn::Sum(_) => "sum",
            GradFn::MatVec(_) => "matvec",
            GradFn::Broadcast(_) => "broadcast",
        }
    }
}

impl BackwardOp for GradFn {
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        match self {
            GradFn::Add(op) => op.backward(grad_output),
            GradFn::Sub(op) => op.backward(grad_output),
            GradFn::Mul(op) => op.backward(grad_output),
            GradFn::Tanh(op) => op.backward(grad_output),
            GradFn::Sum(op) => op.backward(grad_output),
            GradFn::MatVec(op) => op.backward(grad_output),
            GradFn::Broadcast(op) => op.backward(grad_output),
        }
    }
}
