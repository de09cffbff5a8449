use std::fmt;
use std::ops::Deref;

use log::trace;
use num_traits::AsPrimitive;

use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::operand::Operand;

/// A node that persists across forward/backward cycles and is updated in place.
///
/// Parameters always require gradients. Their data is only ever mutated by
/// [`Parameter::step`], which the autodiff engine never calls.
pub struct Parameter(Node);

impl Parameter {
    /// Creates a new Parameter from raw values.
    ///
    /// # Errors
    /// `EmptyPopulation` when `values` is empty.
    pub fn new<I, N>(values: I) -> Result<Self, PopGradError>
    where
        I: IntoIterator<Item = N>,
        N: AsPrimitive<f64>,
    {
        Ok(Parameter(Node::new(values)?))
    }

    /// Gradient-descent update: `data[i] -= lr * grad[i]`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the gradient and data buffers differ in length.
    pub fn step(&self, lr: f64) -> Result<(), PopGradError> {
        let mut guard = self.0.write_data();
        if guard.grad.len() != guard.data.len() {
            return Err(PopGradError::shape_mismatch(
                guard.data.len(),
                guard.grad.len(),
                "Parameter::step",
            ));
        }
        let nd = &mut *guard;
        for (d, g) in nd.data.iter_mut().zip(&nd.grad) {
            *d -= lr * g;
        }
        trace!("Parameter::step lr={} -> data={:?}", lr, nd.data);
        Ok(())
    }

    /// Replaces the values in place, keeping the gradient buffer.
    ///
    /// Used by update rules that compute the new values themselves.
    pub fn update_data<F>(&self, mut f: F) -> Result<(), PopGradError>
    where
        F: FnMut(&mut [f64], &[f64]) -> Result<(), PopGradError>,
    {
        let mut guard = self.0.write_data();
        let nd = &mut *guard;
        f(&mut nd.data, &nd.grad)
    }

    /// The underlying graph node.
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Consumes the Parameter and returns the underlying Node.
    pub fn into_inner(self) -> Node {
        self.0
    }
}

// Allow accessing the underlying Node immutably via Deref.
impl Deref for Parameter {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({:?})", self.0)
    }
}

impl Clone for Parameter {
    /// Shallow clone, sharing the same graph vertex.
    fn clone(&self) -> Self {
        Parameter(self.0.clone())
    }
}

impl From<&Parameter> for Operand {
    fn from(param: &Parameter) -> Self {
        Operand::Node(param.0.clone())
    }
}

impl From<Parameter> for Operand {
    fn from(param: Parameter) -> Self {
        Operand::Node(param.0)
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
