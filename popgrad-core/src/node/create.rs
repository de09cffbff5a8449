// src/node/create.rs

use std::borrow::Cow;

use num_traits::AsPrimitive;

use crate::autograd::GradFn;
use crate::error::PopGradError;
use crate::node::Node;
use crate::node_data::NodeData;

/// Converts caller-supplied numbers to `f64`, rejecting empty populations.
fn collect_values<I, N>(values: I, operation: &str) -> Result<Vec<f64>, PopGradError>
where
    I: IntoIterator<Item = N>,
    N: AsPrimitive<f64>,
{
    let data: Vec<f64> = values.into_iter().map(|v| v.as_()).collect();
    if data.is_empty() {
        return Err(PopGradError::EmptyPopulation {
            operation: operation.to_string(),
        });
    }
    Ok(data)
}

impl Node {
    /// Creates a leaf population that requires gradients.
    ///
    /// Every element is converted to `f64`, so integer sequences are accepted.
    ///
    /// # Errors
    /// Returns `PopGradError::EmptyPopulation` if `values` yields nothing.
    pub fn new<I, N>(values: I) -> Result<Self, PopGradError>
    where
        I: IntoIterator<Item = N>,
        N: AsPrimitive<f64>,
    {
        let data = collect_values(values, "Node::new")?;
        Ok(Node::from_node_data(NodeData::new(data, true)))
    }

    /// Creates a size-one leaf population that requires gradients.
    pub fn scalar<N: AsPrimitive<f64>>(value: N) -> Self {
        Node::from_node_data(NodeData::new(vec![value.as_()], true))
    }

    /// Creates a leaf population with `requires_grad = false`.
    pub fn constant<I, N>(values: I) -> Result<Self, PopGradError>
    where
        I: IntoIterator<Item = N>,
        N: AsPrimitive<f64>,
    {
        Node::constant_for(values, "Node::constant")
    }

    /// `Node::constant` reporting `operation` in its `EmptyPopulation` error.
    pub(crate) fn constant_for<I, N>(values: I, operation: &str) -> Result<Self, PopGradError>
    where
        I: IntoIterator<Item = N>,
        N: AsPrimitive<f64>,
    {
        let data = collect_values(values, operation)?;
        Ok(Node::from_node_data(NodeData::new(data, false)))
    }

    /// Assembles a node from all of its parts.
    ///
    /// This is the general constructor: `Node::new` is `from_parts(values, vec![], "leaf", true)`.
    /// Nodes built this way carry no backward rule, so gradients stop at them.
    pub fn from_parts<I, N>(
        values: I,
        parents: Vec<Node>,
        op: impl Into<Cow<'static, str>>,
        requires_grad: bool,
    ) -> Result<Self, PopGradError>
    where
        I: IntoIterator<Item = N>,
        N: AsPrimitive<f64>,
    {
        let data = collect_values(values, "Node::from_parts")?;
        let mut node_data = NodeData::new(data, requires_grad);
        node_data.parents = parents;
        node_data.op = op.into();
        Ok(Node::from_node_data(node_data))
    }

    /// Builds the output node of a differentiable operation.
    ///
    /// `requires_grad` is the logical OR of the parents' flags. The backward
    /// rule is only attached when someone upstream can receive a gradient.
    pub(crate) fn from_op(data: Vec<f64>, parents: Vec<Node>, grad_fn: GradFn) -> Self {
        let requires_grad = parents.iter().any(|p| p.requires_grad());
        let mut node_data = NodeData::new(data, requires_grad);
        node_data.op = Cow::Borrowed(grad_fn.op_tag());
        node_data.parents = parents;
        if requires_grad {
            node_data.grad_fn = Some(grad_fn);
        }
        Node::from_node_data(node_data)
    }
}
