// src/node_data.rs
use std::borrow::Cow;
use std::fmt::Debug;

use crate::autograd::GradFn;
use crate::node::Node;

/// Internal storage and metadata for a population node.
///
/// Holds the forward values, the gradient accumulator and the graph links.
/// It is wrapped in `Rc<RefCell<NodeData>>` by [`Node`] so that a parent can be
/// shared by many children while its gradient buffer stays mutable.
#[derive(Debug)]
pub struct NodeData {
    /// Forward-pass values of the population. Length is the population size (>= 1).
    pub(crate) data: Vec<f64>,
    /// Gradient accumulator, always the same length as `data`.
    pub(crate) grad: Vec<f64>,

    // --- Graph Metadata ---
    /// Nodes that produced this one, in operand order. Empty for leaves.
    pub(crate) parents: Vec<Node>,
    /// Label of the producing operation ("leaf", "+", "*", "tanh", ...).
    /// Diagnostic only, never used for dispatch.
    pub(crate) op: Cow<'static, str>,

    // --- Autograd Metadata ---
    /// When false the node is a constant: it never receives gradient writes.
    pub(crate) requires_grad: bool,
    /// Backward rule of the producing operation. `None` for leaves and for
    /// nodes assembled by hand with `Node::from_parts`.
    pub(crate) grad_fn: Option<GradFn>,
}

impl NodeData {
    /// Creates a leaf `NodeData` with a zeroed gradient buffer.
    pub(crate) fn new(data: Vec<f64>, requires_grad: bool) -> Self {
        let grad = vec![0.0; data.len()];
        NodeData {
            data,
            grad,
            parents: Vec::new(),
            op: Cow::Borrowed("leaf"),
            requires_grad,
            grad_fn: None,
        }
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn grad(&self) -> &[f64] {
        &self.grad
    }

    /// Adds `contribution` element by element into the gradient buffer.
    ///
    /// Callers are expected to have checked lengths; a mismatch here means a
    /// backward rule produced a malformed gradient.
    pub(crate) fn accumulate_grad(&mut self, contribution: &[f64]) {
        debug_assert_eq!(self.grad.len(), contribution.len());
        self.grad
            .iter_mut()
            .zip(contribution)
            .for_each(|(g, c)| *g += c);
    }

    pub(crate) fn fill_grad(&mut self, value: f64) {
        self.grad.iter_mut().for_each(|g| *g = value);
    }
}
