// src/node/autograd.rs

use crate::autograd::{self, Seed, TraceRecord};
use crate::error::PopGradError;
use crate::node::Node;

impl Node {
    /// Runs backprop from this node with the default ones seed.
    pub fn backward(&self) -> Result<(), PopGradError> {
        autograd::backprop(self, Seed::Ones, false)
    }

    /// Runs backprop from this node with an explicit seeding policy.
    ///
    /// See [`autograd::backprop`] for the accumulation rules.
    pub fn backprop(&self, seed: Seed, debug: bool) -> Result<(), PopGradError> {
        autograd::backprop(self, seed, debug)
    }

    pub fn backprop_with_hook<F>(&self, seed: Seed, hook: F) -> Result<(), PopGradError>
    where
        F: FnMut(&TraceRecord),
    {
        autograd::backprop_with_hook(self, seed, hook)
    }

    /// Resets this node's own gradient buffer to zeros.
    ///
    /// Does nothing for constants. Ancestors are untouched; use
    /// [`Node::zero_grad_graph`] to clear a whole graph.
    pub fn zero_grad(&self) {
        let mut guard = self.write_data();
        if guard.requires_grad {
            guard.fill_grad(0.0);
        }
    }

    /// Resets the gradient of every node reachable from this one.
    pub fn zero_grad_graph(&self) {
        autograd::zero_grad_graph(self)
    }

    /// Nodes reachable from this one, parents before children.
    pub fn topological_order(&self) -> Vec<Node> {
        autograd::topological_order(self)
    }
}
