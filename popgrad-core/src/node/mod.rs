// src/node/mod.rs

use std::borrow::Cow;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::autograd::graph::NodeId;
use crate::error::PopGradError;
use crate::node_data::NodeData;

mod autograd;
pub mod create;
mod traits;

/// A population node: a vector-valued vertex of the computation graph.
///
/// `Node` uses `Rc<RefCell<NodeData>>` internally to allow for:
/// 1.  **Shared Ownership:** a parent may be referenced by many children and by
///     the caller at the same time. Clones are cheap and point at the same node.
/// 2.  **Interior Mutability:** the gradient buffer is written during backprop
///     through shared references.
///
/// Scalars are populations of size one.
pub struct Node {
    pub(crate) data: Rc<RefCell<NodeData>>,
}

impl Node {
    pub(crate) fn from_node_data(node_data: NodeData) -> Self {
        Node {
            data: Rc::new(RefCell::new(node_data)),
        }
    }

    /// Borrows the node's data immutably.
    ///
    /// Panics if the node is currently mutably borrowed, which only the engine
    /// does and never across a call boundary.
    pub fn read_data(&self) -> Ref<'_, NodeData> {
        self.data.borrow()
    }

    pub(crate) fn write_data(&self) -> RefMut<'_, NodeData> {
        self.data.borrow_mut()
    }

    /// Stable identity of this node, used as the visited-set key during traversal.
    pub(crate) fn node_id(&self) -> NodeId {
        Rc::as_ptr(&self.data)
    }

    /// Returns true when both handles refer to the same graph vertex.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Returns a copy of the forward values.
    pub fn data(&self) -> Vec<f64> {
        self.read_data().data.clone()
    }

    /// Returns a copy of the gradient buffer.
    pub fn grad(&self) -> Vec<f64> {
        self.read_data().grad.clone()
    }

    /// Population size.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the single value of a size-one population.
    pub fn item(&self) -> Result<f64, PopGradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(PopGradError::shape_mismatch(1, guard.numel(), "item"));
        }
        Ok(guard.data[0])
    }

    pub fn op(&self) -> Cow<'static, str> {
        self.read_data().op.clone()
    }

    pub fn parents(&self) -> Vec<Node> {
        self.read_data().parents.clone()
    }

    pub fn is_leaf(&self) -> bool {
        self.read_data().parents.is_empty()
    }

    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Overwrites the gradient buffer.
    ///
    /// Used by drivers that inject gradients directly. On a constant
    /// (`requires_grad == false`) the write is dropped and `Ok(())` is still
    /// returned, so its gradient stays zero.
    ///
    /// # Errors
    /// `ShapeMismatch` if `grad` does not have one element per population
    /// member. Checked for constants too.
    pub fn set_grad(&self, grad: Vec<f64>) -> Result<(), PopGradError> {
        let mut guard = self.write_data();
        if grad.len() != guard.numel() {
            return Err(PopGradError::shape_mismatch(
                guard.numel(),
                grad.len(),
                "set_grad",
            ));
        }
        if guard.requires_grad {
            guard.grad = grad;
        }
        Ok(())
    }

    /// Fails with `ShapeMismatch` unless both populations have the same size.
    ///
    /// Run by every elementwise binary op after broadcasting, before any
    /// output is allocated.
    pub(crate) fn enforce_shape(&self, other: &Node, operation: &str) -> Result<(), PopGradError> {
        let (lhs, rhs) = (self.numel(), other.numel());
        if lhs != rhs {
            return Err(PopGradError::shape_mismatch(lhs, rhs, operation));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_grad_overwrites() {
        let x = Node::new([1.0, 2.0]).unwrap();
        x.set_grad(vec![0.5, -0.5]).unwrap();
        assert_eq!(x.grad(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_set_grad_on_constant_is_dropped() {
        let c = Node::constant([1.0, 2.0]).unwrap();
        assert_eq!(c.set_grad(vec![3.0, 4.0]), Ok(()));
        assert_eq!(c.grad(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_set_grad_length_checked() {
        let c = Node::constant([1.0, 2.0]).unwrap();
        assert_eq!(
            c.set_grad(vec![1.0]),
            Err(PopGradError::ShapeMismatch {
                expected: 2,
                actual: 1,
                operation: "set_grad".to_string()
            })
        );
    }
}
