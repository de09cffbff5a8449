use crate::autograd::{BackwardOp, GradFn};
use crate::error::PopGradError;
use crate::node::Node;

// --- Backward Operation Structure ---

/// Backward context for replicating a size-one population `len` times.
#[derive(Debug, Clone)]
pub struct BroadcastBackward {
    len: usize,
}

impl BackwardOp for BroadcastBackward {
    /// Every replica fed the same scalar, so all upstream contributions sum
    /// back into its single gradient slot.
    fn backward(&self, grad_output: &[f64]) -> Result<Vec<Vec<f64>>, PopGradError> {
        if grad_output.len() != self.len {
            return Err(PopGradError::shape_mismatch(
                self.len,
                grad_output.len(),
                "broadcast backward",
            ));
        }
        Ok(vec![vec![grad_output.iter().sum()]])
    }
}

// --- Forward Operation ---

/// Replicates the single value of `scalar` into a population of `len` elements.
///
/// The result is an explicit `"broadcast"` node whose only parent is `scalar`.
pub(crate) fn broadcast_scalar(scalar: &Node, len: usize) -> Result<Node, PopGradError> {
    let value = scalar.item()?;
    Ok(Node::from_op(
        vec![value; len],
        vec![scalar.clone()],
        GradFn::Broadcast(BroadcastBackward { len }),
    ))
}

/// Brings two operands of an elementwise op to a common population size.
///
/// Only a size-one operand may be widened. Equal sizes pass through untouched;
/// any other mismatch is a `ShapeMismatch`, raised before anything is built.
pub(crate) fn broadcast_pair(
    a: Node,
    b: Node,
    operation: &str,
) -> Result<(Node, Node), PopGradError> {
    let (la, lb) = (a.numel(), b.numel());
    match (la, lb) {
        _ if la == lb => Ok((a, b)),
        (1, _) => Ok((broadcast_scalar(&a, lb)?, b)),
        (_, 1) => {
            let b = broadcast_scalar(&b, la)?;
            Ok((a, b))
        }
        _ => Err(PopGradError::shape_mismatch(la, lb, operation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_sizes_pass_through() {
        let a = Node::new([1.0, 2.0]).unwrap();
        let b = Node::new([3.0, 4.0]).unwrap();
        let (a2, b2) = broadcast_pair(a.clone(), b.clone(), "test").unwrap();
        assert!(a2.ptr_eq(&a));
        assert!(b2.ptr_eq(&b));
    }

    #[test]
    fn test_scalar_is_replicated_through_broadcast_node() {
        let s = Node::scalar(2.0);
        let v = Node::new([1.0, 2.0, 3.0]).unwrap();
        let (s2, v2) = broadcast_pair(s.clone(), v.clone(), "test").unwrap();
        assert_eq!(s2.data(), vec![2.0, 2.0, 2.0]);
        assert_eq!(s2.op(), "broadcast");
        assert!(s2.parents()[0].ptr_eq(&s));
        assert!(v2.ptr_eq(&v));

        let (v3, s3) = broadcast_pair(v, s, "test").unwrap();
        assert_eq!(v3.numel(), 3);
        assert_eq!(s3.data(), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_incompatible_sizes_fail() {
        let a = Node::new([1.0, 2.0]).unwrap();
        let b = Node::new([1.0, 2.0, 3.0]).unwrap();
        let result = broadcast_pair(a, b, "add");
        assert_eq!(
            result.err(),
            Some(PopGradError::ShapeMismatch {
                expected: 2,
                actual: 3,
                operation: "add".to_string()
            })
        );
    }

    #[test]
    fn test_backward_sums_contributions() {
        let op = BroadcastBackward { len: 3 };
        let grads = op.backward(&[1.0, 2.0, 3.5]).unwrap();
        assert_eq!(grads, vec![vec![6.5]]);
    }

    #[test]
    fn test_constant_scalar_stays_constant() {
        let c = Node::constant([4.0]).unwrap();
        let b = broadcast_scalar(&c, 2).unwrap();
        assert!(!b.requires_grad());
    }
}
