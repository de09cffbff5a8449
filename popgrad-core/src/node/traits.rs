// src/node/traits.rs

use std::fmt::{self, Debug, Display};
use std::ops::{Add, Mul, Sub};
use std::rc::Rc;

use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::arithmetic::{add, mul, sub};
use crate::ops::operand::Operand;

// --- Trait Implementations ---

impl Clone for Node {
    /// Shallow clone: increases the reference count of the shared data. Both
    /// handles refer to the same graph vertex.
    fn clone(&self) -> Self {
        Node {
            data: Rc::clone(&self.data),
        }
    }
}

impl Debug for Node {
    /// Shows size, operation and flags, not the parents (which may be deep).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nd = self.read_data();
        write!(
            f,
            "Node(numel={}, op='{}', requires_grad={}, data={:?}, grad={:?})",
            nd.numel(),
            nd.op,
            nd.requires_grad,
            nd.data,
            nd.grad
        )
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nd = self.read_data();
        write!(
            f,
            "PopulationNode(data={:?}, grad={:?}, op='{}')",
            nd.data, nd.grad, nd.op
        )
    }
}

// --- Operator overloads ---
//
// Every operator returns `Result<Node, PopGradError>` since operand sizes are
// only known at runtime.

impl<R: Into<Operand>> Add<R> for &Node {
    type Output = Result<Node, PopGradError>;

    fn add(self, rhs: R) -> Self::Output {
        add(self, rhs)
    }
}

impl<R: Into<Operand>> Add<R> for Node {
    type Output = Result<Node, PopGradError>;

    fn add(self, rhs: R) -> Self::Output {
        add(self, rhs)
    }
}

impl<R: Into<Operand>> Sub<R> for &Node {
    type Output = Result<Node, PopGradError>;

    fn sub(self, rhs: R) -> Self::Output {
        sub(self, rhs)
    }
}

impl<R: Into<Operand>> Sub<R> for Node {
    type Output = Result<Node, PopGradError>;

    fn sub(self, rhs: R) -> Self::Output {
        sub(self, rhs)
    }
}

impl<R: Into<Operand>> Mul<R> for &Node {
    type Output = Result<Node, PopGradError>;

    fn mul(self, rhs: R) -> Self::Output {
        mul(self, rhs)
    }
}

impl<R: Into<Operand>> Mul<R> for Node {
    type Output = Result<Node, PopGradError>;

    fn mul(self, rhs: R) -> Self::Output {
        mul(self, rhs)
    }
}

// Reflected forms with a plain number on the left: `2.0 * &x`, `1.0 - &x`.

impl Add<&Node> for f64 {
    type Output = Result<Node, PopGradError>;

    fn add(self, rhs: &Node) -> Self::Output {
        add(self, rhs)
    }
}

impl Sub<&Node> for f64 {
    type Output = Result<Node, PopGradError>;

    fn sub(self, rhs: &Node) -> Self::Output {
        sub(self, rhs)
    }
}

impl Mul<&Node> for f64 {
    type Output = Result<Node, PopGradError>;

    fn mul(self, rhs: &Node) -> Self::Output {
        mul(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Node;

    #[test]
    fn test_clone_shares_vertex() {
        let a = Node::new([1.0, 2.0]).unwrap();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_display_format() {
        let a = Node::new([1.5]).unwrap();
        assert_eq!(
            a.to_string(),
            "PopulationNode(data=[1.5], grad=[0.0], op='leaf')"
        );
    }

    #[test]
    fn test_operators() {
        let x = Node::new([1.0, 2.0]).unwrap();
        let y = Node::new([3.0, 5.0]).unwrap();

        assert_eq!((&x + &y).unwrap().data(), vec![4.0, 7.0]);
        assert_eq!((&y - &x).unwrap().data(), vec![2.0, 3.0]);
        assert_eq!((&x * 3.0).unwrap().data(), vec![3.0, 6.0]);
        assert_eq!((x.clone() * [2.0, 0.5]).unwrap().data(), vec![2.0, 1.0]);
        assert_eq!((10.0 - &x).unwrap().data(), vec![9.0, 8.0]);
        assert_eq!((2.0 * &y).unwrap().op(), "*");
        assert_eq!((1.0 + &x).unwrap().data(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_reflected_sub_gradient() {
        let x = Node::new([4.0]).unwrap();
        let out = (1.0 - &x).unwrap();
        out.backward().unwrap();
        assert_eq!(x.grad(), vec![-1.0]);
    }

    #[test]
    fn test_operator_shape_mismatch() {
        let x = Node::new([1.0, 2.0]).unwrap();
        assert!((&x + vec![1.0, 2.0, 3.0]).is_err());
    }
}
