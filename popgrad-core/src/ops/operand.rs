use crate::error::PopGradError;
use crate::node::Node;

/// Anything an operation accepts as an input.
///
/// Nodes are used as-is (sharing the same graph vertex). Plain numbers become
/// constant nodes with `requires_grad = false` when the operation runs.
#[derive(Debug, Clone)]
pub enum Operand {
    Node(Node),
    Values(Vec<f64>),
}

impl Operand {
    /// Resolves the operand into a graph node.
    ///
    /// # Errors
    /// `EmptyPopulation` when a constant has no elements.
    pub fn into_node(self, operation: &str) -> Result<Node, PopGradError> {
        match self {
            Operand::Node(node) => Ok(node),
            Operand::Values(values) => Node::constant_for(values, operation),
        }
    }
}

impl From<&Node> for Operand {
    fn from(node: &Node) -> Self {
        Operand::Node(node.clone())
    }
}

impl From<Node> for Operand {
    fn from(node: Node) -> Self {
        Operand::Node(node)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Values(vec![value])
    }
}

impl From<Vec<f64>> for Operand {
    fn from(values: Vec<f64>) -> Self {
        Operand::Values(values)
    }
}

impl From<&[f64]> for Operand {
    fn from(values: &[f64]) -> Self {
        Operand::Values(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Operand {
    fn from(values: [f64; N]) -> Self {
        Operand::Values(values.to_vec())
    }
}
