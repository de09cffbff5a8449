//! Elementwise arithmetic on populations, with scalar broadcasting.

pub mod add;
pub mod mul;
pub mod sub;

pub use add::add;
pub use mul::mul;
pub use sub::sub;

use crate::error::PopGradError;
use crate::node::Node;
use crate::ops::broadcast::broadcast_pair;
use crate::ops::operand::Operand;

/// Coerces, broadcasts and shape-checks the two operands of a binary op.
///
/// Fails before any output node is created.
pub(crate) fn prepare_binary(
    a: impl Into<Operand>,
    b: impl Into<Operand>,
    operation: &str,
) -> Result<(Node, Node), PopGradError> {
    let a = a.into().into_node(operation)?;
    let b = b.into().into_node(operation)?;
    let (a, b) = broadcast_pair(a, b, operation)?;
    a.enforce_shape(&b, operation)?;
    Ok((a, b))
}
