//! # Population Operations Module (`ops`)
//!
//! Every differentiable operation lives here. An operation:
//!
//! 1. coerces non-node operands into constant nodes ([`Operand`]),
//! 2. computes its forward values from the operand values at call time,
//! 3. returns a new [`Node`](crate::Node) whose parents are the operands and whose
//!    `requires_grad` is the OR of theirs,
//! 4. attaches a backward context (e.g. `MulBackward`) wrapped in
//!    [`GradFn`](crate::autograd::GradFn), holding the forward data it needs.
//!
//! ## Submodules:
//!
//! - [`arithmetic`]: elementwise `add`, `sub`, `mul`.
//! - [`broadcast`]: scalar-to-population replication used by the binary ops.
//! - [`activation`]: elementwise `tanh`.
//! - [`reduction`]: `sum_pop`.
//! - [`linalg`]: constant [`Matrix`](linalg::Matrix) and `matvec`.

pub mod activation;
pub mod arithmetic;
pub mod broadcast;
pub mod linalg;
pub mod operand;
pub mod reduction;

pub use activation::tanh;
pub use arithmetic::{add, mul, sub};
pub use linalg::{matvec, Matrix};
pub use operand::Operand;
pub use reduction::sum_pop;
