//! Reverse-mode automatic differentiation over population nodes.
//!
//! A population is a vector of `f64` values carried by a [`Node`]. Operations
//! in [`ops`] build a graph of nodes; [`Node::backward`] walks it in reverse
//! topological order and accumulates gradients into every ancestor.

pub mod autograd;
pub mod error;
pub mod nn;
pub mod node;
pub mod node_data;
pub mod ops;
pub mod utils;

pub use autograd::{Seed, TraceRecord};
pub use error::PopGradError;
pub use nn::Parameter;
pub use node::Node;
pub use ops::{add, matvec, mul, sub, sum_pop, tanh, Matrix, Operand};

// Re-export traits required by public functions
pub use num_traits;
