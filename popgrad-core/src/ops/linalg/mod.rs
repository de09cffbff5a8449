//! Linear algebra against constant matrices.

pub mod matrix;
pub mod matvec;

pub use matrix::Matrix;
pub use matvec::matvec;
