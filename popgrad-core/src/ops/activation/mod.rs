// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Elementwise non-linearities applied to every unit of a population.
//!
//! ## Currently Implemented:
//! - [`tanh`](tanh/fn.tanh.html): hyperbolic tangent.

pub mod tanh;

pub use tanh::tanh;
