// src/nn/mod.rs
// Persistent, optimizer-updated state and its initialisers.

pub mod init;
pub mod parameter;

pub use parameter::Parameter;
