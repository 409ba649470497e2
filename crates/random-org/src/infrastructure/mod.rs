//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod http;
pub mod ids;
pub mod ports;
