//! Math module for pricing pool operations.
pub mod numerical_ops;
pub mod pool_ops;
