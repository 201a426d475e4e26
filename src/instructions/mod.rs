//! Exposes the instructions of the dex.
pub mod add_liquidity;
pub mod initialize_liquidity_pool;
pub mod remove_liquidity;
pub mod swap;
