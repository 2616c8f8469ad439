//! Command implementations for the CLI
//!
//! - start: Start the calculator server
//! - test: Validate configuration and probe the pricing backend
//! - config: Configuration display and validation
//! - prices: Print the built-in price table

pub mod config;
pub mod prices;
pub mod start;
