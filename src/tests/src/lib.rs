//! Integration tests for the zap wallet.

pub mod cli_tests;
pub mod core_tests;
