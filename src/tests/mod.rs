//! Test modules for the FKS hash crate.
//!
//! This module contains crate-internal testing infrastructure:
//! - Unit tests for configuration and error plumbing
//! - Property-based tests for the perfect hash map using proptest
//! - Test fixtures and utilities

pub mod error_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{create_test_dir, key_set_strategy, string_strategy, TestFixture};
