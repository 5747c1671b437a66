pub mod config;

/// Common utilities shared across the Trolley workspace
///
/// This crate provides shared functionality used by the other members of the
/// cart platform, including:
///
/// - Configuration loading for the executables
/// - Shared test utilities (unique tokens, test database URLs)

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used test utilities for easier access
#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{generate_unique_token, get_test_database_url};
