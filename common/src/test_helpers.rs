/// Shared Test Helpers for Cross-Crate Use
///
/// Centralized test utilities used by the cart integration tests to avoid
/// duplicating token and database setup code across test files.
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

// Global counter for truly unique cart tokens across parallel tests
static GLOBAL_TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate cart tokens that won't conflict across parallel tests.
///
/// Combines a prefix, the current timestamp and an atomic counter so that
/// tests sharing a database never collide on the token primary key.
pub fn generate_unique_token(prefix: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let counter = GLOBAL_TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}", prefix, timestamp, counter)
}

/// Get the test database URL from environment or default.
pub fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}
