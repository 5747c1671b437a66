use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::GenericError;

/// One row of the cart table.
///
/// The payload column holds the serialized cart object graph; price and
/// line_item_count are denormalized copies kept for reporting queries that
/// must not deserialize every cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub token: String,
    pub payload: String,
    pub rule_ids: String,
    pub price: f64,
    pub line_item_count: i64,
    pub sales_channel_id: String,
    pub customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Row-level access to the cart table; implementations live in domain crates.
#[async_trait]
pub trait CartStorage: Send + Sync {
    async fn fetch(&self, token: &str) -> Result<Option<CartRow>, GenericError>;
    async fn upsert(&self, row: &CartRow) -> Result<(), GenericError>;
    async fn delete(&self, token: &str) -> Result<(), GenericError>;
    async fn replace_token(&self, old_token: &str, new_token: &str) -> Result<(), GenericError>;
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, GenericError>;
}
