use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::error::Error;

pub type GenericError = Box<dyn Error + Send + Sync>;

/// A cart payload that can be written to and restored from a storage row.
///
/// The row keeps a serialized copy of the whole object graph next to a few
/// denormalized columns; implementors expose exactly what the row needs.
pub trait Persistable: Send + Sync + Clone + Serialize + DeserializeOwned {
    fn token(&self) -> &str;
    fn set_token(&mut self, token: &str);
    fn set_rule_ids(&mut self, rule_ids: Vec<String>);
    fn line_item_count(&self) -> usize;
    fn total_price(&self) -> f64;
    fn as_json(&self) -> Result<String, GenericError>;
    fn from_json(json: &str) -> Result<Self, GenericError>;
}

/// Per-request sales channel context handed to every persister operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelContext {
    pub sales_channel_id: String,
    pub currency_id: String,
    pub customer_id: Option<String>,
    pub rule_ids: Vec<String>,
}

impl ChannelContext {
    pub fn new(sales_channel_id: &str, currency_id: &str) -> Self {
        Self {
            sales_channel_id: sales_channel_id.to_string(),
            currency_id: currency_id.to_string(),
            customer_id: None,
            rule_ids: Vec::new(),
        }
    }
}
