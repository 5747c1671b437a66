use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use trolley_core::model::{GenericError, Persistable};

/// Extension key under which a manually overridden shipping price is stored.
pub const MANUAL_SHIPPING_COSTS: &str = "manualShippingCosts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedTax {
    pub tax: f64,
    pub tax_rate: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculatedTaxCollection(pub Vec<CalculatedTax>);

impl CalculatedTaxCollection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, tax: CalculatedTax) {
        self.0.push(tax);
    }

    /// Total tax amount across all entries.
    pub fn amount(&self) -> f64 {
        self.0.iter().map(|t| t.tax).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRule {
    pub tax_rate: f64,
    pub percentage: f64,
}

impl TaxRule {
    pub fn new(tax_rate: f64) -> Self {
        Self {
            tax_rate,
            percentage: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRuleCollection(pub Vec<TaxRule>);

impl TaxRuleCollection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, rule: TaxRule) {
        self.0.push(rule);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedPrice {
    pub unit_price: f64,
    pub total_price: f64,
    pub calculated_taxes: CalculatedTaxCollection,
    pub tax_rules: TaxRuleCollection,
}

impl CalculatedPrice {
    pub fn new(
        unit_price: f64,
        total_price: f64,
        calculated_taxes: CalculatedTaxCollection,
        tax_rules: TaxRuleCollection,
    ) -> Self {
        Self {
            unit_price,
            total_price,
            calculated_taxes,
            tax_rules,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxStatus {
    #[default]
    Gross,
    Net,
    TaxFree,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartPrice {
    pub net_price: f64,
    pub total_price: f64,
    pub position_price: f64,
    pub tax_status: TaxStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<CalculatedPrice>,
    #[serde(default)]
    pub good: bool,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl LineItem {
    pub fn new(id: &str, item_type: &str) -> Self {
        Self {
            id: id.to_string(),
            item_type: item_type.to_string(),
            quantity: 1,
            referenced_id: None,
            label: None,
            price: None,
            good: true,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_price(mut self, price: CalculatedPrice) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_referenced_id(mut self, referenced_id: &str) -> Self {
        self.referenced_id = Some(referenced_id.to_string());
        self
    }

    pub fn total_price(&self) -> f64 {
        self.price.as_ref().map(|p| p.total_price).unwrap_or(0.0)
    }
}

/// The cart object graph serialized into the payload column.
///
/// Extensions are a string-keyed JSON map so that other subsystems can
/// attach data without this crate knowing their types; unknown keys survive
/// a save/load round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub name: String,
    pub token: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub price: CartPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_code: Option<String>,
    #[serde(default)]
    pub rule_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

impl Cart {
    pub fn new(name: &str, token: &str) -> Self {
        Self {
            name: name.to_string(),
            token: token.to_string(),
            line_items: Vec::new(),
            price: CartPrice::default(),
            customer_comment: None,
            affiliate_code: None,
            campaign_code: None,
            rule_ids: Vec::new(),
            extensions: HashMap::new(),
        }
    }

    pub fn add(&mut self, line_item: LineItem) {
        self.line_items.push(line_item);
    }

    pub fn set_customer_comment(&mut self, comment: &str) {
        self.customer_comment = Some(comment.to_string());
    }

    pub fn add_extension(&mut self, name: &str, value: serde_json::Value) {
        self.extensions.insert(name.to_string(), value);
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    pub fn extension(&self, name: &str) -> Option<&serde_json::Value> {
        self.extensions.get(name)
    }
}

impl Persistable for Cart {
    fn token(&self) -> &str {
        &self.token
    }

    fn set_token(&mut self, token: &str) {
        self.token = token.to_string();
    }

    fn set_rule_ids(&mut self, rule_ids: Vec<String>) {
        self.rule_ids = rule_ids;
    }

    fn line_item_count(&self) -> usize {
        self.line_items.len()
    }

    fn total_price(&self) -> f64 {
        self.price.total_price
    }

    fn as_json(&self) -> Result<String, GenericError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_json(json: &str) -> Result<Self, GenericError> {
        Ok(serde_json::from_str(json)?)
    }
}
