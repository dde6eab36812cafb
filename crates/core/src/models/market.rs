use serde::{Deserialize, Serialize};

use super::serialization::{float_or_string, empty_string_as_none};

/// A market index tile (`/api/market/indices`), e.g. NIFTY 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "float_or_string", alias = "price")]
    pub value: f64,
    #[serde(default, deserialize_with = "float_or_string")]
    pub change: f64,
    #[serde(default, alias = "percentChange", deserialize_with = "float_or_string")]
    pub change_percent: f64,
}

impl MarketIndex {
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
