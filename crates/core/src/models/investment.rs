use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serialization::{
    aliased_serde, float_or_string, float_or_string_opt, string_or_number, KeyAliases,
};

const RECORD_KEYS: &[KeyAliases] = &[("id", &["id", "_id"])];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentType {
    #[serde(alias = "lumpSum", alias = "one-time")]
    Lumpsum,
    Sip,
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentType::Lumpsum => write!(f, "Lumpsum"),
            InvestmentType::Sip => write!(f, "SIP"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SipFrequency {
    Monthly,
    Quarterly,
}

/// Body for `POST /api/investments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    pub fund_id: String,
    pub amount: f64,
    pub investment_type: InvestmentType,
    /// Day of month the SIP instalment is debited (1–28)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_date: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<SipFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl InvestmentRequest {
    pub fn lumpsum(fund_id: impl Into<String>, amount: f64) -> Self {
        Self {
            fund_id: fund_id.into(),
            amount,
            investment_type: InvestmentType::Lumpsum,
            sip_date: None,
            frequency: None,
            start_date: None,
        }
    }

    pub fn sip(fund_id: impl Into<String>, amount: f64, sip_date: u8, frequency: SipFrequency) -> Self {
        Self {
            fund_id: fund_id.into(),
            amount,
            investment_type: InvestmentType::Sip,
            sip_date: Some(sip_date),
            frequency: Some(frequency),
            start_date: None,
        }
    }
}

/// Investment as confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct InvestmentRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub fund_id: String,
    #[serde(deserialize_with = "float_or_string")]
    pub amount: f64,
    pub investment_type: InvestmentType,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub units: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

aliased_serde!(InvestmentRecord, RECORD_KEYS);

fn default_status() -> String {
    "pending".to_string()
}
