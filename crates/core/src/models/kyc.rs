use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_number: String,
    pub ifsc: String,
    pub bank_name: String,
}

/// Body for `POST /api/kyc/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmission {
    pub full_name: String,
    /// Permanent Account Number, `AAAAA9999A`
    pub pan: String,
    /// 12-digit Aadhaar number
    pub aadhaar: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    /// 10-digit Indian mobile number
    pub phone: String,
    pub address: String,
    pub bank: BankDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycState {
    Pending,
    #[serde(alias = "approved")]
    Verified,
    Rejected,
}

impl std::fmt::Display for KycState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KycState::Pending => write!(f, "Pending"),
            KycState::Verified => write!(f, "Verified"),
            KycState::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Backend answer to a KYC submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycStatus {
    pub status: KycState,
    #[serde(default, alias = "kycId")]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
