use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::info;

use crate::api::traits::FundApi;
use crate::errors::{CoreError, FieldError};
use crate::models::kyc::{BankDetails, KycStatus, KycSubmission};

pub const MIN_KYC_AGE: u32 = 18;

static PAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN regex"));
static AADHAAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[2-9][0-9]{11}$").expect("valid Aadhaar regex"));
static IFSC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").expect("valid email regex")
});
static ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9,18}$").expect("valid account regex"));

/// KYC onboarding: validate locally, then submit.
pub struct KycService {
    api: Arc<dyn FundApi>,
}

impl KycService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    /// Normalize, validate every field, and `POST /api/kyc/submit`.
    /// All field errors are returned together in [`CoreError::KycValidation`].
    pub async fn submit(&self, submission: KycSubmission) -> Result<KycStatus, CoreError> {
        let submission = normalize_submission(submission);
        let errors = validate_submission(&submission, Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(CoreError::KycValidation(errors));
        }
        let status = self.api.submit_kyc(&submission).await?;
        info!("KYC submitted, status {}", status.status);
        Ok(status)
    }
}

fn strip_spaces(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// Canonical form: uppercase PAN/IFSC, digits-only Aadhaar/phone/account,
/// trimmed text fields, lowercase email. A leading `+91`/`0` on the phone
/// is dropped.
#[must_use]
pub fn normalize_submission(mut s: KycSubmission) -> KycSubmission {
    s.full_name = s.full_name.split_whitespace().collect::<Vec<_>>().join(" ");
    s.pan = strip_spaces(&s.pan).to_uppercase();
    s.aadhaar = strip_spaces(&s.aadhaar);
    s.email = s.email.trim().to_lowercase();
    let phone = strip_spaces(&s.phone);
    let phone = phone.strip_prefix("+91").unwrap_or(&phone);
    s.phone = if phone.len() == 11 {
        phone.strip_prefix('0').unwrap_or(phone).to_string()
    } else {
        phone.to_string()
    };
    s.address = s.address.trim().to_string();
    s.bank = BankDetails {
        account_number: strip_spaces(&s.bank.account_number),
        ifsc: strip_spaces(&s.bank.ifsc).to_uppercase(),
        bank_name: s.bank.bank_name.trim().to_string(),
    };
    s
}

/// Whole years between `dob` and `today`.
#[must_use]
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    if dob > today {
        return 0;
    }
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Validate a (normalized) submission. Returns every problem found.
#[must_use]
pub fn validate_submission(s: &KycSubmission, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if s.full_name.trim().len() < 2 {
        errors.push(FieldError::new("fullName", "Full name is required"));
    }
    if !PAN_RE.is_match(&s.pan) {
        errors.push(FieldError::new("pan", "PAN must look like ABCDE1234F"));
    }
    if !AADHAAR_RE.is_match(&s.aadhaar) {
        errors.push(FieldError::new("aadhaar", "Aadhaar must be 12 digits and cannot start with 0 or 1"));
    }
    if s.date_of_birth > today {
        errors.push(FieldError::new("dateOfBirth", "Date of birth cannot be in the future"));
    } else if age_on(s.date_of_birth, today) < MIN_KYC_AGE {
        errors.push(FieldError::new(
            "dateOfBirth",
            format!("You must be at least {MIN_KYC_AGE} years old"),
        ));
    }
    if !EMAIL_RE.is_match(&s.email) {
        errors.push(FieldError::new("email", "Enter a valid email address"));
    }
    if !PHONE_RE.is_match(&s.phone) {
        errors.push(FieldError::new("phone", "Enter a valid 10-digit mobile number"));
    }
    if s.address.trim().len() < 10 {
        errors.push(FieldError::new("address", "Address must be at least 10 characters"));
    }
    if !ACCOUNT_RE.is_match(&s.bank.account_number) {
        errors.push(FieldError::new("bank.accountNumber", "Account number must be 9 to 18 digits"));
    }
    if !IFSC_RE.is_match(&s.bank.ifsc) {
        errors.push(FieldError::new("bank.ifsc", "IFSC must look like HDFC0001234"));
    }
    if s.bank.bank_name.trim().is_empty() {
        errors.push(FieldError::new("bank.bankName", "Bank name is required"));
    }

    errors
}
