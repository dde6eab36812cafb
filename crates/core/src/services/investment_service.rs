use std::sync::Arc;
use tracing::info;

use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::fund::Fund;
use crate::models::investment::{InvestmentRecord, InvestmentRequest, InvestmentType};

/// Lumpsum minimum when the fund doesn't state one.
pub const DEFAULT_MIN_LUMPSUM: f64 = 1000.0;
/// SIP instalment minimum when the fund doesn't state one.
pub const DEFAULT_MIN_SIP: f64 = 500.0;
/// Latest day of month a SIP can be scheduled on.
pub const MAX_SIP_DAY: u8 = 28;

/// Investment / SIP entry form.
pub struct InvestmentService {
    api: Arc<dyn FundApi>,
}

impl InvestmentService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    /// Validate against the fund's minimums and `POST /api/investments`.
    pub async fn invest(&self, fund: &Fund, request: &InvestmentRequest) -> Result<InvestmentRecord, CoreError> {
        validate_investment(fund, request)?;
        let record = self.api.create_investment(request).await?;
        info!(
            "{} investment of {:.2} in {} recorded as {}",
            request.investment_type, request.amount, fund.id, record.id
        );
        Ok(record)
    }
}

/// Minimum amount the form accepts for this fund and investment type.
#[must_use]
pub fn minimum_amount(fund: &Fund, investment_type: InvestmentType) -> f64 {
    let stated = match investment_type {
        InvestmentType::Lumpsum => fund.min_investment,
        InvestmentType::Sip => fund.min_sip,
    };
    let default = match investment_type {
        InvestmentType::Lumpsum => DEFAULT_MIN_LUMPSUM,
        InvestmentType::Sip => DEFAULT_MIN_SIP,
    };
    stated.filter(|m| m.is_finite() && *m > 0.0).unwrap_or(default)
}

pub fn validate_investment(fund: &Fund, request: &InvestmentRequest) -> Result<(), CoreError> {
    if request.fund_id != fund.id {
        return Err(CoreError::ValidationError(format!(
            "Request is for fund {} but fund {} was given",
            request.fund_id, fund.id
        )));
    }
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(CoreError::ValidationError("Amount must be a positive number".into()));
    }
    let minimum = minimum_amount(fund, request.investment_type);
    if request.amount < minimum {
        return Err(CoreError::ValidationError(format!(
            "Minimum {} amount for this fund is {minimum:.0}",
            request.investment_type
        )));
    }
    if request.investment_type == InvestmentType::Sip {
        match request.sip_date {
            Some(day) if (1..=MAX_SIP_DAY).contains(&day) => {}
            Some(day) => {
                return Err(CoreError::ValidationError(format!(
                    "SIP date must be between 1 and {MAX_SIP_DAY}, got {day}"
                )))
            }
            None => return Err(CoreError::ValidationError("SIP date is required".into())),
        }
        if request.frequency.is_none() {
            return Err(CoreError::ValidationError("SIP frequency is required".into()));
        }
    }
    Ok(())
}
