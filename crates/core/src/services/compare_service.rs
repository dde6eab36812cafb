use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::analytics::comparison::{summarize, MAX_COMPARE_FUNDS, MIN_COMPARE_FUNDS};
use crate::analytics::correlation::correlation_matrix;
use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::analytics::Comparison;
use crate::models::fund::Fund;

/// Side-by-side comparison of 2–4 funds.
pub struct CompareService {
    api: Arc<dyn FundApi>,
}

impl CompareService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    /// Fetch the funds via `POST /api/compare` and compute the badges.
    ///
    /// The result keeps the order the ids were given in, regardless of
    /// the order the backend returns them.
    pub async fn compare(&self, fund_ids: &[String]) -> Result<Comparison, CoreError> {
        let ids = validate_compare_ids(fund_ids)?;
        let funds = self.api.compare_funds(&ids).await?;
        let funds = order_like(&ids, funds);
        if funds.len() < MIN_COMPARE_FUNDS {
            warn!("Compare returned {} of {} funds", funds.len(), ids.len());
            return Err(CoreError::ValidationError(format!(
                "Only {} of the selected funds could be loaded",
                funds.len()
            )));
        }
        debug!("Comparing {} funds", funds.len());
        Ok(build_comparison(funds))
    }
}

/// Summary and correlation for funds that are already loaded.
#[must_use]
pub fn build_comparison(funds: Vec<Fund>) -> Comparison {
    let summary = summarize(&funds);
    let correlation = correlation_matrix(&funds);
    Comparison {
        funds,
        summary,
        correlation,
    }
}

/// Trim, drop blanks and duplicates, then enforce 2–4 ids.
pub fn validate_compare_ids(fund_ids: &[String]) -> Result<Vec<String>, CoreError> {
    let ids = dedupe_ids(fund_ids);
    if ids.len() < MIN_COMPARE_FUNDS || ids.len() > MAX_COMPARE_FUNDS {
        return Err(CoreError::ValidationError(format!(
            "Select between {MIN_COMPARE_FUNDS} and {MAX_COMPARE_FUNDS} different funds to compare, got {}",
            ids.len()
        )));
    }
    Ok(ids)
}

pub(crate) fn dedupe_ids(fund_ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    fund_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty() && seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}

// Requested order first; anything the backend added that wasn't asked for is dropped.
fn order_like(ids: &[String], mut funds: Vec<Fund>) -> Vec<Fund> {
    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(pos) = funds.iter().position(|f| &f.id == id) {
            ordered.push(funds.swap_remove(pos));
        }
    }
    ordered
}
