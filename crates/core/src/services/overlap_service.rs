use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analytics::overlap::{analyze_overlap, report_from_pairs, MAX_OVERLAP_FUNDS, MIN_OVERLAP_FUNDS};
use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::analytics::OverlapReport;
use crate::services::compare_service::dedupe_ids;

/// Portfolio overlap between 2–10 funds.
///
/// The backend's `/api/overlap` result is preferred. When that call fails
/// (anything but 401) or comes back empty, each fund's detail is fetched
/// and the overlap computed locally from real holdings. Funds without
/// holdings produce [`CoreError::HoldingsUnavailable`]; nothing is made up.
pub struct OverlapService {
    api: Arc<dyn FundApi>,
}

impl OverlapService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    pub async fn analyze(&self, fund_ids: &[String]) -> Result<OverlapReport, CoreError> {
        let ids = dedupe_ids(fund_ids);
        if ids.len() < MIN_OVERLAP_FUNDS || ids.len() > MAX_OVERLAP_FUNDS {
            return Err(CoreError::ValidationError(format!(
                "Overlap analysis needs between {MIN_OVERLAP_FUNDS} and {MAX_OVERLAP_FUNDS} different funds, got {}",
                ids.len()
            )));
        }

        match self.api.fund_overlap(&ids).await {
            Ok(pairs) if !pairs.is_empty() => {
                debug!("Using backend overlap for {} funds", ids.len());
                let pairs = pairs
                    .into_iter()
                    .map(|mut p| {
                        p.overlap_percentage = if p.overlap_percentage.is_finite() {
                            p.overlap_percentage.clamp(0.0, 100.0)
                        } else {
                            0.0
                        };
                        p
                    })
                    .collect();
                return Ok(report_from_pairs(ids, pairs));
            }
            Ok(_) => warn!("Backend overlap was empty, computing locally"),
            Err(CoreError::Unauthorized) => return Err(CoreError::Unauthorized),
            Err(e) => warn!("Backend overlap failed ({e}), computing locally"),
        }

        self.analyze_locally(&ids).await
    }

    /// Compute overlap from each fund's holdings.
    pub async fn analyze_locally(&self, fund_ids: &[String]) -> Result<OverlapReport, CoreError> {
        let mut funds = Vec::with_capacity(fund_ids.len());
        for id in fund_ids {
            funds.push(self.api.get_fund(id).await?);
        }
        let report = analyze_overlap(&funds)?;
        info!(
            "Computed overlap locally for {} funds, average {:.2}%",
            funds.len(),
            report.average_overlap
        );
        Ok(report)
    }
}
