use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::analytics::OverlapPair;
use crate::models::envelope::{HealthStatus, Page};
use crate::models::fund::{Fund, FundQuery, FundSuggestion};
use crate::models::goal::Goal;
use crate::models::investment::{InvestmentRecord, InvestmentRequest};
use crate::models::kyc::{KycStatus, KycSubmission};
use crate::models::market::MarketIndex;
use crate::models::reminder::{NewReminder, Reminder, ReminderPatch};

use super::client::ApiClient;
use super::traits::FundApi;

pub const FUNDS: &str = "/api/funds";
pub const FUNDS_ALL: &str = "/api/funds/all";
pub const SEARCH_SUGGEST: &str = "/api/search/suggest";
pub const COMPARE: &str = "/api/compare";
pub const OVERLAP: &str = "/api/overlap";
pub const GOALS: &str = "/api/goals";
pub const REMINDERS: &str = "/api/reminders";
pub const KYC_SUBMIT: &str = "/api/kyc/submit";
pub const INVESTMENTS: &str = "/api/investments";
pub const MARKET_INDICES: &str = "/api/market/indices";
pub const HEALTH: &str = "/health";

/// Body for the compare and overlap endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FundIdsRequest<'a> {
    fund_ids: &'a [String],
}

// The compare endpoint answers either `[Fund]` or `{ funds: [Fund] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ComparePayload {
    List(Vec<Fund>),
    Wrapped { funds: Vec<Fund> },
}

// Same for overlap: `[OverlapPair]` or `{ pairs | overlaps: [OverlapPair] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OverlapPayload {
    List(Vec<OverlapPair>),
    Wrapped {
        #[serde(alias = "overlaps")]
        pairs: Vec<OverlapPair>,
    },
}

fn item_path(base: &str, id: &str) -> Result<String, CoreError> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        return Err(CoreError::ValidationError(format!("Invalid id '{id}'")));
    }
    Ok(format!("{base}/{id}"))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FundApi for ApiClient {
    async fn list_funds(&self, query: &FundQuery) -> Result<Page<Fund>, CoreError> {
        let pairs = query.to_pairs();
        self.get_page(FUNDS, &pairs).await
    }

    async fn get_fund(&self, id: &str) -> Result<Fund, CoreError> {
        let path = item_path(FUNDS, id)?;
        self.get(&path, &[]).await
    }

    async fn all_funds(&self) -> Result<Vec<Fund>, CoreError> {
        self.get(FUNDS_ALL, &[]).await
    }

    async fn suggest(&self, query: &str, limit: u32) -> Result<Vec<FundSuggestion>, CoreError> {
        let pairs = vec![
            ("q".to_string(), query.trim().to_string()),
            ("limit".to_string(), limit.max(1).to_string()),
        ];
        self.get(SEARCH_SUGGEST, &pairs).await
    }

    async fn compare_funds(&self, fund_ids: &[String]) -> Result<Vec<Fund>, CoreError> {
        let payload: ComparePayload = self.post(COMPARE, &FundIdsRequest { fund_ids }).await?;
        Ok(match payload {
            ComparePayload::List(funds) | ComparePayload::Wrapped { funds } => funds,
        })
    }

    async fn fund_overlap(&self, fund_ids: &[String]) -> Result<Vec<OverlapPair>, CoreError> {
        let payload: OverlapPayload = self.post(OVERLAP, &FundIdsRequest { fund_ids }).await?;
        Ok(match payload {
            OverlapPayload::List(pairs) | OverlapPayload::Wrapped { pairs } => pairs,
        })
    }

    async fn list_goals(&self) -> Result<Vec<Goal>, CoreError> {
        self.get(GOALS, &[]).await
    }

    async fn create_goal(&self, goal: &Goal) -> Result<Goal, CoreError> {
        self.post(GOALS, goal).await
    }

    async fn update_goal(&self, id: &str, goal: &Goal) -> Result<Goal, CoreError> {
        let path = item_path(GOALS, id)?;
        self.put(&path, goal).await
    }

    async fn delete_goal(&self, id: &str) -> Result<(), CoreError> {
        let path = item_path(GOALS, id)?;
        self.delete(&path).await
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>, CoreError> {
        self.get(REMINDERS, &[]).await
    }

    async fn create_reminder(&self, reminder: &NewReminder) -> Result<Reminder, CoreError> {
        self.post(REMINDERS, reminder).await
    }

    async fn update_reminder(&self, id: &str, patch: &ReminderPatch) -> Result<Reminder, CoreError> {
        let path = item_path(REMINDERS, id)?;
        self.patch(&path, patch).await
    }

    async fn delete_reminder(&self, id: &str) -> Result<(), CoreError> {
        let path = item_path(REMINDERS, id)?;
        self.delete(&path).await
    }

    async fn submit_kyc(&self, submission: &KycSubmission) -> Result<KycStatus, CoreError> {
        self.post(KYC_SUBMIT, submission).await
    }

    async fn create_investment(&self, request: &InvestmentRequest) -> Result<InvestmentRecord, CoreError> {
        self.post(INVESTMENTS, request).await
    }

    async fn market_indices(&self) -> Result<Vec<MarketIndex>, CoreError> {
        self.get(MARKET_INDICES, &[]).await
    }

    async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.get_raw(HEALTH).await
    }
}
