use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::analytics::OverlapPair;
use crate::models::envelope::{HealthStatus, Page};
use crate::models::fund::{Fund, FundQuery, FundSuggestion};
use crate::models::goal::Goal;
use crate::models::investment::{InvestmentRecord, InvestmentRequest};
use crate::models::kyc::{KycStatus, KycSubmission};
use crate::models::market::MarketIndex;
use crate::models::reminder::{NewReminder, Reminder, ReminderPatch};

/// Everything the pages ask of the fund backend.
///
/// [`ApiClient`](super::client::ApiClient) implements this over HTTP; tests
/// and offline shells can swap in their own implementation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FundApi: Send + Sync {
    // ── Funds ───────────────────────────────────────────────────────

    /// `GET /api/funds`: one page of the listing.
    async fn list_funds(&self, query: &FundQuery) -> Result<Page<Fund>, CoreError>;

    /// `GET /api/funds/:id`: detail payload including holdings when known.
    async fn get_fund(&self, id: &str) -> Result<Fund, CoreError>;

    /// `GET /api/funds/all`: the whole catalogue, for client-side filtering.
    async fn all_funds(&self) -> Result<Vec<Fund>, CoreError>;

    /// `GET /api/search/suggest`: autocomplete.
    async fn suggest(&self, query: &str, limit: u32) -> Result<Vec<FundSuggestion>, CoreError>;

    /// `POST /api/compare`: the requested funds, side by side.
    async fn compare_funds(&self, fund_ids: &[String]) -> Result<Vec<Fund>, CoreError>;

    /// `POST /api/overlap`: backend-computed pairwise overlap.
    async fn fund_overlap(&self, fund_ids: &[String]) -> Result<Vec<OverlapPair>, CoreError>;

    // ── Goals ───────────────────────────────────────────────────────

    async fn list_goals(&self) -> Result<Vec<Goal>, CoreError>;

    async fn create_goal(&self, goal: &Goal) -> Result<Goal, CoreError>;

    async fn update_goal(&self, id: &str, goal: &Goal) -> Result<Goal, CoreError>;

    async fn delete_goal(&self, id: &str) -> Result<(), CoreError>;

    // ── Reminders ───────────────────────────────────────────────────

    async fn list_reminders(&self) -> Result<Vec<Reminder>, CoreError>;

    async fn create_reminder(&self, reminder: &NewReminder) -> Result<Reminder, CoreError>;

    async fn update_reminder(&self, id: &str, patch: &ReminderPatch) -> Result<Reminder, CoreError>;

    async fn delete_reminder(&self, id: &str) -> Result<(), CoreError>;

    // ── Onboarding & transactions ───────────────────────────────────

    /// `POST /api/kyc/submit`
    async fn submit_kyc(&self, submission: &KycSubmission) -> Result<KycStatus, CoreError>;

    /// `POST /api/investments`
    async fn create_investment(&self, request: &InvestmentRequest) -> Result<InvestmentRecord, CoreError>;

    // ── Market ──────────────────────────────────────────────────────

    /// `GET /api/market/indices`
    async fn market_indices(&self) -> Result<Vec<MarketIndex>, CoreError>;

    /// `GET /health` (not envelope-wrapped)
    async fn health(&self) -> Result<HealthStatus, CoreError>;
}
