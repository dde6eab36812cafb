pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use analytics::planner::plan_goal;
use analytics::search::FundFilter;
use api::client::{ApiClient, TokenStore};
use api::traits::FundApi;
use config::ClientConfig;
use errors::CoreError;
use models::{
    analytics::{Comparison, GoalPlan, OverlapReport},
    envelope::{HealthStatus, Page},
    fund::{Fund, FundQuery, FundSuggestion},
    goal::{Goal, GoalType},
    investment::{InvestmentRecord, InvestmentRequest},
    kyc::{KycStatus, KycSubmission},
    market::MarketIndex,
    profile::{CompareSelection, LocalProfile},
    reminder::{NewReminder, Reminder, ReminderPatch},
    settings::Settings,
};
use services::{
    compare_service::CompareService, fund_service::FundService, goal_service::{prepare_goal, GoalService},
    investment_service::InvestmentService, kyc_service::KycService, market_service::MarketService,
    overlap_service::OverlapService, reminder_service::ReminderService,
};
use storage::manager::StorageManager;

/// Main entry point for the FundScope core library.
/// Holds the local profile and all services that talk to the fund backend.
#[must_use]
pub struct FundScope {
    profile: LocalProfile,
    api: Arc<dyn FundApi>,
    token: TokenStore,
    fund_service: FundService,
    compare_service: CompareService,
    overlap_service: OverlapService,
    goal_service: GoalService,
    reminder_service: ReminderService,
    kyc_service: KycService,
    investment_service: InvestmentService,
    market_service: MarketService,
    /// Tracks whether the profile changed since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for FundScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundScope")
            .field("goals", &self.profile.goals.len())
            .field("compare_selection", &self.profile.compare_selection.ids())
            .field("logged_in", &self.token.is_set())
            .field("settings", &self.profile.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FundScope {
    /// Fresh profile talking to the backend described by `config`.
    pub fn connect(config: ClientConfig) -> Result<Self, CoreError> {
        Self::with_profile_and_config(LocalProfile::default(), config)
    }

    /// Fresh profile talking to the backend named in the environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::connect(ClientConfig::from_env())
    }

    /// Fresh profile over any [`FundApi`] implementation.
    ///
    /// `token` should be the slot the implementation reads its bearer token
    /// from, so that logins made through the facade reach the wire.
    pub fn with_api(api: Arc<dyn FundApi>, token: TokenStore) -> Self {
        Self::build(LocalProfile::default(), api, token)
    }

    /// Existing profile over any [`FundApi`] implementation.
    pub fn with_profile(profile: LocalProfile, api: Arc<dyn FundApi>, token: TokenStore) -> Self {
        Self::build(profile, api, token)
    }

    /// Load an encrypted profile and connect. A base URL saved in the
    /// profile's settings wins over the one in `config`.
    pub fn load_from_bytes(encrypted: &[u8], password: &str, config: ClientConfig) -> Result<Self, CoreError> {
        let profile = StorageManager::load_from_bytes(encrypted, password)?;
        Self::with_profile_and_config(profile, config)
    }

    /// Load from an encrypted file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str, config: ClientConfig) -> Result<Self, CoreError> {
        let profile = StorageManager::load_from_file(path, password)?;
        Self::with_profile_and_config(profile, config)
    }

    /// Save the profile to encrypted bytes. Clears the unsaved-changes flag.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.profile, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Save to an encrypted file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.profile, path, password)?;
        self.dirty = false;
        Ok(())
    }

    // ── Local goals ─────────────────────────────────────────────────

    /// A goal pre-filled with the profile's default return and inflation.
    pub fn new_goal(
        &self,
        name: impl Into<String>,
        goal_type: GoalType,
        target_amount: f64,
        current_savings: f64,
        target_years: u32,
    ) -> Goal {
        Goal::new(name, goal_type, target_amount, current_savings, target_years).with_rates(
            self.profile.settings.default_expected_return,
            self.profile.settings.default_inflation_rate,
        )
    }

    /// Validate, plan and store a goal locally. Returns its id.
    pub fn add_goal(&mut self, goal: Goal) -> Result<String, CoreError> {
        let goal = prepare_goal(goal)?;
        if self.profile.goals.iter().any(|g| g.id == goal.id) {
            return Err(CoreError::ValidationError(format!(
                "A goal with id {} already exists",
                goal.id
            )));
        }
        let id = goal.id.clone();
        self.profile.goals.push(goal);
        self.dirty = true;
        Ok(id)
    }

    /// Replace the stored goal with the same id.
    pub fn update_goal(&mut self, goal: Goal) -> Result<(), CoreError> {
        let goal = prepare_goal(goal)?;
        let slot = self
            .profile
            .goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| CoreError::GoalNotFound(goal.id.clone()))?;
        *slot = goal;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_goal(&mut self, goal_id: &str) -> Result<Goal, CoreError> {
        let pos = self
            .profile
            .goals
            .iter()
            .position(|g| g.id == goal_id)
            .ok_or_else(|| CoreError::GoalNotFound(goal_id.to_string()))?;
        self.dirty = true;
        Ok(self.profile.goals.remove(pos))
    }

    #[must_use]
    pub fn goal(&self, goal_id: &str) -> Option<&Goal> {
        self.profile.goals.iter().find(|g| g.id == goal_id)
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.profile.goals
    }

    pub fn goal_plan(&self, goal_id: &str) -> Result<GoalPlan, CoreError> {
        self.goal(goal_id)
            .map(plan_goal)
            .ok_or_else(|| CoreError::GoalNotFound(goal_id.to_string()))
    }

    /// Goals as a plain JSON array.
    pub fn export_goals_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.profile.goals)
            .map_err(|e| CoreError::Serialization(format!("Failed to export goals: {e}")))
    }

    /// Merge goals from a JSON array: same id replaces, new ids are appended.
    /// Every goal is validated first; one bad entry rejects the whole import.
    pub fn import_goals_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming: Vec<Goal> = serde_json::from_str(json)?;
        let prepared = incoming
            .into_iter()
            .map(prepare_goal)
            .collect::<Result<Vec<_>, _>>()?;

        let count = prepared.len();
        for goal in prepared {
            match self.profile.goals.iter_mut().find(|g| g.id == goal.id) {
                Some(existing) => *existing = goal,
                None => self.profile.goals.push(goal),
            }
        }
        if count > 0 {
            self.dirty = true;
        }
        info!("Imported {} goals", count);
        Ok(count)
    }

    // ── Compare selection ───────────────────────────────────────────

    /// Queue a fund for comparison. `Ok(false)` if it was already queued.
    pub fn add_to_compare(&mut self, fund_id: &str) -> Result<bool, CoreError> {
        let added = self.profile.compare_selection.add(fund_id)?;
        if added {
            self.dirty = true;
        }
        Ok(added)
    }

    pub fn remove_from_compare(&mut self, fund_id: &str) -> bool {
        let removed = self.profile.compare_selection.remove(fund_id);
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn toggle_compare(&mut self, fund_id: &str) -> Result<bool, CoreError> {
        let selected = self.profile.compare_selection.toggle(fund_id)?;
        self.dirty = true;
        Ok(selected)
    }

    pub fn clear_compare(&mut self) {
        if !self.profile.compare_selection.is_empty() {
            self.profile.compare_selection.clear();
            self.dirty = true;
        }
    }

    #[must_use]
    pub fn compare_selection(&self) -> &CompareSelection {
        &self.profile.compare_selection
    }

    // ── Session & settings ──────────────────────────────────────────

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.token.get()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.is_set()
    }

    /// Store (or with `None`, forget) the bearer token.
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.token.set(token);
        self.profile.access_token = self.token.get();
        self.dirty = true;
    }

    pub fn logout(&mut self) {
        self.set_access_token(None);
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.profile.settings
    }

    /// Replace settings. A changed `api_base_url` applies the next time the
    /// profile is loaded.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        if let Some(url) = &settings.api_base_url {
            ClientConfig::new(url.clone()).validate()?;
        }
        for (label, rate) in [
            ("Default expected return", settings.default_expected_return),
            ("Default inflation rate", settings.default_inflation_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "{label} must be a non-negative percentage, got {rate}"
                )));
            }
        }
        self.profile.settings = settings;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn profile(&self) -> &LocalProfile {
        &self.profile
    }

    /// Returns `true` if the profile changed since the last save/load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Funds ───────────────────────────────────────────────────────

    pub async fn list_funds(&mut self, query: &FundQuery) -> Result<Page<Fund>, CoreError> {
        let result = self.fund_service.list(query).await;
        self.guard(result)
    }

    pub async fn fund(&mut self, fund_id: &str) -> Result<Fund, CoreError> {
        let result = self.fund_service.get(fund_id).await;
        self.guard(result)
    }

    pub async fn search_funds(&mut self, filter: &FundFilter) -> Result<Vec<Fund>, CoreError> {
        let result = self.fund_service.search_local(filter).await;
        self.guard(result)
    }

    pub async fn suggest(&mut self, query: &str) -> Result<Vec<FundSuggestion>, CoreError> {
        let result = self.fund_service.suggest(query).await;
        self.guard(result)
    }

    pub async fn compare(&mut self, fund_ids: &[String]) -> Result<Comparison, CoreError> {
        let result = self.compare_service.compare(fund_ids).await;
        self.guard(result)
    }

    /// Compare whatever is currently queued in the compare selection.
    pub async fn compare_selected(&mut self) -> Result<Comparison, CoreError> {
        let ids = self.profile.compare_selection.ids().to_vec();
        self.compare(&ids).await
    }

    pub async fn analyze_overlap(&mut self, fund_ids: &[String]) -> Result<OverlapReport, CoreError> {
        let result = self.overlap_service.analyze(fund_ids).await;
        self.guard(result)
    }

    // ── Remote goals ────────────────────────────────────────────────

    pub async fn remote_goals(&mut self) -> Result<Vec<Goal>, CoreError> {
        let result = self.goal_service.list().await;
        self.guard(result)
    }

    /// Push a local goal to the backend.
    pub async fn upload_goal(&mut self, goal_id: &str) -> Result<Goal, CoreError> {
        let goal = self
            .goal(goal_id)
            .cloned()
            .ok_or_else(|| CoreError::GoalNotFound(goal_id.to_string()))?;
        let result = self.goal_service.create(goal).await;
        self.guard(result)
    }

    pub async fn update_remote_goal(&mut self, goal: Goal) -> Result<Goal, CoreError> {
        let result = self.goal_service.update(goal).await;
        self.guard(result)
    }

    pub async fn delete_remote_goal(&mut self, goal_id: &str) -> Result<(), CoreError> {
        let result = self.goal_service.delete(goal_id).await;
        self.guard(result)
    }

    // ── Reminders ───────────────────────────────────────────────────

    pub async fn reminders(&mut self) -> Result<Vec<Reminder>, CoreError> {
        let result = self.reminder_service.list().await;
        self.guard(result)
    }

    pub async fn create_reminder(&mut self, reminder: &NewReminder) -> Result<Reminder, CoreError> {
        let result = self.reminder_service.create(reminder).await;
        self.guard(result)
    }

    pub async fn update_reminder(&mut self, reminder_id: &str, patch: &ReminderPatch) -> Result<Reminder, CoreError> {
        let result = self.reminder_service.update(reminder_id, patch).await;
        self.guard(result)
    }

    pub async fn deactivate_reminder(&mut self, reminder_id: &str) -> Result<Reminder, CoreError> {
        let result = self.reminder_service.deactivate(reminder_id).await;
        self.guard(result)
    }

    pub async fn delete_reminder(&mut self, reminder_id: &str) -> Result<(), CoreError> {
        let result = self.reminder_service.delete(reminder_id).await;
        self.guard(result)
    }

    /// Active reminders due within `days` of `today`, soonest first.
    pub async fn upcoming_reminders(&mut self, today: NaiveDate, days: i64) -> Result<Vec<Reminder>, CoreError> {
        let result = self.reminder_service.upcoming(today, days).await;
        self.guard(result)
    }

    // ── KYC, investing, market ──────────────────────────────────────

    pub async fn submit_kyc(&mut self, submission: KycSubmission) -> Result<KycStatus, CoreError> {
        let result = self.kyc_service.submit(submission).await;
        self.guard(result)
    }

    pub async fn invest(&mut self, fund: &Fund, request: &InvestmentRequest) -> Result<InvestmentRecord, CoreError> {
        let result = self.investment_service.invest(fund, request).await;
        self.guard(result)
    }

    pub async fn market_indices(&mut self) -> Result<Vec<MarketIndex>, CoreError> {
        let result = self.market_service.indices().await;
        self.guard(result)
    }

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.market_service.health().await
    }

    pub async fn is_backend_up(&self) -> bool {
        self.market_service.is_backend_up().await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn with_profile_and_config(profile: LocalProfile, config: ClientConfig) -> Result<Self, CoreError> {
        let config = match &profile.settings.api_base_url {
            Some(url) if !url.trim().is_empty() => ClientConfig {
                base_url: ClientConfig::new(url.clone()).base_url,
                ..config
            },
            _ => config,
        };
        let token = TokenStore::default();
        let client = ApiClient::with_token_store(config, token.clone())?;
        info!("Connecting to {}", client.config().base_url);
        Ok(Self::build(profile, Arc::new(client), token))
    }

    fn build(profile: LocalProfile, api: Arc<dyn FundApi>, token: TokenStore) -> Self {
        token.set(profile.access_token.clone());
        Self {
            fund_service: FundService::new(Arc::clone(&api)),
            compare_service: CompareService::new(Arc::clone(&api)),
            overlap_service: OverlapService::new(Arc::clone(&api)),
            goal_service: GoalService::new(Arc::clone(&api)),
            reminder_service: ReminderService::new(Arc::clone(&api)),
            kyc_service: KycService::new(Arc::clone(&api)),
            investment_service: InvestmentService::new(Arc::clone(&api)),
            market_service: MarketService::new(Arc::clone(&api)),
            api,
            token,
            profile,
            dirty: false,
        }
    }

    /// Single exit for remote results: a 401 forgets the session.
    fn guard<T>(&mut self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        if let Err(e) = &result {
            if e.is_auth_error() {
                warn!("Session rejected by backend, logging out");
                self.token.clear();
                if self.profile.access_token.take().is_some() {
                    self.dirty = true;
                }
            }
        }
        result
    }

    /// The backend this facade talks to.
    #[must_use]
    pub fn api(&self) -> &Arc<dyn FundApi> {
        &self.api
    }
}
