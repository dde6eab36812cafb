use std::sync::Arc;
use tracing::debug;

use crate::analytics::planner::plan_goal;
use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::goal::Goal;

pub const MAX_GOAL_YEARS: u32 = 50;
pub const MAX_RATE_PCT: f64 = 50.0;

/// Goal validation, planning and remote CRUD (`/api/goals`).
pub struct GoalService {
    api: Arc<dyn FundApi>,
}

impl GoalService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Goal>, CoreError> {
        self.api.list_goals().await
    }

    /// Validate, fill in the monthly SIP, then create on the backend.
    pub async fn create(&self, goal: Goal) -> Result<Goal, CoreError> {
        let goal = prepare_goal(goal)?;
        debug!("Creating goal '{}' (SIP {:.2}/month)", goal.name, goal.monthly_sip);
        self.api.create_goal(&goal).await
    }

    pub async fn update(&self, goal: Goal) -> Result<Goal, CoreError> {
        let goal = prepare_goal(goal)?;
        self.api.update_goal(&goal.id, &goal).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_goal(id).await
    }
}

/// Check a goal's inputs.
pub fn validate_goal(goal: &Goal) -> Result<(), CoreError> {
    if goal.name.trim().is_empty() {
        return Err(CoreError::ValidationError("Goal name must not be empty".into()));
    }
    if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Target amount must be positive, got {}",
            goal.target_amount
        )));
    }
    if !goal.current_savings.is_finite() || goal.current_savings < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Current savings must not be negative, got {}",
            goal.current_savings
        )));
    }
    if goal.target_years == 0 || goal.target_years > MAX_GOAL_YEARS {
        return Err(CoreError::ValidationError(format!(
            "Goal horizon must be between 1 and {MAX_GOAL_YEARS} years, got {}",
            goal.target_years
        )));
    }
    for (label, rate) in [
        ("Expected return", goal.expected_return),
        ("Inflation rate", goal.inflation_rate),
    ] {
        if !rate.is_finite() || !(0.0..=MAX_RATE_PCT).contains(&rate) {
            return Err(CoreError::ValidationError(format!(
                "{label} must be between 0% and {MAX_RATE_PCT}%, got {rate}"
            )));
        }
    }
    Ok(())
}

/// Validate and recompute the cached `monthly_sip`.
pub fn prepare_goal(mut goal: Goal) -> Result<Goal, CoreError> {
    validate_goal(&goal)?;
    goal.name = goal.name.trim().to_string();
    goal.monthly_sip = plan_goal(&goal).monthly_sip;
    Ok(goal)
}
