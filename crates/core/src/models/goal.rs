use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a goal is saving for. Drives default return assumptions in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Retirement,
    Education,
    House,
    Car,
    Vacation,
    Emergency,
    Wedding,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalType::Retirement => write!(f, "Retirement"),
            GoalType::Education => write!(f, "Education"),
            GoalType::House => write!(f, "House"),
            GoalType::Car => write!(f, "Car"),
            GoalType::Vacation => write!(f, "Vacation"),
            GoalType::Emergency => write!(f, "Emergency"),
            GoalType::Wedding => write!(f, "Wedding"),
            GoalType::Other => write!(f, "Other"),
        }
    }
}

/// A savings goal, stored locally (the `userGoals` blob) and/or on the backend.
///
/// `monthly_sip` is derived by the planner and cached here so list views
/// don't have to recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Local goals get a UUID; backend goals keep whatever id the server assigned
    #[serde(default = "new_goal_id", alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default = "default_goal_type")]
    pub goal_type: GoalType,

    /// Target in today's money
    pub target_amount: f64,

    #[serde(default)]
    pub current_savings: f64,

    pub target_years: u32,

    /// Expected annual return in percent
    #[serde(default = "default_expected_return")]
    pub expected_return: f64,

    /// Expected annual inflation in percent
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,

    #[serde(default)]
    pub monthly_sip: f64,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

pub const DEFAULT_EXPECTED_RETURN: f64 = 12.0;
pub const DEFAULT_INFLATION_RATE: f64 = 6.0;

fn new_goal_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_goal_type() -> GoalType {
    GoalType::Other
}

fn default_expected_return() -> f64 {
    DEFAULT_EXPECTED_RETURN
}

fn default_inflation_rate() -> f64 {
    DEFAULT_INFLATION_RATE
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        goal_type: GoalType,
        target_amount: f64,
        current_savings: f64,
        target_years: u32,
    ) -> Self {
        Self {
            id: new_goal_id(),
            name: name.into(),
            goal_type,
            target_amount,
            current_savings,
            target_years,
            expected_return: DEFAULT_EXPECTED_RETURN,
            inflation_rate: DEFAULT_INFLATION_RATE,
            monthly_sip: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn with_rates(mut self, expected_return: f64, inflation_rate: f64) -> Self {
        self.expected_return = expected_return;
        self.inflation_rate = inflation_rate;
        self
    }
}
