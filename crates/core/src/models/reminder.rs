use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serialization::{aliased_serde, float_or_string_opt, string_or_number, KeyAliases};

const REMINDER_KEYS: &[KeyAliases] = &[
    ("id", &["id", "_id"]),
    ("reminderType", &["reminderType", "type"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Sip,
    Goal,
    Kyc,
    Review,
    #[serde(other)]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Once,
    Monthly,
    Quarterly,
    Yearly,
}

impl Default for ReminderFrequency {
    fn default() -> Self {
        ReminderFrequency::Once
    }
}

/// A reminder stored on the backend (`/api/reminders`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Reminder {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub title: String,

    #[serde(default = "default_reminder_type")]
    pub reminder_type: ReminderType,

    pub due_date: NaiveDate,

    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub amount: Option<f64>,

    #[serde(default)]
    pub fund_id: Option<String>,

    #[serde(default)]
    pub frequency: ReminderFrequency,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub notes: Option<String>,
}

aliased_serde!(Reminder, REMINDER_KEYS);

fn default_reminder_type() -> ReminderType {
    ReminderType::Custom
}

fn default_active() -> bool {
    true
}

/// Body for `POST /api/reminders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    pub reminder_type: ReminderType,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_id: Option<String>,
    pub frequency: ReminderFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewReminder {
    pub fn new(title: impl Into<String>, reminder_type: ReminderType, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            reminder_type,
            due_date,
            amount: None,
            fund_id: None,
            frequency: ReminderFrequency::Once,
            notes: None,
        }
    }
}

/// Body for `PATCH /api/reminders/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<ReminderFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReminderPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
