use chrono::{NaiveDate, TimeDelta};
use std::sync::Arc;

use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::reminder::{NewReminder, Reminder, ReminderPatch, ReminderType};

/// Reminders CRUD (`/api/reminders`) plus the "upcoming" widget.
pub struct ReminderService {
    api: Arc<dyn FundApi>,
}

impl ReminderService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Reminder>, CoreError> {
        self.api.list_reminders().await
    }

    pub async fn create(&self, reminder: &NewReminder) -> Result<Reminder, CoreError> {
        if reminder.title.trim().is_empty() {
            return Err(CoreError::ValidationError("Reminder title must not be empty".into()));
        }
        if reminder.reminder_type == ReminderType::Sip
            && !reminder.amount.is_some_and(|a| a.is_finite() && a > 0.0)
        {
            return Err(CoreError::ValidationError(
                "SIP reminders need a positive amount".into(),
            ));
        }
        self.api.create_reminder(reminder).await
    }

    pub async fn update(&self, id: &str, patch: &ReminderPatch) -> Result<Reminder, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::ValidationError("Nothing to update".into()));
        }
        self.api.update_reminder(id, patch).await
    }

    /// Mark a reminder inactive without deleting it.
    pub async fn deactivate(&self, id: &str) -> Result<Reminder, CoreError> {
        let patch = ReminderPatch {
            is_active: Some(false),
            ..ReminderPatch::default()
        };
        self.api.update_reminder(id, &patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_reminder(id).await
    }

    /// Active reminders due between `today` and `today + days`, soonest first.
    pub async fn upcoming(&self, today: NaiveDate, days: i64) -> Result<Vec<Reminder>, CoreError> {
        let reminders = self.api.list_reminders().await?;
        Ok(upcoming_reminders(reminders, today, days))
    }
}

/// Filter and sort already-fetched reminders for the "upcoming" widget.
#[must_use]
pub fn upcoming_reminders(reminders: Vec<Reminder>, today: NaiveDate, days: i64) -> Vec<Reminder> {
    // Windows past the calendar's end saturate instead of overflowing.
    let horizon = TimeDelta::try_days(days.max(0))
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(NaiveDate::MAX);
    let mut due: Vec<Reminder> = reminders
        .into_iter()
        .filter(|r| r.is_active && r.due_date >= today && r.due_date <= horizon)
        .collect();
    due.sort_by_key(|r| r.due_date);
    due
}
