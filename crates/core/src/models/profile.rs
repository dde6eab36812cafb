use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::goal::Goal;
use super::settings::Settings;

/// Maximum number of funds that can be queued for comparison.
pub const MAX_COMPARE_SELECTION: usize = 4;

/// Ordered, de-duplicated list of fund ids queued for the compare page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSelection {
    fund_ids: Vec<String>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fund. Returns `Ok(false)` if it was already selected.
    pub fn add(&mut self, fund_id: &str) -> Result<bool, CoreError> {
        let id = fund_id.trim();
        if id.is_empty() {
            return Err(CoreError::ValidationError("Fund id must not be empty".into()));
        }
        if self.contains(id) {
            return Ok(false);
        }
        if self.fund_ids.len() >= MAX_COMPARE_SELECTION {
            return Err(CoreError::SelectionFull(MAX_COMPARE_SELECTION));
        }
        self.fund_ids.push(id.to_string());
        Ok(true)
    }

    /// Remove a fund. Returns `true` if it was present.
    pub fn remove(&mut self, fund_id: &str) -> bool {
        let before = self.fund_ids.len();
        self.fund_ids.retain(|id| id != fund_id.trim());
        self.fund_ids.len() != before
    }

    /// Add if absent, remove if present. Returns whether the fund is now selected.
    pub fn toggle(&mut self, fund_id: &str) -> Result<bool, CoreError> {
        if self.remove(fund_id) {
            Ok(false)
        } else {
            self.add(fund_id).map(|_| true)
        }
    }

    pub fn clear(&mut self) {
        self.fund_ids.clear();
    }

    #[must_use]
    pub fn contains(&self, fund_id: &str) -> bool {
        self.fund_ids.iter().any(|id| id == fund_id.trim())
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.fund_ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fund_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fund_ids.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.fund_ids.len() >= MAX_COMPARE_SELECTION
    }
}

/// Everything kept on the user's device. Serialized, encrypted and saved as
/// one `.fscp` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalProfile {
    /// Goals planned locally
    pub goals: Vec<Goal>,

    pub compare_selection: CompareSelection,

    /// Bearer token for authenticated endpoints; cleared on 401
    pub access_token: Option<String>,

    pub settings: Settings,
}
