use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Standard backend response wrapper: `{ success, data | error }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,

    #[serde(default = "Option::default")]
    pub data: Option<T>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Present on list endpoints
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
    /// Best available failure text for a `success: false` envelope.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Request was not successful".to_string())
    }

    /// Unwrap `data`, turning `success: false` into [`CoreError::Api`] and a
    /// missing payload into [`CoreError::MalformedEnvelope`].
    pub fn into_data(self, endpoint: &str) -> Result<T, CoreError> {
        if !self.success {
            return Err(CoreError::Api {
                endpoint: endpoint.to_string(),
                message: self.failure_message(),
            });
        }
        self.data.ok_or_else(|| {
            CoreError::MalformedEnvelope(format!("missing 'data' in response from {endpoint}"))
        })
    }

    /// Like [`into_data`](Self::into_data) for endpoints whose payload is
    /// irrelevant (deletes); only `success` is checked.
    pub fn into_unit(self, endpoint: &str) -> Result<(), CoreError> {
        if self.success {
            Ok(())
        } else {
            Err(CoreError::Api {
                endpoint: endpoint.to_string(),
                message: self.failure_message(),
            })
        }
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Unwrap a list payload together with its pagination metadata.
    /// When the backend omits pagination, a single page covering all
    /// returned items is assumed.
    pub fn into_page(self, endpoint: &str) -> Result<Page<T>, CoreError> {
        let pagination = self.pagination.clone();
        let items = self.into_data(endpoint)?;
        let pagination = pagination.unwrap_or_else(|| Pagination::single(items.len() as u64));
        Ok(Page { items, pagination })
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

impl Pagination {
    /// One page holding every item.
    #[must_use]
    pub fn single(total: u64) -> Self {
        Self {
            page: 1,
            limit: total.min(u64::from(u32::MAX)) as u32,
            total,
            total_pages: u32::from(total > 0),
            has_next: false,
            has_prev: false,
        }
    }
}

/// A page of results plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Body of `GET /health`, which is not wrapped in an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.to_lowercase().as_str(), "ok" | "healthy" | "up")
    }
}
