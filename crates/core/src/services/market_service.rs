use std::sync::Arc;

use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::envelope::HealthStatus;
use crate::models::market::MarketIndex;

/// Market index ticker and backend health.
pub struct MarketService {
    api: Arc<dyn FundApi>,
}

impl MarketService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    pub async fn indices(&self) -> Result<Vec<MarketIndex>, CoreError> {
        self.api.market_indices().await
    }

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.api.health().await
    }

    /// `true` if `/health` answers with a healthy status; errors count as down.
    pub async fn is_backend_up(&self) -> bool {
        self.api.health().await.is_ok_and(|h| h.is_healthy())
    }
}
