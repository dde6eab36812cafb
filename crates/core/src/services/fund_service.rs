use std::sync::Arc;
use tracing::debug;

use crate::analytics::search::{filter_funds, FundFilter};
use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::envelope::Page;
use crate::models::fund::{Fund, FundQuery, FundSuggestion};

/// Suggestions requested per keystroke.
pub const DEFAULT_SUGGESTION_LIMIT: u32 = 8;

/// Queries shorter than this don't hit the suggest endpoint.
pub const MIN_SUGGEST_QUERY_LEN: usize = 2;

/// Fund listing, detail and search.
pub struct FundService {
    api: Arc<dyn FundApi>,
}

impl FundService {
    pub fn new(api: Arc<dyn FundApi>) -> Self {
        Self { api }
    }

    /// One page of the server-side listing.
    pub async fn list(&self, query: &FundQuery) -> Result<Page<Fund>, CoreError> {
        self.api.list_funds(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Fund, CoreError> {
        self.api.get_fund(id).await
    }

    pub async fn all(&self) -> Result<Vec<Fund>, CoreError> {
        self.api.all_funds().await
    }

    /// Autocomplete. Short or blank queries return an empty list without a
    /// network round trip.
    pub async fn suggest(&self, query: &str) -> Result<Vec<FundSuggestion>, CoreError> {
        let q = query.trim();
        if q.chars().count() < MIN_SUGGEST_QUERY_LEN {
            return Ok(Vec::new());
        }
        self.api.suggest(q, DEFAULT_SUGGESTION_LIMIT).await
    }

    /// Fetch the full catalogue and filter/sort it locally.
    pub async fn search_local(&self, filter: &FundFilter) -> Result<Vec<Fund>, CoreError> {
        let funds = self.api.all_funds().await?;
        let matched: Vec<Fund> = filter_funds(&funds, filter).into_iter().cloned().collect();
        debug!("Local search matched {} of {} funds", matched.len(), funds.len());
        Ok(matched)
    }
}
