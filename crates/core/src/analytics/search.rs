use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::fund::Fund;

use super::category::{category_matches, sub_category_matches};

fn squash(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Loose text match used by the search box.
///
/// Case, spacing and punctuation are ignored. Matches when `query` is a
/// substring of `text` or its characters appear in `text` in order
/// ("hdfc100" matches "HDFC Top 100"). An empty query matches everything.
#[must_use]
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let query = squash(query);
    if query.is_empty() {
        return true;
    }
    let text = squash(text);
    if text.contains(&query) {
        return true;
    }
    let mut haystack = text.chars();
    query.chars().all(|q| haystack.any(|c| c == q))
}

/// Sort keys offered by the fund list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FundSortKey {
    Name,
    Returns1Y,
    Returns3Y,
    Returns5Y,
    Aum,
    ExpenseRatio,
    Rating,
    Nav,
}

impl FundSortKey {
    fn numeric(self, fund: &Fund) -> Option<f64> {
        match self {
            FundSortKey::Name => None,
            FundSortKey::Returns1Y => fund.returns_1y,
            FundSortKey::Returns3Y => fund.returns_3y,
            FundSortKey::Returns5Y => fund.returns_5y,
            FundSortKey::Aum => fund.aum,
            FundSortKey::ExpenseRatio => fund.expense_ratio,
            FundSortKey::Rating => fund.rating,
            FundSortKey::Nav => fund.nav,
        }
    }
}

/// Client-side filters applied to an already fetched fund list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub amc: Option<String>,
    pub risk_level: Option<String>,
    pub min_rating: Option<f64>,
    pub max_expense_ratio: Option<f64>,
    pub sort: Option<FundSortKey>,
    #[serde(default)]
    pub descending: bool,
}

impl FundFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn amc(mut self, amc: impl Into<String>) -> Self {
        self.amc = Some(amc.into());
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn max_expense_ratio(mut self, ratio: f64) -> Self {
        self.max_expense_ratio = Some(ratio);
        self
    }

    pub fn sort_by(mut self, key: FundSortKey, descending: bool) -> Self {
        self.sort = Some(key);
        self.descending = descending;
        self
    }

    /// Whether a single fund passes every active filter.
    #[must_use]
    pub fn matches(&self, fund: &Fund) -> bool {
        if let Some(q) = &self.query {
            let amc = fund.amc.as_deref().unwrap_or("");
            if !fuzzy_match(&fund.name, q) && !fuzzy_match(amc, q) {
                return false;
            }
        }
        if let Some(c) = &self.category {
            if !category_matches(fund.category.as_deref(), c) {
                return false;
            }
        }
        if let Some(s) = &self.sub_category {
            if !sub_category_matches(fund.sub_category.as_deref(), s) {
                return false;
            }
        }
        if let Some(amc) = &self.amc {
            let wanted = squash(amc);
            if !wanted.is_empty()
                && !fund.amc.as_deref().is_some_and(|a| squash(a).contains(&wanted))
            {
                return false;
            }
        }
        if let Some(risk) = &self.risk_level {
            let wanted = squash(risk);
            if !wanted.is_empty()
                && !fund.risk_level.as_deref().is_some_and(|r| squash(r) == wanted)
            {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if !fund.rating.is_some_and(|r| r >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_expense_ratio {
            if !fund.expense_ratio.is_some_and(|e| e <= max) {
                return false;
            }
        }
        true
    }
}

/// Apply a [`FundFilter`] to a list. Sorting is stable; funds missing the
/// sort value go last in either direction.
#[must_use]
pub fn filter_funds<'a>(funds: &'a [Fund], filter: &FundFilter) -> Vec<&'a Fund> {
    let mut result: Vec<&Fund> = funds.iter().filter(|f| filter.matches(f)).collect();

    if let Some(key) = filter.sort {
        let descending = filter.descending;
        result.sort_by(|a, b| {
            if key == FundSortKey::Name {
                let ord = a.name.to_lowercase().cmp(&b.name.to_lowercase());
                return if descending { ord.reverse() } else { ord };
            }
            match (key.numeric(a), key.numeric(b)) {
                (Some(x), Some(y)) => {
                    let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                    if descending { ord.reverse() } else { ord }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }

    result
}

/// Distinct AMC names in first-seen order, for the AMC dropdown.
#[must_use]
pub fn distinct_amcs(funds: &[Fund]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    funds
        .iter()
        .filter_map(|f| f.amc.as_ref())
        .filter(|amc| seen.insert(squash(amc)))
        .cloned()
        .collect()
}
