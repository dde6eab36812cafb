use serde::{Deserialize, Serialize};

use super::serialization::{
    aliased_serde, empty_string_as_none, float_or_string, float_or_string_opt, string_or_number,
    KeyAliases,
};

const FUND_KEYS: &[KeyAliases] = &[
    ("id", &["fundId", "schemeCode", "_id", "id"]),
    ("name", &["name", "schemeName"]),
    ("amc", &["amc", "fundHouse"]),
    ("subCategory", &["subCategory", "subcategory"]),
    ("nav", &["nav", "currentNav"]),
    ("riskLevel", &["riskLevel", "risk"]),
    ("holdings", &["holdings", "topHoldings"]),
    ("sectorAllocation", &["sectorAllocation", "sectors"]),
];

const HOLDING_KEYS: &[KeyAliases] = &[
    ("name", &["name", "companyName", "stockName"]),
    ("ticker", &["ticker", "symbol"]),
    ("weight", &["weight", "percentage", "allocation"]),
];

const SECTOR_KEYS: &[KeyAliases] = &[
    ("sector", &["sector", "name"]),
    ("weight", &["weight", "percentage", "allocation"]),
];

const SUGGESTION_KEYS: &[KeyAliases] = &[
    ("id", &["fundId", "schemeCode", "_id", "id"]),
    ("name", &["name", "schemeName"]),
    ("amc", &["amc", "fundHouse"]),
];

/// A mutual fund scheme as returned by `/api/funds` and `/api/funds/:id`.
///
/// Only `id` and `name` are required. Everything else is optional so that
/// list payloads (which omit holdings) and detail payloads share one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Fund {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub name: String,

    /// Fund house / AMC
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub amc: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sub_category: Option<String>,

    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub nav: Option<f64>,

    /// As sent by the backend (date or timestamp string)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub nav_date: Option<String>,

    /// Assets under management, in currency units
    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub aum: Option<f64>,

    /// Total expense ratio in percent
    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub expense_ratio: Option<f64>,

    #[serde(default, rename = "returns1M", deserialize_with = "float_or_string_opt")]
    pub returns_1m: Option<f64>,

    #[serde(default, rename = "returns6M", deserialize_with = "float_or_string_opt")]
    pub returns_6m: Option<f64>,

    #[serde(default, rename = "returns1Y", deserialize_with = "float_or_string_opt")]
    pub returns_1y: Option<f64>,

    #[serde(default, rename = "returns3Y", deserialize_with = "float_or_string_opt")]
    pub returns_3y: Option<f64>,

    #[serde(default, rename = "returns5Y", deserialize_with = "float_or_string_opt")]
    pub returns_5y: Option<f64>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub risk_level: Option<String>,

    /// Star rating, 0–5
    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub rating: Option<f64>,

    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub min_investment: Option<f64>,

    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub min_sip: Option<f64>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub exit_load: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub fund_manager: Option<String>,

    #[serde(default)]
    pub holdings: Vec<Holding>,

    #[serde(default)]
    pub sector_allocation: Vec<SectorWeight>,
}

aliased_serde!(Fund, FUND_KEYS);

impl Fund {
    /// Minimal fund with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amc: None,
            category: None,
            sub_category: None,
            nav: None,
            nav_date: None,
            aum: None,
            expense_ratio: None,
            returns_1m: None,
            returns_6m: None,
            returns_1y: None,
            returns_3y: None,
            returns_5y: None,
            risk_level: None,
            rating: None,
            min_investment: None,
            min_sip: None,
            exit_load: None,
            fund_manager: None,
            holdings: Vec::new(),
            sector_allocation: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_holdings(&self) -> bool {
        !self.holdings.is_empty()
    }

    /// Display label: "Name (AMC)" when the AMC is known.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.amc {
            Some(amc) if !self.name.to_lowercase().contains(&amc.to_lowercase()) => {
                format!("{} ({amc})", self.name)
            }
            _ => self.name.clone(),
        }
    }
}

/// One security held by a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Holding {
    pub name: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub ticker: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub isin: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sector: Option<String>,

    /// Percentage of the fund's assets
    #[serde(default, deserialize_with = "float_or_string_opt")]
    pub weight: Option<f64>,
}

aliased_serde!(Holding, HOLDING_KEYS);

impl Holding {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            ticker: None,
            isin: None,
            sector: None,
            weight: Some(weight),
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }
}

/// Share of a fund allocated to one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SectorWeight {
    pub sector: String,

    #[serde(deserialize_with = "float_or_string")]
    pub weight: f64,
}

aliased_serde!(SectorWeight, SECTOR_KEYS);

impl SectorWeight {
    pub fn new(sector: impl Into<String>, weight: f64) -> Self {
        Self {
            sector: sector.into(),
            weight,
        }
    }
}

/// Autocomplete entry from `/api/search/suggest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct FundSuggestion {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub name: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub amc: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
}

aliased_serde!(FundSuggestion, SUGGESTION_KEYS);

/// Query parameters for the paged fund listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl Default for FundQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            category: None,
            sub_category: None,
            search: None,
            sort_by: None,
        }
    }
}

/// Page size used by the fund listing when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

impl FundQuery {
    /// Render as `(key, value)` pairs for the query string.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.max(1).to_string()),
            ("limit".to_string(), self.limit.max(1).to_string()),
        ];
        let optional = [
            ("category", &self.category),
            ("subCategory", &self.sub_category),
            ("search", &self.search),
            ("sortBy", &self.sort_by),
        ];
        for (key, value) in optional {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), v.to_string()));
            }
        }
        pairs
    }
}
