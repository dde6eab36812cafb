use serde::{Deserialize, Serialize};

use super::fund::Fund;

/// A security held by both funds of a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonHolding {
    pub name: String,
    /// Weight in the first fund (percent), if reported
    #[serde(default, alias = "weight1")]
    pub weight_a: Option<f64>,
    /// Weight in the second fund (percent), if reported
    #[serde(default, alias = "weight2")]
    pub weight_b: Option<f64>,
}

impl CommonHolding {
    /// The overlapping share: the smaller of the two weights.
    #[must_use]
    pub fn overlap_weight(&self) -> f64 {
        match (self.weight_a, self.weight_b) {
            (Some(a), Some(b)) => a.min(b).max(0.0),
            _ => 0.0,
        }
    }
}

/// Overlap between one pair of funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapPair {
    #[serde(alias = "fund1")]
    pub fund_a: String,
    #[serde(alias = "fund2")]
    pub fund_b: String,
    /// |A∩B| / |A∪B| over holding identities, 0–1
    #[serde(default, alias = "jaccard")]
    pub jaccard_index: f64,
    /// Portfolio overlap in percent, 0–100
    #[serde(alias = "overlap", alias = "overlapPercent")]
    pub overlap_percentage: f64,
    /// Cosine similarity of sector weights, 0–1
    #[serde(default, alias = "sectorOverlap")]
    pub sector_similarity: f64,
    #[serde(default)]
    pub common_holdings: Vec<CommonHolding>,
}

/// Result of the overlap tool for 2–10 funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapReport {
    pub fund_ids: Vec<String>,
    pub pairs: Vec<OverlapPair>,
    /// Mean overlap percentage across all pairs
    pub average_overlap: f64,
    /// Index into `pairs` of the most overlapping pair
    pub most_overlapping: Option<usize>,
}

impl OverlapReport {
    #[must_use]
    pub fn most_overlapping_pair(&self) -> Option<&OverlapPair> {
        self.most_overlapping.and_then(|i| self.pairs.get(i))
    }

    /// Look up a pair regardless of argument order.
    #[must_use]
    pub fn pair(&self, a: &str, b: &str) -> Option<&OverlapPair> {
        self.pairs.iter().find(|p| {
            (p.fund_a == a && p.fund_b == b) || (p.fund_a == b && p.fund_b == a)
        })
    }
}

/// A fund singled out by the comparison page for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricLeader {
    pub fund_id: String,
    pub fund_name: String,
    pub value: f64,
}

/// "Best in class" badges on the comparison page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub best_1y: Option<MetricLeader>,
    pub best_3y: Option<MetricLeader>,
    pub best_5y: Option<MetricLeader>,
    pub lowest_expense: Option<MetricLeader>,
    pub largest_aum: Option<MetricLeader>,
    pub highest_rating: Option<MetricLeader>,
}

/// Funds side by side plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub funds: Vec<Fund>,
    pub summary: ComparisonSummary,
    /// Pairwise Pearson correlation of return vectors; `None` where undefined
    pub correlation: Vec<Vec<Option<f64>>>,
}

/// Future value breakdown of a SIP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipProjection {
    /// Sum of instalments
    pub invested: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

/// What it takes to reach a goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    /// Target expressed in money at the goal date
    pub inflated_target: f64,
    /// Where current savings get on their own
    pub future_value_of_savings: f64,
    /// Gap the SIP has to close (never negative)
    pub shortfall: f64,
    pub monthly_sip: f64,
    /// Current savings as a share of today's target, 0–100
    pub progress_pct: f64,
}
