use crate::models::analytics::{ComparisonSummary, MetricLeader};
use crate::models::fund::Fund;

/// Compare page limits.
pub const MIN_COMPARE_FUNDS: usize = 2;
pub const MAX_COMPARE_FUNDS: usize = 4;

/// Metrics that get a "best" badge on the comparison page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Returns1Y,
    Returns3Y,
    Returns5Y,
    ExpenseRatio,
    Aum,
    Rating,
}

impl Metric {
    fn value(self, fund: &Fund) -> Option<f64> {
        match self {
            Metric::Returns1Y => fund.returns_1y,
            Metric::Returns3Y => fund.returns_3y,
            Metric::Returns5Y => fund.returns_5y,
            Metric::ExpenseRatio => fund.expense_ratio,
            Metric::Aum => fund.aum,
            Metric::Rating => fund.rating,
        }
        .filter(|v| v.is_finite())
    }

    /// Expense ratio is the only metric where lower is better.
    #[must_use]
    pub fn lower_is_better(self) -> bool {
        matches!(self, Metric::ExpenseRatio)
    }
}

/// Fund with the best value for `metric`. Funds without the metric are
/// skipped; ties go to the first fund in input order.
#[must_use]
pub fn best_by(funds: &[Fund], metric: Metric) -> Option<MetricLeader> {
    let mut best: Option<(&Fund, f64)> = None;
    for fund in funds {
        let Some(value) = metric.value(fund) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, current)) if metric.lower_is_better() => value < current,
            Some((_, current)) => value > current,
        };
        if better {
            best = Some((fund, value));
        }
    }
    best.map(|(fund, value)| MetricLeader {
        fund_id: fund.id.clone(),
        fund_name: fund.name.clone(),
        value,
    })
}

/// Best 1-year performer (highest `returns1Y`, first wins on ties).
#[must_use]
pub fn best_one_year_performer(funds: &[Fund]) -> Option<MetricLeader> {
    best_by(funds, Metric::Returns1Y)
}

/// All comparison badges at once.
#[must_use]
pub fn summarize(funds: &[Fund]) -> ComparisonSummary {
    ComparisonSummary {
        best_1y: best_by(funds, Metric::Returns1Y),
        best_3y: best_by(funds, Metric::Returns3Y),
        best_5y: best_by(funds, Metric::Returns5Y),
        lowest_expense: best_by(funds, Metric::ExpenseRatio),
        largest_aum: best_by(funds, Metric::Aum),
        highest_rating: best_by(funds, Metric::Rating),
    }
}
