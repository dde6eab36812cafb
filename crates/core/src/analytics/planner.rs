//! SIP and goal future-value math.
//!
//! All rates are annual percentages (12.0 means 12 %). Results are always
//! finite; degenerate inputs yield 0 instead of NaN or infinity.

use crate::models::analytics::{GoalPlan, SipProjection};
use crate::models::goal::Goal;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 12.0 / 100.0
}

/// Growth factor of a SIP paid at the start of each month:
/// ((1+r)^n − 1) / r × (1+r), or n when r is 0.
#[must_use]
pub fn sip_factor(annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_pct);
    if r.abs() < f64::EPSILON {
        return f64::from(months);
    }
    finite_or_zero(((1.0 + r).powf(f64::from(months)) - 1.0) / r * (1.0 + r))
}

/// Value after `months` of investing `monthly` at `annual_rate_pct`.
#[must_use]
pub fn sip_future_value(monthly: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if monthly <= 0.0 {
        return 0.0;
    }
    finite_or_zero(monthly * sip_factor(annual_rate_pct, months))
}

/// Value of a one-time investment after `years`, compounded annually.
#[must_use]
pub fn lumpsum_future_value(principal: f64, annual_rate_pct: f64, years: f64) -> f64 {
    if principal <= 0.0 || years < 0.0 {
        return 0.0;
    }
    finite_or_zero(principal * (1.0 + annual_rate_pct / 100.0).powf(years))
}

/// Today's `amount` expressed in money `years` from now.
#[must_use]
pub fn inflation_adjusted(amount: f64, inflation_pct: f64, years: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    finite_or_zero(amount * (1.0 + inflation_pct / 100.0).powf(years.max(0.0)))
}

/// Monthly SIP needed to grow `current_savings` plus instalments to `target`.
///
/// Returns 0 when current savings already reach the target on their own,
/// and 0 when the annuity factor is zero (no months to invest).
#[must_use]
pub fn required_monthly_sip(target: f64, current_savings: f64, annual_rate_pct: f64, years: u32) -> f64 {
    let fv_savings = lumpsum_future_value(current_savings, annual_rate_pct, f64::from(years));
    let remaining = target - fv_savings;
    if !remaining.is_finite() || remaining <= 0.0 {
        return 0.0;
    }
    let factor = sip_factor(annual_rate_pct, years.saturating_mul(12));
    if factor <= 0.0 || !factor.is_finite() {
        return 0.0;
    }
    finite_or_zero(remaining / factor)
}

/// Invested amount vs. gains for a SIP, as shown by the calculator widget.
#[must_use]
pub fn sip_projection(monthly: f64, annual_rate_pct: f64, years: u32) -> SipProjection {
    let months = years.saturating_mul(12);
    let invested = if monthly > 0.0 { monthly * f64::from(months) } else { 0.0 };
    let total_value = sip_future_value(monthly, annual_rate_pct, months);
    SipProjection {
        invested,
        estimated_returns: (total_value - invested).max(0.0),
        total_value,
    }
}

/// Plan for a goal: inflate the target, grow current savings, and size the
/// SIP that closes the gap.
#[must_use]
pub fn plan_goal(goal: &Goal) -> GoalPlan {
    let years = goal.target_years;
    let inflated_target = inflation_adjusted(goal.target_amount, goal.inflation_rate, f64::from(years));
    let future_value_of_savings =
        lumpsum_future_value(goal.current_savings, goal.expected_return, f64::from(years));
    let shortfall = (inflated_target - future_value_of_savings).max(0.0);
    let monthly_sip = required_monthly_sip(
        inflated_target,
        goal.current_savings,
        goal.expected_return,
        years,
    );
    let progress_pct = if goal.target_amount > 0.0 {
        finite_or_zero(goal.current_savings / goal.target_amount * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    GoalPlan {
        inflated_target,
        future_value_of_savings,
        shortfall,
        monthly_sip,
        progress_pct,
    }
}
