//! Portfolio overlap between funds.
//!
//! Inputs are small (≤10 funds, a few dozen holdings each) so everything is
//! computed directly over hash maps.

use std::collections::{HashMap, HashSet};

use crate::errors::CoreError;
use crate::models::analytics::{CommonHolding, OverlapPair, OverlapReport};
use crate::models::fund::{Fund, Holding, SectorWeight};

/// The overlap tool accepts at most this many funds at once.
pub const MAX_OVERLAP_FUNDS: usize = 10;

/// ...and needs at least two.
pub const MIN_OVERLAP_FUNDS: usize = 2;

const COMPANY_SUFFIXES: [&str; 4] = ["limited", "ltd", "inc", "corp"];

/// Normalize a company name for matching: lowercase alphanumerics with a
/// trailing "Ltd"/"Limited" dropped ("Infosys Ltd." → "infosys").
#[must_use]
pub fn normalize_company_name(name: &str) -> String {
    let mut words: Vec<String> = name
        .split_whitespace()
        .map(|w| {
            w.chars()
                .flat_map(char::to_lowercase)
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect();
    while words.len() > 1
        && words
            .last()
            .is_some_and(|w| COMPANY_SUFFIXES.contains(&w.as_str()))
    {
        words.pop();
    }
    words.concat()
}

/// Identity used to decide whether two holdings are the same security:
/// ISIN, then ticker, then the normalized company name.
#[must_use]
pub fn holding_key(holding: &Holding) -> String {
    if let Some(isin) = holding.isin.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return format!("isin:{}", isin.to_uppercase());
    }
    if let Some(ticker) = holding.ticker.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return format!("ticker:{}", ticker.to_uppercase());
    }
    format!("name:{}", normalize_company_name(&holding.name))
}

// Key → (display name, summed weight or None if no weight reported).
fn index_holdings(holdings: &[Holding]) -> HashMap<String, (String, Option<f64>)> {
    let mut index: HashMap<String, (String, Option<f64>)> = HashMap::new();
    for h in holdings {
        let key = holding_key(h);
        if key == "name:" {
            continue;
        }
        let entry = index.entry(key).or_insert_with(|| (h.name.clone(), None));
        if let Some(w) = h.weight.filter(|w| w.is_finite() && *w > 0.0) {
            entry.1 = Some(entry.1.unwrap_or(0.0) + w);
        }
    }
    index
}

/// Jaccard index of the two holding sets, 0–1. Zero when both are empty.
#[must_use]
pub fn jaccard_index(a: &[Holding], b: &[Holding]) -> f64 {
    let set_a: HashSet<String> = index_holdings(a).into_keys().collect();
    let set_b: HashSet<String> = index_holdings(b).into_keys().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Securities present in both funds, largest overlapping weight first.
#[must_use]
pub fn common_holdings(a: &[Holding], b: &[Holding]) -> Vec<CommonHolding> {
    let index_a = index_holdings(a);
    let index_b = index_holdings(b);
    let mut common: Vec<CommonHolding> = index_a
        .iter()
        .filter_map(|(key, (name, weight_a))| {
            index_b.get(key).map(|(_, weight_b)| CommonHolding {
                name: name.clone(),
                weight_a: *weight_a,
                weight_b: *weight_b,
            })
        })
        .collect();
    common.sort_by(|x, y| {
        y.overlap_weight()
            .partial_cmp(&x.overlap_weight())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.name.cmp(&y.name))
    });
    common
}

/// Portfolio overlap in percent.
///
/// Sum over shared securities of the smaller weight. Unless both funds
/// report weights the Jaccard index × 100 is used instead. The result is
/// clamped to 0–100 and is exactly 0 when nothing is shared.
#[must_use]
pub fn overlap_percentage(a: &[Holding], b: &[Holding]) -> f64 {
    let common = common_holdings(a, b);
    if common.is_empty() {
        return 0.0;
    }
    let pct = if reports_weights(a) && reports_weights(b) {
        common.iter().map(CommonHolding::overlap_weight).sum::<f64>()
    } else {
        jaccard_index(a, b) * 100.0
    };
    clamp_pct(pct)
}

fn reports_weights(holdings: &[Holding]) -> bool {
    holdings.iter().any(|h| h.weight.is_some_and(|w| w > 0.0))
}

fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn normalize_sector(sector: &str) -> String {
    sector
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn sector_vector(weights: &[SectorWeight]) -> HashMap<String, f64> {
    let mut v: HashMap<String, f64> = HashMap::new();
    for s in weights {
        let key = normalize_sector(&s.sector);
        if key.is_empty() || !s.weight.is_finite() || s.weight <= 0.0 {
            continue;
        }
        *v.entry(key).or_insert(0.0) += s.weight;
    }
    v
}

/// Sector weights of a fund; derived from holdings when the backend sent
/// no explicit sector allocation.
#[must_use]
pub fn effective_sectors(fund: &Fund) -> Vec<SectorWeight> {
    if !fund.sector_allocation.is_empty() {
        return fund.sector_allocation.clone();
    }
    let mut by_sector: Vec<SectorWeight> = Vec::new();
    for h in &fund.holdings {
        let (Some(sector), Some(weight)) = (h.sector.as_deref(), h.weight) else {
            continue;
        };
        match by_sector.iter_mut().find(|s| s.sector == sector) {
            Some(existing) => existing.weight += weight,
            None => by_sector.push(SectorWeight::new(sector, weight)),
        }
    }
    by_sector
}

/// Cosine similarity of two sector-weight vectors, 0–1.
/// Zero when either side has no positive weights.
#[must_use]
pub fn sector_cosine_similarity(a: &[SectorWeight], b: &[SectorWeight]) -> f64 {
    let va = sector_vector(a);
    let vb = sector_vector(b);
    let norm_a = va.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = vb.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = va
        .iter()
        .filter_map(|(k, wa)| vb.get(k).map(|wb| wa * wb))
        .sum();
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() { sim.clamp(0.0, 1.0) } else { 0.0 }
}

/// All overlap measures for one pair of funds.
#[must_use]
pub fn compare_pair(a: &Fund, b: &Fund) -> OverlapPair {
    OverlapPair {
        fund_a: a.id.clone(),
        fund_b: b.id.clone(),
        jaccard_index: jaccard_index(&a.holdings, &b.holdings),
        overlap_percentage: overlap_percentage(&a.holdings, &b.holdings),
        sector_similarity: sector_cosine_similarity(&effective_sectors(a), &effective_sectors(b)),
        common_holdings: common_holdings(&a.holdings, &b.holdings),
    }
}

/// Check the fund count and that every fund actually carries holdings.
pub fn validate_overlap_input(funds: &[Fund]) -> Result<(), CoreError> {
    if funds.len() < MIN_OVERLAP_FUNDS || funds.len() > MAX_OVERLAP_FUNDS {
        return Err(CoreError::ValidationError(format!(
            "Overlap analysis needs between {MIN_OVERLAP_FUNDS} and {MAX_OVERLAP_FUNDS} funds, got {}",
            funds.len()
        )));
    }
    if let Some(f) = funds.iter().find(|f| !f.has_holdings()) {
        return Err(CoreError::HoldingsUnavailable(f.id.clone()));
    }
    Ok(())
}

/// Pairwise overlap for every combination of the given funds, in input order
/// ((0,1), (0,2), …, (1,2), …).
pub fn overlap_matrix(funds: &[Fund]) -> Result<Vec<OverlapPair>, CoreError> {
    validate_overlap_input(funds)?;
    let mut pairs = Vec::with_capacity(funds.len() * (funds.len() - 1) / 2);
    for (i, a) in funds.iter().enumerate() {
        for b in &funds[i + 1..] {
            pairs.push(compare_pair(a, b));
        }
    }
    Ok(pairs)
}

/// Full overlap report: pairs, mean overlap and the most overlapping pair
/// (first one wins on ties).
pub fn analyze_overlap(funds: &[Fund]) -> Result<OverlapReport, CoreError> {
    let pairs = overlap_matrix(funds)?;
    Ok(report_from_pairs(
        funds.iter().map(|f| f.id.clone()).collect(),
        pairs,
    ))
}

/// Build a report around pairs computed elsewhere (e.g. by the backend).
#[must_use]
pub fn report_from_pairs(fund_ids: Vec<String>, pairs: Vec<OverlapPair>) -> OverlapReport {
    let average_overlap = if pairs.is_empty() {
        0.0
    } else {
        pairs.iter().map(|p| p.overlap_percentage).sum::<f64>() / pairs.len() as f64
    };
    let mut most_overlapping: Option<usize> = None;
    for (i, p) in pairs.iter().enumerate() {
        match most_overlapping {
            Some(best) if pairs[best].overlap_percentage >= p.overlap_percentage => {}
            _ => most_overlapping = Some(i),
        }
    }
    OverlapReport {
        fund_ids,
        pairs,
        average_overlap,
        most_overlapping,
    }
}
