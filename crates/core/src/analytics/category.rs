//! Category and sub-category normalization.
//!
//! The backend and the filter UI disagree on spelling ("Large Cap",
//! "LARGE_CAP", "large-cap fund"). Everything is compared in a canonical
//! lowercase, separator-free form. Both functions are idempotent.

/// Canonical asset-class names produced by [`normalize_category`].
pub const CANONICAL_CATEGORIES: [&str; 6] =
    ["equity", "debt", "hybrid", "commodity", "solution", "other"];

fn squash(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

// Repeated so that "xfundfund" and its output normalize identically.
fn strip_fund_suffix(mut s: String) -> String {
    'outer: loop {
        for suffix in ["funds", "fund", "schemes", "scheme"] {
            if s.len() > suffix.len() && s.ends_with(suffix) {
                s.truncate(s.len() - suffix.len());
                continue 'outer;
            }
        }
        return s;
    }
}

/// Normalize a top-level category ("Equity Funds" → "equity").
#[must_use]
pub fn normalize_category(category: &str) -> String {
    let base = strip_fund_suffix(squash(category));
    let mapped = match base.as_str() {
        "equities" | "equityoriented" | "stock" | "stocks" => "equity",
        "fixedincome" | "income" | "bond" | "bonds" | "liquid" | "moneymarket" => "debt",
        "balanced" | "balancedadvantage" | "multiasset" => "hybrid",
        "commodities" | "gold" | "silver" | "preciousmetals" => "commodity",
        "solutionoriented" | "retirement" | "childrens" => "solution",
        "others" | "indexetf" => "other",
        _ => return base,
    };
    mapped.to_string()
}

/// Normalize a sub-category ("Large Cap" / "LARGE_CAP" → "largecap").
#[must_use]
pub fn normalize_sub_category(sub_category: &str) -> String {
    strip_fund_suffix(squash(sub_category))
}

/// `true` if a fund's category matches the filter value, or the filter is empty.
#[must_use]
pub fn category_matches(fund_category: Option<&str>, wanted: &str) -> bool {
    let wanted = normalize_category(wanted);
    if wanted.is_empty() || wanted == "all" {
        return true;
    }
    fund_category.is_some_and(|c| normalize_category(c) == wanted)
}

/// `true` if a fund's sub-category matches the filter value, or the filter is empty.
#[must_use]
pub fn sub_category_matches(fund_sub_category: Option<&str>, wanted: &str) -> bool {
    let wanted = normalize_sub_category(wanted);
    if wanted.is_empty() || wanted == "all" {
        return true;
    }
    fund_sub_category.is_some_and(|c| normalize_sub_category(c) == wanted)
}

/// Human label for a normalized category ("equity" → "Equity").
#[must_use]
pub fn category_label(category: &str) -> String {
    let normalized = normalize_category(category);
    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
