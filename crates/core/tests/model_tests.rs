// ═══════════════════════════════════════════════════════════════════
// Model Tests — serde shapes, lenient parsing, local profile types
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use fundscope_core::errors::CoreError;
use fundscope_core::models::envelope::{ApiEnvelope, HealthStatus, Pagination};
use fundscope_core::models::fund::{Fund, FundQuery, FundSuggestion, Holding, DEFAULT_PAGE_SIZE};
use fundscope_core::models::goal::{Goal, GoalType, DEFAULT_EXPECTED_RETURN, DEFAULT_INFLATION_RATE};
use fundscope_core::models::investment::{InvestmentRecord, InvestmentRequest, InvestmentType, SipFrequency};
use fundscope_core::models::kyc::{KycState, KycStatus};
use fundscope_core::models::market::MarketIndex;
use fundscope_core::models::profile::{CompareSelection, LocalProfile, MAX_COMPARE_SELECTION};
use fundscope_core::models::reminder::{Reminder, ReminderFrequency, ReminderPatch, ReminderType};
use fundscope_core::models::settings::Settings;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Fund
// ═══════════════════════════════════════════════════════════════════

mod fund {
    use super::*;

    #[test]
    fn full_payload() {
        let fund: Fund = serde_json::from_value(json!({
            "id": "F100",
            "name": "HDFC Top 100 Fund",
            "amc": "HDFC Mutual Fund",
            "category": "Equity",
            "subCategory": "Large Cap",
            "nav": 812.45,
            "navDate": "2024-03-28",
            "aum": 31000.5,
            "expenseRatio": 1.62,
            "returns1Y": 28.4,
            "returns3Y": 18.1,
            "returns5Y": 15.2,
            "riskLevel": "Very High",
            "rating": 4,
            "minSip": 100,
            "holdings": [{ "name": "HDFC Bank", "sector": "Financials", "weight": 9.8 }],
            "sectorAllocation": [{ "sector": "Financials", "weight": 32.5 }]
        }))
        .unwrap();

        assert_eq!(fund.id, "F100");
        assert_eq!(fund.sub_category.as_deref(), Some("Large Cap"));
        assert_eq!(fund.returns_1y, Some(28.4));
        assert_eq!(fund.rating, Some(4.0));
        assert_eq!(fund.min_sip, Some(100.0));
        assert!(fund.has_holdings());
        assert_eq!(fund.holdings[0].weight, Some(9.8));
        assert_eq!(fund.sector_allocation[0].weight, 32.5);
    }

    #[test]
    fn minimal_payload() {
        let fund: Fund = serde_json::from_value(json!({ "id": "1", "name": "X" })).unwrap();
        assert!(fund.amc.is_none());
        assert!(fund.returns_1y.is_none());
        assert!(!fund.has_holdings());
        assert_eq!(fund, Fund::new("1", "X"));
    }

    #[test]
    fn numeric_scheme_code_and_aliases() {
        let fund: Fund = serde_json::from_value(json!({
            "schemeCode": 119551,
            "schemeName": "Axis Bluechip",
            "fundHouse": "Axis",
            "topHoldings": [{ "companyName": "Infosys", "percentage": "7.5" }]
        }))
        .unwrap();
        assert_eq!(fund.id, "119551");
        assert_eq!(fund.name, "Axis Bluechip");
        assert_eq!(fund.amc.as_deref(), Some("Axis"));
        assert_eq!(fund.holdings[0].name, "Infosys");
        assert_eq!(fund.holdings[0].weight, Some(7.5));
    }

    #[test]
    fn numeric_strings_and_blanks() {
        let fund: Fund = serde_json::from_value(json!({
            "id": "2",
            "name": "Y",
            "nav": "45.10",
            "expenseRatio": "0.85%",
            "returns1Y": "",
            "returns3Y": "n/a",
            "category": ""
        }))
        .unwrap();
        assert_eq!(fund.nav, Some(45.10));
        assert_eq!(fund.expense_ratio, Some(0.85));
        assert_eq!(fund.returns_1y, None);
        assert_eq!(fund.returns_3y, None);
        assert_eq!(fund.category, None);
    }

    #[test]
    fn null_values_are_missing() {
        let fund: Fund =
            serde_json::from_value(json!({ "id": "3", "name": "Z", "aum": null, "amc": null })).unwrap();
        assert!(fund.aum.is_none());
        assert!(fund.amc.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let mut fund = Fund::new("F1", "Alpha");
        fund.returns_1y = Some(12.0);
        fund.expense_ratio = Some(1.1);
        let value = serde_json::to_value(&fund).unwrap();
        assert_eq!(value["returns1Y"], json!(12.0));
        assert_eq!(value["expenseRatio"], json!(1.1));
    }

    #[test]
    fn display_name_adds_amc_once() {
        let mut fund = Fund::new("1", "Bluechip Fund");
        fund.amc = Some("Axis".into());
        assert_eq!(fund.display_name(), "Bluechip Fund (Axis)");

        let mut fund = Fund::new("2", "Axis Bluechip Fund");
        fund.amc = Some("Axis".into());
        assert_eq!(fund.display_name(), "Axis Bluechip Fund");
    }

    #[test]
    fn holding_builders() {
        let h = Holding::new("Reliance", 8.2).with_sector("Energy").with_isin("INE002A01018");
        assert_eq!(h.weight, Some(8.2));
        assert_eq!(h.sector.as_deref(), Some("Energy"));
        assert_eq!(h.isin.as_deref(), Some("INE002A01018"));
    }

    #[test]
    fn suggestion_from_numeric_id() {
        let s: FundSuggestion =
            serde_json::from_value(json!({ "fundId": 42, "name": "SBI Small Cap" })).unwrap();
        assert_eq!(s.id, "42");
    }

    #[test]
    fn mongo_id_next_to_fund_id() {
        let fund: Fund = serde_json::from_str(
            r#"{"_id":"665f","fundId":"FUND001","name":"HDFC Top 100"}"#,
        )
        .unwrap();
        assert_eq!(fund.id, "FUND001");
        assert_eq!(fund.name, "HDFC Top 100");

        let fund: Fund =
            serde_json::from_value(json!({ "_id": "665f", "id": "F9", "name": "X" })).unwrap();
        assert_eq!(fund.id, "665f");
    }

    #[test]
    fn name_next_to_scheme_name() {
        let fund: Fund = serde_json::from_value(json!({
            "id": "F1",
            "name": "Axis Bluechip Fund",
            "schemeName": "Axis Bluechip Fund - Direct Growth",
            "amc": "Axis",
            "fundHouse": "Axis Mutual Fund",
            "holdings": [{ "name": "Infosys", "companyName": "Infosys Ltd", "weight": 7.5, "percentage": 7.4 }]
        }))
        .unwrap();
        assert_eq!(fund.name, "Axis Bluechip Fund");
        assert_eq!(fund.amc.as_deref(), Some("Axis"));
        assert_eq!(fund.holdings[0].name, "Infosys");
        assert_eq!(fund.holdings[0].weight, Some(7.5));
    }

    #[test]
    fn null_spelling_falls_through() {
        let fund: Fund =
            serde_json::from_value(json!({ "fundId": null, "schemeCode": 101, "name": "X" })).unwrap();
        assert_eq!(fund.id, "101");
    }

    #[test]
    fn listing_with_mixed_keys_parses() {
        let envelope: ApiEnvelope<Vec<Fund>> = serde_json::from_value(json!({
            "success": true,
            "data": [
                { "_id": "a1", "fundId": "F1", "name": "One", "schemeName": "One Direct" },
                { "id": "F2", "name": "Two" }
            ]
        }))
        .unwrap();
        let funds = envelope.into_data("/api/funds/all").unwrap();
        assert_eq!(funds.len(), 2);
        assert_eq!(funds[0].id, "F1");
    }

    #[test]
    fn suggestion_with_both_ids() {
        let s: FundSuggestion = serde_json::from_value(json!({
            "_id": "665f", "fundId": "F7", "schemeName": "SBI Small Cap", "name": "SBI Small Cap Fund"
        }))
        .unwrap();
        assert_eq!(s.id, "F7");
        assert_eq!(s.name, "SBI Small Cap Fund");
    }
}

// ═══════════════════════════════════════════════════════════════════
// FundQuery
// ═══════════════════════════════════════════════════════════════════

mod fund_query {
    use super::*;

    #[test]
    fn defaults() {
        let q = FundQuery::default();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(
            q.to_pairs(),
            vec![("page".to_string(), "1".to_string()), ("limit".to_string(), "20".to_string())]
        );
    }

    #[test]
    fn optional_filters_skip_blanks() {
        let q = FundQuery {
            page: 0,
            category: Some("Equity".into()),
            sub_category: Some("  ".into()),
            search: Some(" hdfc ".into()),
            ..FundQuery::default()
        };
        let pairs = q.to_pairs();
        assert!(pairs.contains(&("page".to_string(), "1".to_string())));
        assert!(pairs.contains(&("category".to_string(), "Equity".to_string())));
        assert!(pairs.contains(&("search".to_string(), "hdfc".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "subCategory"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Envelope
// ═══════════════════════════════════════════════════════════════════

mod envelope {
    use super::*;

    #[test]
    fn success_with_data() {
        let env: ApiEnvelope<Fund> =
            serde_json::from_value(json!({ "success": true, "data": { "id": "1", "name": "A" } })).unwrap();
        assert_eq!(env.into_data("api/funds/1").unwrap().name, "A");
    }

    #[test]
    fn failure_uses_error_text() {
        let env: ApiEnvelope<Fund> =
            serde_json::from_value(json!({ "success": false, "error": "Fund not found" })).unwrap();
        match env.into_data("api/funds/9") {
            Err(CoreError::Api { endpoint, message }) => {
                assert_eq!(endpoint, "api/funds/9");
                assert_eq!(message, "Fund not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn failure_falls_back_to_message() {
        let env: ApiEnvelope<()> =
            serde_json::from_value(json!({ "success": false, "message": "Try later" })).unwrap();
        assert_eq!(env.failure_message(), "Try later");
    }

    #[test]
    fn missing_data_is_malformed() {
        let env: ApiEnvelope<Fund> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(env.into_data("api/funds/1"), Err(CoreError::MalformedEnvelope(_))));
    }

    #[test]
    fn unit_ignores_payload() {
        let env: ApiEnvelope<serde_json::Value> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(env.into_unit("api/goals/1").is_ok());
    }

    #[test]
    fn page_with_pagination() {
        let env: ApiEnvelope<Vec<Fund>> = serde_json::from_value(json!({
            "success": true,
            "data": [{ "id": "1", "name": "A" }, { "id": "2", "name": "B" }],
            "pagination": { "page": 2, "limit": 2, "total": 7, "totalPages": 4, "hasNext": true, "hasPrev": true }
        }))
        .unwrap();
        let page = env.into_page("api/funds").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.total, 7);
        assert!(page.pagination.has_next);
    }

    #[test]
    fn page_without_pagination_is_single() {
        let env: ApiEnvelope<Vec<Fund>> =
            serde_json::from_value(json!({ "success": true, "data": [{ "id": "1", "name": "A" }] })).unwrap();
        let page = env.into_page("api/funds").unwrap();
        assert_eq!(page.pagination, Pagination::single(1));
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn health_status() {
        let ok: HealthStatus = serde_json::from_value(json!({ "status": "OK" })).unwrap();
        let down: HealthStatus = serde_json::from_value(json!({ "status": "degraded" })).unwrap();
        assert!(ok.is_healthy());
        assert!(!down.is_healthy());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Goals & settings
// ═══════════════════════════════════════════════════════════════════

mod goal {
    use super::*;

    #[test]
    fn new_goal_defaults() {
        let g = Goal::new("House", GoalType::House, 1_000_000.0, 50_000.0, 10);
        assert!(!g.id.is_empty());
        assert_eq!(g.expected_return, DEFAULT_EXPECTED_RETURN);
        assert_eq!(g.inflation_rate, DEFAULT_INFLATION_RATE);
        assert_eq!(g.monthly_sip, 0.0);
    }

    #[test]
    fn ids_are_unique() {
        let a = Goal::new("A", GoalType::Car, 1.0, 0.0, 1);
        let b = Goal::new("A", GoalType::Car, 1.0, 0.0, 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn backend_shape() {
        let g: Goal = serde_json::from_value(json!({
            "_id": "64ab",
            "name": "Trip",
            "goalType": "vacation",
            "targetAmount": 200000,
            "targetYears": 2
        }))
        .unwrap();
        assert_eq!(g.id, "64ab");
        assert_eq!(g.goal_type, GoalType::Vacation);
        assert_eq!(g.current_savings, 0.0);
        assert_eq!(g.expected_return, DEFAULT_EXPECTED_RETURN);
    }

    #[test]
    fn unknown_goal_type_is_other() {
        let g: Goal = serde_json::from_value(json!({
            "name": "Boat", "goalType": "yacht", "targetAmount": 1, "targetYears": 1
        }))
        .unwrap();
        assert_eq!(g.goal_type, GoalType::Other);
    }

    #[test]
    fn goal_type_display() {
        assert_eq!(GoalType::Emergency.to_string(), "Emergency");
    }

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        assert!(s.api_base_url.is_none());
        assert_eq!(s.default_expected_return, 12.0);
        assert_eq!(s.default_inflation_rate, 6.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Compare selection & profile
// ═══════════════════════════════════════════════════════════════════

mod compare_selection {
    use super::*;

    #[test]
    fn keeps_insertion_order_without_duplicates() {
        let mut sel = CompareSelection::new();
        assert!(sel.add("a").unwrap());
        assert!(sel.add("b").unwrap());
        assert!(!sel.add(" a ").unwrap());
        assert_eq!(sel.ids(), ["a", "b"]);
    }

    #[test]
    fn capacity_is_four() {
        let mut sel = CompareSelection::new();
        for id in ["a", "b", "c", "d"] {
            sel.add(id).unwrap();
        }
        assert!(sel.is_full());
        assert_eq!(MAX_COMPARE_SELECTION, 4);
        assert!(matches!(sel.add("e"), Err(CoreError::SelectionFull(4))));
        assert!(!sel.add("a").unwrap());
    }

    #[test]
    fn blank_id_rejected() {
        let mut sel = CompareSelection::new();
        assert!(matches!(sel.add("  "), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn toggle_and_remove() {
        let mut sel = CompareSelection::new();
        assert!(sel.toggle("x").unwrap());
        assert!(sel.contains("x"));
        assert!(!sel.toggle("x").unwrap());
        assert!(sel.is_empty());
        assert!(!sel.remove("x"));
    }

    #[test]
    fn clear_empties() {
        let mut sel = CompareSelection::new();
        sel.add("a").unwrap();
        sel.clear();
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn profile_default_is_empty() {
        let p = LocalProfile::default();
        assert!(p.goals.is_empty());
        assert!(p.compare_selection.is_empty());
        assert!(p.access_token.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Reminders, KYC, investments, market
// ═══════════════════════════════════════════════════════════════════

mod other_dtos {
    use super::*;

    #[test]
    fn reminder_with_type_alias_and_defaults() {
        let r: Reminder = serde_json::from_value(json!({
            "_id": 7,
            "title": "SIP due",
            "type": "sip",
            "dueDate": "2024-05-05",
            "amount": "5000"
        }))
        .unwrap();
        assert_eq!(r.id, "7");
        assert_eq!(r.reminder_type, ReminderType::Sip);
        assert_eq!(r.due_date, date(2024, 5, 5));
        assert_eq!(r.amount, Some(5000.0));
        assert_eq!(r.frequency, ReminderFrequency::Once);
        assert!(r.is_active);
    }

    #[test]
    fn unknown_reminder_type_is_custom() {
        let r: Reminder = serde_json::from_value(json!({
            "id": "1", "title": "t", "reminderType": "birthday", "dueDate": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(r.reminder_type, ReminderType::Custom);
    }

    #[test]
    fn reminder_patch_sends_only_set_fields() {
        let patch = ReminderPatch {
            is_active: Some(false),
            ..ReminderPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "isActive": false }));
        assert!(ReminderPatch::default().is_empty());
    }

    #[test]
    fn kyc_status_accepts_approved() {
        let s: KycStatus =
            serde_json::from_value(json!({ "status": "approved", "kycId": "KYC-1" })).unwrap();
        assert_eq!(s.status, KycState::Verified);
        assert_eq!(s.reference_id.as_deref(), Some("KYC-1"));
        assert_eq!(s.status.to_string(), "Verified");
    }

    #[test]
    fn investment_request_bodies() {
        let lump = serde_json::to_value(InvestmentRequest::lumpsum("F1", 5000.0)).unwrap();
        assert_eq!(lump, json!({ "fundId": "F1", "amount": 5000.0, "investmentType": "lumpsum" }));

        let sip = serde_json::to_value(InvestmentRequest::sip("F1", 1000.0, 5, SipFrequency::Monthly)).unwrap();
        assert_eq!(sip["investmentType"], json!("sip"));
        assert_eq!(sip["sipDate"], json!(5));
        assert_eq!(sip["frequency"], json!("monthly"));
    }

    #[test]
    fn investment_record_lenient() {
        let rec: InvestmentRecord = serde_json::from_value(json!({
            "_id": "INV1", "fundId": 101, "amount": "2500", "investmentType": "sip"
        }))
        .unwrap();
        assert_eq!(rec.fund_id, "101");
        assert_eq!(rec.amount, 2500.0);
        assert_eq!(rec.status, "pending");
        assert_eq!(rec.investment_type.to_string(), "SIP");
        assert_eq!(InvestmentType::Lumpsum.to_string(), "Lumpsum");
    }

    #[test]
    fn records_carrying_id_and_mongo_id() {
        let rec: InvestmentRecord = serde_json::from_value(json!({
            "id": "INV2", "_id": "66aa", "fundId": "F1", "amount": 1000, "investmentType": "lumpsum"
        }))
        .unwrap();
        assert_eq!(rec.id, "INV2");

        let r: Reminder = serde_json::from_value(json!({
            "id": "R1", "_id": "66ab", "title": "Review", "type": "review",
            "reminderType": "sip", "dueDate": "2024-06-01"
        }))
        .unwrap();
        assert_eq!(r.id, "R1");
        assert_eq!(r.reminder_type, ReminderType::Sip);
    }

    #[test]
    fn market_index() {
        let idx: MarketIndex = serde_json::from_value(json!({
            "name": "NIFTY 50", "value": "22100.5", "change": -45.2, "changePercent": -0.2
        }))
        .unwrap();
        assert_eq!(idx.value, 22100.5);
        assert!(!idx.is_up());
    }
}
