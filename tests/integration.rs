//! Integration tests for the salary engine.
//!
//! This test suite covers:
//! - Reference scenarios through the HTTP API
//! - Regime comparison through the HTTP API
//! - Regional floors and caps shared by both regimes
//! - Loading the on-disk configuration
//! - Error cases
//! - Calculation properties over generated inputs

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use salary_engine::api::{create_router, AppState};
use salary_engine::calculation::{
    calculate_all, calculate_pit, compare_regimes, compare_regimes_with, final_net,
};
use salary_engine::config::{ConfigLoader, Regime, RegimeDefinition, TaxBracket};
use salary_engine::models::{CalculatorInputs, ComparisonInputs, Region};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::new(
        ConfigLoader::builtin().expect("Failed to load config"),
    ))
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("expected a decimal string")).unwrap()
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(gross: u64, dependents: u32, region: &str, regime: &str) -> Value {
    let (status, body) = post_json(
        "/calculate",
        json!({
            "gross": gross,
            "dependents": dependents,
            "region": region,
            "regime": regime
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", body);
    body
}

// =============================================================================
// Reference Scenarios (Region I, 2025)
// =============================================================================

#[tokio::test]
async fn test_gross_10m_two_dependents() {
    let result = post_calculate(10_000_000, 2, "I", "2025").await;

    assert_eq!(decimal(&result["insurance"]["total"]), dec!(1050000));
    assert_eq!(decimal(&result["deductions"]["total"]), dec!(20850000));
    assert_eq!(decimal(&result["pit"]["total"]), Decimal::ZERO);
    assert_eq!(decimal(&result["net"]), dec!(8950000));
}

#[tokio::test]
async fn test_gross_30m_two_dependents() {
    let result = post_calculate(30_000_000, 2, "I", "2025").await;

    assert_eq!(decimal(&result["insurance"]["total"]), dec!(3150000));
    assert_eq!(decimal(&result["deductions"]["total"]), dec!(22950000));
    assert_eq!(decimal(&result["pit"]["taxable"]), dec!(7050000));
    assert_eq!(decimal(&result["pit"]["total"]), dec!(455000));
    assert_eq!(decimal(&result["net"]), dec!(26395000));

    let items = result["pit"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["label"], "Bậc 1: 0–5.000.000 @ 5%");
    assert_eq!(items[1]["label"], "Bậc 2: 5.000.000–10.000.000 @ 10%");
}

#[tokio::test]
async fn test_gross_100m_caps_both_bases() {
    let result = post_calculate(100_000_000, 2, "I", "2025").await;

    assert_eq!(
        decimal(&result["insurance"]["bases"]["base_si_hi"]),
        dec!(46800000)
    );
    assert_eq!(
        decimal(&result["insurance"]["bases"]["base_ui"]),
        dec!(99200000)
    );
    assert_eq!(decimal(&result["insurance"]["total"]), dec!(5438000));

    let expected_net = dec!(100000000)
        - decimal(&result["insurance"]["total"])
        - decimal(&result["pit"]["total"]);
    assert_eq!(decimal(&result["net"]), expected_net);
}

#[tokio::test]
async fn test_result_omits_absent_optionals() {
    let result = post_calculate(30_000_000, 0, "II", "2025").await;

    assert!(result.get("union_dues").is_none());
    assert!(result.get("lunch_allowance").is_none());
    assert_eq!(result["final_net"], result["net"]);
    assert_eq!(result["inputs"]["regime"]["id"], "2025");
}

#[tokio::test]
async fn test_allowance_reduces_taxable_income_once() {
    let (_, without) = post_json(
        "/calculate",
        json!({ "gross": 30000000, "dependents": 0, "region": "I", "regime": "2025" }),
    )
    .await;
    let (status, with) = post_json(
        "/calculate",
        json!({
            "gross": 30000000,
            "dependents": 0,
            "region": "I",
            "regime": "2025",
            "exempt_allowance": 730000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decimal(&without["pit"]["taxable"]) - decimal(&with["pit"]["taxable"]),
        dec!(730000)
    );
    assert!(decimal(&with["net"]) > decimal(&without["net"]));
    assert_eq!(decimal(&with["final_net"]), decimal(&with["net"]));
}

#[tokio::test]
async fn test_union_member_final_net() {
    let (status, result) = post_json(
        "/calculate",
        json!({
            "gross": 58500000,
            "dependents": 1,
            "region": "III",
            "regime": "2026",
            "is_union_member": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Dues are taken on the SI/HI base, which is capped at 46.8M
    assert_eq!(
        decimal(&result["union_dues"]["calculation_base"]),
        dec!(46800000)
    );
    assert_eq!(decimal(&result["union_dues"]["amount"]), dec!(234000));
    assert_eq!(
        decimal(&result["final_net"]),
        decimal(&result["net"]) - dec!(234000)
    );
}

// =============================================================================
// Regional Floors and Caps
// =============================================================================

#[tokio::test]
async fn test_ui_caps_per_region_in_both_regimes() {
    let cases = [
        ("I", dec!(99200000)),
        ("II", dec!(88200000)),
        ("III", dec!(77200000)),
        ("IV", dec!(69000000)),
    ];

    for regime in ["2025", "2026"] {
        for (region, cap) in cases {
            let result = post_calculate(150_000_000, 0, region, regime).await;
            assert_eq!(
                decimal(&result["insurance"]["bases"]["base_ui"]),
                cap,
                "regime {} region {}",
                regime,
                region
            );
        }
    }
}

#[tokio::test]
async fn test_2026_floors_per_region() {
    let cases = [
        ("I", dec!(4960000)),
        ("II", dec!(4410000)),
        ("III", dec!(3860000)),
        ("IV", dec!(3450000)),
    ];

    for (region, floor) in cases {
        let result = post_calculate(1_000_000, 0, region, "2026").await;
        assert_eq!(
            decimal(&result["insurance"]["bases"]["base_si_hi"]),
            floor,
            "region {}",
            region
        );
        assert_eq!(
            decimal(&result["insurance"]["bases"]["base_ui"]),
            floor,
            "region {}",
            region
        );
    }
}

#[tokio::test]
async fn test_insurance_at_2025_region_i_floor() {
    let result = post_calculate(4_960_000, 0, "I", "2025").await;

    assert_eq!(decimal(&result["insurance"]["si"]), dec!(396800));
    assert_eq!(decimal(&result["insurance"]["hi"]), dec!(74400));
    assert_eq!(decimal(&result["insurance"]["ui"]), dec!(49600));
    assert_eq!(decimal(&result["insurance"]["total"]), dec!(520800));
}

// =============================================================================
// Regime Comparison
// =============================================================================

#[tokio::test]
async fn test_compare_30m_two_dependents() {
    let (status, result) = post_json(
        "/compare",
        json!({ "gross": 30000000, "dependents": 2, "region": "I" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let deltas = &result["deltas"];
    assert_eq!(decimal(&deltas["personal_deduction"]), dec!(4500000));
    assert_eq!(decimal(&deltas["dependent_deduction"]), dec!(3600000));
    assert_eq!(decimal(&deltas["insurance"]), Decimal::ZERO);
    assert!(decimal(&deltas["pit"]) < Decimal::ZERO);
    assert!(decimal(&deltas["net_salary"]) > Decimal::ZERO);
    assert_eq!(result["baseline"]["inputs"]["regime"]["id"], "2025");
    assert_eq!(result["proposed"]["inputs"]["regime"]["id"], "2026");
}

#[tokio::test]
async fn test_compare_high_earner_still_gains() {
    let (status, result) = post_json(
        "/compare",
        json!({ "gross": 120000000, "dependents": 1, "region": "I" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(decimal(&result["deltas"]["net_salary"]) > Decimal::ZERO);
    assert_eq!(
        decimal(&result["deltas"]["net_salary"]),
        decimal(&result["proposed"]["net"]) - decimal(&result["baseline"]["net"])
    );
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_on_disk_config_matches_builtin() {
    let loaded = ConfigLoader::load("./config/vn").expect("Failed to load config/vn");
    let builtin = ConfigLoader::builtin().unwrap();

    assert_eq!(loaded.config().settings(), builtin.config().settings());
    assert_eq!(loaded.config().regimes(), builtin.config().regimes());
}

#[test]
fn test_missing_config_dir_is_reported() {
    let result = ConfigLoader::load("./config/does-not-exist");
    assert!(result.is_err());
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_negative_gross_rejected() {
    let (status, error) = post_json(
        "/calculate",
        json!({ "gross": -1000, "region": "I", "regime": "2025" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_allowance_rejected() {
    let (status, error) = post_json(
        "/compare",
        json!({ "gross": 30000000, "region": "I", "exempt_allowance": -1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("exempt_allowance"));
}

#[tokio::test]
async fn test_unknown_regime_rejected() {
    let (status, error) = post_json(
        "/calculate",
        json!({ "gross": 30000000, "region": "I", "regime": "2027" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "REGIME_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/compare")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"gross\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Properties
// =============================================================================

fn region_strategy() -> impl Strategy<Value = Region> {
    (0usize..4).prop_map(|index| Region::ALL[index])
}

fn inputs(gross: u64, dependents: u32, region: Region, regime: &Regime) -> CalculatorInputs {
    CalculatorInputs {
        gross: Decimal::from(gross),
        dependents,
        region,
        regime: regime.clone(),
        insurance_base: None,
        is_union_member: false,
    }
}

/// The 2025 deductions with a single flat bracket.
fn flat_regime(loader: &ConfigLoader) -> Regime {
    let mut definition = RegimeDefinition::from(loader.config().baseline_regime().clone());
    definition.id = "flat".to_string();
    definition.brackets = vec![TaxBracket::unbounded(dec!(0.10))];
    Regime::new(definition).unwrap()
}

proptest! {
    /// Both bases stay within their floor and cap.
    #[test]
    fn prop_insurance_bases_are_bounded(
        gross in 0u64..400_000_000u64,
        custom in proptest::option::of(0u64..400_000_000u64),
        region in region_strategy(),
        use_2026 in any::<bool>(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let regime = loader.get_regime(if use_2026 { "2026" } else { "2025" }).unwrap();
        let mut request = inputs(gross, 0, region, regime);
        request.insurance_base = custom.map(Decimal::from);

        let result = calculate_all(&request, None, loader.config().settings()).unwrap();
        let min_wage = loader.config().settings().regional_minimums.get(region).min_wage;
        let bases = result.insurance.bases;

        prop_assert!(bases.base_si_hi >= min_wage);
        prop_assert!(bases.base_si_hi <= dec!(46800000));
        prop_assert!(bases.base_ui >= min_wage);
        prop_assert!(bases.base_ui <= min_wage * dec!(20));
        prop_assert_eq!(
            result.insurance.total,
            result.insurance.si + result.insurance.hi + result.insurance.ui
        );
    }

    /// Items sum to the total and slabs cover the whole taxable income.
    #[test]
    fn prop_pit_breakdown_is_consistent(
        taxable in 0u64..500_000_000u64,
        use_2026 in any::<bool>(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let regime = loader.get_regime(if use_2026 { "2026" } else { "2025" }).unwrap();
        let pit = calculate_pit(Decimal::from(taxable), regime);

        let slabs: Decimal = pit.items.iter().map(|item| item.slab).sum();
        let taxes: Decimal = pit.items.iter().map(|item| item.tax).sum();
        prop_assert_eq!(slabs, pit.taxable);
        prop_assert_eq!(taxes, pit.total);
        prop_assert!(pit.taxable >= Decimal::ZERO);
    }

    /// Deductions add up and net follows from insurance and tax.
    #[test]
    fn prop_result_totals_are_consistent(
        gross in 0u64..400_000_000u64,
        dependents in 0u32..8,
        region in region_strategy(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let regime = loader.get_regime("2025").unwrap();
        let result = calculate_all(
            &inputs(gross, dependents, region, regime),
            None,
            loader.config().settings(),
        )
        .unwrap();

        let deductions = &result.deductions;
        prop_assert_eq!(
            deductions.total,
            deductions.personal + deductions.dependents + deductions.insurance
        );
        prop_assert_eq!(
            result.pit.taxable,
            (Decimal::from(gross) - deductions.total).max(Decimal::ZERO)
        );
        prop_assert_eq!(
            result.net,
            Decimal::from(gross) - result.insurance.total - result.pit.total
        );
        prop_assert_eq!(result.final_net, result.net);
    }

    /// The default pair never differs in insurance, floors and caps included.
    #[test]
    fn prop_insurance_delta_is_zero(
        gross in 0u64..400_000_000u64,
        custom in proptest::option::of(0u64..400_000_000u64),
        dependents in 0u32..6,
        region in region_strategy(),
        member in any::<bool>(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let comparison = compare_regimes(
            &ComparisonInputs {
                gross: Decimal::from(gross),
                dependents,
                region,
                insurance_base: custom.map(Decimal::from),
                is_union_member: member,
            },
            None,
            loader.config(),
        )
        .unwrap();

        prop_assert_eq!(comparison.deltas.insurance, Decimal::ZERO);
        prop_assert_eq!(
            &comparison.baseline.insurance.bases,
            &comparison.proposed.insurance.bases
        );
        prop_assert_eq!(
            comparison.baseline.union_dues.as_ref().map(|dues| dues.amount),
            comparison.proposed.union_dues.as_ref().map(|dues| dues.amount)
        );
    }

    /// Any two regimes differing only in brackets charge the same insurance.
    #[test]
    fn prop_insurance_delta_is_zero_for_any_regime_pair(
        gross in 0u64..400_000_000u64,
        region in region_strategy(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let flat = flat_regime(&loader);
        let comparison = compare_regimes_with(
            &ComparisonInputs {
                gross: Decimal::from(gross),
                dependents: 0,
                region,
                insurance_base: None,
                is_union_member: false,
            },
            loader.config().proposed_regime(),
            &flat,
            None,
            loader.config().settings(),
        )
        .unwrap();

        prop_assert_eq!(comparison.deltas.insurance, Decimal::ZERO);
    }

    /// Omitting the allowance matches a zero allowance in every amount.
    #[test]
    fn prop_omitted_allowance_matches_zero_allowance(
        gross in 0u64..200_000_000u64,
        dependents in 0u32..4,
        region in region_strategy(),
        member in any::<bool>(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let mut request = inputs(gross, dependents, region, loader.get_regime("2026").unwrap());
        request.is_union_member = member;
        let settings = loader.config().settings();

        let omitted = calculate_all(&request, None, settings).unwrap();
        let zero = calculate_all(&request, Some(Decimal::ZERO), settings).unwrap();

        prop_assert_eq!(&omitted.insurance, &zero.insurance);
        prop_assert_eq!(&omitted.deductions, &zero.deductions);
        prop_assert_eq!(&omitted.pit, &zero.pit);
        prop_assert_eq!(omitted.net, zero.net);
        prop_assert_eq!(omitted.final_net, zero.final_net);
        prop_assert_eq!(omitted.final_net, final_net(&omitted));
        prop_assert!(omitted.lunch_allowance.is_none());
    }

    /// Another dependent never raises tax or lowers net pay.
    #[test]
    fn prop_more_dependents_never_raise_tax(
        gross in 0u64..300_000_000u64,
        dependents in 0u32..8,
        region in region_strategy(),
        use_2026 in any::<bool>(),
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let regime = loader.get_regime(if use_2026 { "2026" } else { "2025" }).unwrap();
        let settings = loader.config().settings();

        let fewer = calculate_all(&inputs(gross, dependents, region, regime), None, settings).unwrap();
        let more = calculate_all(&inputs(gross, dependents + 1, region, regime), None, settings).unwrap();

        prop_assert!(more.pit.total <= fewer.pit.total);
        prop_assert!(more.net >= fewer.net);
    }
}
