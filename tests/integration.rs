//! Integration tests for the bill splitter.
//!
//! This test suite covers:
//! - The reference split scenarios (even shares, no participants, no residual,
//!   rounding drift)
//! - The JSON wire shape of inputs and outputs
//! - Policy loading from the bundled configuration
//! - Conservation, ordering and rounding properties over generated bills

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use bill_splitter::config::{ConfigLoader, ResidualStrategy, SplitPolicy};
use bill_splitter::error::SplitError;
use bill_splitter::models::{BillInput, BillItem, BillOutput, PersonItem};
use bill_splitter::{BillSplitter, WARNING_ROUNDING_RESIDUAL_APPLIED, split_bill};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn create_input(tip: &str, items: Vec<BillItem>) -> BillInput {
    BillInput {
        date: "2024-03-09".to_string(),
        location: "Night market".to_string(),
        tip_percentage: dec(tip),
        items,
    }
}

fn assert_conserved(output: &BillOutput) {
    assert_eq!(
        output.allocated_total(),
        output.total_amount,
        "per-person amounts {:?} do not sum to total {}",
        output.items,
        output.total_amount
    );
}

fn split_json(body: Value) -> Result<Value, SplitError> {
    let input: BillInput = serde_json::from_value(body).unwrap();
    let output = split_bill(&input)?;
    Ok(serde_json::to_value(&output).unwrap())
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_scenario_a_even_shares_with_proportional_tip() {
    let input = create_input(
        "10",
        vec![
            BillItem::shared("Hot pot", dec("100")),
            BillItem::personal("Beer", dec("50"), "Alice"),
            BillItem::personal("Wine", dec("50"), "Bob"),
        ],
    );

    let output = split_bill(&input).unwrap();

    assert_eq!(output.sub_total, dec("200"));
    assert_eq!(output.tip, dec("20"));
    assert_eq!(output.total_amount, dec("220"));
    assert_eq!(
        output.items,
        vec![
            PersonItem::new("Alice", dec("110")),
            PersonItem::new("Bob", dec("110")),
        ]
    );
    assert_conserved(&output);
}

#[test]
fn test_scenario_b_no_participants() {
    let input = create_input("10", vec![BillItem::shared("Noodles", dec("30"))]);

    let output = split_bill(&input).unwrap();

    assert!(output.items.is_empty());
    assert_eq!(output.sub_total, dec("30"));
    assert_eq!(output.tip, dec("3"));
    assert_eq!(output.total_amount, dec("33"));
}

#[test]
fn test_scenario_c_no_residual() {
    let input = create_input(
        "0",
        vec![
            BillItem::personal("Tea", dec("10"), "Alice"),
            BillItem::personal("Tea", dec("10"), "Bob"),
            BillItem::personal("Cake", dec("11"), "Carol"),
        ],
    );

    let report = BillSplitter::default().split_with_audit(&input).unwrap();
    let output = &report.output;

    assert_eq!(output.total_amount, dec("31"));
    assert_eq!(output.amount_for("Alice"), Some(dec("10")));
    assert_eq!(output.amount_for("Bob"), Some(dec("10")));
    assert_eq!(output.amount_for("Carol"), Some(dec("11")));
    assert!(!report.has_warning(WARNING_ROUNDING_RESIDUAL_APPLIED));
    assert_conserved(output);
}

#[test]
fn test_scenario_d_drift_applied_to_first_participant() {
    // 20 / 6 = 3.333.. rounds to 3.3 for each of six people: 19.8, 0.2 short
    let mut items = vec![BillItem::shared("Banquet", dec("20"))];
    for name in ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"] {
        items.push(BillItem::personal("Water", Decimal::ZERO, name));
    }
    let input = create_input("0", items);

    let report = BillSplitter::default().split_with_audit(&input).unwrap();
    let output = &report.output;

    assert_eq!(output.total_amount, dec("20"));
    assert_eq!(output.items[0], PersonItem::new("Ann", dec("3.5")));
    for item in &output.items[1..] {
        assert_eq!(item.amount, dec("3.3"));
    }
    assert!(report.has_warning(WARNING_ROUNDING_RESIDUAL_APPLIED));
    assert_conserved(output);
}

#[test]
fn test_uneven_spend_pays_uneven_tip() {
    let input = create_input(
        "20",
        vec![
            BillItem::personal("Steak", dec("40"), "Alice"),
            BillItem::personal("Salad", dec("10"), "Bob"),
        ],
    );

    let output = split_bill(&input).unwrap();

    assert_eq!(output.tip, dec("10"));
    assert_eq!(output.amount_for("Alice"), Some(dec("48")));
    assert_eq!(output.amount_for("Bob"), Some(dec("12")));
    assert_conserved(&output);
}

#[test]
fn test_cents_in_prices_reconcile_exactly() {
    let input = create_input(
        "15",
        vec![
            BillItem::shared("Fries", dec("7.99")),
            BillItem::personal("Burger", dec("12.49"), "Alice"),
            BillItem::personal("Soda", dec("2.25"), "Bob"),
            BillItem::personal("Shake", dec("5.75"), "Carol"),
        ],
    );

    let output = split_bill(&input).unwrap();

    assert_eq!(output.sub_total, dec("28.48"));
    // 28.48 x 15% = 4.272 -> 4.3
    assert_eq!(output.tip, dec("4.3"));
    assert_eq!(output.total_amount, dec("32.78"));
    assert_conserved(&output);
}

#[test]
fn test_shared_prices_are_divided_as_one_total() {
    // 0.45 / 3 = 0.15 -> 0.2 each; 0.6 allocated, so Ann absorbs -0.15
    let mut items: Vec<BillItem> = ["0.1", "0.1", "0.1", "0.1", "0.05"]
        .iter()
        .map(|price| BillItem::shared("Tapas", dec(price)))
        .collect();
    for name in ["Ann", "Ben", "Cat"] {
        items.push(BillItem::personal("Water", Decimal::ZERO, name));
    }

    let output = split_bill(&create_input("0", items)).unwrap();

    assert_eq!(output.total_amount, dec("0.45"));
    assert_eq!(output.amount_for("Ann"), Some(dec("0.05")));
    assert_eq!(output.amount_for("Ben"), Some(dec("0.2")));
    assert_eq!(output.amount_for("Cat"), Some(dec("0.2")));
    assert_conserved(&output);
}

#[test]
fn test_negative_residual_can_leave_first_participant_below_zero() {
    // 0.5 / 10 = 0.05 -> 0.1 each; 1.0 allocated against a 0.5 total
    let mut items = vec![BillItem::shared("Bread", dec("0.5"))];
    for i in 0..10 {
        items.push(BillItem::personal("Water", Decimal::ZERO, format!("Guest {}", i)));
    }

    let report = BillSplitter::default()
        .split_with_audit(&create_input("0", items))
        .unwrap();
    let output = &report.output;

    assert_eq!(output.items[0].amount, dec("-0.4"));
    for item in &output.items[1..] {
        assert_eq!(item.amount, dec("0.1"));
    }
    assert!(report.has_warning(WARNING_ROUNDING_RESIDUAL_APPLIED));
    assert_conserved(output);
}

#[test]
fn test_amount_too_large_is_an_error() {
    let input = create_input(
        "0",
        vec![BillItem::personal("Island", dec("1000000000000000000000000000"), "Alice")],
    );

    assert!(matches!(
        split_bill(&input),
        Err(SplitError::CalculationError { .. })
    ));
}

// =============================================================================
// JSON Wire Shape
// =============================================================================

#[test]
fn test_json_request_and_response_shape() {
    let response = split_json(json!({
        "date": "2024-11-02",
        "location": "Izakaya",
        "tip_percentage": "10",
        "items": [
            { "kind": "shared", "name": "Edamame", "price": "100" },
            { "kind": "personal", "name": "Sake", "price": "50", "person": "Alice" },
            { "kind": "personal", "name": "Tea", "price": "50", "person": "Bob" }
        ]
    }))
    .unwrap();

    assert_eq!(response["date"], "2024年11月2日");
    assert_eq!(response["location"], "Izakaya");
    assert_eq!(response["sub_total"], "200.00");
    assert_eq!(response["tip"], "20.00");
    assert_eq!(response["total_amount"], "220.00");
    assert_eq!(response["items"][0]["name"], "Alice");
    assert_eq!(response["items"][0]["amount"], "110.00");
    assert_eq!(response["items"][1]["name"], "Bob");
}

#[test]
fn test_json_numeric_prices_are_accepted() {
    let response = split_json(json!({
        "date": "2024-11-02",
        "location": "Izakaya",
        "tip_percentage": 0,
        "items": [
            { "kind": "personal", "name": "Sake", "price": 12, "person": "Alice" }
        ]
    }))
    .unwrap();

    assert_eq!(response["total_amount"], "12.00");
    assert_eq!(response["items"][0]["amount"], "12.00");
}

#[test]
fn test_json_bad_date_is_an_error() {
    let result = split_json(json!({
        "date": "November 2nd",
        "location": "Izakaya",
        "tip_percentage": "10",
        "items": []
    }));

    assert!(matches!(result, Err(SplitError::InvalidDate { .. })));
}

#[test]
fn test_empty_bill() {
    let output = split_bill(&create_input("15", vec![])).unwrap();

    assert_eq!(output.sub_total, Decimal::ZERO);
    assert_eq!(output.tip, Decimal::ZERO);
    assert_eq!(output.total_amount, Decimal::ZERO);
    assert!(output.items.is_empty());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_bundled_config_matches_default_policy() {
    let loader = ConfigLoader::load("./config/default").expect("Failed to load config");
    let splitter = BillSplitter::from_config(loader);

    assert_eq!(splitter.policy(), &SplitPolicy::default());
}

#[test]
fn test_policy_from_yaml_changes_behaviour() {
    let loader = ConfigLoader::from_yaml_str(
        r#"
reconciliation:
  strategy: even_then_first
date_format:
  template: "{day}.{month}.{year}"
"#,
    )
    .unwrap();
    let splitter = BillSplitter::from_config(loader);
    assert_eq!(
        splitter.policy().reconciliation.strategy,
        ResidualStrategy::EvenThenFirst
    );

    let mut items = vec![BillItem::shared("Banquet", dec("20"))];
    for name in ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"] {
        items.push(BillItem::personal("Water", Decimal::ZERO, name));
    }
    let output = splitter.split(&create_input("0", items)).unwrap();

    assert_eq!(output.date, "9.3.2024");
    assert_conserved(&output);
}

// =============================================================================
// Properties
// =============================================================================

const NAMES: [&str; 5] = ["Ann", "Ben", "Cat", "Dan", "Eve"];

fn arb_item() -> impl Strategy<Value = BillItem> {
    (any::<bool>(), 0i64..=5_000, 0usize..NAMES.len()).prop_map(|(shared, tenths, who)| {
        let price = Decimal::new(tenths, 1);
        if shared {
            BillItem::shared("Shared dish", price)
        } else {
            BillItem::personal("Dish", price, NAMES[who])
        }
    })
}

fn arb_cent_item() -> impl Strategy<Value = BillItem> {
    (any::<bool>(), 0i64..=50_000, 0usize..NAMES.len()).prop_map(|(shared, cents, who)| {
        let price = Decimal::new(cents, 2);
        if shared {
            BillItem::shared("Shared dish", price)
        } else {
            BillItem::personal("Dish", price, NAMES[who])
        }
    })
}

fn arb_bill(item: impl Strategy<Value = BillItem>) -> impl Strategy<Value = BillInput> {
    (prop::collection::vec(item, 0..12), 0i64..=30).prop_map(|(items, tip)| BillInput {
        date: "2024-03-09".to_string(),
        location: "Anywhere".to_string(),
        tip_percentage: Decimal::from(tip),
        items,
    })
}

fn arb_input() -> impl Strategy<Value = BillInput> {
    arb_bill(arb_item())
}

fn arb_cent_input() -> impl Strategy<Value = BillInput> {
    arb_bill(arb_cent_item())
}

fn is_multiple_of(value: Decimal, unit: &str) -> bool {
    (value / dec(unit)).fract().is_zero()
}

proptest! {
    #[test]
    fn prop_amounts_sum_to_total(input in arb_cent_input()) {
        let output = split_bill(&input).unwrap();
        if !output.items.is_empty() {
            prop_assert_eq!(output.allocated_total(), output.total_amount);
        }
    }

    #[test]
    fn prop_totals_are_non_negative(input in arb_input()) {
        let output = split_bill(&input).unwrap();
        prop_assert!(output.sub_total >= Decimal::ZERO);
        prop_assert!(output.tip >= Decimal::ZERO);
        prop_assert!(output.total_amount >= Decimal::ZERO);
    }

    #[test]
    fn prop_split_is_idempotent(input in arb_input()) {
        let first = split_bill(&input).unwrap();
        let second = split_bill(&input).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn prop_participants_in_first_appearance_order(input in arb_input()) {
        let mut expected: Vec<&str> = Vec::new();
        for person in input.items.iter().filter_map(BillItem::person) {
            if !expected.contains(&person) {
                expected.push(person);
            }
        }

        let output = split_bill(&input).unwrap();
        let actual: Vec<&str> = output.items.iter().map(|i| i.name.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_rounding_granularity(input in arb_input()) {
        let output = split_bill(&input).unwrap();
        prop_assert!(is_multiple_of(output.sub_total, "0.01"));
        prop_assert!(is_multiple_of(output.total_amount, "0.01"));
        prop_assert!(is_multiple_of(output.tip, "0.1"));
        for item in &output.items {
            prop_assert!(is_multiple_of(item.amount, "0.1"), "{} not a multiple of 0.1", item.amount);
        }
    }
}
