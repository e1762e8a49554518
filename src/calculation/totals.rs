//! Bill totals calculation functionality.
//!
//! This module sums item prices into a subtotal, derives the tip and the
//! grand total.

use rust_decimal::Decimal;

use crate::config::{RoundingConfig, RoundingMode};
use crate::error::SplitResult;
use crate::models::{AuditStep, BillItem};

use super::rounding::{overflow, round_to_unit};

/// The result of the totals stage, including the audit step.
#[derive(Debug, Clone)]
pub struct TotalsResult {
    /// Unrounded sum of item prices.
    pub raw_sub_total: Decimal,
    /// Subtotal rounded to the currency unit.
    pub sub_total: Decimal,
    /// Tip rounded to the tip unit.
    pub tip: Decimal,
    /// `raw_sub_total + tip`, rounded to the currency unit.
    pub total_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the price of every item, shared and personal alike.
///
/// An empty list sums to zero.
///
/// # Errors
///
/// Returns `CalculationError` if the sum exceeds `Decimal::MAX`.
pub fn calculate_sub_total(items: &[BillItem]) -> SplitResult<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.price())
            .ok_or_else(|| overflow("summing item prices"))
    })
}

/// Computes `sub_total × tip_percentage / 100` rounded to `unit`.
///
/// # Examples
///
/// ```
/// use bill_splitter::calculation::calculate_tip;
/// use bill_splitter::config::RoundingMode;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tip = calculate_tip(
///     Decimal::from_str("123.45").unwrap(),
///     Decimal::from_str("15").unwrap(),
///     Decimal::from_str("0.1").unwrap(),
///     RoundingMode::HalfUp,
/// ).unwrap();
/// // 123.45 x 15% = 18.5175
/// assert_eq!(tip, Decimal::from_str("18.5").unwrap());
/// ```
pub fn calculate_tip(
    sub_total: Decimal,
    tip_percentage: Decimal,
    unit: Decimal,
    mode: RoundingMode,
) -> SplitResult<Decimal> {
    if sub_total.is_zero() || tip_percentage.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let raw_tip = sub_total
        .checked_mul(tip_percentage)
        .ok_or_else(|| overflow("calculating the tip"))?
        / Decimal::ONE_HUNDRED;
    round_to_unit(raw_tip, unit, mode)
}

/// Calculates subtotal, tip and grand total for a bill.
///
/// # Arguments
///
/// * `items` - All bill items
/// * `tip_percentage` - Tip in percentage points
/// * `rounding` - Rounding units and mode
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `CalculationError` if any intermediate amount overflows.
pub fn calculate_totals(
    items: &[BillItem],
    tip_percentage: Decimal,
    rounding: &RoundingConfig,
    step_number: u32,
) -> SplitResult<TotalsResult> {
    let raw_sub_total = calculate_sub_total(items)?;
    let tip = calculate_tip(raw_sub_total, tip_percentage, rounding.tip_unit, rounding.mode)?;
    let sub_total = round_to_unit(raw_sub_total, rounding.currency_unit, rounding.mode)?;
    let raw_total = raw_sub_total
        .checked_add(tip)
        .ok_or_else(|| overflow("adding the tip"))?;
    let total_amount = round_to_unit(raw_total, rounding.currency_unit, rounding.mode)?;

    let shared_count = items.iter().filter(|item| item.is_shared()).count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "bill_totals".to_string(),
        rule_name: "Bill Totals".to_string(),
        input: serde_json::json!({
            "item_count": items.len(),
            "shared_item_count": shared_count,
            "tip_percentage": tip_percentage.normalize().to_string()
        }),
        output: serde_json::json!({
            "sub_total": sub_total.to_string(),
            "tip": tip.to_string(),
            "total_amount": total_amount.to_string()
        }),
        reasoning: format!(
            "${} x {}% = ${} tip; ${} + ${} = ${}",
            raw_sub_total.normalize(),
            tip_percentage.normalize(),
            tip.normalize(),
            raw_sub_total.normalize(),
            tip.normalize(),
            total_amount.normalize()
        ),
    };

    Ok(TotalsResult {
        raw_sub_total,
        sub_total,
        tip,
        total_amount,
        audit_step,
    })
}
