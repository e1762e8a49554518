//! Rounding reconciliation.
//!
//! Per-person amounts are rounded independently, so their sum can drift from
//! the rounded grand total by a few tenths. This module pushes that residual
//! back onto the participants so the amounts sum to the total exactly.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ResidualStrategy, RoundingConfig, SplitPolicy};
use crate::error::{SplitError, SplitResult};
use crate::models::{AuditStep, PersonItem};

use super::rounding::{overflow, round_to_unit};

/// The result of reconciling per-person amounts against the total.
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    /// Adjusted amounts in participant order.
    pub items: Vec<PersonItem>,
    /// `total_amount - sum(amounts)` before any adjustment.
    pub residual: Decimal,
    /// Whether any amount was changed.
    pub adjusted: bool,
    /// The audit step recording this reconciliation.
    pub audit_step: AuditStep,
}

/// Returns `total_amount - sum(items)`.
///
/// # Errors
///
/// Returns `CalculationError` if the sum overflows.
pub fn residual(total_amount: Decimal, items: &[PersonItem]) -> SplitResult<Decimal> {
    let allocated = items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.amount)
            .ok_or_else(|| overflow("summing per-person amounts"))
    })?;
    total_amount
        .checked_sub(allocated)
        .ok_or_else(|| overflow("computing the residual"))
}

/// Adds `amount` to the first participant, rounded to the currency unit.
///
/// A negative residual may take the first participant below zero.
fn apply_to_first(
    items: &mut [PersonItem],
    amount: Decimal,
    rounding: &RoundingConfig,
) -> SplitResult<()> {
    if let Some(first) = items.first_mut() {
        let adjusted = first
            .amount
            .checked_add(amount)
            .ok_or_else(|| overflow("applying the residual"))?;
        first.amount = round_to_unit(adjusted, rounding.currency_unit, rounding.mode)?;
    }
    Ok(())
}

/// Reconciles rounded per-person amounts with the grand total.
///
/// Residuals smaller than the policy threshold are left alone. Otherwise the
/// configured strategy decides who absorbs them; with the default strategy
/// the first participant takes the whole residual.
///
/// # Errors
///
/// Returns `CalculationError` if the amounts still do not sum to the total
/// after adjustment.
///
/// # Examples
///
/// ```
/// use bill_splitter::calculation::reconcile;
/// use bill_splitter::config::SplitPolicy;
/// use bill_splitter::models::PersonItem;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let items = vec![
///     PersonItem::new("Alice", dec("3.3")),
///     PersonItem::new("Bob", dec("3.3")),
///     PersonItem::new("Carol", dec("3.3")),
/// ];
/// let result = reconcile(dec("10.00"), items, &SplitPolicy::default(), 4).unwrap();
/// assert_eq!(result.residual, dec("0.1"));
/// assert_eq!(result.items[0].amount, dec("3.4"));
/// ```
pub fn reconcile(
    total_amount: Decimal,
    mut items: Vec<PersonItem>,
    policy: &SplitPolicy,
    step_number: u32,
) -> SplitResult<ReconciliationResult> {
    let threshold = policy.reconciliation.threshold;
    let rounding = &policy.rounding;
    let initial_residual = residual(total_amount, &items)?;

    let adjusted = !items.is_empty() && initial_residual.abs() >= threshold;
    if adjusted {
        match policy.reconciliation.strategy {
            ResidualStrategy::FirstParticipant => {
                apply_to_first(&mut items, initial_residual, rounding)?;
            }
            ResidualStrategy::EvenThenFirst => {
                let share = initial_residual / Decimal::from(items.len());
                for item in items.iter_mut() {
                    let spread = item
                        .amount
                        .checked_add(share)
                        .ok_or_else(|| overflow("spreading the residual"))?;
                    item.amount = round_to_unit(spread, rounding.person_unit, rounding.mode)?;
                }
                let remainder = residual(total_amount, &items)?;
                if !remainder.is_zero() {
                    apply_to_first(&mut items, remainder, rounding)?;
                }
            }
        }
        debug!(
            residual = %initial_residual,
            strategy = ?policy.reconciliation.strategy,
            first = %items[0].name,
            "Applied rounding residual"
        );
    }

    let left_over = residual(total_amount, &items)?;
    if !items.is_empty() && !left_over.is_zero() && left_over.abs() >= threshold {
        return Err(SplitError::CalculationError {
            message: format!(
                "per-person amounts miss total ${} by ${} after reconciliation",
                total_amount, left_over
            ),
        });
    }

    let reasoning = if items.is_empty() {
        "No participants; nothing to reconcile".to_string()
    } else if adjusted {
        format!(
            "Residual ${} applied ({:?}); {} now owes ${}",
            initial_residual.normalize(),
            policy.reconciliation.strategy,
            items[0].name,
            items[0].amount.normalize()
        )
    } else {
        format!(
            "Residual ${} below threshold ${}; no adjustment",
            initial_residual.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "rounding_reconciliation".to_string(),
        rule_name: "Rounding Reconciliation".to_string(),
        input: serde_json::json!({
            "total_amount": total_amount.to_string(),
            "residual": initial_residual.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "adjusted": adjusted,
            "allocated_total": (total_amount - left_over).to_string()
        }),
        reasoning,
    };

    Ok(ReconciliationResult {
        items,
        residual: initial_residual,
        adjusted,
        audit_step,
    })
}
