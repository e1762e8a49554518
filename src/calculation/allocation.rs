//! Per-person allocation.
//!
//! Each participant owes their personal items, an even slice of the shared
//! items, and a tip proportional to that spend. Amounts are rounded to the
//! person unit here; reconciliation against the grand total happens later.

use rust_decimal::Decimal;

use crate::config::{RoundingConfig, SplitPolicy};
use crate::error::{SplitError, SplitResult};
use crate::models::{AuditStep, BillItem, PersonItem};

use super::rounding::{overflow, round_to_unit};

/// The result of allocating amounts to participants.
#[derive(Debug, Clone)]
pub struct AllocationResult {
    /// Rounded amounts in participant order.
    pub items: Vec<PersonItem>,
    /// Total shared cost across all shared items.
    pub shared_total: Decimal,
    /// The audit step recording this allocation.
    pub audit_step: AuditStep,
}

/// Sums the price of every shared item.
///
/// # Errors
///
/// Returns `CalculationError` if the sum exceeds `Decimal::MAX`.
pub fn calculate_shared_total(items: &[BillItem]) -> SplitResult<Decimal> {
    items
        .iter()
        .filter(|item| item.is_shared())
        .try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.price())
                .ok_or_else(|| overflow("summing shared items"))
        })
}

/// Calculates the rounded amount owed by `name`.
///
/// The amount is `(personal + shared_total / divisor) × (1 + tip_percentage / 100)`
/// rounded to the person unit. Shared prices are summed before the division
/// so the quotient is taken once.
///
/// # Errors
///
/// Returns `CalculationError` if the divisor is zero or an intermediate
/// amount overflows.
///
/// # Examples
///
/// ```
/// use bill_splitter::calculation::calculate_person_amount;
/// use bill_splitter::config::RoundingConfig;
/// use bill_splitter::models::BillItem;
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     BillItem::shared("Hot pot", Decimal::new(100, 0)),
///     BillItem::personal("Beer", Decimal::new(50, 0), "Alice"),
///     BillItem::personal("Wine", Decimal::new(50, 0), "Bob"),
/// ];
/// let amount = calculate_person_amount(
///     &items,
///     Decimal::new(10, 0),
///     "Alice",
///     Decimal::new(2, 0),
///     &RoundingConfig::default(),
/// ).unwrap();
/// assert_eq!(amount, Decimal::new(110, 0));
/// ```
pub fn calculate_person_amount(
    items: &[BillItem],
    tip_percentage: Decimal,
    name: &str,
    divisor: Decimal,
    rounding: &RoundingConfig,
) -> SplitResult<Decimal> {
    let shared_total = calculate_shared_total(items)?;
    let shared_share = shared_total
        .checked_div(divisor)
        .ok_or_else(|| SplitError::CalculationError {
            message: format!(
                "cannot divide shared total {} by {}",
                shared_total, divisor
            ),
        })?;

    let raw_total = items
        .iter()
        .filter(|item| item.person() == Some(name))
        .try_fold(shared_share, |acc, item| {
            acc.checked_add(item.price())
                .ok_or_else(|| overflow("summing personal items"))
        })?;

    let individual_tip = raw_total
        .checked_mul(tip_percentage)
        .ok_or_else(|| overflow("calculating a personal tip"))?
        / Decimal::ONE_HUNDRED;
    let amount = raw_total
        .checked_add(individual_tip)
        .ok_or_else(|| overflow("adding a personal tip"))?;

    round_to_unit(amount, rounding.person_unit, rounding.mode)
}

/// Allocates rounded amounts to every participant.
///
/// With no participants nothing is allocated and any shared cost stays
/// unattributed; the per-person calculation is never invoked in that case.
///
/// # Arguments
///
/// * `items` - All bill items
/// * `tip_percentage` - Tip in percentage points
/// * `participants` - Participants in first-appearance order
/// * `policy` - Split policy (divisor and rounding)
/// * `step_number` - The step number for audit trail sequencing
pub fn allocate(
    items: &[BillItem],
    tip_percentage: Decimal,
    participants: &[String],
    policy: &SplitPolicy,
    step_number: u32,
) -> SplitResult<AllocationResult> {
    let shared_total = calculate_shared_total(items)?;

    if participants.is_empty() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "per_person_allocation".to_string(),
            rule_name: "Per-Person Allocation".to_string(),
            input: serde_json::json!({
                "participant_count": 0,
                "shared_total": shared_total.normalize().to_string()
            }),
            output: serde_json::json!({ "items": [] }),
            reasoning: format!(
                "No participants; ${} of shared cost left unattributed",
                shared_total.normalize()
            ),
        };
        return Ok(AllocationResult {
            items: Vec::new(),
            shared_total,
            audit_step,
        });
    }

    let divisor = policy
        .allocation
        .shared_divisor
        .divisor(participants.len());

    let mut allocated = Vec::with_capacity(participants.len());
    for name in participants {
        let amount =
            calculate_person_amount(items, tip_percentage, name, divisor, &policy.rounding)?;
        allocated.push(PersonItem::new(name.as_str(), amount));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "per_person_allocation".to_string(),
        rule_name: "Per-Person Allocation".to_string(),
        input: serde_json::json!({
            "participant_count": participants.len(),
            "shared_total": shared_total.normalize().to_string(),
            "shared_divisor": divisor.to_string(),
            "tip_percentage": tip_percentage.normalize().to_string()
        }),
        output: serde_json::json!({
            "items": allocated
                .iter()
                .map(|item| serde_json::json!({
                    "name": item.name,
                    "amount": item.amount.to_string()
                }))
                .collect::<Vec<_>>()
        }),
        reasoning: format!(
            "Shared ${} / {} each, plus personal items, plus {}% tip on each person's spend",
            shared_total.normalize(),
            divisor,
            tip_percentage.normalize()
        ),
    };

    Ok(AllocationResult {
        items: allocated,
        shared_total,
        audit_step,
    })
}
