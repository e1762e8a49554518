//! Bill splitting entry point.
//!
//! [`split_bill`] runs the full pipeline with the default policy:
//! validation, totals, participant scan, per-person allocation and
//! reconciliation. [`BillSplitter`] does the same for a custom
//! [`SplitPolicy`] and can wrap the result in an audited [`SplitReport`].

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    allocate, calculate_totals, format_date_with_template, reconcile, scan_participants_audited,
    to_display_scale,
};
use crate::config::{ConfigLoader, SplitPolicy};
use crate::error::SplitResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BillInput, BillOutput, PersonItem, SplitReport,
};

/// Warning raised when shared items exist but nobody can be billed for them.
pub const WARNING_UNATTRIBUTED_SHARED_COST: &str = "UNATTRIBUTED_SHARED_COST";

/// Warning raised when reconciliation changed a participant's amount.
pub const WARNING_ROUNDING_RESIDUAL_APPLIED: &str = "ROUNDING_RESIDUAL_APPLIED";

/// Output of one pipeline run before it is wrapped for the caller.
struct SplitRun {
    output: BillOutput,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

/// Splits bills according to a [`SplitPolicy`].
///
/// Holds no state besides the policy, so one splitter can be shared freely
/// across threads.
///
/// # Example
///
/// ```
/// use bill_splitter::{BillSplitter, config::SplitPolicy};
/// use bill_splitter::models::{BillInput, BillItem};
/// use rust_decimal::Decimal;
///
/// let splitter = BillSplitter::new(SplitPolicy::default()).unwrap();
/// let input = BillInput {
///     date: "2024-03-09".to_string(),
///     location: "Taipei".to_string(),
///     tip_percentage: Decimal::new(10, 0),
///     items: vec![
///         BillItem::shared("Hot pot", Decimal::new(100, 0)),
///         BillItem::personal("Beer", Decimal::new(50, 0), "Alice"),
///         BillItem::personal("Wine", Decimal::new(50, 0), "Bob"),
///     ],
/// };
///
/// let output = splitter.split(&input).unwrap();
/// assert_eq!(output.total_amount, Decimal::new(220, 0));
/// assert_eq!(output.amount_for("Alice"), Some(Decimal::new(110, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BillSplitter {
    policy: SplitPolicy,
}

impl BillSplitter {
    /// Creates a splitter after validating `policy`.
    pub fn new(policy: SplitPolicy) -> SplitResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Creates a splitter from a loaded configuration.
    pub fn from_config(loader: ConfigLoader) -> Self {
        Self {
            policy: loader.into_policy(),
        }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Splits a bill.
    ///
    /// The result depends only on `input` and the policy; calling this twice
    /// with the same input yields identical output.
    pub fn split(&self, input: &BillInput) -> SplitResult<BillOutput> {
        self.run(input).map(|run| run.output)
    }

    /// Splits a bill and returns it with an identifier and audit trace.
    pub fn split_with_audit(&self, input: &BillInput) -> SplitResult<SplitReport> {
        let start_time = Instant::now();
        let run = self.run(input)?;
        let duration_us = start_time.elapsed().as_micros() as u64;

        Ok(SplitReport {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            output: run.output,
            audit_trace: AuditTrace {
                steps: run.steps,
                warnings: run.warnings,
                duration_us,
            },
        })
    }

    fn run(&self, input: &BillInput) -> SplitResult<SplitRun> {
        let start_time = Instant::now();
        input.validate()?;

        let policy = &self.policy;
        let currency_unit = policy.rounding.currency_unit;
        let date = format_date_with_template(&input.date, &policy.date_format.template)?;

        let mut steps: Vec<AuditStep> = Vec::with_capacity(4);
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        let totals = calculate_totals(
            &input.items,
            input.tip_percentage,
            &policy.rounding,
            step_number,
        )?;
        steps.push(totals.audit_step);
        step_number += 1;

        let scan = scan_participants_audited(&input.items, step_number);
        steps.push(scan.audit_step);
        step_number += 1;

        let allocation = allocate(
            &input.items,
            input.tip_percentage,
            &scan.participants,
            policy,
            step_number,
        )?;
        steps.push(allocation.audit_step);
        step_number += 1;

        if scan.participants.is_empty() && allocation.shared_total > Decimal::ZERO {
            warn!(
                location = %input.location,
                shared_total = %allocation.shared_total,
                "Shared cost has no participants to bill"
            );
            warnings.push(AuditWarning::new(
                WARNING_UNATTRIBUTED_SHARED_COST,
                format!(
                    "${} of shared items could not be attributed: bill has no personal items",
                    allocation.shared_total.normalize()
                ),
                "medium",
            ));
        }

        let reconciliation = reconcile(totals.total_amount, allocation.items, policy, step_number)?;
        steps.push(reconciliation.audit_step);

        if reconciliation.adjusted {
            warnings.push(AuditWarning::new(
                WARNING_ROUNDING_RESIDUAL_APPLIED,
                format!(
                    "Rounding residual of ${} applied to {}",
                    reconciliation.residual.normalize(),
                    reconciliation.items[0].name
                ),
                "low",
            ));
        }

        let items: Vec<PersonItem> = reconciliation
            .items
            .into_iter()
            .map(|item| PersonItem {
                amount: to_display_scale(item.amount, currency_unit),
                ..item
            })
            .collect();

        let output = BillOutput {
            date,
            location: input.location.clone(),
            sub_total: to_display_scale(totals.sub_total, currency_unit),
            tip: to_display_scale(totals.tip, currency_unit),
            total_amount: to_display_scale(totals.total_amount, currency_unit),
            items,
        };

        let duration_us = start_time.elapsed().as_micros() as u64;
        info!(
            location = %output.location,
            participants = output.items.len(),
            sub_total = %output.sub_total,
            tip = %output.tip,
            total_amount = %output.total_amount,
            duration_us,
            "Bill split completed"
        );

        Ok(SplitRun {
            output,
            steps,
            warnings,
        })
    }
}

/// Splits a bill with the default policy.
///
/// # Errors
///
/// Returns an error for a malformed date, a negative price or tip
/// percentage, or a personal item without a person. Amounts too large for
/// a `Decimal` give `CalculationError`.
///
/// # Example
///
/// ```
/// use bill_splitter::split_bill;
/// use bill_splitter::models::{BillInput, BillItem};
/// use rust_decimal::Decimal;
///
/// let input = BillInput {
///     date: "2024-03-09".to_string(),
///     location: "Taipei".to_string(),
///     tip_percentage: Decimal::new(10, 0),
///     items: vec![BillItem::shared("Noodles", Decimal::new(30, 0))],
/// };
///
/// let output = split_bill(&input).unwrap();
/// assert_eq!(output.date, "2024年3月9日");
/// assert_eq!(output.total_amount, Decimal::new(33, 0));
/// assert!(output.items.is_empty());
/// ```
pub fn split_bill(input: &BillInput) -> SplitResult<BillOutput> {
    BillSplitter::default().split(input)
}
