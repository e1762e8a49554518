//! Calculation logic for the bill splitter.
//!
//! This module contains the pure functions behind a split: rounding to a
//! unit, subtotal and tip calculation, participant scanning, per-person
//! allocation with proportional tip, reconciliation of rounding drift
//! against the grand total, and bill date formatting.

mod allocation;
mod date_format;
mod participants;
mod reconciliation;
mod rounding;
mod totals;

pub use allocation::{AllocationResult, allocate, calculate_person_amount, calculate_shared_total};
pub use date_format::{DateParts, format_date, format_date_with_template, parse_date_parts};
pub use participants::{ParticipantScanResult, scan_participants, scan_participants_audited};
pub use reconciliation::{ReconciliationResult, reconcile, residual};
pub use rounding::{round_to_unit, to_display_scale};
pub use totals::{TotalsResult, calculate_sub_total, calculate_tip, calculate_totals};
