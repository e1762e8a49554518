//! Core data models for the bill splitter.
//!
//! This module contains the input, output and audit models used throughout
//! the crate.

mod bill_input;
mod bill_output;
mod split_report;

pub use bill_input::{BillInput, BillItem};
pub use bill_output::{BillOutput, PersonItem};
pub use split_report::{AuditStep, AuditTrace, AuditWarning, SplitReport};
