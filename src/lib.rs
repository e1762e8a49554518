//! Restaurant bill splitting engine.
//!
//! This crate divides a shared bill among the people named on it. Shared
//! items are split evenly, personal items stay with their owner, the tip is
//! charged in proportion to each person's spend, and rounding drift is
//! reconciled so the per-person amounts add up to the grand total.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
mod splitter;

pub use splitter::{
    BillSplitter, WARNING_ROUNDING_RESIDUAL_APPLIED, WARNING_UNATTRIBUTED_SHARED_COST, split_bill,
};
