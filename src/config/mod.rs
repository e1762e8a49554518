//! Configuration loading and management for the bill splitter.
//!
//! This module provides functionality to load a split policy from YAML,
//! covering rounding units, residual reconciliation, shared cost division
//! and date rendering.
//!
//! # Example
//!
//! ```no_run
//! use bill_splitter::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rounding mode: {:?}", config.policy().rounding.mode);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, POLICY_FILE};
pub use types::{
    AllocationConfig, DEFAULT_DATE_TEMPLATE, DateFormatConfig, ReconciliationConfig,
    ResidualStrategy, RoundingConfig, RoundingMode, SharedDivisor, SplitPolicy,
};
