//! Configuration types for bill splitting.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from YAML configuration files. Every field has a default,
//! so a partial (or empty) document yields the standard policy.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};

/// Template used when rendering the bill date.
pub const DEFAULT_DATE_TEMPLATE: &str = "{year}年{month}月{day}日";

/// How ties are broken when rounding to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero (0.05 -> 0.1, -0.05 -> -0.1).
    #[default]
    HalfUp,
    /// Round half to the nearest even unit (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// What shared costs are divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharedDivisor {
    /// Divide by the number of scanned participants.
    #[default]
    Participants,
    /// Divide by participants plus one unnamed party. The share of that
    /// party is left for reconciliation.
    ParticipantsPlusOne,
}

impl SharedDivisor {
    /// Returns the divisor for `participant_count` participants.
    pub fn divisor(self, participant_count: usize) -> Decimal {
        let count = Decimal::from(participant_count);
        match self {
            SharedDivisor::Participants => count,
            SharedDivisor::ParticipantsPlusOne => count + Decimal::ONE,
        }
    }
}

/// How the rounding residual is applied to participant amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualStrategy {
    /// The first participant absorbs the whole residual.
    #[default]
    FirstParticipant,
    /// Spread evenly and re-round, then the first participant absorbs
    /// whatever is left.
    EvenThenFirst,
}

/// Rounding units and mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingConfig {
    /// Unit each participant amount is rounded to.
    pub person_unit: Decimal,
    /// Unit the tip is rounded to.
    pub tip_unit: Decimal,
    /// Currency display unit for subtotal and total.
    pub currency_unit: Decimal,
    /// Tie-breaking mode.
    pub mode: RoundingMode,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            person_unit: Decimal::new(1, 1),
            tip_unit: Decimal::new(1, 1),
            currency_unit: Decimal::new(1, 2),
            mode: RoundingMode::HalfUp,
        }
    }
}

/// Reconciliation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Residuals smaller than this are left alone.
    pub threshold: Decimal,
    /// Where a residual goes.
    pub strategy: ResidualStrategy,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            threshold: Decimal::new(1, 2),
            strategy: ResidualStrategy::FirstParticipant,
        }
    }
}

/// Allocation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Divisor applied to shared items.
    pub shared_divisor: SharedDivisor,
}

/// Date rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Template with `{year}`, `{month}` and `{day}` placeholders.
    pub template: String,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_DATE_TEMPLATE.to_string(),
        }
    }
}

/// The complete split policy.
///
/// # Example
///
/// ```
/// use bill_splitter::config::{SplitPolicy, SharedDivisor};
///
/// let policy: SplitPolicy = serde_yaml::from_str("allocation:\n  shared_divisor: participants\n").unwrap();
/// assert_eq!(policy.allocation.shared_divisor, SharedDivisor::Participants);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitPolicy {
    /// Rounding units and mode.
    pub rounding: RoundingConfig,
    /// Residual handling.
    pub reconciliation: ReconciliationConfig,
    /// Shared cost handling.
    pub allocation: AllocationConfig,
    /// Date rendering.
    pub date_format: DateFormatConfig,
}

impl SplitPolicy {
    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> SplitResult<()> {
        let units = [
            ("rounding.person_unit", self.rounding.person_unit),
            ("rounding.tip_unit", self.rounding.tip_unit),
            ("rounding.currency_unit", self.rounding.currency_unit),
        ];
        for (field, unit) in units {
            if unit <= Decimal::ZERO {
                return Err(invalid_policy(field, "must be greater than zero"));
            }
        }

        if self.reconciliation.threshold < Decimal::ZERO {
            return Err(invalid_policy(
                "reconciliation.threshold",
                "must not be negative",
            ));
        }

        for placeholder in ["{year}", "{month}", "{day}"] {
            if !self.date_format.template.contains(placeholder) {
                return Err(invalid_policy(
                    "date_format.template",
                    &format!("missing placeholder {}", placeholder),
                ));
            }
        }

        Ok(())
    }
}

fn invalid_policy(field: &str, message: &str) -> SplitError {
    SplitError::InvalidPolicy {
        field: field.to_string(),
        message: message.to_string(),
    }
}
