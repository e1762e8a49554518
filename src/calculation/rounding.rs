//! Rounding helpers shared by every calculation stage.

use rust_decimal::Decimal;

use crate::config::RoundingMode;
use crate::error::{SplitError, SplitResult};

/// Builds the error returned when an amount no longer fits in a `Decimal`.
pub(crate) fn overflow(context: &str) -> SplitError {
    SplitError::CalculationError {
        message: format!("arithmetic overflow while {}", context),
    }
}

/// Rounds `value` to the nearest multiple of `unit`.
///
/// The result carries the scale of `unit`, so rounding to `0.1` yields one
/// decimal place. A zero `unit` leaves the value untouched.
///
/// # Errors
///
/// Returns `CalculationError` if `value / unit` does not fit in a `Decimal`,
/// which happens for amounts close to `Decimal::MAX`.
///
/// # Examples
///
/// ```
/// use bill_splitter::calculation::round_to_unit;
/// use bill_splitter::config::RoundingMode;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let unit = Decimal::from_str("0.1").unwrap();
/// let rounded = round_to_unit(Decimal::from_str("3.35").unwrap(), unit, RoundingMode::HalfUp).unwrap();
/// assert_eq!(rounded.to_string(), "3.4");
///
/// let rounded = round_to_unit(Decimal::from_str("3.35").unwrap(), unit, RoundingMode::HalfEven).unwrap();
/// assert_eq!(rounded.to_string(), "3.4");
///
/// let rounded = round_to_unit(Decimal::from_str("3.25").unwrap(), unit, RoundingMode::HalfEven).unwrap();
/// assert_eq!(rounded.to_string(), "3.2");
/// ```
pub fn round_to_unit(value: Decimal, unit: Decimal, mode: RoundingMode) -> SplitResult<Decimal> {
    if unit.is_zero() {
        return Ok(value);
    }
    let steps = value
        .checked_div(unit)
        .ok_or_else(|| overflow("rounding"))?
        .round_dp_with_strategy(0, mode.strategy());
    steps.checked_mul(unit).ok_or_else(|| overflow("rounding"))
}

/// Returns `value` padded to the number of decimal places of `unit`.
///
/// Used to present every output amount at currency precision, e.g. `110.0`
/// becomes `110.00` for a `0.01` unit.
pub fn to_display_scale(value: Decimal, unit: Decimal) -> Decimal {
    let mut display = value;
    if display.scale() < unit.scale() {
        display.rescale(unit.scale());
    }
    display
}
