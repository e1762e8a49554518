//! Bill output models.
//!
//! This module contains the [`BillOutput`] record returned by a split and
//! the [`PersonItem`] lines it carries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What one participant owes.
///
/// # Example
///
/// ```
/// use bill_splitter::models::PersonItem;
/// use rust_decimal::Decimal;
///
/// let line = PersonItem::new("Alice", Decimal::new(1100, 1));
/// assert_eq!(line.amount.to_string(), "110.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonItem {
    /// The participant identifier.
    pub name: String,
    /// The rounded amount owed, tip included.
    pub amount: Decimal,
}

impl PersonItem {
    /// Creates a new person line.
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// The result of splitting a bill.
///
/// After reconciliation the `items` amounts sum to `total_amount`. When the
/// bill has no personal items there are no participants and `items` is
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOutput {
    /// The bill date rendered with the configured template.
    pub date: String,
    /// The location label, copied from the input.
    pub location: String,
    /// Sum of all item prices, rounded to currency precision.
    pub sub_total: Decimal,
    /// Tip derived from the subtotal.
    pub tip: Decimal,
    /// `sub_total + tip`, rounded to currency precision.
    pub total_amount: Decimal,
    /// Per-participant amounts in first-appearance order.
    pub items: Vec<PersonItem>,
}

impl BillOutput {
    /// Returns the sum of all per-participant amounts.
    pub fn allocated_total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Looks up the amount owed by `name`.
    pub fn amount_for(&self, name: &str) -> Option<Decimal> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.amount)
    }
}
