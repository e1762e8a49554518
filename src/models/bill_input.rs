//! Bill input model and related types.
//!
//! This module defines the [`BillInput`] struct and the [`BillItem`] tagged
//! union describing what was ordered and who ordered it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};

/// A single line on the bill.
///
/// Shared items are split across every participant; personal items belong
/// to exactly one named participant. On the wire the variant is selected by
/// a `kind` field.
///
/// # Example
///
/// ```
/// use bill_splitter::models::BillItem;
///
/// let item: BillItem = serde_json::from_str(
///     r#"{"kind": "personal", "name": "Ramen", "price": "12.50", "person": "Alice"}"#,
/// ).unwrap();
/// assert_eq!(item.person(), Some("Alice"));
/// assert!(!item.is_shared());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillItem {
    /// An item split evenly among all participants.
    Shared {
        /// Display label of the item.
        name: String,
        /// Price in currency units.
        price: Decimal,
    },
    /// An item owed entirely by one participant.
    Personal {
        /// Display label of the item.
        name: String,
        /// Price in currency units.
        price: Decimal,
        /// The participant who owes this item.
        person: String,
    },
}

impl BillItem {
    /// Creates a shared item.
    pub fn shared(name: impl Into<String>, price: Decimal) -> Self {
        BillItem::Shared {
            name: name.into(),
            price,
        }
    }

    /// Creates a personal item owned by `person`.
    pub fn personal(name: impl Into<String>, price: Decimal, person: impl Into<String>) -> Self {
        BillItem::Personal {
            name: name.into(),
            price,
            person: person.into(),
        }
    }

    /// Returns the display label of the item.
    pub fn name(&self) -> &str {
        match self {
            BillItem::Shared { name, .. } | BillItem::Personal { name, .. } => name,
        }
    }

    /// Returns the price of the item.
    pub fn price(&self) -> Decimal {
        match self {
            BillItem::Shared { price, .. } | BillItem::Personal { price, .. } => *price,
        }
    }

    /// Returns the owning participant for personal items.
    pub fn person(&self) -> Option<&str> {
        match self {
            BillItem::Shared { .. } => None,
            BillItem::Personal { person, .. } => Some(person),
        }
    }

    /// Returns true for shared items.
    pub fn is_shared(&self) -> bool {
        matches!(self, BillItem::Shared { .. })
    }
}

/// Everything needed to split one bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillInput {
    /// The bill date as `YYYY-MM-DD`.
    pub date: String,
    /// Free-text location label (restaurant name, city, ...).
    pub location: String,
    /// Tip in percentage points, so `15` means 15%.
    pub tip_percentage: Decimal,
    /// The bill lines in the order they appear.
    #[serde(default)]
    pub items: Vec<BillItem>,
}

impl BillInput {
    /// Checks the caller contract before any calculation runs.
    ///
    /// Rejects a negative tip percentage, negative prices and personal items
    /// with a blank `person`. The date is checked separately when it is
    /// formatted.
    ///
    /// # Examples
    ///
    /// ```
    /// use bill_splitter::models::{BillInput, BillItem};
    /// use rust_decimal::Decimal;
    ///
    /// let input = BillInput {
    ///     date: "2024-03-09".to_string(),
    ///     location: "Taipei".to_string(),
    ///     tip_percentage: Decimal::new(10, 0),
    ///     items: vec![BillItem::personal("Tea", Decimal::new(-1, 0), "Alice")],
    /// };
    /// assert!(input.validate().is_err());
    /// ```
    pub fn validate(&self) -> SplitResult<()> {
        if self.tip_percentage < Decimal::ZERO {
            return Err(SplitError::InvalidTipPercentage {
                value: self.tip_percentage,
            });
        }

        for (index, item) in self.items.iter().enumerate() {
            if item.price() < Decimal::ZERO {
                return Err(SplitError::InvalidItem {
                    index,
                    message: format!("price of '{}' must not be negative", item.name()),
                });
            }
            if let Some(person) = item.person() {
                if person.trim().is_empty() {
                    return Err(SplitError::InvalidItem {
                        index,
                        message: format!("personal item '{}' has no person", item.name()),
                    });
                }
            }
        }

        Ok(())
    }
}
