//! Participant scanning.
//!
//! Participants are exactly the distinct `person` values on personal items,
//! kept in order of first appearance so output ordering is deterministic.

use std::collections::HashSet;

use crate::models::{AuditStep, BillItem};

/// The result of scanning participants, including the audit step.
#[derive(Debug, Clone)]
pub struct ParticipantScanResult {
    /// Distinct participants in first-appearance order.
    pub participants: Vec<String>,
    /// The audit step recording this scan.
    pub audit_step: AuditStep,
}

/// Collects the distinct participants named on personal items.
///
/// Shared items contribute nobody.
///
/// # Examples
///
/// ```
/// use bill_splitter::calculation::scan_participants;
/// use bill_splitter::models::BillItem;
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     BillItem::personal("Tea", Decimal::ONE, "Bob"),
///     BillItem::shared("Rice", Decimal::ONE),
///     BillItem::personal("Coffee", Decimal::ONE, "Alice"),
///     BillItem::personal("Cake", Decimal::ONE, "Bob"),
/// ];
/// assert_eq!(scan_participants(&items), vec!["Bob", "Alice"]);
/// ```
pub fn scan_participants(items: &[BillItem]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut participants = Vec::new();

    for person in items.iter().filter_map(BillItem::person) {
        if seen.insert(person) {
            participants.push(person.to_string());
        }
    }

    participants
}

/// Scans participants and records an audit step.
pub fn scan_participants_audited(items: &[BillItem], step_number: u32) -> ParticipantScanResult {
    let participants = scan_participants(items);
    let personal_count = items.iter().filter(|item| !item.is_shared()).count();

    let reasoning = if participants.is_empty() {
        "No personal items; bill has no participants".to_string()
    } else {
        format!(
            "{} personal item(s) name {} participant(s): {}",
            personal_count,
            participants.len(),
            participants.join(", ")
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "participant_scan".to_string(),
        rule_name: "Participant Scan".to_string(),
        input: serde_json::json!({
            "personal_item_count": personal_count
        }),
        output: serde_json::json!({
            "participants": participants,
            "participant_count": participants.len()
        }),
        reasoning,
    };

    ParticipantScanResult {
        participants,
        audit_step,
    }
}
