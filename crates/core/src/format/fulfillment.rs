//! Reconciling line items against fulfillment records.

use std::collections::HashSet;

use crate::types::{FulfillmentRecord, FulfillmentStatus, LineItem};

use super::date::parse_timestamp;

/// IDs of every line item covered by at least one fulfillment.
#[must_use]
pub fn fulfilled_line_item_ids(fulfillments: &[FulfillmentRecord]) -> HashSet<&str> {
    fulfillments
        .iter()
        .flat_map(|f| f.line_item_ids.iter().map(String::as_str))
        .collect()
}

/// Status of each line item, in the same order as `line_items`.
#[must_use]
pub fn reconcile_line_items(
    line_items: &[LineItem],
    fulfillments: &[FulfillmentRecord],
) -> Vec<FulfillmentStatus> {
    let fulfilled = fulfilled_line_item_ids(fulfillments);

    line_items
        .iter()
        .map(|item| {
            if fulfilled.contains(item.id.as_str()) {
                FulfillmentStatus::Fulfilled
            } else {
                FulfillmentStatus::Unfulfilled
            }
        })
        .collect()
}

/// The fulfillment with the most recent `created_at`.
///
/// Ties go to the record that appears first. A timestamp that cannot be
/// parsed sorts before every valid one.
#[must_use]
pub fn latest_fulfillment(fulfillments: &[FulfillmentRecord]) -> Option<&FulfillmentRecord> {
    fulfillments
        .iter()
        .map(|f| (f, parse_timestamp(&f.created_at)))
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(f, _)| f)
}
