//! Status enums reported per line item.

use serde::{Deserialize, Serialize};

/// Per-line-item fulfillment status.
///
/// Coarse on purpose: an item covered by any fulfillment record counts as
/// fulfilled, regardless of quantity or whether that fulfillment was later
/// cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    #[default]
    Unfulfilled,
    Fulfilled,
}

impl std::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unfulfilled => write!(f, "UNFULFILLED"),
            Self::Fulfilled => write!(f, "FULFILLED"),
        }
    }
}

/// Whether a line item ships as a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// Ships physically.
    Physical,
    /// Delivered without shipping (gift cards, downloads, services).
    Digital,
}

impl ItemCategory {
    /// Whether this category requires shipping.
    #[must_use]
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Physical)
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Physical => write!(f, "PHYSICAL"),
            Self::Digital => write!(f, "DIGITAL"),
        }
    }
}
