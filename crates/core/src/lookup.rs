//! Lookup keys.
//!
//! A caller asks for an order by phone, order number, email, or order id.
//! [`LookupKey::parse`] validates and normalizes that raw input before any
//! network call is made; a parse failure is a caller error, never an upstream
//! one.

use core::fmt;

use thiserror::Error;

use crate::types::{Email, EmailError, PhoneNumber};

/// Prefix of an order's global id.
pub const ORDER_GID_PREFIX: &str = "gid://shopify/Order/";

/// The ways a caller can identify an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Phone,
    OrderNumber,
    Email,
    Id,
}

impl LookupKind {
    /// Text returned when the store has no match. Not-found is not an error:
    /// the agent reads this to the caller.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Phone => "I couldn't find any recent orders with that phone number.",
            Self::OrderNumber => "I couldn't find an order with that order number.",
            Self::Email => "I couldn't find any recent orders with that email address.",
            Self::Id => "I couldn't find an order with that ID.",
        }
    }

    /// Name of the request field carrying this key.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::OrderNumber => "orderNumber",
            Self::Email => "email",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Phone => "phone",
            Self::OrderNumber => "order_number",
            Self::Email => "email",
            Self::Id => "id",
        };
        f.write_str(s)
    }
}

/// Errors from validating lookup input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The required field was absent or blank.
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// Fewer than ten digits after stripping formatting.
    #[error("Invalid phone number. Please provide at least 10 digits.")]
    InvalidPhone,

    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Neither a numeric id nor an order GID.
    #[error("Invalid order ID")]
    InvalidOrderId,
}

/// A validated, normalized lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Normalized `+<digits>` phone number.
    Phone(PhoneNumber),
    /// Order number without the leading `#`.
    OrderNumber(String),
    Email(Email),
    /// Full order GID.
    Id(String),
}

impl LookupKey {
    /// Validate raw caller input for `kind`.
    ///
    /// ```
    /// use order_concierge_core::{LookupKey, LookupKind};
    ///
    /// let key = LookupKey::parse(LookupKind::OrderNumber, " #1024 ").unwrap();
    /// assert_eq!(key.filter_query().as_deref(), Some("name:1024"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the input is blank or malformed for its kind.
    pub fn parse(kind: LookupKind, raw: &str) -> Result<Self, LookupError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LookupError::Missing {
                field: kind.field_name(),
            });
        }

        match kind {
            LookupKind::Phone => PhoneNumber::normalize(raw)
                .map(Self::Phone)
                .ok_or(LookupError::InvalidPhone),
            LookupKind::OrderNumber => {
                let number = raw.strip_prefix('#').unwrap_or(raw).trim();
                if number.is_empty() {
                    return Err(LookupError::Missing {
                        field: kind.field_name(),
                    });
                }
                Ok(Self::OrderNumber(number.to_string()))
            }
            LookupKind::Email => Ok(Self::Email(Email::parse(raw)?)),
            LookupKind::Id => parse_order_id(raw).map(Self::Id),
        }
    }

    /// The kind of this key.
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        match self {
            Self::Phone(_) => LookupKind::Phone,
            Self::OrderNumber(_) => LookupKind::OrderNumber,
            Self::Email(_) => LookupKind::Email,
            Self::Id(_) => LookupKind::Id,
        }
    }

    /// Search filter for the store's `query:` argument.
    ///
    /// `None` for id lookups, which fetch the order directly.
    #[must_use]
    pub fn filter_query(&self) -> Option<String> {
        match self {
            Self::Phone(phone) => Some(format!("phone:{phone}")),
            Self::OrderNumber(number) => Some(format!("name:{number}")),
            Self::Email(email) => Some(format!("email:{email}")),
            Self::Id(_) => None,
        }
    }

    /// See [`LookupKind::not_found_message`].
    #[must_use]
    pub const fn not_found_message(&self) -> &'static str {
        self.kind().not_found_message()
    }
}

fn parse_order_id(raw: &str) -> Result<String, LookupError> {
    let numeric = raw.strip_prefix(ORDER_GID_PREFIX).unwrap_or(raw);

    if !numeric.is_empty() && numeric.bytes().all(|b| b.is_ascii_digit()) {
        Ok(format!("{ORDER_GID_PREFIX}{numeric}"))
    } else {
        Err(LookupError::InvalidOrderId)
    }
}
