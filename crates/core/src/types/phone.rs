//! Phone number normalization for exact-match store queries.

use core::fmt;

use serde::Serialize;

/// A phone number in the `+<digits>` shape the store matches against.
///
/// The store only finds customers by exact phone match, so free-form input
/// such as `"(555) 123-4567"` has to be reduced to `"+5551234567"` first.
/// This is a minimal shape check, not E.164 validation: no country code is
/// ever guessed and long international numbers pass through as-is.
///
/// ```
/// use order_concierge_core::PhoneNumber;
///
/// let phone = PhoneNumber::normalize("555-123-4567").unwrap();
/// assert_eq!(phone.as_str(), "+5551234567");
///
/// assert!(PhoneNumber::normalize("123-4567").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits accepted after stripping formatting.
    pub const MIN_DIGITS: usize = 10;

    /// Normalize free-form input.
    ///
    /// Returns `None` when fewer than [`Self::MIN_DIGITS`] digits remain.
    /// Input that already starts with `+` is kept verbatim (trimmed);
    /// everything else becomes `+` followed by the stripped digits.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.len() < Self::MIN_DIGITS {
            return None;
        }

        if raw.starts_with('+') {
            Some(Self(raw.to_owned()))
        } else {
            Some(Self(format!("+{digits}")))
        }
    }

    /// Returns the normalized number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
