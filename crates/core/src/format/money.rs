//! Money display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{CurrencyCode, Money};

/// Format an amount for display, e.g. `"$1,234.50"`.
///
/// Absent, non-numeric, and zero amounts all yield `None`: a zero shipping
/// fee should read as unset, not as `"$0.00"`. Currencies without a known
/// symbol render as `"1,234.50 JPY"`.
#[must_use]
pub fn format_money(money: Option<&Money>) -> Option<String> {
    let money = money?;
    let amount = money
        .decimal()?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if amount.is_zero() {
        return None;
    }

    let text = format!("{:.2}", amount.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = group_thousands(whole);
    let sign = if amount.is_sign_negative() { "-" } else { "" };

    Some(match CurrencyCode::from_code(&money.currency_code) {
        Some(currency) => format!("{sign}{}{grouped}.{fraction}", currency.symbol()),
        None => format!(
            "{sign}{grouped}.{fraction} {}",
            money.currency_code.trim().to_ascii_uppercase()
        ),
    })
}

/// Sum several amounts into one, labelled with `currency_code`.
///
/// Non-numeric amounts are skipped. Returns `None` when there are no amounts at all.
#[must_use]
pub fn sum_money<'a>(
    amounts: impl IntoIterator<Item = &'a Money>,
    currency_code: &str,
) -> Option<Money> {
    let mut seen = false;
    let total = amounts
        .into_iter()
        .inspect(|_| seen = true)
        .filter_map(Money::decimal)
        .fold(Decimal::ZERO, |acc, d| acc + d);

    seen.then(|| Money::new(total.to_string(), currency_code))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
