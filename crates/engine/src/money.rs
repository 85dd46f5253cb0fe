use std::fmt;

use crate::Currency;

/// Amount in whole currency units paired with its currency.
///
/// `Display` renders the compact form used in alert messages, while
/// [`Money::report_label`] renders the fixed two-decimal form used in reports.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let overage = Money::new(1_000, Currency::Ngn);
/// assert_eq!(overage.to_string(), "₦1,000");
/// assert_eq!(overage.report_label(), "NGN 1,000.00");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    #[must_use]
    pub const fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    #[must_use]
    pub const fn amount(self) -> i64 {
        self.amount
    }

    /// Fixed-point label with the currency code prefix: `NGN 250,000.00`.
    #[must_use]
    pub fn report_label(self) -> String {
        format!("{} {}.00", self.currency.code(), group_thousands(self.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency.symbol(), group_thousands(self.amount))
    }
}

/// Formats an integer with `,` between groups of three digits.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(250_000), "250,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn report_label_has_two_decimals() {
        assert_eq!(Money::new(0, Currency::Ngn).report_label(), "NGN 0.00");
        assert_eq!(
            Money::new(-205_000, Currency::Ngn).report_label(),
            "NGN -205,000.00"
        );
    }

    #[test]
    fn display_uses_symbol() {
        assert_eq!(Money::new(12_500, Currency::Eur).to_string(), "€12,500");
    }
}
