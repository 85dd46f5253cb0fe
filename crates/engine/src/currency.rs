use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency every amount of a deployment is expressed in.
///
/// Amounts are stored as `i64` whole currency units; the currency only
/// decides how they are labelled when shown to a user.
///
/// - `symbol()` is used in alert messages (`₦1,000`).
/// - `code()` is used in the PDF report, whose builtin fonts cannot draw
///   every symbol (`NGN 1,000.00`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Ngn,
    Eur,
    Usd,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Ngn => "NGN",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    /// Symbol used in user-facing messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Ngn => "₦",
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NGN" => Ok(Currency::Ngn),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(EngineError::InvalidKind(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from(" ngn ").unwrap(), Currency::Ngn);
        assert_eq!(Currency::try_from("usd").unwrap(), Currency::Usd);
        assert!(Currency::try_from("GBP").is_err());
    }
}
