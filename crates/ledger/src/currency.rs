use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Currency used when rendering [`Money`](crate::Money) for display.
///
/// Amounts are always stored as minor units with 2 fraction digits; the
/// currency only decides the symbol and the separators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Brl,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Brl => "BRL",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Brl => "R$ ",
        }
    }

    /// Whether the symbol goes after the number (`12,50€`).
    #[must_use]
    pub const fn symbol_after(self) -> bool {
        matches!(self, Currency::Eur)
    }

    /// `(thousands separator, decimal separator)`.
    #[must_use]
    pub const fn separators(self) -> (char, char) {
        match self {
            Currency::Usd => (',', '.'),
            Currency::Eur | Currency::Brl => ('.', ','),
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "BRL" => Ok(Currency::Brl),
            other => Err(LedgerError::UnsupportedCurrency(other.to_string())),
        }
    }
}

impl core::str::FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(" brl ".parse::<Currency>().unwrap(), Currency::Brl);
        assert_eq!(Currency::try_from("eur").unwrap(), Currency::Eur);
    }

    #[test]
    fn unknown_code_is_its_own_error() {
        assert_eq!(
            Currency::try_from("jpy"),
            Err(LedgerError::UnsupportedCurrency("JPY".to_string()))
        );
    }
}
