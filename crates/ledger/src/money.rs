use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Currency, LedgerError, ResultLedger};

/// Signed money amount represented as **integer cents**.
///
/// Every amount string entering the ledger is parsed into this type, so sums
/// never accumulate floating-point drift.
///
/// # Examples
///
/// ```rust
/// use ledger::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing accepts `.` or `,` as decimal separator and rejects more than 2
/// decimals:
///
/// ```rust
/// use ledger::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Sum of `amounts`, or `None` when it does not fit in `i64` cents.
    ///
    /// The total is accumulated in `i128`, so an intermediate overshoot that
    /// later cancels out is not an overflow.
    #[must_use]
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        let total: i128 = amounts.into_iter().map(|m| i128::from(m.0)).sum();
        i64::try_from(total).ok().map(Money)
    }

    /// Major units as a float, for consumers that chart or serialize numbers.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a record amount: a decimal string that must not be negative.
    pub fn parse_amount(raw: &str) -> ResultLedger<Money> {
        let amount: Money = raw.parse()?;
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(raw.trim().to_string()));
        }
        Ok(amount)
    }

    /// Renders the amount with the currency symbol and digit grouping.
    ///
    /// ```rust
    /// use ledger::{Currency, Money};
    ///
    /// assert_eq!(Money::new(123_456).format(Currency::Usd), "$1,234.56");
    /// assert_eq!(Money::new(-5).format(Currency::Eur), "-0,05€");
    /// ```
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let (group_sep, decimal_sep) = currency.separators();
        let abs = self.0.unsigned_abs();
        let digits = (abs / 100).to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(c);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        let number = format!("{grouped}{decimal_sep}{:02}", abs % 100);
        if currency.symbol_after() {
            format!("{sign}{number}{}", currency.symbol())
        } else {
            format!("{sign}{}{number}", currency.symbol())
        }
    }
}

/// Formats a stored amount string, leaving it untouched when it does not parse.
#[must_use]
pub fn format_amount(raw: &str, currency: Currency) -> String {
    match raw.parse::<Money>() {
        Ok(money) => money.format(currency),
        Err(_) => raw.to_string(),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

// The operators panic on overflow in every build profile. Aggregations never
// use them: they sum in `i128` and report `LedgerError::Overflow` instead.

impl Add for Money {
    type Output = Money;

    /// # Panics
    ///
    /// Panics if the sum does not fit in `i64` cents.
    fn add(self, rhs: Money) -> Self::Output {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => panic!("Money overflow: {self} + {rhs}"),
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    ///
    /// Panics if the difference does not fit in `i64` cents.
    fn sub(self, rhs: Money) -> Self::Output {
        match self.checked_sub(rhs) {
            Some(difference) => difference,
            None => panic!("Money overflow: {self} - {rhs}"),
        }
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    /// # Panics
    ///
    /// Panics for the most negative amount, which has no positive counterpart.
    fn neg(self) -> Self::Output {
        match self.0.checked_neg() {
            Some(cents) => Money(cents),
            None => panic!("Money overflow: -({self})"),
        }
    }
}

/// Panics on overflow like [`Add`]; use [`Money::checked_sum`] to get `None`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Rejects empty strings, exponents, and more than 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| LedgerError::InvalidAmount(format!("{reason}: {s:?}"));

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty amount"));
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().unwrap_or_default();
        let frac_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid("invalid amount"));
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("invalid amount"));
        }
        let units: i64 = units_str.parse().map_err(|_| invalid("amount too large"))?;

        let cents: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) if !frac.chars().all(|c| c.is_ascii_digit()) => {
                return Err(invalid("invalid amount"));
            }
            Some(frac) if frac.len() == 1 => {
                frac.parse::<i64>().map_err(|_| invalid("invalid amount"))? * 10
            }
            Some(frac) if frac.len() == 2 => {
                frac.parse::<i64>().map_err(|_| invalid("invalid amount"))?
            }
            Some(_) => return Err(invalid("too many decimals")),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
