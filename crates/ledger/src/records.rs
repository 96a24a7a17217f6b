//! Record shapes consumed by the aggregations.
//!
//! Amounts stay as the exact decimal strings handed over by the producer;
//! they are parsed into [`Money`](crate::Money) only while aggregating.

use std::{borrow::Cow, fmt};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::LedgerError;

/// Group label used for records without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Prefix added to a real category id whose label would otherwise read as
/// [`UNCATEGORIZED`] (or already starts with the prefix).
pub const ESCAPE_PREFIX: char = '~';

/// Records that can remember their position in the file they were read from.
///
/// Aggregations report that position instead of the slice index, so an error
/// still names the right row after the caller filtered rows out.
pub(crate) trait SourceIndex {
    fn source_index(&self) -> Option<usize>;
}

/// An expense-like amount with an optional category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryRecord {
    pub amount: String,
    pub category_id: Option<String>,
    /// Row of the source file, when the record was loaded from one.
    #[serde(skip)]
    pub source_index: Option<usize>,
}

impl MonetaryRecord {
    pub fn new(amount: impl Into<String>, category_id: Option<&str>) -> Self {
        Self {
            amount: amount.into(),
            category_id: category_id.map(ToString::to_string),
            source_index: None,
        }
    }

    #[must_use]
    pub fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = Some(index);
        self
    }

    #[must_use]
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::from(self.category_id.as_deref())
    }
}

/// Grouping key for category totals.
///
/// A missing category maps to [`CategoryKey::Uncategorized`], which can never
/// collide with a real category id. The same holds for the text label: a
/// real id spelled `uncategorized` is written `~uncategorized`.
///
/// ```rust
/// use ledger::CategoryKey;
///
/// assert_eq!(CategoryKey::Uncategorized.label(), "uncategorized");
/// assert_eq!(CategoryKey::Category("uncategorized".into()).label(), "~uncategorized");
/// assert_eq!(CategoryKey::Category("food".into()).label(), "food");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    Category(String),
    Uncategorized,
}

impl CategoryKey {
    /// The category id, or [`UNCATEGORIZED`] for the sentinel group.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Category(id) => id,
            Self::Uncategorized => UNCATEGORIZED,
        }
    }

    /// Label used in text and JSON output; distinct for distinct keys.
    #[must_use]
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::Uncategorized => Cow::Borrowed(UNCATEGORIZED),
            Self::Category(id) if id == UNCATEGORIZED || id.starts_with(ESCAPE_PREFIX) => {
                Cow::Owned(format!("{ESCAPE_PREFIX}{id}"))
            }
            Self::Category(id) => Cow::Borrowed(id.as_str()),
        }
    }

    /// Inverse of [`CategoryKey::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if let Some(id) = label.strip_prefix(ESCAPE_PREFIX) {
            Self::Category(id.to_string())
        } else if label == UNCATEGORIZED {
            Self::Uncategorized
        } else {
            Self::Category(label.to_string())
        }
    }
}

impl From<Option<&str>> for CategoryKey {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(id) => Self::Category(id.to_string()),
            None => Self::Uncategorized,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Direction of a bucket transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            other => Err(LedgerError::UnknownTransactionKind(other.to_string())),
        }
    }
}

/// A deposit or withdrawal against one savings bucket.
///
/// `amount` is never negative; the sign comes from `kind`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: String,
    #[serde(skip)]
    pub source_index: Option<usize>,
}

impl LedgerTransaction {
    pub fn new(kind: TransactionKind, amount: impl Into<String>) -> Self {
        Self {
            kind,
            amount: amount.into(),
            source_index: None,
        }
    }

    #[must_use]
    pub fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = Some(index);
        self
    }

    pub fn deposit(amount: impl Into<String>) -> Self {
        Self::new(TransactionKind::Deposit, amount)
    }

    pub fn withdraw(amount: impl Into<String>) -> Self {
        Self::new(TransactionKind::Withdraw, amount)
    }
}

/// Type of a general ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Income,
    Expense,
    Savings,
}

impl FlowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Savings => "savings",
        }
    }
}

impl TryFrom<&str> for FlowKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "savings" => Ok(Self::Savings),
            other => Err(LedgerError::UnknownFlowKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub amount: String,
    #[serde(skip)]
    pub source_index: Option<usize>,
}

impl CashFlowRecord {
    pub fn new(kind: FlowKind, amount: impl Into<String>) -> Self {
        Self {
            kind,
            amount: amount.into(),
            source_index: None,
        }
    }

    #[must_use]
    pub fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = Some(index);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

/// An expense row as the dashboard receives it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: String,
    pub description: Option<String>,
    pub occurred_at: DateTime<FixedOffset>,
    pub category: Option<CategoryRef>,
    #[serde(skip)]
    pub source_index: Option<usize>,
}

impl Expense {
    #[must_use]
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::from(self.category.as_ref().map(|c| c.id.as_str()))
    }

    /// The amount/category view used by the plain totals.
    #[must_use]
    pub fn as_record(&self) -> MonetaryRecord {
        MonetaryRecord {
            amount: self.amount.clone(),
            category_id: self.category.as_ref().map(|c| c.id.clone()),
            source_index: self.source_index,
        }
    }
}

impl SourceIndex for MonetaryRecord {
    fn source_index(&self) -> Option<usize> {
        self.source_index
    }
}

impl SourceIndex for LedgerTransaction {
    fn source_index(&self) -> Option<usize> {
        self.source_index
    }
}

impl SourceIndex for CashFlowRecord {
    fn source_index(&self) -> Option<usize> {
        self.source_index
    }
}

impl SourceIndex for Expense {
    fn source_index(&self) -> Option<usize> {
        self.source_index
    }
}

/// A savings goal; its balance is always derived from transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub institution: Option<String>,
    pub goal_amount: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_key_uses_sentinel_for_missing_category() {
        assert_eq!(
            MonetaryRecord::new("1", None).category_key(),
            CategoryKey::Uncategorized
        );
        assert_eq!(CategoryKey::Uncategorized.as_str(), "uncategorized");
        // a real id spelled like the sentinel is still a distinct key
        assert_ne!(
            MonetaryRecord::new("1", Some("uncategorized")).category_key(),
            CategoryKey::Uncategorized
        );
    }

    #[test]
    fn sentinel_and_lookalike_id_keep_distinct_labels() {
        let keys = [
            CategoryKey::Uncategorized,
            CategoryKey::Category("uncategorized".into()),
            CategoryKey::Category("~uncategorized".into()),
            CategoryKey::Category("food".into()),
        ];
        let labels: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            ["uncategorized", "~uncategorized", "~~uncategorized", "food"]
        );
        for key in keys {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(serde_json::from_str::<CategoryKey>(&json).unwrap(), key);
        }
    }

    #[test]
    fn transaction_kind_rejects_unknown_tags() {
        assert_eq!(
            TransactionKind::try_from("deposit").unwrap(),
            TransactionKind::Deposit
        );
        assert_eq!(
            TransactionKind::try_from("refund"),
            Err(LedgerError::UnknownTransactionKind("refund".to_string()))
        );
        assert!(serde_json::from_str::<LedgerTransaction>(
            r#"{"type":"bonus","amount":"1"}"#
        )
        .is_err());
    }

    #[test]
    fn ledger_transaction_reads_wire_shape() {
        let tx: LedgerTransaction =
            serde_json::from_str(r#"{"type":"withdraw","amount":"25.00"}"#).unwrap();
        assert_eq!(tx, LedgerTransaction::withdraw("25.00"));
    }

    #[test]
    fn expense_reads_camel_case_rows() {
        let expense: Expense = serde_json::from_str(
            r##"{"id":"e1","amount":"9.90","description":null,
                "occurredAt":"2026-03-04T22:15:00-03:00",
                "category":{"id":"food","name":"Food","color":"#22c55e"}}"##,
        )
        .unwrap();
        assert_eq!(expense.category_key(), CategoryKey::Category("food".into()));
        assert_eq!(expense.as_record(), MonetaryRecord::new("9.90", Some("food")));
    }
}
