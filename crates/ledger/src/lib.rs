//! Aggregations behind the finance dashboard and savings buckets.
//!
//! Inputs are flat slices of records carrying decimal amount strings; outputs
//! are [`Money`] totals. Nothing here performs I/O or keeps state between
//! calls. The free functions use [`InvalidRecordPolicy::Reject`]; build an
//! [`Aggregator`] to skip invalid records instead.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

pub use aggregate::{Aggregator, Anomaly, InvalidRecordPolicy};
pub use buckets::{BucketSummary, goal_progress};
pub use currency::Currency;
pub use dashboard::{CategorySlice, DashboardSummary, DateRange, DayPoint, PALETTE};
pub use error::LedgerError;
pub use money::{Money, format_amount};
pub use records::{
    Bucket, CashFlowRecord, CategoryKey, CategoryRef, ESCAPE_PREFIX, Expense, FlowKind,
    LedgerTransaction, MonetaryRecord, TransactionKind, UNCATEGORIZED,
};
pub use statistics::Statistic;

mod aggregate;
mod buckets;
mod currency;
mod dashboard;
mod error;
mod money;
mod records;
mod statistics;

pub type ResultLedger<T> = Result<T, LedgerError>;

/// Sum of all expense amounts.
pub fn expense_total(records: &[MonetaryRecord]) -> ResultLedger<Money> {
    Aggregator::default().expense_total(records)
}

/// Expense totals per category (`None` categories under `"uncategorized"`).
pub fn totals_by_category(records: &[MonetaryRecord]) -> ResultLedger<HashMap<CategoryKey, Money>> {
    Aggregator::default().totals_by_category(records)
}

/// Expense totals per calendar day.
pub fn totals_by_day(expenses: &[Expense]) -> ResultLedger<BTreeMap<NaiveDate, Money>> {
    Aggregator::default().totals_by_day(expenses)
}

/// Deposits minus withdrawals for one bucket's transactions.
pub fn bucket_balance(transactions: &[LedgerTransaction]) -> ResultLedger<Money> {
    Aggregator::default().bucket_balance(transactions)
}

/// Groups records by an arbitrary key and sums their amounts.
///
/// ```rust
/// use ledger::{group_and_sum, Money};
///
/// let rows = [("a", "1.50"), ("b", "2"), ("a", "0.50")];
/// let totals = group_and_sum(&rows, |r| r.0, |r| r.1).unwrap();
/// assert_eq!(totals["a"], Money::new(200));
/// ```
pub fn group_and_sum<R, K, FK, FA>(
    records: &[R],
    key_fn: FK,
    amount_fn: FA,
) -> ResultLedger<HashMap<K, Money>>
where
    K: Eq + std::hash::Hash,
    FK: Fn(&R) -> K,
    FA: Fn(&R) -> &str,
{
    Aggregator::default().group_and_sum(records, key_fn, amount_fn)
}
