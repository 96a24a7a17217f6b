//! Single-pass aggregations over monetary records.
//!
//! Every aggregation is a fold of parsed amounts into one accumulator (or one
//! accumulator per group key). Amounts are summed as `i128` minor units and
//! narrowed to [`Money`] once at the end, so the result never depends on the
//! order of the input.

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    CategoryKey, Expense, LedgerError, LedgerTransaction, MonetaryRecord, Money, ResultLedger,
    TransactionKind, records::SourceIndex,
};

/// What to do with a record whose amount (or tag) cannot be used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Abort the aggregation with the record's error.
    #[default]
    Reject,
    /// Leave the record out and report an [`Anomaly`].
    Skip,
}

impl TryFrom<&str> for InvalidRecordPolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown policy: {other}")),
        }
    }
}

/// A record left out of an aggregation under [`InvalidRecordPolicy::Skip`].
///
/// `index` is the record's source row when it carries one, its position in
/// the aggregated slice otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anomaly {
    pub index: usize,
    pub error: LedgerError,
}

type Diagnostics<'a> = Box<dyn Fn(&Anomaly) + 'a>;

/// Runs aggregations under an [`InvalidRecordPolicy`].
///
/// The aggregator holds no data: each call works only on the slice it is
/// given, so one instance can be reused for any number of calls.
///
/// ```rust
/// use ledger::{Aggregator, InvalidRecordPolicy, MonetaryRecord, Money};
///
/// let records = vec![
///     MonetaryRecord::new("10.00", Some("food")),
///     MonetaryRecord::new("oops", None),
/// ];
/// let total = Aggregator::new(InvalidRecordPolicy::Skip)
///     .expense_total(&records)
///     .unwrap();
/// assert_eq!(total, Money::new(1000));
/// ```
#[derive(Default)]
pub struct Aggregator<'a> {
    policy: InvalidRecordPolicy,
    diagnostics: Option<Diagnostics<'a>>,
}

impl std::fmt::Debug for Aggregator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("policy", &self.policy)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(policy: InvalidRecordPolicy) -> Self {
        Self {
            policy,
            diagnostics: None,
        }
    }

    /// Routes skipped-record reports to `callback` instead of the log.
    #[must_use]
    pub fn with_diagnostics(mut self, callback: impl Fn(&Anomaly) + 'a) -> Self {
        self.diagnostics = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn policy(&self) -> InvalidRecordPolicy {
        self.policy
    }

    /// Applies the policy to the outcome of validating record `index`.
    ///
    /// `Ok(Some(_))` keeps the record, `Ok(None)` skips it, `Err` aborts.
    pub fn screen<T>(&self, index: usize, result: ResultLedger<T>) -> ResultLedger<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                let error = error.at(index);
                match self.policy {
                    InvalidRecordPolicy::Reject => Err(error),
                    InvalidRecordPolicy::Skip => {
                        self.report(&Anomaly { index, error });
                        Ok(None)
                    }
                }
            }
        }
    }

    fn report(&self, anomaly: &Anomaly) {
        match &self.diagnostics {
            Some(callback) => callback(anomaly),
            None => tracing::warn!(
                index = anomaly.index,
                error = %anomaly.error.cause(),
                "skipping invalid record"
            ),
        }
    }

    pub(crate) fn amount(&self, index: usize, raw: &str) -> ResultLedger<Option<Money>> {
        self.screen(index, Money::parse_amount(raw))
    }

    /// Sums `amount_fn` over `records`.
    pub fn sum<R, FA>(&self, records: &[R], amount_fn: FA) -> ResultLedger<Money>
    where
        FA: Fn(&R) -> &str,
    {
        self.signed_sum(records.iter().enumerate(), |record| (1, amount_fn(record)))
    }

    /// Sums amounts with a per-record sign: `sign_fn` returns `1` or `-1`
    /// together with the amount string.
    fn signed_sum<'r, R: 'r, FS>(
        &self,
        records: impl IntoIterator<Item = (usize, &'r R)>,
        sign_fn: FS,
    ) -> ResultLedger<Money>
    where
        FS: Fn(&R) -> (i8, &str),
    {
        let mut total: i128 = 0;
        for (index, record) in records {
            let (sign, raw) = sign_fn(record);
            if let Some(amount) = self.amount(index, raw)? {
                total += i128::from(sign) * i128::from(amount.cents());
            }
        }
        narrow(total)
    }

    /// Groups `records` by `key_fn` and sums `amount_fn` within each group.
    ///
    /// This is the one reduction behind every "totals by X" view; callers
    /// only choose the key.
    pub fn group_and_sum<R, K, FK, FA>(
        &self,
        records: &[R],
        key_fn: FK,
        amount_fn: FA,
    ) -> ResultLedger<HashMap<K, Money>>
    where
        K: Eq + Hash,
        FK: Fn(&R) -> K,
        FA: Fn(&R) -> &str,
    {
        self.grouped_sum(records.iter().enumerate(), key_fn, amount_fn)
    }

    fn grouped_sum<'r, R: 'r, K, FK, FA>(
        &self,
        records: impl IntoIterator<Item = (usize, &'r R)>,
        key_fn: FK,
        amount_fn: FA,
    ) -> ResultLedger<HashMap<K, Money>>
    where
        K: Eq + Hash,
        FK: Fn(&R) -> K,
        FA: Fn(&R) -> &str,
    {
        let mut kept = Vec::new();
        for (index, record) in records {
            if let Some(amount) = self.amount(index, amount_fn(record))? {
                kept.push((key_fn(record), amount));
            }
        }
        sum_groups(kept)
    }

    /// Sum of all expense amounts; zero for an empty slice.
    pub fn expense_total(&self, records: &[MonetaryRecord]) -> ResultLedger<Money> {
        self.signed_sum(located(records), |record| (1, record.amount.as_str()))
    }

    /// Expense totals per category, with `None` categories grouped under
    /// [`CategoryKey::Uncategorized`].
    pub fn totals_by_category(
        &self,
        records: &[MonetaryRecord],
    ) -> ResultLedger<HashMap<CategoryKey, Money>> {
        self.grouped_sum(located(records), MonetaryRecord::category_key, |record| {
            record.amount.as_str()
        })
    }

    /// Expense totals per calendar day, in the offset each expense was
    /// recorded with.
    pub fn totals_by_day(&self, expenses: &[Expense]) -> ResultLedger<BTreeMap<NaiveDate, Money>> {
        let by_day = self.grouped_sum(
            located(expenses),
            |expense| expense.occurred_at.date_naive(),
            |expense| expense.amount.as_str(),
        )?;
        Ok(by_day.into_iter().collect())
    }

    /// Net balance of one bucket: deposits minus withdrawals.
    ///
    /// The result may be negative; keeping it positive is the writer's job.
    pub fn bucket_balance(&self, transactions: &[LedgerTransaction]) -> ResultLedger<Money> {
        self.signed_sum(located(transactions), |tx| {
            let sign = match tx.kind {
                TransactionKind::Deposit => 1,
                TransactionKind::Withdraw => -1,
            };
            (sign, tx.amount.as_str())
        })
    }
}

/// Pairs each record with the index errors should name.
pub(crate) fn located<R: SourceIndex>(records: &[R]) -> impl Iterator<Item = (usize, &R)> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| (record.source_index().unwrap_or(index), record))
}

/// Sums already-parsed amounts per key.
pub(crate) fn sum_groups<K: Eq + Hash>(
    items: impl IntoIterator<Item = (K, Money)>,
) -> ResultLedger<HashMap<K, Money>> {
    let mut groups: HashMap<K, i128> = HashMap::new();
    for (key, amount) in items {
        *groups.entry(key).or_insert(0) += i128::from(amount.cents());
    }
    groups
        .into_iter()
        .map(|(key, total)| Ok((key, narrow(total)?)))
        .collect()
}

/// Sums already-parsed amounts.
pub(crate) fn sum_money(items: impl IntoIterator<Item = Money>) -> ResultLedger<Money> {
    narrow(items.into_iter().map(|m| i128::from(m.cents())).sum())
}

pub(crate) fn narrow(total: i128) -> ResultLedger<Money> {
    i64::try_from(total)
        .map(Money::new)
        .map_err(|_| LedgerError::Overflow)
}
