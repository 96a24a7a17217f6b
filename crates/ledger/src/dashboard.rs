//! Chart-ready expense summary: total, per-category slices and per-day points.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::{
    Aggregator, CategoryKey, Expense, LedgerError, Money, ResultLedger,
    aggregate::{located, sum_groups, sum_money},
};

/// Fallback colors for categories without one, assigned in first-seen order.
pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#22c55e", "#eab308", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#f97316",
];

/// Display name for the uncategorized group.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Inclusive range of calendar days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> ResultLedger<Self> {
        if from > to {
            return Err(LedgerError::InvalidDate(format!(
                "range starts after it ends: {from} > {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// `today` and the `days` days before it.
    pub fn last_days(today: NaiveDate, days: u32) -> ResultLedger<Self> {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| LedgerError::InvalidDate(format!("{days} days before {today}")))?;
        Self::new(from, today)
    }

    #[must_use]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub key: CategoryKey,
    pub name: String,
    pub color: String,
    pub value: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub value: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub range: Option<DateRange>,
    /// Expenses counted in the figures below.
    pub expense_count: usize,
    pub total_spent: Money,
    /// Largest slice first.
    pub by_category: Vec<CategorySlice>,
    /// Oldest day first.
    pub by_day: Vec<DayPoint>,
}

impl Aggregator<'_> {
    /// Builds the dashboard for the expenses falling inside `range` (all of
    /// them when `range` is `None`).
    ///
    /// Each amount is parsed once, so under the skip policy an invalid
    /// expense is reported once and left out of every figure.
    pub fn dashboard(
        &self,
        expenses: &[Expense],
        range: Option<DateRange>,
    ) -> ResultLedger<DashboardSummary> {
        let mut kept: Vec<(&Expense, Money)> = Vec::new();
        for (index, expense) in located(expenses) {
            if let Some(range) = range
                && !range.contains(expense.occurred_at.date_naive())
            {
                continue;
            }
            if let Some(amount) = self.amount(index, &expense.amount)? {
                kept.push((expense, amount));
            }
        }

        let total_spent = sum_money(kept.iter().map(|(_, amount)| *amount))?;

        let mut labels: HashMap<CategoryKey, (String, String)> = HashMap::new();
        for (expense, _) in &kept {
            let key = expense.category_key();
            if labels.contains_key(&key) {
                continue;
            }
            let fallback = PALETTE[labels.len() % PALETTE.len()];
            let label = match &expense.category {
                Some(category) => (
                    category.name.clone(),
                    category.color.clone().unwrap_or_else(|| fallback.to_string()),
                ),
                None => (UNCATEGORIZED_NAME.to_string(), fallback.to_string()),
            };
            labels.insert(key, label);
        }

        let by_category_totals =
            sum_groups(kept.iter().map(|(expense, amount)| (expense.category_key(), *amount)))?;
        let mut by_category: Vec<CategorySlice> = by_category_totals
            .into_iter()
            .map(|(key, value)| {
                let (name, color) = labels.remove(&key).unwrap_or_default();
                CategorySlice {
                    key,
                    name,
                    color,
                    value,
                }
            })
            .collect();
        by_category.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.key.cmp(&b.key)));

        let by_day_totals = sum_groups(
            kept.iter()
                .map(|(expense, amount)| (expense.occurred_at.date_naive(), *amount)),
        )?;
        let mut by_day: Vec<DayPoint> = by_day_totals
            .into_iter()
            .map(|(date, value)| DayPoint { date, value })
            .collect();
        by_day.sort_by_key(|point| point.date);

        tracing::debug!(
            expenses = expenses.len(),
            kept = kept.len(),
            categories = by_category.len(),
            days = by_day.len(),
            "dashboard aggregated"
        );

        Ok(DashboardSummary {
            range,
            expense_count: kept.len(),
            total_spent,
            by_category,
            by_day,
        })
    }
}
