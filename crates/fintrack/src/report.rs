//! Text and JSON rendering of aggregation results.

use std::{
    collections::{BTreeMap, HashMap},
    io::Write,
};

use chrono::NaiveDate;
use ledger::{BucketSummary, CategoryKey, Currency, DashboardSummary, Money, Statistic};
use serde::Serialize;

use crate::error::Result;

/// Where and how results are printed.
pub struct Printer<W: Write> {
    out: W,
    currency: Currency,
    json: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, currency: Currency, json: bool) -> Self {
        Self {
            out,
            currency,
            json,
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format(self.currency)
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    pub fn total(&mut self, total: Money) -> Result<()> {
        if self.json {
            return self.write_json(&serde_json::json!({ "totalSpent": total }));
        }
        let line = format!("Total spent: {}", self.money(total));
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Largest category first.
    pub fn categories(&mut self, totals: &HashMap<CategoryKey, Money>) -> Result<()> {
        if self.json {
            return self.write_json(totals);
        }
        let mut rows: Vec<_> = totals.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (key, value) in rows {
            let line = format!("{key}\t{}", self.money(*value));
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    pub fn daily(&mut self, totals: &BTreeMap<NaiveDate, Money>) -> Result<()> {
        if self.json {
            return self.write_json(totals);
        }
        for (day, value) in totals {
            let line = format!("{day}\t{}", self.money(*value));
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    pub fn bucket(&mut self, summary: &BucketSummary) -> Result<()> {
        if self.json {
            return self.write_json(summary);
        }
        let balance = self.money(summary.balance);
        writeln!(self.out, "{}: {balance}", summary.name)?;
        if let Some(institution) = &summary.institution {
            writeln!(self.out, "Institution: {institution}")?;
        }
        if let (Some(goal), Some(progress)) = (summary.goal, summary.progress) {
            let goal = self.money(goal);
            writeln!(self.out, "Goal: {goal} ({progress:.2}%)")?;
        }
        Ok(())
    }

    pub fn dashboard(&mut self, summary: &DashboardSummary) -> Result<()> {
        if self.json {
            return self.write_json(summary);
        }
        if let Some(range) = &summary.range {
            writeln!(self.out, "From {} to {}", range.from(), range.to())?;
        }
        let total = self.money(summary.total_spent);
        writeln!(self.out, "Total spent: {total}")?;
        writeln!(self.out, "Expenses: {}", summary.expense_count)?;

        writeln!(self.out, "\nBy category")?;
        for slice in &summary.by_category {
            let value = self.money(slice.value);
            writeln!(self.out, "  {}\t{}\t{value}", slice.name, slice.color)?;
        }

        writeln!(self.out, "\nBy day")?;
        for point in &summary.by_day {
            let value = self.money(point.value);
            writeln!(self.out, "  {}\t{value}", point.date)?;
        }
        Ok(())
    }

    pub fn statistics(&mut self, stats: &Statistic) -> Result<()> {
        if self.json {
            return self.write_json(stats);
        }
        let rows = [
            ("Income", stats.total_income),
            ("Expenses", stats.total_expenses),
            ("Savings", stats.total_savings),
            ("Net", stats.net),
        ];
        for (label, value) in rows {
            let line = format!("{label}:\t{}", self.money(value));
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
