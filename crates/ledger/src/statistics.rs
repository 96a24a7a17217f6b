use serde::Serialize;

use crate::{
    Aggregator, CashFlowRecord, FlowKind, Money, ResultLedger,
    aggregate::{located, narrow},
};

/// Income/expense/savings totals over a set of ledger entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_savings: Money,
    /// `income - expenses - savings`
    pub net: Money,
}

impl Aggregator<'_> {
    pub fn cash_flow_statistics(&self, records: &[CashFlowRecord]) -> ResultLedger<Statistic> {
        let (mut income, mut expenses, mut savings) = (0i128, 0i128, 0i128);
        for (index, record) in located(records) {
            let Some(amount) = self.amount(index, &record.amount)? else {
                continue;
            };
            let slot = match record.kind {
                FlowKind::Income => &mut income,
                FlowKind::Expense => &mut expenses,
                FlowKind::Savings => &mut savings,
            };
            *slot += i128::from(amount.cents());
        }

        Ok(Statistic {
            total_income: narrow(income)?,
            total_expenses: narrow(expenses)?,
            total_savings: narrow(savings)?,
            net: narrow(income - expenses - savings)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_by_kind() {
        let records = vec![
            CashFlowRecord::new(FlowKind::Income, "3000"),
            CashFlowRecord::new(FlowKind::Expense, "1200.40"),
            CashFlowRecord::new(FlowKind::Savings, "500"),
            CashFlowRecord::new(FlowKind::Expense, "99.60"),
        ];
        let stats = Aggregator::default().cash_flow_statistics(&records).unwrap();
        assert_eq!(stats.total_income, Money::new(300_000));
        assert_eq!(stats.total_expenses, Money::new(130_000));
        assert_eq!(stats.total_savings, Money::new(50_000));
        assert_eq!(stats.net, Money::new(120_000));
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(
            Aggregator::default().cash_flow_statistics(&[]).unwrap(),
            Statistic::default()
        );
    }
}
