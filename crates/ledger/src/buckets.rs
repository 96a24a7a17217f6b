//! Savings bucket read model.

use serde::Serialize;

use crate::{Aggregator, Bucket, LedgerTransaction, Money, ResultLedger};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub id: String,
    pub name: String,
    pub institution: Option<String>,
    pub balance: Money,
    pub goal: Option<Money>,
    /// Balance as a percentage of the goal, truncated to two decimals.
    ///
    /// Not clamped: overshooting gives more than 100, a negative balance
    /// gives a negative value. `None` without a positive goal.
    pub progress: Option<f64>,
}

impl Aggregator<'_> {
    /// Balance of `bucket` from its transactions plus progress toward its goal.
    ///
    /// `transactions` must already be limited to this bucket.
    pub fn bucket_summary(
        &self,
        bucket: &Bucket,
        transactions: &[LedgerTransaction],
    ) -> ResultLedger<BucketSummary> {
        let balance = self.bucket_balance(transactions)?;
        let goal = bucket
            .goal_amount
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(Money::parse_amount)
            .transpose()?;

        Ok(BucketSummary {
            id: bucket.id.clone(),
            name: bucket.name.clone(),
            institution: bucket.institution.clone(),
            balance,
            goal,
            progress: goal.and_then(|goal| goal_progress(balance, goal)),
        })
    }
}

/// `balance / goal` in percent with two decimals; `None` for a zero goal.
#[must_use]
pub fn goal_progress(balance: Money, goal: Money) -> Option<f64> {
    if !goal.is_positive() {
        return None;
    }
    let basis_points = i128::from(balance.cents()) * 10_000 / i128::from(goal.cents());
    Some(basis_points as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(goal: Option<&str>) -> Bucket {
        Bucket {
            id: "b1".to_string(),
            name: "Emergency".to_string(),
            institution: Some("Credit Union".to_string()),
            goal_amount: goal.map(ToString::to_string),
        }
    }

    #[test]
    fn progress_toward_goal() {
        let txs = vec![
            LedgerTransaction::deposit("250"),
            LedgerTransaction::withdraw("50"),
        ];
        let summary = Aggregator::default()
            .bucket_summary(&bucket(Some("600.00")), &txs)
            .unwrap();
        assert_eq!(summary.balance, Money::new(20000));
        assert_eq!(summary.goal, Some(Money::new(60000)));
        assert_eq!(summary.progress, Some(33.33));
    }

    #[test]
    fn no_goal_no_progress() {
        let txs = vec![LedgerTransaction::deposit("1")];
        for goal in [None, Some(""), Some("0")] {
            let summary = Aggregator::default()
                .bucket_summary(&bucket(goal), &txs)
                .unwrap();
            assert_eq!(summary.progress, None, "goal {goal:?}");
        }
    }

    #[test]
    fn progress_is_not_clamped() {
        assert_eq!(goal_progress(Money::new(300), Money::new(200)), Some(150.0));
        assert_eq!(goal_progress(Money::new(-100), Money::new(400)), Some(-25.0));
    }

    #[test]
    fn invalid_goal_is_an_error() {
        assert!(
            Aggregator::default()
                .bucket_summary(&bucket(Some("lots")), &[])
                .is_err()
        );
    }
}
