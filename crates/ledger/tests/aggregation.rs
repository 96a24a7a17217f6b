use std::collections::HashMap;

use ledger::{
    Aggregator, CategoryKey, InvalidRecordPolicy, LedgerError, LedgerTransaction, MonetaryRecord,
    Money, bucket_balance, expense_total, group_and_sum, totals_by_category,
};

fn category(id: &str) -> CategoryKey {
    CategoryKey::Category(id.to_string())
}

fn mixed_expenses() -> Vec<MonetaryRecord> {
    vec![
        MonetaryRecord::new("100.50", Some("cat1")),
        MonetaryRecord::new("50.25", Some("cat2")),
        MonetaryRecord::new("25", None),
        MonetaryRecord::new("0.10", Some("cat1")),
        MonetaryRecord::new("0.20", None),
        MonetaryRecord::new("1999.99", Some("cat3")),
    ]
}

#[test]
fn expense_total_of_nothing_is_zero() {
    assert_eq!(expense_total(&[]).unwrap(), Money::ZERO);
}

#[test]
fn expense_total_sums_exactly() {
    let expenses = vec![
        MonetaryRecord::new("100.50", Some("cat1")),
        MonetaryRecord::new("50.25", Some("cat2")),
        MonetaryRecord::new("25", None),
    ];
    let total = expense_total(&expenses).unwrap();
    assert_eq!(total, Money::new(17575));
    assert_eq!(total.to_string(), "175.75");
}

#[test]
fn expense_total_has_no_float_drift() {
    let expenses = vec![MonetaryRecord::new("0.10", None); 3];
    assert_eq!(expense_total(&expenses).unwrap(), Money::new(30));
}

#[test]
fn totals_by_category_groups_and_sums() {
    let expenses = vec![
        MonetaryRecord::new("100", Some("food")),
        MonetaryRecord::new("50", Some("food")),
        MonetaryRecord::new("30", Some("transport")),
        MonetaryRecord::new("20", None),
    ];
    let expected = HashMap::from([
        (category("food"), Money::new(15000)),
        (category("transport"), Money::new(3000)),
        (CategoryKey::Uncategorized, Money::new(2000)),
    ]);
    assert_eq!(totals_by_category(&expenses).unwrap(), expected);
}

#[test]
fn totals_by_category_of_nothing_is_empty() {
    assert!(totals_by_category(&[]).unwrap().is_empty());
}

#[test]
fn grouping_preserves_the_total() {
    let expenses = mixed_expenses();
    let grouped: Money = totals_by_category(&expenses).unwrap().values().sum();
    assert_eq!(grouped, expense_total(&expenses).unwrap());
}

#[test]
fn category_totals_serialize_with_sentinel_label() {
    let expenses = vec![
        MonetaryRecord::new("20", None),
        MonetaryRecord::new("1.5", Some("food")),
    ];
    let json = serde_json::to_value(totals_by_category(&expenses).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "uncategorized": "20.00", "food": "1.50" })
    );
}

#[test]
fn category_named_like_the_sentinel_survives_json() {
    let expenses = vec![
        MonetaryRecord::new("20", None),
        MonetaryRecord::new("5", Some("uncategorized")),
    ];
    let totals = totals_by_category(&expenses).unwrap();
    let json = serde_json::to_string(&totals).unwrap();

    let reparsed: HashMap<CategoryKey, Money> = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, totals);
    assert_eq!(reparsed[&CategoryKey::Uncategorized], Money::new(2000));
    assert_eq!(reparsed[&category("uncategorized")], Money::new(500));

    let grouped: Money = reparsed.values().sum();
    assert_eq!(grouped, expense_total(&expenses).unwrap());
}

#[test]
fn bucket_balance_of_nothing_is_zero() {
    assert_eq!(bucket_balance(&[]).unwrap(), Money::ZERO);
}

#[test]
fn bucket_balance_adds_deposits_and_subtracts_withdrawals() {
    let txs = vec![
        LedgerTransaction::deposit("100"),
        LedgerTransaction::deposit("50"),
        LedgerTransaction::withdraw("30"),
    ];
    assert_eq!(bucket_balance(&txs).unwrap(), Money::new(12000));
}

#[test]
fn bucket_balance_can_go_negative() {
    let txs = vec![
        LedgerTransaction::withdraw("25"),
        LedgerTransaction::withdraw("10"),
    ];
    assert_eq!(bucket_balance(&txs).unwrap(), Money::new(-3500));
}

#[test]
fn bucket_balance_is_order_independent_and_idempotent() {
    let mut txs = vec![
        LedgerTransaction::deposit("12.34"),
        LedgerTransaction::withdraw("0.34"),
        LedgerTransaction::deposit("7"),
        LedgerTransaction::withdraw("19.50"),
        LedgerTransaction::deposit("0.01"),
    ];
    let expected = bucket_balance(&txs).unwrap();
    assert_eq!(expected, Money::new(-49));
    assert_eq!(bucket_balance(&txs).unwrap(), expected);

    for _ in 0..txs.len() {
        txs.rotate_left(1);
        assert_eq!(bucket_balance(&txs).unwrap(), expected);
    }
    txs.reverse();
    assert_eq!(bucket_balance(&txs).unwrap(), expected);
}

#[test]
fn bucket_balance_matches_deposits_minus_withdrawals() {
    let txs = vec![
        LedgerTransaction::deposit("10.10"),
        LedgerTransaction::withdraw("3.03"),
        LedgerTransaction::deposit("1"),
    ];
    let deposits: Vec<MonetaryRecord> = txs
        .iter()
        .filter(|tx| tx.kind == ledger::TransactionKind::Deposit)
        .map(|tx| MonetaryRecord::new(tx.amount.clone(), None))
        .collect();
    let withdrawals: Vec<MonetaryRecord> = txs
        .iter()
        .filter(|tx| tx.kind == ledger::TransactionKind::Withdraw)
        .map(|tx| MonetaryRecord::new(tx.amount.clone(), None))
        .collect();
    assert_eq!(
        bucket_balance(&txs).unwrap(),
        expense_total(&deposits).unwrap() - expense_total(&withdrawals).unwrap()
    );
}

#[test]
fn malformed_amount_is_never_silently_summed() {
    let expenses = vec![
        MonetaryRecord::new("10", None),
        MonetaryRecord::new("NaN", None),
    ];
    let err = expense_total(&expenses).unwrap_err();
    assert!(matches!(err.cause(), LedgerError::InvalidAmount(_)));
    assert_eq!(err.to_string().split(':').next(), Some("record 1"));
}

#[test]
fn negative_expense_is_a_data_error() {
    let txs = vec![LedgerTransaction::deposit("-5")];
    assert!(matches!(
        bucket_balance(&txs).unwrap_err().cause(),
        LedgerError::NegativeAmount(_)
    ));
}

#[test]
fn skip_policy_sums_the_valid_records() {
    let expenses = vec![
        MonetaryRecord::new("10", Some("a")),
        MonetaryRecord::new("ten", Some("a")),
        MonetaryRecord::new("2.5", None),
    ];
    let aggregator = Aggregator::new(InvalidRecordPolicy::Skip).with_diagnostics(|_| {});
    assert_eq!(aggregator.expense_total(&expenses).unwrap(), Money::new(1250));
    let grouped: Money = aggregator
        .totals_by_category(&expenses)
        .unwrap()
        .values()
        .sum();
    assert_eq!(grouped, Money::new(1250));
}

#[test]
fn group_and_sum_accepts_any_key() {
    let rows = vec![
        ("2026-01-01T09:00", "1.00"),
        ("2026-01-01T18:00", "2.00"),
        ("2026-01-02T07:00", "4.00"),
    ];
    let by_day = group_and_sum(&rows, |row| row.0[..10].to_string(), |row| row.1).unwrap();
    assert_eq!(by_day.len(), 2);
    assert_eq!(by_day["2026-01-01"], Money::new(300));
    assert_eq!(by_day["2026-01-02"], Money::new(400));
}
