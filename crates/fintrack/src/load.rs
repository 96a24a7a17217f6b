//! Reading row files and turning rows into ledger records.
//!
//! Row-level problems (unknown `type`, unreadable date) go through the
//! aggregator's policy, exactly like bad amounts do later on. Every record
//! keeps the index of its row, so errors raised after rows were filtered out
//! still point at the right line of the file.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use api_types::{bucket::TransactionRow, expense::ExpenseRow, flow::FlowRow};
use chrono::{DateTime, FixedOffset, NaiveDate};
use ledger::{
    Aggregator, CashFlowRecord, CategoryRef, Expense, FlowKind, LedgerError, LedgerTransaction,
    MonetaryRecord, TransactionKind,
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::Format(path.display().to_string())),
        }
    }
}

pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let format = Format::from_path(path)?;
    let rows = rows_from_reader(BufReader::new(File::open(path)?), format)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "rows loaded");
    Ok(rows)
}

pub fn rows_from_reader<T: DeserializeOwned, R: Read>(reader: R, format: Format) -> Result<Vec<T>> {
    match format {
        Format::Csv => Ok(csv::Reader::from_reader(reader)
            .deserialize()
            .collect::<std::result::Result<_, _>>()?),
        Format::Json => Ok(serde_json::from_reader(reader)?),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn monetary_records(rows: Vec<ExpenseRow>) -> Vec<MonetaryRecord> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| MonetaryRecord {
            amount: row.amount,
            category_id: non_empty(row.category_id),
            source_index: Some(index),
        })
        .collect()
}

/// Accepts RFC 3339 timestamps and bare dates (read as midnight UTC).
pub fn parse_occurred_at(raw: &str) -> std::result::Result<DateTime<FixedOffset>, LedgerError> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc().fixed_offset())
        .ok_or_else(|| LedgerError::InvalidDate(raw.to_string()))
}

pub fn expenses(rows: Vec<ExpenseRow>, aggregator: &Aggregator<'_>) -> Result<Vec<Expense>> {
    let mut expenses = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let occurred_at = row
            .occurred_at
            .as_deref()
            .ok_or_else(|| LedgerError::InvalidDate("missing occurredAt".to_string()))
            .and_then(parse_occurred_at);
        let Some(occurred_at) = aggregator.screen(index, occurred_at)? else {
            continue;
        };

        let category = non_empty(row.category_id).map(|id| CategoryRef {
            name: non_empty(row.category_name).unwrap_or_else(|| id.clone()),
            color: non_empty(row.category_color),
            id,
        });
        expenses.push(Expense {
            id: non_empty(row.id).unwrap_or_else(|| format!("row-{index}")),
            amount: row.amount,
            description: non_empty(row.description),
            occurred_at,
            category,
            source_index: Some(index),
        });
    }
    Ok(expenses)
}

/// Keeps the rows of `bucket` (every row when `None`) with a known `type`.
pub fn ledger_transactions(
    rows: Vec<TransactionRow>,
    bucket: Option<&str>,
    aggregator: &Aggregator<'_>,
) -> Result<Vec<LedgerTransaction>> {
    let mut transactions = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if let Some(bucket) = bucket
            && row.bucket_id.as_deref().map(str::trim) != Some(bucket)
        {
            continue;
        }
        let kind = TransactionKind::try_from(row.kind.trim());
        if let Some(kind) = aggregator.screen(index, kind)? {
            transactions.push(LedgerTransaction::new(kind, row.amount).with_source_index(index));
        }
    }
    Ok(transactions)
}

pub fn cash_flows(rows: Vec<FlowRow>, aggregator: &Aggregator<'_>) -> Result<Vec<CashFlowRecord>> {
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let kind = FlowKind::try_from(row.kind.trim());
        if let Some(kind) = aggregator.screen(index, kind)? {
            records.push(CashFlowRecord::new(kind, row.amount).with_source_index(index));
        }
    }
    Ok(records)
}
