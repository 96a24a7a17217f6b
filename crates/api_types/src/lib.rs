//! Row shapes of exported records, as they appear in CSV/JSON files.
//!
//! Every field stays a string (or an optional string) so that a bad value in
//! one row can be reported for that row instead of failing the whole file.

use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// One expense, with its category flattened into columns.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ExpenseRow {
        pub id: Option<String>,
        pub amount: String,
        pub description: Option<String>,
        /// RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
        pub occurred_at: Option<String>,
        pub category_id: Option<String>,
        pub category_name: Option<String>,
        pub category_color: Option<String>,
    }
}

pub mod bucket {
    use super::*;

    /// A deposit or withdrawal against a savings bucket.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct TransactionRow {
        pub bucket_id: Option<String>,
        /// `deposit` or `withdraw`.
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: String,
        pub occurred_at: Option<String>,
        pub notes: Option<String>,
    }
}

pub mod flow {
    use super::*;

    /// A general ledger entry.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct FlowRow {
        /// `income`, `expense` or `savings`.
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: String,
        pub category_id: Option<String>,
        pub occurred_at: Option<String>,
    }
}
