//! Normalized transaction types shared by the loader, aggregator and assistant.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header of the date column in uploaded exports.
pub const DATE_COLUMN: &str = "Data";
/// Header of the amount column in uploaded exports.
pub const VALUE_COLUMN: &str = "Valor";

/// A transaction amount, or an explicit marker for a cell that did not coerce.
///
/// Positive means inflow, negative means outflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Value(Decimal),
    Missing,
}

impl Amount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Value(v) => Some(*v),
            Amount::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Amount::Missing)
    }
}

/// One row of the export after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// `None` when the `Data` cell did not match day/month/year.
    pub date: Option<NaiveDate>,
    /// The `Data` cell as it appeared in the file.
    pub raw_date: String,
    pub amount: Amount,
    /// The `Valor` cell as it appeared in the file.
    pub raw_amount: String,
    /// Remaining columns, verbatim, in header order.
    pub extra: Vec<(String, String)>,
}

impl Transaction {
    /// Build a transaction with no passthrough columns.
    pub fn new(date: Option<NaiveDate>, amount: Amount) -> Self {
        Self {
            date,
            raw_date: date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default(),
            amount,
            raw_amount: amount.value().map(|v| v.to_string()).unwrap_or_default(),
            extra: Vec::new(),
        }
    }

    /// Look up a passthrough column by header name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The record as an ordered JSON object following `columns`.
    pub fn to_record(&self, columns: &[String]) -> Map<String, Value> {
        let mut out = Map::new();
        for col in columns {
            if out.contains_key(col) {
                continue;
            }
            let v = if col == DATE_COLUMN {
                self.date
                    .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                    .unwrap_or(Value::Null)
            } else if col == VALUE_COLUMN {
                self.amount
                    .value()
                    .map(|v| Value::String(v.to_string()))
                    .unwrap_or(Value::Null)
            } else {
                self.field(col)
                    .map(|s| Value::String(s.to_string()))
                    .unwrap_or(Value::Null)
            };
            out.insert(col.clone(), v);
        }
        out
    }
}

/// The loaded export: header order plus rows in file order.
///
/// Never mutated after construction; a new upload builds a new `Dataset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, transactions: Vec<Transaction>) -> Self {
        Self {
            columns,
            transactions,
        }
    }

    /// A dataset with only the two required columns.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self::new(
            vec![DATE_COLUMN.to_string(), VALUE_COLUMN.to_string()],
            transactions,
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Rows whose `Data` parsed.
    pub fn valid_dated(&self) -> impl Iterator<Item = (NaiveDate, &Transaction)> {
        self.transactions
            .iter()
            .filter_map(|t| t.date.map(|d| (d, t)))
    }

    pub fn invalid_dates(&self) -> usize {
        self.transactions.iter().filter(|t| t.date.is_none()).count()
    }

    pub fn missing_amounts(&self) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.amount.is_missing())
            .count()
    }

    /// Every row as an ordered JSON object, in dataset order.
    pub fn records(&self) -> Vec<Value> {
        self.transactions
            .iter()
            .map(|t| Value::Object(t.to_record(&self.columns)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
