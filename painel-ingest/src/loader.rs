//! Load a comma-separated export with `Data` and `Valor` columns.
//!
//! Expected shape:
//!   Data,Descricao,Valor
//!   01/01/2024,Salario,100.00
//!   01/01/2024,Mercado,-40.00
//!
//! Any other columns are carried through verbatim.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use painel_core::{Dataset, Transaction, DATE_COLUMN, VALUE_COLUMN};
use tracing::{debug, info};

use crate::cells::{parse_amount, parse_date};
use crate::error::{FormatError, LoadError, Result};

/// Load a dataset from any reader holding the CSV text.
pub fn load_reader(reader: impl Read) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let date_idx = columns.iter().position(|c| c == DATE_COLUMN);
    let value_idx = columns.iter().position(|c| c == VALUE_COLUMN);
    let (date_idx, value_idx) = match (date_idx, value_idx) {
        (Some(d), Some(v)) => (d, v),
        _ => {
            let missing = [(DATE_COLUMN, date_idx), (VALUE_COLUMN, value_idx)]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(FormatError { missing }.into());
        }
    };

    let mut txns = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let raw_date = record.get(date_idx).unwrap_or("").to_string();
        let raw_amount = record.get(value_idx).unwrap_or("").to_string();

        let date = parse_date(&raw_date);
        let amount = parse_amount(&raw_amount);
        if date.is_none() || amount.is_missing() {
            debug!(row = row + 1, raw_date = %raw_date, raw_amount = %raw_amount, "row anomaly");
        }

        let extra = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx && *i != value_idx)
            .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();

        txns.push(Transaction {
            date,
            raw_date,
            amount,
            raw_amount,
            extra,
        });
    }

    let dataset = Dataset::new(columns, txns);
    info!(
        rows = dataset.len(),
        invalid_dates = dataset.invalid_dates(),
        missing_amounts = dataset.missing_amounts(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Load a dataset from a file on disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

pub fn load_str(text: &str) -> Result<Dataset> {
    load_reader(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use painel_core::Amount;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_loads_rows_in_file_order() {
        let text = "Data,Descricao,Valor\n\
01/01/2024,Salario,100.00\n\
01/01/2024,Mercado,-40.00\n\
02/01/2024,Pix,50.00\n";

        let ds = load_str(text).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.columns(), &["Data", "Descricao", "Valor"]);

        let first = &ds.transactions()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(first.amount, Amount::Value(Decimal::from_str("100.00").unwrap()));
        assert_eq!(first.field("Descricao"), Some("Salario"));
        assert_eq!(ds.transactions()[2].field("Descricao"), Some("Pix"));
    }

    #[test]
    fn test_missing_columns_is_format_error() {
        let err = load_str("Date,Amount\n01/01/2024,1\n").unwrap_err();
        match err {
            LoadError::Format(f) => assert_eq!(f.missing, vec!["Data", "Valor"]),
            other => panic!("expected format error, got {other:?}"),
        }

        let err = load_str("Data,Descricao\n01/01/2024,x\n").unwrap_err();
        match err {
            LoadError::Format(f) => assert_eq!(f.missing, vec!["Valor"]),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_format_error() {
        assert!(matches!(load_str(""), Err(LoadError::Format(_))));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let ds = load_str("Data,Valor\n").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_ragged_rows_read_as_empty_cells() {
        let ds = load_str("Data,Valor,Nota\n01/01/2024\n").unwrap();
        let t = &ds.transactions()[0];
        assert!(t.date.is_some());
        assert!(t.amount.is_missing());
        assert_eq!(t.field("Nota"), Some(""));
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let ds = load_str("Data,Valor,Descricao\n01/01/2024,10,\"Padaria, centro\"\n").unwrap();
        assert_eq!(ds.transactions()[0].field("Descricao"), Some("Padaria, centro"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
