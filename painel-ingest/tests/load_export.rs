use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use painel_core::{daily_series, summarize, Amount};
use painel_ingest::{load_path, load_str};
use rust_decimal::Decimal;

fn extrato_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("extrato.csv")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn test_fixture_keeps_every_row() {
    let ds = load_path(extrato_path()).expect("should load extrato.csv");
    assert_eq!(ds.len(), 6);
    assert_eq!(ds.missing_amounts(), 1);
    assert_eq!(ds.invalid_dates(), 1);
}

#[test]
fn test_non_numeric_valor_is_retained_and_ignored() {
    let ds = load_path(extrato_path()).unwrap();
    let assinatura = ds
        .iter()
        .find(|t| t.field("Descricao") == Some("Assinatura"))
        .unwrap();
    assert_eq!(assinatura.amount, Amount::Missing);
    assert_eq!(assinatura.raw_amount, "abc");

    let jan3 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let point = daily_series(&ds).points.into_iter().find(|p| p.date == jan3).unwrap();
    assert_eq!(point.amount, Decimal::ZERO);
}

#[test]
fn test_unparsable_data_is_retained_but_not_bucketed() {
    let ds = load_path(extrato_path()).unwrap();
    let ajuste = ds
        .iter()
        .find(|t| t.field("Descricao") == Some("Ajuste manual"))
        .unwrap();
    assert_eq!(ajuste.date, None);
    assert_eq!(ajuste.raw_date, "31-13-2024");

    let series = daily_series(&ds);
    assert_eq!(series.len(), 4);
    // 7.50 counts toward the summary but not the series
    assert_eq!(summarize(&ds).net_balance, dec("105.20"));
    assert_eq!(series.total(), dec("97.70"));
}

#[test]
fn test_fixture_summary() {
    let ds = load_path(extrato_path()).unwrap();
    let s = summarize(&ds);
    assert_eq!(s.total_inflow, dec("157.50"));
    assert_eq!(s.total_outflow, dec("-52.30"));
    assert_eq!(s.net_balance, s.total_inflow + s.total_outflow);
}

#[test]
fn test_near_max_valor_cells_do_not_break_aggregation() {
    let ds = load_str(
        "Data,Valor\n01/01/2024,79228162514264337593543950335\n01/01/2024,79228162514264337593543950335\n01/01/2024,10\n",
    )
    .unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.missing_amounts(), 2);
    assert_eq!(summarize(&ds).net_balance, dec("10"));
    assert_eq!(daily_series(&ds).total(), dec("10"));
}
