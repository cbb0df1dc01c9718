//! Summary figures and per-day series derived from a [`Dataset`].
//!
//! Everything here is a pure function of its input. Rows with a missing
//! amount never contribute to a sum; rows with an unparsed date are left
//! out of the daily series only. Sums saturate at `Decimal::MAX` /
//! `Decimal::MIN` instead of overflowing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Dataset;

/// Inflow, outflow and net totals for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of positive amounts (`>= 0`).
    pub total_inflow: Decimal,
    /// Sum of negative amounts, sign kept (`<= 0`).
    pub total_outflow: Decimal,
    pub net_balance: Decimal,
}

impl Summary {
    pub fn new(total_inflow: Decimal, total_outflow: Decimal) -> Self {
        Self {
            total_inflow,
            total_outflow,
            net_balance: total_inflow + total_outflow,
        }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }
}

/// One day's bucket in a [`DailySeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Per-day net amounts, ascending by date, one point per distinct date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.points
            .iter()
            .fold(Decimal::ZERO, |acc, p| add_saturating(acc, p.amount))
    }
}

/// Inflow versus outflow magnitudes, as shown side by side in a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowComparison {
    pub inflow: Decimal,
    pub outflow: Decimal,
}

impl FlowComparison {
    /// Category labels paired with their magnitudes.
    pub fn categories(&self) -> [(&'static str, Decimal); 2] {
        [("Inflow", self.inflow), ("Outflow", self.outflow)]
    }
}

fn add_saturating(acc: Decimal, v: Decimal) -> Decimal {
    acc.checked_add(v).unwrap_or(if v.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

pub fn summarize(dataset: &Dataset) -> Summary {
    let mut inflow = Decimal::ZERO;
    let mut outflow = Decimal::ZERO;

    for v in dataset.iter().filter_map(|t| t.amount.value()) {
        if v > Decimal::ZERO {
            inflow = add_saturating(inflow, v);
        } else if v < Decimal::ZERO {
            outflow = add_saturating(outflow, v);
        }
    }

    Summary::new(inflow, outflow)
}

pub fn daily_series(dataset: &Dataset) -> DailySeries {
    let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for (date, txn) in dataset.valid_dated() {
        let bucket = buckets.entry(date).or_insert(Decimal::ZERO);
        if let Some(v) = txn.amount.value() {
            *bucket = add_saturating(*bucket, v);
        }
    }

    DailySeries {
        points: buckets
            .into_iter()
            .map(|(date, amount)| DailyPoint { date, amount })
            .collect(),
    }
}

pub fn flow_comparison(summary: &Summary) -> FlowComparison {
    FlowComparison {
        inflow: summary.total_inflow,
        outflow: summary.total_outflow.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Transaction};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scenario() -> Dataset {
        Dataset::from_transactions(vec![
            Transaction::new(Some(d(2024, 1, 1)), Amount::Value(dec("100.00"))),
            Transaction::new(Some(d(2024, 1, 1)), Amount::Value(dec("-40.00"))),
            Transaction::new(Some(d(2024, 1, 2)), Amount::Value(dec("50.00"))),
        ])
    }

    #[test]
    fn test_summarize_scenario() {
        let s = summarize(&scenario());
        assert_eq!(s.total_inflow, dec("150.00"));
        assert_eq!(s.total_outflow, dec("-40.00"));
        assert_eq!(s.net_balance, dec("110.00"));
    }

    #[test]
    fn test_daily_series_scenario() {
        let series = daily_series(&scenario());
        assert_eq!(
            series.points,
            vec![
                DailyPoint {
                    date: d(2024, 1, 1),
                    amount: dec("60.00")
                },
                DailyPoint {
                    date: d(2024, 1, 2),
                    amount: dec("50.00")
                },
            ]
        );
    }

    #[test]
    fn test_empty_and_all_missing_are_zero() {
        assert_eq!(summarize(&Dataset::default()), Summary::zero());

        let all_missing = Dataset::from_transactions(vec![
            Transaction::new(Some(d(2024, 3, 1)), Amount::Missing),
            Transaction::new(None, Amount::Missing),
        ]);
        assert_eq!(summarize(&all_missing), Summary::zero());
    }

    #[test]
    fn test_series_sorted_regardless_of_input_order() {
        let ds = Dataset::from_transactions(vec![
            Transaction::new(Some(d(2024, 2, 10)), Amount::Value(dec("1"))),
            Transaction::new(Some(d(2023, 12, 31)), Amount::Value(dec("2"))),
            Transaction::new(Some(d(2024, 1, 5)), Amount::Value(dec("3"))),
        ]);
        let dates: Vec<NaiveDate> = daily_series(&ds).points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2023, 12, 31), d(2024, 1, 5), d(2024, 2, 10)]);
    }

    #[test]
    fn test_missing_amount_on_valid_date_keeps_zero_bucket() {
        let ds = Dataset::from_transactions(vec![Transaction::new(
            Some(d(2024, 4, 1)),
            Amount::Missing,
        )]);
        let series = daily_series(&ds);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_undated_rows_excluded_from_series_but_summed() {
        let ds = Dataset::from_transactions(vec![
            Transaction::new(None, Amount::Value(dec("25"))),
            Transaction::new(Some(d(2024, 1, 1)), Amount::Value(dec("-5"))),
        ]);
        assert_eq!(daily_series(&ds).total(), dec("-5"));
        assert_eq!(summarize(&ds).net_balance, dec("20"));
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_panicking() {
        let day = Some(d(2024, 1, 1));
        let ds = Dataset::from_transactions(vec![
            Transaction::new(day, Amount::Value(Decimal::MAX)),
            Transaction::new(day, Amount::Value(Decimal::MAX)),
            Transaction::new(Some(d(2024, 1, 2)), Amount::Value(Decimal::MIN)),
            Transaction::new(Some(d(2024, 1, 2)), Amount::Value(Decimal::MIN)),
        ]);

        let s = summarize(&ds);
        assert_eq!(s.total_inflow, Decimal::MAX);
        assert_eq!(s.total_outflow, Decimal::MIN);
        assert_eq!(s.net_balance, Decimal::ZERO);

        let series = daily_series(&ds);
        assert_eq!(series.points[0].amount, Decimal::MAX);
        assert_eq!(series.points[1].amount, Decimal::MIN);
        assert_eq!(series.total(), Decimal::ZERO);
    }

    #[test]
    fn test_flow_comparison_uses_magnitudes() {
        let cmp = flow_comparison(&summarize(&scenario()));
        assert_eq!(cmp.inflow, dec("150.00"));
        assert_eq!(cmp.outflow, dec("40.00"));
        assert_eq!(cmp.categories()[1], ("Outflow", dec("40.00")));
    }
}
