//! Plain-text rendering of the dashboard: summary cards, daily movements,
//! inflow/outflow bars, and the raw rows view.

use painel_core::{DailySeries, Dataset, FlowComparison, Summary};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const BAR_WIDTH: usize = 40;

/// `R$ 1,234.56` style: thousands grouped with commas, two decimals.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let mut v = amount.abs().round_dp(2);
    v.rescale(2);
    let text = v.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.round_dp(2) < Decimal::ZERO { "-" } else { "" };
    format!("{currency} {sign}{grouped}.{frac_part}")
}

pub fn render_summary(summary: &Summary, currency: &str) -> String {
    // Outflow is shown as a magnitude on its card.
    format!(
        "## Summary\n\n\
Inflow   {}\n\
Outflow  {}\n\
Net      {}\n",
        format_money(summary.total_inflow, currency),
        format_money(summary.total_outflow.abs(), currency),
        format_money(summary.net_balance, currency),
    )
}

pub fn render_daily(series: &DailySeries, currency: &str) -> String {
    let mut out = String::from("## Daily movements\n\n");
    if series.is_empty() {
        out.push_str("(no dated transactions)\n");
        return out;
    }
    for p in &series.points {
        out.push_str(&format!(
            "{}  {:>16}\n",
            p.date.format("%Y-%m-%d"),
            format_money(p.amount, currency)
        ));
    }
    out
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }
    let width = (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0);
    "#".repeat(width)
}

pub fn render_comparison(cmp: &FlowComparison, currency: &str) -> String {
    let max = cmp.inflow.max(cmp.outflow);
    let mut out = String::from("## Inflow vs. outflow\n\n");
    for (label, value) in cmp.categories() {
        out.push_str(&format!(
            "{label:<8} {:<width$} {}\n",
            bar(value, max),
            format_money(value, currency),
            width = BAR_WIDTH
        ));
    }
    out
}

/// Every row as loaded, including ones with unparsed cells.
pub fn render_rows(dataset: &Dataset) -> String {
    let mut out = dataset.columns().join(" | ");
    out.push('\n');
    for txn in dataset {
        let cells: Vec<String> = dataset
            .columns()
            .iter()
            .map(|c| {
                if c == painel_core::DATE_COLUMN {
                    match txn.date {
                        Some(d) => d.format("%d/%m/%Y").to_string(),
                        None => format!("{} (invalid date)", txn.raw_date),
                    }
                } else if c == painel_core::VALUE_COLUMN {
                    match txn.amount.value() {
                        Some(v) => v.to_string(),
                        None => format!("{} (missing)", txn.raw_amount),
                    }
                } else {
                    txn.field(c).unwrap_or("").to_string()
                }
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}
