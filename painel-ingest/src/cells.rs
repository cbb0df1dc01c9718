//! Cell-level coercion for the `Data` and `Valor` columns.
//!
//! Neither function fails: a cell that does not coerce becomes `None` /
//! [`Amount::Missing`] so one bad row never aborts a load.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use painel_core::Amount;
use regex::Regex;
use rust_decimal::Decimal;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})/(?P<month>\d{1,2})/(?P<year>\d{4}|\d{2})$").expect("date pattern")
});

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("number pattern")
});

/// Largest accepted magnitude (2^64 - 1). Anything bigger is treated as a
/// bad cell so that sums over billions of rows stay representable.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(u32::MAX, u32::MAX, 0, false, 0);

/// Parse a day/month/year cell, e.g. `31/01/2024` or `31/01/24`.
///
/// Two-digit years follow the usual pivot: 00-69 is 20xx, 70-99 is 19xx.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    let caps = DATE_RE.captures(s)?;
    let fmt = if caps["year"].len() == 4 {
        "%d/%m/%Y"
    } else {
        "%d/%m/%y"
    };
    NaiveDate::parse_from_str(s, fmt).ok()
}

/// Coerce a `Valor` cell to a decimal amount.
///
/// Accepts plain decimals (`-40.00`, `+5`) and scientific notation
/// (`1e3`). Locale-formatted numbers such as `1.234,56` are not guessed at,
/// and magnitudes above [`MAX_AMOUNT`] become [`Amount::Missing`].
pub fn parse_amount(cell: &str) -> Amount {
    let s = cell.trim();
    if !NUMBER_RE.is_match(s) {
        return Amount::Missing;
    }

    let parsed = if s.contains(['e', 'E']) {
        Decimal::from_scientific(&s.to_ascii_lowercase())
    } else {
        Decimal::from_str(s)
    };

    match parsed {
        Ok(v) if v.abs() > MAX_AMOUNT => Amount::Missing,
        Ok(mut v) => {
            // -0.00 prints oddly
            if v.is_zero() {
                v.set_sign_positive(true);
            }
            Amount::Value(v)
        }
        Err(_) => Amount::Missing,
    }
}
