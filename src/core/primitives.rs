use chrono::{DateTime, NaiveDateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::core::DoubleRange;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Milliseconds between the OADate epoch (1899-12-30 00:00) and the Unix epoch.
const OA_EPOCH_TO_UNIX_MILLIS: i64 = 25_569 * 86_400_000;

/// Encodes a date-time as an OLE-Automation style day count.
///
/// The integral part counts days since 1899-12-30 00:00 and the fractional
/// part is the elapsed fraction of that day. The encoding is linear on both
/// sides of the epoch: `-0.25` is 1899-12-29 18:00.
#[must_use]
pub fn to_oa_date(time: NaiveDateTime) -> f64 {
    let millis = time.and_utc().timestamp_millis() + OA_EPOCH_TO_UNIX_MILLIS;
    millis as f64 / MILLIS_PER_DAY
}

/// Decodes an OADate day count, rounded to the nearest millisecond.
///
/// Returns `None` for non-finite values and values outside chrono's range.
#[must_use]
pub fn from_oa_date(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    let millis = (value * MILLIS_PER_DAY).round();
    if millis.abs() >= 9.0e15 {
        return None;
    }
    let unix_millis = (millis as i64).checked_sub(OA_EPOCH_TO_UNIX_MILLIS)?;
    DateTime::<Utc>::from_timestamp_millis(unix_millis).map(|time| time.naive_utc())
}

/// Rounds through `rust_decimal` so binary noise (`0.30000000000000004`) does
/// not leak into label values. Values `Decimal` cannot hold pass through.
#[must_use]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|decimal| decimal.round_dp(decimals))
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or(value)
}

/// Formats `value` with at most `decimals` fractional digits and no trailing zeros.
#[must_use]
pub fn format_decimal(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded = decimal.round_dp(decimals).normalize();
            if rounded.is_zero() {
                "0".to_owned()
            } else {
                rounded.to_string()
            }
        }
        None => value.to_string(),
    }
}

/// Min/max envelope of the finite values in `values`; empty when none are finite.
#[must_use]
pub fn finite_extent<I>(values: I) -> DoubleRange
where
    I: IntoIterator<Item = f64>,
{
    let envelope = values
        .into_iter()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .fold(None, |acc: Option<(OrderedFloat<f64>, OrderedFloat<f64>)>, value| {
            Some(match acc {
                None => (value, value),
                Some((min, max)) => (min.min(value), max.max(value)),
            })
        });

    match envelope {
        Some((min, max)) => DoubleRange::new(min.into_inner(), max.into_inner()),
        None => DoubleRange::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::{format_decimal, from_oa_date, round_to_decimals, to_oa_date};
    use chrono::NaiveDate;

    #[test]
    fn oa_epoch_encodes_to_zero() {
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid epoch");
        assert_eq!(to_oa_date(epoch), 0.0);
    }

    #[test]
    fn noon_is_half_day() {
        let noon = NaiveDate::from_ymd_opt(1900, 1, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid date");
        assert_eq!(to_oa_date(noon), 2.5);
        assert_eq!(from_oa_date(2.5), Some(noon));
    }

    #[test]
    fn decimal_rounding_strips_binary_noise() {
        assert_eq!(round_to_decimals(0.1 + 0.2, 10), 0.3);
        assert_eq!(format_decimal(0.1 + 0.2, 10), "0.3");
        assert_eq!(format_decimal(-0.000_000_000_01, 4), "0");
        assert_eq!(format_decimal(20.0, 10), "20");
    }
}
