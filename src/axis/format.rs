use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, Timelike};

use crate::core::primitives::format_decimal;
use crate::core::{DateTimeIntervalType, XValues, format_time_span, from_oa_date};
use crate::error::{ChartError, ChartResult};

/// Fractional digits kept in numeric label text unless configured.
pub const DEFAULT_LABEL_DECIMALS: u32 = 10;
/// Fractional digits kept for back-transformed logarithmic labels.
pub const LOG_LABEL_DECIMALS: u32 = 8;

/// Rejects strftime patterns chrono cannot render.
pub fn validate_date_format(pattern: &str) -> ChartResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidLabelFormat(pattern.to_owned()));
    }
    Ok(())
}

/// Default strftime pattern per granularity; transition labels add the
/// coarser unit.
#[must_use]
pub fn date_label_pattern(unit: DateTimeIntervalType, is_transition: bool) -> &'static str {
    match (unit, is_transition) {
        (DateTimeIntervalType::Years, _) => "%Y",
        (DateTimeIntervalType::Months, false) => "%b",
        (DateTimeIntervalType::Months, true) => "%b %Y",
        (DateTimeIntervalType::Auto | DateTimeIntervalType::Days, false) => "%d",
        (DateTimeIntervalType::Auto | DateTimeIntervalType::Days, true) => "%b %d",
        (DateTimeIntervalType::Hours, false) => "%H:%M",
        (DateTimeIntervalType::Hours, true) => "%b %d %H:%M",
        (DateTimeIntervalType::Minutes, _) => "%H:%M",
        (DateTimeIntervalType::Seconds, _) => "%H:%M:%S",
        (DateTimeIntervalType::Milliseconds, false) => "%S%.3f",
        (DateTimeIntervalType::Milliseconds, true) => "%H:%M:%S%.3f",
    }
}

#[must_use]
pub fn format_date_label(
    date: NaiveDateTime,
    unit: DateTimeIntervalType,
    is_transition: bool,
    custom_pattern: Option<&str>,
) -> String {
    let pattern = custom_pattern.unwrap_or_else(|| date_label_pattern(unit, is_transition));
    render_date(date, pattern)
}

fn render_date(date: NaiveDateTime, pattern: &str) -> String {
    let mut text = String::new();
    if write!(text, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    text
}

/// Text for the raw X value at `index`, formatted by the value's declared type.
#[must_use]
pub fn format_x_value(x_values: &XValues, index: usize) -> Option<String> {
    match x_values {
        XValues::String(values) => values.get(index).cloned(),
        XValues::Double(values) | XValues::Logarithmic(values) => values
            .get(index)
            .map(|value| format_decimal(*value, DEFAULT_LABEL_DECIMALS)),
        XValues::TimeSpan(values) => values.get(index).map(|value| format_time_span(*value)),
        XValues::DateTime(values) => {
            let date = from_oa_date(*values.get(index)?)?;
            let pattern = if date.num_seconds_from_midnight() == 0 {
                "%Y-%m-%d"
            } else {
                "%Y-%m-%d %H:%M:%S"
            };
            Some(render_date(date, pattern))
        }
    }
}
