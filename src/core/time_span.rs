use crate::error::{ChartError, ChartResult};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Parses `[-]d` or `[-][d.]hh:mm[:ss[.fffffff]]` into milliseconds.
///
/// Hours must be below 24, minutes and seconds below 60, and the fraction has
/// one to seven digits.
pub fn parse_time_span(input: &str) -> ChartResult<f64> {
    let fail = |reason: &'static str| ChartError::InvalidTimeSpan {
        input: input.to_owned(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(fail("time span is empty"));
    }
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let millis = if body.contains(':') {
        let parts: Vec<&str> = body.split(':').collect();
        if parts.len() > 3 {
            return Err(fail("expected [d.]hh:mm[:ss[.fffffff]]"));
        }
        let (days, hours) = match parts[0].split_once('.') {
            Some((days, hours)) => {
                let days =
                    parse_component(days, u32::MAX).ok_or_else(|| fail("invalid day count"))?;
                (days, hours)
            }
            None => (0, parts[0]),
        };
        let hours = parse_component(hours, 23).ok_or_else(|| fail("hours must be 0-23"))?;
        let minutes =
            parse_component(parts[1], 59).ok_or_else(|| fail("minutes must be 0-59"))?;
        let (seconds, fraction_millis) = match parts.get(2) {
            Some(seconds) => parse_seconds(seconds)
                .ok_or_else(|| fail("seconds must be 0-59 with up to 7 fractional digits"))?,
            None => (0, 0.0),
        };

        i64::from(days) * MILLIS_PER_DAY
            + i64::from(hours) * MILLIS_PER_HOUR
            + i64::from(minutes) * MILLIS_PER_MINUTE
            + i64::from(seconds) * MILLIS_PER_SECOND
            + fraction_millis.round() as i64
    } else {
        let days = parse_component(body, u32::MAX)
            .ok_or_else(|| fail("expected a whole day count"))?;
        i64::from(days) * MILLIS_PER_DAY
    };

    let millis = millis as f64;
    Ok(if negative { -millis } else { millis })
}

/// Formats milliseconds as `[-][d.]hh:mm:ss[.fff]`.
#[must_use]
pub fn format_time_span(millis: f64) -> String {
    if !millis.is_finite() {
        return millis.to_string();
    }
    let total = millis.round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let days = total / MILLIS_PER_DAY as u64;
    let hours = (total % MILLIS_PER_DAY as u64) / MILLIS_PER_HOUR as u64;
    let minutes = (total % MILLIS_PER_HOUR as u64) / MILLIS_PER_MINUTE as u64;
    let seconds = (total % MILLIS_PER_MINUTE as u64) / MILLIS_PER_SECOND as u64;
    let fraction = total % MILLIS_PER_SECOND as u64;

    let mut text = String::from(sign);
    if days > 0 {
        text.push_str(&format!("{days}."));
    }
    text.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if fraction > 0 {
        text.push_str(&format!(".{fraction:03}"));
    }
    text
}

fn parse_component(text: &str, max: u32) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok().filter(|value| *value <= max)
}

fn parse_seconds(text: &str) -> Option<(u32, f64)> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let seconds = parse_component(whole, 59)?;
    let fraction_millis = match fraction {
        None => 0.0,
        Some(digits) => {
            if digits.is_empty()
                || digits.len() > 7
                || !digits.bytes().all(|byte| byte.is_ascii_digit())
            {
                return None;
            }
            let ticks: f64 = digits.parse().ok()?;
            ticks / 10_f64.powi(digits.len() as i32) * 1_000.0
        }
    };
    Some((seconds, fraction_millis))
}

#[cfg(test)]
mod tests {
    use super::{format_time_span, parse_time_span};

    #[test]
    fn parses_day_prefixed_span() {
        let millis = parse_time_span("1.02:03:04.5").expect("valid span");
        assert_eq!(millis, 93_784_500.0);
    }

    #[test]
    fn bare_number_is_days() {
        assert_eq!(parse_time_span("2").expect("valid span"), 172_800_000.0);
    }

    #[test]
    fn rejects_out_of_range_minutes() {
        assert!(parse_time_span("00:75").is_err());
        assert!(parse_time_span("1:2:3:4").is_err());
        assert!(parse_time_span("ab:cd").is_err());
    }

    #[test]
    fn formats_with_days_and_millis() {
        assert_eq!(format_time_span(93_784_500.0), "1.02:03:04.500");
        assert_eq!(format_time_span(-30_000.0), "-00:00:30");
    }
}
