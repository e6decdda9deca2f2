use std::ops::BitOr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::primitives::MILLIS_PER_DAY;
use crate::error::{ChartError, ChartResult};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;

/// Calendar granularity used for date-time stepping, alignment and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateTimeIntervalType {
    /// Resolved per pass from the range span.
    #[default]
    Auto,
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl DateTimeIntervalType {
    /// Concrete granularities ordered coarse to fine.
    pub const TIERS: [Self; 7] = [
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// The next coarser concrete granularity, used for transition labels.
    #[must_use]
    pub fn coarser(self) -> Option<Self> {
        match self {
            Self::Auto | Self::Years => None,
            Self::Months => Some(Self::Years),
            Self::Days => Some(Self::Months),
            Self::Hours => Some(Self::Days),
            Self::Minutes => Some(Self::Hours),
            Self::Seconds => Some(Self::Minutes),
            Self::Milliseconds => Some(Self::Seconds),
        }
    }
}

/// Adds `amount` units of `unit` to `date`.
///
/// Years and months use calendar addition for the whole part (day clamped to
/// the target month's length) and spread the fractional part as 365/30 day
/// spans. Finer units add a fixed duration. `Auto` leaves the date unchanged.
/// Returns `None` when the result leaves chrono's representable range.
#[must_use]
pub fn increase_interval(
    date: NaiveDateTime,
    amount: f64,
    unit: DateTimeIntervalType,
) -> Option<NaiveDateTime> {
    if !amount.is_finite() {
        return None;
    }
    match unit {
        DateTimeIntervalType::Auto => Some(date),
        DateTimeIntervalType::Years => add_calendar_units(date, amount, 12, 365.0),
        DateTimeIntervalType::Months => add_calendar_units(date, amount, 1, 30.0),
        DateTimeIntervalType::Days => add_millis(date, amount * MILLIS_PER_DAY),
        DateTimeIntervalType::Hours => add_millis(date, amount * MILLIS_PER_HOUR),
        DateTimeIntervalType::Minutes => add_millis(date, amount * MILLIS_PER_MINUTE),
        DateTimeIntervalType::Seconds => add_millis(date, amount * MILLIS_PER_SECOND),
        DateTimeIntervalType::Milliseconds => add_millis(date, amount),
    }
}

/// Rounds `date` down to a multiple of `interval` units of `unit`.
///
/// Fields below `unit` are reset (hour 13 with a 4 hour interval aligns to
/// 12:00:00.000). Months and days count from their first value, so a two
/// month interval aligns to January, March, May and so on. `Auto`, and a
/// non-positive or non-finite interval, return the input unchanged.
#[must_use]
pub fn align_range_start(
    date: NaiveDateTime,
    interval: f64,
    unit: DateTimeIntervalType,
) -> NaiveDateTime {
    if !interval.is_finite() || interval <= 0.0 {
        return date;
    }
    let floor_to = |value: u32| (f64::from(value) / interval).floor() * interval;

    let aligned = match unit {
        DateTimeIntervalType::Auto => return date,
        DateTimeIntervalType::Years => {
            let year = (floor_to(date.year().max(0) as u32) as i32).max(1);
            NaiveDate::from_ymd_opt(year, 1, 1).and_then(|day| day.and_hms_opt(0, 0, 0))
        }
        DateTimeIntervalType::Months => {
            let month = (floor_to(date.month0()) as u32).min(11) + 1;
            NaiveDate::from_ymd_opt(date.year(), month, 1).and_then(|day| day.and_hms_opt(0, 0, 0))
        }
        DateTimeIntervalType::Days => {
            let day = (floor_to(date.day0()) as u32) + 1;
            NaiveDate::from_ymd_opt(date.year(), date.month(), day)
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        }
        DateTimeIntervalType::Hours => date.date().and_hms_opt(floor_to(date.hour()) as u32, 0, 0),
        DateTimeIntervalType::Minutes => {
            date.date()
                .and_hms_opt(date.hour(), floor_to(date.minute()) as u32, 0)
        }
        DateTimeIntervalType::Seconds => {
            date.date()
                .and_hms_opt(date.hour(), date.minute(), floor_to(date.second()) as u32)
        }
        DateTimeIntervalType::Milliseconds => {
            let millis = date.nanosecond() / 1_000_000;
            date.date().and_hms_milli_opt(
                date.hour(),
                date.minute(),
                date.second(),
                floor_to(millis) as u32,
            )
        }
    };
    aligned.unwrap_or(date)
}

/// Last instant of the `unit` bucket containing `date`, at second precision
/// for units coarser than seconds.
#[must_use]
pub fn end_of_unit(date: NaiveDateTime, unit: DateTimeIntervalType) -> NaiveDateTime {
    let end = match unit {
        DateTimeIntervalType::Auto | DateTimeIntervalType::Milliseconds => return date,
        DateTimeIntervalType::Years => {
            NaiveDate::from_ymd_opt(date.year(), 12, 31).and_then(|day| day.and_hms_opt(23, 59, 59))
        }
        DateTimeIntervalType::Months => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .and_then(|last| last.and_hms_opt(23, 59, 59)),
        DateTimeIntervalType::Days => date.date().and_hms_opt(23, 59, 59),
        DateTimeIntervalType::Hours => date.date().and_hms_opt(date.hour(), 59, 59),
        DateTimeIntervalType::Minutes => date.date().and_hms_opt(date.hour(), date.minute(), 59),
        DateTimeIntervalType::Seconds => {
            date.date()
                .and_hms_milli_opt(date.hour(), date.minute(), date.second(), 999)
        }
    };
    end.unwrap_or(date)
}

/// Ordinal of the `unit` bucket containing `date`; two dates share a bucket
/// when their keys match.
#[must_use]
pub fn unit_key(date: NaiveDateTime, unit: DateTimeIntervalType) -> i64 {
    let year = i64::from(date.year());
    match unit {
        DateTimeIntervalType::Auto => 0,
        DateTimeIntervalType::Years => year,
        DateTimeIntervalType::Months => year * 12 + i64::from(date.month0()),
        DateTimeIntervalType::Days => i64::from(date.num_days_from_ce()),
        DateTimeIntervalType::Hours => date.and_utc().timestamp().div_euclid(3_600),
        DateTimeIntervalType::Minutes => date.and_utc().timestamp().div_euclid(60),
        DateTimeIntervalType::Seconds => date.and_utc().timestamp(),
        DateTimeIntervalType::Milliseconds => date.and_utc().timestamp_millis(),
    }
}

fn add_calendar_units(
    date: NaiveDateTime,
    amount: f64,
    months_per_unit: i64,
    days_per_unit: f64,
) -> Option<NaiveDateTime> {
    let whole = amount.floor();
    let fraction = amount - whole;
    let months = (whole as i64).checked_mul(months_per_unit)?;
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)?
    } else {
        date.checked_sub_months(magnitude)?
    };
    add_millis(shifted, fraction * days_per_unit * MILLIS_PER_DAY)
}

fn add_millis(date: NaiveDateTime, millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() || millis.abs() >= 9.0e15 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis.round() as i64)?;
    date.checked_add_signed(delta)
}

/// Bit set of working weekdays, Monday in bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingDays(u8);

impl WorkingDays {
    pub const NONE: Self = Self(0);
    pub const MONDAY: Self = Self(1 << 0);
    pub const TUESDAY: Self = Self(1 << 1);
    pub const WEDNESDAY: Self = Self(1 << 2);
    pub const THURSDAY: Self = Self(1 << 3);
    pub const FRIDAY: Self = Self(1 << 4);
    pub const SATURDAY: Self = Self(1 << 5);
    pub const SUNDAY: Self = Self(1 << 6);
    pub const WEEKDAYS: Self = Self(0b001_1111);
    pub const ALL: Self = Self(0b111_1111);

    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self::WEEKDAYS
    }
}

impl BitOr for WorkingDays {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Working-hours window for date-time axes.
///
/// `open_time`/`close_time` are hours since midnight (`9.5` is 09:30).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open_time: f64,
    pub close_time: f64,
    #[serde(default)]
    pub working_days: WorkingDays,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_time: 0.0,
            close_time: 24.0,
            working_days: WorkingDays::WEEKDAYS,
        }
    }
}

impl BusinessHours {
    #[must_use]
    pub fn new(open_time: f64, close_time: f64, working_days: WorkingDays) -> Self {
        Self {
            open_time,
            close_time,
            working_days,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.open_time.is_finite()
            || !self.close_time.is_finite()
            || self.open_time < 0.0
            || self.close_time > 24.0
            || self.open_time >= self.close_time
        {
            return Err(ChartError::InvalidData(
                "business hours must satisfy 0 <= open < close <= 24".to_owned(),
            ));
        }
        if self.working_days.is_empty() {
            return Err(ChartError::InvalidData(
                "business hours need at least one working day".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn is_working_day(self, date: NaiveDate) -> bool {
        self.working_days.contains(date.weekday())
    }

    /// Returns `true` when `time` falls on a working day inside `[open, close]`.
    #[must_use]
    pub fn is_open(self, time: NaiveDateTime) -> bool {
        let date = time.date();
        if !self.is_working_day(date) {
            return false;
        }
        match (self.open_on(date), self.close_on(date)) {
            (Some(open), Some(close)) => open <= time && time <= close,
            _ => false,
        }
    }

    #[must_use]
    pub fn open_on(self, date: NaiveDate) -> Option<NaiveDateTime> {
        at_hours(date, self.open_time)
    }

    #[must_use]
    pub fn close_on(self, date: NaiveDate) -> Option<NaiveDateTime> {
        at_hours(date, self.close_time)
    }

    /// Earliest open instant at or after `time`.
    #[must_use]
    pub fn clamp_start(self, time: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = time.date();
        if self.is_working_day(date) {
            let open = self.open_on(date)?;
            if time < open {
                return Some(open);
            }
            if time <= self.close_on(date)? {
                return Some(time);
            }
        }
        self.open_on(self.next_working_day(date)?)
    }

    /// Latest open instant at or before `time`.
    #[must_use]
    pub fn clamp_end(self, time: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = time.date();
        if self.is_working_day(date) {
            let close = self.close_on(date)?;
            if time > close {
                return Some(close);
            }
            if time >= self.open_on(date)? {
                return Some(time);
            }
        }
        self.close_on(self.previous_working_day(date)?)
    }

    fn next_working_day(self, date: NaiveDate) -> Option<NaiveDate> {
        let mut candidate = date;
        for _ in 0..7 {
            candidate = candidate.succ_opt()?;
            if self.is_working_day(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn previous_working_day(self, date: NaiveDate) -> Option<NaiveDate> {
        let mut candidate = date;
        for _ in 0..7 {
            candidate = candidate.pred_opt()?;
            if self.is_working_day(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

fn at_hours(date: NaiveDate, hours: f64) -> Option<NaiveDateTime> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    add_millis(midnight, hours * MILLIS_PER_HOUR)
}
