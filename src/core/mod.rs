pub mod date_time;
pub mod primitives;
pub mod range_math;
pub mod series;
pub mod time_span;
pub mod types;

pub use date_time::{
    BusinessHours, DateTimeIntervalType, WorkingDays, align_range_start, end_of_unit,
    increase_interval,
};
pub use primitives::{from_oa_date, to_oa_date};
pub use range_math::{calculate_nice_interval, desired_intervals_count, log_transform};
pub use series::{SeriesKind, SeriesValueView, XValueType, XValues};
pub use time_span::{format_time_span, parse_time_span};
pub use types::{ChartPoint, DoubleRange, Orientation, Size};
