use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid time span `{input}`: {reason}")]
    InvalidTimeSpan { input: String, reason: &'static str },

    #[error("invalid label format `{0}`")]
    InvalidLabelFormat(String),

    #[error("unknown axis id: {0}")]
    UnknownAxis(usize),

    #[error("unknown series id: {0}")]
    UnknownSeries(usize),

    #[error("unknown trendline id: {0}")]
    UnknownTrendline(usize),
}
