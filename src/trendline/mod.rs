//! Trendline regression and curve sampling.
//!
//! A fit is a pure function of a [`TrendlineConfig`] and a
//! [`TrendlineSource`]; a failed fit yields no coefficients and no segments
//! rather than an error.

pub mod regression;
pub mod spline;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::primitives::finite_extent;
use crate::core::{
    ChartPoint, DateTimeIntervalType, DoubleRange, SeriesValueView, from_oa_date,
    increase_interval, to_oa_date,
};
use crate::error::{ChartError, ChartResult};

use self::regression::{LeastSquares, least_squares, polynomial_least_squares};
use self::spline::{bezier_control_points, natural_spline_second_derivatives};

pub const MIN_POLYNOMIAL_ORDER: usize = 2;
pub const MAX_POLYNOMIAL_ORDER: usize = 6;

/// Number of anchors sampled for exponential, power and logarithmic curves.
const CURVE_ANCHORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrendlineType {
    #[default]
    Linear,
    Exponential,
    Power,
    Logarithmic,
    Polynomial,
}

/// Host-settable trendline parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendlineConfig {
    #[serde(default)]
    pub kind: TrendlineType,
    #[serde(default = "default_polynomial_order")]
    pub polynomial_order: usize,
    /// Extension past the largest X, in axis units (calendar units on date-time axes).
    #[serde(default)]
    pub forward_forecast: f64,
    #[serde(default)]
    pub backward_forecast: f64,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: f64,
    #[serde(default)]
    pub stroke_dash_array: Vec<f64>,
}

fn default_polynomial_order() -> usize {
    MIN_POLYNOMIAL_ORDER
}

fn default_stroke_thickness() -> f64 {
    1.0
}

impl Default for TrendlineConfig {
    fn default() -> Self {
        Self::new(TrendlineType::Linear)
    }
}

/// What a configuration change requires from the next pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrendlineChange {
    Unchanged,
    /// Stroke only; the fit is kept.
    Visual,
    Refit,
}

impl TrendlineConfig {
    #[must_use]
    pub fn new(kind: TrendlineType) -> Self {
        Self {
            kind,
            polynomial_order: MIN_POLYNOMIAL_ORDER,
            forward_forecast: 0.0,
            backward_forecast: 0.0,
            stroke: None,
            stroke_thickness: 1.0,
            stroke_dash_array: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_polynomial_order(mut self, order: usize) -> Self {
        self.polynomial_order = order;
        self
    }

    #[must_use]
    pub fn with_forecast(mut self, backward: f64, forward: f64) -> Self {
        self.backward_forecast = backward;
        self.forward_forecast = forward;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Option<String>, thickness: f64) -> Self {
        self.stroke = stroke;
        self.stroke_thickness = thickness;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(MIN_POLYNOMIAL_ORDER..=MAX_POLYNOMIAL_ORDER).contains(&self.polynomial_order) {
            return Err(ChartError::InvalidData(format!(
                "polynomial order must be within {MIN_POLYNOMIAL_ORDER}..={MAX_POLYNOMIAL_ORDER}"
            )));
        }
        for (name, value) in [
            ("forward forecast", self.forward_forecast),
            ("backward forecast", self.backward_forecast),
            ("stroke thickness", self.stroke_thickness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self
            .stroke_dash_array
            .iter()
            .any(|dash| !dash.is_finite() || *dash < 0.0)
        {
            return Err(ChartError::InvalidData(
                "stroke dash entries must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Classifies the difference between `self` and `previous`.
    #[must_use]
    pub fn change_from(&self, previous: &Self) -> TrendlineChange {
        if self.kind != previous.kind
            || self.polynomial_order != previous.polynomial_order
            || self.forward_forecast != previous.forward_forecast
            || self.backward_forecast != previous.backward_forecast
        {
            TrendlineChange::Refit
        } else if self != previous {
            TrendlineChange::Visual
        } else {
            TrendlineChange::Unchanged
        }
    }
}

/// How trendline X positions and forecasts are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrendlineAxis {
    #[default]
    Numeric,
    /// OADate positions; forecasts count calendar units of the axis' interval type.
    DateTime(DateTimeIntervalType),
    /// Point-index positions; forecasts are fractional index offsets.
    Category,
}

/// Paired samples a trendline is fitted to, with missing points removed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendlineSource {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub axis: TrendlineAxis,
}

impl TrendlineSource {
    /// Pairs `x_values` with `y_values`, dropping pairs with a non-finite member.
    #[must_use]
    pub fn new(x_values: &[f64], y_values: &[f64], axis: TrendlineAxis) -> Self {
        let (x_values, y_values) = x_values
            .iter()
            .zip(y_values)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (*x, *y))
            .unzip();
        Self {
            x_values,
            y_values,
            axis,
        }
    }

    /// Samples of `series`: its trend Y sequence against numeric X values, or
    /// against point indexes for category axes and string X values.
    #[must_use]
    pub fn from_series(series: &SeriesValueView, axis: TrendlineAxis) -> Self {
        let y_values = series.trend_y_values().unwrap_or(&[]);
        match (axis, series.x_values.numeric()) {
            (TrendlineAxis::Category, _) | (_, None) => {
                let indexes: Vec<f64> =
                    (0..series.data_count()).map(|index| index as f64).collect();
                Self::new(&indexes, y_values, axis)
            }
            (_, Some(x_values)) => Self::new(x_values, y_values, axis),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }
}

/// Regression result in the model's own parameterization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrendlineCoefficients {
    /// `intercept` is already exponentiated for exponential and power models.
    LeastSquares { slope: f64, intercept: f64 },
    /// Ascending powers.
    Polynomial(Vec<f64>),
}

/// One piece of the sampled trendline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrendlineSegment {
    Line {
        start: ChartPoint,
        end: ChartPoint,
    },
    Bezier {
        start: ChartPoint,
        first_control: ChartPoint,
        second_control: ChartPoint,
        end: ChartPoint,
    },
}

/// Output of one trendline pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendlineFit {
    pub kind: TrendlineType,
    pub coefficients: Option<TrendlineCoefficients>,
    /// X extent of the fitted samples.
    pub data_range: DoubleRange,
    /// `data_range` extended by the forecasts.
    pub domain: DoubleRange,
    pub segments: Vec<TrendlineSegment>,
}

impl TrendlineFit {
    fn empty(kind: TrendlineType, data_range: DoubleRange) -> Self {
        Self {
            kind,
            coefficients: None,
            data_range,
            domain: DoubleRange::EMPTY,
            segments: Vec::new(),
        }
    }

    /// Model value at `x`; NaN without coefficients or outside the model's domain.
    #[must_use]
    pub fn evaluate(&self, x: f64, axis: TrendlineAxis) -> f64 {
        match &self.coefficients {
            Some(coefficients) => evaluate(self.kind, coefficients, x, axis),
            None => f64::NAN,
        }
    }

    /// Re-samples the curve for new forecast endpoints, keeping the coefficients.
    pub fn refresh_forecast(&mut self, config: &TrendlineConfig, axis: TrendlineAxis) {
        let Some(coefficients) = &self.coefficients else {
            return;
        };
        let (domain, segments) =
            sample_segments(config, self.kind, coefficients, self.data_range, axis);
        trace!(segments = segments.len(), "refreshed trendline forecast");
        self.domain = domain;
        self.segments = segments;
    }
}

/// Fits `config.kind` to `source` and samples the curve.
#[must_use]
pub fn fit_trendline(config: &TrendlineConfig, source: &TrendlineSource) -> TrendlineFit {
    let data_range = finite_extent(source.x_values.iter().copied());
    let Some(coefficients) = fit_coefficients(config, source) else {
        return TrendlineFit::empty(config.kind, data_range);
    };
    let (domain, segments) =
        sample_segments(config, config.kind, &coefficients, data_range, source.axis);
    debug!(
        kind = ?config.kind,
        points = source.len(),
        segments = segments.len(),
        "fitted trendline"
    );
    TrendlineFit {
        kind: config.kind,
        coefficients: Some(coefficients),
        data_range,
        domain,
        segments,
    }
}

fn fit_coefficients(
    config: &TrendlineConfig,
    source: &TrendlineSource,
) -> Option<TrendlineCoefficients> {
    if source.is_empty() {
        return None;
    }
    if config.kind == TrendlineType::Polynomial {
        let order = config.polynomial_order;
        if order >= source.len() {
            warn!(order, points = source.len(), "polynomial order needs more points");
            return None;
        }
        let x_values: Vec<f64> = source
            .x_values
            .iter()
            .map(|x| polynomial_x(*x, source.axis))
            .collect();
        let coefficients = polynomial_least_squares(&x_values, &source.y_values, order);
        if coefficients.is_none() {
            warn!(order, "singular polynomial trendline system");
        }
        return coefficients.map(TrendlineCoefficients::Polynomial);
    }

    let transform_x = matches!(config.kind, TrendlineType::Power | TrendlineType::Logarithmic);
    let transform_y = matches!(config.kind, TrendlineType::Exponential | TrendlineType::Power);
    let mut x_values = Vec::with_capacity(source.len());
    let mut y_values = Vec::with_capacity(source.len());
    for (x, y) in source.x_values.iter().zip(&source.y_values) {
        let x = if transform_x { x.ln() } else { *x };
        let y = if transform_y { y.ln() } else { *y };
        if x.is_finite() && y.is_finite() {
            x_values.push(x);
            y_values.push(y);
        }
    }
    let skipped = source.len() - x_values.len();
    if skipped > 0 {
        warn!(kind = ?config.kind, skipped, "skipped samples outside the model's log domain");
    }

    let Some(LeastSquares { slope, intercept }) = least_squares(&x_values, &y_values) else {
        warn!(kind = ?config.kind, points = x_values.len(), "degenerate trendline regression");
        return None;
    };
    let intercept = if transform_y { intercept.exp() } else { intercept };
    Some(TrendlineCoefficients::LeastSquares { slope, intercept })
}

/// Polynomial fits on category axes count slots from one.
fn polynomial_x(x: f64, axis: TrendlineAxis) -> f64 {
    if axis == TrendlineAxis::Category {
        x + 1.0
    } else {
        x
    }
}

fn evaluate(
    kind: TrendlineType,
    coefficients: &TrendlineCoefficients,
    x: f64,
    axis: TrendlineAxis,
) -> f64 {
    match coefficients {
        TrendlineCoefficients::Polynomial(terms) => {
            let x = polynomial_x(x, axis);
            terms.iter().rev().fold(0.0, |acc, term| acc * x + term)
        }
        TrendlineCoefficients::LeastSquares { slope, intercept } => match kind {
            TrendlineType::Exponential => intercept * (slope * x).exp(),
            TrendlineType::Power => intercept * x.powf(*slope),
            TrendlineType::Logarithmic => slope * x.ln() + intercept,
            TrendlineType::Linear | TrendlineType::Polynomial => slope * x + intercept,
        },
    }
}

/// Moves `x` by `amount` forecast units along `axis`.
fn forecast_position(x: f64, amount: f64, axis: TrendlineAxis) -> f64 {
    match axis {
        TrendlineAxis::Numeric | TrendlineAxis::Category => x + amount,
        TrendlineAxis::DateTime(unit) => {
            let unit = match unit {
                DateTimeIntervalType::Auto => DateTimeIntervalType::Days,
                other => other,
            };
            from_oa_date(x)
                .and_then(|date| increase_interval(date, amount, unit))
                .map_or(x + amount, to_oa_date)
        }
    }
}

fn sample_segments(
    config: &TrendlineConfig,
    kind: TrendlineType,
    coefficients: &TrendlineCoefficients,
    data_range: DoubleRange,
    axis: TrendlineAxis,
) -> (DoubleRange, Vec<TrendlineSegment>) {
    if data_range.is_empty() {
        return (DoubleRange::EMPTY, Vec::new());
    }
    let domain = DoubleRange::new(
        forecast_position(data_range.start, -config.backward_forecast, axis),
        forecast_position(data_range.end, config.forward_forecast, axis),
    );
    if !domain.is_usable() {
        return (domain, Vec::new());
    }
    let point_at = |x: f64| ChartPoint::new(x, evaluate(kind, coefficients, x, axis));

    if kind == TrendlineType::Linear {
        let (start, end) = (point_at(domain.start), point_at(domain.end));
        if !start.y.is_finite() || !end.y.is_finite() {
            return (domain, Vec::new());
        }
        return (domain, vec![TrendlineSegment::Line { start, end }]);
    }

    let anchor_count = if kind == TrendlineType::Polynomial {
        config.polynomial_order + 1
    } else {
        CURVE_ANCHORS
    };
    let step = domain.delta() / (anchor_count - 1) as f64;
    let anchors: Vec<ChartPoint> = (0..anchor_count)
        .map(|index| {
            if index + 1 == anchor_count {
                domain.end
            } else {
                domain.start + step * index as f64
            }
        })
        .map(point_at)
        .filter(|point| point.y.is_finite())
        .collect();
    (domain, spline_segments(&anchors))
}

/// Joins `anchors` with natural-spline Bezier pieces.
fn spline_segments(anchors: &[ChartPoint]) -> Vec<TrendlineSegment> {
    if anchors.len() < 2 {
        return Vec::new();
    }
    let second = natural_spline_second_derivatives(anchors);
    anchors
        .windows(2)
        .zip(second.windows(2))
        .map(|(pair, derivatives)| {
            let (first_control, second_control) =
                bezier_control_points(pair[0], pair[1], derivatives[0], derivatives[1]);
            TrendlineSegment::Bezier {
                start: pair[0],
                first_control,
                second_control,
                end: pair[1],
            }
        })
        .collect()
}
