use serde::{Deserialize, Serialize};

use crate::axis::AxisLayout;
use crate::error::{ChartError, ChartResult};
use crate::trendline::{TrendlineCoefficients, TrendlineSegment, TrendlineType};

use super::{AxisId, ChartContext, ChartHost, SeriesId, TrendlineId};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub pass_count: u64,
    pub axes: Vec<AxisSnapshot>,
    pub trendlines: Vec<TrendlineSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub id: AxisId,
    pub kind: String,
    /// `None` until the first pass.
    pub layout: Option<AxisLayout>,
    pub distinct_x_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendlineSnapshot {
    pub id: TrendlineId,
    pub series: SeriesId,
    pub kind: TrendlineType,
    pub coefficients: Option<TrendlineCoefficients>,
    pub segments: Vec<TrendlineSegment>,
    pub visual_revision: u64,
}

impl<H: ChartHost> ChartContext<H> {
    /// Builds a deterministic snapshot of the outputs of the last pass.
    #[must_use]
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            pass_count: self.pass_count,
            axes: self
                .axes
                .iter()
                .map(|(id, entry)| AxisSnapshot {
                    id: *id,
                    kind: entry.config.kind.name().to_owned(),
                    layout: entry.layout.clone(),
                    distinct_x_values: entry
                        .grouping
                        .as_ref()
                        .map(|grouping| grouping.distinct_x_values.clone()),
                })
                .collect(),
            trendlines: self
                .trendlines
                .iter()
                .map(|(id, entry)| TrendlineSnapshot {
                    id: *id,
                    series: entry.series,
                    kind: entry.fit.kind,
                    coefficients: entry.fit.coefficients.clone(),
                    segments: entry.fit.segments.clone(),
                    visual_revision: entry.visual_revision,
                })
                .collect(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
