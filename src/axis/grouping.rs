use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::axis::config::AggregateFunction;
use crate::core::SeriesValueView;

/// Point indexes sharing one distinct bucket.
pub type PointIndexes = SmallVec<[usize; 4]>;

/// Grouping of one visible series onto the shared distinct X values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesGrouping {
    /// Bucket per point; one entry per bucket once aggregated.
    pub grouped_x_indexes: Vec<usize>,
    /// Bucket to the points (or the collapsed point) that map to it.
    pub distinct_value_indexes: BTreeMap<usize, PointIndexes>,
    /// Reduced Y sequences parallel to `grouped_x_indexes` when an aggregate
    /// function is configured.
    pub aggregated_y_values: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupingResult {
    /// Distinct X keys in first-seen order.
    pub distinct_x_values: Vec<String>,
    /// Parallel to the grouped series; `None` for hidden ones.
    pub series: Vec<Option<SeriesGrouping>>,
}

/// Groups the X values of series sharing a category axis.
///
/// Numeric X values are keyed by their text form. Returns `None` when any
/// visible series is of a kind that never groups (waterfall, error bar,
/// histogram, polar, radar).
#[must_use]
pub fn group_category_values(
    series: &[&SeriesValueView],
    aggregate: AggregateFunction,
) -> Option<GroupingResult> {
    if let Some(exempt) = series
        .iter()
        .find(|view| view.is_visible && view.kind.is_grouping_exempt())
    {
        trace!(kind = ?exempt.kind, "category grouping skipped");
        return None;
    }

    let mut distinct: IndexSet<String> = IndexSet::new();
    let mut groupings = Vec::with_capacity(series.len());
    for view in series {
        if !view.is_visible {
            groupings.push(None);
            continue;
        }
        let mut grouped_x_indexes = Vec::with_capacity(view.data_count());
        for index in 0..view.data_count() {
            let key = view.x_values.key_at(index).unwrap_or_default();
            grouped_x_indexes.push(distinct.insert_full(key).0);
        }

        let mut buckets: BTreeMap<usize, PointIndexes> = BTreeMap::new();
        for (point, bucket) in grouped_x_indexes.iter().enumerate() {
            buckets.entry(*bucket).or_default().push(point);
        }

        let grouping = if aggregate == AggregateFunction::None {
            SeriesGrouping {
                grouped_x_indexes,
                distinct_value_indexes: buckets,
                aggregated_y_values: None,
            }
        } else {
            aggregate_series(view, &buckets, aggregate)
        };
        groupings.push(Some(grouping));
    }

    trace!(
        distinct = distinct.len(),
        series = groupings.len(),
        "grouped category values"
    );
    Some(GroupingResult {
        distinct_x_values: distinct.into_iter().collect(),
        series: groupings,
    })
}

fn aggregate_series(
    view: &SeriesValueView,
    buckets: &BTreeMap<usize, PointIndexes>,
    function: AggregateFunction,
) -> SeriesGrouping {
    let aggregated_y_values = view
        .active_y_values()
        .iter()
        .map(|values| {
            buckets
                .values()
                .map(|points| {
                    reduce(
                        function,
                        points.iter().filter_map(|point| values.get(*point).copied()),
                    )
                })
                .collect()
        })
        .collect();

    let grouped_x_indexes: Vec<usize> = buckets.keys().copied().collect();
    let distinct_value_indexes = grouped_x_indexes
        .iter()
        .enumerate()
        .map(|(collapsed, bucket)| (*bucket, smallvec![collapsed]))
        .collect();
    SeriesGrouping {
        grouped_x_indexes,
        distinct_value_indexes,
        aggregated_y_values: Some(aggregated_y_values),
    }
}

/// Reduces one bucket. NaN samples are ignored except by `Count`; a bucket
/// without finite samples sums to zero and is NaN for the other reductions.
fn reduce(function: AggregateFunction, values: impl Iterator<Item = f64>) -> f64 {
    if function == AggregateFunction::Count {
        return values.count() as f64;
    }
    let (count, sum, min, max) = values.filter(|value| value.is_finite()).fold(
        (0_usize, 0.0, f64::INFINITY, f64::NEG_INFINITY),
        |(count, sum, min, max), value| (count + 1, sum + value, min.min(value), max.max(value)),
    );
    if count == 0 {
        return if function == AggregateFunction::Sum {
            0.0
        } else {
            f64::NAN
        };
    }
    match function {
        AggregateFunction::Average => sum / count as f64,
        AggregateFunction::Max => max,
        AggregateFunction::Min => min,
        AggregateFunction::Sum => sum,
        AggregateFunction::None | AggregateFunction::Count => f64::NAN,
    }
}
