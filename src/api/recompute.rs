use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::axis::grouping::SeriesGrouping;
use crate::axis::{
    AxisInput, AxisKind, AxisLayout, AxisRole, GroupingResult, compute_axis_layout,
    group_category_values,
};
use crate::core::{DateTimeIntervalType, SeriesValueView, XValues};
use crate::error::ChartResult;
use crate::trendline::{TrendlineAxis, TrendlineFit, TrendlineSource, fit_trendline};

use super::{
    AxisEntry, AxisId, ChartContext, ChartHost, FittedAxisState, SeriesEntry, SeriesId,
};

/// Category grouping of one pass.
#[derive(Default)]
struct CategoryGroups {
    by_axis: IndexMap<AxisId, GroupingResult>,
    /// Series re-expressed on grouped slots (and aggregated Y values).
    views: HashMap<SeriesId, SeriesValueView>,
}

impl<H: ChartHost> ChartContext<H> {
    /// Runs one synchronous pass: category grouping, axis ranges and labels,
    /// then trendlines.
    ///
    /// Every output is replaced wholesale. Calling again before the previous
    /// outputs were consumed is safe. A pass that changes any axis' actual
    /// interval asks the host for another redraw.
    pub fn recompute(&mut self) -> ChartResult<()> {
        let CategoryGroups {
            mut by_axis,
            views,
        } = group_categories(&self.axes, &self.series);

        let mut layouts: Vec<AxisLayout> = Vec::with_capacity(self.axes.len());
        for (axis_id, axis) in &self.axes {
            let role = axis_role(&self.series, *axis_id);
            let bound: Vec<&SeriesValueView> = self
                .series
                .iter()
                .filter_map(|(series_id, entry)| match role {
                    AxisRole::X => (entry.x_axis == *axis_id).then_some(&entry.view),
                    AxisRole::Y => (entry.y_axis == *axis_id)
                        .then(|| effective_view(&views, *series_id, entry)),
                })
                .collect();
            let input = AxisInput::new(role, bound, self.host.available_size(*axis_id))
                .with_grouping(by_axis.get(axis_id));
            layouts.push(compute_axis_layout(&axis.config, &input)?);
        }

        let mut interval_changes = 0_usize;
        for ((axis_id, axis), layout) in self.axes.iter_mut().zip(layouts) {
            if axis
                .layout
                .as_ref()
                .is_some_and(|previous| previous.actual_interval != layout.actual_interval)
            {
                interval_changes += 1;
            }
            axis.layout = Some(layout);
            axis.grouping = by_axis.swap_remove(axis_id);
        }

        let (mut refits, mut refreshed) = (0_usize, 0_usize);
        for (trendline_id, entry) in &mut self.trendlines {
            let Some(series) = self.series.get(&entry.series) else {
                warn!(trendline = trendline_id.raw(), "trendline series is missing");
                continue;
            };
            let Some(axis) = self.axes.get(&series.x_axis) else {
                continue;
            };
            let mode = trendline_axis(axis);
            let axis_state = axis.layout.as_ref().map(|layout| FittedAxisState {
                actual_range: layout.actual_range,
                interval_type: layout.actual_interval_type,
            });

            let series_changed = entry.fitted_revision != Some(series.revision);
            let axis_changed = entry.fitted_axis != axis_state;
            if entry.needs_refit || series_changed || (axis_changed && !is_auto_date_time(axis)) {
                let view = effective_view(&views, entry.series, series);
                entry.fit = if view.is_visible {
                    let grouped = views.contains_key(&entry.series);
                    fit_trendline(&entry.config, &trendline_source(view, mode, grouped))
                } else {
                    TrendlineFit {
                        kind: entry.config.kind,
                        ..TrendlineFit::default()
                    }
                };
                refits += 1;
            } else if axis_changed {
                entry.fit.refresh_forecast(&entry.config, mode);
                refreshed += 1;
            }
            entry.needs_refit = false;
            entry.fitted_revision = Some(series.revision);
            entry.fitted_axis = axis_state;
        }

        self.dirty = false;
        self.pass_count += 1;
        debug!(
            pass = self.pass_count,
            axes = self.axes.len(),
            trendlines = self.trendlines.len(),
            interval_changes,
            "recomputed chart context"
        );
        trace!(refits, refreshed, "trendline pass");
        if interval_changes > 0 {
            self.host.schedule_redraw();
        }
        Ok(())
    }
}

/// Groups non-indexed category X axes over the series bound to them.
fn group_categories(
    axes: &IndexMap<AxisId, AxisEntry>,
    series: &IndexMap<SeriesId, SeriesEntry>,
) -> CategoryGroups {
    let mut groups = CategoryGroups::default();
    for (axis_id, axis) in axes {
        let AxisKind::Category(settings) = &axis.config.kind else {
            continue;
        };
        if settings.is_indexed {
            continue;
        }
        let (ids, bound): (Vec<SeriesId>, Vec<&SeriesValueView>) = series
            .iter()
            .filter(|(_, entry)| entry.x_axis == *axis_id)
            .map(|(id, entry)| (*id, &entry.view))
            .unzip();
        let Some(result) = group_category_values(&bound, settings.aggregate_function) else {
            continue;
        };
        for ((id, view), grouping) in ids.iter().zip(&bound).zip(&result.series) {
            if let Some(grouping) = grouping {
                groups.views.insert(*id, grouped_view(view, grouping));
            }
        }
        groups.by_axis.insert(*axis_id, result);
    }
    groups
}

/// `view` positioned on its distinct slots, with aggregated Y values when present.
fn grouped_view(view: &SeriesValueView, grouping: &SeriesGrouping) -> SeriesValueView {
    let x_values = grouping
        .grouped_x_indexes
        .iter()
        .map(|slot| *slot as f64)
        .collect();
    SeriesValueView {
        kind: view.kind,
        x_values: XValues::Double(x_values),
        y_values: grouping
            .aggregated_y_values
            .clone()
            .unwrap_or_else(|| view.y_values.clone()),
        is_transposed: view.is_transposed,
        is_visible: view.is_visible,
        is_single_value: view.is_single_value,
    }
}

fn effective_view<'a>(
    views: &'a HashMap<SeriesId, SeriesValueView>,
    id: SeriesId,
    entry: &'a SeriesEntry,
) -> &'a SeriesValueView {
    views.get(&id).unwrap_or(&entry.view)
}

/// An axis measures Y when some series uses it only as its value axis.
fn axis_role(series: &IndexMap<SeriesId, SeriesEntry>, axis: AxisId) -> AxisRole {
    if series
        .values()
        .any(|entry| entry.y_axis == axis && entry.x_axis != axis)
    {
        AxisRole::Y
    } else {
        AxisRole::X
    }
}

fn trendline_axis(axis: &AxisEntry) -> TrendlineAxis {
    match &axis.config.kind {
        AxisKind::DateTime(_) => TrendlineAxis::DateTime(
            axis.layout
                .as_ref()
                .and_then(|layout| layout.actual_interval_type)
                .unwrap_or(DateTimeIntervalType::Days),
        ),
        AxisKind::Category(_) => TrendlineAxis::Category,
        _ => TrendlineAxis::Numeric,
    }
}

fn is_auto_date_time(axis: &AxisEntry) -> bool {
    matches!(
        &axis.config.kind,
        AxisKind::DateTime(settings) if settings.interval_type == DateTimeIntervalType::Auto
    )
}

/// Grouped category series regress against their slot positions.
fn trendline_source(
    view: &SeriesValueView,
    mode: TrendlineAxis,
    grouped: bool,
) -> TrendlineSource {
    match (mode, grouped, view.x_values.numeric()) {
        (TrendlineAxis::Category, true, Some(slots)) => {
            TrendlineSource::new(slots, view.trend_y_values().unwrap_or(&[]), mode)
        }
        _ => TrendlineSource::from_series(view, mode),
    }
}
