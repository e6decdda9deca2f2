use tracing::debug;

use crate::core::SeriesValueView;
use crate::error::{ChartError, ChartResult};

use super::{AxisId, ChartContext, ChartHost, SeriesEntry, SeriesId};

impl<H: ChartHost> ChartContext<H> {
    /// Binds a series to an X and a Y axis.
    pub fn add_series(
        &mut self,
        view: SeriesValueView,
        x_axis: AxisId,
        y_axis: AxisId,
    ) -> ChartResult<SeriesId> {
        view.validate()?;
        self.axis_config(x_axis)?;
        self.axis_config(y_axis)?;
        let id = SeriesId::new(self.allocate_id());
        debug!(
            series = id.raw(),
            kind = ?view.kind,
            points = view.data_count(),
            "added series"
        );
        self.series.insert(
            id,
            SeriesEntry {
                view,
                x_axis,
                y_axis,
                revision: 0,
            },
        );
        self.invalidate();
        Ok(id)
    }

    /// Replaces the data of `series`; its trendlines are refitted next pass.
    pub fn set_series_data(&mut self, series: SeriesId, view: SeriesValueView) -> ChartResult<()> {
        view.validate()?;
        let entry = self.series_entry_mut(series)?;
        entry.view = view;
        entry.revision += 1;
        debug!(
            series = series.raw(),
            points = entry.view.data_count(),
            "replaced series data"
        );
        self.invalidate();
        Ok(())
    }

    pub fn set_series_visible(&mut self, series: SeriesId, is_visible: bool) -> ChartResult<()> {
        let entry = self.series_entry_mut(series)?;
        if entry.view.is_visible == is_visible {
            return Ok(());
        }
        entry.view.is_visible = is_visible;
        entry.revision += 1;
        self.invalidate();
        Ok(())
    }

    /// Removes `series` together with the trendlines attached to it.
    pub fn remove_series(&mut self, series: SeriesId) -> ChartResult<()> {
        if self.series.shift_remove(&series).is_none() {
            return Err(ChartError::UnknownSeries(series.raw()));
        }
        let before = self.trendlines.len();
        self.trendlines.retain(|_, entry| entry.series != series);
        debug!(
            series = series.raw(),
            trendlines = before - self.trendlines.len(),
            "removed series"
        );
        self.invalidate();
        Ok(())
    }

    pub fn series_view(&self, series: SeriesId) -> ChartResult<&SeriesValueView> {
        self.series
            .get(&series)
            .map(|entry| &entry.view)
            .ok_or(ChartError::UnknownSeries(series.raw()))
    }

    pub fn series_ids(&self) -> impl Iterator<Item = SeriesId> + '_ {
        self.series.keys().copied()
    }

    fn series_entry_mut(&mut self, series: SeriesId) -> ChartResult<&mut SeriesEntry> {
        self.series
            .get_mut(&series)
            .ok_or(ChartError::UnknownSeries(series.raw()))
    }
}
