use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::trendline::{TrendlineChange, TrendlineConfig, TrendlineFit};

use super::{ChartContext, ChartHost, SeriesId, TrendlineEntry, TrendlineId};

impl<H: ChartHost> ChartContext<H> {
    /// Attaches a trendline to `series`. It is fitted on the next pass.
    pub fn add_trendline(
        &mut self,
        series: SeriesId,
        config: TrendlineConfig,
    ) -> ChartResult<TrendlineId> {
        config.validate()?;
        self.series_view(series)?;
        let id = TrendlineId::new(self.allocate_id());
        debug!(trendline = id.raw(), series = series.raw(), kind = ?config.kind, "added trendline");
        self.trendlines.insert(
            id,
            TrendlineEntry {
                series,
                fit: TrendlineFit {
                    kind: config.kind,
                    ..TrendlineFit::default()
                },
                config,
                needs_refit: true,
                fitted_revision: None,
                fitted_axis: None,
                visual_revision: 0,
            },
        );
        self.invalidate();
        Ok(id)
    }

    /// Updates a trendline. Stroke-only changes keep the fit and bump the
    /// visual revision; anything else schedules a refit.
    pub fn set_trendline_config(
        &mut self,
        trendline: TrendlineId,
        config: TrendlineConfig,
    ) -> ChartResult<TrendlineChange> {
        config.validate()?;
        let entry = self
            .trendlines
            .get_mut(&trendline)
            .ok_or(ChartError::UnknownTrendline(trendline.raw()))?;
        let change = config.change_from(&entry.config);
        match change {
            TrendlineChange::Unchanged => return Ok(change),
            TrendlineChange::Visual => entry.visual_revision += 1,
            TrendlineChange::Refit => entry.needs_refit = true,
        }
        entry.config = config;
        debug!(trendline = trendline.raw(), ?change, "updated trendline configuration");
        self.invalidate();
        Ok(change)
    }

    pub fn remove_trendline(&mut self, trendline: TrendlineId) -> ChartResult<()> {
        if self.trendlines.shift_remove(&trendline).is_none() {
            return Err(ChartError::UnknownTrendline(trendline.raw()));
        }
        self.invalidate();
        Ok(())
    }

    pub fn trendline_config(&self, trendline: TrendlineId) -> ChartResult<&TrendlineConfig> {
        self.trendlines
            .get(&trendline)
            .map(|entry| &entry.config)
            .ok_or(ChartError::UnknownTrendline(trendline.raw()))
    }

    /// Fit from the most recent pass. Empty until the first pass.
    pub fn trendline_fit(&self, trendline: TrendlineId) -> ChartResult<&TrendlineFit> {
        self.trendlines
            .get(&trendline)
            .map(|entry| &entry.fit)
            .ok_or(ChartError::UnknownTrendline(trendline.raw()))
    }

    /// Counter of stroke-only updates; hosts restyle without re-reading segments.
    pub fn trendline_visual_revision(&self, trendline: TrendlineId) -> ChartResult<u64> {
        self.trendlines
            .get(&trendline)
            .map(|entry| entry.visual_revision)
            .ok_or(ChartError::UnknownTrendline(trendline.raw()))
    }

    pub fn trendline_ids(&self) -> impl Iterator<Item = TrendlineId> + '_ {
        self.trendlines.keys().copied()
    }
}
