use tracing::debug;

use crate::axis::{AxisConfiguration, AxisLayout, GroupingResult};
use crate::error::{ChartError, ChartResult};

use super::{AxisEntry, AxisId, ChartContext, ChartHost};

impl<H: ChartHost> ChartContext<H> {
    /// Registers an axis. The configuration is validated up front.
    pub fn add_axis(&mut self, config: AxisConfiguration) -> ChartResult<AxisId> {
        config.validate()?;
        let id = AxisId::new(self.allocate_id());
        debug!(axis = id.raw(), kind = config.kind.name(), "added axis");
        self.axes.insert(
            id,
            AxisEntry {
                config,
                layout: None,
                grouping: None,
            },
        );
        self.invalidate();
        Ok(id)
    }

    /// Replaces the configuration of `axis`. The previous layout stays
    /// readable until the next pass.
    pub fn set_axis_config(&mut self, axis: AxisId, config: AxisConfiguration) -> ChartResult<()> {
        config.validate()?;
        let entry = self.axis_entry_mut(axis)?;
        if entry.config == config {
            return Ok(());
        }
        entry.config = config;
        debug!(axis = axis.raw(), "updated axis configuration");
        self.invalidate();
        Ok(())
    }

    /// Sets zoom factor and position, leaving the rest of the configuration.
    pub fn set_zoom(&mut self, axis: AxisId, factor: f64, position: f64) -> ChartResult<()> {
        let config = self.axis_config(axis)?.clone().with_zoom(factor, position);
        self.set_axis_config(axis, config)
    }

    pub fn axis_config(&self, axis: AxisId) -> ChartResult<&AxisConfiguration> {
        self.axes
            .get(&axis)
            .map(|entry| &entry.config)
            .ok_or(ChartError::UnknownAxis(axis.raw()))
    }

    /// Layout from the most recent pass; `None` before the first one.
    pub fn axis_layout(&self, axis: AxisId) -> ChartResult<Option<&AxisLayout>> {
        self.axes
            .get(&axis)
            .map(|entry| entry.layout.as_ref())
            .ok_or(ChartError::UnknownAxis(axis.raw()))
    }

    /// Category grouping computed for `axis` in the most recent pass.
    pub fn grouping(&self, axis: AxisId) -> ChartResult<Option<&GroupingResult>> {
        self.axes
            .get(&axis)
            .map(|entry| entry.grouping.as_ref())
            .ok_or(ChartError::UnknownAxis(axis.raw()))
    }

    pub fn axis_ids(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.axes.keys().copied()
    }

    fn axis_entry_mut(&mut self, axis: AxisId) -> ChartResult<&mut AxisEntry> {
        self.axes
            .get_mut(&axis)
            .ok_or(ChartError::UnknownAxis(axis.raw()))
    }
}
