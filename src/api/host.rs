use crate::core::Size;

use super::AxisId;

/// Callbacks the core makes into the UI host.
pub trait ChartHost {
    /// Layout size available to `axis`, used to derive its desired interval count.
    fn available_size(&self, axis: AxisId) -> Size;

    /// Asks the host to run another layout pass. Fire-and-forget; the host
    /// decides when to call back into [`super::ChartContext::recompute`].
    fn schedule_redraw(&mut self);
}

/// Headless host used by tests and batch usage.
///
/// Every axis gets the same size; redraw requests are only counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullHost {
    pub size: Size,
    pub redraw_requests: usize,
}

impl NullHost {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            redraw_requests: 0,
        }
    }
}

impl Default for NullHost {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl ChartHost for NullHost {
    fn available_size(&self, _axis: AxisId) -> Size {
        self.size
    }

    fn schedule_redraw(&mut self) {
        self.redraw_requests += 1;
    }
}
