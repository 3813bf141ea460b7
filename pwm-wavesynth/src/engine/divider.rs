/// Down-sampler gating control-rate work.
///
/// Counts ticks down from `period`; [`tick`](Self::tick) returns `true` on
/// every `period`-th call and reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDivider {
    period: u16,
    count: u16,
}

impl ControlDivider {
    /// A divider firing once every `period` ticks. `period` must be non-zero.
    pub const fn new(period: u16) -> Self {
        ControlDivider { period, count: period }
    }

    /// Advance one tick. Returns `true` when the gate opens.
    #[inline(always)]
    pub fn tick(&mut self) -> bool {
        self.count -= 1;
        let fire = self.count == 0;
        if fire {
            self.count = self.period;
        }
        fire
    }

    pub fn period(&self) -> u16 {
        self.period
    }
}
