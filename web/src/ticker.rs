use gloo::timers::callback::Interval;

/// Fixed-period game clock. At most one interval is ever alive.
#[derive(Debug, Default)]
pub(crate) struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    /// Cancels any previous interval before scheduling the new one.
    pub(crate) fn start<F>(&mut self, period_ms: u32, on_tick: F)
    where
        F: FnMut() + 'static,
    {
        if self.stop() {
            log::debug!("replaced a running ticker");
        }
        log::debug!("ticking every {} ms", period_ms);
        self.interval = Some(Interval::new(period_ms, on_tick));
    }

    /// Returns whether an interval was actually cancelled.
    pub(crate) fn stop(&mut self) -> bool {
        self.interval.take().map(Interval::cancel).is_some()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}
