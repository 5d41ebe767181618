#[cfg(target_arch = "wasm32")]
use js_sys;

/// A point in wall-clock time: `Date.now()` in the browser, `Instant` natively
#[derive(Clone, Copy)]
struct Stamp {
    #[cfg(target_arch = "wasm32")]
    ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    at: std::time::Instant,
}

impl Stamp {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Stamp { ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Stamp { at: std::time::Instant::now() }
        }
    }

    fn ms_since(&self, earlier: &Stamp) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            (self.ms - earlier.ms).max(0.0)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.at.duration_since(earlier.at).as_secs_f64() * 1000.0
        }
    }
}

/// Stopwatch for the stages of one step. Each `lap` returns the time since
/// the previous lap, `total_ms` the time since start.
pub(crate) struct PerfTimer {
    origin: Stamp,
    last: Stamp,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        let now = Stamp::now();
        PerfTimer { origin: now, last: now }
    }

    /// Only runs when perf collection is on
    pub(crate) fn start_if(enabled: bool) -> Option<Self> {
        enabled.then(Self::start)
    }

    pub(crate) fn lap(&mut self) -> f64 {
        let now = Stamp::now();
        let ms = now.ms_since(&self.last);
        self.last = now;
        ms
    }

    pub(crate) fn total_ms(&self) -> f64 {
        Stamp::now().ms_since(&self.origin)
    }
}
