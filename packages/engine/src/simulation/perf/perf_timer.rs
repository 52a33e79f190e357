/// Wall-clock stopwatch: `Date.now()` in the browser, `Instant` natively.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    // Browser: Date.now() in ms
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    // Native tests and benches
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        PerfTimer {
            #[cfg(target_arch = "wasm32")]
            start_ms: js_sys::Date::now(),
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since `start`
    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_non_negative_and_grows() {
        let timer = PerfTimer::start();
        let first = timer.elapsed_ms();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = timer.elapsed_ms();
        assert!(first >= 0.0);
        assert!(second >= first);
        assert!(second >= 1.0, "{}", second);
    }
}
