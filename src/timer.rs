use std::time::Instant;

use crate::config::Mode;

/// Monotonic stopwatch that is inert in traced mode
#[derive(Debug)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn start(mode: Mode) -> Self {
        let started = match mode {
            Mode::Timed => Some(Instant::now()),
            Mode::Traced => None,
        };
        Stopwatch { started }
    }

    /// Elapsed nanoseconds, `None` when not timing
    pub fn stop(self) -> Option<u64> {
        self.started
            .map(|t0| u64::try_from(t0.elapsed().as_nanos()).unwrap_or(u64::MAX))
    }
}
