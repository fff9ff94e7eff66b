#![allow(dead_code)]
//! Time-driven throttle and debounce.
//!
//! The host loop's pacing utilities are reimplemented here against engine
//! time instead of wall clocks, so rate limits stay deterministic under test.

/// Leading-edge rate limiter: the first call passes, later calls are
/// swallowed until `window_ms` has elapsed.
#[derive(Clone, Debug)]
pub struct Throttle {
    window_ms: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    pub fn allow(&mut self, now: f64) -> bool {
        match self.last {
            Some(t) if now - t < self.window_ms => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Trailing-edge debounce: every push moves the deadline out; `settle`
/// yields the latest value once the deadline has passed.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    window_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debounce<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn push(&mut self, now: f64, value: T) {
        self.pending = Some((now + self.window_ms, value));
    }

    pub fn settle(&mut self, now: f64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}
