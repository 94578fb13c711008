//! Debounced release of the editing emphasis.
//!
//! Every slider edit re-arms the timer, so a continuous drag keeps the arrow
//! emphasized and the focus is dropped only once input has been quiet for
//! `delay` seconds.

#[derive(Debug, Clone, PartialEq)]
pub struct FocusRelease {
    delay: f64,
    deadline: Option<f64>,
}

impl FocusRelease {
    pub fn new(delay_secs: f64) -> Self {
        Self { delay: delay_secs.max(0.0), deadline: None }
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Schedules a release `delay` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: f64) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Seconds left before the pending release fires.
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.deadline.map(|d| (d - now).max(0.0))
    }

    /// Returns `true` exactly once per arming, on the first poll at or past
    /// the deadline.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
