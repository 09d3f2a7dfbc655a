//! Periodic auto-save timer.
//!
//! The editor has no clock of its own; the host calls [`AutoSave::due`] from
//! its timer callback with the current time in milliseconds.

#[derive(Debug, Clone)]
pub struct AutoSave {
    interval_ms: u64,
    /// Time of the last save (or of arming). `None` until the first tick.
    last_ms: Option<u64>,
    /// Latest host clock reading.
    clock_ms: Option<u64>,
}

impl AutoSave {
    /// A zero interval disables the timer.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
            clock_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_ms > 0
    }

    /// Returns true when a save should happen now, and restarts the
    /// interval. The first call only arms the timer.
    pub fn due(&mut self, now_ms: u64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.clock_ms = Some(now_ms);
        match self.last_ms {
            None => {
                self.last_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms.saturating_sub(last) >= self.interval_ms => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    /// Restart the interval after a manual save, counting from the latest
    /// tick. Does nothing before the timer is armed.
    pub fn restart(&mut self) {
        if self.clock_ms.is_some() {
            self.last_ms = self.clock_ms;
        }
    }
}
