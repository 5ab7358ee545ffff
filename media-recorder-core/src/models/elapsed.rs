/// One-tick-per-second recording clock.
///
/// Driven by an external timer; ticks while frozen are ignored so a paused
/// window never counts toward the recorded duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedCounter {
    seconds: u64,
    running: bool,
}

impl ElapsedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and start counting.
    pub fn restart(&mut self) {
        self.seconds = 0;
        self.running = true;
    }

    /// Stop counting, keeping the value.
    pub fn freeze(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Advance by one second if running. Returns whether the value changed.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.seconds += 1;
        }
        self.running
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `MM:SS`, zero-padded. Minutes keep growing past 99.
    pub fn display(&self) -> String {
        format_elapsed(self.seconds)
    }
}

pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_n(counter: &mut ElapsedCounter, n: u32) {
        for _ in 0..n {
            counter.tick();
        }
    }

    #[test]
    fn formats_zero_padded_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(7), "00:07");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(6000), "100:00");
    }

    #[test]
    fn idle_counter_ignores_ticks() {
        let mut counter = ElapsedCounter::new();
        assert!(!counter.tick());
        assert_eq!(counter.seconds(), 0);
    }

    #[test]
    fn pause_window_is_excluded() {
        let mut counter = ElapsedCounter::new();
        counter.restart();
        tick_n(&mut counter, 5);
        counter.freeze();
        assert_eq!(counter.display(), "00:05");

        tick_n(&mut counter, 3);
        counter.resume();
        tick_n(&mut counter, 2);
        counter.freeze();

        assert_eq!(counter.display(), "00:07");
    }

    #[test]
    fn restart_resets_but_freeze_retains() {
        let mut counter = ElapsedCounter::new();
        counter.restart();
        tick_n(&mut counter, 42);
        counter.freeze();
        assert_eq!(counter.seconds(), 42);

        counter.restart();
        assert_eq!(counter.seconds(), 0);
        assert!(counter.is_running());
    }
}
