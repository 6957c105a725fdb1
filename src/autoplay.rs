//! Deadline-based repeating task.
//!
//! Autoplay is modeled as a single optional deadline rather than a timer
//! handle. Starting always replaces the deadline, so a task can never have
//! two live schedules. Callers drive it with [`RepeatingTask::poll`] using the
//! same millisecond clock they pass to every other event.

use crate::types::Millis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingTask {
    period: Millis,
    next_due: Option<Millis>,
}

impl RepeatingTask {
    /// A stopped task. A zero period is treated as one millisecond.
    pub fn new(period: Millis) -> Self {
        Self {
            period: period.max(1),
            next_due: None,
        }
    }

    pub fn period(&self) -> Millis {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.next_due
    }

    /// Arm the task so the first firing is one full period after `now`.
    ///
    /// Calling this on a running task restarts its phase. A deadline that
    /// would pass the end of the clock is pinned to `Millis::MAX`, which is
    /// never reached.
    pub fn start(&mut self, now: Millis) {
        self.next_due = Some(now.saturating_add(self.period));
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Number of firings due at `now`, advancing the deadline past them.
    ///
    /// Each elapsed period fires once; deadlines stay aligned to the phase set
    /// by the last `start`.
    pub fn poll(&mut self, now: Millis) -> u64 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due || due == Millis::MAX {
            return 0;
        }
        let fired = (now - due) / self.period + 1;
        self.next_due = Some(due.saturating_add(fired.saturating_mul(self.period)));
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_stopped() {
        let mut task = RepeatingTask::new(3000);
        assert!(!task.is_running());
        assert_eq!(task.poll(1_000_000), 0);
    }

    #[test]
    fn fires_once_per_period() {
        let mut task = RepeatingTask::new(3000);
        task.start(0);
        assert_eq!(task.poll(2999), 0);
        assert_eq!(task.poll(3000), 1);
        assert_eq!(task.poll(3001), 0);
        assert_eq!(task.poll(6000), 1);
    }

    #[test]
    fn catches_up_on_skipped_periods() {
        let mut task = RepeatingTask::new(1000);
        task.start(0);
        assert_eq!(task.poll(3500), 3);
        assert_eq!(task.next_due(), Some(4000));
    }

    #[test]
    fn start_twice_keeps_a_single_schedule() {
        let mut task = RepeatingTask::new(3000);
        task.start(0);
        task.start(0);
        assert_eq!(task.poll(3000), 1);
    }

    #[test]
    fn restart_resets_phase() {
        let mut task = RepeatingTask::new(3000);
        task.start(0);
        task.start(2000);
        assert_eq!(task.poll(3000), 0);
        assert_eq!(task.poll(5000), 1);
    }

    #[test]
    fn stop_cancels_pending_firing() {
        let mut task = RepeatingTask::new(3000);
        task.start(0);
        task.stop();
        assert_eq!(task.poll(9000), 0);
        assert_eq!(task.next_due(), None);
    }

    #[test]
    fn deadline_past_end_of_clock_never_fires() {
        let mut task = RepeatingTask::new(3000);
        task.start(Millis::MAX - 10);
        assert_eq!(task.next_due(), Some(Millis::MAX));
        assert_eq!(task.poll(Millis::MAX), 0);
        assert!(task.is_running());
    }

    #[test]
    fn catch_up_near_end_of_clock_saturates() {
        let mut task = RepeatingTask::new(3000);
        task.start(Millis::MAX - 5000);
        assert_eq!(task.poll(Millis::MAX), 1);
        assert_eq!(task.next_due(), Some(Millis::MAX));
        assert_eq!(task.poll(Millis::MAX), 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        let task = RepeatingTask::new(0);
        assert_eq!(task.period(), 1);
    }
}
