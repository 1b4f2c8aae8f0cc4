//! One-shot deadlines for the coordinator's timed phases.
//!
//! The coordinator never sleeps. It records what should happen next and when;
//! whoever drives it (the TUI core loop, or a test) waits until
//! [`TimerSlot::deadline`] and then calls back in with the current time.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// The spin animation has run its course; reveal the winner.
    SpinComplete,
    /// The post-reveal fade has finished; remove the winner.
    FadeComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    pub deadline: Instant,
}

impl ScheduledTask {
    pub fn after(kind: TaskKind, now: Instant, delay: Duration) -> Self {
        Self {
            kind,
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Holds at most one pending task.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<ScheduledTask>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot. Any previously pending task is replaced.
    pub fn schedule(&mut self, task: ScheduledTask) {
        self.pending = Some(task);
    }

    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.pending.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|t| t.deadline)
    }

    /// Take the pending task if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<TaskKind> {
        match self.pending {
            Some(task) if task.is_due(now) => {
                self.pending = None;
                Some(task.kind)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<ScheduledTask> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_not_due_before_deadline() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule(ScheduledTask::after(
            TaskKind::SpinComplete,
            t0,
            Duration::from_millis(100),
        ));
        assert_eq!(slot.take_due(t0 + Duration::from_millis(99)), None);
        assert!(slot.pending().is_some());
        assert_eq!(
            slot.take_due(t0 + Duration::from_millis(100)),
            Some(TaskKind::SpinComplete)
        );
        assert!(slot.pending().is_none());
    }

    #[test]
    fn test_task_fires_once() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule(ScheduledTask::after(TaskKind::FadeComplete, t0, Duration::ZERO));
        assert_eq!(slot.take_due(t0), Some(TaskKind::FadeComplete));
        assert_eq!(slot.take_due(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_cancel_clears_deadline() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule(ScheduledTask::after(TaskKind::SpinComplete, t0, Duration::from_secs(5)));
        assert_eq!(slot.deadline(), Some(t0 + Duration::from_secs(5)));
        assert!(slot.cancel().is_some());
        assert_eq!(slot.deadline(), None);
    }
}
