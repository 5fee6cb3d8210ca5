//! Cancellable one-shot tasks fired after a delay in the frame-tick domain.
//!
//! Tasks carry a plain payload instead of a closure; the owner decides what
//! to do with each payload when [`Scheduler::advance`] hands it back. A task
//! cancelled before it is due is never returned.

/// Handle returned by [`Scheduler::schedule`], used to cancel a pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Slack for float accumulation when checking whether a task is due.
const FIRE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: TaskId,
    /// Seconds left until the task fires. Counts down each `advance`.
    remaining: f32,
    payload: T,
}

/// Pending deferred tasks, each counting down its own delay.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Queue `payload` to fire `delay` seconds from now.
    pub fn schedule(&mut self, delay: f32, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            remaining: delay.max(0.0),
            payload,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Count every task down by `dt` and return the payloads that became due,
    /// earliest first.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        if self.tasks.is_empty() {
            return Vec::new();
        }
        let dt = dt.max(0.0);
        for task in &mut self.tasks {
            task.remaining -= dt;
        }

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.remaining <= FIRE_EPSILON);
        self.tasks = pending;

        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|t| t.payload).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_after_delay() {
        let mut s = Scheduler::new();
        s.schedule(0.75, "submerge");
        assert!(s.advance(0.25).is_empty());
        assert!(s.advance(0.25).is_empty());
        assert_eq!(s.advance(0.25), vec!["submerge"]);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let id = s.schedule(0.5, 1);
        assert_eq!(s.pending_count(), 1);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.advance(1.0).is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_fire_order() {
        let mut s = Scheduler::new();
        s.schedule(1.0, "late");
        s.schedule(0.25, "early");
        s.schedule(0.5, "middle");
        assert_eq!(s.advance(2.0), vec!["early", "middle", "late"]);
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.advance(1.0);
        s.schedule(0.5, ());
        assert!(s.advance(0.25).is_empty());
        assert_eq!(s.advance(0.25).len(), 1);
    }

    #[test]
    fn long_running_scheduler_keeps_frame_accuracy() {
        let mut s = Scheduler::new();
        // Keep a task pending across a very long session.
        s.schedule(1.0e9, "far");
        s.advance(524_288.0);

        s.schedule(0.75, "submerge");
        let dt = 1.0 / 60.0;
        let mut frames = 0;
        loop {
            frames += 1;
            if s.advance(dt) == vec!["submerge"] {
                break;
            }
            assert!(frames < 600, "task never fired");
        }
        assert_eq!(frames, 45);
        assert_eq!(s.pending_count(), 1);
    }
}
