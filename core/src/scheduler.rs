use serde::{Deserialize, Serialize};

use crate::Generation;

/// Work the engine asks its driver to run later. Plain data rather than a
/// closure so drivers can route it over any event loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Fire-once: flip a mismatched pair back down after the reveal delay.
    UnrevealPair,
    /// Repeating: refresh the elapsed-time display.
    TimerTick,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    pub generation: Generation,
}

/// Scheduling capability supplied by the driver. Callbacks fire by handing
/// the task back to [`crate::GameEngine::run_task`]; the engine discards any
/// task tagged with a stale generation.
pub trait Scheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: ScheduledTask);
    fn schedule_repeating(&mut self, interval_ms: u32, task: ScheduledTask);
    /// Drops every pending callback tagged with `generation`.
    fn cancel_generation(&mut self, generation: Generation);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingTask {
    pub delay_ms: u32,
    pub repeating: bool,
    pub task: ScheduledTask,
}

/// In-memory scheduler for drivers that pump tasks manually, and for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskQueue {
    pending: Vec<PendingTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingTask] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the oldest pending entry.
    pub fn pop(&mut self) -> Option<PendingTask> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Scheduler for TaskQueue {
    fn schedule_once(&mut self, delay_ms: u32, task: ScheduledTask) {
        self.pending.push(PendingTask {
            delay_ms,
            repeating: false,
            task,
        });
    }

    fn schedule_repeating(&mut self, interval_ms: u32, task: ScheduledTask) {
        self.pending.push(PendingTask {
            delay_ms: interval_ms,
            repeating: true,
            task,
        });
    }

    fn cancel_generation(&mut self, generation: Generation) {
        self.pending
            .retain(|entry| entry.task.generation != generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_generation_drops_only_matching_tasks() {
        let mut queue = TaskQueue::new();
        queue.schedule_once(
            800,
            ScheduledTask {
                kind: TaskKind::UnrevealPair,
                generation: 0,
            },
        );
        queue.schedule_repeating(
            500,
            ScheduledTask {
                kind: TaskKind::TimerTick,
                generation: 1,
            },
        );

        queue.cancel_generation(0);

        assert_eq!(queue.pending().len(), 1);
        assert_eq!(queue.pending()[0].task.generation, 1);
        assert!(queue.pending()[0].repeating);
    }

    #[test]
    fn pop_returns_tasks_in_scheduling_order() {
        let mut queue = TaskQueue::new();
        let tick = ScheduledTask {
            kind: TaskKind::TimerTick,
            generation: 0,
        };
        let unreveal = ScheduledTask {
            kind: TaskKind::UnrevealPair,
            generation: 0,
        };
        queue.schedule_repeating(500, tick);
        queue.schedule_once(800, unreveal);

        assert_eq!(queue.pop().map(|entry| entry.task), Some(tick));
        assert_eq!(queue.pop().map(|entry| entry.task), Some(unreveal));
        assert!(queue.is_empty());
    }
}
