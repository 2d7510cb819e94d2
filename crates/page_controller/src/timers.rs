//! One-shot timers.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task. Dropping it does not cancel the task.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent the task from running if it has not fired yet.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

struct Pending {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Scheduler driven by an explicit virtual clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Tasks that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .pending
            .iter()
            .filter(|p| !p.handle.is_cancelled())
            .count()
    }

    /// Move the clock forward by `by`, firing every task that comes due on the way,
    /// including tasks scheduled by tasks fired during this call.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some(next) = self.take_next_due(target) {
            if !next.handle.is_cancelled() {
                (next.task)();
            }
        }
        self.state.borrow_mut().now = target;
    }

    fn take_next_due(&self, target: Duration) -> Option<Pending> {
        let mut state = self.state.borrow_mut();
        let index = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(index, _)| index)?;
        let next = state.pending.swap_remove(index);
        state.now = next.due;
        Some(next)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(Pending {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |label: &'static str| -> Task {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn fires_in_due_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(20), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("first"));
        scheduler.schedule(Duration::from_millis(10), task("second"));

        scheduler.advance(Duration::from_millis(9));
        assert!(log.borrow().is_empty());
        scheduler.advance(Duration::from_millis(11));
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(20));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn nested_tasks_fire_within_the_same_advance() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_scheduler = scheduler.clone();
        let inner_log = log.clone();
        scheduler.schedule(
            Duration::from_millis(5000),
            Box::new(move || {
                inner_log.borrow_mut().push("outer");
                let inner_log = inner_log.clone();
                inner_scheduler.schedule(
                    Duration::from_millis(150),
                    Box::new(move || inner_log.borrow_mut().push("inner")),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(5149));
        assert_eq!(*log.borrow(), vec!["outer"]);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn cancelled_tasks_never_run() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let handle = scheduler.schedule(Duration::from_millis(1), task("cancelled"));
        scheduler.schedule(Duration::from_millis(1), task("kept"));
        handle.cancel();
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn dropping_a_handle_keeps_the_task() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        drop(scheduler.schedule(Duration::ZERO, task("ran")));
        scheduler.advance(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["ran"]);
    }
}
