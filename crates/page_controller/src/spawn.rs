//! Running the data loader from synchronous event listeners.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Hands a listener's future to the host event loop.
pub trait Spawner {
    fn spawn_local(&self, task: LocalTask);
}

/// Collects spawned futures so a caller can drive them explicitly.
#[derive(Clone, Default)]
pub struct QueuedSpawner {
    queue: Rc<RefCell<Vec<LocalTask>>>,
}

impl QueuedSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub fn drain(&self) -> Vec<LocalTask> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Await every queued task, including ones queued while draining.
    pub async fn run_until_idle(&self) {
        loop {
            let tasks = self.drain();
            if tasks.is_empty() {
                return;
            }
            for task in tasks {
                task.await;
            }
        }
    }
}

impl Spawner for QueuedSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.queue.borrow_mut().push(task);
    }
}
