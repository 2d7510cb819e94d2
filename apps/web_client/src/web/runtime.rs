//! Timers and task spawning on the browser event loop.

use std::time::Duration;

use page_controller::{
    spawn::{LocalTask, Spawner},
    timers::{Scheduler, Task, TimerHandle},
};
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast};

/// `setTimeout`-backed timers. Cancellation is checked when the callback fires.
pub struct WindowScheduler {
    window: web_sys::Window,
}

impl WindowScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        let callback = Closure::once_into_js(move || {
            if !guard.is_cancelled() {
                task();
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(error) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            warn!(?error, "failed to schedule timer");
        }
        handle
    }
}

pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
