//! Cancellable repeating task that drives the session countdown.

use std::{future::Future, ops::ControlFlow, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

/// Shortest period accepted for a countdown; a zero period would spin.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running countdown task.
///
/// `generation` identifies the task so a firing that raced with a
/// cancellation can tell it no longer owns the session.
#[derive(Debug)]
pub(crate) struct CountdownHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the task. Dropping the handle instead only detaches it.
    pub(crate) fn cancel(self) {
        self.task.abort();
    }
}

/// Spawn a task calling `fire` once per `period` until it returns
/// [`ControlFlow::Break`]. The first firing happens one full period after spawn.
pub(crate) fn spawn<F, Fut>(generation: u64, period: Duration, mut fire: F) -> CountdownHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ControlFlow<()>> + Send,
{
    let period = period.max(MIN_PERIOD);
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if fire().await.is_break() {
                break;
            }
        }
    });

    CountdownHandle { generation, task }
}
