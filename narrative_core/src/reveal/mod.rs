//! Reveal timers - cancelable one-shot delays between a choice and the
//! transition it causes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::SessionError;

/// Identifies one reveal window. A state machine only accepts the ticket of
/// its current pending reveal, so late or cancelled timers are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealTicket(pub u64);

impl std::fmt::Display for RevealTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out increasing tickets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub(crate) fn issue(&mut self) -> RevealTicket {
        let ticket = RevealTicket(self.next);
        self.next += 1;
        ticket
    }
}

/// A spawned timer that delivers its ticket once the delay has elapsed.
///
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct ScheduledReveal {
    ticket: RevealTicket,
    delay: Duration,
    handle: JoinHandle<()>,
    fired: oneshot::Receiver<RevealTicket>,
}

impl ScheduledReveal {
    /// Schedule `ticket` to fire after `delay` on `runtime`.
    pub fn schedule(runtime: &Handle, ticket: RevealTicket, delay: Duration) -> Self {
        let (tx, fired) = oneshot::channel();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone if the session was torn down.
            let _ = tx.send(ticket);
        });
        tracing::debug!(%ticket, delay_ms = delay.as_millis() as u64, "Reveal scheduled");

        Self {
            ticket,
            delay,
            handle,
            fired,
        }
    }

    pub fn ticket(&self) -> RevealTicket {
        self.ticket
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the timer. Returns `None` if it was aborted before firing.
    pub async fn fired(&mut self) -> Option<RevealTicket> {
        (&mut self.fired).await.ok()
    }

    /// Stop the timer. Its transition will never be delivered.
    pub fn cancel(self) {
        tracing::debug!(ticket = %self.ticket, "Reveal cancelled");
        // Drop aborts the task.
    }
}

impl Drop for ScheduledReveal {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The runtime reveal timers are spawned on.
pub(crate) fn current_runtime() -> Result<Handle, SessionError> {
    Handle::try_current().map_err(|_| SessionError::NoRuntime)
}

/// Spawned tasks still alive on the current runtime, after giving aborted
/// ones a chance to be reaped.
#[cfg(test)]
pub(crate) async fn live_task_count() -> usize {
    let metrics = Handle::current().metrics();
    for _ in 0..16 {
        if metrics.num_alive_tasks() == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    metrics.num_alive_tasks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_tickets_increase() {
        let mut counter = TicketCounter::default();
        assert_eq!(counter.issue(), RevealTicket(0));
        assert_eq!(counter.issue(), RevealTicket(1));
    }

    #[test]
    fn test_no_runtime() {
        assert!(matches!(current_runtime(), Err(SessionError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let runtime = current_runtime().expect("inside tokio");
        let start = Instant::now();
        let mut reveal = ScheduledReveal::schedule(&runtime, RevealTicket(7), Duration::from_secs(6));

        assert_eq!(reveal.fired().await, Some(RevealTicket(7)));
        assert!(start.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_timer_reports_none() {
        let runtime = current_runtime().expect("inside tokio");
        let mut reveal = ScheduledReveal::schedule(&runtime, RevealTicket(3), Duration::from_secs(3));

        reveal.handle.abort();

        assert_eq!(reveal.fired().await, None);
    }

    #[tokio::test]
    async fn test_cancel_stops_task() {
        let runtime = current_runtime().expect("inside tokio");
        let reveal = ScheduledReveal::schedule(&runtime, RevealTicket(1), Duration::from_secs(60));
        assert_eq!(live_task_count().await, 1);

        reveal.cancel();

        assert_eq!(live_task_count().await, 0);
    }

    #[tokio::test]
    async fn test_drop_stops_task() {
        let runtime = current_runtime().expect("inside tokio");
        let reveal = ScheduledReveal::schedule(&runtime, RevealTicket(2), Duration::from_secs(60));
        assert_eq!(live_task_count().await, 1);

        drop(reveal);

        assert_eq!(live_task_count().await, 0);
    }
}
