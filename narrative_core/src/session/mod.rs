//! Sessions - own the state machines of one quiz or adventure and drive
//! their reveal timers.

mod adventure;
mod quiz;

pub use adventure::*;
pub use quiz::*;

use std::time::Duration;

use crate::error::{NarrativeError, SessionError};
use crate::reveal::{current_runtime, RevealTicket, ScheduledReveal};

/// Wait for the reveal of `pending` and clear the timer once it resolves.
///
/// A pending reveal without a live timer for its ticket (the previous one
/// was aborted, e.g. with its runtime) gets a fresh timer with the full
/// delay, so an aborted timer never leaves the session stuck.
async fn await_reveal(
    timer: &mut Option<ScheduledReveal>,
    pending: Option<RevealTicket>,
    delay: Duration,
) -> Result<RevealTicket, SessionError> {
    let ticket = pending.ok_or(NarrativeError::NoPendingReveal)?;

    if timer.as_ref().map(ScheduledReveal::ticket) != Some(ticket) {
        let runtime = current_runtime()?;
        tracing::debug!(%ticket, "Rescheduling reveal without a live timer");
        *timer = Some(ScheduledReveal::schedule(&runtime, ticket, delay));
    }

    let fired = match timer.as_mut() {
        Some(reveal) => reveal.fired().await,
        None => None,
    };
    *timer = None;
    fired.ok_or(SessionError::RevealCancelled)
}
