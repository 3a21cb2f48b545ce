use crate::poll::{poll_until, PollOutcome};
use std::convert::Infallible;
use std::time::Duration;

/// Repeatedly evaluates `condition` until it returns `true` or `duration`
/// elapses, sleeping `sleep_for` between evaluations.
///
/// Returns `true` as soon as the condition holds, `false` once the budget is
/// exhausted; it is the caller's decision whether `false` is fatal. The
/// condition is always evaluated at least once, even when
/// `duration < sleep_for`. `sleep_for` must be greater than zero or the loop
/// degenerates into a busy wait.
pub fn wait_until<F>(duration: Duration, sleep_for: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let outcome = poll_until(
        sleep_for,
        duration,
        || Ok::<_, Infallible>(condition()),
        |met| *met,
        |_| false,
    );
    match outcome {
        Ok(PollOutcome::Reached(_)) => true,
        Ok(_) => false,
        Err(never) => match never {},
    }
}
