use std::thread;
use std::time::{Duration, Instant};

/// How one [`poll_until`] invocation ended.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PollOutcome<T> {
    /// The success predicate held; carries the fetch it held for.
    Reached(T),
    /// The failure predicate held; carries the fetch it held for.
    Failed(T),
    /// The budget elapsed; carries the last fetch and the measured elapsed
    /// time.
    TimedOut { last: T, elapsed: Duration },
}

/// The retry-until primitive every waiter is built on.
///
/// Fetches once immediately to establish a baseline, so a condition that
/// already holds is recognized without sleeping. Each iteration re-evaluates
/// the freshly fetched value, never a cached one, so an oscillating remote
/// status is tracked correctly. The timeout is cooperative: it is checked
/// once per iteration after the fetch, which means a slow fetch can overrun
/// the nominal budget by up to one round trip.
///
/// Fetch errors propagate immediately. `interval` must be greater than zero
/// unless the first fetch is expected to decide the outcome.
pub fn poll_until<T, E, F, S, X>(
    interval: Duration,
    budget: Duration,
    mut fetch: F,
    mut succeeded: S,
    mut failed: X,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Result<T, E>,
    S: FnMut(&T) -> bool,
    X: FnMut(&T) -> bool,
{
    let start = Instant::now();
    loop {
        let current = fetch()?;
        if succeeded(&current) {
            return Ok(PollOutcome::Reached(current));
        }
        if failed(&current) {
            return Ok(PollOutcome::Failed(current));
        }
        let elapsed = start.elapsed();
        if elapsed >= budget {
            return Ok(PollOutcome::TimedOut {
                last: current,
                elapsed,
            });
        }
        thread::sleep(interval);
    }
}
