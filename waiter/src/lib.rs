/*!

Waiters for remote cloud resources. Integration tests use these to block
until a resource reaches a target status ([`wait_for_status`]), disappears
([`wait_for_termination`]), or until an arbitrary condition holds
([`wait_until`]). All of them share one retry-until primitive
([`poll_until`]): fetch, compare, sleep, re-fetch, with a cooperative timeout
checked once per iteration.

Everything here is synchronous and blocking; a waiter owns no state beyond
its stack locals, so concurrent waits from separate test threads are
independent.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use config::{EnvError, WaitConfig};
pub use error::{Error, Result};
pub use poll::{poll_until, PollOutcome};
pub use status::{wait_for_status, StatusWait};
pub use termination::wait_for_termination;
pub use until::wait_until;

mod config;
pub mod error;
mod poll;
mod status;
mod termination;
mod until;
