use crate::config::WaitConfig;
use crate::error::{self, Result};
use crate::poll::{poll_until, PollOutcome};
use log::debug;
use snafu::ensure;
use squall_model::{ResourceClient, ResourceState, ResourceStatus};
use std::time::Instant;

/// A configured status wait. The builder carries the two policy flags the
/// plain [`wait_for_status`] call defaults:
///
/// * `ready_wait` — in addition to the target status, require the secondary
///   task state to have cleared before declaring success. Used when the
///   target is reached while an async operation is still settling.
/// * `raise_on_error` — fail with [`Error::ResourceFailed`] when a terminal
///   failure status is observed. Disable it for tests that deliberately
///   drive a resource into an error state and want to keep observing it.
///
/// [`Error::ResourceFailed`]: crate::error::Error::ResourceFailed
#[derive(Debug, Clone)]
pub struct StatusWait {
    config: WaitConfig,
    ready_wait: bool,
    raise_on_error: bool,
}

impl StatusWait {
    pub fn new(config: WaitConfig) -> Self {
        Self {
            config,
            ready_wait: false,
            raise_on_error: true,
        }
    }

    pub fn ready_wait(mut self, ready_wait: bool) -> Self {
        self.ready_wait = ready_wait;
        self
    }

    pub fn raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    /// Blocks until the resource named `id` reaches `target`, a terminal
    /// failure status is observed (with `raise_on_error`), or the configured
    /// budget elapses. Returns the last-fetched snapshot on success.
    ///
    /// The first fetch happens immediately, so a resource already in the
    /// target state returns without sleeping. Client errors propagate
    /// unchanged; waiting for deletion is [`wait_for_termination`]'s job,
    /// which is the one place a not-found response means success.
    ///
    /// [`wait_for_termination`]: crate::wait_for_termination
    pub fn run<C>(&self, client: &C, id: &str, target: ResourceStatus) -> Result<ResourceState, C::Error>
    where
        C: ResourceClient,
    {
        ensure!(
            !self.config.interval.is_zero(),
            error::InvalidConfigSnafu {
                what: "interval must be greater than zero"
            }
        );

        let start = Instant::now();
        let target_is_failure = target.is_terminal_failure();
        let ready_wait = self.ready_wait;
        let raise_on_error = self.raise_on_error;
        let mut previous: Option<(ResourceStatus, Option<String>)> = None;

        let outcome = poll_until(
            self.config.interval,
            self.config.budget(),
            || client.get(id),
            |state| {
                let current = (state.status.clone(), state.task_state.clone());
                if let Some(old) = &previous {
                    if *old != current {
                        debug!(
                            "resource '{}' transitioned from '{}'/{:?} to '{}'/{:?} after {:?}",
                            id,
                            old.0,
                            old.1,
                            current.0,
                            current.1,
                            start.elapsed()
                        );
                    }
                }
                previous = Some(current);
                state.status == target && (!ready_wait || state.is_settled())
            },
            |state| raise_on_error && !target_is_failure && state.status.is_terminal_failure(),
        )
        .map_err(|error| {
            error::ClientSnafu {
                id: id.to_string(),
                error,
            }
            .build()
        })?;

        match outcome {
            PollOutcome::Reached(state) => {
                debug!(
                    "resource '{}' reached status '{}' after {:?}",
                    id,
                    state.status,
                    start.elapsed()
                );
                Ok(state)
            }
            PollOutcome::Failed(state) => error::ResourceFailedSnafu {
                id,
                status: state.status,
            }
            .fail(),
            PollOutcome::TimedOut { last, elapsed } => error::TimeoutSnafu {
                id,
                target,
                ready_wait: self.ready_wait,
                elapsed,
                last_status: last.status,
                last_task_state: last.task_state,
            }
            .fail(),
        }
    }
}

/// Blocks until the resource named `id` reaches `target` with the default
/// policy: no ready wait, fail on a terminal failure status.
pub fn wait_for_status<C>(
    client: &C,
    id: &str,
    target: ResourceStatus,
    config: &WaitConfig,
) -> Result<ResourceState, C::Error>
where
    C: ResourceClient,
{
    StatusWait::new(config.clone()).run(client, id, target)
}
