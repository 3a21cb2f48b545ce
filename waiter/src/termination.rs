use crate::config::WaitConfig;
use crate::error::{self, Result};
use crate::poll::{poll_until, PollOutcome};
use log::{debug, trace};
use snafu::ensure;
use squall_model::{AllowNotFound, ResourceClient, ResourceState, ResourceStatus};

/// Blocks until the resource named `id` can no longer be found.
///
/// A not-found response from the client means the resource is gone, which is
/// the outcome being waited for; every other client error propagates
/// unchanged. Returns the usual [`Error::Timeout`] if the resource is still
/// present when the budget elapses.
///
/// [`Error::Timeout`]: crate::error::Error::Timeout
pub fn wait_for_termination<C>(client: &C, id: &str, config: &WaitConfig) -> Result<(), C::Error>
where
    C: ResourceClient,
{
    ensure!(
        !config.interval.is_zero(),
        error::InvalidConfigSnafu {
            what: "interval must be greater than zero"
        }
    );

    let outcome = poll_until(
        config.interval,
        config.budget(),
        || {
            client
                .get(id)
                .allow_not_found(|e| trace!("resource '{}' is gone: {}", id, e))
        },
        |maybe| maybe.is_none(),
        |_| false,
    )
    .map_err(|error| {
        error::ClientSnafu {
            id: id.to_string(),
            error,
        }
        .build()
    })?;

    match outcome {
        // `Failed` cannot occur: no failure predicate is supplied above.
        PollOutcome::Reached(_) | PollOutcome::Failed(_) => {
            debug!("resource '{}' is terminated", id);
            Ok(())
        }
        PollOutcome::TimedOut { last, elapsed } => {
            let (last_status, last_task_state) = last
                .map(|state: ResourceState| (state.status, state.task_state))
                .unwrap_or((ResourceStatus::Terminated, None));
            error::TimeoutSnafu {
                id,
                target: ResourceStatus::Terminated,
                ready_wait: false,
                elapsed,
                last_status,
                last_task_state,
            }
            .fail()
        }
    }
}
