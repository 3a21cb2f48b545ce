use snafu::Snafu;
use squall_model::ResourceStatus;
use std::fmt::{Debug, Display};
use std::time::Duration;

/// The `Result` type returned by waiters. `E` is the resource client's error
/// type, preserved rather than erased so callers keep its full fidelity.
pub type Result<T, E> = std::result::Result<T, Error<E>>;

/// The error type returned by waiters.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error<E>
where
    E: Debug + Display + Send + Sync + 'static,
{
    /// An error returned by the resource client while fetching, passed
    /// through unchanged.
    #[snafu(display("Error fetching resource '{}': {}", id, error))]
    Client { id: String, error: E },

    #[snafu(display(
        "Resource '{}' failed to reach status '{}'{} within the allotted time; \
         last observed status '{}', task state {:?}, elapsed {:?}",
        id,
        target,
        if *ready_wait { " with task state cleared" } else { "" },
        last_status,
        last_task_state,
        elapsed
    ))]
    Timeout {
        id: String,
        target: ResourceStatus,
        ready_wait: bool,
        elapsed: Duration,
        last_status: ResourceStatus,
        last_task_state: Option<String>,
    },

    /// The resource reported a terminal failure status while one was not
    /// being waited for.
    #[snafu(display("Resource '{}' entered terminal status '{}'", id, status))]
    ResourceFailed { id: String, status: ResourceStatus },

    #[snafu(display("Invalid wait configuration: {}", what))]
    InvalidConfig { what: String },
}

impl<E> Error<E>
where
    E: Debug + Display + Send + Sync + 'static,
{
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_resource_failed(&self) -> bool {
        matches!(self, Self::ResourceFailed { .. })
    }
}
