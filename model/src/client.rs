use crate::resource::ResourceState;
use std::fmt::{Debug, Display};

pub use http::StatusCode;

/// The capability waiters use to read a remote resource's current state.
///
/// Implementations are thin wrappers over a service's REST API (`GET` by id).
/// The trait exists so that waiters can be exercised against a mock without a
/// live cloud, the same way an agent is tested against a mock API client.
pub trait ResourceClient {
    /// The error type returned by the underlying transport. It must expose an
    /// HTTP status code where one exists so that waiters can recognize
    /// not-found responses.
    type Error: Debug + Display + HttpStatusCode + Send + Sync + 'static;

    /// Fetches the resource's current snapshot from the remote service.
    fn get(&self, id: &str) -> Result<ResourceState, Self::Error>;
}

/// A trait for errors that may carry an HTTP status code.
pub trait HttpStatusCode {
    fn status_code(&self) -> Option<StatusCode>;

    fn is_status_code(&self, status_code: StatusCode) -> bool {
        self.status_code()
            .map(|some| some == status_code)
            .unwrap_or_default()
    }
}

impl<T, E> HttpStatusCode for Result<T, E>
where
    E: HttpStatusCode,
{
    fn status_code(&self) -> Option<StatusCode> {
        self.as_ref().err().and_then(|e| e.status_code())
    }
}

/// Allows a `Result` carrying an [`HttpStatusCode`] error to treat `404` as a
/// non-error. Termination waits use this: a resource that can no longer be
/// found is gone, which is the outcome being waited for.
pub trait AllowNotFound<T, E>: Sized
where
    E: HttpStatusCode,
{
    /// If the result is a `404` error, converts it to `Ok(None)`, calling
    /// `on_not_found` with the error first (e.g. to log it).
    fn allow_not_found<F>(self, on_not_found: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&E);
}

impl<T, E> AllowNotFound<T, E> for Result<T, E>
where
    E: HttpStatusCode,
{
    fn allow_not_found<F>(self, on_not_found: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&E),
    {
        match self {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_status_code(StatusCode::NOT_FOUND) => {
                on_not_found(&e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
