/*!

A scripted mock of the [`ResourceClient`] trait so that waiters can be tested
without a live cloud. Each `get` call consumes the next step of the script;
when the script is down to its last step, that step repeats forever (a
resource whose status never changes again).

!*/

use squall_model::{HttpStatusCode, ResourceClient, ResourceState, ResourceStatus, StatusCode};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

/// A transport-level error with an optional HTTP status code.
#[derive(Debug, Clone)]
pub struct MockError(pub Option<u16>);

impl Display for MockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "mock API error, status {}", code),
            None => write!(f, "mock transport error"),
        }
    }
}

impl HttpStatusCode for MockError {
    fn status_code(&self) -> Option<StatusCode> {
        self.0.and_then(|code| StatusCode::from_u16(code).ok())
    }
}

pub fn not_found() -> MockError {
    MockError(Some(404))
}

pub fn server_error() -> MockError {
    MockError(Some(500))
}

/// Builds a snapshot for the scripted resource.
pub fn state(id: &str, status: &str, task_state: Option<&str>) -> ResourceState {
    ResourceState {
        id: id.to_string(),
        status: ResourceStatus::from(status),
        task_state: task_state.map(String::from),
    }
}

pub struct MockClient {
    script: RefCell<VecDeque<Result<ResourceState, MockError>>>,
    fetches: Cell<usize>,
}

impl MockClient {
    pub fn new<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Result<ResourceState, MockError>>,
    {
        Self {
            script: RefCell::new(steps.into_iter().collect()),
            fetches: Cell::new(0),
        }
    }

    /// How many times `get` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ResourceClient for MockClient {
    type Error = MockError;

    fn get(&self, _id: &str) -> Result<ResourceState, MockError> {
        self.fetches.set(self.fetches.get() + 1);
        let mut script = self.script.borrow_mut();
        if script.len() > 1 {
            script.pop_front().unwrap_or(Err(MockError(None)))
        } else {
            script.front().cloned().unwrap_or(Err(MockError(None)))
        }
    }
}
