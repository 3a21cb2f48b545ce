/*!

This library provides the shared vocabulary for the squall test toolkit: the
status and snapshot types reported by remote cloud resources, and the client
trait through which waiters read them.

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

pub use client::{AllowNotFound, HttpStatusCode, ResourceClient, StatusCode};
pub use error::{Error, Result};
pub use resource::ResourceState;
pub use status::ResourceStatus;

mod client;
pub mod constants;
mod error;
mod resource;
mod status;
