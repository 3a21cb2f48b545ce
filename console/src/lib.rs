/*!

A minimal WebSocket client for validating cloud console proxies (noVNC,
serial console). It performs the HTTP upgrade handshake with the auth token
in a `Cookie` header, then exchanges short binary frames: client frames are
masked with a fixed key, server frames are expected unmasked, and payloads
beyond 125 bytes are out of scope.

This is a test client, not a production WebSocket implementation: the
handshake key and masking key are hardcoded, there is no fragmentation or
compression, and malformed long frames are rejected rather than handled.

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

pub use client::ConsoleClient;
pub use error::{Error, Result};
pub use frame::MAX_PAYLOAD;
pub use reconnect::{connect_with_retry, ReconnectPolicy};

mod client;
mod error;
mod frame;
mod reconnect;
