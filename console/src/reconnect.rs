use crate::client::ConsoleClient;
use crate::error::{self, Result};
use log::debug;
use snafu::ensure;
use std::thread;
use std::time::Duration;
use url::Url;

/// A bounded reconnect policy for console endpoints that drop connections
/// transiently. Bounded on purpose: an unbounded retry masks genuine
/// defects as network noise.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReconnectPolicy {
    /// Connection attempts before giving up. Must be at least one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Connects to the console proxy, retrying per `policy`. Returns the first
/// successful session, or the last connection error wrapped in
/// `RetriesExhausted` once the attempts are spent.
pub fn connect_with_retry(url: &Url, token: &str, policy: &ReconnectPolicy) -> Result<ConsoleClient> {
    ensure!(policy.max_attempts > 0, error::NoAttemptsSnafu);

    let mut last_failure = None;
    for attempt in 1..=policy.max_attempts {
        match ConsoleClient::connect(url, token) {
            Ok(client) => return Ok(client),
            Err(e) => {
                debug!(
                    "console connect attempt {}/{} failed: {}",
                    attempt, policy.max_attempts, e
                );
                last_failure = Some(e);
            }
        }
        if attempt < policy.max_attempts {
            thread::sleep(policy.backoff);
        }
    }

    match last_failure {
        Some(source) => Err(error::InnerError::RetriesExhausted {
            attempts: policy.max_attempts,
            source: Box::new(source),
        }
        .into()),
        // Unreachable: max_attempts > 0 guarantees at least one attempt.
        None => Err(error::NoAttemptsSnafu.build().into()),
    }
}
