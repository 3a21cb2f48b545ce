use serde::Deserialize;
use snafu::{ResultExt, Snafu};
use std::time::Duration;

/// Default seconds between polls.
const DEFAULT_INTERVAL_SECS: u64 = 1;
/// Default overall wait budget in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Timing parameters for one wait operation. Immutable for the duration of a
/// wait; supplied explicitly by the caller rather than read from any ambient
/// global.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WaitConfig {
    /// Time to sleep between polls. Must be greater than zero.
    pub interval: Duration,
    /// The overall wait budget.
    pub timeout: Duration,
    /// Additional budget granted for transitions known to be slow (e.g.
    /// migrations). Zero by default.
    pub extra_timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            extra_timeout: Duration::ZERO,
        }
    }
}

impl WaitConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            extra_timeout: Duration::ZERO,
        }
    }

    pub fn with_extra_timeout(mut self, extra_timeout: Duration) -> Self {
        self.extra_timeout = extra_timeout;
        self
    }

    /// The total time budget for one wait operation. Saturates rather than
    /// overflowing, so extreme environment-supplied values cannot panic.
    pub fn budget(&self) -> Duration {
        self.timeout.saturating_add(self.extra_timeout)
    }

    /// Reads wait settings from the environment, falling back to the
    /// defaults for anything unset.
    ///
    /// # Example
    ///
    /// ```text
    /// SQUALL_WAIT_INTERVAL_SECS=2
    /// SQUALL_WAIT_TIMEOUT_SECS=600
    /// SQUALL_WAIT_EXTRA_TIMEOUT_SECS=120
    /// ```
    pub fn from_env() -> Result<Self, EnvError> {
        let inner = envy::prefixed("SQUALL_WAIT_")
            .from_env::<Inner>()
            .context(SettingsSnafu)?;
        Ok(Self {
            interval: Duration::from_secs(inner.interval_secs),
            timeout: Duration::from_secs(inner.timeout_secs),
            extra_timeout: Duration::from_secs(inner.extra_timeout_secs),
        })
    }
}

/// The error returned when environment settings cannot be parsed.
#[derive(Debug, Snafu)]
pub struct EnvError(InnerError);

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum InnerError {
    #[snafu(display("Error parsing wait settings environment variables: {}", source))]
    Settings { source: envy::Error },
}

#[derive(Debug, Deserialize)]
struct Inner {
    #[serde(default = "default_interval")]
    interval_secs: u64,
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
    #[serde(default)]
    extra_timeout_secs: u64,
}

/// We need these to provide defaults for serde.
fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
