use crate::constants::TASK_STATE_NONE_LITERAL;
use crate::error::{self, Result};
use crate::status::ResourceStatus;
use serde::{Deserialize, Deserializer, Serialize};
use snafu::ResultExt;

/// A point-in-time snapshot of a remote resource, as fetched through a
/// [`ResourceClient`](crate::ResourceClient). Waiters only ever read these;
/// they never mutate the remote resource.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// The service-assigned identifier of the resource.
    pub id: String,
    /// The primary lifecycle status.
    pub status: ResourceStatus,
    /// The compute service's secondary in-progress indicator. `None` means no
    /// task is settling; see [`ResourceState::from_value`] for the legacy
    /// `"None"` string handling.
    #[serde(default, deserialize_with = "task_state_compat")]
    pub task_state: Option<String>,
}

impl ResourceState {
    /// Deserializes a raw service payload. Useful for client implementations
    /// that fetch resources as untyped JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let what = value
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or("<unknown>")
            .to_string();
        Ok(serde_json::from_value(value).context(error::ResourceSerdeSnafu { what })?)
    }

    /// `true` once the secondary task state has cleared.
    pub fn is_settled(&self) -> bool {
        self.task_state.is_none()
    }
}

/// Compatibility shim for the task-state field. Older serializations emitted
/// the string literal `"None"` where a JSON null belongs; normalize it here so
/// that waiter logic only ever sees a real `Option`.
fn task_state_compat<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| s.as_str() != TASK_STATE_NONE_LITERAL))
}
