use crate::constants::{
    STATUS_ACTIVE, STATUS_AVAILABLE, STATUS_BUILD, STATUS_DELETED, STATUS_ERROR, STATUS_ERROR_LOWER,
};
use serde::{Deserialize, Serialize};
use serde_plain::{derive_display_from_serialize, derive_fromstr_from_deserialize};

/// The lifecycle stage a service reports for a remote resource.
///
/// The known vocabulary covers the compute and volume/image services
/// (`ACTIVE`, `BUILD`, `ERROR`, `DELETED`, `available`, `error`). Anything
/// else is carried verbatim in `Other` so that new service status values pass
/// through waiters unchanged.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceStatus {
    /// The resource is up and usable (`ACTIVE`).
    Active,
    /// The resource is still being provisioned (`BUILD`).
    Building,
    /// A volume or image that is ready for use (`available`).
    Available,
    /// The terminal failure status (`ERROR` or `error`).
    Error,
    /// The resource has been deleted (`DELETED`).
    Terminated,
    /// A status outside the known vocabulary, preserved as reported.
    Other(String),
}

impl ResourceStatus {
    /// `true` for statuses a resource is not expected to recover from without
    /// operator intervention.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// The wire form of this status, as the service reported it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Building => STATUS_BUILD,
            Self::Available => STATUS_AVAILABLE,
            Self::Error => STATUS_ERROR,
            Self::Terminated => STATUS_DELETED,
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ResourceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            STATUS_ACTIVE => Self::Active,
            STATUS_BUILD => Self::Building,
            STATUS_AVAILABLE => Self::Available,
            STATUS_ERROR | STATUS_ERROR_LOWER => Self::Error,
            STATUS_DELETED => Self::Terminated,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ResourceStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ResourceStatus> for String {
    fn from(status: ResourceStatus) -> Self {
        match status {
            ResourceStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

derive_display_from_serialize!(ResourceStatus);
derive_fromstr_from_deserialize!(ResourceStatus);
