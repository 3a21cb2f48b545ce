// Status strings as the services report them. Compute statuses are uppercase,
// volume and image statuses are lowercase; both vocabularies map onto
// `ResourceStatus`.
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_BUILD: &str = "BUILD";
pub const STATUS_ERROR: &str = "ERROR";
pub const STATUS_DELETED: &str = "DELETED";
pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_ERROR_LOWER: &str = "error";

/// The legacy serialized form of "no task in progress". Older service
/// payloads carried the string literal rather than a JSON null.
pub const TASK_STATE_NONE_LITERAL: &str = "None";
