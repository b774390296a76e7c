use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body for `POST <base>/vote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub option: String,
}

/// Successful vote acknowledgement. The backend sends `message` and the
/// post-vote tallies, but the widget only logs them; the authoritative
/// display state always comes from a fresh poll fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_votes: Option<HashMap<String, u64>>,
}

/// Error body the backend may attach to a non-2xx response. The `error`
/// field is optional on the wire; when absent the status code is reported
/// verbatim instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
