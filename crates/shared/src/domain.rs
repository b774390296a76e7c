use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One poll as the backend reports it: a question, candidate options in
/// display order, and per-option tallies. Replaced wholesale on every
/// successful fetch; never merged incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollData {
    pub question: String,
    pub options: Vec<String>,
    /// Options absent from this map have zero votes. Absence is not an error.
    #[serde(default)]
    pub votes: HashMap<String, u64>,
}

impl PollData {
    pub fn votes_for(&self, option: &str) -> u64 {
        self.votes.get(option).copied().unwrap_or(0)
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|option| self.votes_for(option)).sum()
    }
}
